//! CLI binary entry point for court-lists

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use court_list_ingest::cli::commands::convert::{ConvertArgs, handle_convert};
#[cfg(feature = "cli")]
use court_list_ingest::cli::commands::list_types::handle_list_types;
#[cfg(feature = "cli")]
use court_list_ingest::cli::commands::validate::handle_validate;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "court-lists")]
#[command(about = "Convert and validate court and tribunal hearing lists")]
#[command(version)]
struct Cli {
    /// Directory containing .court-lists.toml (defaults to the current directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet (or check a JSON file) and print the list as JSON
    Convert {
        /// Numeric list type identifier
        #[arg(short, long)]
        list_type: u32,
        /// Input file (.xlsx, .xls, .ods or .json)
        input: PathBuf,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
        /// Keep the upload and its JSON in the configured storage directory
        #[arg(long)]
        store: bool,
    },
    /// Validate a file for a list type without writing any output
    Validate {
        /// Numeric list type identifier
        #[arg(short, long)]
        list_type: u32,
        /// Input file (.xlsx, .xls, .ods or .json)
        input: PathBuf,
    },
    /// List the built-in list types
    ListTypes,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            list_type,
            input,
            output,
            pretty,
            store,
        } => {
            let args = ConvertArgs {
                list_type_id: list_type,
                input,
                output,
                pretty,
                store,
                config_dir: cli.config_dir,
            };
            handle_convert(&args)
        }
        Commands::Validate { list_type, input } => {
            handle_validate(list_type, &input, cli.config_dir.as_deref())
        }
        Commands::ListTypes => handle_list_types(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}

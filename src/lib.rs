//! Roishapes: convert ImageJ ROIs into OME shapes.
//!
//! ImageJ saves regions of interest as `.roi` files (or `.zip` archives of
//! them). Roishapes decodes those into loosely-typed ROI records and maps
//! each record onto OME shapes (Point, Rectangle, Line, Ellipse, Polygon,
//! Polyline) with zero-based z/c/t indices and the ROI name as label.
//!
//! # Modules
//!
//! - [`convert`]: Record to shape conversion (dispatch, builders, batches)
//! - [`model`]: OME shape types
//! - [`record`]: ROI records and ordered record sets
//! - [`imagej`]: ImageJ `.roi` / `.zip` readers
//! - [`error`]: Error types for roishapes operations
//!
//! # Example
//!
//! ```
//! use roishapes::convert::convert_batch;
//! use roishapes::record::io_json::from_records_json_str;
//!
//! let records = from_records_json_str(
//!     r#"{"cell": {"type": "oval", "name": "cell",
//!                  "left": 0, "top": 0, "width": 10, "height": 20}}"#,
//! )?;
//! let shapes = convert_batch(&records)?;
//! assert_eq!(shapes.len(), 1);
//! # Ok::<(), roishapes::RoiError>(())
//! ```

pub mod convert;
pub mod error;
pub mod imagej;
pub mod model;
pub mod record;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use error::RoiError;

/// The roishapes CLI application.
#[derive(Parser)]
#[command(name = "roishapes")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a .roi or .zip file into OME shapes.
    Convert(ConvertArgs),
    /// Decode a .roi or .zip file and print the raw ROI records.
    Records(RecordsArgs),
}

/// Output format for converted shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON array.
    Json,
    /// One line per shape.
    Text,
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Input file (.roi or .zip).
    input: PathBuf,

    /// Output format for the shapes.
    #[arg(long, value_enum, default_value = "json", env = "ROISHAPES_OUTPUT")]
    output: OutputFormat,

    /// Print a conversion report (counts, dropped records) to stderr.
    #[arg(long)]
    report: bool,
}

/// Arguments for the records subcommand.
#[derive(clap::Args)]
struct RecordsArgs {
    /// Input file (.roi or .zip).
    input: PathBuf,
}

/// Run the roishapes CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), RoiError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Records(args)) => run_records(args),
        None => {
            println!("roishapes {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert ImageJ ROI files into OME shapes.");
            println!();
            println!("Run 'roishapes --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), RoiError> {
    let (shapes, report) = convert::read_from_file_with_report(&args.input)?;

    match args.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&shapes).map_err(RoiError::JsonWrite)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for shape in &shapes {
                println!("{}", shape);
            }
        }
    }

    if args.report {
        eprint!("{}", report);
    }

    Ok(())
}

/// Execute the records subcommand.
fn run_records(args: RecordsArgs) -> Result<(), RoiError> {
    let format = convert::RoiFormat::from_path(&args.input)?;
    let records = format.read(&args.input)?;
    println!("{}", record::io_json::to_records_json_string(&records)?);
    Ok(())
}

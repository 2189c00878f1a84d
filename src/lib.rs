//! voc2yolo: convert Pascal VOC XML annotations into YOLO label files.
//!
//! Each VOC file describes one image with pixel-space corner boxes. Each
//! YOLO label file gets one line per object with the class id and a
//! center/size box normalized to the image dimensions.
//!
//! # Modules
//!
//! - [`ir`]: annotation records, class mapping, VOC reader and YOLO writer
//! - [`conversion`]: the box transform and the batch driver
//! - [`error`]: error types for voc2yolo operations

pub mod conversion;
pub mod error;
pub mod ir;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use conversion::{convert_dir, convert_image, ConversionReport, ConvertOptions};
pub use error::Voc2YoloError;

use ir::class_map::read_class_map;
use ir::{ClassMapFormat, ClassMapping};

/// The voc2yolo CLI application.
#[derive(Parser)]
#[command(name = "voc2yolo")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert VOC XML annotations into YOLO label files.
    Convert(ConvertArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// A VOC XML file, a directory of XML files, or a VOC root with Annotations/.
    input: PathBuf,

    /// Directory to write the .txt label files into (created if missing).
    output: PathBuf,

    /// Class mapping entry, repeatable (e.g. --class car=0 --class human=1).
    #[arg(
        short = 'c',
        long = "class",
        value_name = "NAME=ID",
        required_unless_present = "class_file"
    )]
    class_pairs: Vec<String>,

    /// Class mapping file: data.yaml-style YAML or classes.txt.
    #[arg(
        long = "classes",
        value_name = "FILE",
        env = "VOC2YOLO_CLASSES",
        conflicts_with = "class_pairs"
    )]
    class_file: Option<PathBuf>,

    /// Class mapping file format ('auto', 'yaml', or 'txt').
    #[arg(long, default_value = "auto")]
    class_format: String,

    /// Stop at the first file that cannot be converted.
    #[arg(long)]
    fail_fast: bool,

    /// Also write data.yaml with the class names into the output directory.
    #[arg(long)]
    write_data_yaml: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Run the voc2yolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Voc2YoloError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            println!("voc2yolo {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert Pascal VOC XML annotations into YOLO label files.");
            println!();
            println!("Run 'voc2yolo --help' for usage information.");
            Ok(())
        }
    }
}

#[derive(Clone, Copy)]
enum ReportFormat {
    Text,
    Json,
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), Voc2YoloError> {
    let report_format = match args.report.as_str() {
        "text" => ReportFormat::Text,
        "json" => ReportFormat::Json,
        other => {
            return Err(Voc2YoloError::UnsupportedFormat(format!(
                "report '{}' (supported: text, json)",
                other
            )));
        }
    };

    let mapping = load_mapping(&args)?;
    if mapping.is_empty() {
        log::warn!("class mapping is empty; every object will be skipped");
    }

    let options = ConvertOptions {
        fail_fast: args.fail_fast,
        write_data_yaml: args.write_data_yaml,
    };

    match convert_dir(&args.input, &args.output, &mapping, &options) {
        Ok(report) => print_report(&report, report_format),
        Err(Voc2YoloError::ConversionFailed { failed, report }) => {
            print_report(&report, report_format)?;
            Err(Voc2YoloError::ConversionFailed { failed, report })
        }
        Err(err) => Err(err),
    }
}

fn load_mapping(args: &ConvertArgs) -> Result<ClassMapping, Voc2YoloError> {
    match &args.class_file {
        Some(path) => {
            let format: ClassMapFormat = args.class_format.parse()?;
            let mapping = read_class_map(path, format)?;
            log::info!(
                "loaded {} class mapping(s) from {}",
                mapping.len(),
                path.display()
            );
            Ok(mapping)
        }
        None => ClassMapping::from_cli_pairs(&args.class_pairs),
    }
}

fn print_report(report: &ConversionReport, format: ReportFormat) -> Result<(), Voc2YoloError> {
    match format {
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(report).map_err(Voc2YoloError::ReportSerialize)?;
            println!("{}", json);
        }
        ReportFormat::Text => print!("{}", report),
    }
    Ok(())
}

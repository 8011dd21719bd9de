//! pdfoutline CLI - PDF title and heading extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{collect_inputs, process_files};
use pdfoutline::render::{spans_to_json, to_json};
use pdfoutline::{
    BatchOptions, JsonFormat, LopdfSource, OutlineAnalyzer, OutlineOptions, SpanSource,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract the title and H1-H4 outline of PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR", env = "PDFOUTLINE_INPUT")]
        input: PathBuf,

        /// Output directory (created if missing)
        #[arg(value_name = "OUTPUT_DIR", env = "PDFOUTLINE_OUTPUT")]
        output: PathBuf,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        /// Also process *.json span dumps
        #[arg(long)]
        json_dumps: bool,

        /// Keep existing output files
        #[arg(long)]
        no_overwrite: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Dump the raw text spans of a PDF as JSON
    Spans {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Options shared by the outline commands.
#[derive(clap::Args)]
struct Tuning {
    /// Use looser heading length and letter-ratio bounds
    #[arg(long)]
    lenient: bool,

    /// JSON file overriding analysis options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Tuning {
    fn analyzer(&self) -> Result<OutlineAnalyzer, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => OutlineOptions::from_json(&fs::read_to_string(path)?)?,
            None => OutlineOptions::default(),
        };
        if self.lenient {
            options = options.lenient();
        }
        Ok(OutlineAnalyzer::new(options))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            compact,
            tuning,
        } => cmd_extract(&input, output.as_deref(), compact, &tuning),
        Commands::Batch {
            input,
            output,
            sequential,
            json_dumps,
            no_overwrite,
            compact,
            tuning,
        } => {
            let mut options = BatchOptions::new()
                .with_json_dumps(json_dumps)
                .with_overwrite(!no_overwrite)
                .with_format(json_format(compact));
            if sequential {
                options = options.sequential();
            }
            cmd_batch(&input, &output, &options, &tuning)
        }
        Commands::Spans { input, output } => cmd_spans(&input, output.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = tuning.analyzer()?;
    let doc = LopdfSource::open(input)?.document()?;
    log::debug!("{}: {} pages, {} spans", input.display(), doc.page_count(), doc.span_count());
    let outline = analyzer.analyze(&doc);
    let json = to_json(&outline, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} headings)",
            "Saved to".green(),
            path.display(),
            outline.len()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = tuning.analyzer()?;
    let inputs = collect_inputs(input, options.include_json_dumps)?;

    if inputs.is_empty() {
        println!("{} {}", "No input files in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = process_files(&inputs, output, &analyzer, options, |path| {
        pb.set_message(path.file_name().unwrap_or_default().to_string_lossy().to_string());
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");

    println!();
    println!("{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Written".bold(), report.written.len().to_string().green());
    if !report.skipped.is_empty() {
        println!("{}: {}", "Skipped".bold(), report.skipped.len().to_string().yellow());
    }
    println!("{}: {}", "Failed".bold(), report.failures.len().to_string().red());

    for failure in &report.failures {
        println!("  {} {}: {}", "✗".red(), failure.path.display(), failure.error);
    }

    Ok(())
}

fn cmd_spans(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let pages = LopdfSource::open(input)?.raw_pages()?;
    let json = spans_to_json(&pages, JsonFormat::Pretty)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading extraction tool");
}

//! `taxinvoice` entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use taxinvoice_cli::{compute, load_config, render, OutputTarget};
use taxinvoice_render::PdfRenderer;

/// GST tax invoice generator.
#[derive(Parser, Debug)]
#[command(name = "taxinvoice", version, about)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute an invoice and write it as a PDF.
    Render(RenderArgs),
    /// Compute an invoice and print lines and totals as JSON.
    Compute(ComputeArgs),
}

#[derive(Args, Debug)]
struct ComputeArgs {
    /// Invoice payload (JSON).
    #[arg(long)]
    input: PathBuf,

    /// Configuration file; defaults to ./taxinvoice.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: ComputeArgs,

    /// Output file.
    #[arg(long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Output directory; the file is named after the invoice number.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        taxinvoice_observability::init_with_default("debug");
    } else {
        taxinvoice_observability::init();
    }

    match cli.command {
        Commands::Compute(args) => {
            let config = load_config(args.config.as_deref())?;
            let computed = compute(&args.input, &config)?;
            let json =
                serde_json::to_string_pretty(&computed).context("failed to serialize result")?;
            println!("{json}");
        }
        Commands::Render(args) => {
            let config = load_config(args.common.config.as_deref())?;
            let target = match (args.output, args.output_dir) {
                (Some(file), _) => OutputTarget::File(file),
                (None, Some(dir)) => OutputTarget::Dir(dir),
                (None, None) => OutputTarget::Dir(PathBuf::from(".")),
            };
            let path = render(&args.common.input, &target, &config, &PdfRenderer::new())?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

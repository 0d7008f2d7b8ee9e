use clap::Parser;
use poincare::figure::FigureKind;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{error, info};

/// Renders every reference figure into a directory.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory to write the figures into. Created when missing.
    output: PathBuf,

    /// File extension of the figures: svg, png, bmp or jpg.
    #[arg(short, long, default_value = "svg")]
    format: String,
}

fn main() {
    // Register an event subscriber that prints events to STDERR.
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let args = Args::parse();

    if let Err(e) = std::fs::create_dir_all(&args.output) {
        error!(err = e.to_string(), "failed to create {}", args.output.display());
        std::process::exit(1);
    }

    let failures = FigureKind::ALL
        .par_iter()
        .filter(|kind| {
            let path = args
                .output
                .join(kind.name())
                .with_extension(&args.format);

            match kind.default_figure().render(Some(&path)) {
                Ok(()) => false,
                Err(e) => {
                    error!(err = e.to_string(), "failed to draw {kind}");
                    true
                }
            }
        })
        .count();

    if failures > 0 {
        std::process::exit(1);
    }

    info!("wrote {} figures to {}", FigureKind::ALL.len(), args.output.display());
}

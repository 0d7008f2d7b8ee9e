use clap::Parser;
use poincare::figure::FigureKind;
use std::path::PathBuf;
use tracing::error;

/// Draws the Stokes axes of the Poincaré sphere.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output file ending in svg, png, bmp or jpg. SVG goes to STDOUT when omitted.
    output: Option<PathBuf>,

    /// JSON file overriding the reference figure parameters.
    #[arg(short, long)]
    params: Option<PathBuf>,
}

fn main() {
    // Register an event subscriber that prints events to STDERR.
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let args = Args::parse();

    let result = FigureKind::Spherical
        .load(args.params.as_deref())
        .and_then(|figure| figure.render(args.output.as_deref()));

    if let Err(e) = result {
        error!(err = e.to_string(), "failed to draw {}", FigureKind::Spherical);
        std::process::exit(1);
    }
}

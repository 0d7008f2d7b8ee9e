use clap::Parser;
use poincare::figure::FigureKind;

/// Prints the reference parameters of a figure as JSON.
///
/// The output is a starting point for the `--params` file of the figure
/// binaries.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// One of ellipse, cases, sphere, sphere_circular or spherical.
    #[arg(default_value = "ellipse")]
    figure: FigureKind,
}

fn main() {
    let args = Args::parse();
    let figure = args.figure.default_figure();

    // Print the parameter block without the enum tag so it can be fed back
    // through --params.
    let mut json = serde_json::to_value(&figure).unwrap();
    if let Some(object) = json.as_object_mut() {
        object.remove("figure");
    }

    println!("{}", serde_json::to_string_pretty(&json).unwrap());
}

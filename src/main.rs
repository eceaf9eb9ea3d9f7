use clap::Parser;

use crate::cli::Cli;
use hybrid_image::run;

mod cli;

fn main() {
    let cli = Cli::parse();

    let result = cli.into_args().and_then(run);

    if let Err(error) = result {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

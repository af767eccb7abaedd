mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use newick_relabel::RelabelOptions;
use newick_relabel::{logging, pipeline};
use std::io;

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init() {
        eprintln!("Error: Failed to set up logging: {e}");
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let stdout = io::stdout();

    pipeline::run(
        &args.trees,
        &args.mapping,
        &mut stdout.lock(),
        &mut io::stderr(),
        &RelabelOptions::default(),
    )
    .with_context(|| {
        format!(
            "relabeling {} with {}",
            args.trees.display(),
            args.mapping.display()
        )
    })?;

    Ok(())
}

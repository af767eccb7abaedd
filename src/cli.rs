//! Command line arguments.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

/// Relabel the vertices of Newick trees from a `code,name` mapping file.
///
/// Relabeled trees are written to stdout; warnings and the list of
/// unused codes go to stderr. Set RUST_LOG (e.g. `RUST_LOG=debug`) for more detail.
#[derive(Parser, Debug)]
#[command(name = "newick-relabel")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Newick file with one or more trees
    #[arg(value_hint = ValueHint::FilePath)]
    pub trees: PathBuf,

    /// Mapping file with one `code,name` entry per line
    #[arg(value_hint = ValueHint::FilePath)]
    pub mapping: PathBuf,
}

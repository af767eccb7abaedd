//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick strings into
//! [Tree]s and the functions [to_newick] and [write_newick] to serialize
//! them again.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses all trees of a file
//! * [`parse_str`] - parses a single string
//!
//! # Format
//! The Newick format has the following grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= '(' vertex {',' vertex} ')' [label] [lengths] | [label] [lengths]`
//! * `lengths ::= ':' number [':' number]`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a number
//! * Comments are square brackets and can occur anywhere whitespace can;
//!   they are skipped and not written back
//! * Labels are unquoted or enclosed in single quotes, with `''` as escaped quote
//!
//! # Names and confidences
//! An unquoted numeric label behind `)` is a confidence (branch support),
//! e.g. the `95` in `(A,B)95:0.1`. Everything else is a name. The
//! double-colon form `label:confidence:branch_length` is understood as well.

mod defs;
pub mod parser;
pub mod writer;

pub use parser::{NewickIterator, NewickParser};
pub use writer::{to_newick, write_newick};

use crate::model::Tree;
use crate::parser::ByteParser;
use crate::parser::ParsingError;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees.
///
/// # Arguments
/// * `path` - Path to the file with a semicolon-separated list of Newick strings
///
/// # Errors
/// Returns a [ParsingError] if the file cannot be read or the Newick format is invalid.
///
/// # Example
/// ```no_run
/// use newick_relabel::newick::parse_file;
///
/// let trees = parse_file("bootstrap.nwk")?;
/// println!("Parsed {} trees", trees.len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let byte_parser = ByteParser::from_file(path)?;
    NewickParser::new().parse_all(byte_parser)
}

/// Parses a single Newick string using default settings.
///
/// # Example
/// ```
/// use newick_relabel::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}

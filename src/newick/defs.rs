//! Constants for Newick parsing and writing.

/// Newick label delimiters: parentheses, comma, colon, semicolon, brackets, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"(),:;[] \t\n\r";

/// Default guess for number of vertices, when unknown
pub(crate) const DEFAULT_NUM_VERTICES_GUESS: usize = 20;

/// Extra buffer in Newick string length/capacity estimate
pub(crate) const BUFFER_CHARS: usize = 10;

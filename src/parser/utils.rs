//! Utility functions for label escaping in Newick output.
//!
//! Mapped names are human-readable and routinely contain spaces or
//! punctuation, so they have to be quoted before they can be written back
//! into a Newick string.

/// Characters that force a label into single quotes.
fn needs_quotes(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '(' | ')' | ':' | '[' | ']' | '\'')
}

/// Checks if a label can be written as is, without quotes.
///
/// # Examples
/// ```
/// # use newick_relabel::parser::utils::is_plain;
/// assert!(is_plain("Pukeko"));
/// assert!(is_plain("Porphyrio_melanotus"));
/// assert!(!is_plain("Australasian Swamphen"));
/// assert!(!is_plain("Pu[ke]ko"));
/// assert!(!is_plain(""));
/// ```
pub fn is_plain(label: &str) -> bool {
    !label.is_empty() && !label.chars().any(needs_quotes)
}

/// Escapes a label for use in a Newick string.
///
/// Labels containing whitespace or Newick punctuation are wrapped in single
/// quotes, and internal single quotes are doubled. Underscores and spaces are
/// kept as they are, so a name is written exactly as given in the mapping.
///
/// # Examples
/// ```
/// # use newick_relabel::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Homo sapiens"), "'Homo sapiens'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_label("clade (A, B)"), "'clade (A, B)'");
/// assert_eq!(escape_label(""), "''");
/// ```
pub fn escape_label(label: &str) -> String {
    if is_plain(label) {
        label.to_string()
    } else {
        format!("'{}'", label.replace('\'', "''"))
    }
}

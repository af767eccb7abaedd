//! Low-level byte-by-byte parser for Newick text.
//!
//! This module provides [ByteParser] for parsing text-based tree files with
//! support for peeking, consuming, comment skipping, and quote-aware label
//! parsing. Used as the foundation of the Newick parser.

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming, and skipping.
///
/// [ByteParser] operates on a [ByteSource]. Structural characters are ASCII,
/// labels however are collected as raw bytes and decoded as strict UTF-8, so
/// non-ASCII sample names survive a round trip and invalid bytes are an error.
///
/// # Features
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes with `''` escaping)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use newick_relabel::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [a comment] 'Homo sapiens':0.1");
/// let label = parser.parse_label(b"(),:;[] \t\r\n").unwrap();
/// assert_eq!(label.text, "Homo sapiens");
/// assert!(label.quoted);
/// assert_eq!(parser.peek(), Some(b':'));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a string by copying it.
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }

    /// Creates a new `ByteParser` by reading the whole file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space, tab, newline, and carriage return.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a comment `[...]` if present.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    ///
    /// # Errors
    /// Returns an error if a comment starts with `[` but doesn't have a closing `]`.
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.consume_if(b'[') {
            if !self.consume_until(b']') {
                return Err(ParsingError::unclosed_comment(self));
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Checks if the current byte matches the target byte.
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it matches the target byte.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes bytes up to and including the target byte.
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8) -> bool {
        while let Some(b) = self.next_byte() {
            if b == target {
                return true;
            }
        }
        false
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(&self.source.get_context(k)).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set.
    ///
    /// Leading whitespace and comments are skipped first. An empty
    /// [Label] is returned if a delimiter comes right away.
    ///
    /// # Arguments
    /// * `delimiters` - Byte array of characters that end an unquoted label
    ///
    /// # Errors
    /// Returns an error if a quoted label is not closed or a comment is unclosed
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<Label, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek() == Some(b'\'') {
            Ok(Label {
                text: self.parse_quoted_label()?,
                quoted: true,
            })
        } else {
            Ok(Label {
                text: self.parse_unquoted_label(delimiters)?,
                quoted: false,
            })
        }
    }

    /// Parses a quoted label enclosed in single quotes with escape support.
    ///
    /// Assumes the opening quote has not been consumed yet. Single quotes within
    /// the label are escaped by doubling them (e.g., `'Wilson''s'` becomes `Wilson's`).
    ///
    /// # Errors
    /// Returns an error if the quoted label is not closed before EOF
    /// or is not valid UTF-8
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // consume opening '

        let mut bytes = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    if self.peek() == Some(b'\'') {
                        bytes.push(b'\'');
                        self.next_byte();
                    } else {
                        break;
                    }
                }
                Some(b) => bytes.push(b),
                None => return Err(ParsingError::unclosed_quote(self)),
            }
        }

        self.decode_label(bytes)
    }

    /// Parses an unquoted label until any of the given delimiters or EOF.
    ///
    /// # Errors
    /// Returns an error if the label is not valid UTF-8
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        let mut bytes = Vec::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            bytes.push(b);
            self.next_byte();
        }

        self.decode_label(bytes)
    }

    fn decode_label(&self, bytes: Vec<u8>) -> Result<String, ParsingError> {
        String::from_utf8(bytes).map_err(|e| ParsingError::invalid_encoding(self, e.utf8_error()))
    }
}

// =#========================================================================#=
// LABEL
// =#========================================================================#=
/// A label as read from the input, remembering whether it was quoted.
///
/// Quoting matters for internal vertices: `'95'` is a name, `95` a confidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Label text without enclosing quotes and with `''` unescaped
    pub text: String,
    /// Whether the label was written in single quotes
    pub quoted: bool,
}

impl Label {
    /// Returns `true` if the label has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

//! Error types for Newick parsing.
//!
//! This module provides [ParsingError] and [ParsingErrorKind] for representing
//! and reporting errors that occur while parsing tree files.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::str::Utf8Error;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR KIND
// =#========================================================================#=
/// Error kinds that can occur during Newick parsing.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorKind {
    #[error("IO error - {0}")]
    Io(String),
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Unclosed comment")]
    UnclosedComment,
    #[error("Unclosed quoted label")]
    UnclosedQuote,
    #[error("Invalid newick string: {0}")]
    InvalidNewickString(String),
    #[error("Invalid branch length or confidence value: {0:?}")]
    InvalidNumber(String),
    #[error("Label is not valid UTF-8 - {0}")]
    InvalidEncoding(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and upcoming bytes).
#[derive(Error, Debug)]
#[error("{kind} at position {position}{}", render_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorKind,
    position: usize,
    context: String,
}

fn render_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error kind and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorKind, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnexpectedEof
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorKind::UnexpectedEof, parser)
    }

    /// Convenience constructor for UnclosedComment
    pub fn unclosed_comment<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorKind::UnclosedComment, parser)
    }

    /// Convenience constructor for UnclosedQuote
    pub fn unclosed_quote<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorKind::UnclosedQuote, parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorKind::InvalidNewickString(msg), parser)
    }

    /// Convenience constructor for InvalidNumber
    pub fn invalid_number<S: ByteSource>(parser: &ByteParser<S>, text: String) -> Self {
        Self::from_parser(ParsingErrorKind::InvalidNumber(text), parser)
    }

    /// Convenience constructor for InvalidEncoding
    pub fn invalid_encoding<S: ByteSource>(parser: &ByteParser<S>, err: Utf8Error) -> Self {
        Self::from_parser(ParsingErrorKind::InvalidEncoding(err.to_string()), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorKind {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorKind::Io(err.to_string()),
            position: 0,
            context: String::new(),
        }
    }
}

//! Byte source abstractions for parsing.
//!
//! This module provides the [ByteSource] trait and the in-memory
//! implementation [InMemoryByteSource] used to parse tree files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================#=
/// Trait defining the interface for byte sources used by
/// [ByteParser](crate::parser::ByteParser).
///
/// By using this trait, the same parser logic can work with sources
/// loaded entirely into memory as well as with other backends.
pub trait ByteSource {
    /// Peek at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn peek(&self) -> Option<u8>;

    /// Get the current byte and advance the position (consume it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    fn next_byte(&mut self) -> Option<u8>;

    /// Returns the current position in the byte stream.
    fn position(&self) -> usize;

    /// Returns up to `k` bytes from the current position for error context.
    fn get_context(&self, k: usize) -> Vec<u8>;

    /// Check if at end of data.
    fn is_eof(&self) -> bool;
}

// =#========================================================================#=
// IN MEMORY BYTE SOURCE
// =#========================================================================#=
/// An in-memory byte source that owns its data.
///
/// Tree files are read completely before parsing starts, so that an
/// I/O failure never leaves a half-parsed run behind.
pub struct InMemoryByteSource {
    /// The owned byte data being parsed
    input: Vec<u8>,
    /// Current position in the byte slice
    pos: usize,
}

impl InMemoryByteSource {
    /// Creates a new in-memory byte source from a Vec of bytes.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            input: bytes,
            pos: 0,
        }
    }

    /// Reads the whole file at `path` into memory.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut file = File::open(path)?;
        Self::from_reader(&mut file)
    }

    /// Reads everything from `reader` into memory.
    pub fn from_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents)?;
        Ok(Self::from_vec(contents))
    }
}

impl ByteSource for InMemoryByteSource {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn get_context(&self, k: usize) -> Vec<u8> {
        let end = (self.pos + k).min(self.input.len());
        self.input[self.pos..end].to_vec()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse files or single strings, as well as lazy parsing via a
//! [NewickIterator].

use crate::model::{BranchLength, Tree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_VERTICES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::{ByteParser, Label};
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use tracing::{debug, warn};

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for single/multiple Newick format phylogenetic trees.
///
/// # Configuration
/// * [`with_confidence_labels(bool)`](Self::with_confidence_labels)
///     - Whether unquoted numeric labels on internal vertices are read as
///       confidence values (default) or kept as names.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees eagerly
/// * [`into_iter`](Self::into_iter) - Parse trees lazily
///
/// # Example
/// ```
/// use newick_relabel::newick::NewickParser;
/// use newick_relabel::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A:1.0,B:1.0)95:0.5,C:1.5)Root;");
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.root().name(), Some("Root"));
/// let inner = tree.vertex(tree.root().children()[0]);
/// assert_eq!(inner.confidence(), Some(95.0));
/// assert_eq!(inner.name(), None);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    confidence_labels: bool,
    num_vertices: usize,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings:
    /// - Unquoted numeric labels on internal vertices are confidences
    pub fn new() -> Self {
        Self {
            confidence_labels: true,
            num_vertices: DEFAULT_NUM_VERTICES_GUESS,
        }
    }

    /// Configures whether unquoted numeric labels on internal vertices
    /// are parsed as confidence values.
    ///
    /// Leaf labels are always names.
    pub fn with_confidence_labels(mut self, confidence_labels: bool) -> Self {
        self.confidence_labels = confidence_labels;
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Consumes the parser and returns an iterator over trees from the byte source.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser with underlying source containing only
    ///   Newick strings, except for whitespace and `[...]` comments.
    pub fn into_iter<B: ByteSource>(self, byte_parser: ByteParser<B>) -> NewickIterator<B> {
        NewickIterator {
            byte_parser,
            parser: self,
            done: false,
        }
    }

    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees
    /// * `Err(ParsingError)` - If any tree fails to parse
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_str(&mut byte_parser)?);
        }
        debug!(num_trees = trees.len(), "parsed all trees");
        Ok(trees)
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// The terminating `;` is consumed. A tree that runs into EOF without
    /// `;` is accepted with a warning.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the Newick string is malformed.
    pub fn parse_str<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Tree, ParsingError> {
        let mut tree = Tree::with_capacity(self.num_vertices);

        let root_index = self.parse_vertices(parser, &mut tree)?;
        tree.set_root(root_index);

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            if parser.is_eof() {
                warn!(position = parser.position(), "last tree is missing its terminating ';'");
            } else {
                let next_char = parser.peek().map(char::from);
                return Err(ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected ';' at end of tree but found {:?}", next_char),
                ));
            }
        }

        // Size of the next tree is most likely similar
        self.num_vertices = tree.num_vertices();

        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses the vertices of one tree, adds them to the tree and returns
    /// the index of the root:
    /// - `(children)[label][:number[:number]]` or `[label][:number[:number]]`
    /// - Any number of children (at least one) is accepted
    /// - Nesting is tracked on an explicit stack of open child lists
    fn parse_vertices<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        // One entry per '(' not closed yet, holding the children parsed so far
        let mut open: Vec<Vec<VertexIndex>> = Vec::new();

        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                open.push(Vec::new());
                continue;
            }

            let mut index = self.parse_vertex_tail(parser, tree, None)?;

            // Close as many vertices as possible, until the next sibling starts
            loop {
                match open.last_mut() {
                    Some(children) => children.push(index),
                    None => return Ok(index),
                }

                parser.skip_comment_and_whitespace()?;
                if parser.consume_if(b',') {
                    break;
                } else if parser.consume_if(b')') {
                    let children = open.pop().unwrap_or_default();
                    index = self.parse_vertex_tail(parser, tree, Some(children))?;
                } else if parser.is_eof() {
                    return Err(ParsingError::unexpected_eof(parser));
                } else {
                    let next_char = parser.peek().map(char::from);
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after child but found {:?}", next_char),
                    ));
                }
            }
        }
    }

    /// Parses label and colon values behind a vertex, adds the vertex to
    /// the tree and returns its index.
    ///
    /// # Arguments
    /// * `children` - `Some` for an internal vertex whose `)` was just consumed,
    ///   `None` for a leaf
    fn parse_vertex_tail<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut Tree,
        children: Option<Vec<VertexIndex>>,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let (colon_confidence, branch_length) = self.parse_colon_values(parser)?;

        let is_internal = children.is_some();
        let index = match children {
            Some(children) => tree.add_internal(children, branch_length),
            None => tree.add_leaf(branch_length),
        };

        let vertex = tree.vertex_mut(index);
        if let Some(confidence) = colon_confidence {
            vertex.set_confidence(confidence);
            if !label.is_empty() {
                vertex.set_name(label.text);
            }
        } else if let Some(confidence) = self.label_as_confidence(&label, is_internal) {
            vertex.set_confidence(confidence);
        } else if !label.is_empty() {
            vertex.set_name(label.text);
        }

        Ok(index)
    }

    /// Interprets a label as confidence value if configured to and
    /// it is an unquoted finite number on an internal vertex.
    fn label_as_confidence(&self, label: &Label, is_internal: bool) -> Option<f64> {
        if !self.confidence_labels || !is_internal || label.quoted || label.is_empty() {
            return None;
        }
        label.text.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    /// Parses the optional colon values behind a vertex:
    /// - `:b` is a branch length
    /// - `:c:b` is a confidence followed by a branch length
    ///
    /// # Returns
    /// `(confidence, branch_length)`, each `None` if absent
    fn parse_colon_values<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<(Option<f64>, Option<BranchLength>), ParsingError> {
        let Some(first) = self.parse_colon_value(parser)? else {
            return Ok((None, None));
        };
        let (confidence, length) = match self.parse_colon_value(parser)? {
            Some(second) => (Some(first), second),
            None => (None, first),
        };

        let branch_length = BranchLength::try_new(length)
            .ok_or_else(|| ParsingError::invalid_number(parser, length.to_string()))?;
        Ok((confidence, Some(branch_length)))
    }

    /// Parses optional `:number`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    fn parse_colon_value<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<f64>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut number_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
                number_str.push(b as char);
                parser.next_byte();
            } else {
                break;
            }
        }

        match number_str.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(ParsingError::invalid_number(parser, number_str)),
        }
    }
}

// =#========================================================================#=
// NEWICK ITERATOR (lazy parser)
// =#========================================================================#=
/// Iterator to parse Newick trees.
///
/// Created by [NewickParser::into_iter()].
/// Yields `Result<Tree, ParsingError>` for each tree and stops after the first error.
pub struct NewickIterator<B: ByteSource> {
    parser: NewickParser,
    byte_parser: ByteParser<B>,
    done: bool,
}

impl<B: ByteSource> NewickIterator<B> {
    /// Consumes the iterator and returns the underlying [NewickParser].
    pub fn into_parser(self) -> NewickParser {
        self.parser
    }
}

impl<B: ByteSource> Iterator for NewickIterator<B> {
    type Item = Result<Tree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Skip whitespace and check EOF before each tree
        if let Err(e) = self.byte_parser.skip_comment_and_whitespace() {
            self.done = true;
            return Some(Err(e));
        }
        if self.byte_parser.is_eof() {
            self.done = true;
            return None;
        }

        let result = self.parser.parse_str(&mut self.byte_parser);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

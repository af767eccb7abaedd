//! Top-level error of a relabeling run.

use crate::parser::ParsingError;
use crate::relabel::MappingError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a relabeling run. Nothing is written to the output
/// when one of these occurs before serialization.
#[derive(Error, Debug)]
pub enum RelabelError {
    #[error("Failed to load mapping")]
    Mapping(#[from] MappingError),

    #[error("Failed to parse trees from {}", path.display())]
    Parsing {
        path: PathBuf,
        #[source]
        source: ParsingError,
    },

    #[error("Failed to write diagnostics")]
    Diagnostics(#[source] io::Error),

    #[error("Failed to write relabeled trees")]
    Output(#[source] io::Error),
}

pub type RelabelResult<T> = Result<T, RelabelError>;

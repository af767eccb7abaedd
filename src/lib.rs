//! Newick-relabel replaces opaque sample codes in phylogenetic trees by
//! human-readable names.
//!
//! Tree inference tools emit Newick files whose leaves carry sample codes;
//! visualization tools want real names. This crate sits between them:
//! - Newick: Parse each tree of a file into an arena [Tree](model::Tree),
//!   keeping topology, branch lengths and support values.
//! - Mapping: Load a `code,name` table ([MappingTable](relabel::MappingTable)),
//!   rejecting entries that would chain relabelings.
//! - Relabel: Replace every name found in the table, and move support values
//!   into the name slot, where tree viewers such as TreeGraph read them.
//! - Diagnostics: Report codes used several times, once, or never.
//!
//! # Usage patterns
//! 1. Run the whole pipeline on two files with [`pipeline::run`], as the
//!    `newick-relabel` binary does.
//! 2. Combine the pieces yourself:
//!
//! ```
//! use newick_relabel::newick::{parse_str, to_newick};
//! use newick_relabel::relabel::{MappingTable, RelabelEngine, report};
//!
//! let table = MappingTable::load("s1,Homo sapiens\ns2,Pan paniscus\n".as_bytes())?;
//! let mut tree = parse_str("((s1:0.1,s2:0.2)0.95:0.05,s3:0.3);")?;
//!
//! let mut engine = RelabelEngine::new(&table);
//! engine.relabel_tree(&mut tree);
//! assert_eq!(
//!     to_newick(&tree),
//!     "(('Homo sapiens':0.1,'Pan paniscus':0.2)0.95:0.05,s3:0.3);"
//! );
//!
//! let mut unused = Vec::new();
//! report(engine.stats(), &mut unused)?;
//! assert_eq!(unused, b"s3,\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod logging;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pipeline;
pub mod relabel;

pub use error::{RelabelError, RelabelResult};
pub use pipeline::{RelabelOptions, RunSummary};

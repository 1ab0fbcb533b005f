//! Deterministic building blocks of the versewalk line-synthesis engine
//!
//! This crate holds everything that does not touch the network or the file
//! system:
//!
//! - **token**: corpus tokenization into words, kept punctuation and breaks
//! - **corpus**: the bidirectional adjacency model with weighted sampling
//! - **scheme**: rhyme-scheme parsing into rhyme groups and stanzas
//! - **length**: per-line length targets
//! - **walk**: lazy backward Markov walks from a line's ending word
//! - **render**: cosmetic joining and capitalization of walked tokens
//!
//! Every sampling function takes the random generator as an argument, so a
//! seeded generator reproduces the same output.
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use versewalk_core::{walk_line, BoundaryPolicy, CorpusModel};
//!
//! let model = CorpusModel::load("the night is dark and the night is long").unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let line = walk_line(&model, "long", 5, BoundaryPolicy::Stop, &mut rng).unwrap();
//! assert!(line.len() <= 5);
//! assert_eq!(model.text(*line.last().unwrap()), "long");
//! ```

#![warn(missing_docs)]

pub mod corpus;
pub mod error;
pub mod length;
pub mod render;
pub mod scheme;
pub mod token;
pub mod walk;

// Re-export key types
pub use corpus::{CorpusModel, Link, TokenId, TokenKind, Transitions};
pub use error::{CoreError, Result};
pub use length::{LengthPolicy, DEFAULT_LINE_LENGTH};
pub use render::{render_line, trim_leading_punctuation};
pub use scheme::{GroupKey, PlanOptions, PlannedLine, RhymeGroup, SchemePlan};
pub use token::{tokenize, Lexeme, TokenizerConfig};
pub use walk::{walk_line, BackwardWalk, BoundaryPolicy};

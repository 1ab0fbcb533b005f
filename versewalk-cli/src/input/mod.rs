//! Input handling module

pub mod corpus_registry;
pub mod file_reader;
pub mod glob_resolver;

pub use corpus_registry::CorpusRegistry;
pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

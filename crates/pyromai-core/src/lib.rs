pub mod analyzer;
pub mod config;
pub mod discovery;
pub mod error;
pub mod layer;
pub mod metrics;
pub mod pipeline;
pub mod types;

pub use analyzer::{FsReader, LanguageAnalyzer, ParsedFile, SourceReader};
pub use config::Config;
pub use error::{IndexError, SkipReason};
pub use layer::{detect_architecture, LayerClassifier};
pub use pipeline::{FileOutcome, IndexReport, ProjectIndexer, SkippedFile};
pub use types::*;

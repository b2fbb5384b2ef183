use std::path::{Path, PathBuf};

use anyhow::Result;
use tree_sitter::Tree;

use crate::types::FileUnits;

/// A parsed source file with its tree-sitter AST and original content.
pub struct ParsedFile {
    pub path: PathBuf,
    pub tree: Tree,
    pub content: String,
}

/// Trait that each language analyzer must implement.
pub trait LanguageAnalyzer: Send + Sync {
    /// Language name (e.g., "python")
    fn language(&self) -> &'static str;

    /// File extensions this analyzer handles (e.g., &["py"])
    fn file_extensions(&self) -> &[&str];

    /// Parse a source file into a ParsedFile.
    ///
    /// Returns an error when the source is not syntactically valid.
    fn parse_file(&self, path: &Path, content: &str) -> Result<ParsedFile>;

    /// Extract functions, classes, imports and the entry-point guard flag
    /// from a parsed file.
    fn extract_units(&self, parsed: &ParsedFile) -> FileUnits;
}

/// Source of raw file bytes for the indexer.
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Reads files straight from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

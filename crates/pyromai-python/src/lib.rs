use std::path::Path;

use anyhow::{bail, Context, Result};
use tree_sitter::{Language, Node, Parser};

use pyromai_core::analyzer::{LanguageAnalyzer, ParsedFile};
use pyromai_core::types::FileUnits;

mod complexity;
mod construct;
mod units;
mod validate;

pub use complexity::{score, Complexity};

/// Python language analyzer using tree-sitter.
pub struct PythonAnalyzer {
    language: Language,
}

impl PythonAnalyzer {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_python::LANGUAGE.into();

        // Fail at construction rather than on the first file.
        Parser::new()
            .set_language(&language)
            .context("failed to load Python grammar")?;

        Ok(Self { language })
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    fn language(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &[&str] {
        &["py"]
    }

    fn parse_file(&self, path: &Path, content: &str) -> Result<ParsedFile> {
        if let Some(offset) = content.find('\0') {
            let line = content[..offset].matches('\n').count() + 1;
            bail!("source code cannot contain null bytes (line {line})");
        }

        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .context("failed to set Python language")?;
        let tree = parser
            .parse(content, None)
            .context("failed to parse Python file")?;

        if let Some(bad) = first_error(tree.root_node()) {
            let pos = bad.start_position();
            tracing::debug!(
                path = %path.display(),
                kind = bad.kind(),
                line = pos.row + 1,
                "tree contains error node"
            );
            bail!(
                "invalid syntax at line {}, column {}",
                pos.row + 1,
                pos.column
            );
        }

        if let Some(v) = validate::first_violation(tree.root_node()) {
            tracing::debug!(
                path = %path.display(),
                line = v.line,
                reason = v.message,
                "rejected construct"
            );
            bail!(
                "invalid syntax at line {}, column {}: {}",
                v.line,
                v.column,
                v.message
            );
        }

        Ok(ParsedFile {
            path: path.to_path_buf(),
            tree,
            content: content.to_string(),
        })
    }

    fn extract_units(&self, parsed: &ParsedFile) -> FileUnits {
        units::extract_units(parsed.tree.root_node(), &parsed.content)
    }
}

/// First `ERROR` or missing node in source order.
fn first_error(root: Node) -> Option<Node> {
    if !root.has_error() {
        return None;
    }
    let mut node = root;
    loop {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let next = node.children(&mut cursor).find(|c| c.has_error());
        match next {
            Some(child) => node = child,
            None => return Some(node),
        }
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analyzer::{FsReader, LanguageAnalyzer, SourceReader};
use crate::config::Config;
use crate::discovery::FileDiscovery;
use crate::error::{IndexError, SkipReason};
use crate::layer::detect_architecture;
use crate::metrics::{build_file_metrics, summarize_complexity};
use crate::types::{CodebaseIndex, FileMetrics};

/// A discovered file that could not be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Result of analyzing one file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Indexed(Box<FileMetrics>),
    Skipped(SkippedFile),
}

/// The index plus the files that were left out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexReport {
    pub index: CodebaseIndex,
    pub skipped: Vec<SkippedFile>,
}

/// Indexes every source file under a project root.
pub struct ProjectIndexer {
    root: PathBuf,
    analyzer: Box<dyn LanguageAnalyzer>,
    reader: Box<dyn SourceReader>,
    discovery: FileDiscovery,
}

impl ProjectIndexer {
    /// Create an indexer for `root`. Fails before touching any file if the
    /// root is not a directory.
    pub fn new(
        root: &Path,
        analyzer: Box<dyn LanguageAnalyzer>,
        config: &Config,
    ) -> Result<Self, IndexError> {
        if !root.is_dir() {
            return Err(IndexError::NotADirectory(root.to_path_buf()));
        }
        let root = root.canonicalize().map_err(|source| IndexError::Resolve {
            path: root.to_path_buf(),
            source,
        })?;
        let discovery =
            FileDiscovery::new(analyzer.file_extensions(), &config.project.exclude_patterns)?;

        Ok(Self {
            root,
            analyzer,
            reader: Box::new(FsReader),
            discovery,
        })
    }

    /// Replace the filesystem reader.
    pub fn with_reader(mut self, reader: Box<dyn SourceReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover candidate files under the root.
    pub fn discover(&self) -> Result<Vec<PathBuf>, IndexError> {
        self.discovery.discover(&self.root)
    }

    /// Discover and index the whole project. Fails without a partial index
    /// when discovery cannot read part of the tree.
    pub fn index(&self) -> Result<IndexReport, IndexError> {
        let files = self.discover()?;
        tracing::info!(
            root = %self.root.display(),
            language = self.analyzer.language(),
            files = files.len(),
            "indexing project"
        );
        Ok(self.index_files(files))
    }

    /// Index an explicit list of candidate files.
    pub fn index_files(&self, mut files: Vec<PathBuf>) -> IndexReport {
        files.sort();
        files.dedup();

        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|path| self.analyze_file(path))
            .collect();

        let mut file_metrics: BTreeMap<PathBuf, FileMetrics> = BTreeMap::new();
        let mut skipped = Vec::new();
        let mut total_lines = 0usize;
        let mut total_imports = 0usize;

        for outcome in outcomes {
            match outcome {
                FileOutcome::Indexed(metrics) => {
                    total_lines += metrics.length;
                    total_imports += metrics.import_count;
                    file_metrics.insert(metrics.path.clone(), *metrics);
                }
                FileOutcome::Skipped(skip) => skipped.push(skip),
            }
        }

        let architecture =
            detect_architecture(&self.root, file_metrics.keys().map(PathBuf::as_path));

        // Files without functions have a max of 0 and stay out of the project figures.
        let complexity = summarize_complexity(
            file_metrics
                .values()
                .map(|m| m.max_cyclomatic_complexity)
                .filter(|&max| max > 0),
        );

        tracing::info!(
            indexed = file_metrics.len(),
            skipped = skipped.len(),
            pattern = %architecture.pattern,
            "indexing finished"
        );

        let index = CodebaseIndex {
            root_path: self.root.clone(),
            total_files: files.len(),
            python_files: files,
            file_metrics,
            architecture,
            total_lines,
            total_imports,
            avg_file_complexity: complexity.avg,
            max_file_complexity: complexity.max,
        };

        IndexReport { index, skipped }
    }

    /// Read, parse and measure a single file.
    pub fn analyze_file(&self, path: &Path) -> FileOutcome {
        let skip = |reason: SkipReason| {
            tracing::debug!(path = %path.display(), %reason, "file skipped");
            FileOutcome::Skipped(SkippedFile {
                path: path.to_path_buf(),
                reason,
            })
        };

        let bytes = match self.reader.read(path) {
            Ok(b) => b,
            Err(e) => return skip(SkipReason::Unreadable(e.to_string())),
        };
        let content = match String::from_utf8(bytes) {
            Ok(c) => c,
            Err(e) => return skip(SkipReason::NotUtf8(e.utf8_error().to_string())),
        };
        let parsed = match self.analyzer.parse_file(path, &content) {
            Ok(p) => p,
            Err(e) => return skip(SkipReason::Syntax(format!("{e:#}"))),
        };

        let units = self.analyzer.extract_units(&parsed);
        tracing::debug!(
            path = %path.display(),
            functions = units.functions.len(),
            classes = units.classes.len(),
            "file indexed"
        );
        FileOutcome::Indexed(Box::new(build_file_metrics(path, &content, units)))
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Metrics for a single function or method definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetrics {
    pub name: String,
    /// 1-based line of the `def` (or `async`) keyword.
    pub line: usize,
    /// 0-based byte column of the definition.
    pub column: usize,
    pub length: usize,
    pub cyclomatic_complexity: u32,
    pub cognitive_complexity: u32,
    pub parameters_count: usize,
    pub is_async: bool,
}

/// Metrics for a single class definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub name: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub methods_count: usize,
    pub has_init: bool,
    /// Base classes by textual reference, in declaration order.
    pub parent_classes: Vec<String>,
}

/// A single import statement (or one name of a plain `import a, b`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportInfo {
    pub module: String,
    pub names: Vec<String>,
    pub line: usize,
    pub is_relative: bool,
}

/// Everything the unit extractor pulls out of one parsed file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUnits {
    pub functions: Vec<FunctionMetrics>,
    pub classes: Vec<ClassMetrics>,
    pub imports: Vec<ImportInfo>,
    pub has_entry_point_guard: bool,
}

/// Metrics for one successfully parsed source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub path: PathBuf,
    pub name: String,
    pub length: usize,
    pub import_count: usize,
    pub class_count: usize,
    pub function_count: usize,
    pub avg_cyclomatic_complexity: f64,
    pub max_cyclomatic_complexity: u32,
    pub imports: Vec<ImportInfo>,
    pub classes: Vec<ClassMetrics>,
    pub functions: Vec<FunctionMetrics>,
    pub has_main: bool,
    pub is_test: bool,
}

/// Architectural layer in hexagonal/clean architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchLayer {
    Domain,
    Application,
    Infrastructure,
    Presentation,
}

impl ArchLayer {
    pub const ALL: [ArchLayer; 4] = [
        ArchLayer::Domain,
        ArchLayer::Application,
        ArchLayer::Infrastructure,
        ArchLayer::Presentation,
    ];
}

impl fmt::Display for ArchLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchLayer::Domain => write!(f, "domain"),
            ArchLayer::Application => write!(f, "application"),
            ArchLayer::Infrastructure => write!(f, "infrastructure"),
            ArchLayer::Presentation => write!(f, "presentation"),
        }
    }
}

/// Architecture label inferred from directory naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitecturePattern {
    Hexagonal,
    Layered,
    Unknown,
}

impl fmt::Display for ArchitecturePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchitecturePattern::Hexagonal => write!(f, "hexagonal"),
            ArchitecturePattern::Layered => write!(f, "layered"),
            ArchitecturePattern::Unknown => write!(f, "unknown"),
        }
    }
}

/// Detected architecture pattern for a whole project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureDetection {
    pub pattern: ArchitecturePattern,
    /// 0.0 to 1.0
    pub confidence: f64,
    /// Layers in the order they were first seen.
    pub layers_detected: Vec<ArchLayer>,
    pub domain_files: usize,
    pub application_files: usize,
    pub infrastructure_files: usize,
    pub presentation_files: usize,
}

/// Complete index of a codebase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodebaseIndex {
    pub root_path: PathBuf,
    pub python_files: Vec<PathBuf>,
    pub file_metrics: BTreeMap<PathBuf, FileMetrics>,
    pub architecture: ArchitectureDetection,
    pub total_files: usize,
    pub total_lines: usize,
    pub total_imports: usize,
    pub avg_file_complexity: f64,
    pub max_file_complexity: u32,
}

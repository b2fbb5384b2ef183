use std::path::Path;

use crate::types::{FileMetrics, FileUnits};

/// Average and maximum over a set of complexity scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexitySummary {
    pub avg: f64,
    pub max: u32,
}

/// Summarize complexity scores. An empty input yields `0.0` / `0`.
pub fn summarize_complexity(scores: impl IntoIterator<Item = u32>) -> ComplexitySummary {
    let mut total = 0u64;
    let mut count = 0usize;
    let mut max = 0u32;

    for score in scores {
        total += u64::from(score);
        count += 1;
        max = max.max(score);
    }

    if count == 0 {
        return ComplexitySummary { avg: 0.0, max: 0 };
    }

    ComplexitySummary {
        avg: total as f64 / count as f64,
        max,
    }
}

/// Count newline-delimited segments, so `"a\n"` is two lines.
///
/// `\r\n` and lone `\r` are treated as a single line break.
pub fn count_lines(content: &str) -> usize {
    let mut lines = 1;
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => lines += 1,
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines += 1;
            }
            _ => {}
        }
    }
    lines
}

/// Test files are recognized by a loose substring match on the base name.
pub fn is_test_file(name: &str) -> bool {
    name.contains("_test") || name.contains("test_")
}

/// Build the per-file metrics record from extracted units.
pub fn build_file_metrics(path: &Path, content: &str, units: FileUnits) -> FileMetrics {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let complexity =
        summarize_complexity(units.functions.iter().map(|f| f.cyclomatic_complexity));

    FileMetrics {
        path: path.to_path_buf(),
        is_test: is_test_file(&name),
        name,
        length: count_lines(content),
        import_count: units.imports.len(),
        class_count: units.classes.len(),
        function_count: units.functions.len(),
        avg_cyclomatic_complexity: complexity.avg,
        max_cyclomatic_complexity: complexity.max,
        imports: units.imports,
        classes: units.classes,
        functions: units.functions,
        has_main: units.has_entry_point_guard,
    }
}

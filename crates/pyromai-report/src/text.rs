use colored::Colorize;

use pyromai_core::pipeline::SkippedFile;
use pyromai_core::types::{ArchitecturePattern, CodebaseIndex};

/// Format an index summary for terminal output.
///
/// With `show_files`, a per-file table follows the architecture section.
pub fn format_report(index: &CodebaseIndex, show_files: bool) -> String {
    let mut out = String::new();

    // Summary
    out.push_str(&format!(
        "\n{}\n",
        "Project Analysis Summary".cyan().bold()
    ));
    out.push_str(&format!("{}\n", "=".repeat(40)));
    out.push_str(&summary_row("Total Files", index.total_files.to_string()));
    out.push_str(&summary_row(
        "Total Lines",
        with_thousands(index.total_lines),
    ));
    out.push_str(&summary_row("Total Imports", index.total_imports.to_string()));
    out.push_str(&summary_row(
        "Average Complexity",
        format!("{:.2}", index.avg_file_complexity),
    ));
    out.push_str(&summary_row(
        "Max Complexity",
        index.max_file_complexity.to_string(),
    ));

    // Architecture
    let arch = &index.architecture;
    out.push_str(&format!(
        "\n{}\n{}\n",
        "Architecture Detection".blue().bold(),
        "-".repeat(40)
    ));

    let pattern = arch.pattern.to_string();
    let pattern = match arch.pattern {
        ArchitecturePattern::Hexagonal => pattern.green(),
        ArchitecturePattern::Layered => pattern.yellow(),
        ArchitecturePattern::Unknown => pattern.normal(),
    };
    out.push_str(&format!("  {}: {}\n", "Pattern".bold(), pattern));
    out.push_str(&format!(
        "  {}: {:.1}%\n",
        "Confidence".bold(),
        arch.confidence * 100.0
    ));

    let layers = if arch.layers_detected.is_empty() {
        "None detected".to_string()
    } else {
        arch.layers_detected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    out.push_str(&format!("  {}: {}\n", "Layers".bold(), layers));

    if show_files {
        out.push_str(&format_file_table(index));
    }

    out.push('\n');
    out
}

/// Footer listing files that were discovered but could not be indexed.
pub fn format_skipped(skipped: &[SkippedFile]) -> String {
    if skipped.is_empty() {
        return String::new();
    }

    let mut out = format!(
        "{} {} file(s) could not be parsed\n",
        "Skipped:".yellow().bold(),
        skipped.len()
    );
    for skip in skipped {
        out.push_str(&format!("  {} ({})\n", skip.path.display(), skip.reason));
    }
    out
}

fn summary_row(label: &str, value: String) -> String {
    format!("  {:<22}{:>12}\n", label, value.green())
}

fn format_file_table(index: &CodebaseIndex) -> String {
    let mut out = format!("\n{}\n{}\n", "Files".bold(), "-".repeat(40));
    out.push_str(&format!(
        "  {:<48} {:>6} {:>5} {:>7} {:>4}\n",
        "path", "lines", "funcs", "classes", "max"
    ));

    for (path, metrics) in &index.file_metrics {
        let rel = path
            .strip_prefix(&index.root_path)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let marker = if metrics.is_test {
            format!(" {}", "[test]".dimmed())
        } else {
            String::new()
        };

        out.push_str(&format!(
            "  {:<48} {:>6} {:>5} {:>7} {:>4}{}\n",
            rel,
            metrics.length,
            metrics.function_count,
            metrics.class_count,
            metrics.max_cyclomatic_complexity,
            marker
        ));
    }
    out
}

fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

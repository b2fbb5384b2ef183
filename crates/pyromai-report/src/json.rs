use pyromai_core::types::CodebaseIndex;

/// Format the full index as JSON.
pub fn format_report(index: &CodebaseIndex, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(index)
    } else {
        serde_json::to_string_pretty(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyromai_core::types::{
        ArchLayer, ArchitectureDetection, ArchitecturePattern, FileMetrics, FunctionMetrics,
    };
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sample_index() -> CodebaseIndex {
        let path = PathBuf::from("/p/domain/user.py");
        let metrics = FileMetrics {
            path: path.clone(),
            name: "user.py".to_string(),
            length: 3,
            import_count: 0,
            class_count: 0,
            function_count: 1,
            avg_cyclomatic_complexity: 1.0,
            max_cyclomatic_complexity: 1,
            imports: vec![],
            classes: vec![],
            functions: vec![FunctionMetrics {
                name: "load".to_string(),
                line: 1,
                column: 0,
                length: 2,
                cyclomatic_complexity: 1,
                cognitive_complexity: 0,
                parameters_count: 0,
                is_async: true,
            }],
            has_main: false,
            is_test: false,
        };

        CodebaseIndex {
            root_path: PathBuf::from("/p"),
            python_files: vec![path.clone()],
            file_metrics: BTreeMap::from([(path, metrics)]),
            architecture: ArchitectureDetection {
                pattern: ArchitecturePattern::Unknown,
                confidence: 0.0,
                layers_detected: vec![ArchLayer::Domain],
                domain_files: 1,
                application_files: 0,
                infrastructure_files: 0,
                presentation_files: 0,
            },
            total_files: 1,
            total_lines: 3,
            total_imports: 0,
            avg_file_complexity: 1.0,
            max_file_complexity: 1,
        }
    }

    #[test]
    fn test_json_report_pretty() {
        let json = format_report(&sample_index(), false).unwrap();
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_files"], 1);
        assert_eq!(value["architecture"]["pattern"], "unknown");
        assert_eq!(value["architecture"]["layers_detected"][0], "domain");
        assert_eq!(
            value["file_metrics"]["/p/domain/user.py"]["functions"][0]["is_async"],
            true
        );
    }

    #[test]
    fn test_json_report_compact() {
        let json = format_report(&sample_index(), true).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_json_report_round_trips() {
        let index = sample_index();
        let json = format_report(&index, true).unwrap();
        let back: CodebaseIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }
}

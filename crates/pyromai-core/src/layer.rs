use std::path::{Component, Path};

use crate::types::{ArchLayer, ArchitectureDetection, ArchitecturePattern};

const DOMAIN_SEGMENTS: &[&str] = &["domain", "entities", "models"];
const APPLICATION_SEGMENTS: &[&str] = &["application", "use_cases", "services", "app"];
const INFRASTRUCTURE_SEGMENTS: &[&str] = &["infrastructure", "adapters", "infra"];
const PRESENTATION_SEGMENTS: &[&str] = &["presentation", "api", "handlers"];

const HEXAGONAL_WITH_PRESENTATION: f64 = 0.9;
const HEXAGONAL_CONFIDENCE: f64 = 0.7;
const LAYERED_CONFIDENCE: f64 = 0.6;

/// Classifies path segments into architectural layers using a fixed
/// directory-name vocabulary. Matching is exact and case-sensitive.
pub struct LayerClassifier;

impl LayerClassifier {
    fn vocabulary(layer: ArchLayer) -> &'static [&'static str] {
        match layer {
            ArchLayer::Domain => DOMAIN_SEGMENTS,
            ArchLayer::Application => APPLICATION_SEGMENTS,
            ArchLayer::Infrastructure => INFRASTRUCTURE_SEGMENTS,
            ArchLayer::Presentation => PRESENTATION_SEGMENTS,
        }
    }

    /// Classify a single path segment.
    pub fn classify_segment(segment: &str) -> Option<ArchLayer> {
        ArchLayer::ALL
            .into_iter()
            .find(|layer| Self::vocabulary(*layer).contains(&segment))
    }

    /// All layers matched by any segment of a relative path, each at most once,
    /// in domain → presentation order.
    pub fn classify_path(relative: &Path) -> Vec<ArchLayer> {
        let segments: Vec<&str> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect();

        ArchLayer::ALL
            .into_iter()
            .filter(|layer| {
                let vocab = Self::vocabulary(*layer);
                segments.iter().any(|s| vocab.contains(s))
            })
            .collect()
    }
}

/// Infer the architecture pattern from the paths of indexed files.
///
/// Paths are made relative to `root` before their segments are inspected.
pub fn detect_architecture<'a, I>(root: &Path, paths: I) -> ArchitectureDetection
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut layers_detected: Vec<ArchLayer> = Vec::new();
    let mut counts = [0usize; 4];

    for path in paths {
        let relative = path.strip_prefix(root).unwrap_or(path);
        for layer in LayerClassifier::classify_path(relative) {
            counts[layer as usize] += 1;
            if !layers_detected.contains(&layer) {
                layers_detected.push(layer);
            }
        }
    }

    let [domain_files, application_files, infrastructure_files, presentation_files] = counts;

    let (pattern, confidence) =
        if domain_files > 0 && application_files > 0 && infrastructure_files > 0 {
            let confidence = if presentation_files > 0 {
                HEXAGONAL_WITH_PRESENTATION
            } else {
                HEXAGONAL_CONFIDENCE
            };
            (ArchitecturePattern::Hexagonal, confidence)
        } else if layers_detected.len() >= 2 {
            (ArchitecturePattern::Layered, LAYERED_CONFIDENCE)
        } else {
            (ArchitecturePattern::Unknown, 0.0)
        };

    ArchitectureDetection {
        pattern,
        confidence,
        layers_detected,
        domain_files,
        application_files,
        infrastructure_files,
        presentation_files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn detect(root: &str, files: &[&str]) -> ArchitectureDetection {
        let root = PathBuf::from(root);
        let paths: Vec<PathBuf> = files.iter().map(|f| root.join(f)).collect();
        detect_architecture(&root, paths.iter().map(|p| p.as_path()))
    }

    #[test]
    fn test_classify_segment_vocabulary() {
        assert_eq!(
            LayerClassifier::classify_segment("entities"),
            Some(ArchLayer::Domain)
        );
        assert_eq!(
            LayerClassifier::classify_segment("use_cases"),
            Some(ArchLayer::Application)
        );
        assert_eq!(
            LayerClassifier::classify_segment("infra"),
            Some(ArchLayer::Infrastructure)
        );
        assert_eq!(
            LayerClassifier::classify_segment("handlers"),
            Some(ArchLayer::Presentation)
        );
        assert_eq!(LayerClassifier::classify_segment("utils"), None);
    }

    #[test]
    fn test_classify_segment_is_case_sensitive() {
        assert_eq!(LayerClassifier::classify_segment("Domain"), None);
        assert_eq!(LayerClassifier::classify_segment("API"), None);
    }

    #[test]
    fn test_file_names_do_not_match() {
        assert!(LayerClassifier::classify_path(Path::new("pkg/domain.py")).is_empty());
    }

    #[test]
    fn test_path_can_match_several_layers() {
        let layers = LayerClassifier::classify_path(Path::new("api/models/user.py"));
        assert_eq!(layers, vec![ArchLayer::Domain, ArchLayer::Presentation]);
    }

    #[test]
    fn test_hexagonal_with_presentation() {
        let detection = detect(
            "/proj",
            &[
                "domain/user.py",
                "application/service.py",
                "infrastructure/db.py",
                "api/routes.py",
            ],
        );
        assert_eq!(detection.pattern, ArchitecturePattern::Hexagonal);
        assert!((detection.confidence - 0.9).abs() < 1e-9);
        assert_eq!(
            detection.layers_detected,
            vec![
                ArchLayer::Domain,
                ArchLayer::Application,
                ArchLayer::Infrastructure,
                ArchLayer::Presentation,
            ]
        );
    }

    #[test]
    fn test_hexagonal_without_presentation() {
        let detection = detect(
            "/proj",
            &["src/entities/a.py", "src/app/b.py", "src/adapters/c.py"],
        );
        assert_eq!(detection.pattern, ArchitecturePattern::Hexagonal);
        assert!((detection.confidence - 0.7).abs() < 1e-9);
        assert_eq!(detection.presentation_files, 0);
    }

    #[test]
    fn test_layered_two_layers() {
        let detection = detect("/proj", &["domain/a.py", "application/b.py"]);
        assert_eq!(detection.pattern, ArchitecturePattern::Layered);
        assert!((detection.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_layered_without_domain() {
        let detection = detect("/proj", &["infra/a.py", "api/b.py", "api/c.py"]);
        assert_eq!(detection.pattern, ArchitecturePattern::Layered);
        assert_eq!(detection.presentation_files, 2);
        assert_eq!(
            detection.layers_detected,
            vec![ArchLayer::Infrastructure, ArchLayer::Presentation]
        );
    }

    #[test]
    fn test_unknown_when_single_layer() {
        let detection = detect("/proj", &["models/a.py", "models/b.py"]);
        assert_eq!(detection.pattern, ArchitecturePattern::Unknown);
        assert_eq!(detection.confidence, 0.0);
        assert_eq!(detection.domain_files, 2);
        assert_eq!(detection.layers_detected, vec![ArchLayer::Domain]);
    }

    #[test]
    fn test_unknown_without_vocabulary() {
        let detection = detect("/proj", &["main.py", "lib/util.py"]);
        assert_eq!(detection.pattern, ArchitecturePattern::Unknown);
        assert_eq!(detection.confidence, 0.0);
        assert!(detection.layers_detected.is_empty());
    }

    #[test]
    fn test_root_segments_are_ignored() {
        // The root itself lives under a vocabulary directory.
        let detection = detect("/srv/app/project", &["main.py", "lib/util.py"]);
        assert_eq!(detection.application_files, 0);
        assert_eq!(detection.pattern, ArchitecturePattern::Unknown);
    }

    #[test]
    fn test_layer_order_follows_first_occurrence() {
        let detection = detect("/proj", &["api/a.py", "domain/b.py"]);
        assert_eq!(
            detection.layers_detected,
            vec![ArchLayer::Presentation, ArchLayer::Domain]
        );
    }
}

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::IndexError;

/// Tooling and cache directories that are never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[".venv", ".git", "__pycache__", ".tox", "node_modules"];

/// Finds candidate source files under a project root.
pub struct FileDiscovery {
    extensions: Vec<String>,
    exclude: GlobSet,
}

impl FileDiscovery {
    pub fn new(extensions: &[&str], exclude_patterns: &[String]) -> Result<Self, IndexError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|source| IndexError::ExcludePattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let exclude = builder.build().map_err(|source| IndexError::ExcludePattern {
            pattern: exclude_patterns.join(", "),
            source,
        })?;

        Ok(Self {
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            exclude,
        })
    }

    /// Walk `root` and return matching files, sorted and deduplicated.
    ///
    /// Any directory that cannot be read fails the whole walk.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, IndexError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded_name(&e.file_name().to_string_lossy()));

        for entry in walker {
            let entry = entry.map_err(|source| IndexError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                source,
            })?;
            let p = entry.path();
            let wanted = p.is_file()
                && p
                    .extension()
                    .is_some_and(|ext| self.extensions.iter().any(|x| ext == x.as_str()));
            if wanted && !self.is_excluded_by_pattern(root, p) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn is_excluded_by_pattern(&self, root: &Path, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let rel = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        self.exclude.is_match(rel.as_str())
    }
}

fn is_excluded_name(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(base: &Path, rel: &str) {
        let path = base.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "x = 1\n").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_discovers_python_files_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "pkg/b.py");
        touch(tmp.path(), "a.py");
        touch(tmp.path(), "pkg/a.py");
        touch(tmp.path(), "README.md");

        let discovery = FileDiscovery::new(&["py"], &[]).unwrap();
        let files = discovery.discover(tmp.path()).unwrap();

        assert_eq!(
            relative(tmp.path(), &files),
            vec!["a.py", "pkg/a.py", "pkg/b.py"]
        );
    }

    #[test]
    fn test_skips_tooling_directories() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "main.py");
        touch(tmp.path(), ".venv/lib/site.py");
        touch(tmp.path(), ".git/hooks/hook.py");
        touch(tmp.path(), "pkg/__pycache__/mod.py");
        touch(tmp.path(), ".tox/py311/x.py");
        touch(tmp.path(), "web/node_modules/tool.py");

        let discovery = FileDiscovery::new(&["py"], &[]).unwrap();
        let files = discovery.discover(tmp.path()).unwrap();

        assert_eq!(relative(tmp.path(), &files), vec!["main.py"]);
    }

    #[test]
    fn test_root_inside_excluded_name_still_walked() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("node_modules");
        touch(&root, "pkg/a.py");

        let discovery = FileDiscovery::new(&["py"], &[]).unwrap();
        assert_eq!(discovery.discover(&root).unwrap().len(), 1);
    }

    #[test]
    fn test_exclude_patterns_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "app/models.py");
        touch(tmp.path(), "app/migrations/0001_initial.py");
        touch(tmp.path(), "build/gen.py");

        let patterns = vec!["**/migrations/**".to_string(), "build/**".to_string()];
        let discovery = FileDiscovery::new(&["py"], &patterns).unwrap();
        let files = discovery.discover(tmp.path()).unwrap();

        assert_eq!(relative(tmp.path(), &files), vec!["app/models.py"]);
    }

    #[test]
    fn test_walk_failure_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("removed");

        let discovery = FileDiscovery::new(&["py"], &[]).unwrap();
        match discovery.discover(&gone) {
            Err(IndexError::Walk { path, .. }) => assert_eq!(path, gone),
            other => panic!("expected walk error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_exclude_pattern_is_rejected() {
        let result = FileDiscovery::new(&["py"], &["a[".to_string()]);
        assert!(matches!(result, Err(IndexError::ExcludePattern { .. })));
    }
}

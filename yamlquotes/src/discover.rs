//! Filesystem discovery for the bundled host.
//!
//! Expands the configured roots into a sorted list of YAML files:
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths must stay within the root they were found under
//! - Device files, pipes, and sockets are skipped
//! - Directory depth is bounded

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::DiscoverConfig;
use crate::error::DiscoverError;
use crate::loader::is_yaml_path;

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git", "vendor"];

fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() > 0
        && entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

fn is_special_file(entry: &walkdir::DirEntry) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if let Ok(ft) = entry.metadata().map(|m| m.file_type()) {
            return ft.is_block_device() || ft.is_char_device() || ft.is_fifo() || ft.is_socket();
        }
    }
    #[cfg(not(unix))]
    let _ = entry;
    false
}

/// Find all YAML files under the configured paths.
///
/// Files given directly are kept if they have a YAML suffix and are not
/// excluded. Directory walk failures are logged and skipped.
///
/// # Errors
///
/// Returns an error if a root path does not exist or an exclude pattern is
/// not a valid glob.
pub fn find_files(config: &DiscoverConfig) -> Result<Vec<PathBuf>, DiscoverError> {
    let exclude_patterns = config
        .exclude
        .iter()
        .map(|pat_str| {
            Pattern::new(pat_str).map_err(|source| DiscoverError::InvalidExcludePattern {
                pattern: pat_str.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();

    for root in &config.paths {
        if !root.exists() {
            return Err(DiscoverError::MissingPath(root.clone()));
        }

        if root.is_file() {
            if is_yaml_path(root) && !matches_exclude(root, &exclude_patterns) {
                files.push(root.clone());
            }
            continue;
        }

        let canonical_root = match root.canonicalize() {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "cannot resolve root, skipping");
                continue;
            }
        };

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    tracing::warn!(error = %walk_err, "directory traversal error");
                    continue;
                }
            };

            let file_path = entry.path();
            if !file_path.is_file() || is_special_file(&entry) {
                continue;
            }
            if !is_yaml_path(file_path) || matches_exclude(file_path, &exclude_patterns) {
                continue;
            }

            // Catches symlink escapes even when follow_links is true.
            match file_path.canonicalize() {
                Ok(canonical_path) if canonical_path.starts_with(&canonical_root) => {}
                Ok(canonical_path) => {
                    tracing::warn!(
                        file = %file_path.display(),
                        resolved = %canonical_path.display(),
                        "path resolves outside its root, skipping"
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(file = %file_path.display(), error = %e, "cannot resolve path, skipping");
                    continue;
                }
            }

            files.push(file_path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "discovered YAML files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(paths: Vec<PathBuf>) -> DiscoverConfig {
        let mut config = DiscoverConfig::default();
        config.paths = paths;
        config
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_find_yaml_files_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.yml"), "a: 1").unwrap();
        fs::write(tmp.path().join("a.yaml"), "a: 1").unwrap();
        fs::write(tmp.path().join("c.json"), "{}").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("d.yaml"), "a: 1").unwrap();

        let files = find_files(&config_for(vec![tmp.path().to_path_buf()])).unwrap();

        assert_eq!(names(&files), ["a.yaml", "b.yml", "d.yaml"]);
    }

    #[test]
    fn test_skip_dirs_are_not_descended() {
        let tmp = TempDir::new().unwrap();
        for dir in ["target", "node_modules", ".git"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
            fs::write(tmp.path().join(dir).join("x.yaml"), "a: b").unwrap();
        }
        fs::write(tmp.path().join("kept.yaml"), "a: b").unwrap();

        let files = find_files(&config_for(vec![tmp.path().to_path_buf()])).unwrap();

        assert_eq!(names(&files), ["kept.yaml"]);
    }

    #[test]
    fn test_exclude_by_file_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("keep.yaml"), "a: b").unwrap();
        fs::write(tmp.path().join("drop.yaml"), "a: b").unwrap();

        let mut config = config_for(vec![tmp.path().to_path_buf()]);
        config.exclude = vec!["drop.*".to_owned()];
        let files = find_files(&config).unwrap();

        assert_eq!(names(&files), ["keep.yaml"]);
    }

    #[test]
    fn test_direct_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("one.yml");
        fs::write(&file, "a: b").unwrap();
        let other = tmp.path().join("notes.txt");
        fs::write(&other, "text").unwrap();

        let files = find_files(&config_for(vec![file.clone(), other])).unwrap();

        assert_eq!(files, [file]);
    }

    #[test]
    fn test_missing_root_errors() {
        let tmp = TempDir::new().unwrap();
        let err = find_files(&config_for(vec![tmp.path().join("nope")])).unwrap_err();
        assert!(matches!(err, DiscoverError::MissingPath(_)), "got: {err:?}");
    }

    #[test]
    fn test_invalid_exclude_pattern_errors() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_for(vec![tmp.path().to_path_buf()]);
        config.exclude = vec!["[unclosed".to_owned()];
        let err = find_files(&config).unwrap_err();
        assert!(
            matches!(err, DiscoverError::InvalidExcludePattern { .. }),
            "got: {err:?}"
        );
    }
}

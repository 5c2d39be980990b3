use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use super::ResolveError;

pub const SOURCE_EXTENSION: &str = "go";
const TEST_FILE_PATTERN: &str = "_test[.]go";
const EXAMPLE_FILE_PATTERN: &str = "_example[.]go";

/// Check an exclude pattern up front. The scanner itself never fails on a
/// bad pattern, it just stops excluding.
pub fn validate_exclude_pattern(pattern: &str) -> Result<(), regex::Error> {
    if !pattern.is_empty() {
        Regex::new(pattern)?;
    }
    Ok(())
}

/// Lists the Go sources of one package directory
#[derive(Debug, Clone)]
pub struct FileScanner {
    exclude: Option<Regex>,
    skip_patterns: Vec<Regex>,
}

impl FileScanner {
    pub fn new(exclude_pattern: &str, include_tests: bool) -> Self {
        let exclude = if exclude_pattern.is_empty() {
            None
        } else {
            match Regex::new(exclude_pattern) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    warn!("Exclude pattern {exclude_pattern:?} is invalid and will match nothing: {err}");
                    None
                }
            }
        };

        let skip_patterns = if include_tests {
            Vec::new()
        } else {
            [TEST_FILE_PATTERN, EXAMPLE_FILE_PATTERN]
                .iter()
                .filter_map(|pattern| Regex::new(pattern).ok())
                .collect()
        };

        Self {
            exclude,
            skip_patterns,
        }
    }

    /// Direct-child `.go` files of `dir`, in directory listing order
    pub fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, ResolveError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Dangling links inside the package are skipped, an unreadable
                // package directory is not
                Err(err) if err.depth() > 0 => {
                    warn!("Skipping unreadable entry in {}: {err}", dir.display());
                    continue;
                }
                Err(source) => {
                    return Err(ResolveError::ListDir {
                        dir: dir.to_path_buf(),
                        source,
                    })
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
                continue;
            }
            if self.is_skipped(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    fn is_skipped(&self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        if self
            .skip_patterns
            .iter()
            .any(|pattern| pattern.is_match(&file_name))
        {
            return true;
        }

        self.exclude
            .as_ref()
            .is_some_and(|exclude| exclude.is_match(&path.to_string_lossy()))
    }
}

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

use super::LocateError;

/// Pseudo packages that never have a source directory (cgo's `C`)
pub const BUILTIN_PACKAGES: &[&str] = &["C"];

/// External mechanism that turns an import path into its source directory
pub trait SourceLookup {
    fn source_dir(&self, import_path: &str) -> Result<PathBuf>;
}

/// Lookup backed by the `go` tool
#[derive(Debug, Clone)]
pub struct GoList {
    go: PathBuf,
}

impl GoList {
    pub fn new() -> Self {
        Self {
            go: PathBuf::from("go"),
        }
    }

    /// Use a specific `go` binary instead of the one on `PATH`
    pub fn with_binary(mut self, go: impl Into<PathBuf>) -> Self {
        self.go = go.into();
        self
    }

    /// Translate a filesystem path (`./cmd`, `/abs/dir`) into its import
    /// path. Anything else, or a failed lookup, comes back unchanged.
    pub fn package_from_path(&self, path: &str) -> String {
        if !(path.starts_with('/') || path.starts_with('.')) {
            return path.to_string();
        }
        match self.run(&["list", path]) {
            Ok(import_path) => import_path,
            Err(err) => {
                debug!("keeping {path} as given: {err:#}");
                path.to_string()
            }
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.go)
            .args(args)
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("failed to run {}", self.go.display()))?;

        if !output.status.success() {
            bail!("{} {} exited with {}", self.go.display(), args.join(" "), output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            bail!("{} {} produced no output", self.go.display(), args.join(" "));
        }
        Ok(stdout)
    }
}

impl Default for GoList {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceLookup for GoList {
    fn source_dir(&self, import_path: &str) -> Result<PathBuf> {
        self.run(&["list", "-f", "{{.Dir}}", import_path])
            .map(PathBuf::from)
    }
}

/// Memoizing front for a [`SourceLookup`].
///
/// Both outcomes are cached for the lifetime of the locator, so a package is
/// looked up externally at most once per run. Not synchronized: the builder
/// owns it and resolves sequentially.
pub struct PackageLocator<L> {
    lookup: L,
    found: HashMap<String, PathBuf>,
    failed: HashMap<String, LocateError>,
}

impl<L: SourceLookup> PackageLocator<L> {
    pub fn new(lookup: L) -> Self {
        let failed = BUILTIN_PACKAGES
            .iter()
            .map(|name| (name.to_string(), LocateError::Builtin))
            .collect();

        Self {
            lookup,
            found: HashMap::new(),
            failed,
        }
    }

    pub fn resolve(&mut self, import_path: &str) -> Result<PathBuf, LocateError> {
        if let Some(dir) = self.found.get(import_path) {
            return Ok(dir.clone());
        }
        if let Some(err) = self.failed.get(import_path) {
            return Err(err.clone());
        }

        match self.lookup.source_dir(import_path) {
            Ok(dir) => {
                debug!("located {import_path} at {}", dir.display());
                self.found.insert(import_path.to_string(), dir.clone());
                Ok(dir)
            }
            Err(err) => {
                debug!("cannot locate {import_path}: {err:#}");
                let err = LocateError::Unresolvable {
                    reason: format!("{err:#}"),
                };
                self.failed.insert(import_path.to_string(), err.clone());
                Err(err)
            }
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Number of cached outcomes, built-ins included
    pub fn cached_len(&self) -> usize {
        self.found.len() + self.failed.len()
    }
}

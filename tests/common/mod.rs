#![allow(dead_code)]

use anyhow::{anyhow, Result};
use goviz::core::SourceLookup;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Stand-in for `go list`: a fixed map of import paths to directories that
/// records every lookup it serves
#[derive(Clone, Default)]
pub struct FakeLookup {
    dirs: HashMap<String, PathBuf>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeLookup {
    pub fn with(mut self, import_path: &str, dir: &Path) -> Self {
        self.dirs.insert(import_path.to_string(), dir.to_path_buf());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, import_path: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.as_str() == import_path)
            .count()
    }
}

impl SourceLookup for FakeLookup {
    fn source_dir(&self, import_path: &str) -> Result<PathBuf> {
        self.calls.borrow_mut().push(import_path.to_string());
        self.dirs
            .get(import_path)
            .cloned()
            .ok_or_else(|| anyhow!("cannot find package {import_path:?}"))
    }
}

/// A tree of fake Go packages under one temp dir
pub struct Workspace {
    pub dir: TempDir,
    pub lookup: FakeLookup,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            lookup: FakeLookup::default(),
        }
    }

    /// Write `<import_path>/<file>` declaring `imports` and register the
    /// package with the lookup
    pub fn package(mut self, import_path: &str, file: &str, imports: &[&str]) -> Self {
        let pkg_dir = self.dir.path().join(import_path);
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(pkg_dir.join(file), go_source(package_name(import_path), imports)).unwrap();
        self.lookup = self.lookup.with(import_path, &pkg_dir);
        self
    }

    /// Register a package directory without any Go files
    pub fn empty_package(mut self, import_path: &str) -> Self {
        let pkg_dir = self.dir.path().join(import_path);
        fs::create_dir_all(&pkg_dir).unwrap();
        self.lookup = self.lookup.with(import_path, &pkg_dir);
        self
    }
}

pub fn package_name(import_path: &str) -> &str {
    import_path.rsplit('/').next().unwrap()
}

pub fn go_source(package: &str, imports: &[&str]) -> String {
    let mut source = format!("package {package}\n\n");
    if !imports.is_empty() {
        source.push_str("import (\n");
        for import in imports {
            source.push_str(&format!("\t\"{import}\"\n"));
        }
        source.push_str(")\n");
    }
    source.push_str("\nfunc Hello() {}\n");
    source
}

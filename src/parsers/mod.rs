pub mod common;
pub mod go;

use anyhow::Result;
use std::path::Path;

pub use go::GoParser;

/// Reads the import declarations of a single source file
pub trait ImportParser {
    /// Imported package paths, in declaration order, duplicates kept
    fn parse_imports(&mut self, file_path: &Path) -> Result<Vec<String>>;
}

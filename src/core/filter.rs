/// Seek path token that stands for the root import path
pub const SELF_TOKEN: &str = "SELF";

/// Scope and visibility policy for discovered imports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFilter {
    seek_path: String,
    plot_leaf: bool,
}

impl ImportFilter {
    pub fn new(root: &str, seek_path: &str, plot_leaf: bool) -> Self {
        let seek_path = if seek_path == SELF_TOKEN { root } else { seek_path };
        Self {
            seek_path: seek_path.to_string(),
            plot_leaf,
        }
    }

    /// Whether `import_path` is expanded. Plain string prefix, so `pkg/fo`
    /// also covers `pkg/foo`.
    pub fn applicable(&self, import_path: &str) -> bool {
        self.seek_path.is_empty() || import_path.starts_with(&self.seek_path)
    }

    /// Whether skipped packages still show up as placeholder leaves
    pub fn visible(&self, _import_path: &str) -> bool {
        self.plot_leaf
    }

    pub fn seek_path(&self) -> &str {
        &self.seek_path
    }
}

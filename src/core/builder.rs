use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::graph::{ImportGraph, NodeId, PackageRef};
use super::locator::{GoList, PackageLocator, SourceLookup};
use super::{FileScanner, ImportFilter, ResolveError};
use crate::parsers::{GoParser, ImportParser};

/// Inputs of one graph resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveConfig {
    /// Import path the graph starts from
    pub root: String,
    /// Only imports starting with this are expanded, `SELF` means the root
    pub seek_path: String,
    /// Regex over file paths to leave out, empty for none
    pub exclude_file: String,
    /// Keep skipped imports as placeholder leaves
    pub plot_leaf: bool,
    pub include_tests: bool,
}

impl ResolveConfig {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_seek_path(mut self, seek_path: impl Into<String>) -> Self {
        self.seek_path = seek_path.into();
        self
    }

    pub fn with_exclude_file(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_file = pattern.into();
        self
    }

    pub fn with_plot_leaf(mut self, plot_leaf: bool) -> Self {
        self.plot_leaf = plot_leaf;
        self
    }

    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }
}

/// Resolves a package and everything it imports into an [`ImportGraph`].
///
/// Every package is pooled before its imports are looked at, so an import
/// cycle leads back to the pooled node instead of expanding it again.
/// Expansion runs off an explicit work list; chain depth is not limited by
/// the call stack.
pub struct GraphBuilder<L: SourceLookup = GoList> {
    resolver: Resolver<L>,
    root: NodeId,
}

impl GraphBuilder<GoList> {
    /// Resolve through `go list` on `PATH`
    pub fn with_go_list(config: &ResolveConfig) -> Result<Self, ResolveError> {
        Self::new(config, GoList::new())
    }
}

impl<L: SourceLookup> GraphBuilder<L> {
    /// Resolve `config.root` and its imports. Fails unless the root itself
    /// resolves to a package with a source directory, whatever the leaf
    /// visibility says.
    pub fn new(config: &ResolveConfig, lookup: L) -> Result<Self, ResolveError> {
        let mut resolver = Resolver {
            graph: ImportGraph::new(),
            filter: ImportFilter::new(&config.root, &config.seek_path, config.plot_leaf),
            locator: PackageLocator::new(lookup),
            scanner: FileScanner::new(&config.exclude_file, config.include_tests),
            parser: GoParser::new()?,
        };

        let root = match resolver.get(&config.root)? {
            Some(id) if !resolver.graph.node(id).is_placeholder() => id,
            _ => return Err(ResolveError::RootUnresolved(config.root.clone())),
        };

        info!(
            "resolved {} packages from {}",
            resolver.graph.len(),
            config.root
        );

        Ok(Self { resolver, root })
    }

    /// Pooled node for `import_path`, resolving it first if needed. `None`
    /// when the package is skipped and leaves are hidden.
    pub fn get(&mut self, import_path: &str) -> Result<Option<NodeId>, ResolveError> {
        self.resolver.get(import_path)
    }

    /// Resolve `import_path` as the start of a reversed plot. It must end
    /// up as a pooled package with at least one source file.
    pub fn focus(&mut self, import_path: &str) -> Result<NodeId, ResolveError> {
        let id = self
            .get(import_path)?
            .ok_or_else(|| ResolveError::FocusMissing(import_path.to_string()))?;
        if !self.node(id).has_files() {
            return Err(ResolveError::FocusWithoutFiles(import_path.to_string()));
        }
        Ok(id)
    }

    pub fn root(&self) -> PackageRef<'_> {
        self.resolver.graph.node(self.root)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> PackageRef<'_> {
        self.resolver.graph.node(id)
    }

    /// Every pooled package. Order is unspecified.
    pub fn all(&self) -> Vec<PackageRef<'_>> {
        self.resolver.graph.nodes().collect()
    }

    pub fn graph(&self) -> &ImportGraph {
        &self.resolver.graph
    }

    pub fn filter(&self) -> &ImportFilter {
        &self.resolver.filter
    }

    pub fn locator(&self) -> &PackageLocator<L> {
        &self.resolver.locator
    }
}

struct Resolver<L> {
    graph: ImportGraph,
    filter: ImportFilter,
    locator: PackageLocator<L>,
    scanner: FileScanner,
    parser: GoParser,
}

impl<L: SourceLookup> Resolver<L> {
    fn get(&mut self, import_path: &str) -> Result<Option<NodeId>, ResolveError> {
        if let Some(id) = self.graph.get_node_id(import_path) {
            return Ok(Some(id));
        }

        let mut work = Vec::new();
        let found = self.admit(import_path, &mut work);
        self.expand(work)?;
        Ok(found)
    }

    /// Pool `import_path` without expanding it. Resolved packages are queued
    /// on `work`.
    fn admit(&mut self, import_path: &str, work: &mut Vec<NodeId>) -> Option<NodeId> {
        if let Some(id) = self.graph.get_node_id(import_path) {
            return Some(id);
        }

        if !self.filter.applicable(import_path) {
            return self.leaf(import_path);
        }

        match self.locator.resolve(import_path) {
            Ok(dir) => {
                let id = self.graph.insert_pending(import_path, dir);
                work.push(id);
                Some(id)
            }
            Err(err) => {
                debug!("{import_path}: {err}");
                self.leaf(import_path)
            }
        }
    }

    fn leaf(&mut self, import_path: &str) -> Option<NodeId> {
        if !self.filter.visible(import_path) {
            return None;
        }
        Some(self.graph.insert_placeholder(import_path))
    }

    fn expand(&mut self, mut work: Vec<NodeId>) -> Result<(), ResolveError> {
        while let Some(id) = work.pop() {
            let Some(dir) = self.graph.pending_dir(id).map(Path::to_path_buf) else {
                continue;
            };

            let files = self.scanner.list(&dir)?;
            let mut seen = HashSet::new();
            let mut imports = Vec::new();

            for file in &files {
                let paths = match self.parser.parse_imports(file) {
                    Ok(paths) => paths,
                    Err(err) => {
                        warn!("Failed to read imports of {}: {err:#}", file.display());
                        continue;
                    }
                };

                for path in paths {
                    if !seen.insert(path.clone()) {
                        continue;
                    }
                    if let Some(target) = self.admit(&path, &mut work) {
                        imports.push(target);
                    }
                }
            }

            debug!(
                "expanded {} ({} files, {} imports)",
                self.graph.node(id).import_path(),
                files.len(),
                imports.len()
            );
            self.graph.complete(id, files, imports);
        }
        Ok(())
    }
}

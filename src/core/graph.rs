use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Handle to a package in an [`ImportGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionState {
    /// Pooled, imports not resolved yet
    Pending,
    Done,
}

#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    dir: PathBuf,
    files: Vec<PathBuf>,
    imports: Vec<NodeId>,
    state: ExpansionState,
}

impl ResolvedPackage {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn imports(&self) -> &[NodeId] {
        &self.imports
    }

    pub fn state(&self) -> ExpansionState {
        self.state
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Resolved(ResolvedPackage),
    /// Out-of-scope or unresolvable import kept as a bare leaf
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct PackageNode {
    import_path: String,
    kind: NodeKind,
}

impl PackageNode {
    pub fn import_path(&self) -> &str {
        &self.import_path
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

/// Petgraph view of the packages, node weights are import paths
pub type DependencyGraph = Graph<String, (), Directed>;

/// Arena of packages keyed by import path. Holds at most one node per path;
/// nodes are never removed.
#[derive(Debug, Default)]
pub struct ImportGraph {
    nodes: Vec<PackageNode>,
    node_map: HashMap<String, NodeId>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_node_id(&self, import_path: &str) -> Option<NodeId> {
        self.node_map.get(import_path).copied()
    }

    /// Panics if `id` did not come from this graph
    pub fn node(&self, id: NodeId) -> PackageRef<'_> {
        assert!(id.0 < self.nodes.len(), "node id {} out of range", id.0);
        PackageRef { graph: self, id }
    }

    pub fn find(&self, import_path: &str) -> Option<PackageRef<'_>> {
        self.get_node_id(import_path).map(|id| self.node(id))
    }

    /// Every package, in creation order
    pub fn nodes(&self) -> impl Iterator<Item = PackageRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| PackageRef {
            graph: self,
            id: NodeId(i),
        })
    }

    /// Reverse adjacency: for each node, the packages importing it
    pub fn dependents(&self) -> Vec<Vec<NodeId>> {
        let mut reverse = vec![Vec::new(); self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            if let NodeKind::Resolved(package) = &node.kind {
                for target in &package.imports {
                    reverse[target.0].push(NodeId(i));
                }
            }
        }
        reverse
    }

    /// Node indices line up with [`NodeId::index`]
    pub fn to_petgraph(&self) -> DependencyGraph {
        let mut graph = DependencyGraph::with_capacity(self.nodes.len(), self.nodes.len());
        for node in &self.nodes {
            graph.add_node(node.import_path.clone());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let NodeKind::Resolved(package) = &node.kind {
                for target in &package.imports {
                    graph.add_edge(NodeIndex::new(i), NodeIndex::new(target.0), ());
                }
            }
        }
        graph
    }

    pub(crate) fn insert_placeholder(&mut self, import_path: &str) -> NodeId {
        self.insert(import_path, NodeKind::Placeholder)
    }

    pub(crate) fn insert_pending(&mut self, import_path: &str, dir: PathBuf) -> NodeId {
        self.insert(
            import_path,
            NodeKind::Resolved(ResolvedPackage {
                dir,
                files: Vec::new(),
                imports: Vec::new(),
                state: ExpansionState::Pending,
            }),
        )
    }

    fn insert(&mut self, import_path: &str, kind: NodeKind) -> NodeId {
        debug_assert!(
            !self.node_map.contains_key(import_path),
            "{import_path} pooled twice"
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(PackageNode {
            import_path: import_path.to_string(),
            kind,
        });
        self.node_map.insert(import_path.to_string(), id);
        id
    }

    pub(crate) fn pending_dir(&self, id: NodeId) -> Option<&Path> {
        match &self.nodes[id.0].kind {
            NodeKind::Resolved(package) if package.state == ExpansionState::Pending => {
                Some(&package.dir)
            }
            _ => None,
        }
    }

    /// Assign files and edges of a pending node, exactly once
    pub(crate) fn complete(&mut self, id: NodeId, files: Vec<PathBuf>, imports: Vec<NodeId>) {
        if let NodeKind::Resolved(package) = &mut self.nodes[id.0].kind {
            debug_assert_eq!(package.state, ExpansionState::Pending);
            if package.state == ExpansionState::Pending {
                package.files = files;
                package.imports = imports;
                package.state = ExpansionState::Done;
            }
        }
    }
}

/// Read-only view of one package, what renderers get to see
#[derive(Clone, Copy)]
pub struct PackageRef<'g> {
    graph: &'g ImportGraph,
    id: NodeId,
}

impl<'g> PackageRef<'g> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn import_path(&self) -> &'g str {
        &self.graph.nodes[self.id.0].import_path
    }

    pub fn kind(&self) -> &'g NodeKind {
        &self.graph.nodes[self.id.0].kind
    }

    pub fn files(&self) -> &'g [PathBuf] {
        match self.kind() {
            NodeKind::Resolved(package) => &package.files,
            NodeKind::Placeholder => &[],
        }
    }

    pub fn dependency_ids(&self) -> &'g [NodeId] {
        match self.kind() {
            NodeKind::Resolved(package) => &package.imports,
            NodeKind::Placeholder => &[],
        }
    }

    pub fn dependencies(&self) -> impl Iterator<Item = PackageRef<'g>> + 'g {
        let graph = self.graph;
        self.dependency_ids()
            .iter()
            .map(move |&id| PackageRef { graph, id })
    }

    pub fn has_files(&self) -> bool {
        !self.files().is_empty()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind(), NodeKind::Placeholder)
    }
}

impl std::fmt::Debug for PackageRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageRef")
            .field("id", &self.id)
            .field("import_path", &self.import_path())
            .finish()
    }
}

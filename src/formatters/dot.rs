use anyhow::Result;
use std::collections::{HashSet, VecDeque};
use std::io::Write;

use crate::core::{ImportGraph, NodeId, PackageRef};

pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Graphviz renderer for an import graph
#[derive(Debug, Clone)]
pub struct DotFormatter {
    max_depth: usize,
    hide_no_files: bool,
    reversed: bool,
    seek_path: String,
    files_shown: usize,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            hide_no_files: false,
            reversed: false,
            seek_path: String::new(),
            files_shown: usize::MAX,
        }
    }

    /// Levels plotted below the start node, 0 plots only the start
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_hide_no_files(mut self, hide_no_files: bool) -> Self {
        self.hide_no_files = hide_no_files;
        self
    }

    /// Walk importers instead of imports
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Packages under this prefix are drawn bold
    pub fn with_seek_path(mut self, seek_path: impl Into<String>) -> Self {
        self.seek_path = seek_path.into();
        self
    }

    pub fn with_files_shown(mut self, files_shown: usize) -> Self {
        self.files_shown = files_shown;
        self
    }

    pub fn format<W: Write>(&self, graph: &ImportGraph, start: NodeId, out: &mut W) -> Result<()> {
        let (plotted, edges) = self.collect(graph, start);

        writeln!(out, "digraph imports {{")?;
        writeln!(out, "\tgraph [rankdir=LR, compound=true, ranksep=1.0];")?;
        writeln!(out, "\tnode [shape=record, fontsize=10];")?;
        writeln!(out, "\tedge [arrowhead=vee];")?;

        for &id in &plotted {
            let package = graph.node(id);
            writeln!(
                out,
                "\t{} [label=\"{}\", style=\"{}\"];",
                quote(package.import_path()),
                self.label(&package),
                self.style(&package)
            )?;
        }

        for (from, to) in edges {
            writeln!(
                out,
                "\t{} -> {};",
                quote(graph.node(from).import_path()),
                quote(graph.node(to).import_path())
            )?;
        }

        writeln!(out, "}}")?;
        Ok(())
    }

    /// Breadth-first walk from `start`. Edges always point from importer to
    /// imported package, also in reversed mode.
    fn collect(&self, graph: &ImportGraph, start: NodeId) -> (Vec<NodeId>, Vec<(NodeId, NodeId)>) {
        let dependents = if self.reversed {
            graph.dependents()
        } else {
            Vec::new()
        };

        let mut plotted = vec![start];
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        let mut edges = Vec::new();

        while let Some((id, depth)) = queue.pop_front() {
            if depth >= self.max_depth {
                continue;
            }

            let next: &[NodeId] = if self.reversed {
                &dependents[id.index()]
            } else {
                graph.node(id).dependency_ids()
            };

            for &other in next {
                if self.hide_no_files && !graph.node(other).has_files() {
                    continue;
                }
                if self.reversed {
                    edges.push((other, id));
                } else {
                    edges.push((id, other));
                }
                if visited.insert(other) {
                    plotted.push(other);
                    queue.push_back((other, depth + 1));
                }
            }
        }

        (plotted, edges)
    }

    fn label(&self, package: &PackageRef<'_>) -> String {
        let files = package.files();
        if files.is_empty() {
            return escape(package.import_path());
        }

        let mut label = format!("{{{}|", escape(package.import_path()));
        for file in files.iter().take(self.files_shown) {
            let name = file
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_else(|| file.to_string_lossy());
            label.push_str(&escape(&name));
            label.push_str("\\l");
        }
        if files.len() > self.files_shown {
            label.push_str(&format!("... (+{})\\l", files.len() - self.files_shown));
        }
        label.push('}');
        label
    }

    fn style(&self, package: &PackageRef<'_>) -> &'static str {
        if package.is_placeholder() {
            "dashed"
        } else if !self.seek_path.is_empty() && package.import_path().starts_with(&self.seek_path) {
            "bold"
        } else {
            "solid"
        }
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Escape record-label metacharacters
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

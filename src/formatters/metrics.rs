use anyhow::Result;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use serde::Serialize;
use std::io::Write;

use crate::core::ImportGraph;

/// Coupling figures for one package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageMetrics {
    pub import_path: String,
    pub files: usize,
    /// Afferent coupling: packages importing this one
    pub ca: usize,
    /// Efferent coupling: packages this one imports
    pub ce: usize,
    /// `ce / (ca + ce)`, 0 for isolated packages
    pub instability: f64,
}

/// Report of per-package coupling and import cycles
pub struct MetricsFormatter;

impl MetricsFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Metrics of every pooled package, sorted by import path
    pub fn compute(&self, graph: &ImportGraph) -> Vec<PackageMetrics> {
        let petgraph = graph.to_petgraph();

        let mut metrics: Vec<PackageMetrics> = graph
            .nodes()
            .map(|package| {
                let index = NodeIndex::new(package.id().index());
                let ca = petgraph
                    .neighbors_directed(index, Direction::Incoming)
                    .count();
                let ce = petgraph
                    .neighbors_directed(index, Direction::Outgoing)
                    .count();
                let instability = if ca + ce == 0 {
                    0.0
                } else {
                    ce as f64 / (ca + ce) as f64
                };

                PackageMetrics {
                    import_path: package.import_path().to_string(),
                    files: package.files().len(),
                    ca,
                    ce,
                    instability,
                }
            })
            .collect();

        metrics.sort_by(|a, b| a.import_path.cmp(&b.import_path));
        metrics
    }

    /// Import cycles as sorted lists of package paths
    pub fn cycles(&self, graph: &ImportGraph) -> Vec<Vec<String>> {
        let petgraph = graph.to_petgraph();

        let mut cycles: Vec<Vec<String>> = tarjan_scc(&petgraph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || petgraph.contains_edge(component[0], component[0])
            })
            .map(|component| {
                let mut paths: Vec<String> = component
                    .into_iter()
                    .map(|index| petgraph[index].clone())
                    .collect();
                paths.sort();
                paths
            })
            .collect();

        cycles.sort();
        cycles
    }

    pub fn format<W: Write>(&self, graph: &ImportGraph, out: &mut W) -> Result<()> {
        writeln!(out, "{:>6} {:>4} {:>4} {:>11}  package", "files", "ca", "ce", "instability")?;
        for row in self.compute(graph) {
            writeln!(
                out,
                "{:>6} {:>4} {:>4} {:>11.2}  {}",
                row.files, row.ca, row.ce, row.instability, row.import_path
            )?;
        }

        let cycles = self.cycles(graph);
        if !cycles.is_empty() {
            writeln!(out)?;
            writeln!(out, "cycles: {}", cycles.len())?;
            for cycle in cycles {
                writeln!(out, "  {}", cycle.join(" <-> "))?;
            }
        }
        Ok(())
    }
}

impl Default for MetricsFormatter {
    fn default() -> Self {
        Self::new()
    }
}

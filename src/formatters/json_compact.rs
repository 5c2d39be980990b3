use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::core::{ImportGraph, NodeId};

#[derive(Serialize)]
struct CompactGraph<'a> {
    meta: Meta<'a>,
    packages: Vec<CompactPackage<'a>>,
}

#[derive(Serialize)]
struct Meta<'a> {
    packages: usize,
    imports: usize,
    root: &'a str,
    format: &'static str,
}

/// `p`: import path, `f`: file names, `d`: indices of imported packages,
/// `x`: set on placeholders
#[derive(Serialize)]
struct CompactPackage<'a> {
    p: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    f: Vec<String>,
    #[serde(skip_serializing_if = "no_imports")]
    d: &'a [NodeId],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    x: bool,
}

fn no_imports(imports: &&[NodeId]) -> bool {
    imports.is_empty()
}

/// JSON export with minimal keys, packages listed in pool order
pub struct JsonCompactFormatter {
    pretty: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format<W: Write>(&self, graph: &ImportGraph, root: NodeId, out: &mut W) -> Result<()> {
        let packages: Vec<CompactPackage<'_>> = graph
            .nodes()
            .map(|package| CompactPackage {
                p: package.import_path(),
                f: package
                    .files()
                    .iter()
                    .map(|file| {
                        file.file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_else(|| file.to_string_lossy().into_owned())
                    })
                    .collect(),
                d: package.dependency_ids(),
                x: package.is_placeholder(),
            })
            .collect();

        let output = CompactGraph {
            meta: Meta {
                packages: packages.len(),
                imports: packages.iter().map(|package| package.d.len()).sum(),
                root: graph.node(root).import_path(),
                format: "compact",
            },
            packages,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &output)?;
        } else {
            serde_json::to_writer(&mut *out, &output)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

use anyhow::{anyhow, Result};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use goviz::core::{GraphBuilder, ResolveConfig, SourceLookup};
use goviz::formatters::{DotFormatter, MetricsFormatter};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps import paths onto directories under the bench root, no `go` needed
struct DirLookup {
    dirs: HashMap<String, PathBuf>,
}

impl SourceLookup for DirLookup {
    fn source_dir(&self, import_path: &str) -> Result<PathBuf> {
        self.dirs
            .get(import_path)
            .cloned()
            .ok_or_else(|| anyhow!("unknown package {import_path}"))
    }
}

/// A layered module: every package imports all packages of the next layer,
/// plus a couple of standard library leaves
fn write_module(root: &Path, layers: usize, width: usize) -> HashMap<String, PathBuf> {
    let mut dirs = HashMap::new();

    for layer in 0..layers {
        for i in 0..width {
            let import_path = format!("bench/l{layer}/p{i}");
            let dir = root.join(&import_path);
            std::fs::create_dir_all(&dir).unwrap();

            let mut source = format!("package p{i}\n\nimport (\n\t\"fmt\"\n\t\"strings\"\n");
            if layer + 1 < layers {
                for j in 0..width {
                    source.push_str(&format!("\t\"bench/l{}/p{j}\"\n", layer + 1));
                }
            }
            source.push_str(")\n\nfunc Run() { fmt.Println(strings.ToUpper(\"x\")) }\n");

            std::fs::write(dir.join("p.go"), &source).unwrap();
            std::fs::write(dir.join("p_test.go"), "package p\n\nimport \"testing\"\n").unwrap();
            dirs.insert(import_path, dir);
        }
    }

    // single entry point importing the first layer
    let main_dir = root.join("bench/cmd");
    std::fs::create_dir_all(&main_dir).unwrap();
    let mut main = String::from("package main\n\nimport (\n");
    for i in 0..width {
        main.push_str(&format!("\t\"bench/l0/p{i}\"\n"));
    }
    main.push_str(")\n\nfunc main() {}\n");
    std::fs::write(main_dir.join("main.go"), main).unwrap();
    dirs.insert("bench/cmd".to_string(), main_dir);

    dirs
}

fn benchmark_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("import_graph");

    let root = std::env::temp_dir().join("goviz_bench");
    let _ = std::fs::remove_dir_all(&root);
    let dirs = write_module(&root, 8, 10);

    let config = ResolveConfig::new("bench/cmd")
        .with_seek_path("bench/")
        .with_plot_leaf(true);

    group.bench_function("resolve_layered_module", |b| {
        b.iter(|| {
            let lookup = DirLookup { dirs: dirs.clone() };
            let builder = GraphBuilder::new(black_box(&config), lookup).unwrap();
            black_box(builder.all().len())
        });
    });

    let builder = GraphBuilder::new(&config, DirLookup { dirs: dirs.clone() }).unwrap();

    group.bench_function("render_dot", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            DotFormatter::new()
                .format(builder.graph(), builder.root_id(), &mut out)
                .unwrap();
            black_box(out.len())
        });
    });

    group.bench_function("compute_metrics", |b| {
        b.iter(|| black_box(MetricsFormatter::new().compute(builder.graph())));
    });

    group.finish();
}

criterion_group!(benches, benchmark_resolution);
criterion_main!(benches);

mod common;

use common::Workspace;
use goviz::core::{GraphBuilder, ResolveConfig};
use goviz::formatters::JsonCompactFormatter;
use serde_json::{json, Value};

#[test]
fn json_compact_snapshot_small_graph() {
    let ws = Workspace::new()
        .package("pkg/a", "a.go", &["pkg/b", "fmt"])
        .package("pkg/b", "b.go", &[]);
    let config = ResolveConfig::new("pkg/a")
        .with_seek_path("SELF")
        .with_plot_leaf(true);
    let builder = GraphBuilder::new(&config, ws.lookup.clone()).unwrap();

    let mut out = Vec::new();
    JsonCompactFormatter::new()
        .format(builder.graph(), builder.root_id(), &mut out)
        .unwrap();
    let v: Value = serde_json::from_slice(&out).unwrap();

    // packages are listed in pool order: root, then its imports as admitted
    let expected = json!({
        "meta": {"packages": 3, "imports": 2, "root": "pkg/a", "format": "compact"},
        "packages": [
            {"p": "pkg/a", "f": ["a.go"], "d": [1, 2]},
            {"p": "pkg/b", "f": ["b.go"]},
            {"p": "fmt", "x": true}
        ]
    });
    assert_eq!(v, expected);
}

#[test]
fn pretty_output_carries_the_same_document() {
    let ws = Workspace::new()
        .package("pkg/a", "a.go", &["pkg/b"])
        .package("pkg/b", "b.go", &[]);
    let builder = GraphBuilder::new(&ResolveConfig::new("pkg/a"), ws.lookup.clone()).unwrap();

    let mut compact = Vec::new();
    JsonCompactFormatter::new()
        .format(builder.graph(), builder.root_id(), &mut compact)
        .unwrap();
    let mut pretty = Vec::new();
    JsonCompactFormatter::new()
        .with_pretty(true)
        .format(builder.graph(), builder.root_id(), &mut pretty)
        .unwrap();

    let compact_text = String::from_utf8(compact.clone()).unwrap();
    let pretty_text = String::from_utf8(pretty.clone()).unwrap();
    assert!(!compact_text.trim_end().contains('\n'));
    assert!(pretty_text.lines().count() > 1);

    let compact: Value = serde_json::from_slice(&compact).unwrap();
    let pretty: Value = serde_json::from_slice(&pretty).unwrap();
    assert_eq!(compact, pretty);
}

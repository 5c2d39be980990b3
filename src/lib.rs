//! # GOVIZ
//!
//! Resolve the import graph of a Go package.
//!
//! Starting from one import path, every package is located with `go list`,
//! its `.go` files are enumerated and their imports followed until the graph
//! is closed. Lookups are memoized for the whole run and import cycles are
//! cut by pooling each package before its imports are resolved.
//!
//! ## Output Formats
//!
//! - **Dot**: Graphviz digraph with per-package file lists
//! - **Metrics**: afferent/efferent coupling, instability and import cycles
//! - **JSON-Compact**: minimal-key JSON for programmatic consumption

pub mod core;
pub mod formatters;
pub mod parsers;

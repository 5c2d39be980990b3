pub mod builder;
pub mod error;
pub mod filter;
pub mod graph;
pub mod locator;
pub mod scanner;

pub use builder::{GraphBuilder, ResolveConfig};
pub use error::{LocateError, ResolveError};
pub use filter::{ImportFilter, SELF_TOKEN};
pub use graph::{
    DependencyGraph, ExpansionState, ImportGraph, NodeId, NodeKind, PackageRef, ResolvedPackage,
};
pub use locator::{GoList, PackageLocator, SourceLookup};
pub use scanner::{validate_exclude_pattern, FileScanner};

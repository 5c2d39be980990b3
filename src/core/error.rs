use std::path::PathBuf;
use thiserror::Error;

/// Why a package has no source directory. Cached by the locator and
/// absorbed by the builder, never fatal on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("built-in package has no source")]
    Builtin,

    #[error("package could not be located: {reason}")]
    Unresolvable { reason: String },
}

/// Failures that abort graph construction
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("root package {0} could not be resolved")]
    RootUnresolved(String),

    #[error("focus package {0} does not exist")]
    FocusMissing(String),

    #[error("focus package {0} has no go files")]
    FocusWithoutFiles(String),

    #[error("failed to list source files in {}: {source}", dir.display())]
    ListDir {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Parser(#[from] anyhow::Error),
}

// crates/om-core/src/error.rs - Registry error taxonomy

use thiserror::Error;

/// Errors surfaced by the registry and resolution engine.
///
/// The core never prints or exits; every failure is returned synchronously
/// to the caller (the CLI), which owns user-facing formatting and the
/// process exit code. Collection launches do not use this type for member
/// failures - those are aggregated per member in
/// [`crate::launch::CollectionLaunchReport`] so one bad member never aborts
/// the rest.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Alias normalized to the empty string.
    #[error("invalid name: {0:?} is empty after normalization")]
    InvalidName(String),

    /// Path did not denote an existing directory at write time.
    #[error("invalid path: \"{0}\" is not an existing directory")]
    InvalidPath(String),

    /// A stored path was gone at launch time. This is the one place where
    /// stored paths are re-validated; everywhere else staleness is tolerated.
    #[error("path missing: \"{path}\" for \"{name}\" no longer exists")]
    PathMissing { name: String, path: String },

    #[error("\"{0}\" already exists")]
    AlreadyExists(String),

    #[error("\"{0}\" not found")]
    NotFound(String),

    /// Collection upsert referenced aliases absent from the repository
    /// registry. Carries every unresolved alias; nothing was written.
    #[error("unknown repositories: {}", .0.join(", "))]
    MissingRepositories(Vec<String>),

    #[error("invalid editor id: {0:?}")]
    InvalidEditor(String),

    /// No editor id could be resolved for a launch and none was overridden.
    /// Callers should state which setter command would fix it.
    #[error("no preferred editor configured for \"{0}\"")]
    NoPreferredEditor(String),

    /// A single-target launch attempt failed.
    #[error("failed to launch \"{name}\": {cause}")]
    LaunchFailed { name: String, cause: String },

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

// crates/om-core/src/launch.rs - Launch dispatch boundary
//
// The core decides WHAT to launch (which editor, which directory) and the
// Launcher collaborator decides HOW (platform command candidates). Only a
// deterministic success/failure signal crosses the boundary. Launching is a
// detached handoff: once dispatched, the spawned editor is neither tracked
// nor killed, and no timeouts apply.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::ide::EditorId;
use crate::name;
use crate::store::{Collection, Repository, StoreState};

/// Failure signal from a launch attempt, with a human-readable cause.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct LaunchError(pub String);

/// Capability to start an editor against a directory.
///
/// Implementations supply the platform-specific command candidates; the
/// core only consumes the success/failure signal.
pub trait Launcher {
    fn launch(&self, editor: EditorId, path: &Path) -> Result<(), LaunchError>;
}

/// What a bare name on the command line resolved to.
///
/// Repositories and collections are separate keyspaces sharing one lookup
/// surface. This is the named disambiguation policy for open-style verbs:
/// a collection shadows a repository under the same normalized key. Write
/// verbs disambiguate explicitly (the `-c` flag) and never go through here.
#[derive(Debug)]
pub enum LookupHit<'a> {
    Collection(&'a Collection),
    Repository(&'a Repository),
}

/// Resolve a user-supplied name against both keyspaces, collections first.
pub fn resolve_open_target<'a>(state: &'a StoreState, raw: &str) -> Option<LookupHit<'a>> {
    let key = name::normalize(raw);
    if let Some(collection) = state.collections.get(&key) {
        return Some(LookupHit::Collection(collection));
    }
    state.repos.get(&key).map(LookupHit::Repository)
}

/// Launch a single repository.
///
/// The stored path is re-validated here, immediately before dispatch - the
/// one exception to the no-re-validation policy, because launching against
/// a stale path is a silent no-op on most platforms.
pub fn open_repository(
    launcher: &dyn Launcher,
    alias: &str,
    repo: &Repository,
    editor: EditorId,
) -> RegistryResult<()> {
    let dir = Path::new(&repo.path);
    if !dir.is_dir() {
        return Err(RegistryError::PathMissing {
            name: alias.to_string(),
            path: repo.path.clone(),
        });
    }

    debug!(alias, editor = %editor, path = %repo.path, "dispatching launch");
    launcher
        .launch(editor, dir)
        .map_err(|e| RegistryError::LaunchFailed {
            name: alias.to_string(),
            cause: e.0,
        })
}

/// Per-member outcome of a collection launch.
#[derive(Debug)]
pub enum MemberOutcome {
    Launched {
        alias: String,
        path: String,
    },
    /// The member alias no longer resolves to a repository (dangling
    /// reference left behind by a remove or rename).
    NotRegistered {
        alias: String,
    },
    PathMissing {
        alias: String,
        path: String,
    },
    Failed {
        alias: String,
        cause: String,
    },
}

impl MemberOutcome {
    pub fn alias(&self) -> &str {
        match self {
            MemberOutcome::Launched { alias, .. }
            | MemberOutcome::NotRegistered { alias }
            | MemberOutcome::PathMissing { alias, .. }
            | MemberOutcome::Failed { alias, .. } => alias,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MemberOutcome::Launched { .. })
    }
}

/// Aggregate result of launching every member of a collection.
///
/// Partial-failure semantics: every member is attempted, failures are
/// collected, and the aggregate never raises. The caller reports per member.
#[derive(Debug)]
pub struct CollectionLaunchReport {
    pub outcomes: Vec<MemberOutcome>,
}

impl CollectionLaunchReport {
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.len() - self.successes()
    }
}

/// Launch every member of a collection, independently, collecting outcomes.
pub fn open_collection(
    launcher: &dyn Launcher,
    state: &StoreState,
    collection: &Collection,
    editor: EditorId,
) -> CollectionLaunchReport {
    let mut outcomes = Vec::with_capacity(collection.repos.len());

    for alias in &collection.repos {
        let Some(repo) = state.repos.get(&name::normalize(alias)) else {
            outcomes.push(MemberOutcome::NotRegistered {
                alias: alias.clone(),
            });
            continue;
        };

        let outcome = match open_repository(launcher, alias, repo, editor) {
            Ok(()) => MemberOutcome::Launched {
                alias: alias.clone(),
                path: repo.path.clone(),
            },
            Err(RegistryError::PathMissing { path, .. }) => MemberOutcome::PathMissing {
                alias: alias.clone(),
                path,
            },
            Err(RegistryError::LaunchFailed { cause, .. }) => MemberOutcome::Failed {
                alias: alias.clone(),
                cause,
            },
            Err(other) => MemberOutcome::Failed {
                alias: alias.clone(),
                cause: other.to_string(),
            },
        };
        outcomes.push(outcome);
    }

    CollectionLaunchReport { outcomes }
}

use anyhow::{Context as AnyhowContext, Result};
use directories::BaseDirs;
use std::env;
use std::path::PathBuf;

use om_core::store::{Store, StoreState};

/// Application context passed to command handlers.
///
/// Wraps the store and centralizes the load/save cycle so every command
/// follows the same load -> mutate -> save pattern and the same
/// corruption-recovery reporting.
pub struct Context {
    store: Store,
}

impl Context {
    /// Resolve the store directory using precedence: CLI flag > OM_STORE
    /// environment variable > `~/.openmate`.
    pub fn new(store_dir: Option<PathBuf>) -> Result<Self> {
        let dir = store_dir
            .or_else(|| env::var("OM_STORE").ok().map(PathBuf::from))
            .or_else(|| BaseDirs::new().map(|b| b.home_dir().join(".openmate")))
            .context("could not determine a store directory (no home directory found)")?;

        Ok(Self {
            store: Store::new(dir),
        })
    }

    /// Load the store, surfacing corruption recovery as a one-line warning.
    /// The reset itself already happened inside the core (disposable-index
    /// tradeoff); the user just gets told about it.
    pub fn load(&self) -> Result<StoreState> {
        let loaded = self
            .store
            .load()
            .with_context(|| format!("failed to load store at {}", self.store.file_path().display()))?;
        if loaded.recovered {
            eprintln!(
                "⚠️  Store at {} was corrupt and has been reset.",
                self.store.file_path().display()
            );
        }
        Ok(loaded.state)
    }

    pub fn save(&self, state: &StoreState) -> Result<()> {
        self.store
            .save(state)
            .with_context(|| format!("failed to save store at {}", self.store.file_path().display()))
    }
}

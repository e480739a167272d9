// crates/om-core/src/store.rs - Persisted registry document
//
// The store owns the single JSON document that holds every repository,
// collection, and global default. Both surfaces (CLI and desktop UI) share
// it, so every mutation is one load -> mutate -> save cycle and the save is
// an atomic temp-file + rename to rule out truncation from a crash
// mid-write. Cross-process read-modify-write races are an accepted
// limitation for a single-user local tool.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::RegistryResult;
use crate::ide::EditorId;

/// Current schema version. Version 1 documents predate collections.
pub const SCHEMA_VERSION: u32 = 2;

const STORE_FILE: &str = "repos.json";

/// A registered alias -> directory binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Absolute directory path, validated when set, opaque afterwards.
    pub path: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Per-repository preferred editor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide: Option<EditorId>,
}

/// A named, deduplicated set of repository aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Display name, original casing as given by the user.
    pub name: String,
    /// Member aliases (normalized). Order is not significant; dangling
    /// references are tolerated and surface at resolution time.
    pub repos: Vec<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide: Option<EditorId>,
}

/// The root aggregate: everything the tool persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub version: u32,
    pub repos: BTreeMap<String, Repository>,
    pub collections: BTreeMap<String, Collection>,
    /// Global default editor slots. The desktop UI binds both to quick
    /// actions; the CLI's effective default is slot 1, falling back to 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide_default_1: Option<EditorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide_default_2: Option<EditorId>,
}

impl StoreState {
    pub fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION,
            repos: BTreeMap::new(),
            collections: BTreeMap::new(),
            ide_default_1: None,
            ide_default_2: None,
        }
    }

    /// The one effective global default used by the CLI.
    pub fn effective_default(&self) -> Option<EditorId> {
        self.ide_default_1.or(self.ide_default_2)
    }
}

/// Result of loading the store.
#[derive(Debug)]
pub struct Loaded {
    pub state: StoreState,
    /// A corrupt document was replaced with a fresh empty one.
    pub recovered: bool,
    /// A forward migration (or legacy-shape canonicalization) was applied
    /// and re-persisted during this load.
    pub migrated: bool,
}

/// Tolerant decode target for whatever is on disk.
///
/// Older installs stored bare path strings as repo entries and omitted the
/// collections map entirely. All shape tolerance lives here, in one
/// migration step at load; the registries only ever see the canonical
/// [`StoreState`].
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default = "legacy_version")]
    version: u32,
    #[serde(default)]
    repos: BTreeMap<String, RawRepoEntry>,
    #[serde(default)]
    collections: BTreeMap<String, Collection>,
    #[serde(default)]
    ide_default_1: Option<EditorId>,
    #[serde(default)]
    ide_default_2: Option<EditorId>,
    /// Legacy v1 shape: a single global default, predating the two slots.
    #[serde(default)]
    ide_default: Option<EditorId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRepoEntry {
    Record(Repository),
    /// Legacy v1 shape: the entry value is just the path string.
    Legacy(String),
}

fn legacy_version() -> u32 {
    1
}

/// File-backed store. All persistence goes through this type; the
/// registries never touch the disk themselves.
pub struct Store {
    dir: PathBuf,
    file: PathBuf,
}

impl Store {
    /// Create a store rooted at `dir` (e.g. `~/.openmate`). Nothing is
    /// touched on disk until the first load or save.
    pub fn new(dir: PathBuf) -> Self {
        let file = dir.join(STORE_FILE);
        Self { dir, file }
    }

    pub fn file_path(&self) -> &Path {
        &self.file
    }

    /// Load the persisted state, initializing, migrating, or recovering as
    /// needed.
    ///
    /// - First use: an empty v2 state is created and persisted immediately.
    /// - Older schema: migrated forward in place and re-persisted, exactly
    ///   once; subsequent loads see the current version.
    /// - Corrupt document: reported via `tracing::warn!` and the `recovered`
    ///   flag, then replaced with a fresh empty state. Deliberate
    ///   data-loss-over-crash tradeoff for a disposable local index.
    pub fn load(&self) -> RegistryResult<Loaded> {
        if !self.file.exists() {
            let state = StoreState::empty();
            self.save(&state)?;
            debug!(file = %self.file.display(), "initialized empty store");
            return Ok(Loaded {
                state,
                recovered: false,
                migrated: false,
            });
        }

        let text = fs::read_to_string(&self.file)?;
        let raw: RawDocument = match serde_json::from_str(&text) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    file = %self.file.display(),
                    error = %err,
                    "store is corrupt, recreating empty store"
                );
                let state = StoreState::empty();
                self.save(&state)?;
                return Ok(Loaded {
                    state,
                    recovered: true,
                    migrated: false,
                });
            }
        };

        let (state, migrated) = canonicalize(raw);
        if migrated {
            self.save(&state)?;
            debug!(version = state.version, "migrated store schema");
        }

        Ok(Loaded {
            state,
            recovered: false,
            migrated,
        })
    }

    /// Persist the full state atomically: write a temp file in the store
    /// directory, then rename it over the live file. A crash mid-write
    /// leaves the previous document intact.
    pub fn save(&self, state: &StoreState) -> RegistryResult<()> {
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(state)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.file).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Produce the canonical state from whatever shape was on disk. Returns
/// whether anything changed and needs re-persisting.
fn canonicalize(raw: RawDocument) -> (StoreState, bool) {
    let mut migrated = raw.version < SCHEMA_VERSION;

    let mut repos = BTreeMap::new();
    for (alias, entry) in raw.repos {
        let record = match entry {
            RawRepoEntry::Record(record) => record,
            RawRepoEntry::Legacy(path) => {
                migrated = true;
                Repository {
                    path,
                    updated_at: Utc::now(),
                    ide: None,
                }
            }
        };
        repos.insert(alias, record);
    }

    // The single pre-slot default moves into slot 1 unless a slot is
    // already set.
    let mut ide_default_1 = raw.ide_default_1;
    if ide_default_1.is_none() {
        if let Some(legacy) = raw.ide_default {
            ide_default_1 = Some(legacy);
            migrated = true;
        }
    }

    let state = StoreState {
        version: SCHEMA_VERSION,
        repos,
        collections: raw.collections,
        ide_default_1,
        ide_default_2: raw.ide_default_2,
    };
    (state, migrated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> Store {
        Store::new(dir.path().join("state"))
    }

    #[test]
    fn first_load_initializes_and_persists_empty_state() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let loaded = store.load().unwrap();
        assert!(!loaded.recovered);
        assert!(!loaded.migrated);
        assert_eq!(loaded.state, StoreState::empty());
        assert!(store.file_path().exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut state = StoreState::empty();
        state.repos.insert(
            "api".to_string(),
            Repository {
                path: "/tmp/api".to_string(),
                updated_at: Utc::now(),
                ide: Some(EditorId::Vs),
            },
        );
        state.ide_default_1 = Some(EditorId::Cs);
        store.save(&state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.state, state);
        assert!(!loaded.migrated);
    }

    #[test]
    fn v1_document_migrates_once_and_stays_migrated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(dir.path().join("state")).unwrap();
        fs::write(
            store.file_path(),
            r#"{"version":1,"repos":{"api":{"path":"/tmp/api","updatedAt":"2024-01-01T00:00:00Z"}}}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.migrated);
        assert_eq!(loaded.state.version, SCHEMA_VERSION);
        assert!(loaded.state.collections.is_empty());
        assert_eq!(loaded.state.repos["api"].path, "/tmp/api");

        // Re-persisted: the file now carries the current version, and a
        // second load applies no further migration.
        let text = fs::read_to_string(store.file_path()).unwrap();
        assert!(text.contains("\"version\": 2"));
        let again = store.load().unwrap();
        assert!(!again.migrated);
        assert_eq!(again.state, loaded.state);
    }

    #[test]
    fn legacy_string_entries_are_canonicalized_at_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(dir.path().join("state")).unwrap();
        fs::write(
            store.file_path(),
            r#"{"version":2,"repos":{"web":"/tmp/web"},"collections":{}}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.migrated);
        assert_eq!(loaded.state.repos["web"].path, "/tmp/web");
        assert_eq!(loaded.state.repos["web"].ide, None);
    }

    #[test]
    fn legacy_single_default_migrates_into_slot_one() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(dir.path().join("state")).unwrap();
        fs::write(
            store.file_path(),
            r#"{"version":1,"repos":{"api":"/tmp"},"ide_default":"vs"}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.migrated);
        assert_eq!(loaded.state.ide_default_1, Some(EditorId::Vs));
        assert_eq!(loaded.state.effective_default(), Some(EditorId::Vs));

        // The re-persisted document carries the slot, not the legacy field.
        let again = store.load().unwrap();
        assert!(!again.migrated);
        assert_eq!(again.state.ide_default_1, Some(EditorId::Vs));
    }

    #[test]
    fn legacy_default_never_overrides_a_set_slot() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(dir.path().join("state")).unwrap();
        fs::write(
            store.file_path(),
            r#"{"version":2,"repos":{},"collections":{},"ide_default_1":"cs","ide_default":"vs"}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.state.ide_default_1, Some(EditorId::Cs));
    }

    #[test]
    fn corrupt_document_is_replaced_with_empty_state() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(dir.path().join("state")).unwrap();
        fs::write(store.file_path(), "{ not json").unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.recovered);
        assert_eq!(loaded.state, StoreState::empty());

        // The reset was persisted, so the next load is clean.
        let again = store.load().unwrap();
        assert!(!again.recovered);
    }

    #[test]
    fn effective_default_prefers_slot_one() {
        let mut state = StoreState::empty();
        assert_eq!(state.effective_default(), None);
        state.ide_default_2 = Some(EditorId::Ws);
        assert_eq!(state.effective_default(), Some(EditorId::Ws));
        state.ide_default_1 = Some(EditorId::Vs);
        assert_eq!(state.effective_default(), Some(EditorId::Vs));
    }
}

// crates/om-core/src/repo.rs - Repository registry
//
// CRUD over alias -> directory bindings. The registry mutates an in-memory
// StoreState; persistence is the caller's load -> mutate -> save cycle.

use std::path::PathBuf;

use chrono::Utc;

use crate::error::{RegistryError, RegistryResult};
use crate::ide::EditorId;
use crate::name;
use crate::path;
use crate::store::{Repository, StoreState};

/// Repository CRUD over a loaded store state.
pub struct RepositoryRegistry<'a> {
    state: &'a mut StoreState,
}

impl<'a> RepositoryRegistry<'a> {
    pub fn new(state: &'a mut StoreState) -> Self {
        Self { state }
    }

    /// Register a new alias. The path must be an existing directory at this
    /// moment; it is not re-validated afterwards.
    pub fn add(&mut self, alias: &str, raw_path: &str) -> RegistryResult<PathBuf> {
        let key = valid_key(alias)?;
        if self.state.repos.contains_key(&key) {
            return Err(RegistryError::AlreadyExists(key));
        }

        let abs = path::expand(raw_path);
        path::assert_directory(&abs)?;

        self.state.repos.insert(
            key,
            Repository {
                path: abs.display().to_string(),
                updated_at: Utc::now(),
                ide: None,
            },
        );
        Ok(abs)
    }

    /// Overwrite the path of an existing alias, stamping the timestamp.
    /// Identity (and any preferred editor) is preserved.
    pub fn update(&mut self, alias: &str, raw_path: &str) -> RegistryResult<PathBuf> {
        let key = valid_key(alias)?;
        let abs = path::expand(raw_path);
        path::assert_directory(&abs)?;

        let repo = self
            .state
            .repos
            .get_mut(&key)
            .ok_or(RegistryError::NotFound(key))?;
        repo.path = abs.display().to_string();
        repo.updated_at = Utc::now();
        Ok(abs)
    }

    /// Rename an alias: delete-old/insert-new, carrying the record wholesale
    /// so timestamps and the preferred editor survive. Collections that
    /// reference the old alias are left untouched; the dangling member
    /// surfaces at resolution time.
    pub fn rename(&mut self, old: &str, new: &str) -> RegistryResult<()> {
        let old_key = valid_key(old)?;
        let new_key = valid_key(new)?;
        if self.state.repos.contains_key(&new_key) {
            return Err(RegistryError::AlreadyExists(new_key));
        }
        let record = self
            .state
            .repos
            .remove(&old_key)
            .ok_or(RegistryError::NotFound(old_key))?;
        self.state.repos.insert(new_key, record);
        Ok(())
    }

    /// Delete an alias. Collections referencing it are not pruned.
    pub fn remove(&mut self, alias: &str) -> RegistryResult<()> {
        let key = valid_key(alias)?;
        self.state
            .repos
            .remove(&key)
            .map(|_| ())
            .ok_or(RegistryError::NotFound(key))
    }

    pub fn get(&self, alias: &str) -> Option<&Repository> {
        self.state.repos.get(&name::normalize(alias))
    }

    /// All repositories sorted by alias, case-insensitive. Deterministic
    /// ordering is a user-facing contract for listing output. Keys are
    /// normalized (lowercase), so the BTreeMap order already satisfies it.
    pub fn list(&self) -> Vec<(&str, &Repository)> {
        self.state
            .repos
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect()
    }

    /// Set or update the preferred editor for an alias.
    pub fn set_preferred_editor(&mut self, alias: &str, editor: EditorId) -> RegistryResult<()> {
        let key = valid_key(alias)?;
        let repo = self
            .state
            .repos
            .get_mut(&key)
            .ok_or(RegistryError::NotFound(key))?;
        repo.ide = Some(editor);
        repo.updated_at = Utc::now();
        Ok(())
    }
}

fn valid_key(alias: &str) -> RegistryResult<String> {
    let key = name::normalize(alias);
    if key.is_empty() {
        return Err(RegistryError::InvalidName(alias.to_string()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, StoreState) {
        (TempDir::new().unwrap(), StoreState::empty())
    }

    #[test]
    fn add_then_get_returns_expanded_path() {
        let (dir, mut state) = setup();
        let mut repos = RepositoryRegistry::new(&mut state);

        let raw = format!("{}/.", dir.path().display());
        let abs = repos.add("  API ", &raw).unwrap();
        assert_eq!(abs, path::expand(&raw));

        let repo = repos.get("api").unwrap();
        assert_eq!(repo.path, abs.display().to_string());
        assert_eq!(repo.ide, None);
    }

    #[test]
    fn add_rejects_duplicate_normalized_alias() {
        let (dir, mut state) = setup();
        let first = dir.path().join("a");
        let second = dir.path().join("b");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();

        let mut repos = RepositoryRegistry::new(&mut state);
        repos.add("api", first.to_str().unwrap()).unwrap();
        let err = repos.add(" Api ", second.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists(_)));

        // First write wins, untouched by the rejected second call.
        assert_eq!(repos.get("api").unwrap().path, first.display().to_string());
    }

    #[test]
    fn add_rejects_empty_name_and_bad_path() {
        let (dir, mut state) = setup();
        let mut repos = RepositoryRegistry::new(&mut state);

        assert!(matches!(
            repos.add("   ", dir.path().to_str().unwrap()),
            Err(RegistryError::InvalidName(_))
        ));
        assert!(matches!(
            repos.add("api", "/definitely/not/a/real/dir"),
            Err(RegistryError::InvalidPath(_))
        ));
        assert!(repos.get("api").is_none());
    }

    #[test]
    fn update_requires_existing_alias() {
        let (dir, mut state) = setup();
        let mut repos = RepositoryRegistry::new(&mut state);
        assert!(matches!(
            repos.update("ghost", dir.path().to_str().unwrap()),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn update_overwrites_path_and_keeps_preference() {
        let (dir, mut state) = setup();
        let other = dir.path().join("other");
        std::fs::create_dir_all(&other).unwrap();

        let mut repos = RepositoryRegistry::new(&mut state);
        repos.add("api", dir.path().to_str().unwrap()).unwrap();
        repos.set_preferred_editor("api", EditorId::Cs).unwrap();
        repos.update("API", other.to_str().unwrap()).unwrap();

        let repo = repos.get("api").unwrap();
        assert_eq!(repo.path, other.display().to_string());
        assert_eq!(repo.ide, Some(EditorId::Cs));
    }

    #[test]
    fn rename_moves_record_wholesale() {
        let (dir, mut state) = setup();
        let mut repos = RepositoryRegistry::new(&mut state);
        repos.add("api", dir.path().to_str().unwrap()).unwrap();
        repos.set_preferred_editor("api", EditorId::Vs).unwrap();
        let stamped = repos.get("api").unwrap().updated_at;

        repos.rename("api", "Backend").unwrap();
        assert!(repos.get("api").is_none());
        let moved = repos.get("backend").unwrap();
        assert_eq!(moved.ide, Some(EditorId::Vs));
        assert_eq!(moved.updated_at, stamped);

        assert!(matches!(
            repos.rename("ghost", "x"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn remove_deletes_only_the_repo() {
        let (dir, mut state) = setup();
        state.collections.insert(
            "stack".to_string(),
            crate::store::Collection {
                name: "stack".to_string(),
                repos: vec!["api".to_string()],
                updated_at: Utc::now(),
                ide: None,
            },
        );

        let mut repos = RepositoryRegistry::new(&mut state);
        repos.add("api", dir.path().to_str().unwrap()).unwrap();
        repos.remove("API").unwrap();
        assert!(repos.get("api").is_none());
        assert!(matches!(
            repos.remove("api"),
            Err(RegistryError::NotFound(_))
        ));

        // The collection still lists the dangling member.
        assert_eq!(state.collections["stack"].repos, vec!["api".to_string()]);
    }

    #[test]
    fn list_is_sorted_case_insensitively() {
        let (dir, mut state) = setup();
        let mut repos = RepositoryRegistry::new(&mut state);
        for alias in ["Zulu", "alpha", "Mike"] {
            repos.add(alias, dir.path().to_str().unwrap()).unwrap();
        }
        let names: Vec<&str> = repos.list().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["alpha", "mike", "zulu"]);
    }
}

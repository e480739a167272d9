// crates/om-core/src/collection.rs - Collection registry
//
// Collections are named, deduplicated sets of repository aliases. They live
// in their own keyspace (a repo and a collection may share a normalized
// name) and are validated against the repository map at write time only.

use chrono::Utc;

use crate::error::{RegistryError, RegistryResult};
use crate::ide::EditorId;
use crate::name;
use crate::store::{Collection, Repository, StoreState};

/// One member of a resolved collection: the stored alias plus the current
/// repository record, or `None` when the alias no longer resolves.
#[derive(Debug)]
pub struct ResolvedMember<'a> {
    pub alias: &'a str,
    pub repo: Option<&'a Repository>,
}

/// Collection CRUD over a loaded store state.
pub struct CollectionRegistry<'a> {
    state: &'a mut StoreState,
}

impl<'a> CollectionRegistry<'a> {
    pub fn new(state: &'a mut StoreState) -> Self {
        Self { state }
    }

    /// Create or wholesale-replace a collection.
    ///
    /// Members are normalized and deduplicated (set semantics). Every member
    /// must exist in the repository registry right now; otherwise the call
    /// fails with `MissingRepositories` carrying every unresolved alias and
    /// writes nothing. Update is a full replace, never a merge. The display
    /// name is stored verbatim; a pre-existing preferred editor survives the
    /// replace.
    pub fn upsert(&mut self, display_name: &str, members: &[&str]) -> RegistryResult<usize> {
        let key = name::normalize(display_name);
        if key.is_empty() {
            return Err(RegistryError::InvalidName(display_name.to_string()));
        }

        let mut aliases: Vec<String> = Vec::new();
        for member in members {
            let normalized = name::normalize(member);
            if normalized.is_empty() || aliases.contains(&normalized) {
                continue;
            }
            aliases.push(normalized);
        }

        let missing: Vec<String> = aliases
            .iter()
            .filter(|a| !self.state.repos.contains_key(*a))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(RegistryError::MissingRepositories(missing));
        }

        let count = aliases.len();
        let ide = self.state.collections.get(&key).and_then(|c| c.ide);
        self.state.collections.insert(
            key,
            Collection {
                name: display_name.to_string(),
                repos: aliases,
                updated_at: Utc::now(),
                ide,
            },
        );
        Ok(count)
    }

    pub fn remove(&mut self, display_name: &str) -> RegistryResult<()> {
        let key = name::normalize(display_name);
        self.state
            .collections
            .remove(&key)
            .map(|_| ())
            .ok_or(RegistryError::NotFound(key))
    }

    pub fn get(&self, display_name: &str) -> Option<&Collection> {
        self.state.collections.get(&name::normalize(display_name))
    }

    /// All collections sorted by display name, case-insensitive.
    pub fn list(&self) -> Vec<&Collection> {
        let mut all: Vec<&Collection> = self.state.collections.values().collect();
        all.sort_by_key(|c| c.name.to_lowercase());
        all
    }

    /// Look up every member against the current repository map. Missing
    /// members are reported, not dropped, so a caller can warn per member
    /// instead of failing the whole operation.
    pub fn resolve_members<'s>(&'s self, collection: &'s Collection) -> Vec<ResolvedMember<'s>> {
        collection
            .repos
            .iter()
            .map(|alias| ResolvedMember {
                alias: alias.as_str(),
                repo: self.state.repos.get(&name::normalize(alias)),
            })
            .collect()
    }

    pub fn set_preferred_editor(
        &mut self,
        display_name: &str,
        editor: EditorId,
    ) -> RegistryResult<()> {
        let key = name::normalize(display_name);
        let collection = self
            .state
            .collections
            .get_mut(&key)
            .ok_or(RegistryError::NotFound(key))?;
        collection.ide = Some(editor);
        collection.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::RepositoryRegistry;
    use tempfile::TempDir;

    fn state_with_repos(dir: &TempDir, aliases: &[&str]) -> StoreState {
        let mut state = StoreState::empty();
        let mut repos = RepositoryRegistry::new(&mut state);
        for alias in aliases {
            repos.add(alias, dir.path().to_str().unwrap()).unwrap();
        }
        state
    }

    #[test]
    fn upsert_deduplicates_members() {
        let dir = TempDir::new().unwrap();
        let mut state = state_with_repos(&dir, &["api", "web"]);
        let mut collections = CollectionRegistry::new(&mut state);

        let count = collections.upsert("Stack", &["api", " Api ", "web"]).unwrap();
        assert_eq!(count, 2);

        let stack = collections.get("stack").unwrap();
        assert_eq!(stack.name, "Stack");
        assert_eq!(stack.repos.len(), 2);
        assert!(stack.repos.contains(&"api".to_string()));
        assert!(stack.repos.contains(&"web".to_string()));
    }

    #[test]
    fn upsert_rejects_missing_members_without_partial_write() {
        let dir = TempDir::new().unwrap();
        let mut state = state_with_repos(&dir, &["api"]);
        let mut collections = CollectionRegistry::new(&mut state);

        let err = collections.upsert("stack", &["api", "missing"]).unwrap_err();
        match err {
            RegistryError::MissingRepositories(missing) => {
                assert_eq!(missing, vec!["missing".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(collections.get("stack").is_none());
    }

    #[test]
    fn upsert_is_full_replace_but_keeps_editor_preference() {
        let dir = TempDir::new().unwrap();
        let mut state = state_with_repos(&dir, &["api", "web", "docs"]);
        let mut collections = CollectionRegistry::new(&mut state);

        collections.upsert("stack", &["api", "web"]).unwrap();
        collections
            .set_preferred_editor("stack", EditorId::Ij)
            .unwrap();

        collections.upsert("stack", &["docs"]).unwrap();
        let stack = collections.get("stack").unwrap();
        assert_eq!(stack.repos, vec!["docs".to_string()]);
        assert_eq!(stack.ide, Some(EditorId::Ij));
    }

    #[test]
    fn remove_requires_existing_collection() {
        let mut state = StoreState::empty();
        let mut collections = CollectionRegistry::new(&mut state);
        assert!(matches!(
            collections.remove("ghost"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn resolve_members_reports_dangling_aliases() {
        let dir = TempDir::new().unwrap();
        let mut state = state_with_repos(&dir, &["api", "web"]);
        {
            let mut collections = CollectionRegistry::new(&mut state);
            collections.upsert("stack", &["api", "web"]).unwrap();
        }
        {
            let mut repos = RepositoryRegistry::new(&mut state);
            repos.remove("web").unwrap();
        }

        let collections = CollectionRegistry::new(&mut state);
        let stack = collections.get("stack").unwrap();
        let resolved = collections.resolve_members(stack);
        assert_eq!(resolved.len(), 2);
        let web = resolved.iter().find(|m| m.alias == "web").unwrap();
        assert!(web.repo.is_none());
        let api = resolved.iter().find(|m| m.alias == "api").unwrap();
        assert!(api.repo.is_some());
    }

    #[test]
    fn list_sorts_by_display_name_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let mut state = state_with_repos(&dir, &["api"]);
        let mut collections = CollectionRegistry::new(&mut state);
        for display in ["zeta", "Alpha", "beta"] {
            collections.upsert(display, &["api"]).unwrap();
        }
        let names: Vec<&str> = collections.list().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }
}

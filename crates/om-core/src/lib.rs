// crates/om-core/src/lib.rs - Registry and resolution engine for OpenMate
//
// This crate is the core of the `om` project launcher: the persisted
// registry of alias -> directory bindings, named collections of aliases,
// and the policy that decides which editor to launch for a target. It never
// prints, never exits, and never spawns processes - the CLI layers
// formatting and exit codes on top, and process spawning lives behind the
// `Launcher` trait.
//
// Module map:
// - `name`: alias normalization (the equality relation for all lookups)
// - `path`: `~` expansion, lexical normalization, write-time dir checks
// - `store`: the persisted JSON document, migration, atomic save
// - `repo`: repository CRUD
// - `collection`: collection CRUD and member resolution
// - `ide`: editor ids and selection precedence
// - `launch`: the Launcher boundary and collection fan-out
// - `suggest`: ranked suggestions for missed lookups

pub mod collection;
pub mod error;
pub mod ide;
pub mod launch;
pub mod name;
pub mod path;
pub mod repo;
pub mod store;
pub mod suggest;

pub use collection::{CollectionRegistry, ResolvedMember};
pub use error::{RegistryError, RegistryResult};
pub use ide::{resolve_editor, EditorId, PrecedenceMode};
pub use launch::{
    open_collection, open_repository, resolve_open_target, CollectionLaunchReport, LaunchError,
    Launcher, LookupHit, MemberOutcome,
};
pub use repo::RepositoryRegistry;
pub use store::{Collection, Loaded, Repository, Store, StoreState, SCHEMA_VERSION};
pub use suggest::{suggestions, Suggestions};

// crates/om-cli/src/commands/mod.rs - Command handler modules
//
// One module per command family. Handlers own all user-facing formatting
// and the exit-code policy (any Err bubbles up as exit code 1); the core
// never prints.

pub mod collection;
pub mod ide;
pub mod list;
pub mod open;
pub mod repo;

use om_core::store::StoreState;
use om_core::suggest;

/// Print ranked suggestions from both keyspaces after a missed lookup.
/// No output when nothing matches.
pub(crate) fn print_suggestions(state: &StoreState, query: &str) {
    let found = suggest::suggestions(state, query);
    if found.is_empty() {
        return;
    }
    println!("\nSuggestions:");
    if !found.repos.is_empty() {
        println!("  Repositories:  {}", found.repos.join("  "));
    }
    if !found.collections.is_empty() {
        println!("  Collections:   {}", found.collections.join("  "));
    }
    println!();
}

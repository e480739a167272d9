// crates/om-cli/src/commands/collection.rs - Collection management commands

use anyhow::{bail, Result};

use om_core::collection::CollectionRegistry;

use crate::context::Context;

/// `om add -c <name> <repo1,repo2,...>` - create or overwrite wholesale.
pub fn add(ctx: &Context, name: &str, repo_list: &str) -> Result<()> {
    let mut state = ctx.load()?;
    let members: Vec<&str> = repo_list.split(',').collect();
    let count = CollectionRegistry::new(&mut state).upsert(name, &members)?;
    ctx.save(&state)?;
    println!("✅ Added {count} repos to collection \"{name}\"");
    Ok(())
}

/// `om update -c <name> <repos>` - full replace of the member list. Unlike
/// add, the collection must already exist.
pub fn update(ctx: &Context, name: &str, repo_list: &str) -> Result<()> {
    let mut state = ctx.load()?;
    {
        let collections = CollectionRegistry::new(&mut state);
        if collections.get(name).is_none() {
            bail!("collection \"{name}\" does not exist. Use \"om add -c {name} <repos>\" first.");
        }
    }
    let members: Vec<&str> = repo_list.split(',').collect();
    let count = CollectionRegistry::new(&mut state).upsert(name, &members)?;
    ctx.save(&state)?;
    println!("🔄 Updated collection \"{name}\" ({count} repos)");
    Ok(())
}

pub fn remove(ctx: &Context, name: &str) -> Result<()> {
    let mut state = ctx.load()?;
    CollectionRegistry::new(&mut state).remove(name)?;
    ctx.save(&state)?;
    println!("🗑️  Removed collection \"{name}\"");
    Ok(())
}

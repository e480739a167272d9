// crates/om-cli/src/commands/repo.rs - Repository management commands

use anyhow::{bail, Result};
use std::env;

use om_core::error::RegistryError;
use om_core::repo::RepositoryRegistry;

use crate::commands::print_suggestions;
use crate::context::Context;

pub fn add(ctx: &Context, name: &str, raw_path: &str) -> Result<()> {
    let mut state = ctx.load()?;
    let abs = match RepositoryRegistry::new(&mut state).add(name, raw_path) {
        Ok(abs) => abs,
        Err(RegistryError::AlreadyExists(_)) => {
            bail!("\"{name}\" already exists. Use \"om update {name} <path>\" to change its path.")
        }
        Err(err) => return Err(err.into()),
    };
    ctx.save(&state)?;
    println!("✅ Added \"{name}\" -> {}", abs.display());
    Ok(())
}

pub fn update(ctx: &Context, name: &str, raw_path: &str) -> Result<()> {
    let mut state = ctx.load()?;
    let abs = match RepositoryRegistry::new(&mut state).update(name, raw_path) {
        Ok(abs) => abs,
        Err(RegistryError::NotFound(_)) => {
            bail!("\"{name}\" is not stored. Use \"om add {name} <path>\" first.")
        }
        Err(err) => return Err(err.into()),
    };
    ctx.save(&state)?;
    println!("🔄 Updated \"{name}\" -> {}", abs.display());
    Ok(())
}

pub fn remove(ctx: &Context, name: &str) -> Result<()> {
    let mut state = ctx.load()?;
    RepositoryRegistry::new(&mut state).remove(name)?;
    ctx.save(&state)?;
    println!("🗑️  Removed \"{name}\".");
    Ok(())
}

pub fn rename(ctx: &Context, old: &str, new: &str) -> Result<()> {
    let mut state = ctx.load()?;
    RepositoryRegistry::new(&mut state).rename(old, new)?;
    ctx.save(&state)?;
    println!("🔄 Renamed \"{old}\" -> \"{new}\".");
    println!("   Collections still referencing \"{old}\" will report it as missing.");
    Ok(())
}

/// `om init <alias>` - add with the current working directory as the path.
pub fn init(ctx: &Context, name: &str) -> Result<()> {
    let cwd = env::current_dir()?;
    add(ctx, name, &cwd.display().to_string())
}

/// `om path <alias>` - print the stored path only, for shell substitution.
pub fn path_of(ctx: &Context, name: &str) -> Result<()> {
    let mut state = ctx.load()?;
    let path = RepositoryRegistry::new(&mut state)
        .get(name)
        .map(|repo| repo.path.clone());
    match path {
        Some(path) => {
            println!("{path}");
            Ok(())
        }
        None => {
            print_suggestions(&state, name);
            bail!("\"{name}\" not found")
        }
    }
}

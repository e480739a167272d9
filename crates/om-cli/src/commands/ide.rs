// crates/om-cli/src/commands/ide.rs - Editor preference commands

use anyhow::{bail, Result};

use om_core::collection::CollectionRegistry;
use om_core::ide::EditorId;
use om_core::repo::RepositoryRegistry;

use crate::commands::print_suggestions;
use crate::context::Context;

/// `om ide <name> <editor>` - set the preferred editor.
///
/// The name is matched against both keyspaces and every hit is stamped (a
/// repo and a collection sharing a key both get the preference), matching
/// the reference behavior.
pub fn set(ctx: &Context, name: &str, editor_code: &str) -> Result<()> {
    let editor: EditorId = match editor_code.parse() {
        Ok(editor) => editor,
        Err(_) => bail!(
            "invalid editor id {:?}. Must be one of: {}",
            editor_code,
            EditorId::codes().join(", ")
        ),
    };

    let mut state = ctx.load()?;
    let mut stamped: Vec<&str> = Vec::new();

    {
        let mut repos = RepositoryRegistry::new(&mut state);
        if repos.get(name).is_some() {
            repos.set_preferred_editor(name, editor)?;
            stamped.push("repo");
        }
    }
    {
        let mut collections = CollectionRegistry::new(&mut state);
        if collections.get(name).is_some() {
            collections.set_preferred_editor(name, editor)?;
            stamped.push("collection");
        }
    }

    if stamped.is_empty() {
        print_suggestions(&state, name);
        bail!("\"{name}\" not found in repos or collections");
    }

    ctx.save(&state)?;
    for kind in stamped {
        println!(
            "✅ Set preferred IDE for {kind} \"{name}\" to {}",
            editor.display_name()
        );
    }
    Ok(())
}

/// `om default [<editor>] [--second] [--show]` - show or set the global
/// default editor slots. Slot 1 is the CLI's effective default; slot 2 is
/// the fallback (the desktop UI binds both to quick-action buttons).
pub fn default(ctx: &Context, editor_code: Option<&str>, second: bool, show: bool) -> Result<()> {
    let editor_code = match editor_code {
        Some(code) if !show => code,
        _ => return show_defaults(ctx),
    };

    let editor: EditorId = match editor_code.parse() {
        Ok(editor) => editor,
        Err(_) => bail!(
            "invalid editor id {:?}. Must be one of: {}",
            editor_code,
            EditorId::codes().join(", ")
        ),
    };

    let mut state = ctx.load()?;
    let slot = if second { 2 } else { 1 };
    if second {
        state.ide_default_2 = Some(editor);
    } else {
        state.ide_default_1 = Some(editor);
    }
    ctx.save(&state)?;
    println!(
        "✅ Set global default IDE (slot {slot}) to {}",
        editor.display_name()
    );
    Ok(())
}

fn show_defaults(ctx: &Context) -> Result<()> {
    let state = ctx.load()?;
    match (state.ide_default_1, state.ide_default_2) {
        (None, None) => {
            println!("No global default IDE configured.");
            println!("   Set one: om default <{}>", EditorId::codes().join("|"));
        }
        (first, second) => {
            for (slot, editor) in [(1, first), (2, second)] {
                match editor {
                    Some(editor) => {
                        println!("Slot {slot}: {} ({})", editor.display_name(), editor.code())
                    }
                    None => println!("Slot {slot}: not set"),
                }
            }
        }
    }
    Ok(())
}

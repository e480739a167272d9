// crates/om-cli/src/commands/open.rs - Launch commands
//
// Covers the explicit editor verbs (`om vs <name>`, ...) and the bare
// `om <alias> [-d]` form. Name resolution follows the core's lookup policy:
// collections shadow repositories for open-style verbs.

use anyhow::{bail, Result};

use om_core::error::RegistryError;
use om_core::ide::{resolve_editor, EditorId, PrecedenceMode};
use om_core::launch::{open_collection, open_repository, resolve_open_target, LookupHit, MemberOutcome};

use crate::commands::print_suggestions;
use crate::context::Context;
use crate::services::SystemLauncher;

/// Explicit editor verb: `om vs <name>` etc.
pub fn explicit(ctx: &Context, name: &str, editor: EditorId) -> Result<()> {
    open_target(ctx, name, Some(editor), PrecedenceMode::GlobalFirst)
}

/// Bare `om <alias> [-d]`. `-d` switches to local-first precedence (per-item
/// preference before the global default).
pub fn default_open(ctx: &Context, args: &[String]) -> Result<()> {
    let Some(name) = args.first() else {
        bail!("missing name. See `om --help`.");
    };
    if name.starts_with('-') {
        bail!("unknown option {name:?}. See `om --help`.");
    }

    let mode = if args.iter().skip(1).any(|a| a == "-d") {
        PrecedenceMode::LocalFirst
    } else {
        PrecedenceMode::GlobalFirst
    };
    open_target(ctx, name, None, mode)
}

fn open_target(
    ctx: &Context,
    name: &str,
    explicit: Option<EditorId>,
    mode: PrecedenceMode,
) -> Result<()> {
    let state = ctx.load()?;
    let launcher = SystemLauncher;

    match resolve_open_target(&state, name) {
        None => {
            print_suggestions(&state, name);
            bail!("no exact match for \"{name}\"");
        }
        Some(LookupHit::Collection(collection)) => {
            let editor = resolve_editor(explicit, collection.ide, state.effective_default(), mode)
                .ok_or_else(|| no_editor_error(name))?;

            println!(
                "Opening collection \"{}\" ({} repos) in {}",
                collection.name,
                collection.repos.len(),
                editor.display_name()
            );

            // Every member is attempted; failures are reported per member
            // and never abort the rest.
            let report = open_collection(&launcher, &state, collection, editor);
            for outcome in &report.outcomes {
                match outcome {
                    MemberOutcome::Launched { alias, path } => {
                        println!("  ✅ {alias} ({path})");
                    }
                    MemberOutcome::NotRegistered { alias } => {
                        eprintln!("  ❌ {alias}: repository not found");
                    }
                    MemberOutcome::PathMissing { alias, path } => {
                        eprintln!("  ❌ {alias}: path \"{path}\" no longer exists");
                    }
                    MemberOutcome::Failed { alias, cause } => {
                        eprintln!("  ❌ {alias}: {cause}");
                    }
                }
            }
            if report.failures() > 0 {
                eprintln!(
                    "⚠️  {} of {} members failed to open.",
                    report.failures(),
                    report.outcomes.len()
                );
            }
            Ok(())
        }
        Some(LookupHit::Repository(repo)) => {
            let editor = resolve_editor(explicit, repo.ide, state.effective_default(), mode)
                .ok_or_else(|| no_editor_error(name))?;

            open_repository(&launcher, name, repo, editor)?;
            println!("🚀 Opening \"{name}\" in {}...", editor.display_name());
            Ok(())
        }
    }
}

fn no_editor_error(name: &str) -> anyhow::Error {
    let codes = EditorId::codes().join("|");
    anyhow::Error::new(RegistryError::NoPreferredEditor(name.to_string())).context(format!(
        "\"{name}\" is valid, but no preferred IDE is set.\n   \
         To set one: om ide {name} <{codes}>\n   \
         Or a global default: om default <{codes}>\n   \
         Or use an explicit command: om vs {name}"
    ))
}

// crates/om-cli/src/main.rs - CLI entry point
//
// Thin command router: parse arguments, build the context, dispatch to a
// handler. All registry semantics live in om-core; this layer owns
// user-facing formatting and exit codes (0 on success, 1 on any failure).

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod context;
mod services;

use cli::{Cli, Commands};
use context::Context;
use om_core::ide::EditorId;

fn main() -> Result<()> {
    // Logging is off unless OM_LOG is set (e.g. OM_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("OM_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::new(cli.store.clone())?;

    match cli.command {
        Commands::Add {
            collection,
            name,
            value,
        } => {
            if collection {
                commands::collection::add(&ctx, &name, &value)
            } else {
                commands::repo::add(&ctx, &name, &value)
            }
        }
        Commands::Update {
            collection,
            name,
            value,
        } => {
            if collection {
                commands::collection::update(&ctx, &name, &value)
            } else {
                commands::repo::update(&ctx, &name, &value)
            }
        }
        Commands::Remove { collection, name } => {
            if collection {
                commands::collection::remove(&ctx, &name)
            } else {
                commands::repo::remove(&ctx, &name)
            }
        }
        Commands::Rename { old, new } => commands::repo::rename(&ctx, &old, &new),
        Commands::Init { name } => commands::repo::init(&ctx, &name),
        Commands::List {
            repos_only,
            collections_only,
            json,
            name,
        } => commands::list::handle(&ctx, repos_only, collections_only, json, name),
        Commands::Path { name } => commands::repo::path_of(&ctx, &name),
        Commands::Ide { name, editor } => commands::ide::set(&ctx, &name, &editor),
        Commands::Default {
            editor,
            second,
            show,
        } => commands::ide::default(&ctx, editor.as_deref(), second, show),
        Commands::Vs { name } => commands::open::explicit(&ctx, &name, EditorId::Vs),
        Commands::Ws { name } => commands::open::explicit(&ctx, &name, EditorId::Ws),
        Commands::Cs { name } => commands::open::explicit(&ctx, &name, EditorId::Cs),
        Commands::Ij { name } => commands::open::explicit(&ctx, &name, EditorId::Ij),
        Commands::Pc { name } => commands::open::explicit(&ctx, &name, EditorId::Pc),
        Commands::Ag { name } => commands::open::explicit(&ctx, &name, EditorId::Ag),
        Commands::Open(args) => commands::open::default_open(&ctx, &args),
    }
}

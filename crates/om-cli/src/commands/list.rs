// crates/om-cli/src/commands/list.rs - Listing commands
//
// Table output is a user-facing contract: deterministic, case-insensitive
// ordering for the same input set.

use anyhow::{bail, Result};
use console::style;

use om_core::collection::CollectionRegistry;
use om_core::repo::RepositoryRegistry;
use om_core::store::StoreState;

use crate::context::Context;

pub fn handle(
    ctx: &Context,
    repos_only: bool,
    collections_only: bool,
    json: bool,
    name: Option<String>,
) -> Result<()> {
    let mut state = ctx.load()?;

    if let Some(name) = name {
        if !repos_only && !collections_only {
            return show_collection(&mut state, &name);
        }
    }

    let show_repos = !collections_only;
    let show_collections = !repos_only;

    if json {
        return render_json(&mut state, show_repos, show_collections);
    }

    if show_repos {
        render_repos(&mut state);
        if show_collections && !state.repos.is_empty() {
            println!();
        }
    }
    if show_collections {
        render_collections(&mut state, show_repos);
    }
    Ok(())
}

/// `om list <collection>` - one collection's members with per-member
/// path-or-missing, so a dangling member warns instead of hiding.
fn show_collection(state: &mut StoreState, name: &str) -> Result<()> {
    let collections = CollectionRegistry::new(state);
    let Some(collection) = collections.get(name) else {
        let available: Vec<String> = collections
            .list()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        if available.is_empty() {
            println!("No collections available.");
        } else {
            println!("Available collections:");
            for (i, display) in available.iter().enumerate() {
                println!("  {}. {display}", i + 1);
            }
        }
        bail!("collection \"{name}\" not found");
    };

    println!(
        "\nCollection: {} ({} repos)\n",
        collection.name,
        collection.repos.len()
    );

    let rows: Vec<Vec<String>> = collections
        .resolve_members(collection)
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let (path, ide) = match member.repo {
                Some(repo) => (
                    repo.path.clone(),
                    repo.ide.map(|e| e.code().to_uppercase()).unwrap_or_default(),
                ),
                None => ("❌ repository not found".to_string(), String::new()),
            };
            vec![(i + 1).to_string(), member.alias.to_string(), path, ide]
        })
        .collect();
    render_table(&["#", "Name", "Repo Path", "IDE"], &rows);
    Ok(())
}

fn render_repos(state: &mut StoreState) {
    let repos = RepositoryRegistry::new(state);
    let listed = repos.list();
    if listed.is_empty() {
        println!("No repositories found.");
        return;
    }

    println!("Stored repos:");
    let rows: Vec<Vec<String>> = listed
        .iter()
        .enumerate()
        .map(|(i, (alias, repo))| {
            vec![
                (i + 1).to_string(),
                alias.to_string(),
                repo.path.clone(),
                repo.ide.map(|e| e.code().to_uppercase()).unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&["#", "Name", "Repo Path", "IDE"], &rows);
}

fn render_collections(state: &mut StoreState, showing_repos_too: bool) {
    let collections = CollectionRegistry::new(state);
    let listed = collections.list();
    if listed.is_empty() {
        if showing_repos_too {
            println!("No collections found.");
        } else {
            println!("No collections found. Use 'om list -r' to see repositories.");
        }
        return;
    }

    println!("Stored collections:");
    let rows: Vec<Vec<String>> = listed
        .iter()
        .enumerate()
        .map(|(i, collection)| {
            let mut members = collection.repos.clone();
            members.sort();
            vec![
                (i + 1).to_string(),
                collection.name.clone(),
                collection.repos.len().to_string(),
                collection
                    .ide
                    .map(|e| e.code().to_uppercase())
                    .unwrap_or_default(),
                members.join(", "),
            ]
        })
        .collect();
    render_table(&["#", "Name", "Repos", "IDE", "Repository Names"], &rows);
}

/// Machine-readable output for scripting, same shape both surfaces share.
fn render_json(state: &mut StoreState, show_repos: bool, show_collections: bool) -> Result<()> {
    let mut doc = serde_json::Map::new();
    if show_repos {
        let repos: Vec<_> = RepositoryRegistry::new(state)
            .list()
            .into_iter()
            .map(|(alias, repo)| {
                serde_json::json!({
                    "alias": alias,
                    "path": repo.path,
                    "updatedAt": repo.updated_at,
                    "ide": repo.ide,
                })
            })
            .collect();
        doc.insert("repos".to_string(), serde_json::Value::Array(repos));
    }
    if show_collections {
        let collections: Vec<_> = CollectionRegistry::new(state)
            .list()
            .into_iter()
            .map(|collection| {
                serde_json::json!({
                    "name": collection.name,
                    "repos": collection.repos,
                    "updatedAt": collection.updated_at,
                    "ide": collection.ide,
                })
            })
            .collect();
        doc.insert(
            "collections".to_string(),
            serde_json::Value::Array(collections),
        );
    }
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Minimal column-aligned table. Headers are styled only when stdout is a
/// terminal, so piped output stays plain.
fn render_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let tty = atty::is(atty::Stream::Stdout);
    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let padded = format!("{:w$}", h, w = widths[i]);
            if tty {
                style(padded).cyan().bold().to_string()
            } else {
                padded
            }
        })
        .collect();
    println!("  {}", header_line.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:w$}", cell, w = widths[i]))
            .collect();
        println!("  {}", cells.join("  "));
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "om")]
#[command(about = "Map project aliases to directories and open them in your editor")]
#[command(version)]
pub struct Cli {
    /// Store directory (overrides the OM_STORE environment variable)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
///
/// Repositories and collections share the mutation verbs; the `-c` flag
/// selects the collection keyspace. A bare `om <alias>` (the external
/// subcommand fallback) opens the alias with the resolved default editor.
#[derive(Subcommand)]
pub enum Commands {
    /// Add a repository (or a collection with -c)
    Add {
        /// Operate on the collection keyspace
        #[arg(short = 'c', long = "collection")]
        collection: bool,

        /// Alias for the repository (or collection name with -c)
        name: String,

        /// Directory path (or comma-separated repo aliases with -c)
        value: String,
    },

    /// Update a repository's path (or replace a collection's members with -c)
    Update {
        /// Operate on the collection keyspace
        #[arg(short = 'c', long = "collection")]
        collection: bool,

        /// Alias of the repository (or collection name with -c)
        name: String,

        /// New directory path (or comma-separated repo aliases with -c)
        value: String,
    },

    /// Remove a repository (or a collection with -c)
    Remove {
        /// Operate on the collection keyspace
        #[arg(short = 'c', long = "collection")]
        collection: bool,

        /// Alias to remove
        name: String,
    },

    /// Rename a repository alias (collections keep the old member name)
    Rename {
        /// Current alias
        old: String,

        /// New alias
        new: String,
    },

    /// Register the current directory under an alias
    Init {
        /// Alias for the current directory
        name: String,
    },

    /// List repositories and collections
    List {
        /// Only list repositories
        #[arg(short = 'r', long = "repos-only")]
        repos_only: bool,

        /// Only list collections
        #[arg(short = 'c', long = "collections-only")]
        collections_only: bool,

        /// Output as JSON for machine processing
        #[arg(long)]
        json: bool,

        /// Show the members of one collection
        name: Option<String>,
    },

    /// Print the stored path of a repository
    Path {
        /// Alias to look up
        name: String,
    },

    /// Set the preferred editor for a repository and/or collection
    Ide {
        /// Alias (matched against both keyspaces)
        name: String,

        /// Editor id: vs, ws, cs, ij, pc, ag
        editor: String,
    },

    /// Show or set the global default editor slots
    Default {
        /// Editor id to store; omit to show the configured defaults
        editor: Option<String>,

        /// Set the second slot instead of the first
        #[arg(long)]
        second: bool,

        /// Print the configured defaults
        #[arg(long, conflicts_with = "editor")]
        show: bool,
    },

    /// Open in VS Code
    Vs { name: String },

    /// Open in Windsurf
    Ws { name: String },

    /// Open in Cursor
    Cs { name: String },

    /// Open in IntelliJ IDEA
    Ij { name: String },

    /// Open in PyCharm
    Pc { name: String },

    /// Open in Antigravity
    Ag { name: String },

    /// `om <alias> [-d]` - open via the resolved default editor
    /// (-d prefers the per-item editor over the global default)
    #[command(external_subcommand)]
    Open(Vec<String>),
}

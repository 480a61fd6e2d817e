//! Favmark CLI - favorites tracking for directory trees
//!
//! Usage: favmark <COMMAND>
//!
//! Commands:
//!   list    Show favorited paths
//!   toggle  Flip favorite status for a path
//!   remove  Remove a path from favorites
//!   style   Show or change the marker style
//!   tree    Print a directory tree with favorite markers
//!   watch   Watch a directory and keep favorites consistent

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use is_terminal::IsTerminal;

use favmark::{
    watch, Engine, FavmarkError, HostTree, JsonFileStorage, MemTree, MutationEvent, NodeId,
    NodeKind, Platform, StyleConfig, WatchEvent, WatchOptions, KNOWN_ICONS,
};

/// Favmark - favorites tracking and tree decoration
#[derive(Parser, Debug)]
#[command(name = "favmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the favorites data file
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show favorited paths
    List,

    /// Flip favorite status for a path
    Toggle {
        /// Path identifier to toggle
        path: String,
    },

    /// Remove a path from favorites
    Remove {
        /// Path identifier to remove
        path: String,
    },

    /// Show or change the marker style
    Style {
        /// Marker icon name
        #[arg(long)]
        icon: Option<String>,

        /// Render favorited markers filled
        #[arg(long, conflicts_with = "outline")]
        filled: bool,

        /// Render favorited markers outlined
        #[arg(long)]
        outline: bool,
    },

    /// Print a directory tree with favorite markers
    Tree {
        /// Directory to render
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Depth beyond which containers start collapsed
        #[arg(long, default_value = "2")]
        depth: usize,
    },

    /// Watch a directory and keep favorites consistent
    Watch {
        /// Directory to watch
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output as NDJSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_path = match &cli.data {
        Some(path) => path.clone(),
        None => default_data_path()?,
    };
    let storage = JsonFileStorage::new(data_path);

    match cli.command {
        Commands::List => cmd_list(storage),
        Commands::Toggle { path } => cmd_toggle(storage, &path),
        Commands::Remove { path } => cmd_remove(storage, &path),
        Commands::Style {
            icon,
            filled,
            outline,
        } => cmd_style(storage, icon, filled, outline),
        Commands::Tree { dir, depth } => cmd_tree(storage, &dir, depth),
        Commands::Watch { dir, json } => cmd_watch(storage, &dir, json),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("favmark={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn default_data_path() -> Result<PathBuf> {
    let config = dirs::config_dir().context("could not determine config directory")?;
    Ok(config.join("favmark").join("favorites.json"))
}

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

/// Terminal glyph for an icon name
fn glyph(icon: &str, filled: bool) -> &'static str {
    match (icon, filled) {
        ("star", true) => "\u{2605}",
        ("star", false) => "\u{2606}",
        ("heart", true) => "\u{2665}",
        ("heart", false) => "\u{2661}",
        ("flag", true) => "\u{2691}",
        ("flag", false) => "\u{2690}",
        (_, true) => "\u{25cf}",
        (_, false) => "\u{25cb}",
    }
}

fn cmd_list(storage: JsonFileStorage) -> Result<()> {
    let engine = Engine::new(Platform::Dense, Box::new(storage));
    let store = engine.store();

    if store.is_empty() {
        println!("No favorites yet. Add one with 'favmark toggle <path>'.");
        return Ok(());
    }

    let mark = glyph(&store.style().icon, store.style().filled);
    for path in store.favorites_sorted() {
        if use_color() {
            println!("{} {}", mark.yellow(), path);
        } else {
            println!("{mark} {path}");
        }
    }
    Ok(())
}

fn cmd_toggle(storage: JsonFileStorage, path: &str) -> Result<()> {
    let mut engine = Engine::new(Platform::Dense, Box::new(storage));
    if engine.toggle(path) {
        println!("Added '{path}' to favorites");
    } else {
        println!("Removed '{path}' from favorites");
    }
    Ok(())
}

fn cmd_remove(storage: JsonFileStorage, path: &str) -> Result<()> {
    let mut engine = Engine::new(Platform::Dense, Box::new(storage));
    if !engine.store().is_favorite(path) {
        println!("'{path}' is not a favorite");
        return Ok(());
    }
    engine.remove(path);
    println!("Removed '{path}' from favorites");
    Ok(())
}

fn cmd_style(
    storage: JsonFileStorage,
    icon: Option<String>,
    filled: bool,
    outline: bool,
) -> Result<()> {
    let mut engine = Engine::new(Platform::Dense, Box::new(storage));

    if icon.is_none() && !filled && !outline {
        let style = engine.store().style();
        println!(
            "icon: {} ({})",
            style.icon,
            if style.filled { "filled" } else { "outline" }
        );
        println!("available icons: {}", KNOWN_ICONS.join(", "));
        return Ok(());
    }

    let current = engine.store().style().clone();
    let icon = match icon {
        Some(name) => {
            if !favmark::models::is_known_icon(&name) {
                bail!(FavmarkError::InvalidIcon { name });
            }
            name
        }
        None => current.icon,
    };
    let filled = if filled {
        true
    } else if outline {
        false
    } else {
        current.filled
    };

    // No live tree in the CLI; the style still persists for every host.
    let mut scratch = MemTree::new();
    engine.set_style(&mut scratch, StyleConfig { icon, filled });

    let style = engine.store().style();
    println!(
        "style set: {} ({})",
        style.icon,
        if style.filled { "filled" } else { "outline" }
    );
    Ok(())
}

/// Materialize a directory as a dense host tree.
///
/// Containers deeper than `depth` start collapsed, which keeps the printed
/// tree bounded and exercises the one-shot expand path the same way a real
/// explorer would.
fn build_tree_from_dir(root_dir: &Path, depth: usize) -> Result<MemTree> {
    let mut tree = MemTree::new();
    let root = tree.add_root("");
    populate(&mut tree, root, root_dir, root_dir, 0, depth)?;
    Ok(tree)
}

fn populate(
    tree: &mut MemTree,
    parent: NodeId,
    root_dir: &Path,
    dir: &Path,
    level: usize,
    depth: usize,
) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let id = path
            .strip_prefix(root_dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");

        if path.is_dir() {
            let collapsed = level + 1 >= depth;
            let node = tree.add_container(parent, id, collapsed);
            populate(tree, node, root_dir, &path, level + 1, depth)?;
        } else {
            tree.add_item(parent, id);
        }
    }
    Ok(())
}

fn cmd_tree(storage: JsonFileStorage, dir: &Path, depth: usize) -> Result<()> {
    let mut tree = build_tree_from_dir(dir, depth.max(1))?;
    let mut engine = Engine::new(Platform::Dense, Box::new(storage));

    engine.activate(&mut tree);
    engine.run_deferred(&mut tree, Instant::now() + Duration::from_secs(1));

    let root = tree.root().context("directory produced no tree")?;
    println!("{}", dir.display());
    print_subtree(&tree, root, 1);

    engine.deactivate(&mut tree);
    Ok(())
}

fn print_subtree(tree: &MemTree, container: NodeId, indent: usize) {
    let pad = "  ".repeat(indent);
    for child in tree.children(container) {
        let name = tree
            .path(child)
            .map(|p| basename(&p))
            .unwrap_or_default();

        match tree.kind(child) {
            Some(NodeKind::Container) => {
                if tree.is_collapsed(child) {
                    println!("{pad}{name}/ (collapsed)");
                } else {
                    println!("{pad}{name}/");
                    print_subtree(tree, child, indent + 1);
                }
            }
            Some(NodeKind::Item) => {
                let mark = tree
                    .marker(child)
                    .filter(|m| m.favorited)
                    .map(|m| glyph(&m.icon, m.filled))
                    .unwrap_or(" ");
                if use_color() && mark != " " {
                    println!("{pad}{} {name}", mark.yellow());
                } else {
                    println!("{pad}{mark} {name}");
                }
            }
            None => {}
        }
    }
}

fn basename(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

fn cmd_watch(storage: JsonFileStorage, dir: &Path, json: bool) -> Result<()> {
    let mut tree = build_tree_from_dir(dir, usize::MAX)?;
    let mut engine = Engine::new(Platform::Dense, Box::new(storage));

    engine.activate(&mut tree);
    engine.run_deferred(&mut tree, Instant::now() + Duration::from_secs(1));

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let options = WatchOptions {
        root: dir.to_path_buf(),
        json,
    };

    // The watch loop calls back from this thread only; the engine and tree
    // live behind one lock so the closure stays Fn.
    let shared = std::sync::Mutex::new((engine, tree));

    watch(options, running, |event| {
        if let WatchEvent::Mutation(mutation) = &event {
            let mut guard = shared.lock().unwrap();
            let (engine, tree) = &mut *guard;
            engine.handle_event(tree, mutation);
            engine.run_deferred(tree, Instant::now() + Duration::from_secs(1));
        }
        report(&event, json);
    })?;

    Ok(())
}

fn report(event: &WatchEvent, json: bool) {
    if json {
        println!("{}", event.to_json());
        return;
    }
    match event {
        WatchEvent::Started { root } => println!("Watching {root} (Ctrl+C to stop)"),
        WatchEvent::Mutation(MutationEvent::Create(path)) => println!("created  {path}"),
        WatchEvent::Mutation(MutationEvent::Delete(path)) => println!("deleted  {path}"),
        WatchEvent::Mutation(MutationEvent::Rename { from, to }) => {
            println!("renamed  {from} -> {to}")
        }
        WatchEvent::Shutdown => println!("Stopped"),
    }
}

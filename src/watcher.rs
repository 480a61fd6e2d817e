//! Filesystem mutation source for the watch command
//!
//! Bridges `notify` events into `MutationEvent`s with:
//! - Debouncing (100ms)
//! - NDJSON output for scripts
//! - Graceful Ctrl+C shutdown via a shared flag

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::FavmarkResult;
use crate::events::MutationEvent;

/// Debounce duration in milliseconds
const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Root directory whose subtree is watched
    pub root: PathBuf,
    /// Output as NDJSON
    pub json: bool,
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone)]
pub enum WatchEvent {
    Started { root: String },
    Mutation(MutationEvent),
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        match self {
            WatchEvent::Started { root } => {
                format!(r#"{{"event":"started","root":"{}"}}"#, escape(root))
            }
            WatchEvent::Mutation(MutationEvent::Rename { from, to }) => format!(
                r#"{{"event":"rename","from":"{}","to":"{}"}}"#,
                escape(from),
                escape(to)
            ),
            WatchEvent::Mutation(m) => {
                let path = match m {
                    MutationEvent::Create(p) | MutationEvent::Delete(p) => p,
                    MutationEvent::Rename { .. } => unreachable!(),
                };
                format!(r#"{{"event":"{}","path":"{}"}}"#, m.kind(), escape(path))
            }
            WatchEvent::Shutdown => r#"{"event":"shutdown"}"#.to_string(),
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Watcher state for debouncing
struct WatcherState {
    pending: Vec<MutationEvent>,
    last_change: Option<Instant>,
}

impl WatcherState {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
            last_change: None,
        }
    }

    fn add(&mut self, event: MutationEvent) {
        // Coalesce duplicates delivered by the platform backend.
        if self.pending.last() != Some(&event) {
            self.pending.push(event);
        }
        self.last_change = Some(Instant::now());
    }

    fn should_flush(&self) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending.is_empty() && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    fn take(&mut self) -> Vec<MutationEvent> {
        self.last_change = None;
        std::mem::take(&mut self.pending)
    }
}

/// Path identifier relative to the watch root, forward slashes
fn relative_id(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn is_hidden(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

/// Translate one notify event.
///
/// Unpaired rename halves degrade to delete/create; only a paired rename
/// (both paths in one event) becomes `Rename`.
fn translate(root: &Path, event: &Event) -> Vec<MutationEvent> {
    use notify::event::{ModifyKind, RenameMode};

    let ids: Vec<String> = event
        .paths
        .iter()
        .filter(|p| !is_hidden(root, p))
        .map(|p| relative_id(root, p))
        .collect();
    if ids.is_empty() {
        return Vec::new();
    }

    match &event.kind {
        EventKind::Create(_) => ids.into_iter().map(MutationEvent::Create).collect(),
        EventKind::Remove(_) => ids.into_iter().map(MutationEvent::Delete).collect(),
        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::Both if ids.len() == 2 => {
                let mut ids = ids.into_iter();
                let from = ids.next().unwrap();
                let to = ids.next().unwrap();
                vec![MutationEvent::Rename { from, to }]
            }
            RenameMode::From => ids.into_iter().map(MutationEvent::Delete).collect(),
            RenameMode::To => ids.into_iter().map(MutationEvent::Create).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Watch `options.root` until `running` clears.
///
/// Every debounced mutation is passed to `callback` wrapped in
/// `WatchEvent::Mutation`; the consumer decides how to feed its engine.
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    callback: impl Fn(WatchEvent),
) -> FavmarkResult<()> {
    callback(WatchEvent::Started {
        root: options.root.display().to_string(),
    });

    let (tx, rx) = channel();
    let root = options.root.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for mutation in translate(&root, &event) {
                    let _ = tx.send(mutation);
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?;

    watcher
        .watch(&options.root, RecursiveMode::Recursive)
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let mut state = WatcherState::new();

    while running.load(Ordering::SeqCst) {
        if let Ok(mutation) = rx.recv_timeout(Duration::from_millis(50)) {
            state.add(mutation);
        }

        if state.should_flush() {
            for mutation in state.take() {
                callback(WatchEvent::Mutation(mutation));
            }
        }
    }

    callback(WatchEvent::Shutdown);
    Ok(())
}

//! File system watcher for workspace changes.
//!
//! Converts notify events into [`WorkspaceEvent`]s for documents and delivers
//! them through an unbounded tokio channel.

use notegraph_core::{Error, Result, WorkspaceConfig, is_hidden};
use notify::event::{ModifyKind, RenameMode};
use notify::{
    Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// File system event types relevant to the link graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    /// A file was created
    FileCreated(PathBuf),
    /// A file was modified
    FileModified(PathBuf),
    /// A file was deleted
    FileDeleted(PathBuf),
    /// A file was renamed (from, to)
    FileRenamed(PathBuf, PathBuf),
}

impl WorkspaceEvent {
    /// Get the primary path affected by this event
    pub fn path(&self) -> &Path {
        match self {
            Self::FileCreated(p)
            | Self::FileModified(p)
            | Self::FileDeleted(p)
            | Self::FileRenamed(_, p) => p,
        }
    }
}

/// Which events the watcher passes on
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Watch recursively
    pub recursive: bool,
    /// Ignore hidden files (starting with .)
    pub ignore_hidden: bool,
    /// Document extensions, without the leading dot
    pub file_types: HashSet<String>,
    /// Path components whose contents are never reported
    pub excluded_paths: HashSet<String>,
}

impl From<&WorkspaceConfig> for WatcherConfig {
    fn from(config: &WorkspaceConfig) -> Self {
        Self {
            recursive: true,
            ignore_hidden: config.ignore_hidden,
            file_types: config.file_types.clone(),
            excluded_paths: config.excluded_paths.clone(),
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self::from(&WorkspaceConfig::default())
    }
}

impl WatcherConfig {
    fn accepts(&self, path: &Path) -> bool {
        if self.ignore_hidden && is_hidden(path) {
            return false;
        }

        if path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|c| self.excluded_paths.contains(c))
        {
            return false;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.file_types.iter().any(|t| t.eq_ignore_ascii_case(ext)))
    }
}

/// Watches a workspace root for document changes
pub struct WorkspaceWatcher {
    config: WatcherConfig,
    watch_path: PathBuf,
    watcher: Option<RecommendedWatcher>,
    event_tx: UnboundedSender<WorkspaceEvent>,
}

impl WorkspaceWatcher {
    /// Create a watcher and the receiving end of its event channel
    pub fn new(path: PathBuf, config: WatcherConfig) -> (Self, UnboundedReceiver<WorkspaceEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let watcher = Self {
            config,
            watch_path: path,
            watcher: None,
            event_tx,
        };

        (watcher, event_rx)
    }

    /// Start watching the workspace root
    pub fn start(&mut self) -> Result<()> {
        if self.watcher.is_some() {
            return Err(Error::other("Watcher already started"));
        }

        let event_tx = self.event_tx.clone();
        let config = self.config.clone();

        let mut notify_watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for workspace_event in convert_event(event) {
                        if !should_emit_event(&workspace_event, &config) {
                            continue;
                        }
                        // Receiver might be dropped
                        let _ = event_tx.send(workspace_event);
                    }
                }
                Err(e) => log::warn!("Watch error: {}", e),
            },
            Config::default(),
        )
        .map_err(|e| Error::io(std::io::Error::other(e)))?;

        let mode = if self.config.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        notify_watcher
            .watch(&self.watch_path, mode)
            .map_err(|e| Error::io(std::io::Error::other(e)))?;

        log::info!("Watching {}", self.watch_path.display());
        self.watcher = Some(notify_watcher);
        Ok(())
    }

    /// Stop watching; dropping the notify watcher unregisters it
    pub fn stop(&mut self) {
        self.watcher = None;
    }

    pub fn is_running(&self) -> bool {
        self.watcher.is_some()
    }
}

/// Translate one notify event into zero or more workspace events
fn convert_event(event: Event) -> Vec<WorkspaceEvent> {
    match event.kind {
        EventKind::Create(_) => event
            .paths
            .into_iter()
            .map(WorkspaceEvent::FileCreated)
            .collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() == 2 => {
            let mut paths = event.paths.into_iter();
            match (paths.next(), paths.next()) {
                (Some(from), Some(to)) => vec![WorkspaceEvent::FileRenamed(from, to)],
                _ => Vec::new(),
            }
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => event
            .paths
            .into_iter()
            .map(WorkspaceEvent::FileDeleted)
            .collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => event
            .paths
            .into_iter()
            .map(WorkspaceEvent::FileCreated)
            .collect(),
        // Generic events are treated as modifications
        EventKind::Modify(_) | EventKind::Any => event
            .paths
            .into_iter()
            .map(WorkspaceEvent::FileModified)
            .collect(),
        EventKind::Remove(_) => event
            .paths
            .into_iter()
            .map(WorkspaceEvent::FileDeleted)
            .collect(),
        EventKind::Access(_) | EventKind::Other => Vec::new(),
    }
}

fn should_emit_event(event: &WorkspaceEvent, config: &WatcherConfig) -> bool {
    match event {
        // A rename out of the document set still has to drop the old node
        WorkspaceEvent::FileRenamed(from, to) => config.accepts(from) || config.accepts(to),
        other => config.accepts(other.path()),
    }
}

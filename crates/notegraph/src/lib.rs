//! # notegraph
//!
//! Incrementally maintained link graph for a directory of markdown notes.
//!
//! This crate bundles the workspace crates and the command line rendering.

pub mod output;

pub use notegraph_core::prelude::*;
pub use notegraph_graph::{GraphStats, IdentityTable, LinkGraph};
pub use notegraph_workspace::{
    DirectoryWalker, SharedGraph, WalkSummary, WatcherConfig, Workspace, WorkspaceEvent,
    WorkspaceWatcher,
};
pub use output::{OutputFormat, render_graph};

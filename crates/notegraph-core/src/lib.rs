//! # notegraph core
//!
//! Core data models, error types, and configuration shared by every
//! notegraph crate.
//!
//! ## Architecture Principles
//!
//! - **Type-Driven Design**: [`NodeId`] is a newtype derived from a path
//! - **Zero Panic in Libraries**: All errors are `Result<T, Error>`
//! - **Builder Pattern for Configuration**: [`WorkspaceConfig::builder`]
//!
//! ## Core Modules
//!
//! - [`models`] - Graph data types (Node, Edge, GraphSnapshot)
//! - [`error`] - Error types and Result alias
//! - [`config`] - Workspace configuration
//! - [`utils`] - Path normalization and serialization helpers
//!
//! ## Usage
//!
//! ```
//! use notegraph_core::prelude::*;
//! use std::path::Path;
//!
//! let node = Node::new("/ws/a.md", "Alpha");
//! assert_eq!(node.id, NodeId::from_path(Path::new("/ws/a.md")));
//!
//! let edge = Edge::between(Path::new("/ws/a.md"), Path::new("/ws/b.md"));
//! assert_eq!(edge.source, node.id);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use utils::{canonical_path, file_name_aliases, is_hidden, normalize_path, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{WorkspaceConfig, WorkspaceConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Edge, GraphSnapshot, Node, NodeId};
    pub use crate::utils::{canonical_path, normalize_path};
}

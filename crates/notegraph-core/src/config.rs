//! Configuration types for a notegraph workspace.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use crate::utils::canonical_path;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default maximum title length, in characters
pub const DEFAULT_TITLE_MAX_LENGTH: usize = 60;

/// Default maximum document size, in bytes
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Configuration for a single workspace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Workspace root directory; root-relative links (`/x.md`) join onto it
    pub root: PathBuf,
    /// File extensions treated as documents, without the leading dot
    pub file_types: HashSet<String>,
    /// Titles longer than this are truncated (in characters)
    pub title_max_length: usize,
    /// Path components that exclude everything beneath them
    pub excluded_paths: HashSet<String>,
    /// Documents larger than this are not indexed
    pub max_file_size: u64,
    /// Skip files whose name starts with `.`
    pub ignore_hidden: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            file_types: ["md"].iter().map(|s| s.to_string()).collect(),
            title_max_length: DEFAULT_TITLE_MAX_LENGTH,
            excluded_paths: [".git", ".obsidian", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            ignore_hidden: true,
        }
    }
}

impl WorkspaceConfig {
    /// Create a new workspace config with builder
    pub fn builder(root: impl Into<PathBuf>) -> WorkspaceConfigBuilder {
        WorkspaceConfigBuilder::new(root)
    }

    /// Validate the workspace configuration
    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(Error::config_error(format!(
                "Workspace root does not exist: {}",
                self.root.display()
            )));
        }

        if !self.root.is_dir() {
            return Err(Error::config_error(format!(
                "Workspace root is not a directory: {}",
                self.root.display()
            )));
        }

        if self.file_types.is_empty() {
            return Err(Error::config_error(
                "At least one document file type must be configured",
            ));
        }

        if self.title_max_length == 0 {
            return Err(Error::config_error("title_max_length must be positive"));
        }

        Ok(())
    }

    /// Make `root` absolute and lexically normalized so document paths
    /// discovered under it are canonical
    pub fn canonicalize_root(&mut self) -> Result<()> {
        self.root = canonical_path(&self.root)?;
        Ok(())
    }

    /// Whether `path` has one of the configured document extensions
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.file_types
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(ext))
            })
    }

    /// Replace the document extensions; leading dots are stripped
    pub fn set_file_types<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_types = normalize_file_types(types.into_iter().map(Into::into));
    }

    /// Load configuration from a YAML file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to load configuration from {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: WorkspaceConfig = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid workspace configuration: {}", e)))?;
        config.file_types = normalize_file_types(config.file_types);

        log::debug!("Loaded workspace configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, yaml).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to save configuration to {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Strip leading dots so `.md` and `md` are the same file type
fn normalize_file_types(types: impl IntoIterator<Item = String>) -> HashSet<String> {
    types
        .into_iter()
        .map(|t| t.trim_start_matches('.').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Builder for WorkspaceConfig
pub struct WorkspaceConfigBuilder {
    config: WorkspaceConfig,
}

impl WorkspaceConfigBuilder {
    /// Create a new builder
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config: WorkspaceConfig {
                root: root.into(),
                ..Default::default()
            },
        }
    }

    /// Replace the set of document extensions
    pub fn file_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_file_types(types);
        self
    }

    /// Set title_max_length
    pub fn title_max_length(mut self, max: usize) -> Self {
        self.config.title_max_length = max;
        self
    }

    /// Add an excluded path component
    pub fn exclude(mut self, component: impl Into<String>) -> Self {
        self.config.excluded_paths.insert(component.into());
        self
    }

    /// Set max_file_size
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size = bytes;
        self
    }

    /// Set ignore_hidden
    pub fn ignore_hidden(mut self, ignore: bool) -> Self {
        self.config.ignore_hidden = ignore;
        self
    }

    /// Canonicalize the root, then validate
    pub fn build(mut self) -> Result<WorkspaceConfig> {
        self.config.canonicalize_root()?;
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_workspace_config_builder() {
        let temp = TempDir::new().unwrap();
        let config = WorkspaceConfig::builder(temp.path())
            .file_types([".md", "markdown"])
            .title_max_length(30)
            .build()
            .unwrap();

        assert_eq!(config.root, temp.path());
        assert!(config.file_types.contains("md"));
        assert!(config.file_types.contains("markdown"));
        assert_eq!(config.title_max_length, 30);
    }

    #[test]
    fn test_builder_canonicalizes_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let config = WorkspaceConfig::builder(temp.path().join("sub/./.."))
            .build()
            .unwrap();
        assert_eq!(config.root, temp.path());
    }

    #[test]
    fn test_validation_rejects_missing_root() {
        let result = WorkspaceConfig::builder("/definitely/not/a/real/dir").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_empty_file_types() {
        let temp = TempDir::new().unwrap();
        let result = WorkspaceConfig::builder(temp.path())
            .file_types(Vec::<String>::new())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_is_document() {
        let config = WorkspaceConfig::default();
        assert!(config.is_document(Path::new("/ws/note.md")));
        assert!(config.is_document(Path::new("/ws/NOTE.MD")));
        assert!(!config.is_document(Path::new("/ws/image.png")));
        assert!(!config.is_document(Path::new("/ws/README")));
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notegraph.yaml");

        let config = WorkspaceConfig::builder(temp.path())
            .title_max_length(42)
            .build()
            .unwrap();
        config.save(&file).await.unwrap();

        let loaded = WorkspaceConfig::load(&file).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_load_partial_yaml_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notegraph.yaml");
        tokio::fs::write(&file, "file_types: [\".md\", \".mdx\"]\n")
            .await
            .unwrap();

        let loaded = WorkspaceConfig::load(&file).await.unwrap();
        assert!(loaded.file_types.contains("mdx"));
        assert_eq!(loaded.title_max_length, DEFAULT_TITLE_MAX_LENGTH);
        assert!(loaded.ignore_hidden);
    }
}

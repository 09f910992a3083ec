//! Directory discovery and concurrent per-file processing.

use futures::future::join_all;
use notegraph_core::prelude::*;
use notegraph_core::is_hidden;
use std::future::Future;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Outcome of a walk over every discovered document
#[derive(Debug, Default)]
pub struct WalkSummary {
    /// Number of documents the callback ran for
    pub discovered: usize,
    /// Number of callbacks that returned `Ok`
    pub succeeded: usize,
    /// Failed documents, in discovery order
    pub failures: Vec<(PathBuf, Error)>,
}

impl WalkSummary {
    /// Tally per-document results, keeping the failures in order
    pub fn from_results<T>(results: Vec<(PathBuf, Result<T>)>) -> Self {
        let mut summary = WalkSummary {
            discovered: results.len(),
            ..Default::default()
        };
        for (path, result) in results {
            match result {
                Ok(_) => summary.succeeded += 1,
                Err(e) => summary.failures.push((path, e)),
            }
        }
        summary
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The first failure, if any
    pub fn into_result(mut self) -> Result<Self> {
        if self.failures.is_empty() {
            return Ok(self);
        }
        let (path, error) = self.failures.remove(0);
        log::warn!(
            "Walk failed at {} ({} other failures)",
            path.display(),
            self.failures.len()
        );
        Err(error)
    }
}

/// Enumerates documents under a workspace root
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    config: WorkspaceConfig,
}

impl DirectoryWalker {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self { config }
    }

    /// Every document under the root, sorted by path.
    ///
    /// Keeps regular files with a configured extension. Skips hidden files
    /// when `ignore_hidden` is set, anything under an excluded path component,
    /// and files larger than `max_file_size`.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.config.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = entry.map_err(|e| match e.path().map(Path::to_path_buf) {
                Some(path) => Error::read(path, e.into()),
                None => Error::io(e.into()),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if self.config.ignore_hidden && is_hidden(path) {
                continue;
            }
            if !self.config.is_document(path) {
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > self.config.max_file_size {
                log::warn!(
                    "Skipping {} ({} bytes exceeds limit of {})",
                    path.display(),
                    size,
                    self.config.max_file_size
                );
                continue;
            }

            files.push(entry.into_path());
        }

        files.sort();
        Ok(files)
    }

    /// Run `callback` for every discovered document concurrently.
    ///
    /// All callbacks are started together and awaited to completion. When any
    /// failed, the first failure in discovery order is returned; updates made
    /// by the other callbacks stay in place.
    pub async fn walk<G, F, Fut>(&self, context: &G, callback: F) -> Result<WalkSummary>
    where
        G: Clone,
        F: Fn(G, PathBuf) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        self.walk_isolated(context, callback).await?.into_result()
    }

    /// Like [`DirectoryWalker::walk`], but per-file failures are collected
    /// into the summary instead of failing the walk.
    ///
    /// Only discovery errors are returned as `Err`.
    pub async fn walk_isolated<G, F, Fut>(&self, context: &G, callback: F) -> Result<WalkSummary>
    where
        G: Clone,
        F: Fn(G, PathBuf) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let results = self.run_all(context, callback).await?;
        Ok(WalkSummary::from_results(results))
    }

    /// Run `callback` for every discovered document concurrently and return
    /// each output next to its path, in discovery order
    pub async fn run_all<G, F, Fut, T>(
        &self,
        context: &G,
        callback: F,
    ) -> Result<Vec<(PathBuf, Result<T>)>>
    where
        G: Clone,
        F: Fn(G, PathBuf) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let files = self.discover()?;
        log::debug!(
            "Walking {} documents under {}",
            files.len(),
            self.config.root.display()
        );

        let results = join_all(
            files
                .iter()
                .map(|path| callback(context.clone(), path.clone())),
        )
        .await;

        Ok(files.into_iter().zip(results).collect())
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.config.excluded_paths.contains(name))
    }
}

//! Discovery of the files to lint.
//!
//! Directories are traversed in parallel with `ignore::WalkBuilder`, which
//! honours `.gitignore` and skips hidden entries. Paths are collected over a
//! crossbeam channel and returned sorted so reports are deterministic.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{WalkBuilder, WalkState};
use tracing::{debug, info};

use crate::{LinterConfig, LinterError};

/// Settings for a walk.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Whether to respect `.gitignore` files.
    pub respect_gitignore: bool,
    /// Whether to descend into hidden directories and yield hidden files.
    pub include_hidden: bool,
    /// Number of traversal threads (0 = automatic).
    pub threads: usize,
    /// Whether to follow symbolic links.
    pub follow_links: bool,
    /// Accepted extensions, compared case-insensitively. Empty accepts all.
    pub extensions: Vec<String>,
    /// Glob patterns a file must match, relative to the walk root.
    pub include_patterns: Vec<String>,
    /// Glob patterns that skip a file, relative to the walk root.
    pub exclude_patterns: Vec<String>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            respect_gitignore: true,
            include_hidden: false,
            threads: 0,
            follow_links: false,
            extensions: Vec::new(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl WalkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives walk settings from the linter configuration.
    pub fn from_linter_config(config: &LinterConfig) -> Self {
        Self {
            respect_gitignore: config.respect_gitignore,
            include_hidden: config.include_hidden,
            threads: config.threads,
            follow_links: false,
            extensions: config.extensions.clone(),
            include_patterns: config.include.clone(),
            exclude_patterns: config.exclude.clone(),
        }
    }

    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.include_hidden = yes;
        self
    }

    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.respect_gitignore = yes;
        self
    }
}

/// Walks a target and yields lintable files.
#[derive(Debug)]
pub struct FileWalker {
    config: WalkConfig,
    globs: GlobMatcher,
}

impl FileWalker {
    /// Creates a walker, compiling its glob patterns.
    pub fn new(config: WalkConfig) -> Result<Self, LinterError> {
        let globs = GlobMatcher::new(&config.include_patterns, &config.exclude_patterns)?;
        Ok(Self { config, globs })
    }

    /// Returns true if `path` has one of the accepted extensions.
    pub fn has_supported_extension(&self, path: &Path) -> bool {
        if self.config.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    fn accepts(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.has_supported_extension(path) && self.globs.is_match(relative)
    }

    /// Returns every accepted file under `target`, sorted.
    ///
    /// A file target is returned as-is when its extension is accepted.
    pub fn walk(&self, target: &Path) -> Vec<PathBuf> {
        if target.is_file() {
            return if self.has_supported_extension(target) {
                vec![target.to_path_buf()]
            } else {
                debug!("Skipping {}: unsupported extension", target.display());
                Vec::new()
            };
        }

        let (tx, rx) = crossbeam_channel::unbounded::<PathBuf>();
        let errors = AtomicUsize::new(0);

        let mut builder = WalkBuilder::new(target);
        builder
            .git_ignore(self.config.respect_gitignore)
            .git_global(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore)
            .require_git(false)
            .hidden(!self.config.include_hidden)
            .follow_links(self.config.follow_links)
            .threads(self.config.threads);

        builder.build_parallel().run(|| {
            let tx = tx.clone();
            let errors = &errors;
            Box::new(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        debug!("Walk error: {}", err);
                        errors.fetch_add(1, Ordering::Relaxed);
                        return WalkState::Continue;
                    }
                };

                let is_file = entry.file_type().is_some_and(|t| t.is_file());
                if is_file && self.accepts(target, entry.path()) && tx.send(entry.into_path()).is_err() {
                    return WalkState::Quit;
                }
                WalkState::Continue
            })
        });
        drop(tx);

        let mut files: Vec<PathBuf> = rx.into_iter().collect();
        files.sort();

        info!(
            "Discovered {} files under {} ({} errors)",
            files.len(),
            target.display(),
            errors.load(Ordering::Relaxed)
        );

        files
    }
}

/// Include/exclude globs, matched against paths relative to the walk root.
#[derive(Debug)]
struct GlobMatcher {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl GlobMatcher {
    fn new(include: &[String], exclude: &[String]) -> Result<Self, LinterError> {
        Ok(Self {
            include: build_set(include)?,
            exclude: build_set(exclude)?,
        })
    }

    fn is_match(&self, path: &Path) -> bool {
        if self.exclude.as_ref().is_some_and(|set| set.is_match(path)) {
            return false;
        }
        self.include.as_ref().is_none_or(|set| set.is_match(path))
    }
}

fn build_set(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            LinterError::config(format!("Invalid glob pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map(Some)
        .map_err(|e| LinterError::config(format!("Failed to build glob set: {}", e)))
}

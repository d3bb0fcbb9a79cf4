//! Standard filesystem and module-loader implementations
//!
//! `StdFileSystem` backs real generation runs with tokio's fs. Glob
//! patterns in `exclude`/`include` are matched against paths relative
//! to the listing root; a pattern naming a directory covers everything
//! beneath it. `StaticModuleLoader` serves hosts (and tests) that
//! register executable-template behavior as native closures keyed by
//! path suffix.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use glob::Pattern;

use stencil_core::capabilities::{FileSystem, ModuleLoader, ModuleOutput};
use stencil_core::context::Context;
use stencil_core::error::{Error, Result};
use stencil_core::paths::normalize_separator;

/// Filesystem capability backed by the real filesystem.
pub struct StdFileSystem;

fn pattern_matches(pattern: &str, relative: &str) -> bool {
    let as_dir_prefix = format!("{}/", pattern.trim_end_matches('/'));
    if relative.starts_with(&as_dir_prefix) || relative == pattern.trim_end_matches('/') {
        return true;
    }
    match Pattern::new(pattern) {
        Ok(p) => p.matches(relative),
        Err(err) => {
            tracing::warn!(pattern, %err, "unusable glob pattern, matching by prefix only");
            false
        }
    }
}

fn keep(relative: &str, exclude: &[String], include: &[String]) -> bool {
    if exclude.iter().any(|p| pattern_matches(p, relative)) {
        return false;
    }
    include.is_empty() || include.iter().any(|p| pattern_matches(p, relative))
}

#[async_trait]
impl FileSystem for StdFileSystem {
    async fn list_files(
        &self,
        root: &str,
        exclude: &[String],
        include: &[String],
    ) -> Result<Vec<String>> {
        let root_path = PathBuf::from(root);
        let mut pending = vec![root_path.clone()];
        let mut files = Vec::new();

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                let relative = normalize_separator(
                    &path
                        .strip_prefix(&root_path)
                        .unwrap_or(&path)
                        .to_string_lossy(),
                );
                if keep(&relative, exclude, include) {
                    files.push(normalize_separator(&path.to_string_lossy()));
                }
            }
        }

        files.sort();
        Ok(files)
    }

    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    async fn read_text(&self, path: &str) -> Result<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    async fn write_text(&self, path: &str, content: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    async fn ensure_dir(&self, path: &str) -> Result<()> {
        tokio::fs::create_dir_all(path).await?;
        Ok(())
    }
}

/// Native closure standing in for one executable template module.
pub type ModuleFn = Arc<dyn Fn(&Context) -> Result<ModuleOutput> + Send + Sync>;

/// Module loader resolving modules from registered closures.
///
/// Registration keys are path suffixes, so templates can be registered
/// by their path relative to the template root.
#[derive(Default)]
pub struct StaticModuleLoader {
    modules: Vec<(String, ModuleFn)>,
}

impl StaticModuleLoader {
    /// Empty loader; every execution fails until modules are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under a path suffix.
    pub fn with(mut self, suffix: impl Into<String>, module: ModuleFn) -> Self {
        self.modules.push((suffix.into(), module));
        self
    }
}

#[async_trait]
impl ModuleLoader for StaticModuleLoader {
    async fn execute(&self, path: &str, ctx: &Context) -> Result<ModuleOutput> {
        let normalized = normalize_separator(path);
        for (suffix, module) in &self.modules {
            if normalized.ends_with(suffix.as_str()) {
                return module(ctx);
            }
        }
        Err(Error::Module {
            path: path.to_string(),
            message: "no module registered for this path".to_string(),
        })
    }
}

//! Host capability traits
//!
//! The engine is host-independent: prompting, notification, logging,
//! filesystem access, module execution and editor actions are all
//! supplied by the embedding host through these traits. Prompts return
//! `None` on user cancellation, which the engine turns into the Exit
//! signal.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::options::InputConfig;

/// Value(s) selected from a choice prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Picked {
    /// Single selection
    One(Value),
    /// Multi selection (`canPickMany`)
    Many(Vec<Value>),
}

/// Answer to the four-way overwrite question for an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteAction {
    /// Overwrite this file and every later existing file in the run
    OverwriteAll,
    /// Skip this file and every later existing file in the run
    SkipAll,
    /// Overwrite only this file
    OverwriteOne,
    /// Skip only this file
    SkipOne,
}

/// Output of an executable template or config module.
#[derive(Debug, Clone)]
pub enum ModuleOutput {
    /// Final text, written as-is (subject to the interpolation flags)
    Text(String),
    /// A data literal; configs merge it, templates pretty-print it
    Data(Value),
}

/// One entry of the template-file multi-select.
#[derive(Debug, Clone)]
pub struct FilePickItem {
    /// Display label (the file's basename)
    pub label: String,
    /// Absolute template-file path, returned on selection
    pub value: String,
    /// Path relative to the template root
    pub description: String,
    /// Pre-selected state (all files start picked)
    pub picked: bool,
}

/// User-prompt capability.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Free-text input. `None` means the user cancelled.
    async fn text(&self, name: &str, config: &InputConfig, ctx: &Context) -> Option<String>;

    /// Choice input for configs with non-empty `options`.
    async fn pick(&self, name: &str, config: &InputConfig, ctx: &Context) -> Option<Picked>;

    /// Multi-select over the enumerated template files. Returns the
    /// `value` of every chosen item.
    async fn pick_template_files(
        &self,
        items: &[FilePickItem],
        ctx: &Context,
    ) -> Option<Vec<String>>;

    /// Four-way overwrite question for an existing output file.
    async fn confirm_overwrite(&self, file_label: &str) -> Option<OverwriteAction>;
}

/// Non-modal user notifications.
pub trait Notifier: Send + Sync {
    /// Informational message
    fn info(&self, _message: &str) {}
    /// Warning message
    fn warn(&self, _message: &str) {}
    /// Error message
    fn error(&self, _message: &str) {}
}

/// Persistent run log (the original's output channel).
pub trait Logger: Send + Sync {
    /// Append one line to the run log
    fn log(&self, _message: &str) {}
    /// Clear the run log
    fn clear(&self) {}
}

/// Filesystem access used by the engine.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Lists files under `root`, excluding `exclude` and restricting to
    /// `include` when non-empty. Entries naming directories cover
    /// everything beneath them. Paths use forward slashes.
    async fn list_files(
        &self,
        root: &str,
        exclude: &[String],
        include: &[String],
    ) -> Result<Vec<String>>;

    /// Whether `path` exists.
    fn exists(&self, path: &str) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &str) -> bool;

    /// Reads a file as UTF-8 text.
    async fn read_text(&self, path: &str) -> Result<String>;

    /// Writes text, creating parent directories as needed.
    async fn write_text(&self, path: &str, content: &str) -> Result<()>;

    /// Creates a directory and its parents.
    async fn ensure_dir(&self, path: &str) -> Result<()>;
}

/// Executes user-authored template/config modules.
///
/// Implementations must evaluate freshly on every call; templates may
/// change between runs.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Executes the module at `path` with the current context.
    async fn execute(&self, path: &str, ctx: &Context) -> Result<ModuleOutput>;
}

/// Editor actions after generation.
#[async_trait]
pub trait Editor: Send + Sync {
    /// Opens a generated file in the host editor.
    async fn open_file(&self, _path: &str) {}

    /// Inserts `content` into `path` as an editable snippet. Returning
    /// `false` tells the engine to fall back to a plain write.
    async fn insert_snippet(&self, _path: &str, _content: &str) -> bool {
        false
    }
}

/// Notifier that drops everything.
pub struct NullNotifier;
impl Notifier for NullNotifier {}

/// Logger that drops everything.
pub struct NullLogger;
impl Logger for NullLogger {}

/// Editor that does nothing.
pub struct NullEditor;

#[async_trait]
impl Editor for NullEditor {}

/// Module loader for hosts without executable-template support.
pub struct NullModuleLoader;

#[async_trait]
impl ModuleLoader for NullModuleLoader {
    async fn execute(&self, path: &str, _ctx: &Context) -> Result<ModuleOutput> {
        Err(Error::Module {
            path: path.to_string(),
            message: "no module loader configured".to_string(),
        })
    }
}

/// Bundle of every capability a generation session needs.
#[derive(Clone)]
pub struct Host {
    /// Prompt capability (required)
    pub prompter: Arc<dyn Prompter>,
    /// Filesystem capability (required)
    pub fs: Arc<dyn FileSystem>,
    /// Notification capability
    pub notifier: Arc<dyn Notifier>,
    /// Run-log capability
    pub logger: Arc<dyn Logger>,
    /// Executable-module capability
    pub modules: Arc<dyn ModuleLoader>,
    /// Editor capability
    pub editor: Arc<dyn Editor>,
}

impl Host {
    /// Builds a host from the two required capabilities; the rest
    /// default to no-ops.
    pub fn new(prompter: Arc<dyn Prompter>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            prompter,
            fs,
            notifier: Arc::new(NullNotifier),
            logger: Arc::new(NullLogger),
            modules: Arc::new(NullModuleLoader),
            editor: Arc::new(NullEditor),
        }
    }

    /// Replaces the notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replaces the logger.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replaces the module loader.
    pub fn with_modules(mut self, modules: Arc<dyn ModuleLoader>) -> Self {
        self.modules = modules;
        self
    }

    /// Replaces the editor.
    pub fn with_editor(mut self, editor: Arc<dyn Editor>) -> Self {
        self.editor = editor;
        self
    }
}

//! Test support for the stencil integration suite
//!
//! Scripted and recording implementations of the host capabilities,
//! shared by the integration tests. Not published.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use stencil_core::capabilities::{
    Editor, FilePickItem, Host, Logger, Notifier, OverwriteAction, Picked, Prompter,
};
use stencil_core::context::Context;
use stencil_core::options::InputConfig;
use stencil_engine::StdFileSystem;

/// Prompter answering from pre-scripted queues, one per input name.
/// Exhausted queues answer `None`, which the engine reads as a
/// cancelled prompt.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<HashMap<String, VecDeque<Value>>>,
    overwrite: Mutex<VecDeque<OverwriteAction>>,
    file_filter: Mutex<Option<Vec<String>>>,
}

impl ScriptedPrompter {
    /// Prompter with no scripted answers; every prompt cancels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one answer for the named input.
    pub fn answer(self, name: &str, value: Value) -> Self {
        self.answers
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default()
            .push_back(value);
        self
    }

    /// Queues one overwrite decision.
    pub fn overwrite(self, action: OverwriteAction) -> Self {
        self.overwrite.lock().unwrap().push_back(action);
        self
    }

    /// Restricts the template-file selection to paths ending with one
    /// of the given suffixes. Without this, every file is selected.
    pub fn select_files_ending_with(self, suffixes: &[&str]) -> Self {
        *self.file_filter.lock().unwrap() =
            Some(suffixes.iter().map(|s| s.to_string()).collect());
        self
    }

    fn next(&self, name: &str) -> Option<Value> {
        self.answers.lock().unwrap().get_mut(name)?.pop_front()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn text(&self, name: &str, _config: &InputConfig, _ctx: &Context) -> Option<String> {
        self.next(name).map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    async fn pick(&self, name: &str, _config: &InputConfig, _ctx: &Context) -> Option<Picked> {
        self.next(name).map(Picked::One)
    }

    async fn pick_template_files(
        &self,
        items: &[FilePickItem],
        _ctx: &Context,
    ) -> Option<Vec<String>> {
        let filter = self.file_filter.lock().unwrap();
        Some(match filter.as_ref() {
            None => items.iter().map(|i| i.value.clone()).collect(),
            Some(suffixes) => items
                .iter()
                .filter(|i| suffixes.iter().any(|s| i.value.ends_with(s.as_str())))
                .map(|i| i.value.clone())
                .collect(),
        })
    }

    async fn confirm_overwrite(&self, _file_label: &str) -> Option<OverwriteAction> {
        self.overwrite.lock().unwrap().pop_front()
    }
}

/// Notifier that records every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// All messages of the given level, in order.
    pub fn messages(&self, level: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("info".to_string(), message.to_string()));
    }
    fn warn(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("warn".to_string(), message.to_string()));
    }
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("error".to_string(), message.to_string()));
    }
}

/// Logger that records the run log.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    /// The logged lines since the last clear.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
    fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

/// Editor that records opens and snippet insertions.
#[derive(Default)]
pub struct RecordingEditor {
    /// Whether snippet insertion reports success
    pub accept_snippets: bool,
    opened: Mutex<Vec<String>>,
    snippets: Mutex<Vec<(String, String)>>,
}

impl RecordingEditor {
    /// Editor whose snippet insertion succeeds.
    pub fn accepting_snippets() -> Self {
        Self {
            accept_snippets: true,
            ..Self::default()
        }
    }

    /// Paths opened after generation, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    /// Snippet insertions as `(path, content)` pairs.
    pub fn snippets(&self) -> Vec<(String, String)> {
        self.snippets.lock().unwrap().clone()
    }
}

#[async_trait]
impl Editor for RecordingEditor {
    async fn open_file(&self, path: &str) {
        self.opened.lock().unwrap().push(path.to_string());
    }

    async fn insert_snippet(&self, path: &str, content: &str) -> bool {
        self.snippets
            .lock()
            .unwrap()
            .push((path.to_string(), content.to_string()));
        self.accept_snippets
    }
}

/// Bundle of recording capabilities handed back next to the host.
pub struct TestHost {
    /// The assembled host
    pub host: Host,
    /// Recorded notifications
    pub notifier: Arc<RecordingNotifier>,
    /// Recorded run log
    pub logger: Arc<RecordingLogger>,
    /// Recorded editor actions
    pub editor: Arc<RecordingEditor>,
}

/// Builds a real-filesystem host around a scripted prompter, wiring in
/// recording doubles for everything observable.
pub fn test_host(prompter: ScriptedPrompter) -> TestHost {
    test_host_with_editor(prompter, RecordingEditor::default())
}

/// Same as [`test_host`] with a custom editor double.
pub fn test_host_with_editor(prompter: ScriptedPrompter, editor: RecordingEditor) -> TestHost {
    let notifier = Arc::new(RecordingNotifier::default());
    let logger = Arc::new(RecordingLogger::default());
    let editor = Arc::new(editor);
    let host = Host::new(Arc::new(prompter), Arc::new(StdFileSystem))
        .with_notifier(notifier.clone())
        .with_logger(logger.clone())
        .with_editor(editor.clone());
    TestHost {
        host,
        notifier,
        logger,
        editor,
    }
}

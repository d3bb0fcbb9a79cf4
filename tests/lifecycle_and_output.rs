//! Lifecycle hooks, output modes and interpolation failure handling.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use stencil_core::context::Context;
use stencil_core::error::Result;
use stencil_core::hooks::{HookOutcome, LifecycleHooks, ProcessOutcome};
use stencil_core::options::{Dynamic, OpenAfter, RunOptions};
use stencil_engine::{GenerateRequest, Session};
use stencil_integration_tests::{test_host, test_host_with_editor, RecordingEditor, ScriptedPrompter};

async fn seed(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&path, content).await.unwrap();
    }
}

fn request(workspace: &Path, template: &Path) -> GenerateRequest {
    GenerateRequest {
        workspace: workspace.to_string_lossy().to_string(),
        templates: vec![template.to_string_lossy().to_string()],
        ..GenerateRequest::default()
    }
}

struct TestFileHooks;

#[async_trait]
impl LifecycleHooks for TestFileHooks {
    async fn before_all(&self, _ctx: &Context) -> Result<HookOutcome> {
        Ok(HookOutcome::Continue(json!({"variables": {"runBy": "hooks"}})))
    }

    async fn before_each(&self, ctx: &Context) -> Result<HookOutcome> {
        // test files are only generated when the context asks for them
        let is_test_file = ctx
            .lookup_path("templateFileBasename")
            .and_then(|v| v.as_str().map(|s| s.contains(".test.")))
            .unwrap_or(false);
        if is_test_file && ctx.lookup_path("withTests") != Some(json!(true)) {
            return Ok(HookOutcome::Skip);
        }
        Ok(HookOutcome::NoChange)
    }

    async fn process_after_each(&self, data: &str, _ctx: &Context) -> Result<ProcessOutcome> {
        Ok(ProcessOutcome::Replace {
            data: Some(format!("// generated\n{data}")),
            context: None,
        })
    }
}

#[tokio::test]
async fn hooks_can_veto_files_and_rewrite_output() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t");
    let workspace = dir.path().join("ws");
    seed(
        &template,
        &[
            ("widget.ts", "export const by = '${runBy}';"),
            ("widget.test.ts", "test body"),
        ],
    )
    .await;
    tokio::fs::create_dir_all(&workspace).await.unwrap();

    let th = test_host(ScriptedPrompter::new());
    let mut options = RunOptions::default();
    options.hooks = Some(Arc::new(TestFileHooks));
    let summary = Session::new(th.host)
        .generate(&request(&workspace, &template), options)
        .await
        .unwrap();

    // before_each skipped the test file, before_all's patch is visible,
    // process_after_each prefixed the banner
    assert_eq!(summary.created.len(), 1);
    assert_eq!(summary.skipped.len(), 1);
    assert!(!workspace.join("widget.test.ts").exists());
    let content = tokio::fs::read_to_string(workspace.join("widget.ts"))
        .await
        .unwrap();
    assert_eq!(content, "// generated\nexport const by = 'hooks';");
}

#[tokio::test]
async fn before_each_veto_is_lifted_by_context_data() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t");
    let workspace = dir.path().join("ws");
    seed(
        &template,
        &[
            ("_config.json", r#"{"withTests": true}"#),
            ("widget.test.ts", "test body"),
        ],
    )
    .await;
    tokio::fs::create_dir_all(&workspace).await.unwrap();

    let th = test_host(ScriptedPrompter::new());
    let mut options = RunOptions::default();
    options.hooks = Some(Arc::new(TestFileHooks));
    let summary = Session::new(th.host)
        .generate(&request(&workspace, &template), options)
        .await
        .unwrap();

    assert_eq!(summary.created.len(), 1);
    assert!(workspace.join("widget.test.ts").exists());
}

#[tokio::test]
async fn snippet_generation_hands_the_write_to_the_editor() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t");
    let workspace = dir.path().join("ws");
    seed(&template, &[("main.rs", "fn main() {}")]).await;
    tokio::fs::create_dir_all(&workspace).await.unwrap();

    let th = test_host_with_editor(
        ScriptedPrompter::new(),
        RecordingEditor::accepting_snippets(),
    );
    let editor = th.editor.clone();
    let mut options = RunOptions::default();
    options.enable_snippet_generation = Dynamic::Value(true);
    let summary = Session::new(th.host)
        .generate(&request(&workspace, &template), options)
        .await
        .unwrap();

    assert_eq!(summary.created.len(), 1);
    let snippets = editor.snippets();
    assert_eq!(snippets.len(), 1);
    assert!(snippets[0].0.ends_with("main.rs"));
    assert_eq!(snippets[0].1, "fn main() {}");
    // the editor accepted, so the engine did not write the file itself
    assert!(!workspace.join("main.rs").exists());
}

#[tokio::test]
async fn declined_snippet_falls_back_to_a_plain_write() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t");
    let workspace = dir.path().join("ws");
    seed(&template, &[("main.rs", "fn main() {}")]).await;
    tokio::fs::create_dir_all(&workspace).await.unwrap();

    let th = test_host(ScriptedPrompter::new());
    let mut options = RunOptions::default();
    options.enable_snippet_generation = Dynamic::Value(true);
    Session::new(th.host)
        .generate(&request(&workspace, &template), options)
        .await
        .unwrap();

    assert_eq!(
        tokio::fs::read_to_string(workspace.join("main.rs"))
            .await
            .unwrap(),
        "fn main() {}"
    );
}

#[tokio::test]
async fn open_after_generation_respects_patterns() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t");
    let workspace = dir.path().join("ws");
    seed(&template, &[("index.ts", "i"), ("styles.css", "s")]).await;
    tokio::fs::create_dir_all(&workspace).await.unwrap();

    let th = test_host(ScriptedPrompter::new());
    let editor = th.editor.clone();
    let mut options = RunOptions::default();
    options.open_after_generation = OpenAfter::Patterns(vec!["**/*.ts".to_string(), "*.ts".to_string()]);
    Session::new(th.host)
        .generate(&request(&workspace, &template), options)
        .await
        .unwrap();

    let opened = editor.opened();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].ends_with("index.ts"));
}

#[tokio::test]
async fn unresolvable_content_falls_back_and_warns() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t");
    let workspace = dir.path().join("ws");
    seed(&template, &[("notes.txt", "left as ${unknownThing}")]).await;
    tokio::fs::create_dir_all(&workspace).await.unwrap();

    let th = test_host(ScriptedPrompter::new());
    let notifier = th.notifier.clone();
    let summary = Session::new(th.host)
        .generate(&request(&workspace, &template), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.created.len(), 1);
    let content = tokio::fs::read_to_string(workspace.join("notes.txt"))
        .await
        .unwrap();
    assert_eq!(content, "left as ${unknownThing}");
    let warnings = notifier.messages("warn");
    assert!(warnings.iter().any(|w| w.contains("unknownThing")));
}

#[tokio::test]
async fn disabled_interpolation_copies_contents_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t");
    let workspace = dir.path().join("ws");
    seed(
        &template,
        &[(
            "_config.json",
            r#"{"disableInterpolation": true, "name": "ignored"}"#,
        ),
        ("raw.txt", "keep ${name} as-is")],
    )
    .await;
    tokio::fs::create_dir_all(&workspace).await.unwrap();

    let th = test_host(ScriptedPrompter::new());
    Session::new(th.host)
        .generate(&request(&workspace, &template), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(
        tokio::fs::read_to_string(workspace.join("raw.txt"))
            .await
            .unwrap(),
        "keep ${name} as-is"
    );
}

#[tokio::test]
async fn by_line_interpolation_salvages_good_lines() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("t");
    let workspace = dir.path().join("ws");
    seed(
        &template,
        &[
            (
                "_config.json",
                r#"{"interpolateByLine": true, "variables": {"name": "Nav"}}"#,
            ),
            ("mixed.txt", "ok ${name}\nbad ${missing}\nok ${name}"),
        ],
    )
    .await;
    tokio::fs::create_dir_all(&workspace).await.unwrap();

    let th = test_host(ScriptedPrompter::new());
    Session::new(th.host)
        .generate(&request(&workspace, &template), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(
        tokio::fs::read_to_string(workspace.join("mixed.txt"))
            .await
            .unwrap(),
        "ok Nav\nbad ${missing}\nok Nav"
    );
}

//! Generation session orchestration
//!
//! A [`Session`] drives the whole run: per template it layers the
//! configs, enumerates and (optionally) narrows the file set, collects
//! pre-prompted inputs, then walks the files through the lifecycle
//! hooks, path and content interpolation, the overwrite policy and the
//! final write. A failing file is reported and its siblings continue;
//! a declined prompt cancels the rest of the run cleanly.

use glob::Pattern;
use serde_json::{Map, Value};

use stencil_core::capabilities::{FilePickItem, Host, ModuleOutput, OverwriteAction};
use stencil_core::context::Context;
use stencil_core::error::{Error, Result};
use stencil_core::options::{Dynamic, OpenAfter, OverwritePolicy, RunOptions, Times};
use stencil_core::paths::{
    basename, fs_path_details, is_module_file, output_file_details, parsed_template_file_details,
    relative_path, strip_module_marker, template_file_details, template_path_details,
    workspace_folder_details,
};

use crate::config_resolver::{is_config_entry, load_config};
use crate::hook_runner::{run_context_hook, run_process_hook, HookSlot, ProcessSlot};
use crate::inputs::{collect_pre_prompt_inputs, discover_input_names, resolve_inputs};
use crate::interpolate::render_resilient;

/// What to generate and from where.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Workspace root; also the default output root
    pub workspace: String,
    /// Filesystem entry the run was invoked on, if any
    pub fs_path: Option<String>,
    /// Template directories to run, in order
    pub templates: Vec<String>,
    /// Directory holding all templates; its config is the common layer
    pub templates_root: Option<String>,
    /// Parsed `package.json` of the workspace, bound as `package`
    pub package_json: Option<Value>,
    /// Additional host bindings (environment facts, user home, ...)
    pub extra_bindings: Map<String, Value>,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateSummary {
    /// Output files written
    pub created: Vec<String>,
    /// Template files skipped by policy, hooks or the user
    pub skipped: Vec<String>,
    /// Whether the user cancelled partway through
    pub cancelled: bool,
}

/// A generation run bound to one host.
pub struct Session {
    host: Host,
}

impl Session {
    /// Creates a session over the given host capabilities.
    pub fn new(host: Host) -> Self {
        Self { host }
    }

    /// Generates every requested template, isolating failures per
    /// template and per file. Cancellation stops the remaining work
    /// and is reported through [`GenerateSummary::cancelled`].
    pub async fn generate(
        &self,
        request: &GenerateRequest,
        options: RunOptions,
    ) -> Result<GenerateSummary> {
        if request.templates.is_empty() {
            return Err(Error::Config("no templates selected".to_string()));
        }
        self.host.logger.clear();
        let mut summary = GenerateSummary::default();

        for (template_index, template) in request.templates.iter().enumerate() {
            let result = self
                .generate_template(request, template, template_index, &options, &mut summary)
                .await;
            match result {
                Ok(()) => {}
                Err(err) if err.is_exit() => {
                    self.host.logger.log("run cancelled by the user");
                    summary.cancelled = true;
                    break;
                }
                Err(Error::NoTemplateFiles) => {
                    self.host.logger.log("no template files to generate");
                    break;
                }
                Err(err) => {
                    self.host
                        .notifier
                        .error(&format!("template '{template}' failed: {err}"));
                    tracing::error!(%template, %err, "template run failed");
                }
            }
        }
        Ok(summary)
    }

    async fn generate_template(
        &self,
        request: &GenerateRequest,
        template: &str,
        template_index: usize,
        options: &RunOptions,
        summary: &mut GenerateSummary,
    ) -> Result<()> {
        let workspace = request.workspace.as_str();
        let mut ctx = Context::with_options(options.clone());

        merge_bindings(&mut ctx, workspace_folder_details(workspace));
        if let Some(fs_path) = &request.fs_path {
            let is_dir = self.host.fs.is_dir(fs_path);
            merge_bindings(&mut ctx, fs_path_details(workspace, fs_path, is_dir));
        }
        merge_bindings(&mut ctx, template_path_details(workspace, template));

        let mut env = Map::new();
        for (key, value) in std::env::vars() {
            env.insert(key, Value::String(value));
        }
        ctx.set_binding("env", Value::Object(env));
        if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
            ctx.set_binding("userHome", Value::String(home));
        }

        for (key, value) in &request.extra_bindings {
            ctx.set_binding(key.clone(), value.clone());
        }
        if let Some(package) = &request.package_json {
            ctx.set_binding("package", package.clone());
        }
        ctx.set_binding("templateIndex", Value::from(template_index as u64));

        if let Some(root) = &request.templates_root {
            if let Some(config) = load_config(root, &ctx, &self.host).await {
                ctx.apply_patch(&config);
            }
        }
        if let Some(config) = load_config(template, &ctx, &self.host).await {
            ctx.apply_patch(&config);
        }

        collect_pre_prompt_inputs(&mut ctx, &self.host).await?;

        let files = self.enumerate_files(template, &ctx).await?;
        let files = self.narrow_files(template, files, &ctx).await?;

        self.host
            .logger
            .log(&format!("generating from '{template}'"));

        let mut passes = 0u64;
        match ctx.options.times.clone() {
            None => {
                ctx.set_binding("timeIndex", Value::from(0u64));
                self.run_pass(&mut ctx, workspace, template, &files, summary)
                    .await?;
                passes += 1;
            }
            Some(Times::Count(n)) => {
                for time_index in 0..n {
                    ctx.set_binding("timeIndex", Value::from(time_index));
                    self.run_pass(&mut ctx, workspace, template, &files, summary)
                        .await?;
                    passes += 1;
                }
            }
            Some(Times::Entries(entries)) => {
                for (time_index, entry) in entries.iter().enumerate() {
                    let Some(patch) = entry.resolve(&ctx) else {
                        continue;
                    };
                    ctx.apply_patch(&patch);
                    ctx.set_binding("timeIndex", Value::from(time_index as u64));
                    self.run_pass(&mut ctx, workspace, template, &files, summary)
                        .await?;
                    passes += 1;
                }
            }
        }
        if passes == 0 {
            self.host
                .notifier
                .warn(&format!("'{template}': times resolved to no iterations"));
        }
        Ok(())
    }

    async fn enumerate_files(&self, template: &str, ctx: &Context) -> Result<Vec<String>> {
        let files = self
            .host
            .fs
            .list_files(template, &ctx.options.exclude, &ctx.options.include)
            .await?;
        let files: Vec<String> = files
            .into_iter()
            .filter(|f| !is_config_entry(&relative_path(template, f), &ctx.options.config_name))
            .collect();
        if files.is_empty() {
            return Err(Error::NoTemplateFiles);
        }
        Ok(files)
    }

    async fn narrow_files(
        &self,
        template: &str,
        files: Vec<String>,
        ctx: &Context,
    ) -> Result<Vec<String>> {
        if !ctx.options.prompt_template_files.resolve(ctx) {
            return Ok(files);
        }
        let items: Vec<FilePickItem> = files
            .iter()
            .map(|file| FilePickItem {
                label: basename(file).to_string(),
                value: file.clone(),
                description: relative_path(template, file),
                picked: true,
            })
            .collect();
        let selected = self
            .host
            .prompter
            .pick_template_files(&items, ctx)
            .await
            .ok_or(Error::Exit)?;
        if selected.is_empty() {
            return Err(Error::NoTemplateFiles);
        }
        Ok(files.into_iter().filter(|f| selected.contains(f)).collect())
    }

    async fn run_pass(
        &self,
        ctx: &mut Context,
        workspace: &str,
        template: &str,
        files: &[String],
        summary: &mut GenerateSummary,
    ) -> Result<()> {
        let hooks = ctx.options.hooks.clone();
        if let Some(hooks) = &hooks {
            if !run_context_hook(hooks.as_ref(), HookSlot::BeforeAll, ctx).await? {
                return Ok(());
            }
        }

        for (file_index, template_file) in files.iter().enumerate() {
            ctx.set_binding("templateFileIndex", Value::from(file_index as u64));
            match self
                .generate_file(ctx, workspace, template, template_file)
                .await
            {
                Ok(Some(output)) => {
                    self.host.logger.log(&format!("created {output}"));
                    summary.created.push(output);
                }
                Ok(None) => {
                    self.host.logger.log(&format!("skipped {template_file}"));
                    summary.skipped.push(template_file.clone());
                }
                Err(err) if err.is_exit() => return Err(Error::Exit),
                Err(err) => {
                    self.host
                        .notifier
                        .error(&format!("failed to generate from '{template_file}': {err}"));
                    tracing::error!(%template_file, %err, "file generation failed");
                }
            }
        }

        if let Some(hooks) = &hooks {
            run_context_hook(hooks.as_ref(), HookSlot::AfterAll, ctx).await?;
        }
        Ok(())
    }

    async fn generate_file(
        &self,
        ctx: &mut Context,
        workspace: &str,
        template: &str,
        template_file: &str,
    ) -> Result<Option<String>> {
        let hooks = ctx.options.hooks.clone();
        merge_bindings(
            ctx,
            template_file_details(workspace, template, template_file),
        );
        if let Some(hooks) = &hooks {
            if !run_context_hook(hooks.as_ref(), HookSlot::BeforeEach, ctx).await? {
                return Ok(None);
            }
        }

        let relative = relative_path(template, template_file);
        let patterns = ctx.options.prompt_variable_patterns.clone();
        let path_inputs = discover_input_names(&[relative.as_str()], &patterns);
        resolve_inputs(&path_inputs, ctx, &self.host).await?;

        let (parsed_relative, path_errors) = render_resilient(&relative, ctx, false);
        self.report_interpolation_errors(ctx, &relative, &path_errors);

        let parsed_template_file = format!("{template}/{parsed_relative}");
        merge_bindings(
            ctx,
            parsed_template_file_details(workspace, template, &parsed_template_file),
        );

        let out_root = self.resolve_out_root(ctx, workspace);
        let output_path = format!("{}/{}", out_root, strip_module_marker(&parsed_relative));
        merge_bindings(ctx, output_file_details(workspace, &output_path));

        if self.host.fs.exists(&output_path) && !self.approve_overwrite(ctx, &output_path).await? {
            return Ok(None);
        }

        let raw = self.host.fs.read_text(template_file).await?;
        let content_inputs = discover_input_names(&[raw.as_str()], &patterns);
        resolve_inputs(&content_inputs, ctx, &self.host).await?;

        let data = match &hooks {
            Some(hooks) => {
                match run_process_hook(hooks.as_ref(), ProcessSlot::BeforeEach, raw, ctx).await? {
                    Some(data) => data,
                    None => return Ok(None),
                }
            }
            None => raw,
        };

        let content = self
            .produce_content(ctx, template_file, data)
            .await?;

        let content = match &hooks {
            Some(hooks) => {
                match run_process_hook(hooks.as_ref(), ProcessSlot::AfterEach, content, ctx).await?
                {
                    Some(content) => content,
                    None => return Ok(None),
                }
            }
            None => content,
        };

        self.write_output(ctx, &output_path, &content).await?;
        self.open_if_configured(ctx, workspace, &output_path).await;

        if let Some(hooks) = &hooks {
            run_context_hook(hooks.as_ref(), HookSlot::AfterEach, ctx).await?;
        }
        Ok(Some(output_path))
    }

    /// Output root: the invoked folder (falling back to the workspace),
    /// with a configured `out` interpolated and resolved against it.
    fn resolve_out_root(&self, ctx: &Context, workspace: &str) -> String {
        let base = ctx
            .lookup_path("fsPathFolder")
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| workspace.to_string());
        if ctx.options.out.is_empty() {
            return base;
        }
        let (out, errors) = render_resilient(&ctx.options.out, ctx, false);
        self.report_interpolation_errors(ctx, &ctx.options.out, &errors);
        if std::path::Path::new(&out).is_absolute() {
            out
        } else {
            format!("{base}/{out}")
        }
    }

    /// Decides an existing output file's fate; a sticky answer hardens
    /// the policy for the rest of the run.
    async fn approve_overwrite(&self, ctx: &mut Context, output_path: &str) -> Result<bool> {
        match ctx.options.overwrite_existing_file.resolve(ctx) {
            OverwritePolicy::Always => Ok(true),
            OverwritePolicy::Never => Ok(false),
            OverwritePolicy::Prompt => {
                let action = self
                    .host
                    .prompter
                    .confirm_overwrite(output_path)
                    .await
                    .ok_or(Error::Exit)?;
                match action {
                    OverwriteAction::OverwriteOne => Ok(true),
                    OverwriteAction::SkipOne => Ok(false),
                    OverwriteAction::OverwriteAll => {
                        ctx.options.overwrite_existing_file =
                            Dynamic::Value(OverwritePolicy::Always);
                        Ok(true)
                    }
                    OverwriteAction::SkipAll => {
                        ctx.options.overwrite_existing_file =
                            Dynamic::Value(OverwritePolicy::Never);
                        Ok(false)
                    }
                }
            }
        }
    }

    async fn produce_content(
        &self,
        ctx: &Context,
        template_file: &str,
        data: String,
    ) -> Result<String> {
        if is_module_file(template_file) {
            // a broken module degrades to the raw file text
            let output = match self.host.modules.execute(template_file, ctx).await {
                Ok(output) => output,
                Err(err) => {
                    self.host
                        .notifier
                        .warn(&format!("module '{template_file}' failed: {err}"));
                    return Ok(data);
                }
            };
            return Ok(match output {
                ModuleOutput::Data(value) => serde_json::to_string_pretty(&value)?,
                ModuleOutput::Text(text) => {
                    if ctx.options.interpolate_template_content.resolve(ctx)
                        && !ctx.options.disable_interpolation.resolve(ctx)
                    {
                        let by_line = ctx.options.interpolate_by_line.resolve(ctx);
                        let (rendered, errors) = render_resilient(&text, ctx, by_line);
                        self.report_interpolation_errors(ctx, template_file, &errors);
                        rendered
                    } else {
                        text
                    }
                }
            });
        }

        if ctx.options.disable_interpolation.resolve(ctx) {
            return Ok(data);
        }
        let by_line = ctx.options.interpolate_by_line.resolve(ctx);
        let (rendered, errors) = render_resilient(&data, ctx, by_line);
        self.report_interpolation_errors(ctx, template_file, &errors);
        Ok(rendered)
    }

    async fn write_output(&self, ctx: &Context, output_path: &str, content: &str) -> Result<()> {
        if ctx.options.enable_snippet_generation.resolve(ctx)
            && self.host.editor.insert_snippet(output_path, content).await
        {
            return Ok(());
        }
        self.host.fs.write_text(output_path, content).await
    }

    async fn open_if_configured(&self, ctx: &Context, workspace: &str, output_path: &str) {
        let open = match &ctx.options.open_after_generation {
            OpenAfter::Enabled(enabled) => *enabled,
            OpenAfter::Patterns(patterns) => {
                let relative = relative_path(workspace, output_path);
                let name = basename(output_path);
                patterns.iter().any(|p| {
                    p == name
                        || match Pattern::new(p) {
                            Ok(pattern) => {
                                pattern.matches(&relative) || pattern.matches(output_path)
                            }
                            Err(_) => false,
                        }
                })
            }
        };
        if open {
            self.host.editor.open_file(output_path).await;
        }
    }

    fn report_interpolation_errors(&self, ctx: &Context, source: &str, errors: &[String]) {
        for error in errors {
            if ctx.options.disable_interpolation_error_message {
                tracing::debug!(source, %error, "interpolation fell back");
            } else {
                self.host
                    .notifier
                    .warn(&format!("interpolation in '{source}': {error}"));
            }
        }
    }
}

fn merge_bindings(ctx: &mut Context, bundle: Map<String, Value>) {
    for (key, value) in bundle {
        ctx.set_binding(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use stencil_core::capabilities::{Picked, Prompter};
    use stencil_core::options::InputConfig;

    use crate::fs::StdFileSystem;

    struct QueuePrompter {
        answers: Mutex<Vec<Value>>,
        overwrite: Mutex<Vec<OverwriteAction>>,
    }

    impl QueuePrompter {
        fn new(answers: Vec<Value>) -> Self {
            Self {
                answers: Mutex::new(answers),
                overwrite: Mutex::new(Vec::new()),
            }
        }

        fn with_overwrite(self, actions: Vec<OverwriteAction>) -> Self {
            *self.overwrite.lock().unwrap() = actions;
            self
        }
    }

    #[async_trait::async_trait]
    impl Prompter for QueuePrompter {
        async fn text(&self, _name: &str, _config: &InputConfig, _ctx: &Context) -> Option<String> {
            let mut answers = self.answers.lock().unwrap();
            if answers.is_empty() {
                return None;
            }
            match answers.remove(0) {
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            }
        }

        async fn pick(&self, _name: &str, _config: &InputConfig, _ctx: &Context) -> Option<Picked> {
            let mut answers = self.answers.lock().unwrap();
            if answers.is_empty() {
                return None;
            }
            Some(Picked::One(answers.remove(0)))
        }

        async fn pick_template_files(
            &self,
            items: &[FilePickItem],
            _ctx: &Context,
        ) -> Option<Vec<String>> {
            Some(items.iter().map(|i| i.value.clone()).collect())
        }

        async fn confirm_overwrite(&self, _file_label: &str) -> Option<OverwriteAction> {
            let mut actions = self.overwrite.lock().unwrap();
            if actions.is_empty() {
                None
            } else {
                Some(actions.remove(0))
            }
        }
    }

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

    #[tokio::test]
    async fn generates_interpolated_paths_and_contents() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("_templates/component");
        let workspace = dir.path().join("ws");
        seed(
            &template,
            &[(
                "${input.componentName}/index.ts",
                "export const ${componentName_toPascalCase} = '${componentName}';\n",
            )],
        )
        .await;
        tokio::fs::create_dir_all(&workspace).await.unwrap();

        let host = Host::new(
            Arc::new(QueuePrompter::new(vec![json!("side nav")])),
            Arc::new(StdFileSystem),
        );
        let summary = Session::new(host)
            .generate(&request(&workspace, &template), RunOptions::default())
            .await
            .unwrap();

        assert_eq!(summary.created.len(), 1);
        assert!(!summary.cancelled);
        let output = workspace.join("side nav/index.ts");
        let content = tokio::fs::read_to_string(&output).await.unwrap();
        assert_eq!(content, "export const SideNav = 'side nav';\n");
    }

    #[tokio::test]
    async fn never_policy_skips_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t");
        let workspace = dir.path().join("ws");
        seed(&template, &[("note.txt", "new content")]).await;
        seed(&workspace, &[("note.txt", "old content")]).await;

        let host = Host::new(
            Arc::new(QueuePrompter::new(vec![])),
            Arc::new(StdFileSystem),
        );
        let mut options = RunOptions::default();
        options.overwrite_existing_file = Dynamic::Value(OverwritePolicy::Never);
        let summary = Session::new(host)
            .generate(&request(&workspace, &template), options)
            .await
            .unwrap();

        assert!(summary.created.is_empty());
        assert_eq!(summary.skipped.len(), 1);
        let content = tokio::fs::read_to_string(workspace.join("note.txt"))
            .await
            .unwrap();
        assert_eq!(content, "old content");
    }

    #[tokio::test]
    async fn skip_all_answer_hardens_for_the_rest_of_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t");
        let workspace = dir.path().join("ws");
        seed(&template, &[("a.txt", "new a"), ("b.txt", "new b")]).await;
        seed(&workspace, &[("a.txt", "old a"), ("b.txt", "old b")]).await;

        // only one scripted answer; the second file must not prompt
        let prompter =
            QueuePrompter::new(vec![]).with_overwrite(vec![OverwriteAction::SkipAll]);
        let host = Host::new(Arc::new(prompter), Arc::new(StdFileSystem));
        let summary = Session::new(host)
            .generate(&request(&workspace, &template), RunOptions::default())
            .await
            .unwrap();

        assert!(summary.created.is_empty());
        assert_eq!(summary.skipped.len(), 2);
        assert!(!summary.cancelled);
    }

    #[tokio::test]
    async fn times_entries_repeat_the_file_set_with_patches() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t");
        let workspace = dir.path().join("ws");
        seed(&template, &[("${fileName}.txt", "file ${timeIndex}")]).await;
        tokio::fs::create_dir_all(&workspace).await.unwrap();

        let host = Host::new(
            Arc::new(QueuePrompter::new(vec![])),
            Arc::new(StdFileSystem),
        );
        let mut options = RunOptions::default();
        options.times = Some(Times::Entries(vec![
            stencil_core::options::TimesEntry::Patch(json!({"inputValues": {"fileName": "alpha"}})),
            stencil_core::options::TimesEntry::Patch(json!({"inputValues": {"fileName": "beta"}})),
        ]));
        let summary = Session::new(host)
            .generate(&request(&workspace, &template), options)
            .await
            .unwrap();

        assert_eq!(summary.created.len(), 2);
        assert_eq!(
            tokio::fs::read_to_string(workspace.join("alpha.txt"))
                .await
                .unwrap(),
            "file 0"
        );
        assert_eq!(
            tokio::fs::read_to_string(workspace.join("beta.txt"))
                .await
                .unwrap(),
            "file 1"
        );
    }

    struct EventPrompter {
        events: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Prompter for EventPrompter {
        async fn text(&self, name: &str, _config: &InputConfig, _ctx: &Context) -> Option<String> {
            self.events.lock().unwrap().push(format!("text:{name}"));
            Some("answered".to_string())
        }

        async fn pick(&self, _name: &str, _config: &InputConfig, _ctx: &Context) -> Option<Picked> {
            None
        }

        async fn pick_template_files(
            &self,
            items: &[FilePickItem],
            _ctx: &Context,
        ) -> Option<Vec<String>> {
            self.events.lock().unwrap().push("pick-files".to_string());
            Some(items.iter().map(|i| i.value.clone()).collect())
        }

        async fn confirm_overwrite(&self, _file_label: &str) -> Option<OverwriteAction> {
            None
        }
    }

    #[tokio::test]
    async fn eager_inputs_are_prompted_before_file_selection() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t");
        let workspace = dir.path().join("ws");
        seed(
            &template,
            &[
                ("_config.json", r#"{"input": {"scope": {"prePrompt": true}}}"#),
                ("a.txt", "a"),
                ("b.txt", "b"),
            ],
        )
        .await;
        tokio::fs::create_dir_all(&workspace).await.unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let host = Host::new(
            Arc::new(EventPrompter {
                events: events.clone(),
            }),
            Arc::new(StdFileSystem),
        );
        Session::new(host)
            .generate(&request(&workspace, &template), RunOptions::default())
            .await
            .unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.as_slice(), ["text:scope", "pick-files"]);
    }

    #[tokio::test]
    async fn declined_prompt_cancels_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t");
        let workspace = dir.path().join("ws");
        seed(&template, &[("${input.name}.txt", "x")]).await;
        tokio::fs::create_dir_all(&workspace).await.unwrap();

        // no scripted answers, so the input prompt is declined
        let host = Host::new(
            Arc::new(QueuePrompter::new(vec![])),
            Arc::new(StdFileSystem),
        );
        let summary = Session::new(host)
            .generate(&request(&workspace, &template), RunOptions::default())
            .await
            .unwrap();
        assert!(summary.cancelled);
        assert!(summary.created.is_empty());
    }
}

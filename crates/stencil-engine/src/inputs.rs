//! Input discovery and prompting
//!
//! Input names are discovered by scanning template paths and contents
//! with the configured prompt-variable patterns. Inputs flagged with
//! `prePrompt` are collected before generation starts; everything else
//! is prompted on first use. Resolved values are validated, optionally
//! transformed, then recorded in the context under every spelling
//! templates use. A name carrying a case suffix
//! (`fileName_toPascalCase`) resolves its base input and additionally
//! binds the converted form.

use regex::Regex;
use serde_json::Value;

use stencil_case::CaseFn;
use stencil_core::capabilities::{Host, Picked};
use stencil_core::context::Context;
use stencil_core::error::{Error, Result};
use stencil_core::options::{InputConfig, InputTransform, InputValidator};

use crate::interpolate::{render_with_value, value_to_string};

/// Extracts input names from the given texts, in first-seen order.
pub fn discover_input_names(texts: &[&str], patterns: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for pattern in patterns {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(err) => {
                tracing::warn!(%pattern, %err, "skipping malformed prompt-variable pattern");
                continue;
            }
        };
        for text in texts {
            for caps in re.captures_iter(text) {
                if let Some(name) = caps.get(1) {
                    let name = name.as_str().trim().to_string();
                    if !name.is_empty() && !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
        }
    }
    names
}

fn config_for(name: &str, ctx: &Context) -> InputConfig {
    if let Some(factory) = ctx.options.input_factories.get(name) {
        return factory(ctx);
    }
    match ctx.input.get(name) {
        Some(object @ Value::Object(_)) => match serde_json::from_value(object.clone()) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(name, %err, "malformed input config, prompting with defaults");
                InputConfig::default()
            }
        },
        Some(Value::Null) | None => InputConfig::default(),
        Some(scalar) => InputConfig {
            value: Some(scalar.clone()),
            ..InputConfig::default()
        },
    }
}

fn validate(config: &InputConfig, value: &Value, ctx: &Context) -> Option<String> {
    match &config.validate_input {
        None => None,
        Some(InputValidator::Call(f)) => f(value, ctx),
        Some(InputValidator::Pattern(pattern)) => {
            let re = match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(re) => re,
                Err(err) => {
                    tracing::warn!(%pattern, %err, "unusable validation pattern, accepting value");
                    return None;
                }
            };
            if re.is_match(&value_to_string(value)) {
                None
            } else {
                Some(format!("value does not match pattern '{pattern}'"))
            }
        }
    }
}

fn transform(config: &InputConfig, value: Value, ctx: &Context) -> Value {
    match &config.transform {
        None => value,
        Some(InputTransform::Call(f)) => f(&value, ctx),
        Some(InputTransform::Pattern(pattern)) => render_with_value(pattern, &value, ctx),
    }
}

async fn prompt_one(name: &str, ctx: &mut Context, host: &Host) -> Result<()> {
    // a scalar spec is already the value; a config's `value` field only
    // prefills the prompt
    if !ctx.options.input_factories.contains_key(name) {
        if let Some(scalar) = ctx.input.get(name).filter(|v| !v.is_object() && !v.is_null()) {
            let scalar = scalar.clone();
            ctx.set_input_value(name, scalar);
            return Ok(());
        }
    }
    let config = config_for(name, ctx);

    let value = loop {
        let answer = if config.options.is_empty() {
            host.prompter
                .text(name, &config, ctx)
                .await
                .map(Value::String)
        } else {
            host.prompter
                .pick(name, &config, ctx)
                .await
                .map(|picked| match picked {
                    Picked::One(v) => v,
                    Picked::Many(vs) => Value::Array(vs),
                })
        };
        let Some(answer) = answer else {
            return Err(Error::Exit);
        };
        match validate(&config, &answer, ctx) {
            Some(message) => host.notifier.warn(&format!("{name}: {message}")),
            None => break answer,
        }
    };

    let value = transform(&config, value, ctx);
    ctx.set_input_value(name, value);
    Ok(())
}

fn materialize_suffix(full_name: &str, base: &str, convert: CaseFn, ctx: &mut Context) {
    if let Some(raw) = ctx.input_values.get(base) {
        let converted = convert(&value_to_string(raw));
        ctx.set_input_value(full_name, Value::String(converted));
    }
}

/// Resolves the named inputs, prompting for any that have no value
/// yet. Cancellation surfaces as [`Error::Exit`].
pub async fn resolve_inputs(names: &[String], ctx: &mut Context, host: &Host) -> Result<()> {
    for name in names {
        let (base, suffix) = match ctx.case.split_suffix(name) {
            Some((base, _, convert)) => (base.to_string(), Some((name.clone(), convert))),
            None => (name.clone(), None),
        };
        if !ctx.input_values.contains_key(&base) {
            prompt_one(&base, ctx, host).await?;
        }
        if let Some((full, convert)) = suffix {
            materialize_suffix(&full, &base, convert, ctx);
        }
    }
    Ok(())
}

/// Prompts every configured input whose `prePrompt` flag resolves
/// true, before any file is generated.
pub async fn collect_pre_prompt_inputs(ctx: &mut Context, host: &Host) -> Result<()> {
    let mut names: Vec<String> = ctx.input.keys().cloned().collect();
    let mut factory_names: Vec<String> = ctx
        .options
        .input_factories
        .keys()
        .filter(|n| !names.contains(n))
        .cloned()
        .collect();
    factory_names.sort();
    names.extend(factory_names);

    for name in names {
        if ctx.input_values.contains_key(&name) {
            continue;
        }
        let config = config_for(&name, ctx);
        let wants_pre_prompt = config
            .pre_prompt
            .as_ref()
            .map(|p| p.resolve(ctx))
            .unwrap_or(false);
        if wants_pre_prompt {
            prompt_one(&name, ctx, host).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    use stencil_core::capabilities::{FilePickItem, FileSystem, OverwriteAction, Prompter};
    use stencil_core::options::PrePrompt;

    struct ScriptedPrompter {
        answers: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedPrompter {
        fn new(answers: Vec<(&str, Value)>) -> Self {
            Self {
                answers: Mutex::new(
                    answers
                        .into_iter()
                        .map(|(n, v)| (n.to_string(), v))
                        .collect(),
                ),
            }
        }

        fn next_for(&self, name: &str) -> Option<Value> {
            let mut answers = self.answers.lock().unwrap();
            let idx = answers.iter().position(|(n, _)| n == name)?;
            Some(answers.remove(idx).1)
        }
    }

    #[async_trait::async_trait]
    impl Prompter for ScriptedPrompter {
        async fn text(&self, name: &str, _config: &InputConfig, _ctx: &Context) -> Option<String> {
            self.next_for(name).map(|v| value_to_string(&v))
        }

        async fn pick(&self, name: &str, _config: &InputConfig, _ctx: &Context) -> Option<Picked> {
            self.next_for(name).map(Picked::One)
        }

        async fn pick_template_files(
            &self,
            items: &[FilePickItem],
            _ctx: &Context,
        ) -> Option<Vec<String>> {
            Some(items.iter().map(|i| i.value.clone()).collect())
        }

        async fn confirm_overwrite(&self, _file_label: &str) -> Option<OverwriteAction> {
            Some(OverwriteAction::OverwriteOne)
        }
    }

    struct DenyFs;

    #[async_trait::async_trait]
    impl FileSystem for DenyFs {
        async fn list_files(
            &self,
            _root: &str,
            _exclude: &[String],
            _include: &[String],
        ) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
        fn exists(&self, _path: &str) -> bool {
            false
        }
        fn is_dir(&self, _path: &str) -> bool {
            false
        }
        async fn read_text(&self, _path: &str) -> Result<String> {
            Ok(String::new())
        }
        async fn write_text(&self, _path: &str, _content: &str) -> Result<()> {
            Ok(())
        }
        async fn ensure_dir(&self, _path: &str) -> Result<()> {
            Ok(())
        }
    }

    fn host_with(prompter: ScriptedPrompter) -> Host {
        Host::new(Arc::new(prompter), Arc::new(DenyFs))
    }

    #[test]
    fn discovery_keeps_first_seen_order_and_dedupes() {
        let patterns = vec![r"\$\{input\.([^\}]+)\}".to_string()];
        let names = discover_input_names(
            &[
                "${input.componentName}/index.${input.ext}",
                "uses ${input.componentName} again",
            ],
            &patterns,
        );
        assert_eq!(names, ["componentName", "ext"]);
    }

    #[tokio::test]
    async fn prompts_and_stores_under_all_spellings() {
        let host = host_with(ScriptedPrompter::new(vec![(
            "componentName",
            json!("side nav"),
        )]));
        let mut ctx = Context::new();
        resolve_inputs(&["componentName".to_string()], &mut ctx, &host)
            .await
            .unwrap();
        assert_eq!(ctx.lookup_path("input.componentName"), Some(json!("side nav")));
        assert_eq!(ctx.lookup_path("componentName"), Some(json!("side nav")));
    }

    #[tokio::test]
    async fn scalar_spec_resolves_without_prompting() {
        let host = host_with(ScriptedPrompter::new(vec![]));
        let mut ctx = Context::new();
        ctx.apply_patch(&json!({"input": {"ext": "tsx"}}));
        resolve_inputs(&["ext".to_string()], &mut ctx, &host)
            .await
            .unwrap();
        assert_eq!(ctx.input_values.get("ext"), Some(&json!("tsx")));
    }

    #[tokio::test]
    async fn config_value_prefills_but_still_prompts() {
        let host = host_with(ScriptedPrompter::new(vec![("ext", json!("md"))]));
        let mut ctx = Context::new();
        ctx.apply_patch(&json!({"input": {"ext": {"value": "tsx"}}}));
        resolve_inputs(&["ext".to_string()], &mut ctx, &host)
            .await
            .unwrap();
        assert_eq!(ctx.input_values.get("ext"), Some(&json!("md")));
    }

    #[tokio::test]
    async fn transform_pattern_rewrites_the_answer() {
        let host = host_with(ScriptedPrompter::new(vec![(
            "componentName",
            json!("my widget"),
        )]));
        let mut ctx = Context::new();
        ctx.apply_patch(&json!({
            "input": {"componentName": {"transform": "${value_toPascalCase}"}}
        }));
        resolve_inputs(&["componentName".to_string()], &mut ctx, &host)
            .await
            .unwrap();
        assert_eq!(ctx.input_values.get("componentName"), Some(&json!("MyWidget")));
    }

    #[tokio::test]
    async fn suffixed_name_materializes_converted_binding() {
        let host = host_with(ScriptedPrompter::new(vec![(
            "fileName",
            json!("user profile"),
        )]));
        let mut ctx = Context::new();
        resolve_inputs(&["fileName_toKebabCase".to_string()], &mut ctx, &host)
            .await
            .unwrap();
        assert_eq!(ctx.input_values.get("fileName"), Some(&json!("user profile")));
        // the converted form is stored under every input spelling
        assert_eq!(
            ctx.bindings.get("fileName_toKebabCase"),
            Some(&json!("user-profile"))
        );
        assert_eq!(
            ctx.lookup_path("inputValues.fileName_toKebabCase"),
            Some(json!("user-profile"))
        );
        assert_eq!(
            ctx.lookup_path("input.fileName_toKebabCase"),
            Some(json!("user-profile"))
        );
    }

    #[tokio::test]
    async fn invalid_answers_are_rejected_until_one_passes() {
        let host = host_with(ScriptedPrompter::new(vec![
            ("port", json!("not-a-port")),
            ("port", json!("8080")),
        ]));
        let mut ctx = Context::new();
        ctx.apply_patch(&json!({"input": {"port": {"validateInput": r"\d+"}}}));
        resolve_inputs(&["port".to_string()], &mut ctx, &host)
            .await
            .unwrap();
        assert_eq!(ctx.input_values.get("port"), Some(&json!("8080")));
    }

    #[tokio::test]
    async fn cancellation_surfaces_as_exit() {
        let host = host_with(ScriptedPrompter::new(vec![]));
        let mut ctx = Context::new();
        let err = resolve_inputs(&["componentName".to_string()], &mut ctx, &host)
            .await
            .unwrap_err();
        assert!(err.is_exit());
    }

    #[tokio::test]
    async fn pre_prompt_collects_only_flagged_inputs() {
        let host = host_with(ScriptedPrompter::new(vec![("eager", json!("now"))]));
        let mut ctx = Context::new();
        ctx.apply_patch(&json!({
            "input": {
                "eager": {"prePrompt": true},
                "lazy": {"title": "later"}
            }
        }));
        collect_pre_prompt_inputs(&mut ctx, &host).await.unwrap();
        assert_eq!(ctx.input_values.get("eager"), Some(&json!("now")));
        assert!(ctx.input_values.get("lazy").is_none());
    }

    #[tokio::test]
    async fn pre_prompt_callback_sees_the_context() {
        let host = host_with(ScriptedPrompter::new(vec![("maybe", json!("yes"))]));
        let mut ctx = Context::new();
        ctx.apply_patch(&json!({"mode": "full"}));
        ctx.options.input_factories.insert(
            "maybe".to_string(),
            Arc::new(|_ctx: &Context| InputConfig {
                pre_prompt: Some(PrePrompt::Call(Arc::new(|ctx: &Context| {
                    ctx.lookup_path("mode") == Some(json!("full"))
                }))),
                ..InputConfig::default()
            }),
        );
        collect_pre_prompt_inputs(&mut ctx, &host).await.unwrap();
        assert_eq!(ctx.input_values.get("maybe"), Some(&json!("yes")));
    }
}

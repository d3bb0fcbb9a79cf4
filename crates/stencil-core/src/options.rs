//! Run options and input configuration
//!
//! These types mirror the knobs a template config can set. Most of
//! them are either a plain value or a host-supplied callback evaluated
//! against the live context, which `Dynamic` captures. Declarative
//! configs deserialize into the value form only; callbacks can be
//! installed solely from host code.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::context::Context;
use crate::hooks::LifecycleHooks;

/// A setting that is either a literal or computed from the context.
pub enum Dynamic<T> {
    /// Fixed value
    Value(T),
    /// Host callback, re-evaluated at each use site
    Call(Arc<dyn Fn(&Context) -> T + Send + Sync>),
}

impl<T: Clone> Dynamic<T> {
    /// Evaluates the setting against the current context.
    pub fn resolve(&self, ctx: &Context) -> T {
        match self {
            Dynamic::Value(v) => v.clone(),
            Dynamic::Call(f) => f(ctx),
        }
    }
}

impl<T> From<T> for Dynamic<T> {
    fn from(value: T) -> Self {
        Dynamic::Value(value)
    }
}

impl<T: Clone> Clone for Dynamic<T> {
    fn clone(&self) -> Self {
        match self {
            Dynamic::Value(v) => Dynamic::Value(v.clone()),
            Dynamic::Call(f) => Dynamic::Call(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Dynamic::Call(_) => f.write_str("Call(<fn>)"),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Dynamic<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Dynamic::Value)
    }
}

/// Policy for output files that already exist on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Ask per file; the answer may harden into `Always` or `Never`
    /// for the rest of the run.
    Prompt,
    /// Silently skip existing files
    Never,
    /// Silently overwrite existing files
    Always,
}

/// Whether and which generated files to open in the editor.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpenAfter {
    /// Open all (`true`) or none (`false`)
    Enabled(bool),
    /// Open only files matching one of these glob patterns
    Patterns(Vec<String>),
}

/// One iteration of a repeated-generation (`times`) run.
#[derive(Clone)]
pub enum TimesEntry {
    /// Context patch merged for this iteration; a literal `false`
    /// skips it
    Patch(Value),
    /// Callback producing the patch; `None` skips the iteration
    Call(Arc<dyn Fn(&Context) -> Option<Value> + Send + Sync>),
}

impl TimesEntry {
    /// Patch for this iteration, or `None` to skip it.
    pub fn resolve(&self, ctx: &Context) -> Option<Value> {
        match self {
            TimesEntry::Patch(Value::Bool(false)) => None,
            TimesEntry::Patch(v) => Some(v.clone()),
            TimesEntry::Call(f) => f(ctx),
        }
    }
}

impl fmt::Debug for TimesEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimesEntry::Patch(v) => f.debug_tuple("Patch").field(v).finish(),
            TimesEntry::Call(_) => f.write_str("Call(<fn>)"),
        }
    }
}

impl<'de> Deserialize<'de> for TimesEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(TimesEntry::Patch)
    }
}

/// Repeated-generation directive.
#[derive(Debug, Clone)]
pub enum Times {
    /// Run the whole file set `n` times with `timeIndex` bumped
    Count(u64),
    /// Run once per entry, merging each entry's patch first
    Entries(Vec<TimesEntry>),
}

impl<'de> Deserialize<'de> for Times {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;
        match Value::deserialize(deserializer)? {
            Value::Bool(false) => Ok(Times::Count(1)),
            Value::Number(n) => n
                .as_u64()
                .map(Times::Count)
                .ok_or_else(|| D::Error::custom("times must be a non-negative integer")),
            Value::Array(items) => Ok(Times::Entries(
                items.into_iter().map(TimesEntry::Patch).collect(),
            )),
            other => Err(D::Error::custom(format!(
                "times must be a number or an array, got {other}"
            ))),
        }
    }
}

/// One selectable option of a choice input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PickOption {
    /// Rich item with a display label distinct from the stored value
    Detailed {
        /// Display label
        label: String,
        /// Value stored in the context on selection
        value: Value,
        /// Secondary line shown next to the label
        #[serde(default)]
        description: Option<String>,
        /// Tertiary detail line
        #[serde(default)]
        detail: Option<String>,
        /// Pre-selected state in multi-select prompts
        #[serde(default)]
        picked: bool,
    },
    /// Bare value doubling as its own label
    Simple(Value),
}

impl PickOption {
    /// Value stored in the context when this option is chosen.
    pub fn value(&self) -> &Value {
        match self {
            PickOption::Simple(v) => v,
            PickOption::Detailed { value, .. } => value,
        }
    }

    /// Display label for prompts.
    pub fn label(&self) -> String {
        match self {
            PickOption::Simple(Value::String(s)) => s.clone(),
            PickOption::Simple(v) => v.to_string(),
            PickOption::Detailed { label, .. } => label.clone(),
        }
    }
}

/// Whether an input is collected up-front or on first use.
#[derive(Clone)]
pub enum PrePrompt {
    /// Fixed flag
    Flag(bool),
    /// Decided against the context at prompt-collection time
    Call(Arc<dyn Fn(&Context) -> bool + Send + Sync>),
}

impl PrePrompt {
    /// Evaluates the flag.
    pub fn resolve(&self, ctx: &Context) -> bool {
        match self {
            PrePrompt::Flag(b) => *b,
            PrePrompt::Call(f) => f(ctx),
        }
    }
}

impl fmt::Debug for PrePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrePrompt::Flag(b) => f.debug_tuple("Flag").field(b).finish(),
            PrePrompt::Call(_) => f.write_str("Call(<fn>)"),
        }
    }
}

impl<'de> Deserialize<'de> for PrePrompt {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(PrePrompt::Flag)
    }
}

/// Validation rule for a prompted value.
pub enum InputValidator {
    /// Regex the raw text answer must match in full
    Pattern(String),
    /// Host callback returning an error message for invalid values
    Call(Arc<dyn Fn(&Value, &Context) -> Option<String> + Send + Sync>),
}

impl Clone for InputValidator {
    fn clone(&self) -> Self {
        match self {
            InputValidator::Pattern(p) => InputValidator::Pattern(p.clone()),
            InputValidator::Call(f) => InputValidator::Call(Arc::clone(f)),
        }
    }
}

impl fmt::Debug for InputValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValidator::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            InputValidator::Call(_) => f.write_str("Call(<fn>)"),
        }
    }
}

impl<'de> Deserialize<'de> for InputValidator {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(InputValidator::Pattern)
    }
}

/// Post-answer transformation of a prompted value.
pub enum InputTransform {
    /// Interpolation template evaluated with the answer bound as
    /// `value`, e.g. `"${value_toPascalCase}"`.
    Pattern(String),
    /// Host callback mapping the answer to its stored form
    Call(Arc<dyn Fn(&Value, &Context) -> Value + Send + Sync>),
}

impl Clone for InputTransform {
    fn clone(&self) -> Self {
        match self {
            InputTransform::Pattern(p) => InputTransform::Pattern(p.clone()),
            InputTransform::Call(f) => InputTransform::Call(Arc::clone(f)),
        }
    }
}

impl fmt::Debug for InputTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputTransform::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            InputTransform::Call(_) => f.write_str("Call(<fn>)"),
        }
    }
}

impl<'de> Deserialize<'de> for InputTransform {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(InputTransform::Pattern)
    }
}

/// Declarative description of one named input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputConfig {
    /// Default offered in the prompt box
    pub value: Option<Value>,
    /// Prompt title
    pub title: Option<String>,
    /// Placeholder text shown in the empty prompt
    pub place_holder: Option<String>,
    /// Choices; non-empty turns the prompt into a pick list
    pub options: Vec<PickOption>,
    /// Allow selecting several options
    pub can_pick_many: bool,
    /// Mask typed characters
    pub password: bool,
    /// Keep the prompt open when focus moves away
    pub ignore_focus_out: bool,
    /// Match pick filters against option descriptions
    pub match_on_description: bool,
    /// Match pick filters against option details
    pub match_on_detail: bool,
    /// Collect this input before generation starts
    pub pre_prompt: Option<PrePrompt>,
    /// Validation applied to the raw answer
    pub validate_input: Option<InputValidator>,
    /// Transformation applied to the accepted answer
    pub transform: Option<InputTransform>,
}

/// Host callback producing an input config from the live context.
pub type InputFactory = Arc<dyn Fn(&Context) -> InputConfig + Send + Sync>;

fn default_prompt_variable_patterns() -> Vec<String> {
    vec![r"\$\{input\.([^\}]+)\}".to_string()]
}

/// Every tunable of a generation run.
///
/// Configs patch individual fields through [`RunOptions::apply_key`];
/// hosts may also construct the struct directly to install callbacks,
/// input factories and lifecycle hooks.
#[derive(Clone)]
pub struct RunOptions {
    /// Output root directory
    pub out: String,
    /// Glob patterns excluded from template enumeration
    pub exclude: Vec<String>,
    /// Glob patterns the enumeration is restricted to, when non-empty
    pub include: Vec<String>,
    /// Policy for existing output files
    pub overwrite_existing_file: Dynamic<OverwritePolicy>,
    /// Show the template-file multi-select before generating
    pub prompt_template_files: Dynamic<bool>,
    /// Write files through editable editor snippets
    pub enable_snippet_generation: Dynamic<bool>,
    /// Open generated files in the editor
    pub open_after_generation: OpenAfter,
    /// Copy file contents verbatim, skipping `${...}` evaluation
    pub disable_interpolation: Dynamic<bool>,
    /// Interpolate line by line so one bad line cannot spoil the file
    pub interpolate_by_line: Dynamic<bool>,
    /// Also interpolate the output of executable template modules
    pub interpolate_template_content: Dynamic<bool>,
    /// Suppress per-expression interpolation warnings
    pub disable_interpolation_error_message: bool,
    /// Regexes (one capture group each) that discover input names in
    /// template text and paths
    pub prompt_variable_patterns: Vec<String>,
    /// Repeated-generation directive
    pub times: Option<Times>,
    /// Basename of the config file looked up per template
    pub config_name: String,
    /// Host-supplied dynamic input configs, keyed by input name
    pub input_factories: HashMap<String, InputFactory>,
    /// Host-registered lifecycle hooks
    pub hooks: Option<Arc<dyn LifecycleHooks>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            out: String::new(),
            exclude: Vec::new(),
            include: Vec::new(),
            overwrite_existing_file: Dynamic::Value(OverwritePolicy::Prompt),
            prompt_template_files: Dynamic::Value(true),
            enable_snippet_generation: Dynamic::Value(false),
            open_after_generation: OpenAfter::Enabled(true),
            disable_interpolation: Dynamic::Value(false),
            interpolate_by_line: Dynamic::Value(false),
            interpolate_template_content: Dynamic::Value(false),
            disable_interpolation_error_message: false,
            prompt_variable_patterns: default_prompt_variable_patterns(),
            times: None,
            config_name: "_config".to_string(),
            input_factories: HashMap::new(),
            hooks: None,
        }
    }
}

impl fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("out", &self.out)
            .field("exclude", &self.exclude)
            .field("include", &self.include)
            .field("overwrite_existing_file", &self.overwrite_existing_file)
            .field("prompt_template_files", &self.prompt_template_files)
            .field("enable_snippet_generation", &self.enable_snippet_generation)
            .field("open_after_generation", &self.open_after_generation)
            .field("disable_interpolation", &self.disable_interpolation)
            .field("interpolate_by_line", &self.interpolate_by_line)
            .field(
                "interpolate_template_content",
                &self.interpolate_template_content,
            )
            .field("times", &self.times)
            .field("config_name", &self.config_name)
            .finish_non_exhaustive()
    }
}

impl RunOptions {
    /// Applies one camelCase config key. Returns `true` when the key
    /// names an option; unparseable values leave the option unchanged.
    pub fn apply_key(&mut self, key: &str, value: &Value) -> bool {
        fn set<T: for<'de> Deserialize<'de>>(slot: &mut T, key: &str, value: &Value) {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(parsed) => *slot = parsed,
                Err(err) => {
                    tracing::warn!(key, %err, "ignoring malformed option value");
                }
            }
        }

        match key {
            "out" => set(&mut self.out, key, value),
            "exclude" => set(&mut self.exclude, key, value),
            "include" => set(&mut self.include, key, value),
            "overwriteExistingFile" => set(&mut self.overwrite_existing_file, key, value),
            "promptTemplateFiles" => set(&mut self.prompt_template_files, key, value),
            "enableSnippetGeneration" => set(&mut self.enable_snippet_generation, key, value),
            "openAfterGeneration" => set(&mut self.open_after_generation, key, value),
            "disableInterpolation" => set(&mut self.disable_interpolation, key, value),
            "interpolateByLine" => set(&mut self.interpolate_by_line, key, value),
            "interpolateTemplateContent" => set(&mut self.interpolate_template_content, key, value),
            "disableInterpolationErrorMessage" => {
                set(&mut self.disable_interpolation_error_message, key, value)
            }
            "promptVariablePatterns" => set(&mut self.prompt_variable_patterns, key, value),
            "times" => {
                let mut parsed = None;
                set(&mut parsed, key, value);
                if parsed.is_some() {
                    self.times = parsed;
                }
            }
            "configName" => set(&mut self.config_name, key, value),
            _ => return false,
        }
        true
    }

    /// Whether `key` names a run option rather than plain context data.
    pub fn is_option_key(key: &str) -> bool {
        matches!(
            key,
            "out"
                | "exclude"
                | "include"
                | "overwriteExistingFile"
                | "promptTemplateFiles"
                | "enableSnippetGeneration"
                | "openAfterGeneration"
                | "disableInterpolation"
                | "interpolateByLine"
                | "interpolateTemplateContent"
                | "disableInterpolationErrorMessage"
                | "promptVariablePatterns"
                | "times"
                | "configName"
        )
    }
}

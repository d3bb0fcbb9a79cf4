//! The generation context
//!
//! A context carries everything an expression can see: free-form
//! top-level bindings, the `variables`, `input` and `inputValues`
//! groups, the run options and the case-converter registry. Config
//! layers, hook results and `times` entries all land here through
//! [`Context::apply_patch`], which implements the layered merge rules:
//! group keys merge key-wise, `variables` and `inputValues` are also
//! flattened to the top level, `inputValues` entries additionally
//! mirror onto `input`, the `input` group itself is not flattened, and
//! option keys are routed into [`RunOptions`].

use std::sync::Arc;

use serde_json::{Map, Value};

use stencil_case::CaseRegistry;

use crate::options::RunOptions;

/// Live state of a generation run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Template-defined helper values, also mirrored at the top level
    pub variables: Map<String, Value>,
    /// Input configurations (and, once resolved, values), by name
    pub input: Map<String, Value>,
    /// Resolved input values, also mirrored at the top level
    pub input_values: Map<String, Value>,
    /// Free-form top-level bindings visible to every expression
    pub bindings: Map<String, Value>,
    /// Run options, patched by config layers
    pub options: RunOptions,
    /// Case converters available to expressions and suffixes
    pub case: Arc<CaseRegistry>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            variables: Map::new(),
            input: Map::new(),
            input_values: Map::new(),
            bindings: Map::new(),
            options: RunOptions::default(),
            case: Arc::new(CaseRegistry::builtin()),
        }
    }
}

/// Recursively merges `src` into `dst`; objects merge key-wise, every
/// other value replaces.
pub fn deep_merge(dst: &mut Value, src: &Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, value) in src_map {
                match dst_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        dst_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (dst, src) => *dst = src.clone(),
    }
}

fn merge_into_map(map: &mut Map<String, Value>, key: &str, value: &Value) {
    match map.get_mut(key) {
        Some(existing) => deep_merge(existing, value),
        None => {
            map.insert(key.to_string(), value.clone());
        }
    }
}

impl Context {
    /// Fresh context with builtin case converters and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh context carrying host-configured options.
    pub fn with_options(options: RunOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Merges a config/hook patch into the context.
    pub fn apply_patch(&mut self, patch: &Value) {
        let Value::Object(entries) = patch else {
            return;
        };
        for (key, value) in entries {
            match key.as_str() {
                "variables" => {
                    if let Value::Object(vars) = value {
                        for (name, v) in vars {
                            merge_into_map(&mut self.variables, name, v);
                            merge_into_map(&mut self.bindings, name, v);
                        }
                    }
                }
                "inputValues" => {
                    if let Value::Object(values) = value {
                        for (name, v) in values {
                            merge_into_map(&mut self.input_values, name, v);
                            merge_into_map(&mut self.input, name, v);
                            merge_into_map(&mut self.bindings, name, v);
                        }
                    }
                }
                "input" => {
                    if let Value::Object(configs) = value {
                        for (name, v) in configs {
                            merge_into_map(&mut self.input, name, v);
                        }
                    }
                }
                _ if RunOptions::is_option_key(key) => {
                    self.options.apply_key(key, value);
                    merge_into_map(&mut self.bindings, key, value);
                }
                _ => merge_into_map(&mut self.bindings, key, value),
            }
        }
    }

    /// Sets or replaces one top-level binding.
    pub fn set_binding(&mut self, key: impl Into<String>, value: Value) {
        self.bindings.insert(key.into(), value);
    }

    /// Records a resolved input value under every name templates use:
    /// `inputValues.<name>`, `input.<name>` and the bare top level.
    pub fn set_input_value(&mut self, name: &str, value: Value) {
        self.input_values.insert(name.to_string(), value.clone());
        self.input.insert(name.to_string(), value.clone());
        self.bindings.insert(name.to_string(), value);
    }

    /// Resolves a dotted expression path against the context root.
    ///
    /// The first segment may name one of the groups (`variables`,
    /// `input`, `inputValues`) or any top-level binding; the remaining
    /// segments walk object fields.
    pub fn lookup_path(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = match first {
            "variables" => Value::Object(self.variables.clone()),
            "input" => Value::Object(self.input.clone()),
            "inputValues" => Value::Object(self.input_values.clone()),
            name => self.bindings.get(name)?.clone(),
        };
        for segment in segments {
            current = current.get(segment)?.clone();
        }
        Some(current)
    }

    /// Resolves a bare identifier the way undefined-variable recovery
    /// does: resolved input values first, then template variables, then
    /// the input entry (its `value` field when it is a config object),
    /// then any top-level binding.
    pub fn lookup_identifier(&self, name: &str) -> Option<Value> {
        if let Some(v) = self.input_values.get(name) {
            return Some(v.clone());
        }
        if let Some(v) = self.variables.get(name) {
            return Some(v.clone());
        }
        if let Some(entry) = self.input.get(name) {
            match entry {
                Value::Object(config) => {
                    if let Some(v) = config.get("value") {
                        if !v.is_null() {
                            return Some(v.clone());
                        }
                    }
                }
                other => return Some(other.clone()),
            }
        }
        self.bindings.get(name).cloned()
    }
}

//! `${...}` expression interpolation
//!
//! Templates embed `${expression}` placeholders in file contents and
//! file names. An expression is a dotted context path, optionally
//! carrying a case-converter suffix (`${componentName_toPascalCase}`).
//! `\${` escapes a literal placeholder. When any expression of a text
//! cannot be resolved the whole text falls back to its original form;
//! line-by-line mode confines the fallback to the offending lines.

use serde_json::{Map, Value};

use stencil_core::context::Context;
use stencil_core::error::{Error, Result};

/// Renders a value the way templates expect: strings bare, scalars in
/// their literal form, arrays comma-joined, objects as JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn is_path_expr(expr: &str) -> bool {
    !expr.is_empty()
        && expr.split('.').all(|seg| {
            !seg.is_empty()
                && seg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

fn lookup(expr: &str, ctx: &Context, extra: Option<&Map<String, Value>>) -> Option<Value> {
    if let Some(extra) = extra {
        if let Some(v) = extra.get(expr) {
            return Some(v.clone());
        }
    }
    if expr.contains('.') {
        ctx.lookup_path(expr)
    } else {
        ctx.lookup_identifier(expr)
    }
}

/// Evaluates one placeholder expression against the context.
fn eval_expr(expr: &str, ctx: &Context, extra: Option<&Map<String, Value>>) -> Option<Value> {
    let expr = expr.trim();
    if !is_path_expr(expr) {
        return None;
    }
    if let Some(v) = lookup(expr, ctx, extra) {
        return Some(v);
    }
    // `name_toPascalCase` resolves `name`, then converts
    if let Some((base, _, convert)) = ctx.case.split_suffix(expr) {
        if let Some(v) = lookup(base, ctx, extra) {
            return Some(Value::String(convert(&value_to_string(&v))));
        }
    }
    None
}

fn render_inner(
    text: &str,
    ctx: &Context,
    extra: Option<&Map<String, Value>>,
) -> std::result::Result<String, String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && text[i..].starts_with("\\${") {
            out.push_str("${");
            i += 3;
            continue;
        }
        if text[i..].starts_with("${") {
            let body_start = i + 2;
            let mut depth = 1usize;
            let mut j = body_start;
            while j < bytes.len() && depth > 0 {
                match bytes[j] {
                    b'{' => depth += 1,
                    b'}' => depth -= 1,
                    _ => {}
                }
                j += 1;
            }
            if depth != 0 {
                return Err(format!("unterminated expression at byte {i}"));
            }
            let expr = &text[body_start..j - 1];
            match eval_expr(expr, ctx, extra) {
                Some(value) => out.push_str(&value_to_string(&value)),
                None => return Err(format!("cannot resolve '{}'", expr.trim())),
            }
            i = j;
            continue;
        }
        let ch = text[i..].chars().next().unwrap_or('\u{fffd}');
        out.push(ch);
        i += ch.len_utf8();
    }
    Ok(out)
}

/// Interpolates `text`, failing on the first unresolvable expression.
pub fn render(text: &str, ctx: &Context) -> Result<String> {
    render_inner(text, ctx, None).map_err(Error::Interpolation)
}

/// Interpolates an input-transform pattern with the raw answer bound
/// as `value`. An unresolvable pattern yields the answer unchanged.
pub fn render_with_value(pattern: &str, value: &Value, ctx: &Context) -> Value {
    let mut extra = Map::new();
    extra.insert("value".to_string(), value.clone());
    match render_inner(pattern, ctx, Some(&extra)) {
        Ok(text) => Value::String(text),
        Err(reason) => {
            tracing::debug!(pattern, %reason, "transform pattern left unapplied");
            value.clone()
        }
    }
}

/// Interpolates `text`, falling back to the original on failure.
///
/// With `by_line` set, each line renders independently and only failed
/// lines keep their original form. Returns the rendered text and the
/// failure reasons, if any.
pub fn render_resilient(text: &str, ctx: &Context, by_line: bool) -> (String, Vec<String>) {
    if !by_line {
        return match render_inner(text, ctx, None) {
            Ok(rendered) => (rendered, Vec::new()),
            Err(reason) => (text.to_string(), vec![reason]),
        };
    }
    let mut errors = Vec::new();
    let mut lines = Vec::new();
    for line in text.split('\n') {
        match render_inner(line, ctx, None) {
            Ok(rendered) => lines.push(rendered),
            Err(reason) => {
                errors.push(reason);
                lines.push(line.to_string());
            }
        }
    }
    (lines.join("\n"), errors)
}

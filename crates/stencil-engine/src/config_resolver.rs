//! Template configuration lookup
//!
//! Each template directory may carry a config named after
//! `configName` (default `_config`), looked up as `_config.json`, then
//! `_config.js`, then `_config/index.js`; the first that exists wins.
//! A config at the templates root acts as the common layer and merges
//! beneath each template's own. Broken configs are reported and
//! ignored, never fatal.

use serde_json::Value;

use stencil_core::capabilities::{Host, ModuleOutput};
use stencil_core::context::Context;

/// Whether an enumerated template file belongs to the config rather
/// than the generated output.
pub fn is_config_entry(relative: &str, config_name: &str) -> bool {
    relative
        .split('/')
        .any(|segment| segment == config_name || segment.starts_with(&format!("{config_name}.")))
}

async fn load_candidate(path: &str, ctx: &Context, host: &Host, executable: bool) -> Option<Value> {
    if !host.fs.exists(path) {
        return None;
    }
    if executable {
        match host.modules.execute(path, ctx).await {
            Ok(ModuleOutput::Data(value)) => Some(value),
            Ok(ModuleOutput::Text(_)) => {
                host.notifier
                    .warn(&format!("config module '{path}' did not return data"));
                None
            }
            Err(err) => {
                host.notifier
                    .warn(&format!("failed to load config '{path}': {err}"));
                None
            }
        }
    } else {
        let text = match host.fs.read_text(path).await {
            Ok(text) => text,
            Err(err) => {
                host.notifier
                    .warn(&format!("failed to read config '{path}': {err}"));
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                host.notifier
                    .warn(&format!("malformed config '{path}': {err}"));
                None
            }
        }
    }
}

/// Loads the config layer of `dir`, if it has one.
pub async fn load_config(dir: &str, ctx: &Context, host: &Host) -> Option<Value> {
    let name = ctx.options.config_name.clone();
    let candidates = [
        (format!("{dir}/{name}.json"), false),
        (format!("{dir}/{name}.js"), true),
        (format!("{dir}/{name}/index.js"), true),
    ];
    for (path, executable) in candidates {
        if host.fs.exists(&path) {
            return load_candidate(&path, ctx, host, executable).await;
        }
    }
    None
}

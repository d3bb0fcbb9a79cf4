//! Lifecycle hook contract
//!
//! Hooks are host-registered code; declarative template configs cannot
//! carry them. Each slot may veto a phase, amend the context, or do
//! nothing. The two `process_*` slots additionally see and may replace
//! the file data being generated.

use async_trait::async_trait;
use serde_json::Value;

use crate::context::Context;
use crate::error::Result;

/// Result of a context-mutating hook (`before_all`, `before_each`,
/// `after_each`, `after_all`).
#[derive(Debug, Clone)]
pub enum HookOutcome {
    /// Continue with the context unchanged.
    NoChange,
    /// Merge the patch into the context and continue.
    Continue(Value),
    /// Abort the current phase: the file for `before_each`, the whole
    /// batch for `before_all`.
    Skip,
}

/// Result of a data-mutating hook (`process_before_each`,
/// `process_after_each`).
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// Keep the data unchanged.
    NoChange,
    /// Replace the data and/or merge a context patch. `data: None`
    /// keeps the original data while still applying the patch.
    Replace {
        /// Replacement file data, if any
        data: Option<String>,
        /// Context patch to merge, if any
        context: Option<Value>,
    },
    /// Skip generating this file.
    Skip,
}

/// The six lifecycle slots of a generation run.
///
/// Every method defaults to a no-op, so hosts implement only the slots
/// they care about.
#[async_trait]
pub trait LifecycleHooks: Send + Sync {
    /// Runs once before any file of the selected set is generated.
    async fn before_all(&self, _ctx: &Context) -> Result<HookOutcome> {
        Ok(HookOutcome::NoChange)
    }

    /// Runs before each template file.
    async fn before_each(&self, _ctx: &Context) -> Result<HookOutcome> {
        Ok(HookOutcome::NoChange)
    }

    /// Sees the raw file data before interpolation.
    async fn process_before_each(&self, _data: &str, _ctx: &Context) -> Result<ProcessOutcome> {
        Ok(ProcessOutcome::NoChange)
    }

    /// Sees the file data after interpolation, before the write.
    async fn process_after_each(&self, _data: &str, _ctx: &Context) -> Result<ProcessOutcome> {
        Ok(ProcessOutcome::NoChange)
    }

    /// Runs after each file has been written.
    async fn after_each(&self, _ctx: &Context) -> Result<HookOutcome> {
        Ok(HookOutcome::NoChange)
    }

    /// Runs once after the whole selected set.
    async fn after_all(&self, _ctx: &Context) -> Result<HookOutcome> {
        Ok(HookOutcome::NoChange)
    }
}

/// Hook implementation with every slot left at its default.
pub struct NoHooks;

#[async_trait]
impl LifecycleHooks for NoHooks {}

//! Lifecycle hook dispatch
//!
//! Thin layer between the generation loop and host-registered hooks:
//! it picks the right slot, merges any returned context patch, and
//! folds the outcome down to "carry on or skip". A misbehaving hook is
//! reported and treated as a no-op; only the Exit signal passes
//! through.

use stencil_core::context::Context;
use stencil_core::error::Result;
use stencil_core::hooks::{HookOutcome, LifecycleHooks, ProcessOutcome};

/// Context-mutating hook slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookSlot {
    /// Once before the first file
    BeforeAll,
    /// Before each file
    BeforeEach,
    /// After each file
    AfterEach,
    /// Once after the last file
    AfterAll,
}

/// Data-mutating hook slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessSlot {
    /// Raw data, before interpolation
    BeforeEach,
    /// Interpolated data, before the write
    AfterEach,
}

/// Runs a context hook. Returns `false` when the hook vetoed the
/// phase; any returned patch has already been merged.
pub async fn run_context_hook(
    hooks: &dyn LifecycleHooks,
    slot: HookSlot,
    ctx: &mut Context,
) -> Result<bool> {
    let outcome = match slot {
        HookSlot::BeforeAll => hooks.before_all(ctx).await,
        HookSlot::BeforeEach => hooks.before_each(ctx).await,
        HookSlot::AfterEach => hooks.after_each(ctx).await,
        HookSlot::AfterAll => hooks.after_all(ctx).await,
    };
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) if err.is_exit() => return Err(err),
        Err(err) => {
            tracing::warn!(?slot, %err, "hook failed, continuing without it");
            HookOutcome::NoChange
        }
    };
    match outcome {
        HookOutcome::NoChange => Ok(true),
        HookOutcome::Continue(patch) => {
            ctx.apply_patch(&patch);
            Ok(true)
        }
        HookOutcome::Skip => {
            tracing::debug!(?slot, "hook vetoed the phase");
            Ok(false)
        }
    }
}

/// Runs a process hook over the file data. Returns `None` when the
/// hook skipped the file, otherwise the (possibly replaced) data.
pub async fn run_process_hook(
    hooks: &dyn LifecycleHooks,
    slot: ProcessSlot,
    data: String,
    ctx: &mut Context,
) -> Result<Option<String>> {
    let outcome = match slot {
        ProcessSlot::BeforeEach => hooks.process_before_each(&data, ctx).await,
        ProcessSlot::AfterEach => hooks.process_after_each(&data, ctx).await,
    };
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) if err.is_exit() => return Err(err),
        Err(err) => {
            tracing::warn!(?slot, %err, "hook failed, continuing without it");
            ProcessOutcome::NoChange
        }
    };
    match outcome {
        ProcessOutcome::NoChange => Ok(Some(data)),
        ProcessOutcome::Replace {
            data: replacement,
            context,
        } => {
            if let Some(patch) = context {
                ctx.apply_patch(&patch);
            }
            Ok(Some(replacement.unwrap_or(data)))
        }
        ProcessOutcome::Skip => {
            tracing::debug!(?slot, "hook skipped the file");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct PatchingHooks;

    #[async_trait]
    impl LifecycleHooks for PatchingHooks {
        async fn before_each(&self, _ctx: &Context) -> Result<HookOutcome> {
            Ok(HookOutcome::Continue(json!({"variables": {"hooked": true}})))
        }

        async fn process_before_each(&self, data: &str, _ctx: &Context) -> Result<ProcessOutcome> {
            Ok(ProcessOutcome::Replace {
                data: Some(format!("// banner\n{data}")),
                context: Some(json!({"bannered": true})),
            })
        }

        async fn after_each(&self, _ctx: &Context) -> Result<HookOutcome> {
            Ok(HookOutcome::Skip)
        }
    }

    #[tokio::test]
    async fn context_hook_merges_patch() {
        let mut ctx = Context::new();
        let proceed = run_context_hook(&PatchingHooks, HookSlot::BeforeEach, &mut ctx)
            .await
            .unwrap();
        assert!(proceed);
        assert_eq!(ctx.lookup_path("variables.hooked"), Some(json!(true)));
    }

    #[tokio::test]
    async fn context_hook_can_veto() {
        let mut ctx = Context::new();
        let proceed = run_context_hook(&PatchingHooks, HookSlot::AfterEach, &mut ctx)
            .await
            .unwrap();
        assert!(!proceed);
    }

    struct FailingHooks;

    #[async_trait]
    impl LifecycleHooks for FailingHooks {
        async fn before_each(&self, _ctx: &Context) -> Result<HookOutcome> {
            Err(stencil_core::error::Error::Config("boom".to_string()))
        }
    }

    #[tokio::test]
    async fn failing_hook_is_treated_as_a_no_op() {
        let mut ctx = Context::new();
        let proceed = run_context_hook(&FailingHooks, HookSlot::BeforeEach, &mut ctx)
            .await
            .unwrap();
        assert!(proceed);
    }

    #[tokio::test]
    async fn process_hook_replaces_data_and_patches_context() {
        let mut ctx = Context::new();
        let data = run_process_hook(
            &PatchingHooks,
            ProcessSlot::BeforeEach,
            "body".to_string(),
            &mut ctx,
        )
        .await
        .unwrap();
        assert_eq!(data.as_deref(), Some("// banner\nbody"));
        assert_eq!(ctx.lookup_path("bannered"), Some(json!(true)));
    }
}

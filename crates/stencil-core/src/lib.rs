//! Core types for the stencil scaffolding engine
//!
//! This crate defines the host-independent foundation: the generation
//! [`Context`] and its merge rules, the [`RunOptions`] configuration
//! surface, the lifecycle hook contract, the capability traits hosts
//! implement, path-fact bundles and the shared error type. The engine
//! crate drives these; hosts implement the traits in
//! [`capabilities`].

#![warn(missing_docs)]

pub mod capabilities;
pub mod context;
pub mod error;
pub mod hooks;
pub mod options;
pub mod paths;

pub use capabilities::{
    Editor, FilePickItem, FileSystem, Host, Logger, ModuleLoader, ModuleOutput, Notifier,
    NullEditor, NullLogger, NullModuleLoader, NullNotifier, OverwriteAction, Picked, Prompter,
};
pub use context::{deep_merge, Context};
pub use error::{Error, Result};
pub use hooks::{HookOutcome, LifecycleHooks, NoHooks, ProcessOutcome};
pub use options::{
    Dynamic, InputConfig, InputFactory, InputTransform, InputValidator, OpenAfter, OverwritePolicy,
    PickOption, PrePrompt, RunOptions, Times, TimesEntry,
};

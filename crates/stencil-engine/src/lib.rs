//! The stencil generation engine
//!
//! Everything between a template directory on disk and the generated
//! output: `${...}` interpolation, input discovery and prompting,
//! config layering, lifecycle hook dispatch and the [`Session`] that
//! orchestrates a run over host-supplied capabilities.

#![warn(missing_docs)]

pub mod config_resolver;
pub mod fs;
pub mod hook_runner;
pub mod inputs;
pub mod interpolate;
pub mod session;

pub use fs::{ModuleFn, StaticModuleLoader, StdFileSystem};
pub use interpolate::{render, render_resilient, render_with_value, value_to_string};
pub use session::{GenerateRequest, GenerateSummary, Session};

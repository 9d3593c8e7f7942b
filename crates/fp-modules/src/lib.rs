//! Functional-variant module generator.
//!
//! Regenerates the `fp` distribution of a utility library from its
//! per-function module files. Every module name is classified into one of
//! four wrapping strategies, rendered from a compiled template, and written
//! by a strictly sequential action list that stops at the first failure.
//!
//! ## Pipeline
//!
//! - **Mapping**: arity buckets, alias and rename tables
//! - **Names**: source modules plus public mapping keys, deduplicated
//! - **Classifier**: `alias`, `category`, `thru` or `module`
//! - **Renderer**: askama templates per variant plus three fixed files
//! - **Actions**: support copy, module writes, entry, `convert`, `_util`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fp_modules::{build, Config, Mapping};
//!
//! fn main() -> Result<(), fp_modules::GenError> {
//!     let config = Config::load()?;
//!     let mapping = Mapping::builtin()?;
//!
//!     let summary = build("node_modules/lodash".as_ref(), &config, &mapping)?;
//!     println!("Generated {} modules", summary.modules());
//!     Ok(())
//! }
//! ```

mod action;
mod classify;
mod config;
mod error;
mod mapping;
mod names;
mod pipeline;
mod render;

// Re-export public API
pub use action::{execute, Action, Effects, FsEffects};
pub use classify::{Classifier, Variant, CATEGORIES};
pub use config::Config;
pub use error::{GenError, GenResult};
pub use mapping::{AliasTable, AryMethod, Mapping, RenameTable, Resolution, PRIVATE_PREFIX};
pub use names::{enumerate_modules, scan_modules, IgnoreRule, IgnoreSet};
pub use pipeline::{build, build_with, plan, BuildSummary, Plan};
pub use render::{ModuleContext, Renderer, UTIL_HELPERS};

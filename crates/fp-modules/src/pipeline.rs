//! Build orchestration: enumerate, render, sequence, execute.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::info;

use crate::action::{execute, Action, Effects, FsEffects};
use crate::classify::Variant;
use crate::config::Config;
use crate::error::GenResult;
use crate::mapping::Mapping;
use crate::names::{enumerate_modules, IgnoreSet};
use crate::render::Renderer;

/// Name of the shared utility module inside the output root.
const UTIL_MODULE: &str = "_util";

/// Name of the conversion module inside the output root.
const CONVERT_MODULE: &str = "convert";

/// What a completed build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Generated module count per variant.
    pub variants: BTreeMap<Variant, usize>,
    /// Number of actions executed.
    pub actions: usize,
}

impl BuildSummary {
    /// Total number of generated per-module files.
    pub fn modules(&self) -> usize {
        self.variants.values().sum()
    }
}

/// A rendered, ordered list of actions ready to run.
#[derive(Debug, Clone)]
pub struct Plan {
    pub actions: Vec<Action>,
    pub variants: BTreeMap<Variant, usize>,
}

/// Render every output up front and lay the actions out in their fixed order:
/// support copy, one write per module, entry, `convert`, `_util`.
pub fn plan(
    target: &Path,
    config: &Config,
    renderer: &Renderer<'_>,
    names: &BTreeSet<String>,
) -> GenResult<Plan> {
    let output_root = config.output_root(target);
    let mut actions = Vec::with_capacity(names.len() + 4);
    let mut variants = BTreeMap::new();

    actions.push(Action::CopyDir {
        from: config.support_dir.clone(),
        to: output_root.clone(),
    });

    for name in names {
        let (variant, contents) = renderer.render_module(name)?;
        *variants.entry(variant).or_insert(0) += 1;
        actions.push(Action::WriteFile {
            path: output_root.join(config.file_name(name)),
            contents,
        });
    }

    actions.push(Action::WriteFile {
        path: target.join(config.file_name(&config.output_dir_name)),
        contents: renderer.render_entry()?,
    });
    actions.push(Action::WriteFile {
        path: output_root.join(config.file_name(CONVERT_MODULE)),
        contents: renderer.render_convert()?,
    });
    actions.push(Action::WriteFile {
        path: output_root.join(config.file_name(UTIL_MODULE)),
        contents: renderer.render_util()?,
    });

    Ok(Plan { actions, variants })
}

/// Regenerate the functional-variant modules of `target` on disk.
pub fn build(target: &Path, config: &Config, mapping: &Mapping) -> GenResult<BuildSummary> {
    build_with(
        target,
        config,
        mapping,
        &IgnoreSet::for_config(config),
        &mut FsEffects,
    )
}

/// [`build`] with an explicit ignore set and effects implementation.
pub fn build_with<E: Effects>(
    target: &Path,
    config: &Config,
    mapping: &Mapping,
    ignore: &IgnoreSet,
    effects: &mut E,
) -> GenResult<BuildSummary> {
    let names = enumerate_modules(target, config, ignore, mapping)?;
    let renderer = Renderer::new(mapping, config);
    let plan = plan(target, config, &renderer, &names)?;

    info!(
        target = %target.display(),
        modules = names.len(),
        actions = plan.actions.len(),
        "Planned build"
    );

    execute(&plan.actions, effects)?;

    let summary = BuildSummary {
        variants: plan.variants,
        actions: plan.actions.len(),
    };
    info!(modules = summary.modules(), "Build complete");
    Ok(summary)
}

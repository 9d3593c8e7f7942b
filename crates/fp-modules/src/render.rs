//! Template rendering for generated modules.
//!
//! Templates are compiled into the crate by askama, so the set of templates
//! is fixed for the lifetime of the process and every variant has one.

use askama::Template;

use crate::classify::{Classifier, Variant};
use crate::config::Config;
use crate::error::GenResult;
use crate::mapping::{Mapping, RenameTable};

/// Helpers exposed to the converter by the shared utility module, as
/// `(key, module)` pairs required relative to the output root.
pub const UTIL_HELPERS: &[(&str, &str)] = &[
    ("ary", "ary"),
    ("assign", "_baseAssign"),
    ("clone", "clone"),
    ("curry", "curry"),
    ("forEach", "_arrayEach"),
    ("isArray", "isArray"),
    ("isError", "isError"),
    ("isFunction", "isFunction"),
    ("isWeakMap", "isWeakMap"),
    ("iteratee", "iteratee"),
    ("keys", "_baseKeys"),
    ("rearg", "rearg"),
    ("toInteger", "toInteger"),
    ("toPath", "toPath"),
];

/// Data a per-module template is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleContext<'a> {
    /// Name of the module being generated.
    pub module_name: &'a str,
    /// Canonical name the module wraps.
    pub name: &'a str,
    /// The full rename table.
    pub rename: &'a RenameTable,
}

impl<'a> ModuleContext<'a> {
    /// Context for `module_name` with its name resolved against `mapping`.
    pub fn new(mapping: &'a Mapping, module_name: &'a str) -> Self {
        Self {
            module_name,
            name: mapping.resolve(module_name).real_name(),
            rename: mapping.rename(),
        }
    }

    /// Identifier the converted function is registered under.
    ///
    /// Renamed modules keep their public name; everything else uses the
    /// canonical one.
    pub fn label(&self) -> &'a str {
        if self.rename.contains_key(self.module_name) {
            self.module_name
        } else {
            self.name
        }
    }
}

#[derive(Template)]
#[template(path = "modules/alias.js", escape = "none")]
struct AliasTemplate<'a> {
    ctx: &'a ModuleContext<'a>,
}

#[derive(Template)]
#[template(path = "modules/category.js", escape = "none")]
struct CategoryTemplate<'a> {
    ctx: &'a ModuleContext<'a>,
}

#[derive(Template)]
#[template(path = "modules/thru.js", escape = "none")]
struct ThruTemplate<'a> {
    ctx: &'a ModuleContext<'a>,
}

#[derive(Template)]
#[template(path = "modules/module.js", escape = "none")]
struct ModuleTemplate<'a> {
    ctx: &'a ModuleContext<'a>,
}

#[derive(Template)]
#[template(path = "fp.js", escape = "none")]
struct EntryTemplate<'a> {
    output_dir: &'a str,
}

#[derive(Template)]
#[template(path = "convert.js", escape = "none")]
struct ConvertTemplate {}

#[derive(Template)]
#[template(path = "_util.js", escape = "none")]
struct UtilTemplate<'a> {
    helpers: &'a [(&'a str, &'a str)],
}

/// Renders modules from the mapping tables.
///
/// Holds no mutable state: the same input always renders the same text.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    mapping: &'a Mapping,
    config: &'a Config,
    classifier: Classifier<'a>,
}

impl<'a> Renderer<'a> {
    pub fn new(mapping: &'a Mapping, config: &'a Config) -> Self {
        Self {
            mapping,
            config,
            classifier: Classifier::new(mapping),
        }
    }

    pub fn classifier(&self) -> &Classifier<'a> {
        &self.classifier
    }

    /// Render one variant's template with `ctx`.
    pub fn render(&self, variant: Variant, ctx: &ModuleContext<'_>) -> GenResult<String> {
        let text = match variant {
            Variant::Alias => AliasTemplate { ctx }.render()?,
            Variant::Category => CategoryTemplate { ctx }.render()?,
            Variant::Thru => ThruTemplate { ctx }.render()?,
            Variant::Module => ModuleTemplate { ctx }.render()?,
        };
        Ok(text)
    }

    /// Classify `module_name` and render it.
    pub fn render_module(&self, module_name: &str) -> GenResult<(Variant, String)> {
        let variant = self.classifier.classify(module_name);
        let ctx = ModuleContext::new(self.mapping, module_name);
        Ok((variant, self.render(variant, &ctx)?))
    }

    /// Top-level entry module placed next to the output root.
    pub fn render_entry(&self) -> GenResult<String> {
        Ok(EntryTemplate {
            output_dir: &self.config.output_dir_name,
        }
        .render()?)
    }

    /// The `convert` module wrapping the base converter.
    pub fn render_convert(&self) -> GenResult<String> {
        Ok(ConvertTemplate {}.render()?)
    }

    /// The shared utility module handed to the converter.
    pub fn render_util(&self) -> GenResult<String> {
        Ok(UtilTemplate {
            helpers: UTIL_HELPERS,
        }
        .render()?)
    }
}

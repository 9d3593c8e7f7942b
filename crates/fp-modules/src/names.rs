//! Module name enumeration.
//!
//! The generated set is every module file in the target directory that is
//! not ignored, plus every public key of the alias and rename tables.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{GenError, GenResult};
use crate::mapping::{Mapping, PRIVATE_PREFIX};

/// A single ignore rule, matched against a module file's stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreRule {
    /// Stems starting with this prefix (`_*.js`).
    Prefix(String),
    /// Exactly this stem (`core.js`).
    Exact(String),
}

impl IgnoreRule {
    fn matches(&self, stem: &str) -> bool {
        match self {
            IgnoreRule::Prefix(prefix) => stem.starts_with(prefix.as_str()),
            IgnoreRule::Exact(name) => stem == name,
        }
    }
}

/// Source files that never become generated modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    rules: Vec<IgnoreRule>,
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::for_config(&Config::default())
    }
}

impl IgnoreSet {
    pub fn new(rules: impl IntoIterator<Item = IgnoreRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Private helpers, the package entry points and the generated entry
    /// file, whose stem follows the configured output directory name.
    pub fn for_config(config: &Config) -> Self {
        Self::new([
            IgnoreRule::Prefix(PRIVATE_PREFIX.to_string()),
            IgnoreRule::Exact("core".to_string()),
            IgnoreRule::Exact(config.output_dir_name.clone()),
            IgnoreRule::Exact("index".to_string()),
            IgnoreRule::Exact("lodash".to_string()),
        ])
    }

    /// Whether a module file stem is ignored.
    pub fn is_ignored(&self, stem: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(stem))
    }
}

/// Stems of the module files directly inside `dir`, minus ignored ones.
///
/// Any error reading the directory aborts the scan.
pub fn scan_modules(
    dir: &Path,
    config: &Config,
    ignore: &IgnoreSet,
) -> GenResult<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        // Follows symlinks, unlike `entry.file_type()`.
        if is_hidden(&entry) || !entry.path().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(config.extension.as_str()) {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !ignore.is_ignored(stem) {
            names.insert(stem.to_string());
        }
    }

    Ok(names)
}

/// Dotfiles such as `.eslintrc.js` are never modules.
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Full, deduplicated set of module names to generate for `dir`.
pub fn enumerate_modules(
    dir: &Path,
    config: &Config,
    ignore: &IgnoreSet,
    mapping: &Mapping,
) -> GenResult<BTreeSet<String>> {
    if !dir.is_dir() {
        return Err(GenError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source directory not found"),
        ));
    }

    let mut names = scan_modules(dir, config, ignore)?;
    names.extend(
        mapping
            .public_keys()
            .filter(|name| !ignore.is_ignored(name))
            .map(str::to_string),
    );
    Ok(names)
}

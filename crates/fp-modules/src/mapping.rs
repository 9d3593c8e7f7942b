//! Mapping store: arity buckets, alias table and rename table.
//!
//! The tables are read-only input for a run. They drive both classification
//! and name resolution, so they are validated once when loaded and never
//! mutated afterwards.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// Mapping document compiled into the crate.
const BUILTIN_MAPPING: &str = include_str!("../data/mapping.json");

/// Prefix marking private names that never become public modules.
pub const PRIVATE_PREFIX: char = '_';

/// Alias name to canonical function name.
pub type AliasTable = BTreeMap<String, String>;

/// Alternate public name to the real module backing it.
pub type RenameTable = BTreeMap<String, String>;

/// Canonical names grouped by declared arity (1 through 4).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AryMethod {
    #[serde(rename = "1", default)]
    pub unary: Vec<String>,
    #[serde(rename = "2", default)]
    pub binary: Vec<String>,
    #[serde(rename = "3", default)]
    pub ternary: Vec<String>,
    #[serde(rename = "4", default)]
    pub quaternary: Vec<String>,
}

impl AryMethod {
    /// Buckets paired with their arity, in ascending order.
    pub fn buckets(&self) -> [(u8, &[String]); 4] {
        [
            (1, self.unary.as_slice()),
            (2, self.binary.as_slice()),
            (3, self.ternary.as_slice()),
            (4, self.quaternary.as_slice()),
        ]
    }
}

/// The validated mapping tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    ary_method: AryMethod,
    #[serde(default)]
    alias_to_real: AliasTable,
    #[serde(default)]
    rename: RenameTable,
}

/// How a module name maps onto the canonical function it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Key of the alias table; carries the canonical name.
    Alias(&'a str),
    /// Key of the rename table; carries the real module name.
    Rename(&'a str),
    /// Neither; the name denotes itself.
    Identity(&'a str),
}

impl<'a> Resolution<'a> {
    /// The canonical name after resolution.
    pub fn real_name(&self) -> &'a str {
        match *self {
            Resolution::Alias(name) | Resolution::Rename(name) | Resolution::Identity(name) => {
                name
            }
        }
    }
}

impl Mapping {
    /// Build a mapping from its three tables.
    pub fn new(
        ary_method: AryMethod,
        alias_to_real: AliasTable,
        rename: RenameTable,
    ) -> GenResult<Self> {
        let mapping = Self {
            ary_method,
            alias_to_real,
            rename,
        };
        mapping.validate()?;
        Ok(mapping)
    }

    /// Parse and validate a JSON mapping document.
    pub fn from_json(json: &str) -> GenResult<Self> {
        let mapping: Self = serde_json::from_str(json)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// The mapping shipped with the crate.
    pub fn builtin() -> GenResult<Self> {
        Self::from_json(BUILTIN_MAPPING)
    }

    pub fn ary_method(&self) -> &AryMethod {
        &self.ary_method
    }

    pub fn alias_to_real(&self) -> &AliasTable {
        &self.alias_to_real
    }

    pub fn rename(&self) -> &RenameTable {
        &self.rename
    }

    /// Whether `name` is a key of the alias table.
    pub fn is_alias(&self, name: &str) -> bool {
        self.alias_to_real.contains_key(name)
    }

    /// Union of the four arity buckets.
    pub fn ary_names(&self) -> BTreeSet<&str> {
        self.ary_method
            .buckets()
            .into_iter()
            .flat_map(|(_, names)| names.iter().map(String::as_str))
            .collect()
    }

    /// Declared arity of `name`, taken from the first bucket listing it.
    pub fn arity_of(&self, name: &str) -> Option<u8> {
        self.ary_method
            .buckets()
            .into_iter()
            .find(|(_, names)| names.iter().any(|n| n == name))
            .map(|(arity, _)| arity)
    }

    /// Resolve a module name: alias first, then rename, then identity.
    pub fn resolve<'a>(&'a self, name: &'a str) -> Resolution<'a> {
        if let Some(real) = self.alias_to_real.get(name) {
            Resolution::Alias(real)
        } else if let Some(real) = self.rename.get(name) {
            Resolution::Rename(real)
        } else {
            Resolution::Identity(name)
        }
    }

    /// Public keys of the alias and rename tables, private names excluded.
    pub fn public_keys(&self) -> impl Iterator<Item = &str> {
        self.alias_to_real
            .keys()
            .chain(self.rename.keys())
            .map(String::as_str)
            .filter(|name| !name.starts_with(PRIVATE_PREFIX))
    }

    fn validate(&self) -> GenResult<()> {
        for (table, entries) in [
            ("aliasToReal", &self.alias_to_real),
            ("rename", &self.rename),
        ] {
            if let Some((key, value)) = entries
                .iter()
                .find(|(key, value)| key.is_empty() || value.is_empty())
            {
                return Err(GenError::mapping(format!(
                    "empty name in {table}: {key:?} -> {value:?}"
                )));
            }
        }

        for (arity, names) in self.ary_method.buckets() {
            if names.iter().any(String::is_empty) {
                return Err(GenError::mapping(format!(
                    "empty name in aryMethod bucket {arity}"
                )));
            }
        }

        // A name in both tables has no single resolution.
        if let Some(name) = self
            .alias_to_real
            .keys()
            .find(|name| self.rename.contains_key(*name))
        {
            return Err(GenError::mapping(format!(
                "{name:?} is both an alias and a rename key"
            )));
        }

        Ok(())
    }
}

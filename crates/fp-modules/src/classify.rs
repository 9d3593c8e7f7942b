//! Classification of module names into wrapping strategies.

use std::collections::HashSet;
use std::fmt;

use crate::mapping::Mapping;

/// Names of the grouping modules that re-export a whole subject area.
pub const CATEGORIES: &[&str] = &[
    "array",
    "collection",
    "date",
    "function",
    "lang",
    "math",
    "number",
    "object",
    "seq",
    "string",
    "util",
];

/// How a module is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// Re-exports the module it aliases.
    Alias,
    /// Converts a whole namespace object.
    Category,
    /// Converts a function without capping its arity.
    Thru,
    /// Converts a function capped to its declared arity.
    Module,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Alias,
        Variant::Category,
        Variant::Thru,
        Variant::Module,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Alias => "alias",
            Variant::Category => "category",
            Variant::Thru => "thru",
            Variant::Module => "module",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides the [`Variant`] of a module name.
///
/// Rules are checked in order and the first match wins:
/// alias key, category name, absent from every arity bucket, otherwise module.
#[derive(Debug, Clone)]
pub struct Classifier<'m> {
    mapping: &'m Mapping,
    categories: HashSet<&'static str>,
    ary_names: HashSet<&'m str>,
}

impl<'m> Classifier<'m> {
    /// Classifier using the built-in category set.
    pub fn new(mapping: &'m Mapping) -> Self {
        Self::with_categories(mapping, CATEGORIES.iter().copied())
    }

    pub fn with_categories(
        mapping: &'m Mapping,
        categories: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self {
            mapping,
            categories: categories.into_iter().collect(),
            ary_names: mapping.ary_names().into_iter().collect(),
        }
    }

    pub fn classify(&self, name: &str) -> Variant {
        if self.mapping.is_alias(name) {
            Variant::Alias
        } else if self.categories.contains(name) {
            Variant::Category
        } else if !self.ary_names.contains(name) {
            Variant::Thru
        } else {
            Variant::Module
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::AryMethod;
    use std::collections::BTreeMap;

    fn mapping(ary: &[&str], aliases: &[(&str, &str)]) -> Mapping {
        let ary_method = AryMethod {
            binary: ary.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        let alias_to_real = aliases
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Mapping::new(ary_method, alias_to_real, BTreeMap::new()).unwrap()
    }

    #[test]
    fn test_arity_membership() {
        let mapping = mapping(&["add"], &[]);
        let classifier = Classifier::new(&mapping);

        assert_eq!(classifier.classify("add"), Variant::Module);
        assert_eq!(classifier.classify("subtract"), Variant::Thru);
    }

    #[test]
    fn test_alias_takes_precedence_over_arity() {
        let mapping = mapping(&["each", "forEach"], &[("each", "forEach")]);
        let classifier = Classifier::new(&mapping);

        assert_eq!(classifier.classify("each"), Variant::Alias);
        assert_eq!(classifier.classify("forEach"), Variant::Module);
    }

    #[test]
    fn test_alias_takes_precedence_over_category() {
        let mapping = mapping(&[], &[("array", "toArray")]);
        let classifier = Classifier::new(&mapping);

        assert_eq!(classifier.classify("array"), Variant::Alias);
    }

    #[test]
    fn test_category_takes_precedence_over_arity() {
        let mapping = mapping(&["array"], &[]);
        let classifier = Classifier::with_categories(&mapping, ["array"]);

        assert_eq!(classifier.classify("array"), Variant::Category);
        assert_eq!(classifier.classify("object"), Variant::Thru);
    }

    #[test]
    fn test_every_name_gets_exactly_one_variant() {
        let mapping = Mapping::builtin().unwrap();
        let classifier = Classifier::new(&mapping);

        for name in ["", "each", "array", "map", "getOr", "noSuchFunction", "__"] {
            let variant = classifier.classify(name);
            assert!(Variant::ALL.contains(&variant), "{name} -> {variant}");
        }
    }

    #[test]
    fn test_builtin_classification() {
        let mapping = Mapping::builtin().unwrap();
        let classifier = Classifier::new(&mapping);

        assert_eq!(classifier.classify("each"), Variant::Alias);
        assert_eq!(classifier.classify("lang"), Variant::Category);
        assert_eq!(classifier.classify("map"), Variant::Module);
        assert_eq!(classifier.classify("getOr"), Variant::Module);
        assert_eq!(classifier.classify("isArray"), Variant::Thru);
    }

    #[test]
    fn test_variant_display() {
        let names: Vec<String> = Variant::ALL.iter().map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["alias", "category", "thru", "module"]);
    }
}

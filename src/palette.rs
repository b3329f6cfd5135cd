//! Color palette consulted by `var(--name)` references.
//!
//! Built once at startup (built-in colors plus `[palette]` overrides from the
//! config file) and only ever read afterwards.

use std::collections::BTreeMap;

/// Built-in color variables.
const BUILTIN: &[(&str, &str)] = &[
    ("blue", "#007bff"),
    ("green", "#28a745"),
    ("green-dark", "#155724"),
    ("green-light", "#d4edda"),
    ("grey", "#ced4da"),
    ("grey-dark", "#343a40"),
    ("grey-light", "#f8f9fa"),
    ("red", "#dc3545"),
    ("red-dark", "#721c24"),
    ("red-light", "#f8d7da"),
    ("yellow", "#ffc107"),
    ("yellow-light", "#fff3cd"),
    ("yellow-dark", "#856404"),
];

/// Read-only mapping from color name to literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<String, String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: BUILTIN
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        }
    }
}

impl Palette {
    /// Built-in palette extended (or overridden) by user entries.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut palette = Self::default();
        for (name, value) in overrides {
            palette.colors.insert(name.clone(), value.clone());
        }
        palette
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

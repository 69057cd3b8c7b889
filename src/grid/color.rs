// Class-name to color-token classification

use crate::grid::normalize_label;
use std::collections::BTreeMap;

/// Token returned for empty or unrecognized class names
pub const DEFAULT_COLOR_TOKEN: &str = "neutral";

/// Colors for the class names the studio usually publishes
const BUILTIN_COLORS: &[(&str, &str)] = &[
    ("Ballet", "magenta"),
    ("Contemporary", "blue"),
    ("Jazz", "green"),
    ("Hip Hop", "yellow"),
    ("Kids Dance", "cyan"),
    ("Tap", "bright_blue"),
    ("Salsa", "red"),
    ("Private Lesson", "bright_black"),
];

/// Mapping from normalized class label to color token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    entries: BTreeMap<String, String>,
    default_token: String,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ColorMap {
    /// An empty mapping: every label gets the default token
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            default_token: DEFAULT_COLOR_TOKEN.to_string(),
        }
    }

    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_COLORS.iter().copied())
    }

    /// Build from (label, token) pairs; labels are normalized on insert
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::empty();
        for (label, token) in pairs {
            map.insert(label.as_ref(), token.as_ref());
        }
        map
    }

    /// Add or replace a mapping. Empty labels and tokens are ignored.
    pub fn insert(&mut self, label: &str, token: &str) {
        let key = normalize_label(label);
        let token = token.trim();
        if key.is_empty() || token.is_empty() {
            return;
        }
        self.entries.insert(key, token.to_lowercase());
    }

    /// Color token for a raw cell value
    pub fn classify(&self, raw: &str) -> &str {
        let key = normalize_label(raw);
        if key.is_empty() {
            return &self.default_token;
        }
        self.entries
            .get(&key)
            .map(String::as_str)
            .unwrap_or(&self.default_token)
    }

    pub fn default_token(&self) -> &str {
        &self.default_token
    }

    /// (normalized label, token) pairs in label order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use std::collections::HashMap;

/// Built-in alias table, alias → canonical. Consulted only after a direct
/// taxonomy match fails, so aliases for names like "pepper" that are
/// themselves canonical would never fire; lexicon validation rejects such
/// entries outright.
const ALIASES: &[(&str, &str)] = &[
    ("citrus", "orange"),
    ("citrus fruit", "orange"),
    ("mandarin", "orange"),
    ("tangerine", "orange"),
    ("clementine", "orange"),
    ("capsicum", "bell pepper"),
    ("sweet pepper", "bell pepper"),
    ("green onion", "onion"),
    ("scallion", "onion"),
    ("spring onion", "onion"),
    ("red onion", "onion"),
    ("white onion", "onion"),
    ("potatoes", "potato"),
    ("spud", "potato"),
    ("sweet potato", "potato"),
    ("yam", "potato"),
    ("tomatoes", "tomato"),
    ("cherry tomato", "tomato"),
    ("roma tomato", "tomato"),
    ("carrots", "carrot"),
    ("baby carrot", "carrot"),
    ("green apple", "apple"),
    ("red apple", "apple"),
    ("fruit", "apple"),
];

/// Immutable alias → canonical-name mapping.
///
/// The resolver never re-validates that its canonical target is itself a
/// taxonomy member; callers trust the configuration (which lexicon
/// validation checks once at construction).
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymMap {
    aliases: HashMap<String, String>,
}

impl SynonymMap {
    /// Build a synonym map from (alias, canonical) pairs. Duplicate alias
    /// keys are caught by lexicon validation, not here.
    pub fn from_entries<I, A, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        let aliases = entries
            .into_iter()
            .map(|(alias, canonical)| (alias.into().to_lowercase(), canonical.into().to_lowercase()))
            .collect();
        Self { aliases }
    }

    /// The built-in alias table.
    pub fn builtin() -> Self {
        Self::from_entries(ALIASES.iter().copied())
    }

    /// Case-insensitive exact alias lookup.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.aliases.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// All (alias, canonical) pairs, sorted by alias. Used for display.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .aliases
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }
}

impl Default for SynonymMap {
    fn default() -> Self {
        Self::builtin()
    }
}

pub mod confidence;
pub mod synonyms;
pub mod taxonomy;

pub use confidence::{ConfidencePolicy, FRUIT_THRESHOLD, STANDARD_THRESHOLD};
pub use synonyms::SynonymMap;
pub use taxonomy::{Category, Taxonomy};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Validation error types for lexicon configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexiconError {
    #[error("empty ingredient name in category {category}")]
    EmptyName { category: &'static str },
    #[error("canonical name '{name}' appears in more than one category")]
    DuplicateCanonical { name: String },
    #[error("empty synonym alias or target (alias: '{alias}', target: '{target}')")]
    EmptySynonym { alias: String, target: String },
    #[error(
        "alias '{alias}' is already a direct taxonomy member but maps to '{target}' \
         (contradictory resolution)"
    )]
    AliasShadowsMember { alias: String, target: String },
}

/// The complete read-only vocabulary: taxonomy plus synonym table.
///
/// Loaded once at startup and shared immutably for the life of the
/// process; every lookup takes `&self`.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLexicon {
    taxonomy: Taxonomy,
    synonyms: SynonymMap,
}

impl IngredientLexicon {
    /// Assemble and validate a lexicon.
    ///
    /// Rejects empty names and any alias that is itself a taxonomy member
    /// with a different canonical target, since direct matches win and
    /// such an alias could never resolve consistently.
    pub fn new(taxonomy: Taxonomy, synonyms: SynonymMap) -> Result<Self, LexiconError> {
        for (name, category) in taxonomy.iter() {
            if name.is_empty() {
                return Err(LexiconError::EmptyName {
                    category: category.name(),
                });
            }
        }
        for (alias, target) in synonyms.iter() {
            if alias.is_empty() || target.is_empty() {
                return Err(LexiconError::EmptySynonym {
                    alias: alias.to_string(),
                    target: target.to_string(),
                });
            }
            if taxonomy.contains(alias) && alias != target {
                return Err(LexiconError::AliasShadowsMember {
                    alias: alias.to_string(),
                    target: target.to_string(),
                });
            }
        }
        Ok(Self { taxonomy, synonyms })
    }

    /// The built-in vocabulary. Known-valid; covered by tests rather than
    /// revalidated on every construction.
    pub fn builtin() -> Self {
        Self {
            taxonomy: Taxonomy::builtin(),
            synonyms: SynonymMap::builtin(),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn synonyms(&self) -> &SynonymMap {
        &self.synonyms
    }

    /// Resolve an already lower-cased name: direct taxonomy membership
    /// first, synonym lookup only on a miss.
    pub(crate) fn canonical_for(&self, lowered: &str) -> Option<&str> {
        self.taxonomy
            .canonical_entry(lowered)
            .or_else(|| self.synonyms.resolve(lowered))
    }
}

impl Default for IngredientLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// On-disk representation of a replacement vocabulary
/// (`lexicon.toml`). Absent sections fall back to empty, so a file can
/// replace the taxonomy without redefining synonyms and vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub taxonomy: BTreeMap<Category, Vec<String>>,
    #[serde(default)]
    pub synonyms: BTreeMap<String, String>,
}

impl LexiconFile {
    /// Validate and assemble into an [`IngredientLexicon`].
    ///
    /// Catches duplicate canonicals across categories here, while the raw
    /// per-category lists are still available.
    pub fn build(self) -> Result<IngredientLexicon, LexiconError> {
        let mut seen = HashSet::new();
        for (category, names) in &self.taxonomy {
            for name in names {
                let lowered = name.to_lowercase();
                if lowered.is_empty() {
                    return Err(LexiconError::EmptyName {
                        category: category.name(),
                    });
                }
                if !seen.insert(lowered) {
                    return Err(LexiconError::DuplicateCanonical { name: name.clone() });
                }
            }
        }
        IngredientLexicon::new(
            Taxonomy::from_categories(self.taxonomy),
            SynonymMap::from_entries(self.synonyms),
        )
    }
}

use crate::lexicon::{Category, ConfidencePolicy, IngredientLexicon};
use crate::schema::DetectionSource;
use tracing::trace;

/// Pure per-detection decision function over the lexicon and policy.
///
/// Decision order, asymmetric on purpose:
///
/// 1. lower-case the raw name;
/// 2. a direct member of the fruits category gates at the lower fruit
///    threshold and never falls through to synonym resolution; a direct
///    fruit name that fails its gate stays rejected;
/// 3. everything else gates at the standard threshold and resolves via
///    direct membership in any category first, then the synonym table;
///    the canonical name, not the raw alias, is what gets accepted;
/// 4. anything left is rejected, not errored, and simply excluded.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    lexicon: IngredientLexicon,
    policy: ConfidencePolicy,
}

impl Canonicalizer {
    pub fn new(lexicon: IngredientLexicon, policy: ConfidencePolicy) -> Self {
        Self { lexicon, policy }
    }

    /// Map one raw detection to its canonical ingredient name, or `None`
    /// when rejected. `source` does not influence the decision; it only
    /// feeds trace logging.
    pub fn canonicalize(
        &self,
        raw_name: &str,
        score: f32,
        source: DetectionSource,
    ) -> Option<&str> {
        let name = raw_name.to_lowercase();
        let category = self.lexicon.taxonomy().category_of(&name);

        if category == Some(Category::Fruits) && score > self.policy.threshold(Category::Fruits) {
            let canonical = self.lexicon.taxonomy().canonical_entry(&name)?;
            trace!(raw = raw_name, score, ?source, canonical, "accepted direct fruit match");
            return Some(canonical);
        }

        if score > self.policy.standard() {
            if let Some(canonical) = self.lexicon.canonical_for(&name) {
                trace!(raw = raw_name, score, ?source, canonical, "accepted");
                return Some(canonical);
            }
        }

        trace!(raw = raw_name, score, ?source, "rejected");
        None
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(IngredientLexicon::builtin(), ConfidencePolicy::default())
    }
}

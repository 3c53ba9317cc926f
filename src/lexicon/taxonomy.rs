use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ingredient categories recognized by the taxonomy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fruits,
    Vegetables,
    Proteins,
    Pantry,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Fruits,
        Category::Vegetables,
        Category::Proteins,
        Category::Pantry,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Fruits => "fruits",
            Category::Vegetables => "vegetables",
            Category::Proteins => "proteins",
            Category::Pantry => "pantry",
        }
    }
}

/// Built-in vocabulary, one table per category. Entries are lower-case and
/// unique across all four tables.
const FRUITS: &[&str] = &[
    "orange",
    "apple",
    "banana",
    "lemon",
    "grape",
    "strawberry",
    "blueberry",
    "raspberry",
    "mango",
    "pineapple",
    "pear",
    "avocado",
];

const VEGETABLES: &[&str] = &[
    "tomato",
    "onion",
    "garlic",
    "lettuce",
    "carrot",
    "potato",
    "cucumber",
    "bell pepper",
    "broccoli",
    "spinach",
    "celery",
    "mushroom",
    "zucchini",
    "cabbage",
    "cauliflower",
];

const PROTEINS: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salmon", "tuna", "shrimp", "egg", "tofu", "meat",
    "protein", "poultry",
];

const PANTRY: &[&str] = &[
    "rice", "pasta", "bread", "flour", "sugar", "salt", "pepper", "oil", "vinegar", "sauce",
    "spice", "herb", "grain",
];

/// Immutable mapping from canonical ingredient name to its category.
///
/// Lookups are case-insensitive exact matches; the tables themselves are
/// stored lower-case.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    members: HashMap<String, Category>,
}

impl Taxonomy {
    /// Build a taxonomy from (category, members) pairs. Later entries for
    /// the same name overwrite earlier ones; uniqueness is enforced by
    /// lexicon validation, not here.
    pub fn from_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (Category, Vec<S>)>,
        S: Into<String>,
    {
        let mut members = HashMap::new();
        for (category, names) in categories {
            for name in names {
                members.insert(name.into().to_lowercase(), category);
            }
        }
        Self { members }
    }

    /// The built-in four-category vocabulary.
    pub fn builtin() -> Self {
        Self::from_categories([
            (Category::Fruits, FRUITS.to_vec()),
            (Category::Vegetables, VEGETABLES.to_vec()),
            (Category::Proteins, PROTEINS.to_vec()),
            (Category::Pantry, PANTRY.to_vec()),
        ])
    }

    /// Case-insensitive exact lookup across all categories.
    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.members.get(&name.to_lowercase()).copied()
    }

    /// True iff `category_of` resolves.
    pub fn contains(&self, name: &str) -> bool {
        self.category_of(name).is_some()
    }

    /// The stored canonical spelling for a direct member, if any.
    pub(crate) fn canonical_entry(&self, lowered: &str) -> Option<&str> {
        self.members.get_key_value(lowered).map(|(k, _)| k.as_str())
    }

    /// All members of one category, sorted. Used for display.
    pub fn members_of(&self, category: Category) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .members
            .iter()
            .filter(|(_, c)| **c == category)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Category)> {
        self.members.iter().map(|(name, c)| (name.as_str(), *c))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

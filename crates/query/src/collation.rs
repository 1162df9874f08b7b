//! Name collation for the A-Z sort.
//!
//! Names are ordered by the Unicode root collation (CLDR) at tertiary
//! strength: accents and case only matter once the base letters tie, and on
//! a case tie the lowercase spelling comes first ("apple" < "Apple" <
//! "banana", "Éclair" < "Fig"). Names the collator considers equal fall back
//! to code point order so the result is a total order.

use core::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};

/// Reusable collator for product names. Build one per sort, not per
/// comparison.
pub struct NameCollator {
    collator: Option<Collator>,
}

impl NameCollator {
    pub fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = match Collator::try_new(&Default::default(), options) {
            Ok(collator) => Some(collator),
            Err(error) => {
                tracing::warn!(%error, "root collation unavailable, sorting names by case-folded code points");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let ord = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => fold_compare(a, b),
        };
        ord.then_with(|| a.cmp(b))
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for NameCollator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NameCollator")
            .field("root_collation", &self.collator.is_some())
            .finish()
    }
}

/// Total order over product names. Builds a collator per call; use
/// [`NameCollator`] when comparing many names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NameCollator::new().compare(a, b)
}

fn case_rank(c: char) -> u8 {
    if c.is_lowercase() {
        0
    } else if c.is_uppercase() {
        2
    } else {
        1
    }
}

fn fold_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .map(|c| (case_rank(c), c))
            .cmp(b.chars().map(|c| (case_rank(c), c)))
    })
}

use std::collections::BTreeSet;

use qdrant_client::qdrant::{Condition, Filter};

/// Store-level allergen exclusion predicate.
///
/// Built from canonical codes only; raw user text never reaches the store
/// filter. Applied as `must_not` over the list-typed `contains` payload
/// field, this is the first line of defense. The retriever re-checks every
/// returned candidate regardless, since stored metadata may be stale or
/// incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllergenExclusion {
    codes: BTreeSet<String>,
}

impl AllergenExclusion {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Canonical codes excluded by this filter, in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    /// `true` when a document carrying `contains` codes must be excluded.
    pub fn excludes(&self, contains: &[String]) -> bool {
        contains.iter().any(|code| self.codes.contains(code))
    }

    /// Converts to a Qdrant `must_not` filter, or `None` when empty.
    pub fn as_qdrant_filter(&self) -> Option<Filter> {
        if self.codes.is_empty() {
            return None;
        }

        let conditions: Vec<Condition> = self
            .codes
            .iter()
            .map(|code| Condition::matches("contains", code.clone()))
            .collect();

        Some(Filter::must_not(conditions))
    }
}

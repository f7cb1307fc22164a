//! Allergen vocabulary and normalization.
//!
//! Every allergen-bearing value in the system (recipe metadata, user input,
//! filter predicates) is reduced to the closed [`Allergen`] enumeration before
//! any safety decision is made. Raw free-text tokens are never compared
//! directly across sources.

mod synonyms;


use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use synonyms::{INGREDIENT_ALIASES, SYNONYMS};

/// Canonical allergen categories.
///
/// Serialized as the uppercase codes used throughout recipe datasets and
/// store payloads (`APLV`, `HUEVO`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Allergen {
    /// Cow's milk protein (alergia a la proteína de la leche de vaca).
    #[serde(rename = "APLV")]
    Aplv,
    /// Egg.
    #[serde(rename = "HUEVO")]
    Huevo,
    /// Soy.
    #[serde(rename = "SOYA")]
    Soya,
    /// Tree nuts and peanuts.
    #[serde(rename = "FRUTOS_SECOS")]
    FrutosSecos,
    /// Gluten-bearing cereals.
    #[serde(rename = "GLUTEN")]
    Gluten,
    /// Fish.
    #[serde(rename = "PESCADO")]
    Pescado,
}

impl Allergen {
    /// All canonical allergens, in code order.
    pub const ALL: [Allergen; 6] = [
        Allergen::Aplv,
        Allergen::Huevo,
        Allergen::Soya,
        Allergen::FrutosSecos,
        Allergen::Gluten,
        Allergen::Pescado,
    ];

    /// The canonical uppercase code.
    pub fn code(&self) -> &'static str {
        match self {
            Allergen::Aplv => "APLV",
            Allergen::Huevo => "HUEVO",
            Allergen::Soya => "SOYA",
            Allergen::FrutosSecos => "FRUTOS_SECOS",
            Allergen::Gluten => "GLUTEN",
            Allergen::Pescado => "PESCADO",
        }
    }

    /// Resolves a canonical code (exact, case-sensitive) back to the enum.
    pub fn from_code(code: &str) -> Option<Allergen> {
        Allergen::ALL.iter().copied().find(|a| a.code() == code)
    }

    /// Known surface forms for this allergen (lower-cased).
    pub fn synonyms(&self) -> &'static [&'static str] {
        SYNONYMS
            .iter()
            .find(|(a, _)| a == self)
            .map(|(_, s)| *s)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of normalizing user-declared allergy terms.
///
/// `unrecognized` carries the terms the normalizer could not map to any
/// canonical allergen. The safety filter cannot enforce those terms; callers
/// presenting results to end users must surface them rather than mask them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllergyScreening {
    /// Canonical allergens matched from the input.
    pub allergens: BTreeSet<Allergen>,
    /// Input terms (trimmed) that matched nothing. Unenforceable.
    pub unrecognized: Vec<String>,
}

impl AllergyScreening {
    /// `true` when every input term was mapped to a canonical allergen.
    pub fn fully_enforced(&self) -> bool {
        self.unrecognized.is_empty()
    }
}

/// Maps raw allergy terms to canonical allergens, reporting what could not be
/// mapped.
///
/// A term matches allergen `C` when its lower-cased, trimmed form is in `C`'s
/// synonym set, or its upper-cased form equals `C`'s code (so users may type
/// the code directly). Empty input yields an empty screening.
pub fn screen_allergies<I, S>(raw_terms: I) -> AllergyScreening
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut screening = AllergyScreening::default();

    for raw in raw_terms {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }

        let lowered = trimmed.to_lowercase();
        let as_code = lowered.to_uppercase();

        let matched = Allergen::ALL
            .iter()
            .copied()
            .find(|a| a.synonyms().contains(&lowered.as_str()) || a.code() == as_code);

        match matched {
            Some(allergen) => {
                screening.allergens.insert(allergen);
            }
            None => screening.unrecognized.push(trimmed.to_string()),
        }
    }

    screening
}

/// Maps raw allergy terms to canonical allergens, silently dropping anything
/// unrecognized. Use [`screen_allergies`] when the caller needs to know which
/// terms could not be enforced.
pub fn normalize_allergies<I, S>(raw_terms: I) -> BTreeSet<Allergen>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    screen_allergies(raw_terms).allergens
}

/// Detects canonical allergens mentioned in free text.
///
/// Tokenizes on non-alphanumeric boundaries, maps tokens through the
/// ingredient-alias table, then checks synonym membership. Multi-word synonym
/// phrases ("proteína de leche") are additionally matched as substrings of
/// the lower-cased text, since single tokens cannot reach them. Idempotent.
pub fn detect_allergens_from_text(text: &str) -> BTreeSet<Allergen> {
    let mut detected = BTreeSet::new();
    if text.trim().is_empty() {
        return detected;
    }

    let lowered = text.to_lowercase();

    for token in lowered.split(|c: char| !c.is_alphanumeric()) {
        if token.is_empty() {
            continue;
        }

        let ingredient = INGREDIENT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == token)
            .map(|(_, normalized)| *normalized)
            .unwrap_or(token);

        for allergen in Allergen::ALL {
            if allergen.synonyms().contains(&ingredient) {
                detected.insert(allergen);
            }
        }
    }

    for allergen in Allergen::ALL {
        for synonym in allergen.synonyms() {
            if synonym.contains(' ') && lowered.contains(synonym) {
                detected.insert(allergen);
            }
        }
    }

    detected
}

/// Builds the full lower-cased vocabulary the safety filter enforces for a
/// normalized allergen set: every raw input term, every canonical code, and
/// every synonym of every matched allergen.
///
/// Returning the synonym closure (not just codes and raw terms) is what makes
/// the filter reject a document mentioning "leche" when the user declared
/// "milk". Empty terms are dropped so they can never match everything.
pub fn exclusion_vocabulary<S>(
    allergens: &BTreeSet<Allergen>,
    raw_terms: &[S],
) -> BTreeSet<String>
where
    S: AsRef<str>,
{
    let mut vocabulary = BTreeSet::new();

    for raw in raw_terms {
        let lowered = raw.as_ref().trim().to_lowercase();
        if !lowered.is_empty() {
            vocabulary.insert(lowered);
        }
    }

    for allergen in allergens {
        vocabulary.insert(allergen.code().to_lowercase());
        for synonym in allergen.synonyms() {
            vocabulary.insert((*synonym).to_string());
        }
    }

    vocabulary
}

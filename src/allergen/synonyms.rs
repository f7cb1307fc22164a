use super::Allergen;

/// Known surface forms per canonical allergen (Spanish and English,
/// lower-cased). Append-only at configuration time; no surface form may be
/// claimed by two allergens (checked in tests).
pub(crate) const SYNONYMS: &[(Allergen, &[&str])] = &[
    (
        Allergen::Aplv,
        &[
            "leche",
            "lácteos",
            "proteína de leche",
            "caseína",
            "suero de leche",
            "milk",
            "dairy",
        ],
    ),
    (Allergen::Huevo, &["huevo", "egg", "albúmina"]),
    (Allergen::Soya, &["soya", "soy", "lecitina de soya"]),
    (
        Allergen::FrutosSecos,
        &[
            "nueces",
            "almendras",
            "avellanas",
            "maní",
            "peanuts",
            "tree nuts",
        ],
    ),
    (
        Allergen::Gluten,
        &["gluten", "trigo", "wheat", "cebada", "centeno"],
    ),
    (
        Allergen::Pescado,
        &["pescado", "fish", "atún", "salmón", "merluza"],
    ),
];

/// Maps common ingredient words to synonym-table vocabulary, so free-text
/// detection catches derived ingredients ("mantequilla" never appears in the
/// synonym table but implies dairy). A miss here errs toward exclusion
/// downstream, never inclusion.
pub(crate) const INGREDIENT_ALIASES: &[(&str, &str)] = &[
    ("mantequilla", "lácteos"),
    ("queso", "lácteos"),
    ("yogur", "lácteos"),
    ("yogurt", "lácteos"),
    ("nata", "lácteos"),
    ("clara", "huevo"),
    ("claras", "huevo"),
    ("yema", "huevo"),
    ("yemas", "huevo"),
    ("mayonesa", "huevo"),
    ("tofu", "soya"),
    ("edamame", "soya"),
    ("almendra", "almendras"),
    ("nuez", "nueces"),
    ("avellana", "avellanas"),
    ("cacahuete", "maní"),
    ("cacahuate", "maní"),
    ("harina", "trigo"),
    ("pan", "trigo"),
    ("galleta", "trigo"),
    ("galletas", "trigo"),
    ("atun", "atún"),
    ("salmon", "salmón"),
];

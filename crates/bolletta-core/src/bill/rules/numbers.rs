//! Italian locale number parsing ("1.234" thousands, "3,5" decimals).

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse an Italian-formatted integer (e.g. "50.729", "1 234", "2700").
/// Grouping punctuation is stripped; anything else makes the value invalid.
pub fn parse_italian_integer(s: &str) -> Option<u32> {
    let cleaned = s.trim().replace(['.', ',', ' ', '\u{00a0}'], "");
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse an Italian-formatted decimal (e.g. "3,3", "1.234,56", "4.5").
pub fn parse_italian_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        // Both separators: the last one is the decimal mark
        match (cleaned.rfind(','), cleaned.rfind('.')) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            _ => cleaned.replace(',', ""),
        }
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else if let Some(pos) = cleaned.rfind('.') {
        // Lone dot: thousands separator when followed by exactly three digits
        if cleaned.len() - pos - 1 == 3 {
            cleaned.replace('.', "")
        } else {
            cleaned
        }
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).ok()
}

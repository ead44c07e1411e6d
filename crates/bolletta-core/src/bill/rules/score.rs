//! Weighted confidence scoring over cleaned bill data.
//!
//! The score is an order-independent sum over the fields present, plus
//! coherence bonuses for field combinations, clamped to 100. The weight
//! table and bonus predicates are part of the pipeline contract: the same
//! cleaned data must always produce the same score.

use crate::models::bill::{BillData, FieldName};

/// Per-field weights. Identifiers and the fiscal code indicate a usable
/// record most strongly; contact and period fields least. Meta fields
/// (provider, bill type) carry no weight.
const FIELD_WEIGHTS: &[(FieldName, u32)] = &[
    (FieldName::Pod, 20),
    (FieldName::Pdr, 20),
    (FieldName::FiscalCode, 18),
    (FieldName::VatNumber, 12),
    (FieldName::CustomerNumber, 8),
    (FieldName::ClientName, 6),
    (FieldName::Address, 6),
    (FieldName::ElectricConsumption, 6),
    (FieldName::GasConsumption, 6),
    (FieldName::City, 4),
    (FieldName::PostalCode, 4),
    (FieldName::Company, 4),
    (FieldName::ContractNumber, 4),
    (FieldName::FirstName, 3),
    (FieldName::LastName, 3),
    (FieldName::PowerCommitted, 3),
    (FieldName::BillDate, 3),
    (FieldName::Province, 2),
    (FieldName::Supplier, 2),
    (FieldName::FromDate, 2),
    (FieldName::ToDate, 2),
];

const BONUS_NAME_COHERENT: u32 = 5;
const BONUS_ADDRESS_TRIPLE: u32 = 5;
const BONUS_IDENTIFIED_AND_FISCAL: u32 = 10;

/// Score cleaned bill data on a 0-100 scale.
pub fn score_fields(data: &BillData) -> u8 {
    let mut score: u32 = data
        .present_fields()
        .iter()
        .map(|field| field_weight(*field))
        .sum();

    if let (Some(first), Some(last), Some(full)) =
        (&data.first_name, &data.last_name, &data.client_name)
    {
        if names_agree(first, last, full) {
            score += BONUS_NAME_COHERENT;
        }
    }

    if data.postal_code.is_some() && data.city.is_some() && data.province.is_some() {
        score += BONUS_ADDRESS_TRIPLE;
    }

    if (data.pod.is_some() || data.pdr.is_some()) && data.fiscal_code.is_some() {
        score += BONUS_IDENTIFIED_AND_FISCAL;
    }

    score.min(100) as u8
}

fn field_weight(field: FieldName) -> u32 {
    FIELD_WEIGHTS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, w)| *w)
        .unwrap_or(0)
}

/// Name components cohere when the full client name contains both of them.
fn names_agree(first: &str, last: &str, full: &str) -> bool {
    let full = full.to_lowercase();
    full.contains(&first.to_lowercase()) && full.contains(&last.to_lowercase())
}

//! Generic field extractor: provider-agnostic pattern table.

use lazy_static::lazy_static;

use crate::models::bill::FieldName;

use super::patterns::*;
use super::{BillExtractor, FieldRule, RawFields, apply_rules};

lazy_static! {
    static ref GENERIC_RULES: Vec<FieldRule> = vec![
        FieldRule::new(
            FieldName::FiscalCode,
            vec![(&*FISCAL_CODE_LABELED, 1), (&*FISCAL_CODE_STANDALONE, 1)],
        ),
        FieldRule::new(FieldName::VatNumber, vec![(&*VAT_NUMBER, 1)]),
        FieldRule::new(
            FieldName::Pod,
            vec![(&*POD_LABELED, 1), (&*POD_STANDALONE, 1)],
        ),
        FieldRule::new(FieldName::Pdr, vec![(&*PDR_LABELED, 1)]),
        FieldRule::new(FieldName::CustomerNumber, vec![(&*CUSTOMER_NUMBER, 1)]),
        FieldRule::new(FieldName::ContractNumber, vec![(&*CONTRACT_NUMBER, 1)]),
        FieldRule::new(
            FieldName::ClientName,
            vec![
                (&*CLIENT_NAME_HOLDER, 1),
                (&*CLIENT_NAME_CAPS, 1),
                (&*CLIENT_NAME_TITLE, 1),
            ],
        ),
        FieldRule::new(
            FieldName::Address,
            vec![(&*ADDRESS_STREET, 1), (&*ADDRESS_LABELED, 1)],
        ),
        FieldRule::new(
            FieldName::ElectricConsumption,
            vec![
                (&*ELECTRIC_CONSUMPTION_LABELED, 1),
                (&*ELECTRIC_CONSUMPTION_ANY, 1),
            ],
        ),
        FieldRule::new(
            FieldName::GasConsumption,
            vec![(&*GAS_CONSUMPTION_LABELED, 1), (&*GAS_CONSUMPTION_ANY, 1)],
        ),
        FieldRule::new(FieldName::PowerCommitted, vec![(&*POWER_COMMITTED, 1)]),
        FieldRule::new(FieldName::Supplier, vec![(&*SUPPLIER, 1)]),
        FieldRule::new(FieldName::Company, vec![(&*COMPANY, 1)]),
        FieldRule::new(FieldName::BillDate, vec![(&*BILL_DATE, 1)]),
        FieldRule::new(FieldName::FromDate, vec![(&*FROM_DATE, 1)]),
        FieldRule::new(FieldName::ToDate, vec![(&*TO_DATE, 1)]),
    ];
}

/// Provider-agnostic extractor used when no specialized variant applies.
pub struct GenericExtractor;

impl GenericExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenericExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BillExtractor for GenericExtractor {
    fn extract_raw(&self, text: &str) -> RawFields {
        let mut raw = RawFields::new();
        apply_rules(&GENERIC_RULES, text, &mut raw);
        apply_address_triple(text, &mut raw);
        split_client_name(&mut raw);
        raw
    }
}

/// The address-triple pattern fills postal code, city and province from a
/// single match. This is the one exception to the one-field-per-pattern
/// rule of [`apply_rules`].
pub(crate) fn apply_address_triple(text: &str, out: &mut RawFields) {
    if let Some(caps) = ADDRESS_TRIPLE.captures(text) {
        out.entry(FieldName::PostalCode)
            .or_insert_with(|| caps[1].to_string());
        out.entry(FieldName::City)
            .or_insert_with(|| caps[2].trim().to_string());
        out.entry(FieldName::Province)
            .or_insert_with(|| caps[3].to_string());
    }
}

/// Split a captured client name into first and last components. Single-token
/// names are left unsplit: a partial derivation would be worse than none.
pub(crate) fn split_client_name(out: &mut RawFields) {
    if out.contains_key(&FieldName::FirstName) || out.contains_key(&FieldName::LastName) {
        return;
    }
    let Some(full) = out.get(&FieldName::ClientName).cloned() else {
        return;
    };
    let tokens: Vec<&str> = full.split_whitespace().collect();
    if tokens.len() >= 2 {
        out.insert(FieldName::FirstName, tokens[0].to_string());
        out.insert(FieldName::LastName, tokens[1..].join(" "));
    }
}

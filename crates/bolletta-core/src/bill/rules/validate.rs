//! Field validation and normalization.
//!
//! Every rule here is a hard pass/fail gate: a value that fails its gate is
//! dropped from the output, never clamped or reported as an error. Partial
//! extraction is the expected common case.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::bill::{BillData, BillType, FieldName};

use super::dates::parse_italian_date;
use super::numbers::{parse_italian_decimal, parse_italian_integer};
use super::RawFields;

// Plausibility bounds for consumption figures; values outside are pattern
// misfires, not real readings.
const MAX_ELECTRIC_KWH: u32 = 100_000;
const MAX_GAS_SMC: u32 = 50_000;
const MAX_POWER_KW: u32 = 100;

// Cleaned strings longer than this are a greedy capture of unrelated
// document content.
const MAX_TEXT_LEN: usize = 200;

lazy_static! {
    static ref FISCAL_CODE_FULL: Regex =
        Regex::new(r"^[A-Z]{6}[0-9]{2}[A-Z][0-9]{2}[A-Z][0-9]{3}[A-Z]$").unwrap();
    static ref VAT_FULL: Regex = Regex::new(r"^[0-9]{11}$").unwrap();
    static ref POD_FULL: Regex = Regex::new(r"^IT[0-9]{3}[A-Z][0-9]{8}$").unwrap();
    static ref PDR_FULL: Regex = Regex::new(r"^[0-9]{8,14}$").unwrap();
    static ref PDR_STRICT: Regex = Regex::new(r"^[0-9]{14}$").unwrap();
    static ref POSTAL_FULL: Regex = Regex::new(r"^[0-9]{5}$").unwrap();
}

/// Validates raw extracted fields into a cleaned [`BillData`].
///
/// Pure and total: no I/O, and any raw map (including garbage values)
/// produces a map, possibly empty.
pub struct FieldValidator {
    strict_pdr: bool,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self { strict_pdr: false }
    }

    /// Require exactly 14 digits for the PDR instead of the generic 8-14
    /// digit rule. Chosen on the ENEL path, where the full code is printed.
    pub fn with_strict_pdr(mut self, strict: bool) -> Self {
        self.strict_pdr = strict;
        self
    }

    /// Validate every raw field, dropping failures silently, and derive the
    /// bill type from the identifiers that survived.
    pub fn validate(&self, raw: &RawFields) -> BillData {
        let mut data = BillData::default();

        for (field, value) in raw {
            match field {
                FieldName::FiscalCode => {
                    let v = value.trim().to_uppercase();
                    if FISCAL_CODE_FULL.is_match(&v) {
                        data.fiscal_code = Some(v);
                    }
                }
                FieldName::VatNumber => {
                    let v = value.trim();
                    if VAT_FULL.is_match(v) {
                        data.vat_number = Some(v.to_string());
                    }
                }
                FieldName::Pod => {
                    let v: String = value.split_whitespace().collect::<String>().to_uppercase();
                    if POD_FULL.is_match(&v) {
                        data.pod = Some(v);
                    }
                }
                FieldName::Pdr => {
                    let v: String = value.split_whitespace().collect();
                    let gate = if self.strict_pdr {
                        &*PDR_STRICT
                    } else {
                        &*PDR_FULL
                    };
                    if gate.is_match(&v) {
                        data.pdr = Some(v);
                    }
                }
                FieldName::PostalCode => {
                    let v = value.trim();
                    if POSTAL_FULL.is_match(v) {
                        data.postal_code = Some(v.to_string());
                    }
                }
                FieldName::ElectricConsumption => {
                    data.electric_consumption = parse_italian_integer(value)
                        .filter(|&n| n > 0 && n < MAX_ELECTRIC_KWH);
                }
                FieldName::GasConsumption => {
                    data.gas_consumption =
                        parse_italian_integer(value).filter(|&n| n > 0 && n < MAX_GAS_SMC);
                }
                FieldName::PowerCommitted => {
                    data.power_committed = parse_italian_decimal(value)
                        .filter(|d| d > &Decimal::ZERO && d < &Decimal::from(MAX_POWER_KW));
                }
                FieldName::BillDate => data.bill_date = parse_italian_date(value),
                FieldName::FromDate => data.from_date = parse_italian_date(value),
                FieldName::ToDate => data.to_date = parse_italian_date(value),
                FieldName::FirstName => data.first_name = clean_text(value),
                FieldName::LastName => data.last_name = clean_text(value),
                FieldName::ClientName => data.client_name = clean_text(value),
                FieldName::Company => data.company = clean_text(value),
                FieldName::Address => data.address = clean_text(value),
                FieldName::City => data.city = clean_text(value),
                FieldName::Province => data.province = clean_text(value),
                FieldName::CustomerNumber => data.customer_number = clean_text(value),
                FieldName::ContractNumber => data.contract_number = clean_text(value),
                FieldName::Supplier => data.supplier = clean_text(value),
                FieldName::Provider => data.provider = clean_text(value),
                // Derived below from validated identifiers; a raw value
                // here would be an extractor bug, so it is ignored.
                FieldName::BillType => {}
            }
        }

        data.bill_type = BillType::from_identifiers(data.pod.is_some(), data.pdr.is_some());

        data
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim, collapse internal whitespace, and reject empty or implausibly
/// long strings.
fn clean_text(value: &str) -> Option<String> {
    let cleaned = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() || cleaned.chars().count() > MAX_TEXT_LEN {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn raw_with(field: FieldName, value: &str) -> RawFields {
        let mut raw = RawFields::new();
        raw.insert(field, value.to_string());
        raw
    }

    #[test]
    fn test_fiscal_code_case_normalized() {
        let raw = raw_with(FieldName::FiscalCode, "ngldia74a56i293t");
        let data = FieldValidator::new().validate(&raw);
        assert_eq!(data.fiscal_code.as_deref(), Some("NGLDIA74A56I293T"));
    }

    #[test]
    fn test_invalid_fiscal_code_dropped() {
        let raw = raw_with(FieldName::FiscalCode, "NGLDIA74A5");
        let data = FieldValidator::new().validate(&raw);
        assert_eq!(data.fiscal_code, None);
    }

    #[test]
    fn test_vat_number_gate() {
        let valid = FieldValidator::new().validate(&raw_with(FieldName::VatNumber, "01234567890"));
        assert_eq!(valid.vat_number.as_deref(), Some("01234567890"));

        let short = FieldValidator::new().validate(&raw_with(FieldName::VatNumber, "0123456789"));
        assert_eq!(short.vat_number, None);
    }

    #[test]
    fn test_pod_whitespace_removed_and_upcased() {
        let raw = raw_with(FieldName::Pod, "it 001 e 83788734");
        let data = FieldValidator::new().validate(&raw);
        assert_eq!(data.pod.as_deref(), Some("IT001E83788734"));
    }

    #[test]
    fn test_pdr_generic_and_strict_rules() {
        let eight = raw_with(FieldName::Pdr, "12345678");
        assert_eq!(
            FieldValidator::new().validate(&eight).pdr.as_deref(),
            Some("12345678")
        );
        assert_eq!(
            FieldValidator::new()
                .with_strict_pdr(true)
                .validate(&eight)
                .pdr,
            None
        );

        let fourteen = raw_with(FieldName::Pdr, "00881234567890");
        assert_eq!(
            FieldValidator::new()
                .with_strict_pdr(true)
                .validate(&fourteen)
                .pdr
                .as_deref(),
            Some("00881234567890")
        );
    }

    #[test]
    fn test_consumption_bounds() {
        let ok = raw_with(FieldName::ElectricConsumption, "50.729");
        assert_eq!(
            FieldValidator::new().validate(&ok).electric_consumption,
            Some(50_729)
        );

        let too_big = raw_with(FieldName::ElectricConsumption, "1.234.567");
        assert_eq!(
            FieldValidator::new().validate(&too_big).electric_consumption,
            None
        );

        let zero = raw_with(FieldName::GasConsumption, "0");
        assert_eq!(FieldValidator::new().validate(&zero).gas_consumption, None);
    }

    #[test]
    fn test_power_committed_locale_conversion() {
        let raw = raw_with(FieldName::PowerCommitted, "4,5");
        let data = FieldValidator::new().validate(&raw);
        assert_eq!(data.power_committed, Some(Decimal::new(45, 1)));
    }

    #[test]
    fn test_text_whitespace_collapsed() {
        let raw = raw_with(FieldName::City, "  Sant'Arpino   \t di  sotto ");
        let data = FieldValidator::new().validate(&raw);
        assert_eq!(data.city.as_deref(), Some("Sant'Arpino di sotto"));
    }

    #[test]
    fn test_overlong_text_dropped() {
        let raw = raw_with(FieldName::Address, &"x".repeat(201));
        let data = FieldValidator::new().validate(&raw);
        assert_eq!(data.address, None);
    }

    #[test]
    fn test_dates_converted_or_dropped() {
        let mut raw = RawFields::new();
        raw.insert(FieldName::BillDate, "15/01/2024".to_string());
        raw.insert(FieldName::FromDate, "31/02/2024".to_string());
        let data = FieldValidator::new().validate(&raw);

        assert_eq!(
            data.bill_date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(data.from_date, None);
    }

    #[test]
    fn test_bill_type_derivation() {
        let mut raw = RawFields::new();
        raw.insert(FieldName::Pod, "IT001E83788734".to_string());
        let data = FieldValidator::new().validate(&raw);
        assert_eq!(data.bill_type, Some(BillType::EnergiaElettrica));

        raw.insert(FieldName::Pdr, "00881234567890".to_string());
        let data = FieldValidator::new().validate(&raw);
        assert_eq!(data.bill_type, Some(BillType::DualFuel));
    }

    #[test]
    fn test_garbage_raw_map_yields_empty_data() {
        let mut raw = RawFields::new();
        raw.insert(FieldName::Pod, "not a pod".to_string());
        raw.insert(FieldName::VatNumber, "abc".to_string());
        raw.insert(FieldName::City, "   ".to_string());
        let data = FieldValidator::new().validate(&raw);
        assert!(data.is_empty());
    }
}

//! Bill data models for the extraction pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Logical fields the extractors know how to pull out of bill text.
///
/// The raw extraction stage keys its candidate values by this enum; the
/// cleaned [`BillData`] exposes one typed slot per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    // Identity
    FirstName,
    LastName,
    ClientName,
    FiscalCode,
    VatNumber,
    Company,
    // Location
    Address,
    City,
    Province,
    PostalCode,
    // Utility identifiers
    Pod,
    Pdr,
    CustomerNumber,
    // Consumption and contract
    ElectricConsumption,
    GasConsumption,
    PowerCommitted,
    Supplier,
    ContractNumber,
    BillDate,
    FromDate,
    ToDate,
    // Derived
    Provider,
    BillType,
}

impl FieldName {
    /// Snake-case name used in logs and CSV headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::FirstName => "first_name",
            FieldName::LastName => "last_name",
            FieldName::ClientName => "client_name",
            FieldName::FiscalCode => "fiscal_code",
            FieldName::VatNumber => "vat_number",
            FieldName::Company => "company",
            FieldName::Address => "address",
            FieldName::City => "city",
            FieldName::Province => "province",
            FieldName::PostalCode => "postal_code",
            FieldName::Pod => "pod",
            FieldName::Pdr => "pdr",
            FieldName::CustomerNumber => "customer_number",
            FieldName::ElectricConsumption => "electric_consumption",
            FieldName::GasConsumption => "gas_consumption",
            FieldName::PowerCommitted => "power_committed",
            FieldName::Supplier => "supplier",
            FieldName::ContractNumber => "contract_number",
            FieldName::BillDate => "bill_date",
            FieldName::FromDate => "from_date",
            FieldName::ToDate => "to_date",
            FieldName::Provider => "provider",
            FieldName::BillType => "bill_type",
        }
    }
}

/// Kind of supply the bill covers, derived from which utility
/// identifiers survived validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillType {
    /// Electricity only (POD present).
    EnergiaElettrica,
    /// Gas only (PDR present).
    Gas,
    /// Both POD and PDR on the same bill.
    DualFuel,
}

impl BillType {
    /// Derive the bill type from validated identifier presence. Dual-fuel
    /// bills carry both identifiers; neither means the type is unknown.
    pub fn from_identifiers(has_pod: bool, has_pdr: bool) -> Option<Self> {
        match (has_pod, has_pdr) {
            (true, true) => Some(BillType::DualFuel),
            (true, false) => Some(BillType::EnergiaElettrica),
            (false, true) => Some(BillType::Gas),
            (false, false) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::EnergiaElettrica => "energia_elettrica",
            BillType::Gas => "gas",
            BillType::DualFuel => "dual_fuel",
        }
    }
}

/// Known energy providers the detector can classify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderTag {
    Enel,
    Eni,
    Edison,
    A2a,
    Iren,
    Acea,
    Hera,
    Sorgenia,
    Illumia,
    Engie,
    #[default]
    Unknown,
}

impl ProviderTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderTag::Enel => "enel",
            ProviderTag::Eni => "eni",
            ProviderTag::Edison => "edison",
            ProviderTag::A2a => "a2a",
            ProviderTag::Iren => "iren",
            ProviderTag::Acea => "acea",
            ProviderTag::Hera => "hera",
            ProviderTag::Sorgenia => "sorgenia",
            ProviderTag::Illumia => "illumia",
            ProviderTag::Engie => "engie",
            ProviderTag::Unknown => "unknown",
        }
    }
}

/// Cleaned bill fields. Every slot is optional: absence means the field was
/// not extracted (or failed validation), never that it is zero or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    /// Italian personal tax code (16 alphanumeric chars).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_code: Option<String>,

    /// Partita IVA (11 digits).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Two-letter province code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,

    /// Five-digit CAP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Electric point of delivery (IT + 3 digits + letter + 8 digits).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod: Option<String>,

    /// Gas point of redelivery (numeric string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_number: Option<String>,

    /// Annual or billed electric consumption in kWh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electric_consumption: Option<u32>,

    /// Annual or billed gas consumption in Smc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_consumption: Option<u32>,

    /// Contractually committed power in kW.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_committed: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_type: Option<BillType>,
}

impl BillData {
    /// Enumerate the fields that are populated, in declaration order.
    /// The confidence scorer is a pure function of this list.
    pub fn present_fields(&self) -> Vec<FieldName> {
        let mut fields = Vec::new();
        macro_rules! check {
            ($slot:ident, $name:expr) => {
                if self.$slot.is_some() {
                    fields.push($name);
                }
            };
        }
        check!(first_name, FieldName::FirstName);
        check!(last_name, FieldName::LastName);
        check!(client_name, FieldName::ClientName);
        check!(fiscal_code, FieldName::FiscalCode);
        check!(vat_number, FieldName::VatNumber);
        check!(company, FieldName::Company);
        check!(address, FieldName::Address);
        check!(city, FieldName::City);
        check!(province, FieldName::Province);
        check!(postal_code, FieldName::PostalCode);
        check!(pod, FieldName::Pod);
        check!(pdr, FieldName::Pdr);
        check!(customer_number, FieldName::CustomerNumber);
        check!(electric_consumption, FieldName::ElectricConsumption);
        check!(gas_consumption, FieldName::GasConsumption);
        check!(power_committed, FieldName::PowerCommitted);
        check!(supplier, FieldName::Supplier);
        check!(contract_number, FieldName::ContractNumber);
        check!(bill_date, FieldName::BillDate);
        check!(from_date, FieldName::FromDate);
        check!(to_date, FieldName::ToDate);
        check!(provider, FieldName::Provider);
        check!(bill_type, FieldName::BillType);
        fields
    }

    /// True when no field at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

/// Which pattern table produced the raw fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    #[default]
    Generic,
    Enel,
}

/// Metadata about a pipeline run. Deliberately free of timing or other
/// run-dependent values: serializing the same result twice must produce
/// identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Pattern table that produced the raw fields.
    pub extractor: ExtractorKind,

    /// Pipeline-level notes. Field-level misses are expected and never
    /// reported here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Outcome of one extraction call. Created fresh per call, immutable once
/// returned; persistence is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// False only for collaborator contract violations (unreadable input),
    /// never because the bill content did not match any pattern.
    pub success: bool,

    /// Provider detected from the text.
    pub provider: ProviderTag,

    /// Weighted confidence score, 0-100.
    pub confidence: u8,

    /// Fields that passed validation.
    pub data: BillData,

    /// Leading characters of the input text, for human review.
    pub raw_text_preview: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Extraction metadata.
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Hard-failure result. Reserved for cases where the input itself could
    /// not be obtained or decoded by a collaborator; "nothing extracted"
    /// from readable text is a success with empty data instead.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            provider: ProviderTag::Unknown,
            confidence: 0,
            data: BillData::default(),
            raw_text_preview: String::new(),
            error: Some(error.into()),
            metadata: ExtractionMetadata::default(),
        }
    }
}

//! Core library for Italian utility bill extraction.
//!
//! This crate provides:
//! - Provider detection by keyword matching (ENEL, ENI, Edison, ...)
//! - Rule-based field extraction with generic and ENEL-tuned pattern tables
//! - Field validation and Italian-locale normalization
//! - Weighted confidence scoring of the cleaned record
//!
//! The pipeline takes already-decoded bill text and is purely
//! computational: no I/O, no shared mutable state, safe to call
//! concurrently. PDF decoding and persistence belong to the caller.

pub mod bill;
pub mod error;
pub mod models;

pub use bill::provider::{detect_provider, is_enel_bill};
pub use bill::{BillParser, BillPipeline};
pub use error::{BollettaError, Result};
pub use models::bill::{
    BillData, BillType, ExtractionMetadata, ExtractionResult, ExtractorKind, FieldName,
    ProviderTag,
};
pub use models::config::{BollettaConfig, ExtractionConfig};

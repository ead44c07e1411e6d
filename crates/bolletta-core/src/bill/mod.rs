//! Bill extraction: provider detection, field extraction, validation and
//! confidence scoring.

mod pipeline;
pub mod provider;
pub mod rules;

pub use pipeline::{BillParser, BillPipeline};

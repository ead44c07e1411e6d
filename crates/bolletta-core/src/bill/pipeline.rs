//! Extraction orchestrator: detection, extraction, validation, scoring.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::bill::{ExtractionMetadata, ExtractionResult, ExtractorKind};
use crate::models::config::ExtractionConfig;

use super::provider::{detect_provider, is_enel_bill};
use super::rules::{BillExtractor, EnelExtractor, FieldValidator, GenericExtractor, score_fields};

/// Trait for bill extraction pipelines.
pub trait BillParser {
    /// Run the full pipeline on already-decoded bill text.
    ///
    /// Never fails for string input: adversarial or empty text degrades to
    /// an empty data map with confidence 0, still a success.
    fn extract(&self, text: &str) -> ExtractionResult;
}

/// Default pipeline: provider detection, generic or ENEL extraction,
/// validation, confidence scoring.
pub struct BillPipeline {
    literal_fallbacks: bool,
    strict_enel_pdr: bool,
    preview_chars: usize,
}

impl BillPipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self {
            literal_fallbacks: true,
            strict_enel_pdr: true,
            preview_chars: 200,
        }
    }

    /// Build a pipeline from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            literal_fallbacks: config.literal_fallbacks,
            strict_enel_pdr: config.strict_enel_pdr,
            preview_chars: config.preview_chars,
        }
    }

    /// Enable or disable the ENEL literal-fallback tier.
    pub fn with_literal_fallbacks(mut self, enabled: bool) -> Self {
        self.literal_fallbacks = enabled;
        self
    }

    /// Apply the exact-14-digit PDR rule on the ENEL path.
    pub fn with_strict_enel_pdr(mut self, strict: bool) -> Self {
        self.strict_enel_pdr = strict;
        self
    }

    /// Characters of input echoed back in the result preview.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }
}

impl Default for BillPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl BillParser for BillPipeline {
    fn extract(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let provider = detect_provider(text);

        let (raw, extractor) = if is_enel_bill(text) {
            debug!("dispatching to the ENEL extractor");
            let raw = EnelExtractor::new()
                .with_literal_fallbacks(self.literal_fallbacks)
                .extract_raw(text);
            (raw, ExtractorKind::Enel)
        } else {
            let raw = GenericExtractor::new().extract_raw(text);
            (raw, ExtractorKind::Generic)
        };
        debug!(
            "raw candidates: {:?}",
            raw.keys().map(|f| f.as_str()).collect::<Vec<_>>()
        );

        let strict_pdr = self.strict_enel_pdr && extractor == ExtractorKind::Enel;
        let data = FieldValidator::new()
            .with_strict_pdr(strict_pdr)
            .validate(&raw);
        let confidence = score_fields(&data);

        let mut warnings = Vec::new();
        if text.trim().is_empty() {
            warnings.push("input text is empty".to_string());
        } else if data.is_empty() {
            warnings.push("no fields passed validation".to_string());
        }

        info!(
            "extracted {} fields (provider: {}, confidence: {}) in {} ms",
            data.present_fields().len(),
            provider.as_str(),
            confidence,
            start.elapsed().as_millis()
        );

        ExtractionResult {
            success: true,
            provider,
            confidence,
            data,
            raw_text_preview: preview(text, self.preview_chars),
            error: None,
            metadata: ExtractionMetadata {
                extractor,
                warnings,
            },
        }
    }
}

/// Char-safe prefix of the input for the result preview.
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::bill::{BillType, ProviderTag};

    use super::*;

    // Transcribed from a real ENEL sample bill.
    const ENEL_SAMPLE: &str = "\
Enel Energia SpA - Mercato libero dell'energia
Bolletta sintetica
N° Cliente 105627590
Codice Fiscale NGLDIA74A56I293T
Codice POD IT001E83788734
Gentile IDA ANGELINO
La fornitura di energia elettrica e attiva in
Via Diaz Armando 100 81031 Aversa CE
Potenza impegnata 3 kW
Consumo 50.729kWh consumi rilevati
Totale da pagare 403,90 euro
";

    #[test]
    fn test_enel_sample_end_to_end() {
        let result = BillPipeline::new().extract(ENEL_SAMPLE);

        assert!(result.success);
        assert_eq!(result.provider, ProviderTag::Enel);
        assert_eq!(result.metadata.extractor, ExtractorKind::Enel);

        let data = &result.data;
        assert_eq!(data.fiscal_code.as_deref(), Some("NGLDIA74A56I293T"));
        assert_eq!(data.pod.as_deref(), Some("IT001E83788734"));
        assert_eq!(data.customer_number.as_deref(), Some("105627590"));
        assert_eq!(data.postal_code.as_deref(), Some("81031"));
        assert_eq!(data.city.as_deref(), Some("Aversa"));
        assert_eq!(data.province.as_deref(), Some("CE"));
        assert_eq!(data.first_name.as_deref(), Some("IDA"));
        assert_eq!(data.last_name.as_deref(), Some("ANGELINO"));
        assert_eq!(data.address.as_deref(), Some("Via Diaz Armando 100"));
        assert_eq!(data.electric_consumption, Some(50_729));
        assert_eq!(data.supplier.as_deref(), Some("Enel Energia"));
        assert_eq!(data.bill_type, Some(BillType::EnergiaElettrica));

        assert!(result.confidence >= 70);
    }

    #[test]
    fn test_invalid_fiscal_code_drops_field_and_lowers_confidence() {
        let tampered = ENEL_SAMPLE.replace("NGLDIA74A56I293T", "NGLDIA74A5");

        let baseline = BillPipeline::new().extract(ENEL_SAMPLE);
        let result = BillPipeline::new().extract(&tampered);

        assert!(result.success);
        assert_eq!(result.data.fiscal_code, None);
        assert!(result.confidence < baseline.confidence);
    }

    #[test]
    fn test_bill_type_from_identifiers() {
        let electric = BillPipeline::new().extract("Codice POD IT001E83788734");
        assert_eq!(electric.data.bill_type, Some(BillType::EnergiaElettrica));

        let dual = BillPipeline::new()
            .extract("Codice POD IT001E83788734\nCodice PDR 00881234567890");
        assert_eq!(dual.data.bill_type, Some(BillType::DualFuel));

        let gas = BillPipeline::new().extract("Codice PDR 00881234567890");
        assert_eq!(gas.data.bill_type, Some(BillType::Gas));
    }

    #[test]
    fn test_unknown_provider_uses_generic_extractor() {
        let result = BillPipeline::new().extract("verbale di assemblea condominiale");
        assert_eq!(result.provider, ProviderTag::Unknown);
        assert_eq!(result.metadata.extractor, ExtractorKind::Generic);
    }

    #[test]
    fn test_detected_but_unmarked_provider_stays_generic() {
        // Detected as ENEL by the broad keyword list, but without a marker
        // from the narrow set the specialized table must not run.
        let result = BillPipeline::new().extract("Servizio Elettrico Nazionale\nCodice POD IT001E83788734");
        assert_eq!(result.provider, ProviderTag::Enel);
        assert_eq!(result.metadata.extractor, ExtractorKind::Generic);
    }

    #[test]
    fn test_empty_input_degrades_gracefully() {
        for input in ["", "   ", "\n\t "] {
            let result = BillPipeline::new().extract(input);
            assert!(result.success);
            assert!(result.data.is_empty());
            assert_eq!(result.confidence, 0);
            assert_eq!(result.error, None);
        }
    }

    #[test]
    fn test_large_unrelated_input_extracts_nothing() {
        let prose = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod \
                     tempor incididunt ut labore et dolore magna aliqua "
            .repeat(500);
        assert!(prose.len() > 50_000);

        let result = BillPipeline::new().extract(&prose);
        assert!(result.success);
        assert!(result.data.is_empty());
        assert_eq!(result.confidence, 0);
        assert_eq!(result.provider, ProviderTag::Unknown);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let first = BillPipeline::new().extract(ENEL_SAMPLE);
        let second = BillPipeline::new().extract(ENEL_SAMPLE);
        assert_eq!(first, second);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let result = BillPipeline::new()
            .with_preview_chars(10)
            .extract("città àèìòù con accenti e altro testo ancora");
        assert_eq!(result.raw_text_preview.chars().count(), 10);
    }

    #[test]
    fn test_cleaned_fields_satisfy_format_invariants() {
        let result = BillPipeline::new().extract(ENEL_SAMPLE);
        let data = &result.data;

        if let Some(fiscal_code) = &data.fiscal_code {
            assert!(
                regex::Regex::new(r"^[A-Z]{6}[0-9]{2}[A-Z][0-9]{2}[A-Z][0-9]{3}[A-Z]$")
                    .unwrap()
                    .is_match(fiscal_code)
            );
        }
        if let Some(pod) = &data.pod {
            assert!(
                regex::Regex::new(r"^IT[0-9]{3}[A-Z][0-9]{8}$")
                    .unwrap()
                    .is_match(pod)
            );
        }
        if let Some(postal_code) = &data.postal_code {
            assert!(regex::Regex::new(r"^[0-9]{5}$").unwrap().is_match(postal_code));
        }
    }
}

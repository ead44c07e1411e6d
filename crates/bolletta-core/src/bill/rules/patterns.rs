//! Common regex patterns for Italian utility bill extraction.
//!
//! All quantifiers are bounded and label patterns are anchored to their
//! keyword, so matching stays linear even on large uploaded documents.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Codice fiscale (16-char personal tax code)
    pub static ref FISCAL_CODE_LABELED: Regex = Regex::new(
        r"(?i)(?:codice\s+fiscale|cod\.?\s*fisc\.?|c\.f\.?)[\s:]{0,5}([A-Za-z]{6}[0-9]{2}[A-Za-z][0-9]{2}[A-Za-z][0-9]{3}[A-Za-z])\b"
    ).unwrap();

    pub static ref FISCAL_CODE_STANDALONE: Regex = Regex::new(
        r"\b([A-Z]{6}[0-9]{2}[A-Z][0-9]{2}[A-Z][0-9]{3}[A-Z])\b"
    ).unwrap();

    // Partita IVA (11 digits)
    pub static ref VAT_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:partita\s+iva|p\.?\s?iva|p/iva)[\s:]{0,5}(?:n[°º.]?\s*)?([0-9]{11})\b"
    ).unwrap();

    // POD (electric point of delivery), labeled and standalone
    pub static ref POD_LABELED: Regex = Regex::new(
        r"(?i)\b(?:codice\s+)?pod\b[\s:]{0,5}([A-Za-z]{2}\s?[0-9]{3}\s?[A-Za-z]\s?[0-9]{8})\b"
    ).unwrap();

    pub static ref POD_STANDALONE: Regex = Regex::new(
        r"\b(IT[0-9]{3}[A-Z][0-9]{8})\b"
    ).unwrap();

    // PDR (gas point of redelivery)
    pub static ref PDR_LABELED: Regex = Regex::new(
        r"(?i)\b(?:codice\s+)?pdr\b[\s:]{0,5}([0-9]{8,14})\b"
    ).unwrap();

    // Customer and contract numbers
    pub static ref CUSTOMER_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:n(?:umero)?\s?[°º]?\s*cliente|codice\s+cliente|cliente\s+n[°º.]?)[\s:]{0,5}([0-9]{5,12})\b"
    ).unwrap();

    pub static ref CONTRACT_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:n(?:umero)?\s?[°º]?\s*contratto|codice\s+contratto|contratto\s+n[°º.]?)[\s:]{0,5}([A-Za-z0-9/-]{4,20})\b"
    ).unwrap();

    // Client name: holder label, then greeting followed by an
    // uppercase name, then greeting followed by a title-case name
    pub static ref CLIENT_NAME_HOLDER: Regex = Regex::new(
        r"(?i)\b(?:intestatario|intestata\s+a|titolare\s+(?:della\s+)?fornitura)[\s:]{0,5}([A-Za-zÀ-ÿ'. ]{3,60})"
    ).unwrap();

    pub static ref CLIENT_NAME_CAPS: Regex = Regex::new(
        r"(?i:gentile|egregi[oa]|gent\.mo)\s+([A-ZÀ-Ù][A-ZÀ-Ù' ]{2,59})"
    ).unwrap();

    pub static ref CLIENT_NAME_TITLE: Regex = Regex::new(
        r"(?i:gentile|egregi[oa]|gent\.mo)\s+((?:[A-ZÀ-Ù][a-zà-ÿ']{1,19}\s){1,3}[A-ZÀ-Ù][a-zà-ÿ']{1,19})"
    ).unwrap();

    // Supply address
    pub static ref ADDRESS_LABELED: Regex = Regex::new(
        r"(?i)\b(?:indirizzo\s+(?:di\s+)?fornitura|indirizzo)[\s:]{0,5}([A-Za-zÀ-ÿ0-9'.,/ ]{5,100})"
    ).unwrap();

    pub static ref ADDRESS_STREET: Regex = Regex::new(
        r"(?i)\b((?:via|viale|v\.le|piazza|p\.zza|corso|c\.so|largo|vicolo|contrada|strada)\s+[A-Za-zÀ-ÿ0-9'.,/ ]{2,80})"
    ).unwrap();

    // CAP + city + province in one run; fills three fields from one match
    pub static ref ADDRESS_TRIPLE: Regex = Regex::new(
        r"\b([0-9]{5})\s+([A-Za-zÀ-ÿ'][A-Za-zÀ-ÿ' ]{1,39}?)\s+\(?([A-Z]{2})\)?\b"
    ).unwrap();

    // Consumption figures
    pub static ref ELECTRIC_CONSUMPTION_LABELED: Regex = Regex::new(
        r"(?i)consum[oi][a-zà-ÿ':() ]{0,40}?([0-9]{1,3}(?:[.,][0-9]{3})*|[0-9]{1,6})\s*kwh\b"
    ).unwrap();

    pub static ref ELECTRIC_CONSUMPTION_ANY: Regex = Regex::new(
        r"(?i)\b([0-9]{1,3}(?:[.,][0-9]{3})*|[0-9]{1,6})\s*kwh\b"
    ).unwrap();

    pub static ref GAS_CONSUMPTION_LABELED: Regex = Regex::new(
        r"(?i)consum[oi][a-zà-ÿ':() ]{0,40}?([0-9]{1,3}(?:[.,][0-9]{3})*|[0-9]{1,6})\s*(?:smc|sm3)\b"
    ).unwrap();

    pub static ref GAS_CONSUMPTION_ANY: Regex = Regex::new(
        r"(?i)\b([0-9]{1,3}(?:[.,][0-9]{3})*|[0-9]{1,6})\s*smc\b"
    ).unwrap();

    pub static ref POWER_COMMITTED: Regex = Regex::new(
        r"(?i)potenza\s+(?:contrattualmente\s+)?(?:impegnata|disponibile)[\s:]{0,5}([0-9]{1,2}(?:[.,][0-9]{1,2})?)\s*kw\b"
    ).unwrap();

    // Seller
    pub static ref SUPPLIER: Regex = Regex::new(
        r"(?i)\b(?:fornitore|venditore|societ[aà]\s+di\s+vendita)[\s:]{0,5}([A-Za-zÀ-ÿ0-9'&. ]{2,60})"
    ).unwrap();

    pub static ref COMPANY: Regex = Regex::new(
        r"(?i)\b(?:ragione\s+sociale|denominazione)[\s:]{0,5}([A-Za-zÀ-ÿ0-9'&.,/ ]{2,80})"
    ).unwrap();

    // Dates (DD/MM/YYYY or DD-MM-YYYY)
    pub static ref BILL_DATE: Regex = Regex::new(
        r"(?i)\b(?:data\s+(?:di\s+)?emissione|data\s+fattura|bolletta\s+del|fattura\s+del|emessa\s+il)[\s:]{0,5}([0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{4})\b"
    ).unwrap();

    pub static ref FROM_DATE: Regex = Regex::new(
        r"(?i)\bdal[\s:]{1,5}([0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{4})\b"
    ).unwrap();

    pub static ref TO_DATE: Regex = Regex::new(
        r"(?i)\bal[\s:]{1,5}([0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{4})\b"
    ).unwrap();
}

//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// A unit of retrieved filing text with its originating document URL.
///
/// Produced by [`crate::retrieve::FilingStore`] from persisted filing data;
/// immutable and scoped to one retrieval call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Passage {
    /// Passage body (one section page of a 10-K/10-Q filing).
    pub content: String,
    /// Filing URL the passage came from.
    pub source: String,
    /// Company the filing belongs to.
    pub company: String,
    /// Optional short summary of the enclosing section.
    pub section_summary: Option<String>,
}

/// Payload field holding the passage body.
pub const FIELD_CONTENT: &str = "content";
/// Payload field holding the company name (used by the retrieval filter).
pub const FIELD_COMPANY: &str = "company_name";
/// Payload field holding the filing URL.
pub const FIELD_SOURCE: &str = "filing_url";
/// Payload field holding the section summary.
pub const FIELD_SECTION_SUMMARY: &str = "section_summary";

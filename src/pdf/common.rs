//! Common utilities for document generation.

use chrono::{DateTime, Utc};

/// Default pattern for date fields without an explicit format.
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Download filename for a generated document:
/// `<jobId>_<template name with spaces as underscores>.pdf`.
pub fn document_filename(job_id: &str, template_name: &str) -> String {
    let name = template_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{job_id}_{name}.pdf")
}

/// Generation timestamp as shown in the document title block.
pub fn format_generated_at(at: &DateTime<Utc>) -> String {
    at.format("%m/%d/%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_filename() {
        assert_eq!(
            document_filename("TX-MOLD-2026-042", "Insurance Claim Form"),
            "TX-MOLD-2026-042_Insurance_Claim_Form.pdf"
        );
    }

    #[test]
    fn test_format_generated_at() {
        let at = Utc.with_ymd_and_hms(2026, 3, 15, 9, 5, 0).unwrap();
        assert_eq!(format_generated_at(&at), "03/15/2026 09:05");
    }
}

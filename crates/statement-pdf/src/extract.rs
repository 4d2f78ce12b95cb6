//! Plain-text extraction from statement PDFs.

use crate::error::PdfError;
use std::path::Path;

/// Extract all text from the document, concatenated across pages.
pub fn document_text(path: &Path) -> Result<String, PdfError> {
    pdf_extract::extract_text(path).map_err(classify_extract_error)
}

/// In-memory variant of [`document_text`].
pub fn document_text_from_mem(bytes: &[u8]) -> Result<String, PdfError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(classify_extract_error)
}

/// Extracted text with every whitespace run collapsed to a single space.
///
/// The ledger patterns are anchored on single-space-separated tokens, so all
/// downstream parsing runs on this form.
pub fn normalized_document_text(path: &Path) -> Result<String, PdfError> {
    Ok(normalize_whitespace(&document_text(path)?))
}

/// Collapse every whitespace sequence (including line breaks) to one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn classify_extract_error(e: pdf_extract::OutputError) -> PdfError {
    let msg = e.to_string();
    let lower = msg.to_lowercase();

    if lower.contains("encrypted") || lower.contains("password") {
        return PdfError::PasswordProtected;
    }
    if lower.contains("invalid") || lower.contains("malformed") || lower.contains("corrupt") {
        return PdfError::ParseError(msg);
    }
    PdfError::ExtractionError(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_mixed_whitespace_to_single_spaces() {
        let text = "STATEMENT   BALANCE\n\n  100.00\t\tSAVINGS\r\nACCOUNT";
        assert_eq!(
            normalize_whitespace(text),
            "STATEMENT BALANCE 100.00 SAVINGS ACCOUNT"
        );
    }

    #[test]
    fn normalization_of_empty_text_is_empty() {
        assert_eq!(normalize_whitespace("   \n\t "), "");
    }

    #[test]
    fn garbage_bytes_are_a_hard_error() {
        let result = document_text_from_mem(b"not a pdf at all");
        assert!(result.is_err());
    }
}

use thiserror::Error;

/// Hard failures from the PDF layer. A document that parses but simply lacks
/// the content a checker is looking for is never an error here.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("PDF text extraction failed: {0}")]
    ExtractionError(String),

    #[error("Page {0} is out of range")]
    PageOutOfRange(usize),

    #[error("Page rasterization failed: {0}")]
    RenderError(String),

    #[error("Image encoding failed: {0}")]
    ImageEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

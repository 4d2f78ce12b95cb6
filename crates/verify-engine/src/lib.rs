//! Document-evidence extraction and cross-validation checks.
//!
//! Five independent checkers over one statement document, plus the
//! aggregation that turns their verdicts into a reviewer checklist. No
//! checker feeds into another; each opens its own document handle and
//! releases it before returning.

pub mod annotations;
pub mod ledger;
pub mod logo;
pub mod media_log;
pub mod patterns;
pub mod qr;
pub mod recency;
pub mod report;

pub use annotations::{AnnotationScanConfig, AnnotationScanner};
pub use ledger::{LedgerCheckConfig, LedgerChecker};
pub use logo::{LogoCheckConfig, LogoChecker};
pub use media_log::MediaLog;
pub use qr::{QrCheckConfig, QrDomainChecker};
pub use report::{ChecklistEntry, ChecklistReport, ChecklistSummary, ReviewStatus};

use thiserror::Error;

/// Hard failures: the check could not run at all. Soft negatives (no logo
/// match, no QR, missing statement fields) are ordinary verdict values and
/// never appear here.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("PDF error: {0}")]
    Pdf(#[from] statement_pdf::PdfError),

    #[error("Reference image unreadable: {0}")]
    ReferenceImage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

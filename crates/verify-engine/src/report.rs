//! Checklist assembly over the individual check results.
//!
//! Each checker returns either a verdict or a hard error; this module folds
//! them into a flat list of labelled outcomes plus a roll-up status the
//! reviewer can act on without reading logs.

use crate::CheckError;
use serde::{Deserialize, Serialize};
use shared_types::{AnnotationCounts, CheckOutcome, LedgerVerdict};

/// One labelled line of the reviewer checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub label: String,
    pub outcome: CheckOutcome,
}

impl ChecklistEntry {
    fn new(label: &str, outcome: CheckOutcome) -> Self {
        Self {
            label: label.to_string(),
            outcome,
        }
    }
}

/// Overall disposition of the review.
///
/// A definite failure outranks an error: `Flagged` means at least one check
/// found a problem, `Indeterminate` means nothing failed but at least one
/// check could not run, `Clear` means everything ran and passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Clear,
    Flagged,
    Indeterminate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub status: ReviewStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistReport {
    pub document: String,
    pub entries: Vec<ChecklistEntry>,
    pub summary: ChecklistSummary,
}

impl ChecklistReport {
    /// Fold the five check results into the checklist for `document`.
    pub fn assemble(
        document: &str,
        logo: Result<bool, CheckError>,
        qr: Result<bool, CheckError>,
        annotations: Result<AnnotationCounts, CheckError>,
        ledger: Result<LedgerVerdict, CheckError>,
    ) -> Self {
        let mut entries = Vec::new();

        entries.push(ChecklistEntry::new(
            "Bank logo matches reference",
            fold_bool(logo, "no embedded image matched the reference logo"),
        ));
        entries.push(ChecklistEntry::new(
            "QR code resolves to a listed bank domain",
            fold_bool(qr, "no QR payload resolved to a listed bank domain"),
        ));

        match annotations {
            Ok(counts) => {
                entries.push(ChecklistEntry::new(
                    "No inserted text boxes",
                    count_outcome(counts.text_boxes, "text box annotation"),
                ));
                entries.push(ChecklistEntry::new(
                    "No inserted shapes",
                    count_outcome(counts.shapes, "shape annotation"),
                ));
                entries.push(ChecklistEntry::new(
                    "No unclassified annotations",
                    count_outcome(counts.unclassified, "unclassified annotation"),
                ));
            }
            Err(e) => {
                let reason = e.to_string();
                for label in [
                    "No inserted text boxes",
                    "No inserted shapes",
                    "No unclassified annotations",
                ] {
                    entries.push(ChecklistEntry::new(
                        label,
                        CheckOutcome::Error {
                            reason: reason.clone(),
                        },
                    ));
                }
            }
        }

        match ledger {
            Ok(verdict) => {
                entries.push(ChecklistEntry::new(
                    "Document is a bank statement",
                    CheckOutcome::from_bool(
                        verdict.is_bank_statement,
                        "statement markers not found in document text",
                    ),
                ));
                entries.push(ChecklistEntry::new(
                    "Statement is recent",
                    CheckOutcome::from_bool(
                        verdict.is_within_last_6_months,
                        "statement date missing or outside the trailing window",
                    ),
                ));
                entries.push(ChecklistEntry::new(
                    "Ledger balances tally",
                    CheckOutcome::from_bool(
                        verdict.balance_tallies,
                        "starting balance plus transactions does not close to the ending balance",
                    ),
                ));
                entries.push(ChecklistEntry::new(
                    "Account holder name present",
                    CheckOutcome::from_bool(
                        verdict.name_present,
                        "claimed name not found in document text",
                    ),
                ));
                entries.push(ChecklistEntry::new(
                    "Account holder address present",
                    CheckOutcome::from_bool(
                        verdict.address_present,
                        "claimed address not found in document text",
                    ),
                ));
            }
            Err(e) => {
                let reason = e.to_string();
                for label in [
                    "Document is a bank statement",
                    "Statement is recent",
                    "Ledger balances tally",
                    "Account holder name present",
                    "Account holder address present",
                ] {
                    entries.push(ChecklistEntry::new(
                        label,
                        CheckOutcome::Error {
                            reason: reason.clone(),
                        },
                    ));
                }
            }
        }

        let summary = summarize(&entries);
        Self {
            document: document.to_string(),
            entries,
            summary,
        }
    }

    /// Human-readable checklist for the reviewer console.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);

        out.push_str(&rule);
        out.push('\n');
        out.push_str("STATEMENT REVIEW CHECKLIST\n");
        out.push_str(&format!("Document: {}\n", self.document));
        out.push_str(&rule);
        out.push('\n');

        for entry in &self.entries {
            match &entry.outcome {
                CheckOutcome::Pass => {
                    out.push_str(&format!("  ✓ PASS  {}\n", entry.label));
                }
                CheckOutcome::Fail { reason } => {
                    out.push_str(&format!("  ✗ FAIL  {} ({})\n", entry.label, reason));
                }
                CheckOutcome::Error { reason } => {
                    out.push_str(&format!("  ⚠ ERROR {} ({})\n", entry.label, reason));
                }
            }
        }

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "{} checks: {} passed, {} failed, {} errored\n",
            self.summary.total, self.summary.passed, self.summary.failed, self.summary.errored
        ));
        out.push_str(&format!("Status: {}\n", status_label(self.summary.status)));
        out
    }
}

fn fold_bool(result: Result<bool, CheckError>, fail_reason: &str) -> CheckOutcome {
    match result {
        Ok(passed) => CheckOutcome::from_bool(passed, fail_reason),
        Err(e) => CheckOutcome::Error {
            reason: e.to_string(),
        },
    }
}

fn count_outcome(count: u32, noun: &str) -> CheckOutcome {
    if count == 0 {
        CheckOutcome::Pass
    } else {
        CheckOutcome::Fail {
            reason: format!("{count} {noun}(s) found"),
        }
    }
}

fn summarize(entries: &[ChecklistEntry]) -> ChecklistSummary {
    let passed = entries.iter().filter(|e| e.outcome.is_pass()).count();
    let errored = entries.iter().filter(|e| e.outcome.is_error()).count();
    let failed = entries.len() - passed - errored;

    let status = if failed > 0 {
        ReviewStatus::Flagged
    } else if errored > 0 {
        ReviewStatus::Indeterminate
    } else {
        ReviewStatus::Clear
    };

    ChecklistSummary {
        total: entries.len(),
        passed,
        failed,
        errored,
        status,
    }
}

fn status_label(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Clear => "CLEAR",
        ReviewStatus::Flagged => "FLAGGED",
        ReviewStatus::Indeterminate => "INDETERMINATE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn passing_verdict() -> LedgerVerdict {
        LedgerVerdict {
            is_bank_statement: true,
            statement_date: Some("31/10/24".to_string()),
            is_within_last_6_months: true,
            balance_tallies: true,
            name_present: true,
            address_present: true,
        }
    }

    #[test]
    fn all_passing_checks_roll_up_to_clear() {
        let report = ChecklistReport::assemble(
            "statement.pdf",
            Ok(true),
            Ok(true),
            Ok(AnnotationCounts::default()),
            Ok(passing_verdict()),
        );

        assert_eq!(report.summary.total, 10);
        assert_eq!(report.summary.passed, 10);
        assert_eq!(report.summary.status, ReviewStatus::Clear);
    }

    #[test]
    fn a_single_failure_flags_the_review() {
        let report = ChecklistReport::assemble(
            "statement.pdf",
            Ok(false),
            Ok(true),
            Ok(AnnotationCounts::default()),
            Ok(passing_verdict()),
        );

        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.status, ReviewStatus::Flagged);
    }

    #[test]
    fn errors_without_failures_are_indeterminate() {
        let report = ChecklistReport::assemble(
            "statement.pdf",
            Err(CheckError::ReferenceImage("logo.png".to_string())),
            Ok(true),
            Ok(AnnotationCounts::default()),
            Ok(passing_verdict()),
        );

        assert_eq!(report.summary.errored, 1);
        assert_eq!(report.summary.failed, 0);
        assert_eq!(report.summary.status, ReviewStatus::Indeterminate);
    }

    #[test]
    fn a_failure_outranks_an_error() {
        let report = ChecklistReport::assemble(
            "statement.pdf",
            Err(CheckError::ReferenceImage("logo.png".to_string())),
            Ok(false),
            Ok(AnnotationCounts::default()),
            Ok(passing_verdict()),
        );
        assert_eq!(report.summary.status, ReviewStatus::Flagged);
    }

    #[test]
    fn annotation_counts_fan_out_into_three_entries() {
        let report = ChecklistReport::assemble(
            "statement.pdf",
            Ok(true),
            Ok(true),
            Ok(AnnotationCounts {
                text_boxes: 2,
                shapes: 0,
                unclassified: 1,
            }),
            Ok(passing_verdict()),
        );

        let text_boxes = report
            .entries
            .iter()
            .find(|e| e.label == "No inserted text boxes")
            .unwrap();
        assert_eq!(
            text_boxes.outcome,
            CheckOutcome::Fail {
                reason: "2 text box annotation(s) found".to_string()
            }
        );
        assert_eq!(report.summary.failed, 2);
    }

    #[test]
    fn ledger_error_marks_all_five_ledger_entries() {
        let report = ChecklistReport::assemble(
            "statement.pdf",
            Ok(true),
            Ok(true),
            Ok(AnnotationCounts::default()),
            Err(CheckError::Pdf(statement_pdf::PdfError::PasswordProtected)),
        );
        assert_eq!(report.summary.errored, 5);
        assert_eq!(report.summary.status, ReviewStatus::Indeterminate);
    }

    #[test]
    fn text_rendering_carries_marks_and_summary() {
        let report = ChecklistReport::assemble(
            "statement.pdf",
            Ok(true),
            Ok(false),
            Ok(AnnotationCounts::default()),
            Ok(passing_verdict()),
        );
        let text = report.to_text();

        assert!(text.contains("STATEMENT REVIEW CHECKLIST"));
        assert!(text.contains("Document: statement.pdf"));
        assert!(text.contains("✓ PASS  Bank logo matches reference"));
        assert!(text.contains("✗ FAIL  QR code resolves to a listed bank domain"));
        assert!(text.contains("10 checks: 9 passed, 1 failed, 0 errored"));
        assert!(text.contains("Status: FLAGGED"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = ChecklistReport::assemble(
            "statement.pdf",
            Ok(true),
            Ok(true),
            Ok(AnnotationCounts::default()),
            Ok(passing_verdict()),
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"status\":\"clear\""));
        assert!(json.contains("\"outcome\":\"pass\""));
    }
}

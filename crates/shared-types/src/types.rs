/// Result of one verification signal as the reviewer sees it.
///
/// `Fail` means the check ran and found a problem; `Error` means the check
/// could not run at all. The dashboard renders these differently, so the two
/// must never collapse into one another.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CheckOutcome {
    Pass,
    Fail { reason: String },
    Error { reason: String },
}

impl CheckOutcome {
    pub fn from_bool(passed: bool, fail_reason: &str) -> Self {
        if passed {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Fail {
                reason: fail_reason.to_string(),
            }
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CheckOutcome::Pass)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CheckOutcome::Error { .. })
    }
}

/// Annotation tallies from the tamper scan.
///
/// Every annotation on the document lands in exactly one bucket. Type codes
/// outside the text-box/shape ranges are not dropped silently; they are
/// counted as `unclassified`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnnotationCounts {
    pub text_boxes: u32,
    pub shapes: u32,
    pub unclassified: u32,
}

impl AnnotationCounts {
    /// A legitimate bank-issued statement carries no drawable markup at all.
    pub fn is_clean(&self) -> bool {
        self.text_boxes == 0 && self.shapes == 0 && self.unclassified == 0
    }
}

/// Structured verdict of the ledger consistency checker.
///
/// Each field degrades independently: when the document is not recognized as
/// a bank statement, or when a required field is absent from the text, the
/// dependent flags stay `false` rather than erroring.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LedgerVerdict {
    pub is_bank_statement: bool,
    pub statement_date: Option<String>,
    pub is_within_last_6_months: bool,
    pub balance_tallies: bool,
    pub name_present: bool,
    pub address_present: bool,
}

impl Default for LedgerVerdict {
    fn default() -> Self {
        Self {
            is_bank_statement: false,
            statement_date: None,
            is_within_last_6_months: false,
            balance_tallies: false,
            name_present: false,
            address_present: false,
        }
    }
}

/// How a scalar was pulled out of the statement text.
///
/// `Anchored` extractions matched a labelled field ("ENDING BALANCE: …").
/// `Heuristic` extractions rest on a layout assumption (the starting balance
/// is whatever float precedes the first dated ledger row) and can silently
/// mis-extract on other layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Anchored,
    Heuristic,
}

/// A monetary value together with the confidence of its extraction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtractedAmount {
    pub value: f64,
    pub confidence: Confidence,
}

impl ExtractedAmount {
    pub fn anchored(value: f64) -> Self {
        Self {
            value,
            confidence: Confidence::Anchored,
        }
    }

    pub fn heuristic(value: f64) -> Self {
        Self {
            value,
            confidence: Confidence::Heuristic,
        }
    }
}

//! Types shared across the statement verification pipeline.
//!
//! Verdicts are pure outputs: every checker produces one of these values and
//! never mutates it afterwards. The reviewing side only ever reads them.

pub mod types;

pub use types::{
    AnnotationCounts, CheckOutcome, Confidence, ExtractedAmount, LedgerVerdict,
};

//! Ledger arithmetic consistency and statement identity checks.
//!
//! One pass over the normalized statement text produces the whole
//! [`LedgerVerdict`]: statement markers, statement date and its recency, the
//! balance closure over signed transaction amounts, and the presence of the
//! claimed account-holder name and address.

use crate::{patterns, recency, CheckError};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{ExtractedAmount, LedgerVerdict};
use std::path::Path;
use tracing::{debug, info};

lazy_static! {
    /// A ledger row amount carrying its sign suffix, e.g. `250.00+`.
    static ref TRANSACTION: Regex = Regex::new(r"(\d+\.\d+)([+-])").unwrap();
}

#[derive(Debug, Clone)]
pub struct LedgerCheckConfig {
    /// Marker that identifies the running-balance column header.
    pub balance_marker: String,
    /// Marker that identifies the account type line.
    pub account_marker: String,
    /// Label preceding the statement date.
    pub date_anchor: String,
    /// Label preceding the closing balance.
    pub ending_anchor: String,
    /// Absolute tolerance for the balance closure, in currency units.
    pub tolerance: f64,
    /// Width of the acceptable recency window.
    pub recency_months: u32,
}

impl Default for LedgerCheckConfig {
    fn default() -> Self {
        Self {
            balance_marker: "STATEMENT BALANCE".to_string(),
            account_marker: "SAVINGS ACCOUNT".to_string(),
            date_anchor: "STATEMENT DATE".to_string(),
            ending_anchor: "ENDING BALANCE".to_string(),
            tolerance: 0.01,
            recency_months: 6,
        }
    }
}

pub struct LedgerChecker {
    config: LedgerCheckConfig,
}

impl LedgerChecker {
    pub fn new(config: LedgerCheckConfig) -> Self {
        Self { config }
    }

    /// Run every text-derived check against the document at `path`.
    ///
    /// `today` anchors the recency window so callers control the clock.
    pub fn check(
        &self,
        path: &Path,
        claimed_name: &str,
        claimed_address: &str,
        today: NaiveDate,
    ) -> Result<LedgerVerdict, CheckError> {
        let text = statement_pdf::normalized_document_text(path)?;
        let verdict = self.verdict_from_text(&text, claimed_name, claimed_address, today);
        info!(
            is_bank_statement = verdict.is_bank_statement,
            balance_tallies = verdict.balance_tallies,
            "ledger check complete"
        );
        Ok(verdict)
    }

    /// Pure verdict over already-extracted, whitespace-normalized text.
    pub fn verdict_from_text(
        &self,
        text: &str,
        claimed_name: &str,
        claimed_address: &str,
        today: NaiveDate,
    ) -> LedgerVerdict {
        let mut verdict = LedgerVerdict::default();

        verdict.is_bank_statement = patterns::contains_marker(text, &self.config.balance_marker)
            && patterns::contains_marker(text, &self.config.account_marker);
        if !verdict.is_bank_statement {
            debug!("statement markers absent, dependent checks stay negative");
            return verdict;
        }

        verdict.statement_date =
            patterns::labeled_value(text, &self.config.date_anchor, patterns::DATE_TOKEN);
        verdict.is_within_last_6_months = verdict
            .statement_date
            .as_deref()
            .and_then(recency::parse_statement_date)
            .map(|date| recency::within_trailing_months(date, today, self.config.recency_months))
            .unwrap_or(false);

        verdict.balance_tallies = self.balance_closure(text);
        verdict.name_present = recency::is_present(text, claimed_name);
        verdict.address_present = recency::is_present(text, claimed_address);
        verdict
    }

    /// Whether `start + credits - debits` closes to the ending balance within
    /// the configured tolerance. Missing either balance yields `false`.
    fn balance_closure(&self, text: &str) -> bool {
        let Some(start) = self.starting_balance(text) else {
            debug!("starting balance not found");
            return false;
        };
        let Some(end) = self.ending_balance(text) else {
            debug!("ending balance not found");
            return false;
        };

        let (credits, debits) = transaction_totals(text);
        let closure = start.value + credits - debits - end.value;
        debug!(
            start = start.value,
            credits, debits,
            end = end.value,
            closure,
            "balance closure"
        );
        closure.abs() < self.config.tolerance
    }

    /// First amount preceding a dated ledger row. Layout-dependent, so the
    /// result is flagged heuristic.
    fn starting_balance(&self, text: &str) -> Option<ExtractedAmount> {
        patterns::value_before(text, patterns::PLAIN_AMOUNT, patterns::SHORT_DATE_TOKEN)
            .and_then(|token| patterns::parse_amount(&token))
            .map(ExtractedAmount::heuristic)
    }

    fn ending_balance(&self, text: &str) -> Option<ExtractedAmount> {
        patterns::labeled_value(text, &self.config.ending_anchor, patterns::GROUPED_AMOUNT)
            .and_then(|token| patterns::parse_amount(&token))
            .map(ExtractedAmount::anchored)
    }
}

/// Sum of credit (`+`) and debit (`-`) row amounts across the text.
///
/// Plain f64 accumulation; this reports whether the printed ledger is
/// self-consistent, it is not a currency-safe accounting engine.
fn transaction_totals(text: &str) -> (f64, f64) {
    let mut credits = 0.0;
    let mut debits = 0.0;
    for cap in TRANSACTION.captures_iter(text) {
        let Some(amount) = patterns::parse_amount(&cap[1]) else {
            continue;
        };
        match &cap[2] {
            "+" => credits += amount,
            _ => debits += amount,
        }
    }
    (credits, debits)
}

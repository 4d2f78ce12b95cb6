//! Adverse-media findings log.
//!
//! Search results that name the account holder are screened against a crime
//! keyword list; hits are appended to a plain-text findings file the reviewer
//! reads alongside the checklist.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Offence keywords screened against result titles.
pub fn default_crime_keywords() -> Vec<String> {
    [
        "Murder",
        "Assault",
        "Theft",
        "Robbery",
        "Fraud",
        "Forgery",
        "Kidnapping",
        "Arson",
        "Smuggling",
        "Cybercrime",
        "Bribery",
        "Extortion",
        "Embezzlement",
        "Human Trafficking",
        "Drug Trafficking",
        "Vandalism",
        "Domestic Violence",
        "Money Laundering",
        "Homicide",
        "Burglary",
        "Blackmail",
        "Assassination",
        "Sexual Assault",
        "Shoplifting",
        "Identity Theft",
        "Impersonation",
        "Corruption",
        "Stalking",
        "Illegal Possession of Weapons",
        "Hit-and-Run",
        "Attempted Murder",
        "Political Scandal",
        "Sexual Harassment",
        "Corporate Scandal",
        "Financial Scandal",
        "Fraudulent Claims",
        "False Accusations",
        "Abuse of Power",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Whether a result title mentions any offence keyword, case-insensitively.
pub fn title_matches_crime_keyword(title: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    keywords
        .iter()
        .any(|keyword| title.contains(&keyword.to_lowercase()))
}

/// Append-only findings file.
pub struct MediaLog {
    path: PathBuf,
}

impl MediaLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one finding as a three-line record.
    pub fn append(&self, title: &str, url: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "Title: {title}")?;
        writeln!(file, "URL: {url}")?;
        writeln!(file, "{}", "-".repeat(80))?;
        info!(title, url, "adverse media finding logged");
        Ok(())
    }

    /// Whether the log holds any finding. A missing file means none.
    pub fn has_findings(&self) -> bool {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => !contents.trim().is_empty(),
            Err(_) => false,
        }
    }
}

//! Statement review console.
//!
//! Runs every document check against one statement PDF and prints the
//! reviewer checklist, as text or JSON. Exit status mirrors the roll-up:
//! 0 clear, 1 flagged, 2 indeterminate.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use verify_engine::{
    AnnotationScanConfig, AnnotationScanner, ChecklistReport, LedgerCheckConfig, LedgerChecker,
    LogoCheckConfig, LogoChecker, QrCheckConfig, QrDomainChecker, ReviewStatus,
};

#[derive(Parser, Debug)]
#[command(name = "statement-review", about = "Verify a bank statement PDF")]
struct Cli {
    /// Statement PDF to review
    statement: PathBuf,

    /// Reference bank logo image
    #[arg(long)]
    logo: PathBuf,

    /// Account holder name as claimed on the application
    #[arg(long)]
    name: String,

    /// Account holder address as claimed on the application
    #[arg(long)]
    address: String,

    /// Zero-based page to scan for the QR code
    #[arg(long, default_value_t = 0)]
    qr_page: usize,

    /// Where to write the annotation-marked copy
    #[arg(long, default_value = "marked.pdf")]
    marked_out: PathBuf,

    /// Emit the checklist as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("statement_review=info".parse()?)
                .add_directive("verify_engine=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    info!(statement = %cli.statement.display(), "starting review");

    let scratch = tempfile::tempdir().context("creating scratch directory")?;

    let logo = LogoChecker::new(LogoCheckConfig::default()).check(
        &cli.statement,
        &cli.logo,
        scratch.path(),
    );

    let qr = QrDomainChecker::new(QrCheckConfig::default()).check_document(
        &statement_pdf::PdfiumRasterizer,
        &cli.statement,
        cli.qr_page,
    );

    let annotations = AnnotationScanner::new(AnnotationScanConfig::default())
        .scan(&cli.statement, &cli.marked_out);

    let ledger = LedgerChecker::new(LedgerCheckConfig::default()).check(
        &cli.statement,
        &cli.name,
        &cli.address,
        chrono::Local::now().date_naive(),
    );

    let document = cli.statement.display().to_string();
    let report = ChecklistReport::assemble(&document, logo, qr, annotations, ledger);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }

    Ok(match report.summary.status {
        ReviewStatus::Clear => ExitCode::SUCCESS,
        ReviewStatus::Flagged => ExitCode::from(1),
        ReviewStatus::Indeterminate => ExitCode::from(2),
    })
}

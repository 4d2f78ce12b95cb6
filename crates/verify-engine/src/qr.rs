//! QR payload decoding and bank-domain validation.
//!
//! The first page is rasterized, the first decodable QR grid is taken, and
//! its payload must be a syntactically valid URL whose host is on the
//! configured bank allow-list. A page with no QR, an undecodable payload, or
//! an off-list host is a soft `false`; only an unrenderable document is an
//! error.

use crate::CheckError;
use lazy_static::lazy_static;
use regex::Regex;
use statement_pdf::{GrayPage, PageRasterizer};
use std::path::Path;
use tracing::{debug, info};

lazy_static! {
    /// URL grammar: scheme, host (domain, localhost, IPv4 or bracketed IPv6),
    /// optional port, optional path.
    static ref URL_PATTERN: Regex = Regex::new(
        r"(?i)^(?:http|ftp)s?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}|\[?[A-F0-9]*:[A-F0-9:]+\]?)(?::\d+)?(?:/?|[/?]\S+)$"
    )
    .unwrap();
}

/// Hosts recognized as Malaysian retail banks.
pub fn default_bank_domains() -> Vec<String> {
    [
        "maybank2u.com.my",
        "cimb.com.my",
        "rhbgroup.com",
        "publicbank.com.my",
        "bankislam.com.my",
        "ambankgroup.com.my",
        "hongleong.com.my",
        "uob.com.my",
        "bsn.com.my",
        "bankrakyat.com.my",
        "bankmuhammadiah.com.my",
        "kfh.com.my",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone)]
pub struct QrCheckConfig {
    /// Hosts a statement QR may legitimately point at. Matched exactly,
    /// ignoring any port.
    pub allowed_domains: Vec<String>,
    /// Raster scale factor; QR modules need a few pixels each to decode.
    pub zoom: f32,
}

impl Default for QrCheckConfig {
    fn default() -> Self {
        Self {
            allowed_domains: default_bank_domains(),
            zoom: 2.0,
        }
    }
}

pub struct QrDomainChecker {
    config: QrCheckConfig,
}

impl QrDomainChecker {
    pub fn new(config: QrCheckConfig) -> Self {
        Self { config }
    }

    /// Rasterize one page of the document and validate its QR payload.
    pub fn check_document(
        &self,
        rasterizer: &dyn PageRasterizer,
        path: &Path,
        page_index: usize,
    ) -> Result<bool, CheckError> {
        let page = rasterizer.rasterize(path, page_index, self.config.zoom)?;
        Ok(self.check_page(&page))
    }

    /// Validate the first decodable QR grid on an already-rasterized page.
    pub fn check_page(&self, page: &GrayPage) -> bool {
        let Some(payload) = decode_qr(page) else {
            debug!("no decodable QR grid on page");
            return false;
        };
        let allowed = self.payload_is_allowed(&payload);
        info!(payload, allowed, "decoded QR payload");
        allowed
    }

    /// Whether `payload` is a well-formed URL pointing at an allowed host.
    pub fn payload_is_allowed(&self, payload: &str) -> bool {
        if !URL_PATTERN.is_match(payload) {
            return false;
        }
        let Some(host) = host_of(payload) else {
            return false;
        };
        self.config
            .allowed_domains
            .iter()
            .any(|domain| domain.eq_ignore_ascii_case(&host))
    }
}

/// Decode the first QR grid found on the page, if any.
fn decode_qr(page: &GrayPage) -> Option<String> {
    let width = page.width as usize;
    let height = page.height as usize;
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
        page.luma(x as u32, y as u32)
    });
    let grids = prepared.detect_grids();
    grids
        .first()
        .and_then(|grid| grid.decode().ok())
        .map(|(_, payload)| payload)
}

/// Host portion of a URL: authority without userinfo handling, port
/// stripped, IPv6 brackets removed.
fn host_of(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .filter(|a| !a.is_empty())?;

    if let Some(stripped) = authority.strip_prefix('[') {
        let host = stripped.split(']').next()?;
        return Some(host.to_string());
    }
    let host = match authority.rsplit_once(':') {
        Some((head, tail)) if tail.chars().all(|c| c.is_ascii_digit()) => head,
        _ => authority,
    };
    Some(host.to_string())
}

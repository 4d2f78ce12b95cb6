//! PDF plumbing for the statement verification pipeline.
//!
//! Text extraction, embedded-image extraction, annotation markup, and page
//! rasterization. The checkers in `verify-engine` build on these primitives;
//! this crate knows nothing about verdicts.

pub mod error;
pub mod extract;
pub mod images;
pub mod markup;
pub mod raster;

pub use error::PdfError;
pub use extract::normalized_document_text;
pub use images::extract_embedded_images;
pub use markup::{Annotation, DocumentMarkup};
#[cfg(feature = "render")]
pub use raster::PdfiumRasterizer;
pub use raster::{GrayPage, PageRasterizer};

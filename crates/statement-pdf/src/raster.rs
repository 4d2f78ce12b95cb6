//! Page rasterization.
//!
//! The QR check needs a dense bitmap of one page. Rasterization sits behind a
//! trait so the engine can run against any backend; the default backend binds
//! the system pdfium library at runtime.

use crate::error::PdfError;
use std::path::Path;

/// An 8-bit grayscale raster of one page, row-major.
#[derive(Debug, Clone)]
pub struct GrayPage {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl GrayPage {
    /// Build from a luma buffer; `None` if the buffer does not match the
    /// dimensions.
    pub fn from_luma(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if (width as usize).checked_mul(height as usize) != Some(pixels.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn luma(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

pub trait PageRasterizer {
    /// Rasterize the zero-based `page_index` of the document at `zoom` times
    /// its natural size in each axis.
    fn rasterize(&self, path: &Path, page_index: usize, zoom: f32) -> Result<GrayPage, PdfError>;
}

#[cfg(feature = "render")]
pub use pdfium::PdfiumRasterizer;

#[cfg(feature = "render")]
mod pdfium {
    use super::{GrayPage, PageRasterizer};
    use crate::error::PdfError;
    use pdfium_render::prelude::*;
    use std::path::Path;
    use tracing::debug;

    /// Rasterizer backed by the pdfium library resolved from the system.
    pub struct PdfiumRasterizer;

    impl PageRasterizer for PdfiumRasterizer {
        fn rasterize(
            &self,
            path: &Path,
            page_index: usize,
            zoom: f32,
        ) -> Result<GrayPage, PdfError> {
            let bindings = Pdfium::bind_to_system_library()
                .map_err(|e| PdfError::RenderError(e.to_string()))?;
            let pdfium = Pdfium::new(bindings);

            let document = pdfium
                .load_pdf_from_file(path, None)
                .map_err(|e| PdfError::ParseError(e.to_string()))?;
            let pages = document.pages();
            if page_index >= pages.len() as usize {
                return Err(PdfError::PageOutOfRange(page_index));
            }
            let page = pages
                .get(page_index as u16)
                .map_err(|e| PdfError::RenderError(e.to_string()))?;

            let config = PdfRenderConfig::new().scale_page_by_factor(zoom);
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| PdfError::RenderError(e.to_string()))?;

            let width = bitmap.width() as u32;
            let height = bitmap.height() as u32;
            debug!(width, height, zoom, "rasterized page");

            let rgba = bitmap.as_rgba_bytes();
            let mut pixels = Vec::with_capacity((width * height) as usize);
            for px in rgba.chunks_exact(4) {
                let luma =
                    0.299 * f32::from(px[0]) + 0.587 * f32::from(px[1]) + 0.114 * f32::from(px[2]);
                pixels.push(luma as u8);
            }

            GrayPage::from_luma(width, height, pixels)
                .ok_or_else(|| PdfError::RenderError("bitmap size mismatch".to_string()))
        }
    }
}

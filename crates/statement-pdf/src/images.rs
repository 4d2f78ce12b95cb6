//! Embedded raster image extraction.
//!
//! Pulls every image XObject out of a PDF in document order and writes each
//! one to a scratch directory as a sequentially numbered PNG. The scratch
//! directory is cleared and recreated on every run so stale candidates from a
//! previous document never leak into a comparison.

use crate::error::PdfError;
use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extract all embedded raster images from `pdf_path` into `scratch_dir`.
///
/// Returns the written paths, named `image1.png`, `image2.png`, … in document
/// order. Images with encodings this pipeline cannot decode are skipped, not
/// errored; an unreadable PDF is a hard error. The extracted files persist
/// until the next run clears the directory.
pub fn extract_embedded_images(
    pdf_path: &Path,
    scratch_dir: &Path,
) -> Result<Vec<PathBuf>, PdfError> {
    let doc = Document::load(pdf_path).map_err(|e| PdfError::ParseError(e.to_string()))?;

    if scratch_dir.exists() {
        fs::remove_dir_all(scratch_dir)?;
    }
    fs::create_dir_all(scratch_dir)?;

    let mut written = Vec::new();

    for (_page_no, page_id) in doc.get_pages() {
        let Ok(page) = doc.get_object(page_id).and_then(Object::as_dict) else {
            continue;
        };
        let Some(xobjects) = page_xobjects(&doc, page) else {
            continue;
        };

        for (_name, candidate) in xobjects.iter() {
            let Object::Stream(stream) = resolve(&doc, candidate) else {
                continue;
            };
            if !is_image_stream(stream) {
                continue;
            }
            let Some(img) = decode_image(&doc, stream) else {
                continue;
            };

            let path = scratch_dir.join(format!("image{}.png", written.len() + 1));
            img.save(&path)
                .map_err(|e| PdfError::ImageEncode(e.to_string()))?;
            written.push(path);
        }
    }

    debug!(
        count = written.len(),
        dir = %scratch_dir.display(),
        "extracted embedded images"
    );
    Ok(written)
}

fn page_xobjects<'a>(doc: &'a Document, page: &'a Dictionary) -> Option<&'a Dictionary> {
    let resources = resolve(doc, page.get(b"Resources").ok()?).as_dict().ok()?;
    resolve(doc, resources.get(b"XObject").ok()?).as_dict().ok()
}

fn is_image_stream(stream: &lopdf::Stream) -> bool {
    stream
        .dict
        .get(b"Subtype")
        .and_then(Object::as_name)
        .map(|name| name == b"Image")
        .unwrap_or(false)
}

/// Follow a reference one level if needed.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

/// Decode an image XObject stream into pixels.
///
/// DCT-encoded streams are JPEG payloads as-is. Flate-encoded and unfiltered
/// streams carry raw samples described by the stream dictionary. Anything
/// else (JPX, CCITT, …) is skipped.
fn decode_image(doc: &Document, stream: &lopdf::Stream) -> Option<DynamicImage> {
    match primary_filter(&stream.dict).as_deref() {
        Some("DCTDecode") => {
            image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg).ok()
        }
        Some("FlateDecode") => {
            let data = stream.decompressed_content().ok()?;
            raw_samples_to_image(doc, &stream.dict, data)
        }
        None => raw_samples_to_image(doc, &stream.dict, stream.content.clone()),
        Some(other) => {
            debug!(filter = other, "skipping image with unsupported filter");
            None
        }
    }
}

fn primary_filter(dict: &Dictionary) -> Option<String> {
    let filter = dict.get(b"Filter").ok()?;
    let name = match filter {
        Object::Name(name) => name.as_slice(),
        Object::Array(filters) => filters.first()?.as_name().ok()?,
        _ => return None,
    };
    Some(String::from_utf8_lossy(name).into_owned())
}

fn raw_samples_to_image(doc: &Document, dict: &Dictionary, data: Vec<u8>) -> Option<DynamicImage> {
    let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
    let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        debug!(bits, "skipping image with unsupported bit depth");
        return None;
    }

    let colorspace = resolve(doc, dict.get(b"ColorSpace").ok()?).as_name().ok()?;
    match colorspace {
        b"DeviceRGB" => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
        b"DeviceGray" => GrayImage::from_raw(width, height, data).map(DynamicImage::ImageLuma8),
        other => {
            debug!(
                colorspace = %String::from_utf8_lossy(other),
                "skipping image with unsupported color space"
            );
            None
        }
    }
}

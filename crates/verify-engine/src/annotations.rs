//! Annotation tamper scan.
//!
//! Walks every page, classifies each PDF-native annotation into a text-box,
//! shape, or unclassified bucket, strokes a visible rectangle over the
//! classified ones, and saves the marked copy for the reviewer. Unclassified
//! annotations are counted but left undrawn; their geometry is not trusted.

use crate::CheckError;
use shared_types::AnnotationCounts;
use statement_pdf::DocumentMarkup;
use std::path::Path;
use tracing::{debug, info};

/// Numeric annotation type code; `None` for subtypes outside the table.
fn type_code(subtype: &str) -> Option<u8> {
    match subtype {
        "Text" => Some(0),
        "FreeText" => Some(1),
        "Line" => Some(2),
        "Square" => Some(3),
        "Circle" => Some(4),
        "Polygon" => Some(5),
        "PolyLine" => Some(6),
        "Highlight" => Some(7),
        "Ink" => Some(8),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    TextBox,
    Shape,
    Unclassified,
}

fn bucket(code: Option<u8>) -> Bucket {
    match code {
        Some(1) => Bucket::TextBox,
        Some(2..=8) => Bucket::Shape,
        _ => Bucket::Unclassified,
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationScanConfig {
    /// Stroke color for text-box highlights, RGB in `0.0..=1.0`.
    pub text_box_color: [f32; 3],
    /// Stroke color for shape highlights.
    pub shape_color: [f32; 3],
}

impl Default for AnnotationScanConfig {
    fn default() -> Self {
        Self {
            text_box_color: [1.0, 0.0, 0.0],
            shape_color: [0.0, 0.0, 1.0],
        }
    }
}

pub struct AnnotationScanner {
    config: AnnotationScanConfig,
}

impl AnnotationScanner {
    pub fn new(config: AnnotationScanConfig) -> Self {
        Self { config }
    }

    /// Scan `input`, write the marked copy to `output`, and return the
    /// per-bucket tallies.
    pub fn scan(&self, input: &Path, output: &Path) -> Result<AnnotationCounts, CheckError> {
        let mut markup = DocumentMarkup::load(input)?;
        let mut counts = AnnotationCounts::default();

        for page_id in markup.page_ids() {
            for annotation in markup.annotations(page_id) {
                match bucket(type_code(&annotation.subtype)) {
                    Bucket::TextBox => {
                        counts.text_boxes += 1;
                        markup.stroke_rect(page_id, annotation.rect, self.config.text_box_color, 1.0)?;
                    }
                    Bucket::Shape => {
                        counts.shapes += 1;
                        markup.stroke_rect(page_id, annotation.rect, self.config.shape_color, 2.0)?;
                    }
                    Bucket::Unclassified => {
                        counts.unclassified += 1;
                        debug!(subtype = %annotation.subtype, "unclassified annotation counted");
                    }
                }
            }
        }

        markup.save(output)?;
        info!(
            text_boxes = counts.text_boxes,
            shapes = counts.shapes,
            unclassified = counts.unclassified,
            output = %output.display(),
            "annotation scan complete"
        );
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Dictionary, Document, Object, Stream};
    use pretty_assertions::assert_eq;

    fn pdf_with_annotations(annotations: &[(&str, [i64; 4])]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let content_id = doc.add_object(Object::Stream(Stream::new(
            Dictionary::new(),
            b"BT /F1 12 Tf 50 700 Td (Statement) Tj ET".to_vec(),
        )));

        let annot_refs: Vec<Object> = annotations
            .iter()
            .map(|(subtype, rect)| {
                let id = doc.add_object(dictionary! {
                    "Type" => Object::Name(b"Annot".to_vec()),
                    "Subtype" => Object::Name(subtype.as_bytes().to_vec()),
                    "Rect" => Object::Array(rect.iter().map(|v| Object::Integer(*v)).collect()),
                });
                Object::Reference(id)
            })
            .collect();

        let page_id = doc.add_object(dictionary! {
            "Type" => Object::Name(b"Page".to_vec()),
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "MediaBox" => Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
            "Annots" => Object::Array(annot_refs),
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => Object::Name(b"Pages".to_vec()),
                "Count" => Object::Integer(1),
                "Kids" => Object::Array(vec![Object::Reference(page_id)]),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => Object::Name(b"Catalog".to_vec()),
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn buckets_follow_the_type_code_table() {
        assert_eq!(bucket(type_code("FreeText")), Bucket::TextBox);
        assert_eq!(bucket(type_code("Line")), Bucket::Shape);
        assert_eq!(bucket(type_code("Ink")), Bucket::Shape);
        assert_eq!(bucket(type_code("Text")), Bucket::Unclassified);
        assert_eq!(bucket(type_code("Popup")), Bucket::Unclassified);
    }

    #[test]
    fn counts_every_annotation_in_exactly_one_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        std::fs::write(
            &input,
            pdf_with_annotations(&[
                ("FreeText", [10, 700, 200, 730]),
                ("FreeText", [10, 650, 200, 680]),
                ("Square", [300, 300, 400, 360]),
                ("Circle", [100, 100, 160, 160]),
                ("Line", [50, 50, 250, 50]),
                ("Popup", [0, 0, 10, 10]),
            ]),
        )
        .unwrap();
        let output = dir.path().join("marked.pdf");

        let scanner = AnnotationScanner::new(AnnotationScanConfig::default());
        let counts = scanner.scan(&input, &output).unwrap();

        assert_eq!(
            counts,
            AnnotationCounts {
                text_boxes: 2,
                shapes: 3,
                unclassified: 1,
            }
        );
        assert!(!counts.is_clean());
        assert!(output.exists());
    }

    #[test]
    fn clean_document_keeps_all_buckets_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        std::fs::write(&input, pdf_with_annotations(&[])).unwrap();
        let output = dir.path().join("marked.pdf");

        let scanner = AnnotationScanner::new(AnnotationScanConfig::default());
        let counts = scanner.scan(&input, &output).unwrap();
        assert!(counts.is_clean());
    }

    #[test]
    fn unreadable_document_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("garbage.pdf");
        std::fs::write(&input, b"not a pdf").unwrap();

        let scanner = AnnotationScanner::new(AnnotationScanConfig::default());
        let result = scanner.scan(&input, &dir.path().join("out.pdf"));
        assert!(result.is_err());
    }
}

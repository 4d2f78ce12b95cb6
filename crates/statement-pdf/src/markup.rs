//! Annotation enumeration and visual markup.
//!
//! Wraps an opened document for one scan: list the annotations on each page,
//! stroke rectangles over regions of interest, and save the marked copy. The
//! handle is owned exclusively by the wrapper and released when it is dropped
//! or consumed by [`DocumentMarkup::save`].

use crate::error::PdfError;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

/// One PDF-native annotation: its subtype name and bounding rectangle
/// `[x1, y1, x2, y2]` in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub subtype: String,
    pub rect: [f32; 4],
}

pub struct DocumentMarkup {
    doc: Document,
}

impl DocumentMarkup {
    pub fn load(path: &Path) -> Result<Self, PdfError> {
        let doc = Document::load(path).map_err(|e| PdfError::ParseError(e.to_string()))?;
        Ok(Self { doc })
    }

    /// Page object ids in document order.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.doc.get_pages().values().copied().collect()
    }

    /// Annotations on one page. Malformed entries (missing subtype or rect)
    /// are dropped rather than failing the whole scan.
    pub fn annotations(&self, page_id: ObjectId) -> Vec<Annotation> {
        let Ok(page) = self.doc.get_object(page_id).and_then(Object::as_dict) else {
            return Vec::new();
        };
        let Ok(annots) = page.get(b"Annots") else {
            return Vec::new();
        };
        let Ok(annots) = self.resolve(annots).as_array() else {
            return Vec::new();
        };

        annots
            .iter()
            .filter_map(|entry| self.parse_annotation(self.resolve(entry)))
            .collect()
    }

    fn parse_annotation(&self, obj: &Object) -> Option<Annotation> {
        let dict = obj.as_dict().ok()?;
        let subtype = dict.get(b"Subtype").and_then(Object::as_name).ok()?;
        let rect = self.resolve(dict.get(b"Rect").ok()?).as_array().ok()?;
        if rect.len() != 4 {
            return None;
        }

        let mut coords = [0.0f32; 4];
        for (slot, value) in coords.iter_mut().zip(rect.iter()) {
            *slot = to_f32(self.resolve(value))?;
        }

        Some(Annotation {
            subtype: String::from_utf8_lossy(subtype).into_owned(),
            rect: coords,
        })
    }

    /// Append a stroked rectangle to the page content. `rect` is
    /// `[x1, y1, x2, y2]`, `color` is RGB in `0.0..=1.0`, `width` in points.
    ///
    /// Assumes the existing content streams leave the graphics stack
    /// balanced; the overlay is wrapped in its own `q`/`Q` pair.
    pub fn stroke_rect(
        &mut self,
        page_id: ObjectId,
        rect: [f32; 4],
        color: [f32; 3],
        width: f32,
    ) -> Result<(), PdfError> {
        let x = rect[0].min(rect[2]);
        let y = rect[1].min(rect[3]);
        let w = (rect[2] - rect[0]).abs();
        let h = (rect[3] - rect[1]).abs();

        let ops = format!(
            "q\n{} {} {} RG\n{} w\n{} {} {} {} re\nS\nQ\n",
            color[0], color[1], color[2], width, x, y, w, h
        );
        let overlay_id = self
            .doc
            .add_object(Object::Stream(Stream::new(Dictionary::new(), ops.into_bytes())));

        let page = self
            .doc
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| PdfError::ParseError(e.to_string()))?;

        match page.get(b"Contents").ok().cloned() {
            Some(Object::Reference(existing)) => {
                page.set(
                    "Contents",
                    Object::Array(vec![
                        Object::Reference(existing),
                        Object::Reference(overlay_id),
                    ]),
                );
            }
            Some(Object::Array(mut streams)) => {
                streams.push(Object::Reference(overlay_id));
                page.set("Contents", Object::Array(streams));
            }
            _ => {
                page.set("Contents", Object::Reference(overlay_id));
            }
        }
        Ok(())
    }

    /// Persist the marked copy, consuming the handle.
    pub fn save(mut self, path: &Path) -> Result<(), PdfError> {
        self.doc
            .save(path)
            .map_err(|e| PdfError::ParseError(e.to_string()))?;
        Ok(())
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            other => other,
        }
    }
}

fn to_f32(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// One page with the given `(subtype, rect)` annotations.
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

    fn write_temp(dir: &tempfile::TempDir, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join("input.pdf");
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn lists_annotations_with_subtype_and_rect() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            &pdf_with_annotations(&[
                ("FreeText", [10, 10, 100, 50]),
                ("Square", [200, 200, 300, 260]),
            ]),
        );

        let markup = DocumentMarkup::load(&path).unwrap();
        let pages = markup.page_ids();
        assert_eq!(pages.len(), 1);

        let annotations = markup.annotations(pages[0]);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].subtype, "FreeText");
        assert_eq!(annotations[0].rect, [10.0, 10.0, 100.0, 50.0]);
        assert_eq!(annotations[1].subtype, "Square");
    }

    #[test]
    fn page_without_annots_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, &pdf_with_annotations(&[]));

        let markup = DocumentMarkup::load(&path).unwrap();
        let pages = markup.page_ids();
        let annotations = markup.annotations(pages[0]);
        assert!(annotations.is_empty());
    }

    #[test]
    fn stroke_rect_appends_overlay_stream_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, &pdf_with_annotations(&[("Square", [50, 50, 150, 100])]));

        let mut markup = DocumentMarkup::load(&path).unwrap();
        let page_id = markup.page_ids()[0];
        markup
            .stroke_rect(page_id, [50.0, 50.0, 150.0, 100.0], [1.0, 0.0, 0.0], 2.0)
            .unwrap();

        let output = dir.path().join("marked.pdf");
        markup.save(&output).unwrap();

        let reloaded = Document::load(&output).unwrap();
        let page_id = *reloaded.get_pages().values().next().unwrap();
        let page = reloaded.get_object(page_id).unwrap().as_dict().unwrap();
        let contents = page.get(b"Contents").unwrap().as_array().unwrap();
        assert_eq!(contents.len(), 2);

        let overlay_id = contents[1].as_reference().unwrap();
        let overlay = reloaded.get_object(overlay_id).unwrap();
        let Object::Stream(stream) = overlay else {
            panic!("overlay is not a stream");
        };
        let ops = String::from_utf8_lossy(&stream.content);
        assert!(ops.contains("re"));
        assert!(ops.contains("RG"));
    }
}

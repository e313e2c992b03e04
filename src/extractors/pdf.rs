// src/extractors/pdf.rs
use crate::utils::error::ExtractError;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Anything that can hand out plain text per page, in page order.
pub trait PageSource {
    fn page_texts(&self) -> Box<dyn Iterator<Item = String> + '_>;
}

impl<T: AsRef<str>> PageSource for [T] {
    fn page_texts(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.iter().map(|page| page.as_ref().to_string()))
    }
}

impl<T: AsRef<str>> PageSource for Vec<T> {
    fn page_texts(&self) -> Box<dyn Iterator<Item = String> + '_> {
        self.as_slice().page_texts()
    }
}

/// A PDF on disk, loaded once with lopdf.
pub struct PdfDocument {
    path: PathBuf,
    document: Document,
}

impl PdfDocument {
    /// Loads the document. A missing file or anything lopdf cannot parse is
    /// reported as `DocumentUnreadable`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref().to_path_buf();
        let document = Document::load(&path).map_err(|e| ExtractError::DocumentUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        tracing::info!("Opened {} ({} pages)", path.display(), document.get_pages().len());
        Ok(Self { path, document })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }
}

impl PageSource for PdfDocument {
    fn page_texts(&self) -> Box<dyn Iterator<Item = String> + '_> {
        // get_pages() is a BTreeMap keyed by 1-based page number, so this is page order.
        let pages: Vec<u32> = self.document.get_pages().keys().copied().collect();
        Box::new(pages.into_iter().map(move |page_num| {
            self.document.extract_text(&[page_num]).unwrap_or_else(|e| {
                tracing::warn!(
                    "Could not decode text of page {} in {}: {}; scanning it as empty",
                    page_num,
                    self.path.display(),
                    e
                );
                String::new()
            })
        }))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::fs;

    /// Writes a PDF with one line of Helvetica text per page, in order.
    pub(crate) fn write_text_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 10.into()]),
                    Operation::new("Td", vec![40.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_tree = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(page_tree));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfDocument::open(dir.path().join("absent.pdf"));
        assert!(matches!(result, Err(ExtractError::DocumentUnreadable { .. })));
    }

    #[test]
    fn test_non_pdf_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, b"<html>this is an error page, not a PDF</html>").unwrap();

        let Err(ExtractError::DocumentUnreadable { path: reported, .. }) = PdfDocument::open(&path) else {
            panic!("HTML should not load as a PDF");
        };
        assert_eq!(reported, path);
    }

    #[test]
    fn test_pdf_pages_come_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        write_text_pdf(&path, &["first page text", "second page text", "third"]);

        let document = PdfDocument::open(&path).unwrap();
        assert_eq!(document.page_count(), 3);

        let texts: Vec<String> = document.page_texts().collect();
        let trimmed: Vec<&str> = texts.iter().map(|t| t.trim_end()).collect();
        assert_eq!(trimmed, vec!["first page text", "second page text", "third"]);
        // lopdf ends each page's text with a line break.
        assert!(texts.iter().all(|t| t.ends_with('\n')));
    }

    #[test]
    fn test_slices_and_vecs_are_page_sources() {
        let pages = vec!["one".to_string(), "two".to_string()];
        let collected: Vec<String> = pages.page_texts().collect();
        assert_eq!(collected, vec!["one", "two"]);

        let borrowed = ["a", "b", "c"];
        assert_eq!(borrowed[..].page_texts().count(), 3);
    }
}

//! PDF serialization of a rendered document.
//!
//! Text-only output in the base-14 Helvetica font: one text object per draw
//! operation, fixed object numbering, no metadata that varies between runs.
//! The same `RenderedDocument` always serializes to the same bytes.
//!
//! Text is written as literal strings, so glyphs outside the font's default
//! encoding degrade rather than fail; the renderer's output is plain
//! label/value text where this does not matter.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::render::layout::RenderedDocument;

const MM_TO_PT: f32 = 72.0 / 25.4;

const FONT_NAME: Name<'static> = Name(b"F1");

/// Serializes the rendered pages into a complete PDF file.
pub fn write_pdf(doc: &RenderedDocument) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

    let page_w = doc.layout.width * MM_TO_PT;
    let page_h = doc.layout.height * MM_TO_PT;

    // Object ids are a function of the page index alone.
    let page_ids: Vec<Ref> = (0..doc.pages.len())
        .map(|i| Ref::new(4 + 2 * i as i32))
        .collect();

    for (i, rendered) in doc.pages.iter().enumerate() {
        let page_id = page_ids[i];
        let content_id = Ref::new(5 + 2 * i as i32);

        let mut content = Content::new();
        for op in &rendered.ops {
            // Layout y grows downward from the top edge; PDF user space
            // grows upward from the bottom.
            let x = op.x * MM_TO_PT;
            let y = page_h - op.y * MM_TO_PT;

            content.begin_text();
            content.set_font(FONT_NAME, op.size);
            content.next_line(x, y);
            content.show(Str(op.text.as_bytes()));
            content.end_text();
        }
        pdf.stream(content_id, &content.finish());

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().fonts().pair(FONT_NAME, font_id);
        page.finish();
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(doc.pages.len() as i32);

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout::{PageLayout, RenderedPage, TextOp};

    fn make_doc(pages: usize) -> RenderedDocument {
        RenderedDocument {
            layout: PageLayout::default(),
            pages: (0..pages)
                .map(|i| RenderedPage {
                    ops: vec![TextOp {
                        x: 20.0,
                        y: 20.0,
                        size: 11.0,
                        text: format!("page {i}"),
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn test_output_starts_with_pdf_header() {
        let bytes = write_pdf(&make_doc(1));
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let doc = make_doc(2);
        assert_eq!(write_pdf(&doc), write_pdf(&doc));
    }

    #[test]
    fn test_page_text_appears_in_streams() {
        let bytes = write_pdf(&make_doc(2));
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("page 0"));
        assert!(raw.contains("page 1"));
    }

    #[test]
    fn test_page_count_matches_document() {
        let bytes = write_pdf(&make_doc(3));
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("/Count 3"));
    }
}

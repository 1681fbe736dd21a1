//! PDF renderer tests: reload the generated document with lopdf and verify
//! pages, fonts, metadata, and content.

use bookpress::{Book, Chapter, Template, write_pdf};
use lopdf::{Document, Object};

fn sample_book() -> Book {
    let mut book = Book::new();
    book.title = "Starfall".to_string();
    book.author = "R. Author".to_string();
    book.chapters.push(
        Chapter::new("Chapter 1", 1)
            .with_paragraph("The ship fell out of the sky and nobody aboard was surprised.")
            .with_paragraph("They had been falling for days."),
    );
    book.chapters
        .push(Chapter::new("Chapter 2", 1).with_paragraph("Landing was optional."));
    book
}

fn page_text(doc: &Document, page_index: usize) -> String {
    let pages: Vec<_> = doc.get_pages().into_values().collect();
    let content = doc
        .get_page_content(pages[page_index])
        .expect("page should have content");
    String::from_utf8_lossy(&content).into_owned()
}

#[test]
fn test_pdf_header_and_loadability() {
    let bytes = write_pdf(&sample_book(), Template::Classic).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));
    Document::load_mem(&bytes).expect("generated PDF should reload");
}

#[test]
fn test_one_page_per_chapter_plus_title_page() {
    let bytes = write_pdf(&sample_book(), Template::Classic).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 3);

    let empty = write_pdf(&Book::new(), Template::Classic).unwrap();
    let doc = Document::load_mem(&empty).unwrap();
    assert_eq!(doc.get_pages().len(), 1, "empty book still has a title page");
}

#[test]
fn test_title_page_content() {
    let bytes = write_pdf(&sample_book(), Template::Classic).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let text = page_text(&doc, 0);
    assert!(text.contains("(Starfall)"));
    assert!(text.contains("(by R. Author)"));
}

#[test]
fn test_chapters_land_on_their_own_pages() {
    let bytes = write_pdf(&sample_book(), Template::Classic).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    let page2 = page_text(&doc, 1);
    assert!(page2.contains("(Chapter 1)"));
    assert!(page2.contains("surprised"), "body text should be on the chapter page");
    assert!(!page2.contains("(Chapter 2)"));

    let page3 = page_text(&doc, 2);
    assert!(page3.contains("(Chapter 2)"));
    assert!(page3.contains("(Landing was optional.)"));
}

#[test]
fn test_template_selects_base_fonts() {
    for (template, regular) in [
        (Template::Classic, "Times-Roman"),
        (Template::Modern, "Helvetica"),
        (Template::Elegant, "Times-Roman"),
        (Template::Scifi, "Courier"),
    ] {
        let bytes = write_pdf(&sample_book(), template).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        let base_fonts: Vec<String> = doc
            .objects
            .values()
            .filter_map(|object| object.as_dict().ok())
            .filter(|dict| matches!(dict.get(b"Type"), Ok(Object::Name(name)) if name == b"Font"))
            .filter_map(|dict| match dict.get(b"BaseFont") {
                Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).into_owned()),
                _ => None,
            })
            .collect();

        assert!(
            base_fonts.iter().any(|f| f == regular),
            "{}: expected base font {regular}, found {base_fonts:?}",
            template.key()
        );
    }
}

#[test]
fn test_document_info_metadata() {
    let bytes = write_pdf(&sample_book(), Template::Classic).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    let info_id = doc
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .expect("trailer should reference an Info dictionary");
    let info = doc.get_dictionary(info_id).unwrap();

    match info.get(b"Title") {
        Ok(Object::String(bytes, _)) => assert_eq!(bytes.as_slice(), b"Starfall"),
        other => panic!("Info Title should be a string, got {other:?}"),
    }
}

#[test]
fn test_long_paragraphs_flow_across_pages() {
    let mut book = Book::new();
    let mut chapter = Chapter::new("Chapter 1", 1);
    for i in 0..200 {
        chapter = chapter.with_paragraph(format!(
            "Paragraph number {i} carries enough words to take up a full line or two of the page."
        ));
    }
    book.chapters.push(chapter);

    let bytes = write_pdf(&book, Template::Classic).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert!(
        doc.get_pages().len() > 3,
        "200 paragraphs cannot fit on a single chapter page"
    );
}

//! Extraction boundary tests: decoding, dispatch, the structure survey,
//! and round-trips through the crate's own renderers.

use bookpress::{Error, SourceFormat, Template, extract_text, structure_text, survey_text, write_pdf};

// ============================================================================
// Dispatch and decoding
// ============================================================================

#[test]
fn test_txt_utf8() {
    let (text, format) = extract_text("Ä grüne Straße".as_bytes(), "notes.txt").unwrap();
    assert_eq!(text, "Ä grüne Straße");
    assert_eq!(format, SourceFormat::Text);
}

#[test]
fn test_txt_legacy_encoding_fallback() {
    // Windows-1252 bytes: "déjà vu"
    let (text, _) = extract_text(b"d\xE9j\xE0 vu", "old.txt").unwrap();
    assert_eq!(text, "déjà vu");
}

#[test]
fn test_unsupported_extension_message_names_the_file() {
    let err = extract_text(b"...", "cover.png").unwrap_err();
    match err {
        Error::UnsupportedFormat(msg) => assert!(msg.contains("cover.png")),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn test_extracted_text_feeds_the_structuring_engine() {
    let raw = b"My Upload\nChapter 1\nUploaded body text.";
    let (text, _) = extract_text(raw, "upload.txt").unwrap();
    let book = structure_text(&text);
    assert_eq!(book.title, "My Upload");
    assert_eq!(book.chapters.len(), 1);
    assert_eq!(book.chapters[0].paragraphs, vec!["Uploaded body text."]);
}

// ============================================================================
// PDF round-trip through our own renderer
// ============================================================================

#[test]
fn test_pdf_roundtrip_through_extractor() {
    let book = structure_text("Chapter 1\nThe quick brown fox jumps over the lazy dog.");
    let bytes = write_pdf(&book, Template::Classic).unwrap();

    let (text, format) = extract_text(&bytes, "generated.pdf").unwrap();
    assert_eq!(format, SourceFormat::Pdf);
    assert!(
        text.contains("quick brown fox"),
        "extracted PDF text should contain the body, got: {text:?}"
    );
}

// ============================================================================
// Structure survey
// ============================================================================

#[test]
fn test_survey_reports_counts_and_candidates() {
    let text = "CHAPTER ONE\n\
                The story starts here.\n\
                \"A quoted line.\"\n\
                - a list item\n\
                Part 2\n\
                More prose follows.";
    let survey = survey_text(text);

    assert_eq!(survey.total_lines, 6);
    assert_eq!(survey.word_count, 18);

    let headings: Vec<_> = survey.headings.iter().map(|h| h.text.as_str()).collect();
    assert!(headings.contains(&"CHAPTER ONE"));
    assert!(headings.contains(&"Part 2"));

    assert_eq!(survey.quotes.len(), 1);
    assert_eq!(survey.lists.len(), 1);
    assert_eq!(survey.lists[0].line_number, 3);
}

#[test]
fn test_survey_serializes_for_api_clients() {
    let survey = survey_text("Chapter 1\nBody.");
    let value = serde_json::to_value(&survey).unwrap();
    assert!(value["headings"].is_array());
    assert_eq!(value["total_lines"], 2);
    assert_eq!(value["headings"][0]["text"], "Chapter 1");
    assert_eq!(value["headings"][0]["line_number"], 0);
}

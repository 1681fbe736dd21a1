//! Text extraction from Word documents.
//!
//! A `.docx` file is a ZIP archive whose body text lives in
//! `word/document.xml`: paragraphs are `<w:p>` elements, and the visible
//! text is the character content of the `<w:t>` runs inside them.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Extract the paragraph text of a `.docx` file, in document order,
/// separated by blank lines. Empty paragraphs are skipped.
pub fn extract_docx(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| Error::InvalidDocx("missing word/document.xml".to_string()))?
        .read_to_string(&mut xml)?;

    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                // Tabs and in-paragraph breaks separate words; without this
                // the adjacent runs would fuse together.
                b"w:tab" | b"w:br" => current.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let decoded = t.decode().map_err(quick_xml::Error::from)?;
                let unescaped =
                    quick_xml::escape::unescape(&decoded).map_err(quick_xml::Error::from)?;
                current.push_str(&unescaped);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    let trimmed = current.trim();
                    if !trimmed.is_empty() {
                        paragraphs.push(trimmed.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_xml() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Chapter 1</w:t></w:r></w:p>
    <w:p><w:r><w:t>First </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
    <w:p><w:r><w:t>   </w:t></w:r></w:p>
    <w:p><w:r><w:t>Second paragraph.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = parse_document_xml(xml).unwrap();
        assert_eq!(text, "Chapter 1\n\nFirst paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_missing_document_xml() {
        // A valid ZIP with no word/document.xml inside.
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            zip.start_file("other.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            std::io::Write::write_all(&mut zip, b"not a docx").unwrap();
            zip.finish().unwrap();
        }

        let err = extract_docx(buffer.get_ref()).unwrap_err();
        assert!(matches!(err, Error::InvalidDocx(_)));
    }
}

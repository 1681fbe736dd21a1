//! Text extraction from uploaded source files.
//!
//! The structuring engine only ever sees a plain string; this module is the
//! boundary that turns uploaded bytes (`.txt`, `.docx`, `.pdf`) into that
//! string. Which extraction path produced the text makes no difference
//! downstream.

mod docx;
mod pdf;
mod survey;
mod txt;

pub use survey::{Survey, SurveyLine, survey_text};

use crate::error::{Error, Result};

/// The detected type of an uploaded source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Text,
    Docx,
    Pdf,
}

impl SourceFormat {
    /// Stable identifier reported back to API clients.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Text => "text",
            SourceFormat::Docx => "docx",
            SourceFormat::Pdf => "pdf",
        }
    }
}

/// Extract plain text from an uploaded file, dispatching on the filename
/// extension.
///
/// Returns the extracted text and the detected source format. Unknown
/// extensions (or filenames without one) are an
/// [`Error::UnsupportedFormat`].
pub fn extract_text(data: &[u8], filename: &str) -> Result<(String, SourceFormat)> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => Ok((txt::extract_txt(data), SourceFormat::Text)),
        "docx" => Ok((docx::extract_docx(data)?, SourceFormat::Docx)),
        "pdf" => Ok((pdf::extract_pdf(data)?, SourceFormat::Pdf)),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported file extension: {filename:?} (expected .txt, .docx, or .pdf)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_extension_dispatch() {
        let (text, format) = extract_text(b"Hello world.", "notes.txt").unwrap();
        assert_eq!(text, "Hello world.");
        assert_eq!(format, SourceFormat::Text);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let (_, format) = extract_text(b"Hello", "NOTES.TXT").unwrap();
        assert_eq!(format, SourceFormat::Text);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(matches!(
            extract_text(b"...", "book.epub"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            extract_text(b"...", "no-extension"),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}

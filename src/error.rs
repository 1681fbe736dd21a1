//! Error types for bookpress operations.

use thiserror::Error;

/// Errors that can occur during text extraction or rendering.
///
/// The structuring engine itself is total: classification and assembly
/// succeed for every string input and never produce an [`Error`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtract(#[from] pdf_extract::OutputError),

    #[error("PDF generation error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Invalid DOCX: {0}")]
    InvalidDocx(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

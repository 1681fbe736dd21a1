//! Format renderers.
//!
//! Each renderer walks the same [`Book`](crate::Book) and the style bundles
//! of the chosen [`Template`], and produces a complete binary artifact in
//! memory.

pub mod docx;
pub mod epub;
pub mod pdf;
pub(crate) mod xml;

pub use docx::{write_docx, write_docx_to_writer};
pub use epub::{write_epub, write_epub_to_writer};
pub use pdf::write_pdf;

use crate::book::Book;
use crate::error::Result;
use crate::template::Template;

/// An output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Epub,
    Pdf,
    Docx,
}

impl OutputFormat {
    /// Detect the format from a filename extension (with or without the
    /// leading dot).
    pub fn from_extension(ext: &str) -> Option<OutputFormat> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "epub" => Some(OutputFormat::Epub),
            "pdf" => Some(OutputFormat::Pdf),
            "docx" => Some(OutputFormat::Docx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Epub => "epub",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Epub => "application/epub+zip",
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Render `book` under `template` into the requested format.
pub fn render(book: &Book, template: Template, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Epub => write_epub(book, template),
        OutputFormat::Pdf => write_pdf(book, template),
        OutputFormat::Docx => write_docx(book, template),
    }
}

/// Suggested download filename for a rendered book: the title with spaces
/// flattened to underscores, plus the format extension.
pub fn download_filename(title: &str, format: OutputFormat) -> String {
    format!("{}.{}", title.replace(' ', "_"), format.extension())
}

/// Structure text and render it in one call, applying caller metadata
/// precedence along the way. This is the whole pipeline behind each
/// generation endpoint.
pub fn render_text(
    text: &str,
    template: Template,
    title: Option<&str>,
    author: Option<&str>,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    let mut book = crate::structure::structure_text(text);
    book.resolve_metadata(title, author);
    render(&book, template, format)
}

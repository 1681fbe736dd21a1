//! Text extraction from PDF documents.

use crate::error::Result;

/// Extract the text of a PDF. The extractor flattens layout; headings and
/// body text come back as plain lines, which is exactly what the
/// structuring engine expects.
pub fn extract_pdf(data: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(data)?;
    Ok(text.trim().to_string())
}

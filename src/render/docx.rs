//! Word document output.
//!
//! A `.docx` is a ZIP package of WordprocessingML parts. The writer
//! generates the four parts a text-only document needs — content types,
//! package relationships, the style definitions, and the document body —
//! the same way the EPUB writer assembles its OPF and NCX.
//!
//! WordprocessingML units: font sizes are half-points, spacing values are
//! twentieths of a point, and indents are twips (also twentieths).

use std::io::{Cursor, Seek, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::book::Book;
use crate::error::Result;
use crate::template::{RoleStyle, StyleSet, Template};

use super::xml::escape_xml;

/// Render a [`Book`] to an in-memory DOCX.
pub fn write_docx(book: &Book, template: Template) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    write_docx_to_writer(book, template, &mut buffer)?;
    Ok(buffer.into_inner())
}

/// Write a DOCX to any [`Write`] + [`Seek`] destination.
pub fn write_docx_to_writer<W: Write + Seek>(
    book: &Book,
    template: Template,
    writer: W,
) -> Result<()> {
    let styles = template.styles();
    let mut zip = ZipWriter::new(writer);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS_XML.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", options)?;
    zip.write_all(DOCUMENT_RELS_XML.as_bytes())?;

    zip.start_file("word/styles.xml", options)?;
    zip.write_all(generate_styles(styles).as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(generate_document(book, styles).as_bytes())?;

    zip.finish()?;
    Ok(())
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const WPML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn half_points(pt: f32) -> u32 {
    (pt * 2.0).round() as u32
}

fn twentieths(pt: f32) -> u32 {
    (pt * 20.0).round() as u32
}

/// The styles part: document defaults carrying the template's body font,
/// size, and line spacing via the Normal style.
fn generate_styles(styles: &StyleSet) -> String {
    let family = escape_xml(styles.font.family);
    let body_sz = half_points(styles.paragraph.size_pt);
    // Line spacing is expressed in 240ths of a line.
    let line = (styles.line_spacing * 240.0).round() as u32;

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{WPML_NS}">
  <w:docDefaults>
    <w:rPrDefault>
      <w:rPr>
        <w:rFonts w:ascii="{family}" w:hAnsi="{family}"/>
        <w:sz w:val="{body_sz}"/>
      </w:rPr>
    </w:rPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:pPr>
      <w:spacing w:line="{line}" w:lineRule="auto"/>
    </w:pPr>
    <w:rPr>
      <w:rFonts w:ascii="{family}" w:hAnsi="{family}"/>
      <w:sz w:val="{body_sz}"/>
    </w:rPr>
  </w:style>
</w:styles>"#
    )
}

/// Run properties for one role: font, size, and emphasis flags.
fn run_properties(styles: &StyleSet, role: &RoleStyle) -> String {
    let mut rpr = String::from("<w:rPr>");
    rpr.push_str(&format!(
        "<w:rFonts w:ascii=\"{family}\" w:hAnsi=\"{family}\"/>",
        family = escape_xml(styles.font.family)
    ));
    if role.bold {
        rpr.push_str("<w:b/>");
    }
    if role.small_caps {
        rpr.push_str("<w:smallCaps/>");
    }
    if role.all_caps {
        rpr.push_str("<w:caps/>");
    }
    rpr.push_str(&format!("<w:sz w:val=\"{}\"/>", half_points(role.size_pt)));
    rpr.push_str("</w:rPr>");
    rpr
}

/// Paragraph properties for one role: alignment, spacing, indents.
fn paragraph_properties(role: &RoleStyle) -> String {
    let mut ppr = String::from("<w:pPr>");
    ppr.push_str(&format!(
        "<w:spacing w:before=\"{}\" w:after=\"{}\"/>",
        twentieths(role.space_before_pt),
        twentieths(role.space_after_pt)
    ));
    if role.first_indent_pt > 0.0 || role.left_indent_pt > 0.0 {
        ppr.push_str("<w:ind");
        if role.left_indent_pt > 0.0 {
            ppr.push_str(&format!(" w:left=\"{}\"", twentieths(role.left_indent_pt)));
        }
        if role.first_indent_pt > 0.0 {
            ppr.push_str(&format!(
                " w:firstLine=\"{}\"",
                twentieths(role.first_indent_pt)
            ));
        }
        ppr.push_str("/>");
    }
    ppr.push_str(&format!("<w:jc w:val=\"{}\"/>", role.align.docx()));
    ppr.push_str("</w:pPr>");
    ppr
}

fn styled_paragraph(styles: &StyleSet, role: &RoleStyle, text: &str) -> String {
    format!(
        "    <w:p>{}<w:r>{}<w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>\n",
        paragraph_properties(role),
        run_properties(styles, role),
        escape_xml(text)
    )
}

fn generate_document(book: &Book, styles: &StyleSet) -> String {
    let mut doc = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:w=\"{WPML_NS}\">\n  <w:body>\n"
    );

    // Title page: centered title, a gap, the byline, then a page break.
    doc.push_str(&styled_paragraph(styles, &styles.title, &book.title));
    doc.push_str("    <w:p/>\n    <w:p/>\n");
    let byline = RoleStyle {
        size_pt: 16.0,
        bold: false,
        ..styles.title
    };
    doc.push_str(&styled_paragraph(
        styles,
        &byline,
        &format!("by {}", book.author),
    ));
    doc.push_str("    <w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>\n");

    for chapter in &book.chapters {
        let heading = styles.heading(chapter.level);
        doc.push_str(&styled_paragraph(styles, &heading, &chapter.title));
        for paragraph in &chapter.paragraphs {
            doc.push_str(&styled_paragraph(styles, &styles.paragraph, paragraph));
        }
    }

    // One-inch margins on US letter.
    doc.push_str(
        "    <w:sectPr>\n      <w:pgSz w:w=\"12240\" w:h=\"15840\"/>\n      <w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\"/>\n    </w:sectPr>\n",
    );
    doc.push_str("  </w:body>\n</w:document>");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Chapter;

    fn sample_book() -> Book {
        let mut book = Book::new();
        book.title = "Sample".to_string();
        book.chapters
            .push(Chapter::new("Chapter 1", 1).with_paragraph("Body text."));
        book
    }

    #[test]
    fn test_document_contains_chapter_text() {
        let doc = generate_document(&sample_book(), Template::Classic.styles());
        assert!(doc.contains("Chapter 1"));
        assert!(doc.contains("Body text."));
        assert!(doc.contains("by Anonymous"));
        assert!(doc.contains("<w:br w:type=\"page\"/>"));
    }

    #[test]
    fn test_classic_body_is_justified_with_indent() {
        let ppr = paragraph_properties(&Template::Classic.styles().paragraph);
        assert!(ppr.contains("<w:jc w:val=\"both\"/>"));
        assert!(ppr.contains("w:firstLine=\"720\""));
    }

    #[test]
    fn test_scifi_headings_are_bold_caps() {
        let styles = Template::Scifi.styles();
        let rpr = run_properties(styles, &styles.heading(1));
        assert!(rpr.contains("<w:b/>"));
        assert!(rpr.contains("<w:caps/>"));
        assert!(rpr.contains("Courier New"));
    }

    #[test]
    fn test_heading_sizes_follow_level() {
        // Classic headings: 18 - 2 * level points, doubled to half-points.
        let styles = Template::Classic.styles();
        assert!(run_properties(styles, &styles.heading(1)).contains("w:sz w:val=\"32\""));
        assert!(run_properties(styles, &styles.heading(3)).contains("w:sz w:val=\"24\""));
    }
}

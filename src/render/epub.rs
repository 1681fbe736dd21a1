use std::io::{Cursor, Seek, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::book::Book;
use crate::error::Result;
use crate::template::Template;

use super::xml::escape_xml;

/// Render a [`Book`] to an in-memory EPUB.
///
/// Creates a valid EPUB 2 package: OPF package document, NCX table of
/// contents, the template stylesheet, a title page, and one XHTML content
/// document per chapter.
pub fn write_epub(book: &Book, template: Template) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    write_epub_to_writer(book, template, &mut buffer)?;
    Ok(buffer.into_inner())
}

/// Write an EPUB to any [`Write`] + [`Seek`] destination.
pub fn write_epub_to_writer<W: Write + Seek>(
    book: &Book,
    template: Template,
    writer: W,
) -> Result<()> {
    let mut zip = ZipWriter::new(writer);

    // 1. Write mimetype (must be first, uncompressed)
    let options_stored =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let options_deflate =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("mimetype", options_stored)?;
    zip.write_all(b"application/epub+zip")?;

    // 2. Write META-INF/container.xml
    zip.start_file("META-INF/container.xml", options_deflate)?;
    zip.write_all(CONTAINER_XML.as_bytes())?;

    // Generate identifier once for consistency between OPF and NCX
    let identifier = format!("urn:uuid:{}", uuid_v4());

    // 3. Write content.opf
    let opf = generate_opf(book, &identifier);
    zip.start_file("OEBPS/content.opf", options_deflate)?;
    zip.write_all(opf.as_bytes())?;

    // 4. Write toc.ncx
    let ncx = generate_ncx(book, &identifier);
    zip.start_file("OEBPS/toc.ncx", options_deflate)?;
    zip.write_all(ncx.as_bytes())?;

    // 5. Write the template stylesheet
    zip.start_file("OEBPS/style/nav.css", options_deflate)?;
    zip.write_all(template.css().as_bytes())?;

    // 6. Write the title page and one content document per chapter
    zip.start_file("OEBPS/titlepage.xhtml", options_deflate)?;
    zip.write_all(generate_title_page(book).as_bytes())?;

    for (index, chapter) in book.chapters.iter().enumerate() {
        let html = generate_chapter_html(chapter);
        zip.start_file(format!("OEBPS/{}", chapter_filename(index)), options_deflate)?;
        zip.write_all(html.as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

fn chapter_filename(index: usize) -> String {
    format!("chapter_{}.xhtml", index + 1)
}

fn generate_opf(book: &Book, identifier: &str) -> String {
    let mut opf = String::new();

    opf.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
"#,
    );

    opf.push_str(&format!(
        "    <dc:title>{}</dc:title>\n",
        escape_xml(&book.title)
    ));
    opf.push_str(&format!(
        "    <dc:identifier id=\"BookId\">{}</dc:identifier>\n",
        escape_xml(identifier)
    ));
    opf.push_str("    <dc:language>en</dc:language>\n");
    opf.push_str(&format!(
        "    <dc:creator>{}</dc:creator>\n",
        escape_xml(&book.author)
    ));

    opf.push_str("  </metadata>\n  <manifest>\n");

    opf.push_str(
        "    <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\n",
    );
    opf.push_str("    <item id=\"nav_css\" href=\"style/nav.css\" media-type=\"text/css\"/>\n");
    opf.push_str(
        "    <item id=\"titlepage\" href=\"titlepage.xhtml\" media-type=\"application/xhtml+xml\"/>\n",
    );
    for index in 0..book.chapters.len() {
        opf.push_str(&format!(
            "    <item id=\"chapter_{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>\n",
            index + 1,
            chapter_filename(index)
        ));
    }

    opf.push_str("  </manifest>\n  <spine toc=\"ncx\">\n");

    opf.push_str("    <itemref idref=\"titlepage\"/>\n");
    for index in 0..book.chapters.len() {
        opf.push_str(&format!(
            "    <itemref idref=\"chapter_{}\"/>\n",
            index + 1
        ));
    }

    opf.push_str("  </spine>\n</package>\n");
    opf
}

fn generate_ncx(book: &Book, identifier: &str) -> String {
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content=""#,
    );

    ncx.push_str(&escape_xml(identifier));
    ncx.push_str(
        r#""/>
    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>"#,
    );
    ncx.push_str(&escape_xml(&book.title));
    ncx.push_str(
        r#"</text>
  </docTitle>
  <navMap>
"#,
    );

    for (index, chapter) in book.chapters.iter().enumerate() {
        let play_order = index + 1;
        ncx.push_str(&format!(
            "    <navPoint id=\"navpoint-{play_order}\" playOrder=\"{play_order}\">\n"
        ));
        ncx.push_str(&format!(
            "      <navLabel>\n        <text>{}</text>\n      </navLabel>\n",
            escape_xml(&chapter.title)
        ));
        ncx.push_str(&format!(
            "      <content src=\"{}\"/>\n",
            chapter_filename(index)
        ));
        ncx.push_str("    </navPoint>\n");
    }

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

fn generate_title_page(book: &Book) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="style/nav.css"/>
</head>
<body>
    <h1 class="book-title">{title}</h1>
    <p class="byline">by {author}</p>
</body>
</html>"#,
        title = escape_xml(&book.title),
        author = escape_xml(&book.author),
    )
}

fn generate_chapter_html(chapter: &crate::book::Chapter) -> String {
    let mut html = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="style/nav.css"/>
</head>
<body>
    <h{level} class="chapter-heading">{title}</h{level}>
"#,
        title = escape_xml(&chapter.title),
        level = chapter.level,
    );

    for paragraph in &chapter.paragraphs {
        html.push_str(&format!(
            "    <p class=\"paragraph\">{}</p>\n",
            escape_xml(paragraph)
        ));
    }

    html.push_str("</body>\n</html>");
    html
}

/// Generate a simple UUID v4 (random)
fn uuid_v4() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(12345);

    // Simple PRNG for UUID generation (not cryptographically secure, but fine for identifiers)
    let mut state = seed;
    let mut bytes = [0u8; 16];
    for byte in &mut bytes {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        *byte = (state >> 33) as u8;
    }

    // Set version (4) and variant (2)
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let mut out = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

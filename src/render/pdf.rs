//! Paginated PDF output.
//!
//! The writer builds the PDF object graph directly with `lopdf`: one
//! content stream per page, the standard-14 fonts named by the template,
//! and a simple line-based layout — a title page, then each chapter on a
//! fresh page with its heading followed by wrapped paragraph text.
//!
//! Layout is deliberately plain. Line widths are estimated from average
//! glyph widths rather than font metrics, which is accurate enough for
//! wrapping body text in the standard fonts.

use std::mem;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::book::Book;
use crate::error::Result;
use crate::template::{Alignment, RoleStyle, StyleSet, Template};

// A4, in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

const MARGIN_LEFT: f32 = 72.0;
const MARGIN_RIGHT: f32 = 72.0;
const MARGIN_TOP: f32 = 72.0;
const MARGIN_BOTTOM: f32 = 18.0;

const USABLE_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

/// Resource names for the two fonts every page can reach.
const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Render a [`Book`] to an in-memory PDF.
pub fn write_pdf(book: &Book, template: Template) -> Result<Vec<u8>> {
    let styles = template.styles();
    let pages = compose_pages(book, styles);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => styles.font.pdf_regular,
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => styles.font.pdf_bold,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => font_regular,
            FONT_BOLD => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(book.title.as_str()),
        "Author" => Object::string_literal(book.author.as_str()),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Lay the book out into per-page operation lists.
fn compose_pages(book: &Book, styles: &StyleSet) -> Vec<Vec<Operation>> {
    let mut composer = Composer::new(styles.font.pdf_regular.starts_with("Courier"));

    // Title page: a deep top spacer, the title, then the byline.
    composer.advance(144.0);
    composer.write_block(&book.title, &styles.title);
    composer.advance(36.0);
    let byline = RoleStyle {
        size_pt: 12.0,
        bold: false,
        ..styles.title
    };
    composer.write_block(&format!("by {}", book.author), &byline);

    for chapter in &book.chapters {
        composer.break_page();

        let heading = styles.heading(chapter.level);
        composer.advance(heading.space_before_pt);
        composer.write_block(&chapter.title, &heading);
        composer.advance(heading.space_after_pt);

        for paragraph in &chapter.paragraphs {
            composer.write_block(paragraph, &styles.paragraph);
            composer.advance(styles.paragraph.space_after_pt);
        }
    }

    composer.finish()
}

struct Composer {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
    monospace: bool,
}

impl Composer {
    fn new(monospace: bool) -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN_TOP,
            monospace,
        }
    }

    fn break_page(&mut self) {
        self.pages.push(mem::take(&mut self.ops));
        self.y = PAGE_HEIGHT - MARGIN_TOP;
    }

    /// Move the cursor down, breaking to a new page when the bottom margin
    /// is crossed.
    fn advance(&mut self, dy: f32) {
        self.y -= dy;
        if self.y < MARGIN_BOTTOM {
            self.break_page();
        }
    }

    /// Write one block of text, wrapped to the usable width and aligned
    /// per its role style.
    fn write_block(&mut self, text: &str, role: &RoleStyle) {
        let font = if role.bold { FONT_BOLD } else { FONT_REGULAR };
        let char_width = avg_char_width(self.monospace, role.size_pt);
        let line_height = role.size_pt * 1.2;

        let indent_first = role.first_indent_pt;
        let indent_rest = role.left_indent_pt;

        let lines = wrap_text(text, USABLE_WIDTH - indent_rest, char_width, indent_first);
        for (i, line) in lines.iter().enumerate() {
            if self.y - line_height < MARGIN_BOTTOM {
                self.break_page();
            }
            self.y -= line_height;

            let line_width = line.chars().count() as f32 * char_width;
            let x = match role.align {
                Alignment::Center => (PAGE_WIDTH - line_width) / 2.0,
                // Justification collapses to a ragged right edge; the
                // estimated metrics are too coarse to stretch spaces.
                Alignment::Left | Alignment::Justify => {
                    let mut x = MARGIN_LEFT + indent_rest;
                    if i == 0 {
                        x += indent_first;
                    }
                    x
                }
            };

            self.ops.push(Operation::new("BT", vec![]));
            self.ops
                .push(Operation::new("Tf", vec![font.into(), role.size_pt.into()]));
            self.ops
                .push(Operation::new("Td", vec![x.into(), self.y.into()]));
            self.ops.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
            ));
            self.ops.push(Operation::new("ET", vec![]));
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(self.ops);
        self.pages
    }
}

/// Average glyph width as a fraction of the font size.
fn avg_char_width(monospace: bool, size_pt: f32) -> f32 {
    if monospace { size_pt * 0.6 } else { size_pt * 0.5 }
}

/// Greedy word wrap against an estimated character width. The first line
/// is narrowed by the first-line indent.
fn wrap_text(text: &str, width_pt: f32, char_width: f32, first_indent_pt: f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut budget = ((width_pt - first_indent_pt) / char_width).max(1.0) as usize;

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > budget && !current.is_empty() {
            lines.push(mem::take(&mut current));
            budget = (width_pt / char_width).max(1.0) as usize;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode text for the WinAnsi-encoded standard fonts. Characters outside
/// Windows-1252 come out as substitution marks rather than breaking the
/// string object.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let (bytes, _encoding, _unmappable) = encoding_rs::WINDOWS_1252.encode(text);
    bytes.into_owned()
}

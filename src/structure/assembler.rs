//! Assembly of classified lines into a [`Book`].

use crate::book::{Book, Chapter};

use super::classifier::{ClassifiedLine, LineKind, classify};
use super::is_numbered_chapter;

/// Structure raw text in one pass: trim lines, drop blanks, classify, and
/// assemble.
///
/// Empty or whitespace-only input yields a book with the default title and
/// no chapters.
pub fn structure_text(text: &str) -> Book {
    assemble(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(classify),
    )
}

/// Fold an ordered sequence of classified lines into a [`Book`].
///
/// A heading closes the current chapter and opens a new one, except for the
/// very first heading: if it does not look like `chapter <number>`, it is
/// consumed as the book title and no chapter is opened for it. Body text
/// arriving before any chapter opens a synthetic "Chapter 1" to hold it.
///
/// Assembly is total. Every input sequence, including the empty one,
/// produces a valid book.
pub fn assemble(lines: impl IntoIterator<Item = ClassifiedLine>) -> Book {
    let mut book = Book::new();
    let mut current: Option<Chapter> = None;
    let mut seen_heading = false;

    for line in lines {
        match line.kind {
            LineKind::Heading(level) => {
                if let Some(done) = current.take() {
                    book.chapters.push(done);
                }

                let first = !seen_heading;
                seen_heading = true;

                if first && !is_numbered_chapter(&line.text) {
                    // The opening heading is the book title, not a chapter.
                    book.title = line.text;
                } else {
                    current = Some(Chapter::new(line.text, level));
                }
            }
            LineKind::Paragraph => {
                current
                    .get_or_insert_with(|| Chapter::new("Chapter 1", 1))
                    .paragraphs
                    .push(line.text);
            }
        }
    }

    if let Some(done) = current {
        book.chapters.push(done);
    }

    book
}

//! # bookpress
//!
//! A fast, lightweight library for turning unstructured plain text into
//! structured ebooks.
//!
//! ## Features
//!
//! - Heuristic detection of titles, chapter headings, and body paragraphs
//! - A format-agnostic [`Book`] model consumed by every renderer
//! - EPUB, PDF, and DOCX output under four built-in visual templates
//! - Text extraction from `.txt`, `.docx`, and `.pdf` uploads
//!
//! ## Quick Start
//!
//! ```
//! use bookpress::{structure_text, render, OutputFormat, Template};
//!
//! let book = structure_text("My Book\nChapter 1\nIt was a dark and stormy night.");
//! assert_eq!(book.title, "My Book");
//!
//! let epub = render(&book, Template::Classic, OutputFormat::Epub).unwrap();
//! assert!(!epub.is_empty());
//! ```
//!
//! ## Working with Books
//!
//! The [`Book`] struct is the central data type, representing a structured
//! book independently of any output format:
//!
//! ```
//! use bookpress::{Book, Chapter};
//!
//! let mut book = Book::new();
//! book.title = "My Book".to_string();
//! book.chapters.push(
//!     Chapter::new("Chapter 1", 1).with_paragraph("First paragraph."),
//! );
//! ```

pub mod book;
pub mod error;
pub mod extract;
pub mod render;
pub mod structure;
pub mod template;

pub use book::{Book, Chapter, DEFAULT_AUTHOR, DEFAULT_TITLE};
pub use error::{Error, Result};
pub use extract::{SourceFormat, Survey, extract_text, survey_text};
pub use render::{OutputFormat, render, write_docx, write_epub, write_pdf};
pub use structure::{ClassifiedLine, LineKind, assemble, classify, structure_text};
pub use template::Template;

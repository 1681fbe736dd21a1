use serde::Serialize;

/// Placeholder title used when the caller supplies none and the text
/// yields none.
pub const DEFAULT_TITLE: &str = "Untitled Book";

/// Placeholder author used when the caller supplies none. Authors are never
/// inferred from the text.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Intermediate representation of a structured book.
/// Format-agnostic structure that the EPUB, PDF, and DOCX renderers all
/// consume.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Chapters in order of appearance in the input.
    pub chapters: Vec<Chapter>,
}

/// One chapter: the heading line that opened it, its nesting level, and the
/// body paragraphs collected until the next heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    /// Nesting level, 1-3. 1 = chapter/part, 2 = preface-like front matter,
    /// 3 = acknowledgments-like back matter.
    pub level: u8,
    pub paragraphs: Vec<String>,
}

impl Default for Book {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            chapters: Vec::new(),
        }
    }
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply caller-supplied metadata over whatever assembly extracted.
    ///
    /// A supplied value wins unless it is empty or equal to the placeholder
    /// default, in which case the extracted title (or the placeholder
    /// author) stands.
    pub fn resolve_metadata(&mut self, title: Option<&str>, author: Option<&str>) {
        if let Some(title) = title
            && !title.is_empty()
            && title != DEFAULT_TITLE
        {
            self.title = title.to_string();
        }
        if let Some(author) = author
            && !author.is_empty()
            && author != DEFAULT_AUTHOR
        {
            self.author = author.to_string();
        }
    }

    /// Total number of body paragraphs across all chapters.
    pub fn paragraph_count(&self) -> usize {
        self.chapters.iter().map(|c| c.paragraphs.len()).sum()
    }
}

impl Chapter {
    pub fn new(title: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            level,
            paragraphs: Vec::new(),
        }
    }

    pub fn with_paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }
}

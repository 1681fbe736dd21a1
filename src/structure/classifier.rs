//! Heuristic line classification.
//!
//! A single trimmed line is either a heading (with a nesting level) or a
//! body paragraph. The decision is an ordered rule cascade with
//! first-match-wins semantics; the rule order and the 50/100 character
//! boundaries are behavioral contracts, not tuning knobs.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

/// What a line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A structural marker: book title, chapter, part, front/back matter.
    /// The payload is the nesting level (1-3).
    Heading(u8),
    /// Body text.
    Paragraph,
}

/// A trimmed, non-empty line together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub text: String,
    pub kind: LineKind,
}

/// Structural marker patterns, anchored at the start of the line.
/// Matching any of these makes the line a heading outright.
static MARKER_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)^chapter\s+\d+",
        r"(?i)^chapter\s+[ivxlcdm]+", // Roman numerals
        r"(?i)^ch\s+\d+",
        r"(?i)^\d+\.\s", // "1. Chapter title"
        r"(?i)^prologue$",
        r"(?i)^epilogue$",
        r"(?i)^introduction$",
        r"(?i)^preface$",
        r"(?i)^acknowledgments?$",
        r"(?i)^acknowledgements?$",
        r"(?i)^about\s+the\s+author$",
        r"(?i)^part\s+[ivxlcdm]+",
        r"(?i)^part\s+\d+",
        r"(?i)^book\s+[ivxlcdm]+",
        r"(?i)^book\s+\d+",
    ])
    .expect("marker patterns compile")
});

/// Ordered (pattern, level) table for heading level assignment, evaluated
/// top to bottom. Anything that falls through is level 1.
static LEVEL_RULES: Lazy<Vec<(Regex, u8)>> = Lazy::new(|| {
    [
        (r"(?i)^chapter\s+\d+", 1),
        (r"(?i)^(part|book)\s+", 1),
        (r"(?i)^(prologue|epilogue)$", 1),
        (r"(?i)^(introduction|preface)$", 2),
        (r"(?i)^(acknowledge?ments?|about\s+the\s+author)$", 3),
    ]
    .into_iter()
    .map(|(pattern, level)| (Regex::new(pattern).expect("level pattern compiles"), level))
    .collect()
});

/// `chapter <number>` at the start of a line. Headings of this shape are
/// never promoted to the book title.
static CHAPTER_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^chapter\s+\d+").expect("chapter pattern compiles"));

const TITLE_KEYWORDS: [&str; 5] = ["chapter", "prologue", "epilogue", "part", "book"];

/// Classify one line of text.
///
/// The input must already be trimmed and non-empty; blank lines are
/// filtered out before classification and never reach this function.
///
/// The cascade, first match wins:
///
/// 1. A structural marker pattern (`chapter 7`, `Part II`, `Prologue`,
///    `3. The Return`, ...) anchored at the line start.
/// 2. Entirely upper-case and shorter than 50 characters.
/// 3. Shorter than 100 characters, not ending in `.` or `,`, and containing
///    one of `chapter`, `prologue`, `epilogue`, `part`, `book` anywhere.
/// 4. Otherwise, a body paragraph.
///
/// Rule 3 will claim a short body sentence that happens to mention one of
/// the keywords and lacks terminal punctuation — "He never finished the
/// last chapter" is read as a heading. That over-eagerness is inherent to
/// the heuristic and is kept deliberately.
pub fn classify(line: &str) -> ClassifiedLine {
    if is_heading(line) {
        ClassifiedLine {
            text: line.to_string(),
            kind: LineKind::Heading(heading_level(line)),
        }
    } else {
        ClassifiedLine {
            text: line.to_string(),
            kind: LineKind::Paragraph,
        }
    }
}

/// Whether `line` opens with `chapter <number>`.
pub(crate) fn is_numbered_chapter(line: &str) -> bool {
    CHAPTER_NUMBER.is_match(line)
}

fn is_heading(line: &str) -> bool {
    // Rule 1: explicit structural markers.
    if MARKER_PATTERNS.is_match(line) {
        return true;
    }

    // Rule 2: short shouty lines are titles.
    if is_all_uppercase(line) && line.chars().count() < 50 {
        return true;
    }

    // Rule 3: short, unpunctuated lines mentioning a structural keyword.
    if line.chars().count() < 100 && !line.ends_with('.') && !line.ends_with(',') {
        let lower = line.to_lowercase();
        if TITLE_KEYWORDS.iter().any(|word| lower.contains(word)) {
            return true;
        }
    }

    false
}

/// All cased characters are upper-case, and there is at least one.
/// Digits and punctuation are ignored, so "CHAPTER 12!" qualifies.
fn is_all_uppercase(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Level assignment for a line already known to be a heading. Independent
/// of which cascade rule matched.
fn heading_level(line: &str) -> u8 {
    for (pattern, level) in LEVEL_RULES.iter() {
        if pattern.is_match(line) {
            return *level;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(line: &str) -> LineKind {
        classify(line).kind
    }

    #[test]
    fn test_marker_patterns() {
        assert_eq!(kind("Chapter 1"), LineKind::Heading(1));
        assert_eq!(kind("chapter 12: The Return"), LineKind::Heading(1));
        assert_eq!(kind("Chapter IV"), LineKind::Heading(1));
        assert_eq!(kind("Ch 3"), LineKind::Heading(1));
        assert_eq!(kind("1. The Beginning"), LineKind::Heading(1));
        assert_eq!(kind("Prologue"), LineKind::Heading(1));
        assert_eq!(kind("EPILOGUE"), LineKind::Heading(1));
        assert_eq!(kind("Part II"), LineKind::Heading(1));
        assert_eq!(kind("Book 2"), LineKind::Heading(1));
    }

    #[test]
    fn test_front_and_back_matter_levels() {
        assert_eq!(kind("Introduction"), LineKind::Heading(2));
        assert_eq!(kind("Preface"), LineKind::Heading(2));
        assert_eq!(kind("Acknowledgments"), LineKind::Heading(3));
        assert_eq!(kind("Acknowledgements"), LineKind::Heading(3));
        assert_eq!(kind("About the Author"), LineKind::Heading(3));
    }

    #[test]
    fn test_all_caps_rule() {
        assert_eq!(kind("THE GATHERING STORM"), LineKind::Heading(1));
        // 50+ characters of caps reads as shouted prose, not a title.
        let long = "A".repeat(50);
        assert_eq!(kind(&long), LineKind::Paragraph);
        let just_short = "A".repeat(49);
        assert_eq!(kind(&just_short), LineKind::Heading(1));
    }

    #[test]
    fn test_keyword_rule_boundaries() {
        // Short, no terminal punctuation, mentions "chapter" -> heading.
        assert_eq!(kind("The Final Chapter"), LineKind::Heading(1));
        // Terminal period demotes it to a paragraph.
        assert_eq!(kind("The final chapter."), LineKind::Paragraph);
        // 100+ characters demotes it too.
        let padded = format!("{} chapter", "x".repeat(95));
        assert_eq!(kind(&padded), LineKind::Paragraph);
    }

    #[test]
    fn test_plain_prose_is_paragraph() {
        assert_eq!(kind("It was a dark and stormy night."), LineKind::Paragraph);
        assert_eq!(kind("Hello world."), LineKind::Paragraph);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for line in ["Chapter 1", "PREFACE", "Some ordinary sentence."] {
            assert_eq!(classify(line), classify(line));
        }
    }

    #[test]
    fn test_numbered_chapter_probe() {
        assert!(is_numbered_chapter("Chapter 1"));
        assert!(is_numbered_chapter("CHAPTER 22: The End"));
        assert!(!is_numbered_chapter("Chapter One"));
        assert!(!is_numbered_chapter("My Book"));
    }
}

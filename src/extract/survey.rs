//! Quick structural survey of raw text.
//!
//! This is a preview aid for upload responses and the CLI `--info` mode:
//! a cheap scan for lines that look like headings, quotes, or list items,
//! plus size counts. It is deliberately looser than the real classifier —
//! it reports candidates, it does not decide structure.

use serde::Serialize;

/// Survey of a raw text submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Survey {
    pub headings: Vec<SurveyLine>,
    pub quotes: Vec<SurveyLine>,
    pub lists: Vec<SurveyLine>,
    pub total_lines: usize,
    pub word_count: usize,
}

/// One flagged line, with its zero-based line number in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyLine {
    pub text: String,
    pub line_number: usize,
}

const QUOTE_OPENERS: [char; 4] = ['"', '\'', '\u{201C}', '\u{201D}'];
const LIST_MARKERS: [&str; 9] = ["\u{2022}", "*", "-", "1.", "2.", "3.", "a.", "b.", "c."];

/// Scan `text` and report candidate headings, quotes, and list items.
pub fn survey_text(text: &str) -> Survey {
    let mut survey = Survey {
        total_lines: text.split('\n').count(),
        word_count: text.split_whitespace().count(),
        ..Survey::default()
    };

    for (line_number, raw) in text.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if looks_like_heading(line) {
            survey.headings.push(SurveyLine {
                text: line.to_string(),
                line_number,
            });
        }

        if line.starts_with(QUOTE_OPENERS) || raw.starts_with("    ") {
            survey.quotes.push(SurveyLine {
                text: line.to_string(),
                line_number,
            });
        }

        if LIST_MARKERS.iter().any(|marker| line.starts_with(marker)) {
            survey.lists.push(SurveyLine {
                text: line.to_string(),
                line_number,
            });
        }
    }

    survey
}

/// Short lines that are all caps, start with a chapter/part marker, or
/// carry a digit near the start.
fn looks_like_heading(line: &str) -> bool {
    if line.chars().count() >= 80 {
        return false;
    }

    let all_caps = {
        let mut has_cased = false;
        let mut all_upper = true;
        for c in line.chars() {
            if c.is_lowercase() {
                all_upper = false;
            }
            if c.is_uppercase() {
                has_cased = true;
            }
        }
        has_cased && all_upper
    };

    all_caps
        || line.starts_with("Chapter")
        || line.starts_with("CHAPTER")
        || line.starts_with("Part")
        || line.starts_with("PART")
        || line.chars().take(10).any(|c| c.is_ascii_digit())
}

//! Field, title and description extraction for a single criterion block
//!
//! Each markdown idiom the research model uses for a field is a separate
//! [`SectionPattern`]; [`extract_section`] tries them in [`SectionPattern::PRIORITY`]
//! order and the first one that matches decides the result, even when its text
//! cleans down to nothing.
//!
//! A pattern is a start expression (the field label in some markup) plus a
//! terminator expression. The captured text runs from the end of the label up to
//! the first terminator found at least one character later, or to the end of the
//! block. For the bold patterns a bulleted bold line only terminates when it is
//! indented no deeper than the label's own line, so nested sub-bullets stay part
//! of the value.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Named fields the research prompt asks for in each criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionField {
    Standard,
    Source,
    Relevance,
}

impl SectionField {
    pub const ALL: [SectionField; 3] = [
        SectionField::Standard,
        SectionField::Source,
        SectionField::Relevance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionField::Standard => "Standard",
            SectionField::Source => "Source",
            SectionField::Relevance => "Relevance",
        }
    }
}

/// Markdown idioms recognised for a field label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionPattern {
    /// `**Field**: text`
    BoldColon,
    /// `**Field** text`
    BoldNoColon,
    /// `### Field` followed by the text on the next lines
    Heading,
    /// `- Field: text`
    BulletColon,
    /// `- **Field**: text`
    BulletBoldColon,
    /// `Field: text`
    PlainColon,
}

// A following line that opens another bold label, optionally bulleted.
// Bulleted matches are filtered by indentation in `SectionPattern::capture`.
const BOLD_TERMINATOR: &str = r"\n\s*(?:[-*•]\s*)?\*\*";
const HEADING_TERMINATOR: &str = r"\n\s*###";
const BULLET_TERMINATOR: &str = r"\n\s*-";
const LABEL_TERMINATOR: &str = r"\n\s*[A-Za-z]+:";

impl SectionPattern {
    pub const PRIORITY: [SectionPattern; 6] = [
        SectionPattern::BoldColon,
        SectionPattern::BoldNoColon,
        SectionPattern::Heading,
        SectionPattern::BulletColon,
        SectionPattern::BulletBoldColon,
        SectionPattern::PlainColon,
    ];

    fn is_bold(self) -> bool {
        matches!(self, SectionPattern::BoldColon | SectionPattern::BoldNoColon)
    }

    fn expressions(self, label: &str) -> (String, &'static str) {
        let label = regex::escape(label);
        match self {
            SectionPattern::BoldColon => (format!(r"\*\*{label}\*\*:\s*"), BOLD_TERMINATOR),
            SectionPattern::BoldNoColon => (format!(r"\*\*{label}\*\*\s+"), BOLD_TERMINATOR),
            SectionPattern::Heading => (format!(r"###\s*{label}\s*\n+"), HEADING_TERMINATOR),
            SectionPattern::BulletColon => (format!(r"-\s*{label}:\s*"), BULLET_TERMINATOR),
            SectionPattern::BulletBoldColon => {
                (format!(r"-\s*\*\*{label}\*\*:\s*"), BULLET_TERMINATOR)
            }
            SectionPattern::PlainColon => (format!(r"{label}:\s*"), LABEL_TERMINATOR),
        }
    }

    /// Raw text captured by this pattern for `field`, if the pattern matches
    pub fn capture<'a>(self, block: &'a str, field: SectionField) -> Option<&'a str> {
        let compiled = COMPILED_PATTERNS.get(&(field, self))?;

        for start in compiled.start.find_iter(block) {
            let rest = &block[start.end()..];
            let Some(first) = rest.chars().next() else {
                continue;
            };

            let label_indent = line_indent(block, start.start());
            let end = compiled
                .terminator
                .find_iter(&rest[first.len_utf8()..])
                .find(|m| !self.is_bold() || closes_bold_value(m.as_str(), label_indent))
                .map(|m| m.start() + first.len_utf8())
                .unwrap_or(rest.len());

            return Some(&rest[..end]);
        }

        None
    }
}

/// Leading whitespace width of the line containing byte offset `at`
fn line_indent(block: &str, at: usize) -> usize {
    let line_start = block[..at].rfind('\n').map_or(0, |i| i + 1);
    block[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count()
}

/// Whether a bold terminator match ends a value whose label sits at `label_indent`
fn closes_bold_value(terminator: &str, label_indent: usize) -> bool {
    let line = terminator.rsplit('\n').next().unwrap_or(terminator);
    let marker = line.trim_start();
    if marker.starts_with("**") {
        return true;
    }
    line.len() - marker.len() <= label_indent
}

struct CompiledPattern {
    start: Regex,
    terminator: Regex,
}

static COMPILED_PATTERNS: LazyLock<HashMap<(SectionField, SectionPattern), CompiledPattern>> =
    LazyLock::new(|| {
        let mut compiled = HashMap::new();
        for field in SectionField::ALL {
            for pattern in SectionPattern::PRIORITY {
                let (start, terminator) = pattern.expressions(field.label());
                compiled.insert(
                    (field, pattern),
                    CompiledPattern {
                        start: Regex::new(&start).unwrap(),
                        terminator: Regex::new(terminator).unwrap(),
                    },
                );
            }
        }
        compiled
    });

static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NUMBERED_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\s+").unwrap());
static CITATION_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());
static BOLD_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"- \*\*.*?\*\*:").unwrap());

static HEADING_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:###|##)\s*(.+)").unwrap());
static NUMBERED_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+(.+)").unwrap());
static FIRST_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+)").unwrap());
static MARKDOWN_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[#\-*]+\s*").unwrap());

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:###|##)\s*.+(?:\n|$)").unwrap());
static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+.+(?:\n|$)").unwrap());

/// Extract a field from a block, or an empty string when no pattern matches
pub fn extract_section(block: &str, field: SectionField) -> String {
    SectionPattern::PRIORITY
        .iter()
        .find_map(|pattern| pattern.capture(block, field))
        .map(clean_section_text)
        .unwrap_or_default()
}

/// Flatten captured text to a single line without list, bold or citation markup
pub fn clean_section_text(raw: &str) -> String {
    let text = raw.replace('\n', " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = text.replace("- ", "").replace("**", "").replace('•', "");
    let text = NUMBERED_MARKER.replace_all(&text, "");
    let text = CITATION_MARKER.replace_all(&text, "");
    WHITESPACE_RUN.replace_all(text.trim(), " ").to_string()
}

/// Title of a block: heading text, numbered item text, first line, or `Criterion {n}`
///
/// `index` is the zero-based block position; the synthetic title is 1-based.
pub fn extract_title(block: &str, index: usize) -> String {
    if let Some(caps) = HEADING_TITLE.captures(block) {
        return caps[1].trim().to_string();
    }

    if let Some(caps) = NUMBERED_TITLE.captures(block) {
        return caps[1].trim().to_string();
    }

    if let Some(caps) = FIRST_LINE.captures(block) {
        let title = MARKDOWN_PREFIX.replace(&caps[1], "").trim().to_string();
        if !title.is_empty() {
            return title;
        }
    }

    format!("Criterion {}", index + 1)
}

/// Block body as a single prose paragraph
///
/// Used as the description when a block has no `Standard` field: the heading or
/// numbered title line and bold field labels are dropped and lines are joined.
pub fn prose_description(block: &str) -> String {
    let text = HEADING_LINE.replace(block, "");
    let text = NUMBERED_LINE.replace(&text, "");
    let text = BOLD_LABEL.replace_all(&text, "");
    let text = text.replace("**", "").replace("- ", "").replace('•', "");
    let text = NUMBERED_MARKER.replace_all(&text, "");
    let text = CITATION_MARKER.replace_all(&text, "");

    let text = NEWLINES.replace_all(text.trim(), " ");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

//! Splitting of research output into candidate criterion blocks
//!
//! Three strategies are tried in order and the first one that yields more than one
//! block wins:
//! 1. split before every level-2/level-3 markdown heading
//! 2. split before every numbered list item (`1. Title`)
//! 3. split on blank lines between paragraphs
//!
//! This is a best-effort heuristic. The research API is asked for a fixed layout but
//! does not always follow it, and none of the strategies is guaranteed to line up with
//! the criteria the model meant to emit. Callers must tolerate blocks that are not
//! criteria at all (preambles, notes, source lists).

use std::sync::LazyLock;

use regex::Regex;

// `###` is tried first so a level-3 heading is a single split point rather than
// also matching the `## ` inside it.
static HEADING_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"###|##\s+[^#]").unwrap());

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s+[A-Z]").unwrap());

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Which strategy produced the blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStrategy {
    Headings,
    NumberedList,
    Paragraphs,
}

/// Split content into trimmed, non-empty blocks
pub fn segment_blocks(content: &str) -> (SegmentStrategy, Vec<&str>) {
    let blocks = split_before(content, &HEADING_START);
    if blocks.len() > 1 {
        return (SegmentStrategy::Headings, blocks);
    }

    if NUMBERED_ITEM.is_match(content) {
        let blocks = split_before(content, &NUMBERED_ITEM);
        if blocks.len() > 1 {
            return (SegmentStrategy::NumberedList, blocks);
        }
    }

    let blocks = PARAGRAPH_BREAK
        .split(content)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();
    (SegmentStrategy::Paragraphs, blocks)
}

/// Split immediately before the start of every match of `marker`
fn split_before<'a>(content: &'a str, marker: &Regex) -> Vec<&'a str> {
    let mut blocks = Vec::new();
    let mut start = 0;

    for m in marker.find_iter(content) {
        if m.start() > start {
            blocks.push(&content[start..m.start()]);
        }
        start = m.start();
    }
    blocks.push(&content[start..]);

    blocks
        .into_iter()
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

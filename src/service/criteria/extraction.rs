//! Conversion of sanitized research output into structured criteria
//!
//! Parsing never fails: blocks that do not look like criteria are skipped, and when
//! nothing usable remains the whole content is returned as a single criterion so
//! there is always something to display.

use crate::model::Criterion;
use crate::model::criteria::{DEFAULT_RELEVANCE, FALLBACK_TITLE};

use super::citations::match_citation;
use super::sections::{SectionField, extract_section, extract_title, prose_description};
use super::segment::segment_blocks;

/// Blocks shorter than this are never criteria
const MIN_BLOCK_LEN: usize = 20;

/// Leading text of blocks that hold notes or source lists rather than criteria
const SKIPPED_PREFIXES: &[&str] = &["Note:", "Sources:"];

/// Parse criteria from sanitized content
pub fn parse_criteria(content: &str, citations: &[String]) -> Vec<Criterion> {
    let (strategy, blocks) = segment_blocks(content);
    tracing::debug!(
        strategy = ?strategy,
        block_count = blocks.len(),
        "Segmented research output"
    );

    let criteria: Vec<Criterion> = blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| parse_block(block, index, citations))
        .collect();

    if criteria.is_empty() && !content.is_empty() {
        tracing::debug!(
            block_count = blocks.len(),
            "No structured criteria found, using whole content"
        );
        return vec![fallback_criterion(content, citations)];
    }

    criteria
}

/// Whether a block is too short or is a note/sources section
pub fn is_skipped_block(block: &str) -> bool {
    block.chars().count() < MIN_BLOCK_LEN
        || SKIPPED_PREFIXES.iter().any(|prefix| block.starts_with(prefix))
}

/// Parse one block; `index` is its position among all segmented blocks
fn parse_block(block: &str, index: usize, citations: &[String]) -> Option<Criterion> {
    if is_skipped_block(block) {
        return None;
    }

    let title = extract_title(block, index);
    let standard = extract_section(block, SectionField::Standard);
    let source = extract_section(block, SectionField::Source);
    let relevance = extract_section(block, SectionField::Relevance);

    let description = if standard.is_empty() {
        prose_description(block)
    } else {
        standard
    };

    if title.is_empty() || description.is_empty() {
        return None;
    }

    Some(Criterion {
        title,
        description,
        source: match_citation(&source, citations, index).map(String::from),
        relevance: if relevance.is_empty() {
            DEFAULT_RELEVANCE.to_string()
        } else {
            relevance
        },
    })
}

/// Single criterion wrapping the whole content
fn fallback_criterion(content: &str, citations: &[String]) -> Criterion {
    Criterion {
        title: FALLBACK_TITLE.to_string(),
        description: content
            .split('\n')
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string(),
        source: citations.first().cloned(),
        relevance: DEFAULT_RELEVANCE.to_string(),
    }
}

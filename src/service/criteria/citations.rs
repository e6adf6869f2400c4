//! Association of extracted criteria with citation URLs
//!
//! The research API returns a flat list of URLs with no link to the criteria in its
//! answer. The association here is an approximation: a citation is picked when its
//! URL contains a longer word from the criterion's `Source` text, and otherwise the
//! citation at the block's own position is assumed to belong to it. Keyword overlap
//! with a URL is weak evidence and the positional fallback is a guess.

/// Words ignored when building keywords from a source description
const STOPWORDS: &[&str] = &[
    "from",
    "this",
    "that",
    "with",
    "based",
    "according",
    "such",
    "these",
    "those",
    "their",
    "other",
];

/// Minimum keyword length (exclusive)
const MIN_KEYWORD_LEN: usize = 4;

/// Lowercased words of `source` longer than four characters, stopwords excluded
pub fn source_keywords(source: &str) -> Vec<String> {
    source
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_KEYWORD_LEN)
        .filter(|word| !STOPWORDS.contains(word))
        .map(String::from)
        .collect()
}

/// Pick a citation for the criterion extracted from block `block_index`
///
/// 1. the first citation whose URL contains any keyword of `source` (case-insensitive)
/// 2. otherwise the citation at `block_index`, when the list is long enough
/// 3. otherwise none
pub fn match_citation<'a>(
    source: &str,
    citations: &'a [String],
    block_index: usize,
) -> Option<&'a str> {
    if !source.is_empty() && !citations.is_empty() {
        let keywords = source_keywords(source);
        let matched = citations.iter().find(|citation| {
            let citation = citation.to_lowercase();
            keywords.iter().any(|keyword| citation.contains(keyword.as_str()))
        });

        if let Some(citation) = matched {
            return Some(citation.as_str());
        }
    }

    citations.get(block_index).map(String::as_str)
}

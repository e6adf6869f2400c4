//! Removal of model reasoning blocks from research output

use std::sync::LazyLock;

use regex::Regex;

static THINKING_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

/// Strip every `<think>...</think>` block (shortest match, spanning lines) and trim
pub fn remove_thinking_content(content: &str) -> String {
    THINKING_BLOCK.replace_all(content, "").trim().to_string()
}

//! Ranking extraction from free-form judge replies
//!
//! Judges are asked to reply with an ordered list, but models drift:
//! prose preambles, markdown bullets, restated labels. The extraction
//! rule is deliberately tolerant: scan the reply for label tokens in
//! the order they appear, deduplicate, and keep only labels that exist
//! in the deliberation's mapping. Pure text logic, no I/O.

use super::labels::Label;

/// Extract an ordered label preference from a judge's reply.
///
/// Returns the labels in first-mention order, deduplicated, restricted
/// to `known` labels. An empty result means the reply is unusable and
/// the caller should record a parse failure with the raw text kept.
///
/// # Examples
///
/// ```
/// use council_domain::{Label, extract_ranked_labels};
///
/// let known = vec![Label::from_index(0), Label::from_index(1)];
/// let reply = "Best is Response B, then Response A. Response B wins.";
/// let ranked = extract_ranked_labels(reply, &known);
/// assert_eq!(ranked, vec![Label::from_index(1), Label::from_index(0)]);
/// ```
pub fn extract_ranked_labels(text: &str, known: &[Label]) -> Vec<Label> {
    let mut ranked: Vec<(usize, Label)> = Vec::new();

    for label in known {
        if let Some(pos) = first_token_match(text, label.as_str()) {
            ranked.push((pos, label.clone()));
        }
    }

    // First-mention order decides the preference
    ranked.sort_by_key(|(pos, _)| *pos);
    ranked.into_iter().map(|(_, label)| label).collect()
}

/// Byte offset of the first occurrence of `token` that is not part of a
/// longer label (e.g. "Response A" must not match inside "Response AB").
fn first_token_match(text: &str, token: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(token) {
        let pos = search_from + rel;
        let after = text[pos + token.len()..].chars().next();
        if !after.is_some_and(|c| c.is_ascii_alphanumeric()) {
            return Some(pos);
        }
        search_from = pos + token.len();
    }
    None
}

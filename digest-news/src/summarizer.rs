//! Extractive summarization by lexical centrality
//!
//! Ranks sentences by centrality in a cosine-similarity graph (LexRank) and
//! emits the top-ranked sentences in their original order. Summarization
//! never fails: degenerate inputs fall back to a sentinel, the whole text,
//! or a truncated prefix.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Sentinel returned for empty input
pub const NO_SUMMARY: &str = "No summary available.";

/// Default number of sentences in a summary
const SUMMARY_SENTENCES: usize = 3;
/// Fallback prefix length when ranking yields nothing
const FALLBACK_PREFIX_CHARS: usize = 300;
/// Minimum cosine similarity for a graph edge
const SIMILARITY_THRESHOLD: f64 = 0.1;
/// Damping factor for the centrality power iteration
const DAMPING: f64 = 0.85;
/// Power iteration rounds (plenty for digest-sized articles)
const POWER_ITERATIONS: usize = 30;

/// Common English words excluded from similarity scoring
const STOP_WORDS: [&str; 32] = [
    "the", "and", "for", "that", "this", "with", "from", "says", "said", "will", "would", "could",
    "about", "after", "into", "over", "more", "than", "been", "have", "were", "what", "when",
    "where", "which", "their", "there", "these", "those", "some", "just", "also",
];

/// Extractive sentence summarizer
#[derive(Debug, Clone)]
pub struct Summarizer {
    sentence_count: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(SUMMARY_SENTENCES)
    }
}

impl Summarizer {
    /// Create a summarizer producing up to `sentence_count` sentences
    pub fn new(sentence_count: usize) -> Self {
        Self { sentence_count }
    }

    /// Summarize article body text
    ///
    /// - Empty or whitespace-only input returns [`NO_SUMMARY`]
    /// - Text with at most `sentence_count` sentences is returned whole
    /// - If ranking yields nothing usable, falls back to a truncated prefix
    pub fn summarize(&self, text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return NO_SUMMARY.to_string();
        }

        let sentences = split_sentences(trimmed);
        if sentences.len() <= self.sentence_count {
            return trimmed.to_string();
        }

        let scores = lexical_centrality(&sentences);

        let mut ranked: Vec<usize> = (0..sentences.len()).collect();
        ranked.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

        let mut picked: Vec<usize> = ranked.into_iter().take(self.sentence_count).collect();
        picked.sort_unstable();

        let summary = picked
            .iter()
            .map(|&i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if summary.trim().is_empty() {
            truncated_prefix(trimmed)
        } else {
            summary
        }
    }
}

/// Split text into sentences on terminators followed by whitespace
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_none_or(|next| next.is_whitespace()) {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Centrality score per sentence via damped power iteration over the
/// similarity graph
fn lexical_centrality(sentences: &[String]) -> Vec<f64> {
    let n = sentences.len();
    let vectors: Vec<HashMap<String, f64>> =
        sentences.iter().map(|s| term_frequencies(s)).collect();

    let mut adjacency = vec![vec![false; n]; n];
    let mut degree = vec![0.0_f64; n];
    for i in 0..n {
        for j in 0..n {
            if i != j && cosine_similarity(&vectors[i], &vectors[j]) >= SIMILARITY_THRESHOLD {
                adjacency[i][j] = true;
                degree[i] += 1.0;
            }
        }
    }

    let uniform = 1.0 / n as f64;
    let mut scores = vec![uniform; n];
    for _ in 0..POWER_ITERATIONS {
        let mut next = vec![(1.0 - DAMPING) * uniform; n];
        for i in 0..n {
            if degree[i] == 0.0 {
                // Dangling sentence: spread its mass uniformly
                for score in next.iter_mut() {
                    *score += DAMPING * scores[i] * uniform;
                }
                continue;
            }
            for j in 0..n {
                if adjacency[i][j] {
                    next[j] += DAMPING * scores[i] / degree[i];
                }
            }
        }
        scores = next;
    }

    scores
}

/// Term-frequency vector over lowercased, stop-word-filtered tokens
fn term_frequencies(sentence: &str) -> HashMap<String, f64> {
    let mut frequencies = HashMap::new();
    for token in sentence
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .filter(|w| !STOP_WORDS.contains(w))
    {
        *frequencies.entry(token.to_string()).or_insert(0.0) += 1.0;
    }
    frequencies
}

/// Cosine similarity between two term-frequency vectors
fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|other| weight * other))
        .sum();
    if dot == 0.0 {
        return 0.0;
    }

    let norm_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();
    dot / (norm_a * norm_b)
}

/// First `FALLBACK_PREFIX_CHARS` characters of the text plus an ellipsis
fn truncated_prefix(text: &str) -> String {
    let prefix: String = text.chars().take(FALLBACK_PREFIX_CHARS).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_returns_sentinel() {
        let summarizer = Summarizer::default();
        assert_eq!(summarizer.summarize(""), NO_SUMMARY);
        assert_eq!(summarizer.summarize("   \n\t  "), NO_SUMMARY);
    }

    #[test]
    fn test_short_text_returned_whole() {
        let summarizer = Summarizer::default();
        let text = "The rover landed safely. Engineers celebrated the landing.";
        assert_eq!(summarizer.summarize(text), text);
    }

    #[test]
    fn test_short_text_is_trimmed() {
        let summarizer = Summarizer::default();
        assert_eq!(summarizer.summarize("  One sentence only.  "), "One sentence only.");
    }

    #[test]
    fn test_summary_has_configured_sentence_count() {
        let summarizer = Summarizer::new(2);
        let text = "The launch vehicle reached orbit after a flawless countdown. \
                    Mission control confirmed the launch vehicle deployed its payload in orbit. \
                    The payload will study solar wind from orbit. \
                    Ticket prices for the viewing area doubled overnight. \
                    Local vendors sold commemorative mugs near the gate.";

        let summary = summarizer.summarize(text);
        assert_eq!(summary.matches('.').count(), 2);
        assert!(summary.len() < text.len());
    }

    #[test]
    fn test_summary_preserves_original_order() {
        let summarizer = Summarizer::new(2);
        let text = "Markets rallied after the announcement. \
                    The central bank held rates steady in its announcement. \
                    Analysts expect the bank to revisit rates next quarter. \
                    A street fair closed two blocks downtown. \
                    Traders said the rally in markets may continue.";

        let summary = summarizer.summarize(text);
        let sentences = split_sentences(&summary);
        assert_eq!(sentences.len(), 2);

        let first = text.find(sentences[0].as_str()).unwrap();
        let second = text.find(sentences[1].as_str()).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_split_sentences_handles_decimals() {
        let sentences = split_sentences("Growth hit 3.5 percent this year. Forecasts vary.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Growth hit 3.5 percent this year.");
    }

    #[test]
    fn test_split_sentences_keeps_unterminated_tail() {
        let sentences = split_sentences("First part here. Trailing fragment without a period");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1], "Trailing fragment without a period");
    }

    #[test]
    fn test_truncated_prefix_is_char_boundary_safe() {
        let text = "é".repeat(400);
        let prefix = truncated_prefix(&text);
        assert!(prefix.ends_with("..."));
        assert_eq!(prefix.chars().count(), FALLBACK_PREFIX_CHARS + 3);
    }

    #[test]
    fn test_summarize_never_panics_on_odd_input() {
        let summarizer = Summarizer::default();
        // No panic expected on punctuation-only or symbol-heavy input
        summarizer.summarize("... !!! ???");
        summarizer.summarize("<p></p> <div></div> <br/> <hr/>");
        summarizer.summarize(&"word ".repeat(5000));
    }
}

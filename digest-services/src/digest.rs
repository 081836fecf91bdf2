//! Digest composition
//!
//! Deterministically turns the fetched article list into the plain-text
//! email body and subject for one run.

use chrono::NaiveDate;

use digest_core::{Article, Digest};

/// Compose the digest for one run
///
/// The body holds one numbered `Title\nURL` entry per article, in encounter
/// order, with no deduplication across topics. The subject embeds the
/// capitalized topic list and the send date.
pub fn compose(articles: &[Article], topics: &[String], sent_on: NaiveDate) -> Digest {
    let mut body = String::new();
    for (idx, article) in articles.iter().enumerate() {
        body.push_str(&format!(
            "{}. {}\n{}\n\n",
            idx + 1,
            article.title,
            article.url
        ));
    }

    let topic_list = topics
        .iter()
        .map(|t| capitalize(t.trim()))
        .collect::<Vec<_>>()
        .join(", ");
    let subject = format!(
        "Yesterday's News on {} - {}",
        topic_list,
        sent_on.format("%d %b %Y")
    );

    Digest { subject, body }
}

/// First letter uppercased, rest lowercased
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

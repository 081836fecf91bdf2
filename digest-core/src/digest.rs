//! Composed digest for one pipeline run

use serde::{Deserialize, Serialize};

/// A composed daily digest
///
/// Transient: built once per run, sent to every subscriber with identical
/// subject and body, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    /// Email subject line
    pub subject: String,
    /// Plain-text email body
    pub body: String,
}

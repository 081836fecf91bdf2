//! Article fetching and summarization for the daily digest
//!
//! This crate provides:
//! - `ExaClient`: keyword news search against the Exa.ai API, one query per
//!   topic constrained to a date window
//! - `Summarizer`: extractive summarization by lexical centrality over a
//!   sentence similarity graph, with fallbacks that never fail

pub mod error;
pub mod exa;
pub mod summarizer;
pub mod types;

pub use error::NewsError;
pub use exa::ExaClient;
pub use summarizer::{Summarizer, NO_SUMMARY};

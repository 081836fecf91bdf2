//! Core types for the Daily News Digest
//!
//! This crate defines the shared data structures used across the digest
//! service, including subscribers, fetched articles and the composed digest.

pub mod article;
pub mod digest;
pub mod subscriber;

pub use article::{Article, DateWindow};
pub use digest::Digest;
pub use subscriber::{normalize_email, Subscriber};

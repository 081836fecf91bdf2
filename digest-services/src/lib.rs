//! Business logic services for the Daily News Digest
//!
//! This crate provides the service layer that ties the subscriber store,
//! article fetching, summarization, composition and delivery together.

pub mod config;
pub mod digest;
pub mod mailer;
pub mod pipeline;
pub mod scheduler;
pub mod subscriber_store;

pub use config::{ConfigError, DigestConfig};
pub use digest::compose;
pub use mailer::{MailError, Mailer};
pub use pipeline::{DigestPipeline, PipelineError, RunOutcome};
pub use scheduler::DigestScheduler;
pub use subscriber_store::{SubscriberStore, SubscriberStoreError};

//! Digest Pipeline
//!
//! One digest cycle: read subscribers, fetch articles per topic for the
//! previous day, summarize, compose, send. Fetch and send problems degrade
//! per-topic / per-recipient; only subscriber store failures are errors.

use std::sync::Arc;

use chrono::{Local, Utc};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{info, instrument, warn};

use digest_core::{Article, DateWindow, Subscriber};
use digest_news::{ExaClient, Summarizer};

use crate::digest::compose;
use crate::mailer::Mailer;
use crate::subscriber_store::{SubscriberStore, SubscriberStoreError};

/// The daily digest pipeline
pub struct DigestPipeline<T = AsyncSmtpTransport<Tokio1Executor>> {
    exa: ExaClient,
    summarizer: Summarizer,
    mailer: Mailer<T>,
    store: Arc<SubscriberStore>,
    topics: Vec<String>,
}

/// How a digest run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Digest composed and sent
    Sent {
        /// Number of successful sends
        recipients: usize,
        /// Number of articles in the digest
        articles: usize,
    },
    /// Run skipped: nobody to send to
    NoSubscribers,
    /// Run skipped: nothing fetched for any topic
    NoArticles,
}

/// Errors that abort a digest run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Subscriber store error: {0}")]
    Store(#[from] SubscriberStoreError),
}

impl<T> DigestPipeline<T>
where
    T: AsyncTransport + Sync + Send,
    T::Error: std::fmt::Display,
{
    /// Create a new pipeline
    pub fn new(
        exa: ExaClient,
        summarizer: Summarizer,
        mailer: Mailer<T>,
        store: Arc<SubscriberStore>,
        topics: Vec<String>,
    ) -> Self {
        Self {
            exa,
            summarizer,
            mailer,
            store,
            topics,
        }
    }

    /// Execute one digest cycle
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RunOutcome, PipelineError> {
        let subscribers = self.store.all()?;
        if subscribers.is_empty() {
            info!("No subscribers, skipping digest run");
            return Ok(RunOutcome::NoSubscribers);
        }

        let window = DateWindow::previous_day(Utc::now());
        let articles = self.fetch_articles(&window).await;
        if articles.is_empty() {
            info!("No articles found for yesterday, skipping digest run");
            return Ok(RunOutcome::NoArticles);
        }

        Ok(self.deliver(&articles, &subscribers).await)
    }

    /// Fetch and summarize articles for every topic, best effort
    ///
    /// A failing topic is logged and contributes zero articles; the
    /// remaining topics are still fetched.
    async fn fetch_articles(&self, window: &DateWindow) -> Vec<Article> {
        let mut all_articles = Vec::new();

        for topic in &self.topics {
            match self.exa.search_topic(topic, window).await {
                Ok(mut articles) => {
                    for article in &mut articles {
                        article.summary = self.summarizer.summarize(&article.text);
                    }
                    all_articles.append(&mut articles);
                }
                Err(e) => warn!("Error fetching articles for topic '{}': {}", topic, e),
            }
        }

        all_articles
    }

    /// Compose the digest for the fetched articles and send it out
    async fn deliver(&self, articles: &[Article], subscribers: &[Subscriber]) -> RunOutcome {
        let digest = compose(articles, &self.topics, Local::now().date_naive());
        let recipients = self.mailer.send_digest(&digest, subscribers).await;

        RunOutcome::Sent {
            recipients,
            articles: articles.len(),
        }
    }
}

//! Digest Scheduler
//!
//! Cancellable periodic task that fires the digest pipeline once per day at
//! the configured local wall-clock time. The loop polls every 60 seconds;
//! `stop` flips a watch channel and the loop exits.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{error, info};

use crate::pipeline::DigestPipeline;

/// How often the schedule loop checks the clock
const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Daily schedule loop around the digest pipeline
pub struct DigestScheduler<T = AsyncSmtpTransport<Tokio1Executor>> {
    pipeline: Arc<DigestPipeline<T>>,
    send_time: NaiveTime,
    shutdown: watch::Sender<bool>,
}

impl<T> DigestScheduler<T>
where
    T: AsyncTransport + Sync + Send,
    T::Error: std::fmt::Display,
{
    /// Create a scheduler firing daily at `send_time`
    pub fn new(pipeline: Arc<DigestPipeline<T>>, send_time: NaiveTime) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            pipeline,
            send_time,
            shutdown,
        }
    }

    /// Run the schedule loop until [`stop`](Self::stop) is called
    ///
    /// Runs the pipeline inline on this task, strictly sequentially. When
    /// the process starts after today's send time has already passed, the
    /// first run happens tomorrow.
    pub async fn run(self: Arc<Self>) {
        info!(
            "Scheduler started, digest will be sent daily at {}",
            self.send_time.format("%H:%M")
        );

        let mut shutdown_rx = self.shutdown.subscribe();
        let mut ticker = interval(POLL_INTERVAL);

        let startup = Local::now().naive_local();
        let mut last_run: Option<NaiveDate> = if startup.time() >= self.send_time {
            Some(startup.date())
        } else {
            None
        };

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Local::now().naive_local();
                    if is_due(now, self.send_time, last_run) {
                        last_run = Some(now.date());
                        match self.pipeline.run().await {
                            Ok(outcome) => info!("Digest run finished: {:?}", outcome),
                            Err(e) => error!("Digest run failed: {}", e),
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    info!("Scheduler stopped");
                    break;
                }
            }
        }
    }

    /// Signal the schedule loop to exit
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }
}

/// Whether a run is due: the wall clock has reached the send time and no
/// run has happened today. A missed minute still fires on the next poll.
fn is_due(now: NaiveDateTime, send_time: NaiveTime, last_run: Option<NaiveDate>) -> bool {
    now.time() >= send_time && last_run != Some(now.date())
}

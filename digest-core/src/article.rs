//! Article data structures for the daily digest pipeline

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article fetched for one digest run
///
/// Articles are transient: they exist only within a single pipeline run and
/// are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Article title (`"No Title"` when the search API omits it)
    pub title: String,
    /// Article URL (`"#"` when the search API omits it)
    pub url: String,
    /// Raw body text as returned by the search API, possibly with HTML tags
    pub text: String,
    /// Topic the article was fetched for
    pub topic: String,
    /// Extractive summary, filled in after fetch
    pub summary: String,
}

/// An inclusive UTC time window for article search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Window start
    pub start: DateTime<Utc>,
    /// Window end
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// The previous calendar day relative to `now`: 00:00:00 through 23:59:59
    pub fn previous_day(now: DateTime<Utc>) -> Self {
        let day = now.date_naive() - Duration::days(1);
        let midnight = day.and_time(NaiveTime::MIN);
        Self {
            start: midnight.and_utc(),
            end: (midnight + Duration::seconds(86_399)).and_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_previous_day_window() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 8, 30, 0).unwrap();
        let window = DateWindow::previous_day(now);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 3, 9, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_previous_day_crosses_month_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 5, 0).unwrap();
        let window = DateWindow::previous_day(now);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap());
    }
}

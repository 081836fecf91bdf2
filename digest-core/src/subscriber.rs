//! Subscriber data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A digest subscriber
///
/// The normalized email address is the unique key; there is at most one
/// subscriber per normalized address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    /// Normalized email address
    pub email: String,
    /// When the subscription was created
    pub subscribed_on: DateTime<Utc>,
}

/// Normalize an email address for storage and lookup
///
/// Subscribe and unsubscribe are case- and whitespace-insensitive:
/// `" A@B.com "` and `"a@b.com"` refer to the same subscriber.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" A@B.com "), "a@b.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
        assert_eq!(normalize_email("\tUser@Example.COM\n"), "user@example.com");
    }
}

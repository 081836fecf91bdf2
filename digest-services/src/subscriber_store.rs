//! Subscriber Store
//!
//! SQLite-backed persistent set of subscriber email addresses, keyed by
//! normalized email.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use digest_core::{normalize_email, Subscriber};

/// Subscriber storage using SQLite
pub struct SubscriberStore {
    conn: Mutex<Connection>,
}

impl SubscriberStore {
    /// Create a new SubscriberStore instance
    ///
    /// Creates the database file and tables if they don't exist.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, SubscriberStoreError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SubscriberStoreError::Io(format!("Failed to create database directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path).map_err(SubscriberStoreError::Database)?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Create an in-memory SubscriberStore (useful for testing)
    pub fn new_in_memory() -> Result<Self, SubscriberStoreError> {
        let conn = Connection::open_in_memory().map_err(SubscriberStoreError::Database)?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<(), SubscriberStoreError> {
        let conn = self.conn.lock().map_err(|_| SubscriberStoreError::LockError)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS subscribers (
                email TEXT PRIMARY KEY,
                subscribed_on INTEGER NOT NULL
            );
            "#,
        )
        .map_err(SubscriberStoreError::Database)?;

        Ok(())
    }

    /// Subscribe an email address
    ///
    /// The address is normalized before insertion. Subscribing an address
    /// that is already present fails with [`SubscriberStoreError::AlreadySubscribed`].
    pub fn subscribe(&self, email: &str) -> Result<Subscriber, SubscriberStoreError> {
        let email = normalize_email(email);
        let conn = self.conn.lock().map_err(|_| SubscriberStoreError::LockError)?;

        let existing: Option<String> = conn
            .query_row(
                "SELECT email FROM subscribers WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()
            .map_err(SubscriberStoreError::Database)?;

        if existing.is_some() {
            return Err(SubscriberStoreError::AlreadySubscribed(email));
        }

        let subscribed_on = Utc::now();
        conn.execute(
            "INSERT INTO subscribers (email, subscribed_on) VALUES (?1, ?2)",
            params![email, subscribed_on.timestamp()],
        )
        .map_err(SubscriberStoreError::Database)?;

        Ok(Subscriber {
            email,
            subscribed_on,
        })
    }

    /// Unsubscribe an email address
    ///
    /// The address is normalized before deletion. Unsubscribing an address
    /// that is not present fails with [`SubscriberStoreError::NotSubscribed`].
    pub fn unsubscribe(&self, email: &str) -> Result<(), SubscriberStoreError> {
        let email = normalize_email(email);
        let conn = self.conn.lock().map_err(|_| SubscriberStoreError::LockError)?;

        let deleted = conn
            .execute("DELETE FROM subscribers WHERE email = ?1", params![email])
            .map_err(SubscriberStoreError::Database)?;

        if deleted == 0 {
            return Err(SubscriberStoreError::NotSubscribed(email));
        }

        Ok(())
    }

    /// Get all subscribers, oldest subscription first
    pub fn all(&self) -> Result<Vec<Subscriber>, SubscriberStoreError> {
        let conn = self.conn.lock().map_err(|_| SubscriberStoreError::LockError)?;

        let mut stmt = conn
            .prepare("SELECT email, subscribed_on FROM subscribers ORDER BY subscribed_on ASC")
            .map_err(SubscriberStoreError::Database)?;

        let subscribers = stmt
            .query_map([], |row| {
                let email: String = row.get(0)?;
                let subscribed_on: i64 = row.get(1)?;
                Ok((email, subscribed_on))
            })
            .map_err(SubscriberStoreError::Database)?
            .filter_map(|r| r.ok())
            .map(|(email, subscribed_on)| Subscriber {
                email,
                subscribed_on: DateTime::from_timestamp(subscribed_on, 0).unwrap_or_else(Utc::now),
            })
            .collect();

        Ok(subscribers)
    }

    /// Number of subscribers
    pub fn count(&self) -> Result<usize, SubscriberStoreError> {
        let conn = self.conn.lock().map_err(|_| SubscriberStoreError::LockError)?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM subscribers", [], |row| row.get(0))
            .map_err(SubscriberStoreError::Database)?;

        Ok(count as usize)
    }
}

/// Errors that can occur during subscriber store operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberStoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to acquire lock")]
    LockError,

    #[error("Email already subscribed: {0}")]
    AlreadySubscribed(String),

    #[error("Email not found in subscribers: {0}")]
    NotSubscribed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_then_duplicate_conflicts() {
        let store = SubscriberStore::new_in_memory().unwrap();

        let subscriber = store.subscribe("user@example.com").unwrap();
        assert_eq!(subscriber.email, "user@example.com");

        let err = store.subscribe("user@example.com").unwrap_err();
        assert!(matches!(err, SubscriberStoreError::AlreadySubscribed(_)));
    }

    #[test]
    fn test_subscribe_normalizes_case_and_whitespace() {
        let store = SubscriberStore::new_in_memory().unwrap();

        store.subscribe(" A@B.com ").unwrap();
        let err = store.subscribe("a@b.com").unwrap_err();
        assert!(matches!(err, SubscriberStoreError::AlreadySubscribed(_)));

        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email, "a@b.com");
    }

    #[test]
    fn test_unsubscribe_missing_is_not_found() {
        let store = SubscriberStore::new_in_memory().unwrap();

        let err = store.unsubscribe("ghost@example.com").unwrap_err();
        assert!(matches!(err, SubscriberStoreError::NotSubscribed(_)));
    }

    #[test]
    fn test_unsubscribe_removes_subscriber() {
        let store = SubscriberStore::new_in_memory().unwrap();

        store.subscribe("user@example.com").unwrap();
        store.unsubscribe(" USER@example.com ").unwrap();

        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_all_returns_every_subscriber() {
        let store = SubscriberStore::new_in_memory().unwrap();

        store.subscribe("first@example.com").unwrap();
        store.subscribe("second@example.com").unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(store.count().unwrap(), 2);
    }
}

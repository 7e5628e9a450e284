//! Process-lifetime in-memory storage.
//!
//! Repositories live for the process and reset on restart. Handlers only
//! see the traits, so a persistent backend can be swapped in behind them.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;

/// A waitlist signup.
#[derive(Debug, Clone, Serialize)]
pub struct Subscriber {
    pub id: u32,
    pub email: String,
}

/// A recorded extraction search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRecord {
    pub id: u32,
    pub query: String,
    pub start: u16,
    pub end: u16,
}

/// Append/find-by-key repository over waitlist subscribers.
pub trait WaitlistRepo {
    /// Append a new subscriber; `None` when the email is already present.
    fn add_subscriber(&self, email: &str) -> Option<Subscriber>;
    fn find_subscriber(&self, email: &str) -> Option<Subscriber>;
}

/// Append-only log of searches.
pub trait SearchRepo {
    fn record_search(&self, query: &str, start: u16, end: u16) -> SearchRecord;
    fn search_count(&self) -> usize;
}

/// In-memory implementation backing the HTTP handlers.
pub struct MemStorage {
    next_id: AtomicU32,
    /// Keyed by normalized (trimmed, lowercased) email.
    subscribers: DashMap<String, Subscriber>,
    searches: DashMap<u32, SearchRecord>,
}

impl MemStorage {
    pub fn new() -> Self {
        MemStorage {
            next_id: AtomicU32::new(1),
            subscribers: DashMap::new(),
            searches: DashMap::new(),
        }
    }

    fn next_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl WaitlistRepo for MemStorage {
    fn add_subscriber(&self, email: &str) -> Option<Subscriber> {
        match self.subscribers.entry(normalize_email(email)) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let subscriber = Subscriber {
                    id: self.next_id(),
                    email: email.trim().to_string(),
                };
                slot.insert(subscriber.clone());
                Some(subscriber)
            }
        }
    }

    fn find_subscriber(&self, email: &str) -> Option<Subscriber> {
        self.subscribers
            .get(&normalize_email(email))
            .map(|entry| entry.clone())
    }
}

impl SearchRepo for MemStorage {
    fn record_search(&self, query: &str, start: u16, end: u16) -> SearchRecord {
        let record = SearchRecord {
            id: self.next_id(),
            query: query.to_string(),
            start,
            end,
        };
        self.searches.insert(record.id, record.clone());
        record
    }

    fn search_count(&self) -> usize {
        self.searches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_subscriber_then_find() {
        let storage = MemStorage::new();
        let sub = storage.add_subscriber("alex@example.com").unwrap();
        assert_eq!(sub.email, "alex@example.com");
        let found = storage.find_subscriber("alex@example.com").unwrap();
        assert_eq!(found.id, sub.id);
    }

    #[test]
    fn test_add_subscriber_duplicate_rejected() {
        let storage = MemStorage::new();
        assert!(storage.add_subscriber("alex@example.com").is_some());
        assert!(storage.add_subscriber("alex@example.com").is_none());
    }

    #[test]
    fn test_add_subscriber_duplicate_detection_normalizes() {
        let storage = MemStorage::new();
        assert!(storage.add_subscriber("alex@example.com").is_some());
        assert!(storage.add_subscriber("  ALEX@Example.COM ").is_none());
    }

    #[test]
    fn test_find_subscriber_missing() {
        let storage = MemStorage::new();
        assert!(storage.find_subscriber("nobody@example.com").is_none());
    }

    #[test]
    fn test_record_search_increments() {
        let storage = MemStorage::new();
        assert_eq!(storage.search_count(), 0);
        let rec = storage.record_search("Delhi", 1850, 2025);
        assert_eq!(rec.query, "Delhi");
        assert_eq!(storage.search_count(), 1);
        storage.record_search("Bombay", 1800, 1900);
        assert_eq!(storage.search_count(), 2);
    }

    #[test]
    fn test_ids_unique_across_repos() {
        let storage = MemStorage::new();
        let sub = storage.add_subscriber("a@example.com").unwrap();
        let rec = storage.record_search("q", 1850, 2025);
        assert_ne!(sub.id, rec.id);
    }
}

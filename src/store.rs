// Booking store: the append-only document collection bookings are written to

use crate::booking::{BookingRecord, NewBooking};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Store rejected document: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid store response: {0}")]
    InvalidResponse(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// Logical path of a document collection, e.g. "artifacts/my-app/public/data/bookings"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath(String);

impl CollectionPath {
    pub fn new(path: &str) -> Self {
        Self(path.trim_matches('/').to_string())
    }

    // Public bookings collection of an app
    pub fn bookings(app_id: &str) -> Self {
        Self(format!("artifacts/{}/public/data/bookings", app_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Persistence collaborator. `create` appends one document and returns it as
// stored, with the store's id and creation timestamp. There is no update or
// delete, and no deduplication: two creates mean two documents.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    fn collection(&self) -> &CollectionPath;

    async fn create(&self, booking: NewBooking) -> Result<BookingRecord, StoreError>;
}

/// Process-local store, used for development and as the test double.
///
/// Ids are `booking-<sequence>-<random>` and documents are stamped with
/// the store's own UTC clock.
pub struct InMemoryBookingStore {
    collection: CollectionPath,
    documents: DashMap<String, BookingRecord>,
    insertion_order: Mutex<Vec<String>>,
    sequence: AtomicU64,
    create_calls: AtomicUsize,
    fail_next_creates: AtomicUsize,
}

impl InMemoryBookingStore {
    pub fn new(collection: CollectionPath) -> Self {
        Self {
            collection,
            documents: DashMap::new(),
            insertion_order: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(0),
            create_calls: AtomicUsize::new(0),
            fail_next_creates: AtomicUsize::new(0),
        }
    }

    // Make the next `count` creates fail with `StoreError::Unavailable`
    pub fn fail_next_creates(&self, count: usize) {
        self.fail_next_creates.store(count, Ordering::SeqCst);
    }

    // Number of create calls received, failed ones included
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<BookingRecord> {
        self.documents.get(id).map(|entry| entry.value().clone())
    }

    // All documents in creation order
    pub fn records(&self) -> Vec<BookingRecord> {
        self.insertion_order
            .lock()
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    async fn create(&self, booking: NewBooking) -> Result<BookingRecord, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let failed = self
            .fail_next_creates
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(StoreError::Unavailable(format!(
                "collection {} is not accepting writes",
                self.collection
            )));
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("booking-{}-{:08x}", sequence, rand::random::<u32>());
        let record = booking.into_record(id.clone(), Utc::now());

        // Hold the order lock across the insert so `records` never sees a gap
        let mut order = self.insertion_order.lock();
        self.documents.insert(id.clone(), record.clone());
        order.push(id);

        Ok(record)
    }
}

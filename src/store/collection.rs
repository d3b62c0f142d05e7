//! Reactive document collection.
//!
//! Concurrent storage with point lookups and push-based change
//! notification via `watch` channels. Every mutation rebuilds the
//! snapshot that live queries receive.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A record that can live in a [`Collection`].
///
/// Documents carry their own identifier; it is `None` until the store
/// generates one on insert.
pub trait Document: Clone + Send + Sync + 'static {
    /// Name of the collection this document type belongs to.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);
}

/// A named, schemaless collection of documents keyed by generated id.
///
/// Writes are last-write-wins per document; there is no reconciliation
/// of concurrent edits. Mutations are pushed to subscribers as a full
/// snapshot of the record set, ordered by document id.
#[derive(Debug)]
pub struct Collection<T: Document> {
    name: &'static str,
    docs: DashMap<String, T>,
    snapshot: watch::Sender<Arc<Vec<T>>>,
}

impl<T: Document> Collection<T> {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            name: T::COLLECTION,
            docs: DashMap::new(),
            snapshot,
        }
    }

    /// Store a new document under a generated id. The id is back-filled
    /// onto the returned record.
    pub fn insert(&self, mut doc: T) -> T {
        let id = Uuid::new_v4().to_string();
        doc.set_id(id.clone());
        self.docs.insert(id.clone(), doc.clone());
        self.rebuild_snapshot();
        tracing::debug!(collection = self.name, %id, "document inserted");
        doc
    }

    /// Overwrite the document at `id`. Creates it if it does not exist.
    pub fn set(&self, id: &str, mut doc: T) {
        doc.set_id(id.to_string());
        self.docs.insert(id.to_string(), doc);
        self.rebuild_snapshot();
        tracing::debug!(collection = self.name, %id, "document written");
    }

    /// Remove the document at `id`. Removing an unknown id is a no-op.
    /// Returns whether a document was actually removed.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.docs.remove(id).is_some();
        if removed {
            self.rebuild_snapshot();
            tracing::debug!(collection = self.name, %id, "document deleted");
        }
        removed
    }

    /// Point lookup by document id.
    pub fn get(&self, id: &str) -> Option<T> {
        self.docs.get(id).map(|r| r.value().clone())
    }

    /// Current full record set (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.snapshot.borrow().clone()
    }

    /// Open a live query over this collection. The full record set is
    /// re-emitted on every underlying change; the subscription is
    /// released when the returned [`LiveQuery`] is dropped.
    pub fn watch(&self) -> LiveQuery<T> {
        LiveQuery {
            rx: self.snapshot.subscribe(),
        }
    }

    /// Number of live queries currently attached.
    pub fn watcher_count(&self) -> usize {
        self.snapshot.receiver_count()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Collect all documents into a snapshot vec and push it to
    /// subscribers. Ordered by id, matching how the backing store
    /// returns unordered queries.
    ///
    /// Collect and publish are not atomic: two racing writers may
    /// publish in either order, so a snapshot can briefly trail the
    /// map. The store guarantees per-document last-write-wins only;
    /// mutations are expected to come from the single UI task.
    fn rebuild_snapshot(&self) {
        let mut values: Vec<T> = self.docs.iter().map(|r| r.value().clone()).collect();
        values.sort_by(|a, b| a.id().cmp(&b.id()));
        // send_modify updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }
}

impl<T: Document> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a push-based subscription over one collection.
///
/// Holding the value keeps the subscription registered; dropping it
/// releases the subscription. Views own one of these for as long as
/// they are on screen.
#[derive(Debug)]
pub struct LiveQuery<T> {
    rx: watch::Receiver<Arc<Vec<T>>>,
}

impl<T: Clone + Send + Sync + 'static> LiveQuery<T> {
    /// The most recently emitted record set.
    pub fn current(&self) -> Arc<Vec<T>> {
        self.rx.borrow().clone()
    }

    /// Wait for the next emission and return it.
    pub async fn changed(&mut self) -> AppResult<Arc<Vec<T>>> {
        self.rx.changed().await.map_err(|_| AppError::QueryClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Adapt the subscription into a `Stream` of record sets.
    pub fn into_stream(self) -> WatchStream<Arc<Vec<T>>> {
        WatchStream::new(self.rx)
    }
}

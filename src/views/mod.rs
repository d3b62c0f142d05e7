//! List views
//!
//! A view owns one live-query subscription for as long as it is on
//! screen; dropping the view releases the subscription. Views do no
//! local filtering beyond what their constructor scopes them to.

pub mod requisitions;

pub use requisitions::{MyRequisitionsView, RequisitionsView};

use std::sync::Arc;

use crate::{
    error::AppResult,
    store::{Document, LiveQuery},
};

/// A plain list view over one record service stream.
pub struct ListView<T: Document> {
    query: LiveQuery<T>,
}

impl<T: Document> ListView<T> {
    pub fn new(query: LiveQuery<T>) -> Self {
        Self { query }
    }

    /// The records currently on screen.
    pub fn records(&self) -> Arc<Vec<T>> {
        self.query.current()
    }

    /// Wait until the underlying collection changes and return the new
    /// record set.
    pub async fn refreshed(&mut self) -> AppResult<Arc<Vec<T>>> {
        self.query.changed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Department,
        store::DocumentStore,
    };

    #[tokio::test]
    async fn view_tracks_collection_changes() {
        let store = DocumentStore::new();
        let mut view = ListView::new(store.departments.watch());
        assert!(view.records().is_empty());

        store.departments.insert(Department {
            id: None,
            name: "TI".to_string(),
        });
        let records = view.refreshed().await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn dropping_view_releases_subscription() {
        let store = DocumentStore::new();
        let view = ListView::new(store.departments.watch());
        assert_eq!(store.departments.watcher_count(), 1);
        drop(view);
        assert_eq!(store.departments.watcher_count(), 0);
    }
}

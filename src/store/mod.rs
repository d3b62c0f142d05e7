//! In-process document store with live query support.
//!
//! The store is the stand-in for the hosted document database: named,
//! schemaless collections, documents keyed by generated id, and
//! push-based re-emission of the full record set on every change.

pub mod collection;

pub use collection::{Collection, Document, LiveQuery};

use crate::models::{Department, Employee, Equipment, Requisition};

/// Central store holding one collection per entity.
#[derive(Debug)]
pub struct DocumentStore {
    pub departments: Collection<Department>,
    pub equipment: Collection<Equipment>,
    pub employees: Collection<Employee>,
    pub requisitions: Collection<Requisition>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            departments: Collection::new(),
            equipment: Collection::new(),
            employees: Collection::new(),
            requisitions: Collection::new(),
        }
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

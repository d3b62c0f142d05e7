//! Requisition record service
//!
//! Requisitions reference a department, an equipment record and the
//! requesting employee. Live queries resolve those references with one
//! point lookup per foreign key per record, and patch the denormalized
//! fields before each emission, so consumers never observe a
//! half-joined batch.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::Requisition,
    store::{DocumentStore, LiveQuery},
};

#[derive(Clone)]
pub struct RequisitionsService {
    store: Arc<DocumentStore>,
}

impl RequisitionsService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a new requisition and back-fill the generated id.
    pub async fn insert(&self, record: Requisition) -> AppResult<Requisition> {
        if record.id.is_some() {
            return Err(AppError::Validation(
                "new requisition already carries an identifier".to_string(),
            ));
        }
        Ok(self.store.requisitions.insert(record))
    }

    /// Overwrite the requisition at its id, stamping the last-update
    /// date.
    pub async fn edit(&self, mut record: Requisition) -> AppResult<Requisition> {
        let id = record
            .id
            .clone()
            .ok_or_else(|| AppError::Validation("requisition has no identifier".to_string()))?;
        record.updated_at = Utc::now();
        self.store.requisitions.set(&id, record.clone());
        Ok(record)
    }

    /// Remove the requisition at its id.
    pub async fn delete(&self, record: &Requisition) -> AppResult<()> {
        let id = record
            .id
            .as_deref()
            .ok_or_else(|| AppError::Validation("requisition has no identifier".to_string()))?;
        self.store.requisitions.delete(id);
        Ok(())
    }

    /// Live sequence of all requisitions, with references resolved.
    pub fn select_all(&self) -> RequisitionsQuery {
        RequisitionsQuery {
            inner: self.store.requisitions.watch(),
            store: Arc::clone(&self.store),
            requester_id: None,
        }
    }

    /// Live sequence of the requisitions opened by one employee.
    pub fn select_for_requester(&self, employee_id: &str) -> RequisitionsQuery {
        RequisitionsQuery {
            inner: self.store.requisitions.watch(),
            store: Arc::clone(&self.store),
            requester_id: Some(employee_id.to_string()),
        }
    }
}

/// Live query over the requisitions collection that joins each record
/// against `departamentos`, `equipamentos` and `funcionarios` before
/// handing it out. Dropping the query releases the subscription.
#[derive(Debug)]
pub struct RequisitionsQuery {
    inner: LiveQuery<Requisition>,
    store: Arc<DocumentStore>,
    requester_id: Option<String>,
}

impl RequisitionsQuery {
    /// The most recent record set, fully joined.
    pub fn current(&self) -> Vec<Requisition> {
        self.project(&self.inner.current())
    }

    /// Wait for the next emission and return it, fully joined.
    pub async fn changed(&mut self) -> AppResult<Vec<Requisition>> {
        let batch = self.inner.changed().await?;
        Ok(self.project(&batch))
    }

    fn project(&self, batch: &[Requisition]) -> Vec<Requisition> {
        batch
            .iter()
            .filter(|r| match &self.requester_id {
                Some(id) => r.requester_id == *id,
                None => true,
            })
            .cloned()
            .map(|mut requisition| {
                requisition.department = self.store.departments.get(&requisition.department_id);
                requisition.requester = self.store.employees.get(&requisition.requester_id);
                if let Some(equipment_id) = &requisition.equipment_id {
                    requisition.equipment = self.store.equipment.get(equipment_id);
                }
                requisition
            })
            .collect()
    }
}

//! Equipment record service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Equipment,
    store::{DocumentStore, LiveQuery},
};

#[derive(Clone)]
pub struct EquipmentService {
    store: Arc<DocumentStore>,
}

impl EquipmentService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a new equipment record and back-fill the generated id.
    pub async fn insert(&self, record: Equipment) -> AppResult<Equipment> {
        if record.id.is_some() {
            return Err(AppError::Validation(
                "new equipment already carries an identifier".to_string(),
            ));
        }
        Ok(self.store.equipment.insert(record))
    }

    /// Overwrite the equipment record at its id.
    pub async fn edit(&self, record: Equipment) -> AppResult<Equipment> {
        let id = record
            .id
            .clone()
            .ok_or_else(|| AppError::Validation("equipment has no identifier".to_string()))?;
        self.store.equipment.set(&id, record.clone());
        Ok(record)
    }

    /// Remove the equipment record at its id.
    pub async fn delete(&self, record: &Equipment) -> AppResult<()> {
        let id = record
            .id
            .as_deref()
            .ok_or_else(|| AppError::Validation("equipment has no identifier".to_string()))?;
        self.store.equipment.delete(id);
        Ok(())
    }

    /// Live, unbounded sequence of the full equipment set.
    pub fn select_all(&self) -> LiveQuery<Equipment> {
        self.store.equipment.watch()
    }

    /// Point lookup by id.
    pub async fn find(&self, id: &str) -> Option<Equipment> {
        self.store.equipment.get(id)
    }
}

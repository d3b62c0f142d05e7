//! Department record service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Department,
    store::{DocumentStore, LiveQuery},
};

#[derive(Clone)]
pub struct DepartmentsService {
    store: Arc<DocumentStore>,
}

impl DepartmentsService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a new department and back-fill the generated id.
    pub async fn insert(&self, record: Department) -> AppResult<Department> {
        if record.id.is_some() {
            return Err(AppError::Validation(
                "new department already carries an identifier".to_string(),
            ));
        }
        Ok(self.store.departments.insert(record))
    }

    /// Overwrite the department at its id.
    pub async fn edit(&self, record: Department) -> AppResult<Department> {
        let id = record
            .id
            .clone()
            .ok_or_else(|| AppError::Validation("department has no identifier".to_string()))?;
        self.store.departments.set(&id, record.clone());
        Ok(record)
    }

    /// Remove the department at its id.
    pub async fn delete(&self, record: &Department) -> AppResult<()> {
        let id = record
            .id
            .as_deref()
            .ok_or_else(|| AppError::Validation("department has no identifier".to_string()))?;
        self.store.departments.delete(id);
        Ok(())
    }

    /// Live, unbounded sequence of the full department set.
    pub fn select_all(&self) -> LiveQuery<Department> {
        self.store.departments.watch()
    }

    /// Point lookup by id.
    pub async fn find(&self, id: &str) -> Option<Department> {
        self.store.departments.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> DepartmentsService {
        DepartmentsService::new(Arc::new(DocumentStore::new()))
    }

    fn department(name: &str) -> Department {
        Department {
            id: None,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_backfills_id_and_shows_in_select_all() {
        let svc = service();
        let saved = svc.insert(department("Almoxarifado")).await.unwrap();
        let id = saved.id.clone().expect("generated id");

        let all = svc.select_all().current();
        assert!(all.iter().any(|d| d.id.as_deref() == Some(id.as_str())));
    }

    #[tokio::test]
    async fn insert_rejects_record_with_id() {
        let svc = service();
        let mut dept = department("TI");
        dept.id = Some("dep-1".to_string());

        let err = svc.insert(dept).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(svc.select_all().current().is_empty());
    }

    #[tokio::test]
    async fn edit_requires_id_and_overwrites_in_place() {
        let svc = service();
        let err = svc.edit(department("TI")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let saved = svc.insert(department("TI")).await.unwrap();
        let other = svc.insert(department("RH")).await.unwrap();

        let mut renamed = saved.clone();
        renamed.name = "Tecnologia".to_string();
        svc.edit(renamed).await.unwrap();

        assert_eq!(
            svc.find(saved.id.as_deref().unwrap()).await.unwrap().name,
            "Tecnologia"
        );
        assert_eq!(
            svc.find(other.id.as_deref().unwrap()).await.unwrap().name,
            "RH"
        );
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let svc = service();
        let saved = svc.insert(department("TI")).await.unwrap();
        svc.delete(&saved).await.unwrap();

        assert!(svc.select_all().current().is_empty());
        assert!(svc.find(saved.id.as_deref().unwrap()).await.is_none());
    }
}

//! Employee record service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Employee,
    services::auth::AuthService,
    store::{DocumentStore, LiveQuery},
};

#[derive(Clone)]
pub struct EmployeesService {
    store: Arc<DocumentStore>,
    auth: AuthService,
}

impl EmployeesService {
    pub fn new(store: Arc<DocumentStore>, auth: AuthService) -> Self {
        Self { store, auth }
    }

    /// Persist a new employee and back-fill the generated id.
    pub async fn insert(&self, record: Employee) -> AppResult<Employee> {
        if record.id.is_some() {
            return Err(AppError::Validation(
                "new employee already carries an identifier".to_string(),
            ));
        }
        Ok(self.store.employees.insert(record))
    }

    /// Register the employee's account and persist the document.
    ///
    /// The credential record is created first; if registration fails
    /// (duplicate email, weak password) the document is never written.
    pub async fn insert_with_credentials(
        &self,
        record: Employee,
        password: &str,
    ) -> AppResult<Employee> {
        self.auth.register(&record.email, password).await?;
        self.insert(record).await
    }

    /// Overwrite the employee at its id.
    pub async fn edit(&self, record: Employee) -> AppResult<Employee> {
        let id = record
            .id
            .clone()
            .ok_or_else(|| AppError::Validation("employee has no identifier".to_string()))?;
        self.store.employees.set(&id, record.clone());
        Ok(record)
    }

    /// Remove the employee at its id.
    pub async fn delete(&self, record: &Employee) -> AppResult<()> {
        let id = record
            .id
            .as_deref()
            .ok_or_else(|| AppError::Validation("employee has no identifier".to_string()))?;
        self.store.employees.delete(id);
        Ok(())
    }

    /// Live, unbounded sequence of the full employee set.
    pub fn select_all(&self) -> LiveQuery<Employee> {
        self.store.employees.watch()
    }

    /// Point lookup by id.
    pub async fn find(&self, id: &str) -> Option<Employee> {
        self.store.employees.get(id)
    }

    /// Look up the employee behind an account email. Used to resolve
    /// "who is the current employee" for role-scoped views.
    pub async fn find_by_email(&self, email: &str) -> Option<Employee> {
        let email = email.trim().to_lowercase();
        self.store
            .employees
            .snapshot()
            .iter()
            .find(|e| e.email.to_lowercase() == email)
            .cloned()
    }
}

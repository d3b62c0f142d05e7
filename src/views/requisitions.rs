//! Requisition list views
//!
//! The full board shows every requisition; the "my requisitions" view
//! is scoped to the employee behind an explicit session value, looked
//! up by the session email at construction time.

use crate::{
    error::{AppError, AppResult},
    models::{Employee, Requisition},
    services::{auth::Session, requisitions::RequisitionsQuery, Services},
};

/// All requisitions, joined.
pub struct RequisitionsView {
    query: RequisitionsQuery,
}

impl RequisitionsView {
    pub fn open(services: &Services) -> Self {
        Self {
            query: services.requisitions.select_all(),
        }
    }

    pub fn records(&self) -> Vec<Requisition> {
        self.query.current()
    }

    pub async fn refreshed(&mut self) -> AppResult<Vec<Requisition>> {
        self.query.changed().await
    }
}

/// The requisitions opened by the employee behind `session`.
#[derive(Debug)]
pub struct MyRequisitionsView {
    employee: Employee,
    query: RequisitionsQuery,
}

impl MyRequisitionsView {
    /// Resolve the session email to an employee, then scope the stream
    /// to that requester. Fails if no employee record matches the
    /// signed-in account.
    pub async fn open(services: &Services, session: &Session) -> AppResult<Self> {
        let employee = services
            .employees
            .find_by_email(&session.email)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("no employee record for account {}", session.email))
            })?;
        let employee_id = employee
            .id
            .as_deref()
            .ok_or_else(|| AppError::Internal("stored employee has no id".to_string()))?;
        let query = services.requisitions.select_for_requester(employee_id);
        Ok(Self { employee, query })
    }

    /// The employee this view is scoped to.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn records(&self) -> Vec<Requisition> {
        self.query.current()
    }

    pub async fn refreshed(&mut self) -> AppResult<Vec<Requisition>> {
        self.query.changed().await
    }
}

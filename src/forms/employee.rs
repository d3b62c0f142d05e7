//! Employee form controller
//!
//! Creating an employee also creates a credential record in the
//! authentication service, so the create form carries a password field
//! next to the employee sub-form. The credential is registered first;
//! if that fails the employee document is never written.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::AppError,
    forms::{FormOutcome, Modal, Notifier},
    models::Employee,
    services::{departments::DepartmentsService, employees::EmployeesService, Services},
};

const TITLE: &str = "Employees";

/// Form payload for creating or editing an employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmployeeForm {
    pub id: Option<String>,
    #[validate(length(min = 3, message = "name needs at least 3 characters"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 3, message = "role needs at least 3 characters"))]
    pub role: String,
    #[validate(length(min = 1, message = "a department must be selected"))]
    pub department_id: String,
    /// Only used on create, for the credential record.
    #[serde(default)]
    pub password: String,
}

impl EmployeeForm {
    pub fn from_record(record: &Employee) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.clone(),
            department_id: record.department_id.clone(),
            password: String::new(),
        }
    }
}

pub struct EmployeeFormController {
    employees: EmployeesService,
    departments: DepartmentsService,
    modal: Arc<dyn Modal<EmployeeForm>>,
    notifier: Arc<dyn Notifier>,
}

impl EmployeeFormController {
    pub fn new(
        services: &Services,
        modal: Arc<dyn Modal<EmployeeForm>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            employees: services.employees.clone(),
            departments: services.departments.clone(),
            modal,
            notifier,
        }
    }

    pub async fn save(&self, existing: Option<&Employee>) -> FormOutcome<Employee> {
        let initial = existing.map(EmployeeForm::from_record).unwrap_or_default();

        let form = match self.modal.open(initial).await {
            Ok(form) => form,
            Err(dismissal) if dismissal.is_silent() => return FormOutcome::Dismissed,
            Err(dismissal) => {
                tracing::warn!(token = %dismissal.token(), "employee form dismissed abnormally");
                self.notifier
                    .error(TITLE, "There was an error saving the employee. Try again.");
                return FormOutcome::Failed;
            }
        };

        if let Err(errors) = form.validate() {
            tracing::debug!(%errors, "employee form invalid");
            self.notifier
                .error(TITLE, "The form must be filled in correctly.");
            return FormOutcome::Invalid;
        }

        // Denormalized copy of the selected department; absent
        // references are stored as None.
        let department = self.departments.find(&form.department_id).await;
        let record = Employee {
            id: form.id.clone(),
            name: form.name,
            email: form.email,
            role: form.role,
            department_id: form.department_id,
            department,
        };

        let result = match record.id {
            None => {
                self.employees
                    .insert_with_credentials(record, &form.password)
                    .await
            }
            Some(_) => self.employees.edit(record).await,
        };

        match result {
            Ok(saved) => {
                self.notifier
                    .success(TITLE, "The employee was saved successfully.");
                FormOutcome::Saved(saved)
            }
            Err(AppError::Validation(reason)) => {
                tracing::debug!(%reason, "employee credentials invalid");
                self.notifier
                    .error(TITLE, "The form must be filled in correctly.");
                FormOutcome::Invalid
            }
            Err(error) => {
                tracing::warn!(%error, "failed to save employee");
                self.notifier
                    .error(TITLE, "There was an error saving the employee. Try again.");
                FormOutcome::Failed
            }
        }
    }

    /// Delete the record, then report the outcome.
    pub async fn remove(&self, record: &Employee) -> bool {
        match self.employees.delete(record).await {
            Ok(()) => {
                self.notifier
                    .success(TITLE, "The employee was deleted successfully.");
                true
            }
            Err(error) => {
                tracing::warn!(%error, "failed to delete employee");
                self.notifier
                    .error(TITLE, "There was an error deleting the employee. Try again.");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AuthConfig,
        forms::{MockModal, MockNotifier},
        models::Department,
        store::DocumentStore,
    };

    fn services() -> Services {
        Services::new(Arc::new(DocumentStore::new()), AuthConfig::default())
    }

    async fn seed_department(services: &Services) -> Department {
        services
            .departments
            .insert(Department {
                id: None,
                name: "Suporte".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_registers_credential_and_stores_department_copy() {
        let services = services();
        let department = seed_department(&services).await;
        let department_id = department.id.clone().unwrap();

        let mut modal = MockModal::<EmployeeForm>::new();
        modal.expect_open().returning(move |mut form| {
            form.name = "Ana Lima".to_string();
            form.email = "ana@empresa.com".to_string();
            form.role = "Analista".to_string();
            form.department_id = department_id.clone();
            form.password = "s3gredo".to_string();
            Ok(form)
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_success().times(1).return_const(());

        let controller =
            EmployeeFormController::new(&services, Arc::new(modal), Arc::new(notifier));
        let outcome = controller.save(None).await;

        let saved = match outcome {
            FormOutcome::Saved(saved) => saved,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(saved.department.as_ref().unwrap().name, "Suporte");
        assert!(services.auth.registered_at("ana@empresa.com").is_some());
    }

    #[tokio::test]
    async fn bad_email_is_invalid_and_writes_nothing() {
        let services = services();
        let department = seed_department(&services).await;
        let department_id = department.id.clone().unwrap();

        let mut modal = MockModal::<EmployeeForm>::new();
        modal.expect_open().returning(move |mut form| {
            form.name = "Ana Lima".to_string();
            form.email = "nao-e-email".to_string();
            form.role = "Analista".to_string();
            form.department_id = department_id.clone();
            form.password = "s3gredo".to_string();
            Ok(form)
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_error().times(1).return_const(());

        let controller =
            EmployeeFormController::new(&services, Arc::new(modal), Arc::new(notifier));
        assert_eq!(controller.save(None).await, FormOutcome::Invalid);
        assert!(services.employees.select_all().current().is_empty());
    }

    #[tokio::test]
    async fn weak_password_is_reported_as_validation_failure() {
        let services = services();
        let department = seed_department(&services).await;
        let department_id = department.id.clone().unwrap();

        let mut modal = MockModal::<EmployeeForm>::new();
        modal.expect_open().returning(move |mut form| {
            form.name = "Ana Lima".to_string();
            form.email = "ana@empresa.com".to_string();
            form.role = "Analista".to_string();
            form.department_id = department_id.clone();
            form.password = "ab".to_string();
            Ok(form)
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_error().times(1).return_const(());

        let controller =
            EmployeeFormController::new(&services, Arc::new(modal), Arc::new(notifier));
        assert_eq!(controller.save(None).await, FormOutcome::Invalid);
        assert!(services.employees.select_all().current().is_empty());
        assert!(services.auth.registered_at("ana@empresa.com").is_none());
    }

    #[tokio::test]
    async fn edit_does_not_touch_credentials() {
        let services = services();
        let department = seed_department(&services).await;

        let existing = services
            .employees
            .insert_with_credentials(
                Employee {
                    id: None,
                    name: "Ana Lima".to_string(),
                    email: "ana@empresa.com".to_string(),
                    role: "Analista".to_string(),
                    department_id: department.id.clone().unwrap(),
                    department: Some(department.clone()),
                },
                "s3gredo",
            )
            .await
            .unwrap();
        let registered = services.auth.registered_at("ana@empresa.com").unwrap();

        let mut modal = MockModal::<EmployeeForm>::new();
        modal.expect_open().returning(|mut form| {
            form.role = "Coordenadora".to_string();
            Ok(form)
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_success().times(1).return_const(());

        let controller =
            EmployeeFormController::new(&services, Arc::new(modal), Arc::new(notifier));
        controller.save(Some(&existing)).await;

        let all = services.employees.select_all().current();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].role, "Coordenadora");
        assert_eq!(
            services.auth.registered_at("ana@empresa.com").unwrap(),
            registered
        );
    }
}

//! Department form controller

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    forms::{FormOutcome, Modal, Notifier},
    models::Department,
    services::{departments::DepartmentsService, Services},
};

const TITLE: &str = "Departments";

/// Form payload for creating or editing a department.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct DepartmentForm {
    pub id: Option<String>,
    #[validate(length(min = 3, message = "name needs at least 3 characters"))]
    pub name: String,
}

impl DepartmentForm {
    pub fn from_record(record: &Department) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }

    fn into_record(self) -> Department {
        Department {
            id: self.id,
            name: self.name,
        }
    }
}

pub struct DepartmentFormController {
    service: DepartmentsService,
    modal: Arc<dyn Modal<DepartmentForm>>,
    notifier: Arc<dyn Notifier>,
}

impl DepartmentFormController {
    pub fn new(
        services: &Services,
        modal: Arc<dyn Modal<DepartmentForm>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service: services.departments.clone(),
            modal,
            notifier,
        }
    }

    /// Open the modal for create (no `existing`) or edit, validate the
    /// confirmed values and submit them.
    pub async fn save(&self, existing: Option<&Department>) -> FormOutcome<Department> {
        let initial = existing
            .map(DepartmentForm::from_record)
            .unwrap_or_default();

        let form = match self.modal.open(initial).await {
            Ok(form) => form,
            Err(dismissal) if dismissal.is_silent() => return FormOutcome::Dismissed,
            Err(dismissal) => {
                tracing::warn!(token = %dismissal.token(), "department form dismissed abnormally");
                self.notifier
                    .error(TITLE, "There was an error saving the department. Try again.");
                return FormOutcome::Failed;
            }
        };

        if let Err(errors) = form.validate() {
            tracing::debug!(%errors, "department form invalid");
            self.notifier
                .error(TITLE, "The form must be filled in correctly.");
            return FormOutcome::Invalid;
        }

        let record = form.into_record();
        let result = match record.id {
            None => self.service.insert(record).await,
            Some(_) => self.service.edit(record).await,
        };

        match result {
            Ok(saved) => {
                self.notifier
                    .success(TITLE, "The department was saved successfully.");
                FormOutcome::Saved(saved)
            }
            Err(error) => {
                tracing::warn!(%error, "failed to save department");
                self.notifier
                    .error(TITLE, "There was an error saving the department. Try again.");
                FormOutcome::Failed
            }
        }
    }

    /// Delete the record, then report the outcome. The notification is
    /// only raised after the delete has resolved.
    pub async fn remove(&self, record: &Department) -> bool {
        match self.service.delete(record).await {
            Ok(()) => {
                self.notifier
                    .success(TITLE, "The department was deleted successfully.");
                true
            }
            Err(error) => {
                tracing::warn!(%error, "failed to delete department");
                self.notifier
                    .error(TITLE, "There was an error deleting the department. Try again.");
                false
            }
        }
    }
}

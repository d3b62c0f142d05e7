//! Requisition form controller
//!
//! The requester is not a form field: callers pass the employee behind
//! the current session explicitly, and the controller stamps them onto
//! new requisitions along with the open date and the `Open` status.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    forms::{FormOutcome, Modal, Notifier},
    models::{Employee, Requisition, RequisitionStatus},
    services::{
        departments::DepartmentsService, equipment::EquipmentService,
        requisitions::RequisitionsService, Services,
    },
};

const TITLE: &str = "Requisitions";

/// Form payload for creating or editing a requisition.
///
/// The status control only takes effect on edit; new requisitions
/// always open as [`RequisitionStatus::Open`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RequisitionForm {
    pub id: Option<String>,
    #[validate(length(min = 3, message = "description needs at least 3 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "a department must be selected"))]
    pub department_id: String,
    #[validate(length(min = 1, message = "an equipment must be selected"))]
    pub equipment_id: String,
    pub status: RequisitionStatus,
}

impl RequisitionForm {
    pub fn from_record(record: &Requisition) -> Self {
        Self {
            id: record.id.clone(),
            description: record.description.clone(),
            department_id: record.department_id.clone(),
            equipment_id: record.equipment_id.clone().unwrap_or_default(),
            status: record.status,
        }
    }
}

pub struct RequisitionFormController {
    requisitions: RequisitionsService,
    departments: DepartmentsService,
    equipment: EquipmentService,
    modal: Arc<dyn Modal<RequisitionForm>>,
    notifier: Arc<dyn Notifier>,
}

impl RequisitionFormController {
    pub fn new(
        services: &Services,
        modal: Arc<dyn Modal<RequisitionForm>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            requisitions: services.requisitions.clone(),
            departments: services.departments.clone(),
            equipment: services.equipment.clone(),
            modal,
            notifier,
        }
    }

    /// Open the modal for create (no `existing`) or edit. `requester`
    /// is the employee behind the current session.
    pub async fn save(
        &self,
        requester: &Employee,
        existing: Option<&Requisition>,
    ) -> FormOutcome<Requisition> {
        let initial = existing
            .map(RequisitionForm::from_record)
            .unwrap_or_default();

        let form = match self.modal.open(initial).await {
            Ok(form) => form,
            Err(dismissal) if dismissal.is_silent() => return FormOutcome::Dismissed,
            Err(dismissal) => {
                tracing::warn!(token = %dismissal.token(), "requisition form dismissed abnormally");
                self.notifier
                    .error(TITLE, "There was an error saving the requisition. Try again.");
                return FormOutcome::Failed;
            }
        };

        if let Err(errors) = form.validate() {
            tracing::debug!(%errors, "requisition form invalid");
            self.notifier
                .error(TITLE, "The form must be filled in correctly.");
            return FormOutcome::Invalid;
        }

        let record = match self.build_record(requester, existing, form).await {
            Some(record) => record,
            None => {
                self.notifier
                    .error(TITLE, "There was an error saving the requisition. Try again.");
                return FormOutcome::Failed;
            }
        };

        let result = match record.id {
            None => self.requisitions.insert(record).await,
            Some(_) => self.requisitions.edit(record).await,
        };

        match result {
            Ok(saved) => {
                self.notifier
                    .success(TITLE, "The requisition was saved successfully.");
                FormOutcome::Saved(saved)
            }
            Err(error) => {
                tracing::warn!(%error, "failed to save requisition");
                self.notifier
                    .error(TITLE, "There was an error saving the requisition. Try again.");
                FormOutcome::Failed
            }
        }
    }

    /// Delete the record, then report the outcome.
    pub async fn remove(&self, record: &Requisition) -> bool {
        match self.requisitions.delete(record).await {
            Ok(()) => {
                self.notifier
                    .success(TITLE, "The requisition was deleted successfully.");
                true
            }
            Err(error) => {
                tracing::warn!(%error, "failed to delete requisition");
                self.notifier
                    .error(TITLE, "There was an error deleting the requisition. Try again.");
                false
            }
        }
    }

    /// Assemble the full record: form values, denormalized copies of
    /// the selected references, and either the defaults for a new
    /// requisition or the preserved lifecycle fields of the existing
    /// one.
    async fn build_record(
        &self,
        requester: &Employee,
        existing: Option<&Requisition>,
        form: RequisitionForm,
    ) -> Option<Requisition> {
        let department = self.departments.find(&form.department_id).await;
        let equipment = self.equipment.find(&form.equipment_id).await;
        let now = Utc::now();

        let record = match existing {
            None => {
                let requester_id = match requester.id.clone() {
                    Some(id) => id,
                    None => {
                        tracing::warn!("requester has no identifier");
                        return None;
                    }
                };
                Requisition {
                    id: form.id,
                    description: form.description,
                    opened_at: now,
                    updated_at: now,
                    status: RequisitionStatus::Open,
                    department_id: form.department_id,
                    department,
                    equipment_id: Some(form.equipment_id),
                    equipment,
                    requester_id,
                    requester: Some(requester.clone()),
                }
            }
            Some(current) => Requisition {
                id: form.id,
                description: form.description,
                opened_at: current.opened_at,
                updated_at: current.updated_at,
                status: form.status,
                department_id: form.department_id,
                department,
                equipment_id: Some(form.equipment_id),
                equipment,
                requester_id: current.requester_id.clone(),
                requester: current.requester.clone(),
            },
        };
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AuthConfig,
        forms::{Dismissal, MockModal, MockNotifier},
        models::{Department, Equipment},
        store::DocumentStore,
    };
    use rust_decimal::Decimal;

    struct Fixture {
        services: Services,
        department: Department,
        equipment: Equipment,
        requester: Employee,
    }

    async fn fixture() -> Fixture {
        let services = Services::new(Arc::new(DocumentStore::new()), AuthConfig::default());
        let department = services
            .departments
            .insert(Department {
                id: None,
                name: "Suporte".to_string(),
            })
            .await
            .unwrap();
        let equipment = services
            .equipment
            .insert(Equipment {
                id: None,
                serial_number: "NB-0042".to_string(),
                name: "Notebook".to_string(),
                price: Decimal::new(349900, 2),
                manufacture_date: None,
            })
            .await
            .unwrap();
        let requester = services
            .employees
            .insert(Employee {
                id: None,
                name: "Ana".to_string(),
                email: "ana@empresa.com".to_string(),
                role: "Analista".to_string(),
                department_id: department.id.clone().unwrap(),
                department: Some(department.clone()),
            })
            .await
            .unwrap();
        Fixture {
            services,
            department,
            equipment,
            requester,
        }
    }

    #[tokio::test]
    async fn create_stamps_defaults_and_requester() {
        let fx = fixture().await;
        let department_id = fx.department.id.clone().unwrap();
        let equipment_id = fx.equipment.id.clone().unwrap();

        let mut modal = MockModal::<RequisitionForm>::new();
        modal.expect_open().returning(move |mut form| {
            form.description = "Notebook para onboarding".to_string();
            form.department_id = department_id.clone();
            form.equipment_id = equipment_id.clone();
            Ok(form)
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_success().times(1).return_const(());

        let controller =
            RequisitionFormController::new(&fx.services, Arc::new(modal), Arc::new(notifier));
        let outcome = controller.save(&fx.requester, None).await;

        let saved = match outcome {
            FormOutcome::Saved(saved) => saved,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(saved.status, RequisitionStatus::Open);
        assert_eq!(saved.requester_id, fx.requester.id.clone().unwrap());
        assert_eq!(saved.requester.as_ref().unwrap().email, "ana@empresa.com");
    }

    #[tokio::test]
    async fn short_description_is_invalid() {
        let fx = fixture().await;
        let department_id = fx.department.id.clone().unwrap();
        let equipment_id = fx.equipment.id.clone().unwrap();

        let mut modal = MockModal::<RequisitionForm>::new();
        modal.expect_open().returning(move |mut form| {
            form.description = "ab".to_string();
            form.department_id = department_id.clone();
            form.equipment_id = equipment_id.clone();
            Ok(form)
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_error().times(1).return_const(());

        let controller =
            RequisitionFormController::new(&fx.services, Arc::new(modal), Arc::new(notifier));
        assert_eq!(
            controller.save(&fx.requester, None).await,
            FormOutcome::Invalid
        );
        assert!(fx.services.requisitions.select_all().current().is_empty());
    }

    #[tokio::test]
    async fn dismissal_is_swallowed() {
        let fx = fixture().await;
        let mut modal = MockModal::<RequisitionForm>::new();
        modal.expect_open().returning(|_| Err(Dismissal::new("0")));
        let notifier = MockNotifier::new();

        let controller =
            RequisitionFormController::new(&fx.services, Arc::new(modal), Arc::new(notifier));
        assert_eq!(
            controller.save(&fx.requester, None).await,
            FormOutcome::Dismissed
        );
    }

    #[tokio::test]
    async fn edit_preserves_lifecycle_fields() {
        let fx = fixture().await;
        let department_id = fx.department.id.clone().unwrap();
        let equipment_id = fx.equipment.id.clone().unwrap();

        let mut create = MockModal::<RequisitionForm>::new();
        {
            let department_id = department_id.clone();
            let equipment_id = equipment_id.clone();
            create.expect_open().returning(move |mut form| {
                form.description = "Notebook para onboarding".to_string();
                form.department_id = department_id.clone();
                form.equipment_id = equipment_id.clone();
                Ok(form)
            });
        }
        let mut notifier = MockNotifier::new();
        notifier.expect_success().times(2).return_const(());
        let notifier = Arc::new(notifier);

        let controller =
            RequisitionFormController::new(&fx.services, Arc::new(create), notifier.clone());
        let saved = match controller.save(&fx.requester, None).await {
            FormOutcome::Saved(saved) => saved,
            other => panic!("unexpected outcome: {:?}", other),
        };

        let mut edit = MockModal::<RequisitionForm>::new();
        edit.expect_open().returning(|mut form| {
            assert!(form.id.is_some());
            form.description = "Notebook para onboarding (urgente)".to_string();
            Ok(form)
        });
        let controller =
            RequisitionFormController::new(&fx.services, Arc::new(edit), notifier.clone());
        let edited = match controller.save(&fx.requester, Some(&saved)).await {
            FormOutcome::Saved(edited) => edited,
            other => panic!("unexpected outcome: {:?}", other),
        };

        assert_eq!(edited.opened_at, saved.opened_at);
        assert_eq!(edited.requester_id, saved.requester_id);
        assert!(edited.updated_at >= saved.updated_at);
        assert_eq!(fx.services.requisitions.select_all().current().len(), 1);
    }

    #[tokio::test]
    async fn edit_can_transition_status() {
        let fx = fixture().await;
        let department_id = fx.department.id.clone().unwrap();
        let equipment_id = fx.equipment.id.clone().unwrap();

        let mut create = MockModal::<RequisitionForm>::new();
        create.expect_open().returning(move |mut form| {
            form.description = "Notebook com defeito".to_string();
            form.department_id = department_id.clone();
            form.equipment_id = equipment_id.clone();
            // The status control is ignored on create.
            form.status = RequisitionStatus::Closed;
            Ok(form)
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_success().times(2).return_const(());
        let notifier = Arc::new(notifier);

        let controller =
            RequisitionFormController::new(&fx.services, Arc::new(create), notifier.clone());
        let saved = match controller.save(&fx.requester, None).await {
            FormOutcome::Saved(saved) => saved,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(saved.status, RequisitionStatus::Open);

        let mut edit = MockModal::<RequisitionForm>::new();
        edit.expect_open().returning(|mut form| {
            assert_eq!(form.status, RequisitionStatus::Open); // loaded from the record
            form.status = RequisitionStatus::InProgress;
            Ok(form)
        });
        let controller =
            RequisitionFormController::new(&fx.services, Arc::new(edit), notifier.clone());
        let edited = match controller.save(&fx.requester, Some(&saved)).await {
            FormOutcome::Saved(edited) => edited,
            other => panic!("unexpected outcome: {:?}", other),
        };

        assert_eq!(edited.status, RequisitionStatus::InProgress);
        assert_eq!(
            fx.services.requisitions.select_all().current()[0].status,
            RequisitionStatus::InProgress
        );
    }
}

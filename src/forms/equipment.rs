//! Equipment form controller

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    forms::{FormOutcome, Modal, Notifier},
    models::Equipment,
    services::{equipment::EquipmentService, Services},
};

const TITLE: &str = "Equipment";

/// Form payload for creating or editing an equipment record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EquipmentForm {
    pub id: Option<String>,
    #[validate(length(min = 1, message = "serial number is required"))]
    pub serial_number: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub price: Decimal,
    pub manufacture_date: Option<NaiveDate>,
}

impl EquipmentForm {
    pub fn from_record(record: &Equipment) -> Self {
        Self {
            id: record.id.clone(),
            serial_number: record.serial_number.clone(),
            name: record.name.clone(),
            price: record.price,
            manufacture_date: record.manufacture_date,
        }
    }

    fn into_record(self) -> Equipment {
        Equipment {
            id: self.id,
            serial_number: self.serial_number,
            name: self.name,
            price: self.price,
            manufacture_date: self.manufacture_date,
        }
    }
}

pub struct EquipmentFormController {
    service: EquipmentService,
    modal: Arc<dyn Modal<EquipmentForm>>,
    notifier: Arc<dyn Notifier>,
}

impl EquipmentFormController {
    pub fn new(
        services: &Services,
        modal: Arc<dyn Modal<EquipmentForm>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service: services.equipment.clone(),
            modal,
            notifier,
        }
    }

    pub async fn save(&self, existing: Option<&Equipment>) -> FormOutcome<Equipment> {
        let initial = existing.map(EquipmentForm::from_record).unwrap_or_default();

        let form = match self.modal.open(initial).await {
            Ok(form) => form,
            Err(dismissal) if dismissal.is_silent() => return FormOutcome::Dismissed,
            Err(dismissal) => {
                tracing::warn!(token = %dismissal.token(), "equipment form dismissed abnormally");
                self.notifier
                    .error(TITLE, "There was an error saving the equipment. Try again.");
                return FormOutcome::Failed;
            }
        };

        if let Err(errors) = form.validate() {
            tracing::debug!(%errors, "equipment form invalid");
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
                    .success(TITLE, "The equipment was saved successfully.");
                FormOutcome::Saved(saved)
            }
            Err(error) => {
                tracing::warn!(%error, "failed to save equipment");
                self.notifier
                    .error(TITLE, "There was an error saving the equipment. Try again.");
                FormOutcome::Failed
            }
        }
    }

    /// Delete the record, then report the outcome.
    pub async fn remove(&self, record: &Equipment) -> bool {
        match self.service.delete(record).await {
            Ok(()) => {
                self.notifier
                    .success(TITLE, "The equipment was deleted successfully.");
                true
            }
            Err(error) => {
                tracing::warn!(%error, "failed to delete equipment");
                self.notifier
                    .error(TITLE, "There was an error deleting the equipment. Try again.");
                false
            }
        }
    }
}

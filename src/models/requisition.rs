//! Requisition model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Department, Employee, Equipment};
use crate::store::Document;

/// Requisition lifecycle status. New requisitions open as [`Open`].
///
/// [`Open`]: RequisitionStatus::Open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequisitionStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

/// Equipment requisition record.
///
/// The `department`, `equipment` and `requester` fields are
/// denormalized copies of the referenced documents; live queries
/// refresh them to the latest stored state before each emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisition {
    pub id: Option<String>,
    pub description: String,
    pub opened_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub status: RequisitionStatus,
    pub department_id: String,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub equipment_id: Option<String>,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    pub requester_id: String,
    #[serde(default)]
    pub requester: Option<Employee>,
}

impl Document for Requisition {
    const COLLECTION: &'static str = "requisicoes";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

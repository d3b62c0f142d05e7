//! Employee model

use serde::{Deserialize, Serialize};

use crate::models::Department;
use crate::store::Document;

/// Employee record.
///
/// Carries a denormalized copy of its department, captured at write
/// time for display convenience. An account in the authentication
/// service is created alongside each employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department_id: String,
    #[serde(default)]
    pub department: Option<Department>,
}

impl Document for Employee {
    const COLLECTION: &'static str = "funcionarios";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

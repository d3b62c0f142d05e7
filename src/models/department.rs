//! Department model

use serde::{Deserialize, Serialize};

use crate::store::Document;

/// Department record. Referenced by employees and requisitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Option<String>,
    pub name: String,
}

impl Document for Department {
    const COLLECTION: &'static str = "departamentos";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

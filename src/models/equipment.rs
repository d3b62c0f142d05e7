//! Equipment model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::Document;

/// Equipment record. Referenced by requisitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: Option<String>,
    pub serial_number: String,
    pub name: String,
    pub price: Decimal,
    pub manufacture_date: Option<NaiveDate>,
}

impl Document for Equipment {
    const COLLECTION: &'static str = "equipamentos";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

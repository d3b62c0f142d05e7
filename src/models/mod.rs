//! Domain models

pub mod department;
pub mod employee;
pub mod equipment;
pub mod requisition;

pub use department::Department;
pub use employee::Employee;
pub use equipment::Equipment;
pub use requisition::{Requisition, RequisitionStatus};

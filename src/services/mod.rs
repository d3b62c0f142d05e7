//! Record services and the authentication service

pub mod auth;
pub mod departments;
pub mod employees;
pub mod equipment;
pub mod requisitions;

use std::sync::Arc;

use crate::{config::AuthConfig, store::DocumentStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub departments: departments::DepartmentsService,
    pub equipment: equipment::EquipmentService,
    pub employees: employees::EmployeesService,
    pub requisitions: requisitions::RequisitionsService,
}

impl Services {
    /// Create all services over one shared document store
    pub fn new(store: Arc<DocumentStore>, auth_config: AuthConfig) -> Self {
        let auth = auth::AuthService::new(auth_config);
        Self {
            departments: departments::DepartmentsService::new(Arc::clone(&store)),
            equipment: equipment::EquipmentService::new(Arc::clone(&store)),
            employees: employees::EmployeesService::new(Arc::clone(&store), auth.clone()),
            requisitions: requisitions::RequisitionsService::new(store),
            auth,
        }
    }
}

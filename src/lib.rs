//! Requisitions administration core
//!
//! CRUD administration of departments, equipment, employees and
//! equipment requisitions over an in-process document store with live
//! queries, plus the modal form controllers and list views that drive
//! it.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod services;
pub mod store;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across the whole tool
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

//! Headless smoke run for the requisitions administration core.
//!
//! Wires the store, the auth service and the record services the same
//! way the UI shell does, then drives one end-to-end pass: seed a
//! department and an equipment record, enroll an employee with a
//! credential, open a requisition and watch it flow back through a
//! live view with its references resolved.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use requisicoes_admin::{
    config::AppConfig,
    models::{Department, Employee, Equipment, Requisition, RequisitionStatus},
    services::{auth::Session, Services},
    store::DocumentStore,
    views::MyRequisitionsView,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("requisicoes_admin={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting requisicoes-admin v{}", env!("CARGO_PKG_VERSION"));

    // Create the store and services
    let store = Arc::new(DocumentStore::new());
    let services = Services::new(store, config.auth.clone());
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    run_smoke_pass(&state).await?;

    tracing::info!("Smoke pass completed");
    Ok(())
}

async fn run_smoke_pass(state: &AppState) -> anyhow::Result<()> {
    let services = &state.services;

    let department = services
        .departments
        .insert(Department {
            id: None,
            name: "Suporte".to_string(),
        })
        .await?;
    tracing::info!(id = ?department.id, "department created");

    let equipment = services
        .equipment
        .insert(Equipment {
            id: None,
            serial_number: "NB-0042".to_string(),
            name: "Notebook".to_string(),
            price: Decimal::new(349900, 2),
            manufacture_date: NaiveDate::from_ymd_opt(2023, 6, 1),
        })
        .await?;
    tracing::info!(id = ?equipment.id, "equipment created");

    let employee = services
        .employees
        .insert_with_credentials(
            Employee {
                id: None,
                name: "Ana Lima".to_string(),
                email: "ana@empresa.com".to_string(),
                role: "Analista".to_string(),
                department_id: department.id.clone().unwrap_or_default(),
                department: Some(department.clone()),
            },
            "s3gredo",
        )
        .await?;
    tracing::info!(id = ?employee.id, "employee enrolled with credential");

    let session: Session = services.auth.sign_in("ana@empresa.com", "s3gredo").await?;
    let mut view = MyRequisitionsView::open(services, &session).await?;

    let now = Utc::now();
    services
        .requisitions
        .insert(Requisition {
            id: None,
            description: "Notebook para onboarding".to_string(),
            opened_at: now,
            updated_at: now,
            status: RequisitionStatus::Open,
            department_id: department.id.clone().unwrap_or_default(),
            department: None,
            equipment_id: equipment.id.clone(),
            equipment: None,
            requester_id: employee.id.clone().unwrap_or_default(),
            requester: None,
        })
        .await?;

    let records = view.refreshed().await?;
    tracing::info!(count = records.len(), "live view emitted");
    println!("{}", serde_json::to_string_pretty(&records)?);

    services.auth.sign_out().await;
    Ok(())
}

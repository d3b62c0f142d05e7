//! Modal form controllers
//!
//! One controller per entity binds a validated form payload to the
//! record service. The modal host and the notifier are trait seams so
//! the surrounding UI shell can plug in, and tests can script them.

pub mod department;
pub mod employee;
pub mod equipment;
pub mod requisition;

pub use department::{DepartmentForm, DepartmentFormController};
pub use employee::{EmployeeForm, EmployeeFormController};
pub use equipment::{EquipmentForm, EquipmentFormController};
pub use requisition::{RequisitionForm, RequisitionFormController};

use async_trait::async_trait;

/// Token returned when a modal is closed without confirming.
///
/// The dialog host emits `"fechar"`, `"0"` or `"1"` depending on how
/// the dialog was dismissed (close button, backdrop, escape). Those
/// are swallowed silently; anything else is reported as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dismissal {
    token: String,
}

impl Dismissal {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether this dismissal means "user cancelled, no error".
    pub fn is_silent(&self) -> bool {
        matches!(self.token.as_str(), "fechar" | "0" | "1")
    }
}

/// Host that presents a modal form and resolves with the confirmed
/// values, or rejects with a dismissal token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Modal<F: Send + Sync + 'static>: Send + Sync {
    async fn open(&self, initial: F) -> Result<F, Dismissal>;
}

/// Fire-and-forget success/error toasts with title and message.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn success(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
}

/// Notifier that writes toasts to the log. Used by the headless
/// binary; the UI shell supplies its own implementation.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, title: &str, message: &str) {
        tracing::info!(%title, %message, "notification");
    }

    fn error(&self, title: &str, message: &str) {
        tracing::warn!(%title, %message, "notification");
    }
}

/// Result of one pass through a form controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<T> {
    /// The record was written and the success toast raised.
    Saved(T),
    /// The modal was dismissed; nothing was written, nothing raised.
    Dismissed,
    /// Validation failed; nothing was written.
    Invalid,
    /// The write (or the modal itself) failed.
    Failed,
}

//! Port contracts for the approval workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by workflow
//! services.

pub mod notifier;
pub mod repository;

pub use notifier::{NotificationDeliveryError, NotificationDispatcher};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

//! Approval workflow for per-period performance document tasks.
//!
//! Each performance document (a KPI or Merit form) owns one task per
//! evaluation period. A task moves through a fixed owner → checker →
//! approver sign-off chain; the checker stage is optional and skipped when
//! no checker is assigned. Authorization is a pure function of the task's
//! current status and the caller's resolved role, and every committed
//! transition yields a notification event for the surrounding application
//! to deliver. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

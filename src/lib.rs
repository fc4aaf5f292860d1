//! Signoff: role-gated approval workflows for performance documents.
//!
//! This crate provides the approval state machine used by KPI bonus and
//! Merit competency documents: a per-period task carrying an
//! owner → checker → approver sign-off chain, a static permission matrix
//! gating writes by role and status, and an orchestration service that
//! commits transitions with optimistic concurrency and emits notification
//! events for an external mailer.
//!
//! # Architecture
//!
//! Signoff follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`workflow`]: Task approval state machine, permissions, and services

pub mod workflow;

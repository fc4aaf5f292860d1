//! Shared test helpers for in-memory workflow integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use signoff::workflow::{
    adapters::memory::{InMemoryTaskRepository, RecordingDispatcher},
    domain::{DocumentKind, EmployeeId, FormId, Period},
    services::{ApprovalService, CreateTaskRequest},
};

/// Service wired to shared in-memory adapters.
pub type TestService = ApprovalService<InMemoryTaskRepository, RecordingDispatcher, DefaultClock>;

/// Test harness exposing the service and its adapters.
pub struct Harness {
    /// Approval service under test.
    pub service: TestService,
    /// Shared repository handle for direct persistence assertions.
    pub repository: Arc<InMemoryTaskRepository>,
    /// Shared dispatcher handle for notification assertions.
    pub dispatcher: RecordingDispatcher,
}

/// Provides a fresh harness for each test.
#[fixture]
pub fn harness() -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let dispatcher = RecordingDispatcher::new();
    let service = ApprovalService::new(
        Arc::clone(&repository),
        Arc::new(dispatcher.clone()),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        repository,
        dispatcher,
    }
}

/// Builds a validated employee identifier.
pub fn employee(id: &str) -> EmployeeId {
    EmployeeId::new(id).expect("valid employee identifier")
}

/// Builds a KPI draft-period request with the standard E1/E2/E3 chain.
pub fn kpi_request_with_checker(form_id: FormId) -> CreateTaskRequest {
    CreateTaskRequest::new(form_id, DocumentKind::Kpi, Period::Draft, "E1", "E3")
        .with_checker("E2")
}

/// Builds a KPI draft-period request with no checker stage.
pub fn kpi_request_without_checker(form_id: FormId) -> CreateTaskRequest {
    CreateTaskRequest::new(form_id, DocumentKind::Kpi, Period::Draft, "E1", "E3")
}

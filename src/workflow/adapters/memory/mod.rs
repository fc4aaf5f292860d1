//! In-memory adapters for tests and local runs.

mod notifier;
mod task;

pub use notifier::RecordingDispatcher;
pub use task::InMemoryTaskRepository;

//! Recording notification dispatcher for tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::workflow::{
    domain::NotificationEvent,
    ports::{NotificationDeliveryError, NotificationDispatcher},
};

/// Dispatcher that records every event instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    events: Arc<RwLock<Vec<NotificationEvent>>>,
}

impl RecordingDispatcher {
    /// Creates an empty recording dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every event dispatched so far.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDeliveryError`] when the internal lock is
    /// poisoned.
    pub fn events(&self) -> Result<Vec<NotificationEvent>, NotificationDeliveryError> {
        let events = self
            .events
            .read()
            .map_err(|err| NotificationDeliveryError::new(std::io::Error::other(err.to_string())))?;
        Ok(events.clone())
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn dispatch(&self, event: &NotificationEvent) -> Result<(), NotificationDeliveryError> {
        let mut events = self
            .events
            .write()
            .map_err(|err| NotificationDeliveryError::new(std::io::Error::other(err.to_string())))?;
        events.push(event.clone());
        Ok(())
    }
}

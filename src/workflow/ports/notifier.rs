//! Notification port: best-effort delivery of transition events.

use crate::workflow::domain::NotificationEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Delivery failure from a notification dispatcher.
///
/// Never unwinds a committed transition; services report it on the
/// operation's receipt instead of propagating it as the operation's error.
#[derive(Debug, Clone, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotificationDeliveryError(pub Arc<dyn std::error::Error + Send + Sync>);

impl NotificationDeliveryError {
    /// Wraps a transport error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// Contract for delivering a transition's notification event.
///
/// Implementations render and send the actual message (email in the
/// source application). Dispatch happens only after the transition is
/// durably committed, and a slow or unavailable transport must not block
/// the transition indefinitely; implementations own their bounded-wait
/// behaviour.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Delivers one transition event, best effort.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDeliveryError`] when delivery fails; callers
    /// log and continue.
    async fn dispatch(&self, event: &NotificationEvent) -> Result<(), NotificationDeliveryError>;
}

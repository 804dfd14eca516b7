//! Port for fire-and-forget user notifications.
use async_trait::async_trait;

use super::define_port_error;

/// Queue receiving the email of every newly created user.
pub const USER_CREATED_QUEUE: &str = "user_created";

define_port_error! {
    /// Errors surfaced by the queue publisher.
    pub enum PublishError {
        /// Broker connection or channel is unavailable.
        Unavailable { message: String } => "user event queue is unavailable: {message}",
        /// Queue declaration or publish was refused.
        Rejected { message: String } => "user event was rejected: {message}",
    }
}

/// Publishes plain-text messages to named, non-durable queues.
///
/// Success means the broker accepted the publish call; delivery is not
/// confirmed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserEventPublisher: Send + Sync {
    /// Declare `queue` and publish `payload` to it.
    async fn publish(&self, queue: &str, payload: &str) -> Result<(), PublishError>;
}

//! In-process event dispatch.
//!
//! Handlers return events; [`ProductService`](crate::ProductService) hands
//! them to an [`EventDispatcher`] after the aggregate has been saved.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::event::DomainEvent;
use crate::product::ProductEvent;

/// Error type returned by listeners.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// A listener failed while handling an event.
#[derive(Debug, Error)]
#[error("listener '{listener}' failed on {event_type}: {source}")]
pub struct DispatchError {
    /// Name of the failing listener.
    pub listener: &'static str,

    /// Type of the event being dispatched.
    pub event_type: &'static str,

    /// The listener's own error.
    #[source]
    pub source: ListenerError,
}

/// Reacts to product events.
#[async_trait]
pub trait EventListener: Send + Sync {
    /// Returns the listener name, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Handles one event.
    async fn handle(&self, event: &ProductEvent) -> Result<(), ListenerError>;
}

/// Delivers events to listeners.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Dispatches one event to every registered listener.
    async fn dispatch(&self, event: &ProductEvent) -> Result<(), DispatchError>;
}

/// What to do when a listener fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure and return it to the caller.
    #[default]
    Propagate,

    /// Log the failure and keep going.
    Isolate,
}

/// Dispatcher that runs listeners one after another on the caller's task.
#[derive(Clone, Default)]
pub struct SyncEventDispatcher {
    listeners: Vec<Arc<dyn EventListener>>,
    policy: FailurePolicy,
}

impl SyncEventDispatcher {
    /// Creates a dispatcher with no listeners and the propagate policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Registers a listener. Listeners run in registration order.
    pub fn register(&mut self, listener: Arc<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_listener(mut self, listener: Arc<dyn EventListener>) -> Self {
        self.register(listener);
        self
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns the failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }
}

#[async_trait]
impl EventDispatcher for SyncEventDispatcher {
    async fn dispatch(&self, event: &ProductEvent) -> Result<(), DispatchError> {
        let event_type = event.event_type();

        for listener in &self.listeners {
            tracing::debug!(listener = listener.name(), event_type, "dispatching event");

            if let Err(source) = listener.handle(event).await {
                match self.policy {
                    FailurePolicy::Propagate => {
                        return Err(DispatchError {
                            listener: listener.name(),
                            event_type,
                            source,
                        });
                    }
                    FailurePolicy::Isolate => {
                        tracing::error!(
                            listener = listener.name(),
                            event_type,
                            error = %source,
                            "event listener failed"
                        );
                    }
                }
            }
        }

        Ok(())
    }
}

//! In-process domain event bus.
//!
//! Delivers `workout.*` events to subscribed handlers in the publishing task
//! and keeps a bounded history for inspection.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// Default number of published events kept in the history.
pub const DEFAULT_HISTORY_LIMIT: usize = 1_024;

/// In-memory event bus.
///
/// A poisoned lock is recovered rather than propagated: the guarded data
/// are plain collections that stay consistent across a panicking writer.
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<VecDeque<EventEnvelope>>,
    history_limit: usize,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(VecDeque::new()),
            history_limit: history_limit.max(1),
        }
    }

    /// Returns the retained published events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Returns retained events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns retained events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.event_type == event_type)
    }

    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        {
            let mut published = self
                .published
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            published.push_back(event.clone());
            while published.len() > self.history_limit {
                published.pop_front();
            }
        }

        // Clone handlers to release lock before await points
        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
            handlers
                .get(&event.event_type)
                .cloned()
                .unwrap_or_default()
        };

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    error = %e,
                    "event handler failed"
                );
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Workout", json!({}))
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "nope"))
        }

        fn name(&self) -> &'static str {
            "FailingHandler"
        }
    }

    #[tokio::test]
    async fn publish_stores_event() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("workout.started.v1", "w-1")).await.unwrap();
        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("workout.started.v1"));
    }

    #[tokio::test]
    async fn filters_by_type_and_aggregate() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("workout.started.v1", "w-1")).await.unwrap();
        bus.publish(envelope("workout.ended.v1", "w-1")).await.unwrap();
        bus.publish(envelope("workout.started.v1", "w-2")).await.unwrap();

        assert_eq!(bus.events_of_type("workout.started.v1").len(), 2);
        assert_eq!(bus.events_for_aggregate("w-1").len(), 2);
    }

    #[tokio::test]
    async fn history_is_bounded() {
        let bus = InMemoryEventBus::with_history_limit(2);
        for i in 0..5 {
            bus.publish(envelope("workout.started.v1", &i.to_string())).await.unwrap();
        }
        let ids: Vec<String> = bus.published_events().into_iter().map(|e| e.aggregate_id).collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[tokio::test]
    async fn subscribe_all_registers_for_multiple_types() {
        let bus = InMemoryEventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        bus.subscribe_all(
            &["workout.started.v1", "workout.ended.v1"],
            Arc::new(CountingHandler(count.clone())),
        );

        bus.publish(envelope("workout.started.v1", "1")).await.unwrap();
        bus.publish(envelope("workout.ended.v1", "1")).await.unwrap();
        bus.publish(envelope("other.v1", "1")).await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn handler_failure_is_reported_after_all_handlers_ran() {
        let bus = InMemoryEventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        bus.subscribe("workout.ended.v1", Arc::new(FailingHandler));
        bus.subscribe("workout.ended.v1", Arc::new(CountingHandler(count.clone())));

        let err = bus.publish(envelope("workout.ended.v1", "1")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.event_count(), 1);
    }

    #[tokio::test]
    async fn clear_removes_history() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("workout.started.v1", "1")).await.unwrap();
        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }
}

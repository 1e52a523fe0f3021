//! Typed event bus for client-side state changes.
//!
//! Uses a tokio broadcast channel so the skill store can announce cache
//! changes without knowing who renders them.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use fa_models::BuilderSkill;

/// Application-level events published after local state changes.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A fetch replaced the skill list.
    SkillsLoaded {
        count: usize,
    },
    /// The backend created a skill and it was appended locally.
    SkillAdded {
        skill: BuilderSkill,
    },
    /// A skill was approved and/or edited locally.
    SkillUpdated {
        skill: BuilderSkill,
    },
    /// A skill was deleted on the backend and removed locally.
    SkillDeleted {
        id: String,
    },
    /// A skill operation failed; the message is what the UI shows.
    SkillsError {
        message: String,
    },
}

/// Application-wide event bus backed by a tokio broadcast channel.
///
/// Every subscriber gets every event. Slow subscribers that fall behind
/// receive a `Lagged` error and may miss events.
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<AppEvent>>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Subscribe to receive application events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers.
    pub fn emit(&self, event: AppEvent) {
        let label = event_label(&event);
        match self.sender.send(event) {
            Ok(count) => {
                debug!("event_bus: emitted {label} to {count} subscriber(s)");
            }
            Err(_) => {
                debug!("event_bus: no subscribers for {label}");
            }
        }
    }

    /// Get the current number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Human-readable label for an event (for logging).
fn event_label(event: &AppEvent) -> &'static str {
    match event {
        AppEvent::SkillsLoaded { .. } => "SkillsLoaded",
        AppEvent::SkillAdded { .. } => "SkillAdded",
        AppEvent::SkillUpdated { .. } => "SkillUpdated",
        AppEvent::SkillDeleted { .. } => "SkillDeleted",
        AppEvent::SkillsError { .. } => "SkillsError",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_emit_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(AppEvent::SkillDeleted { id: "sk-1".into() });

        match rx.recv().await.unwrap() {
            AppEvent::SkillDeleted { id } => assert_eq!(id, "sk-1"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(AppEvent::SkillsLoaded { count: 6 });

        match (rx1.recv().await.unwrap(), rx2.recv().await.unwrap()) {
            (AppEvent::SkillsLoaded { count: c1 }, AppEvent::SkillsLoaded { count: c2 }) => {
                assert_eq!(c1, 6);
                assert_eq!(c2, 6);
            }
            _ => panic!("unexpected event types"),
        }
    }

    #[test]
    fn test_event_bus_no_subscribers() {
        let bus = EventBus::default();
        bus.emit(AppEvent::SkillsLoaded { count: 0 });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(
            event_label(&AppEvent::SkillsError { message: String::new() }),
            "SkillsError"
        );
    }
}

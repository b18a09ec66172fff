//! Change notifications for state observers.
//!
//! Observers are told *what* changed; they read the new value back through
//! the store snapshot accessors.

use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::domain::EntityKind;

/// A single mutation applied to the application state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    /// A collection was replaced wholesale after a load.
    CollectionReplaced { kind: EntityKind, len: usize },
    /// The current record was replaced by a fetched or staged record.
    CurrentReplaced { kind: EntityKind },
    /// The current record was reset to the blank default.
    CurrentReset { kind: EntityKind },
    /// The read-only flag was flipped.
    LockToggled { locked: bool },
}

#[cfg_attr(feature = "test-mocks", mockall::automock)]
pub trait StateObserver: Send + Sync {
    fn on_change(&self, change: &StateChange);
}

/// Writes every mutation to the debug log.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl StateObserver for LoggingObserver {
    fn on_change(&self, change: &StateChange) {
        debug!("mutation: {change:?}");
    }
}

/// Shared list of subscribers, cloned into every store of one container.
#[derive(Clone, Default)]
pub struct Observers {
    inner: Arc<RwLock<Vec<Arc<dyn StateObserver>>>>,
}

impl Observers {
    pub fn subscribe(&self, observer: Arc<dyn StateObserver>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    pub(crate) fn notify(&self, change: StateChange) {
        let observers = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in observers {
            observer.on_change(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<StateChange>>);

    impl StateObserver for Recorder {
        fn on_change(&self, change: &StateChange) {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(*change);
        }
    }

    #[test]
    fn later_subscribers_see_only_later_changes() {
        let observers = Observers::default();
        let early = Arc::new(Recorder::default());
        observers.subscribe(early.clone());
        observers.notify(StateChange::LockToggled { locked: false });

        let late = Arc::new(Recorder::default());
        observers.subscribe(late.clone());
        observers.notify(StateChange::CurrentReset {
            kind: EntityKind::Clients,
        });

        assert_eq!(early.0.lock().expect("recorder lock").len(), 2);
        assert_eq!(
            *late.0.lock().expect("recorder lock"),
            vec![StateChange::CurrentReset {
                kind: EntityKind::Clients
            }]
        );
    }

    #[test]
    fn notify_without_subscribers_is_noop() {
        Observers::default().notify(StateChange::CurrentReset {
            kind: EntityKind::Clients,
        });
    }
}

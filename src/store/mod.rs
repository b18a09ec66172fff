//! Client-side state: one store module per record kind under a root
//! container holding the read-only flag.
//!
//! Views never mutate state directly. They dispatch a [`command::Command`],
//! the matching store module performs the request and, once the response has
//! arrived, replaces its collection or current record and notifies the
//! subscribed [`observer::StateObserver`]s.

pub mod command;
pub mod entity;
pub mod observer;
pub mod root;

pub use command::{Command, EntityCommand};
pub use entity::{EntityCollectionState, EntityStore};
pub use observer::{LoggingObserver, Observers, StateChange, StateObserver};
pub use root::{AppState, HttpAppState, RootSnapshot};

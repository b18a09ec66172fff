use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, warn};
use serde::Serialize;

use crate::api::{ApiError, ApiResult, EntityApi};
use crate::domain::Entity;
use crate::store::command::EntityCommand;
use crate::store::observer::{Observers, StateChange};

/// State slice of one record kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EntityCollectionState<E> {
    /// Records in the order the service returned them.
    pub collection: Vec<E>,
    /// Record staged for the create/edit form; never absent.
    pub current: E,
}

struct Slice<E> {
    state: EntityCollectionState<E>,
    /// Ticket of the newest `load_all` response applied so far.
    applied_load: u64,
}

/// Store module keeping one collection in sync with its REST resource.
///
/// The lock guarding the slice is never held across an `.await`, so
/// operations may overlap; each one writes either the collection or the
/// current record in a single step once its response has arrived.
pub struct EntityStore<E: Entity, A> {
    api: A,
    slice: Mutex<Slice<E>>,
    issued_loads: AtomicU64,
    observers: Observers,
}

impl<E, A> EntityStore<E, A>
where
    E: Entity,
    A: EntityApi<E>,
{
    pub fn new(api: A, observers: Observers) -> Self {
        Self {
            api,
            slice: Mutex::new(Slice {
                state: EntityCollectionState::default(),
                applied_load: 0,
            }),
            issued_loads: AtomicU64::new(0),
            observers,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the loaded collection.
    pub fn collection(&self) -> Vec<E> {
        self.lock().state.collection.clone()
    }

    /// Copy of the current record.
    pub fn current(&self) -> E {
        self.lock().state.current.clone()
    }

    pub fn snapshot(&self) -> EntityCollectionState<E> {
        self.lock().state.clone()
    }

    /// Fetches the whole collection and replaces the stored one.
    ///
    /// When loads overlap, a response older than one already applied is
    /// dropped so the collection never moves back to a stale listing.
    pub async fn load_all(&self) -> ApiResult<()> {
        let ticket = self.issued_loads.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Loading {} (request #{ticket})", E::KIND);

        let records = self.api.list().await.map_err(|err| {
            error!("Failed to load {}: {err}", E::KIND);
            err
        })?;
        let len = records.len();

        {
            let mut slice = self.lock();
            if ticket < slice.applied_load {
                warn!(
                    "Discarding stale {} listing #{ticket}, #{} already applied",
                    E::KIND,
                    slice.applied_load
                );
                return Ok(());
            }
            slice.applied_load = ticket;
            slice.state.collection = records;
        }

        self.observers
            .notify(StateChange::CollectionReplaced { kind: E::KIND, len });
        Ok(())
    }

    /// Fetches one record and makes it the current record.
    pub async fn load_one(&self, id: &E::Id) -> ApiResult<()> {
        debug!("Loading {} record {id}", E::KIND);

        let record = self.api.get(id).await.map_err(|err| {
            error!("Failed to load {} record {id}: {err}", E::KIND);
            err
        })?;

        self.lock().state.current = record;
        self.observers
            .notify(StateChange::CurrentReplaced { kind: E::KIND });
        Ok(())
    }

    /// Sends a new record to the service and resets the current record.
    ///
    /// Any identifier on `record` is dropped; the service assigns one. The
    /// collection stays as it is until the next [`Self::load_all`].
    pub async fn create(&self, mut record: E) -> ApiResult<()> {
        record.take_id();

        self.api.create(&record).await.map_err(|err| {
            error!("Failed to create {} record: {err}", E::KIND);
            err
        })?;

        self.reset_current();
        Ok(())
    }

    /// Saves changes to an existing record and resets the current record.
    pub async fn edit(&self, record: E) -> ApiResult<()> {
        let Some(id) = record.id().cloned() else {
            error!("Refusing to edit {} record without identifier", E::KIND);
            return Err(ApiError::MissingId);
        };

        self.api.update(&id, &record).await.map_err(|err| {
            error!("Failed to edit {} record {id}: {err}", E::KIND);
            err
        })?;

        self.reset_current();
        Ok(())
    }

    /// Deletes a record, then reloads the collection once.
    pub async fn delete(&self, id: &E::Id) -> ApiResult<()> {
        self.api.delete(id).await.map_err(|err| {
            error!("Failed to delete {} record {id}: {err}", E::KIND);
            err
        })?;

        self.load_all().await
    }

    /// Stages a record in the current slot, e.g. while a form is edited.
    pub fn set_current(&self, record: E) {
        self.lock().state.current = record;
        self.observers
            .notify(StateChange::CurrentReplaced { kind: E::KIND });
    }

    pub fn reset_current(&self) {
        self.lock().state.current = E::default();
        self.observers
            .notify(StateChange::CurrentReset { kind: E::KIND });
    }

    /// Runs one typed command against this store.
    pub async fn execute(&self, command: EntityCommand<E>) -> ApiResult<()> {
        match command {
            EntityCommand::LoadAll => self.load_all().await,
            EntityCommand::LoadOne(id) => self.load_one(&id).await,
            EntityCommand::Create(record) => self.create(record).await,
            EntityCommand::Edit(record) => self.edit(record).await,
            EntityCommand::Delete(id) => self.delete(&id).await,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slice<E>> {
        self.slice.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! The application state container.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::api::http::{HttpEntityApi, build_http_client};
use crate::api::{ApiResult, CLIENTS_API_URL, EntityApi, PRODUCTS_API_URL};
use crate::domain::client::Client;
use crate::domain::product::Product;
use crate::models::config::AppConfig;
use crate::store::command::Command;
use crate::store::entity::{EntityCollectionState, EntityStore};
use crate::store::observer::{Observers, StateChange, StateObserver};

/// Owns the read-only flag and one store module per record kind.
pub struct AppState<CA, PA>
where
    CA: EntityApi<Client>,
    PA: EntityApi<Product>,
{
    read_only: AtomicBool,
    clients: EntityStore<Client, CA>,
    products: EntityStore<Product, PA>,
    observers: Observers,
}

/// Container wired to the remote service over HTTP.
pub type HttpAppState = AppState<HttpEntityApi<Client>, HttpEntityApi<Product>>;

/// Point-in-time copy of the whole state, keyed like the collections.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RootSnapshot {
    pub read_only: bool,
    pub clients: EntityCollectionState<Client>,
    pub products: EntityCollectionState<Product>,
}

impl<CA, PA> AppState<CA, PA>
where
    CA: EntityApi<Client>,
    PA: EntityApi<Product>,
{
    /// Builds the container in its initial, locked state.
    pub fn new(clients_api: CA, products_api: PA) -> Self {
        let observers = Observers::default();
        Self {
            read_only: AtomicBool::new(true),
            clients: EntityStore::new(clients_api, observers.clone()),
            products: EntityStore::new(products_api, observers.clone()),
            observers,
        }
    }

    pub fn clients(&self) -> &EntityStore<Client, CA> {
        &self.clients
    }

    pub fn products(&self) -> &EntityStore<Product, PA> {
        &self.products
    }

    pub fn is_locked(&self) -> bool {
        self.read_only.load(Ordering::SeqCst)
    }

    pub fn is_unlocked(&self) -> bool {
        !self.is_locked()
    }

    /// Flips the read-only flag and returns the new value.
    pub fn toggle_lock(&self) -> bool {
        let locked = !self.read_only.fetch_xor(true, Ordering::SeqCst);
        debug!("Lock toggled, locked = {locked}");
        self.observers.notify(StateChange::LockToggled { locked });
        locked
    }

    pub fn subscribe(&self, observer: Arc<dyn StateObserver>) {
        self.observers.subscribe(observer);
    }

    pub fn snapshot(&self) -> RootSnapshot {
        RootSnapshot {
            read_only: self.is_locked(),
            clients: self.clients.snapshot(),
            products: self.products.snapshot(),
        }
    }

    /// Routes a command to the store module it targets.
    pub async fn dispatch(&self, command: Command) -> ApiResult<()> {
        match command {
            Command::Clients(command) => self.clients.execute(command).await,
            Command::Products(command) => self.products.execute(command).await,
            Command::ToggleLock => {
                self.toggle_lock();
                Ok(())
            }
        }
    }
}

impl HttpAppState {
    /// Connects to the collections named in `config`.
    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        let http = build_http_client(Duration::from_secs(config.request_timeout_secs))?;
        info!(
            "Using clients at {} and products at {}",
            config.clients_url, config.products_url
        );
        Ok(Self::new(
            HttpEntityApi::new(http.clone(), &config.clients_url)?,
            HttpEntityApi::new(http, &config.products_url)?,
        ))
    }

    /// Connects to the default public collections.
    pub fn with_defaults() -> ApiResult<Self> {
        Self::from_config(&AppConfig {
            clients_url: CLIENTS_API_URL.to_string(),
            products_url: PRODUCTS_API_URL.to_string(),
            ..AppConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::{InMemoryApi, Method};
    use crate::domain::types::ProductId;
    use crate::store::command::EntityCommand;

    type TestState = AppState<InMemoryApi<Client>, InMemoryApi<Product>>;

    fn state() -> TestState {
        AppState::new(InMemoryApi::clients(), InMemoryApi::products())
    }

    #[test]
    fn starts_locked() {
        let state = state();
        assert!(state.is_locked());
        assert!(!state.is_unlocked());
    }

    #[test]
    fn toggle_flips_both_views_of_the_flag() {
        let state = state();
        for expected in [false, true, false] {
            assert_eq!(state.toggle_lock(), expected);
            assert_eq!(state.is_locked(), expected);
            assert_eq!(state.is_unlocked(), !expected);
        }
    }

    #[tokio::test]
    async fn dispatch_targets_one_store_only() {
        let state = state();
        state.products().api().insert(Product::new(
            "Widget".into(),
            String::new(),
            "W-1".into(),
        ));

        state
            .dispatch(Command::Products(EntityCommand::LoadAll))
            .await
            .expect("load succeeds");

        assert_eq!(state.products().collection().len(), 1);
        assert!(state.clients().collection().is_empty());
        assert!(state.clients().api().requests().is_empty());
    }

    #[tokio::test]
    async fn dispatch_delete_reloads_products() {
        let state = state();
        state
            .products()
            .api()
            .insert(Product::new("Widget".into(), String::new(), "W-1".into()));

        state
            .dispatch(Command::Products(EntityCommand::Delete(
                ProductId::new("p-1").expect("valid id"),
            )))
            .await
            .expect("delete succeeds");

        assert_eq!(state.products().api().count(Method::Get, ""), 1);
        assert!(state.products().collection().is_empty());
    }

    #[test]
    fn snapshot_reports_initial_state() {
        let snapshot = state().snapshot();
        assert!(snapshot.read_only);
        assert!(snapshot.clients.collection.is_empty());
        assert_eq!(snapshot.clients.current, Client::default());
        assert_eq!(snapshot.products.current, Product::default());
    }

    #[test]
    fn default_http_state_builds() {
        let state = HttpAppState::with_defaults().expect("defaults are valid");
        assert_eq!(
            state.clients().api().base_url().as_str(),
            CLIENTS_API_URL
        );
        assert!(state.is_locked());
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod observer_tests {
    use super::*;
    use crate::api::memory::InMemoryApi;
    use crate::domain::EntityKind;
    use crate::store::observer::MockStateObserver;

    fn state() -> AppState<InMemoryApi<Client>, InMemoryApi<Product>> {
        AppState::new(InMemoryApi::clients(), InMemoryApi::products())
    }

    #[tokio::test]
    async fn dispatch_toggle_notifies_subscribers() {
        let state = state();
        let mut observer = MockStateObserver::new();
        observer
            .expect_on_change()
            .withf(|change| *change == StateChange::LockToggled { locked: false })
            .times(1)
            .return_const(());
        state.subscribe(Arc::new(observer));

        state
            .dispatch(Command::ToggleLock)
            .await
            .expect("toggle succeeds");

        assert!(state.is_unlocked());
    }

    #[tokio::test]
    async fn subscribers_see_both_stores() {
        let state = state();
        let mut observer = MockStateObserver::new();
        observer
            .expect_on_change()
            .withf(|change| {
                matches!(
                    change,
                    StateChange::CurrentReset {
                        kind: EntityKind::Clients | EntityKind::Products
                    }
                )
            })
            .times(2)
            .return_const(());
        state.subscribe(Arc::new(observer));

        state.clients().reset_current();
        state.products().reset_current();
    }
}

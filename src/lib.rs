//! Client-side synchronization of client and product records with a remote
//! REST service.
//!
//! The `data` feature compiles only the record types and form payloads. The
//! default `client` feature adds the HTTP layer, the state container, the
//! router and the command-line entry point.

#[cfg(feature = "client")]
use std::sync::Arc;

#[cfg(feature = "client")]
use log::info;
#[cfg(feature = "client")]
use thiserror::Error;

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod forms;

#[cfg(feature = "client")]
pub mod api;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod routes;
#[cfg(feature = "client")]
pub mod store;

#[cfg(feature = "client")]
use crate::api::ApiError;
#[cfg(feature = "client")]
use crate::models::config::AppConfig;
#[cfg(feature = "client")]
use crate::store::{Command, HttpAppState, LoggingObserver, RootSnapshot};

/// Errors surfaced by [`run`].
#[cfg(feature = "client")]
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no view for path {0}")]
    UnknownRoute(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Resolves `path`, performs the loads its views need and returns the
/// resulting state.
#[cfg(feature = "client")]
pub async fn run(config: &AppConfig, path: &str) -> Result<RootSnapshot, RunError> {
    let route =
        routes::resolve(path).ok_or_else(|| RunError::UnknownRoute(path.to_string()))?;

    let state = HttpAppState::from_config(config)?;
    if cfg!(debug_assertions) {
        state.subscribe(Arc::new(LoggingObserver));
    }

    info!("Opening {} at {}", route.name, route.path);
    for command in Command::for_route(&route) {
        state.dispatch(command).await?;
    }

    Ok(state.snapshot())
}

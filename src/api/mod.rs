//! Access to the remote REST collections.
//!
//! Each record kind lives under its own base URL and exposes the same five
//! verbs:
//!
//! ```text
//! GET    {base}        -> JSON array of records
//! GET    {base}/{id}   -> JSON object
//! POST   {base}        <- JSON record without identifier
//! PUT    {base}/{id}   <- JSON record
//! DELETE {base}/{id}
//! ```
//!
//! [`http::HttpEntityApi`] talks to the real service. [`memory::InMemoryApi`]
//! is an in-process fake that records every request, used by tests.

use crate::domain::Entity;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod memory;

pub use errors::{ApiError, ApiResult};

/// Default endpoint of the clients collection.
pub const CLIENTS_API_URL: &str = "https://base-app-backend.herokuapp.com/clients";
/// Default endpoint of the products collection.
pub const PRODUCTS_API_URL: &str = "https://base-app-backend.herokuapp.com/products";

/// The REST verbs available for one record kind.
///
/// Write operations ignore the response body; only the status matters.
#[allow(async_fn_in_trait)]
pub trait EntityApi<E: Entity> {
    async fn list(&self) -> ApiResult<Vec<E>>;
    async fn get(&self, id: &E::Id) -> ApiResult<E>;
    async fn create(&self, record: &E) -> ApiResult<()>;
    async fn update(&self, id: &E::Id, record: &E) -> ApiResult<()>;
    async fn delete(&self, id: &E::Id) -> ApiResult<()>;
}

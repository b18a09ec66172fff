//! In-process stand-in for the remote REST service.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;

use crate::api::{ApiError, ApiResult, EntityApi};
use crate::domain::Entity;
use crate::domain::client::Client;
use crate::domain::product::Product;
use crate::domain::types::{ClientId, ProductId};

/// HTTP verb of a recorded request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A request received by [`InMemoryApi`], with the path relative to the
/// collection base (`""` for the collection itself, `"/{id}"` for a record).
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

struct Inner<E> {
    records: Vec<E>,
    requests: Vec<RecordedRequest>,
    list_delays: VecDeque<Duration>,
    failures: VecDeque<ApiError>,
    next_id: u64,
}

/// Fake collection endpoint keeping records in memory.
///
/// Created records receive identifiers from `assign_id`, mirroring the real
/// service. Failures and `list` latencies can be scripted per call.
pub struct InMemoryApi<E: Entity> {
    inner: Mutex<Inner<E>>,
    assign_id: fn(&mut E, u64),
}

impl<E: Entity> InMemoryApi<E> {
    pub fn new(assign_id: fn(&mut E, u64)) -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                requests: Vec::new(),
                list_delays: VecDeque::new(),
                failures: VecDeque::new(),
                next_id: 1,
            }),
            assign_id,
        }
    }

    /// Seeds the service with records, assigning identifiers to those without one.
    pub fn with_records(self, records: Vec<E>) -> Self {
        for record in records {
            self.insert(record);
        }
        self
    }

    /// Stores a record directly, bypassing the request log.
    pub fn insert(&self, mut record: E) -> E {
        let mut inner = self.lock();
        if record.id().is_none() {
            let seq = inner.next_id;
            inner.next_id += 1;
            (self.assign_id)(&mut record, seq);
        }
        inner.records.push(record.clone());
        record
    }

    pub fn records(&self) -> Vec<E> {
        self.lock().records.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of recorded requests with the given verb and path.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Makes the next request fail with `error` without touching the records.
    pub fn fail_next(&self, error: ApiError) {
        self.lock().failures.push_back(error);
    }

    /// Delays the response of the next `list` call; the records are
    /// snapshotted when the request arrives, not when it resolves.
    pub fn delay_next_list(&self, delay: Duration) {
        self.lock().list_delays.push_back(delay);
    }

    fn lock(&self) -> MutexGuard<'_, Inner<E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_request(
        inner: &mut Inner<E>,
        method: Method,
        path: String,
        body: Option<&E>,
    ) -> ApiResult<()> {
        let body = body.map(serde_json::to_value).transpose()?;
        inner.requests.push(RecordedRequest { method, path, body });
        match inner.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn position(inner: &Inner<E>, id: &E::Id) -> Option<usize> {
        inner.records.iter().position(|r| r.id() == Some(id))
    }

    fn not_found(id: &E::Id) -> ApiError {
        ApiError::Status {
            status: 404,
            url: format!("/{}/{id}", E::KIND),
        }
    }
}

impl<E: Entity> EntityApi<E> for InMemoryApi<E> {
    async fn list(&self) -> ApiResult<Vec<E>> {
        let (snapshot, delay) = {
            let mut inner = self.lock();
            Self::record_request(&mut inner, Method::Get, String::new(), None)?;
            (inner.records.clone(), inner.list_delays.pop_front())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(snapshot)
    }

    async fn get(&self, id: &E::Id) -> ApiResult<E> {
        let mut inner = self.lock();
        Self::record_request(&mut inner, Method::Get, format!("/{id}"), None)?;
        Self::position(&inner, id)
            .map(|idx| inner.records[idx].clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, record: &E) -> ApiResult<()> {
        let mut inner = self.lock();
        Self::record_request(&mut inner, Method::Post, String::new(), Some(record))?;
        let mut stored = record.clone();
        let seq = inner.next_id;
        inner.next_id += 1;
        (self.assign_id)(&mut stored, seq);
        inner.records.push(stored);
        Ok(())
    }

    async fn update(&self, id: &E::Id, record: &E) -> ApiResult<()> {
        let mut inner = self.lock();
        Self::record_request(&mut inner, Method::Put, format!("/{id}"), Some(record))?;
        let idx = Self::position(&inner, id).ok_or_else(|| Self::not_found(id))?;
        inner.records[idx] = record.clone();
        Ok(())
    }

    async fn delete(&self, id: &E::Id) -> ApiResult<()> {
        let mut inner = self.lock();
        Self::record_request(&mut inner, Method::Delete, format!("/{id}"), None)?;
        let idx = Self::position(&inner, id).ok_or_else(|| Self::not_found(id))?;
        inner.records.remove(idx);
        Ok(())
    }
}

impl InMemoryApi<Client> {
    /// Fake clients collection assigning sequential integer identifiers.
    pub fn clients() -> Self {
        Self::new(|client, seq| {
            let value = i64::try_from(seq).unwrap_or(i64::MAX);
            client.id = ClientId::new(value).ok();
        })
    }
}

impl InMemoryApi<Product> {
    /// Fake products collection assigning `p-{n}` identifiers.
    pub fn products() -> Self {
        Self::new(|product, seq| {
            product.id = ProductId::new(format!("p-{seq}")).ok();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_identifier_and_records_body() {
        let api = InMemoryApi::clients();
        let client = Client {
            first_name: "Ada".to_string(),
            ..Client::default()
        };

        api.create(&client).await.expect("create succeeds");

        let records = api.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.map(ClientId::get), Some(1));
        let requests = api.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "");
        assert_eq!(
            requests[0].body.as_ref().and_then(|b| b.get("id")),
            None
        );
    }

    #[tokio::test]
    async fn missing_records_answer_not_found() {
        let api = InMemoryApi::products();
        let id = ProductId::new("p-9").expect("valid id");

        let err = api.get(&id).await.expect_err("record is missing");

        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert_eq!(api.count(Method::Get, "/p-9"), 1);
    }

    #[tokio::test]
    async fn scripted_failure_applies_once() {
        let api = InMemoryApi::products().with_records(vec![Product::default()]);
        api.fail_next(ApiError::Network("offline".to_string()));

        assert!(api.list().await.is_err());
        assert_eq!(api.list().await.expect("second call succeeds").len(), 1);
    }
}

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::time::Duration;

use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::api::{ApiError, ApiResult, EntityApi};
use crate::domain::Entity;

/// HTTP request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the shared HTTP client used by every collection.
pub fn build_http_client(timeout: Duration) -> ApiResult<HttpClient> {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .map_err(ApiError::from)
}

/// [`EntityApi`] implementation backed by `reqwest`.
pub struct HttpEntityApi<E> {
    client: HttpClient,
    base_url: Url,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> HttpEntityApi<E> {
    /// Creates an API handle for the collection rooted at `base_url`.
    pub fn new(client: HttpClient, base_url: &str) -> ApiResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url: parsed,
            _entity: PhantomData,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/{id}`, percent-encoding the identifier as one segment.
    pub fn record_url(&self, id: &E::Id) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} responded with {status}", url);

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self.send(self.client.get(url.clone()), &url).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ApiError::from)
    }
}

impl<E: Entity> EntityApi<E> for HttpEntityApi<E> {
    async fn list(&self) -> ApiResult<Vec<E>> {
        self.fetch(self.base_url.clone()).await
    }

    async fn get(&self, id: &E::Id) -> ApiResult<E> {
        self.fetch(self.record_url(id)?).await
    }

    async fn create(&self, record: &E) -> ApiResult<()> {
        let url = self.base_url.clone();
        debug!("POST {url}");
        self.send(self.client.post(url.clone()).json(record), &url)
            .await?;
        Ok(())
    }

    async fn update(&self, id: &E::Id, record: &E) -> ApiResult<()> {
        let url = self.record_url(id)?;
        debug!("PUT {url}");
        self.send(self.client.put(url.clone()).json(record), &url)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &E::Id) -> ApiResult<()> {
        let url = self.record_url(id)?;
        debug!("DELETE {url}");
        self.send(self.client.delete(url.clone()), &url).await?;
        Ok(())
    }
}

impl<E> Clone for HttpEntityApi<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> Debug for HttpEntityApi<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEntityApi")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

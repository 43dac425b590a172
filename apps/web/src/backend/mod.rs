/// Backend client — the single point of entry for all calls to the CVChatter
/// backend API.
///
/// Route handlers use [`BackendClient::forward`] and relay the [`Upstream`]
/// response untouched. Service wrappers use the typed helpers, which classify
/// failures into [`ApiError`].
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;

pub mod error;
pub mod query;

pub use error::{ApiError, ApiErrorKind};
pub use query::{build_query_string, Pagination};

const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    origin: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.backend_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_api_url.clone(),
            origin: config.site_url.clone(),
        })
    }

    /// Backend origin, without the API prefix.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &[(&str, Option<String>)]) -> String {
        format!(
            "{}{}{}{}",
            self.base_url,
            API_PREFIX,
            path,
            build_query_string(query)
        )
    }

    fn request(&self, method: Method, url: &str, auth: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ORIGIN, &self.origin);
        match auth {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, token),
            None => builder,
        }
    }

    /// Issues one outbound call and captures the response as-is.
    /// Only transport failures are errors.
    pub async fn forward(&self, call: Forward<'_>) -> Result<Upstream, reqwest::Error> {
        let url = self.url(&call.path, &call.query);
        debug!("Forwarding {} {}", call.method, url);

        let mut builder = self.request(call.method, &url, call.auth);
        if let Some(body) = call.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Upstream::read(response).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, Option<String>)],
        auth: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = self.url(path, query);
        let response = self.request(Method::GET, &url, auth).send().await?;
        decode(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = self.url(path, &[]);
        let response = self
            .request(Method::POST, &url, auth)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(error::parse_retry_after);
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(ApiError::from_response(status.as_u16(), retry_after, &body));
    }

    serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// One outbound call, built by a handler.
#[derive(Debug)]
pub struct Forward<'a> {
    method: Method,
    path: String,
    query: Vec<(&'static str, Option<String>)>,
    auth: Option<&'a str>,
    body: Option<&'a Value>,
}

impl<'a> Forward<'a> {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            auth: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, pairs: Vec<(&'static str, Option<String>)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn auth(mut self, auth: Option<&'a str>) -> Self {
        self.auth = auth;
        self
    }

    pub fn json(mut self, body: &'a Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A backend response captured for relaying.
#[derive(Debug, Clone)]
pub struct Upstream {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub retry_after: Option<String>,
    pub body: Bytes,
}

impl Upstream {
    async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        // reqwest and axum pin different `http` major versions.
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let header_string = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header_string(reqwest::header::CONTENT_TYPE);
        let retry_after = header_string(reqwest::header::RETRY_AFTER);
        let body = response.bytes().await?;

        Ok(Self {
            status,
            content_type,
            retry_after,
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body parsed as JSON, if it is JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

impl IntoResponse for Upstream {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();
        headers.remove(header::CONTENT_TYPE);

        if let Some(value) = self
            .content_type
            .as_deref()
            .and_then(|v| HeaderValue::from_str(v).ok())
        {
            headers.insert(header::CONTENT_TYPE, value);
        }
        if let Some(value) = self
            .retry_after
            .as_deref()
            .and_then(|v| HeaderValue::from_str(v).ok())
        {
            headers.insert(header::RETRY_AFTER, value);
        }

        response
    }
}

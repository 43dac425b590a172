//! Request extractors that reject with the gateway's `{"detail": ...}` shape.

use std::collections::HashSet;
use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Uri},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;

/// The caller's `Authorization` header, required.
/// Rejects with 401 when absent or blank.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub String);

/// The caller's `Authorization` header, forwarded when present.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<String>);

impl OptionalAuth {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorization(&parts.headers)
            .map(RequireAuth)
            .ok_or(AppError::Unauthorized)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for OptionalAuth {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(authorization(&parts.headers)))
    }
}

/// A JSON object request body, kept as-is for forwarding.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl JsonBody {
    /// Returns the named string field, rejecting when it is missing or blank.
    pub fn require_text(&self, field: &str) -> Result<&str, AppError> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Validation(format!("{field} is required")))
    }

    /// Deserializes the body into a typed request.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_value(self.0.clone())
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::Validation("Could not read request body".to_string()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|_| AppError::Validation("Request body must be valid JSON".to_string()))?;

        if !value.is_object() {
            return Err(AppError::Validation(
                "Request body must be a JSON object".to_string(),
            ));
        }
        Ok(JsonBody(value))
    }
}

/// Typed query parameters. When a key repeats, its first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct Query<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = first_occurrences(parts.uri.query().unwrap_or_default());
        let uri: Uri = format!("/?{query}")
            .parse()
            .map_err(|_| AppError::Validation("Invalid query string".to_string()))?;

        axum::extract::Query::<T>::try_from_uri(&uri)
            .map(|axum::extract::Query(value)| Query(value))
            .map_err(|rejection| AppError::Validation(rejection.body_text()))
    }
}

fn first_occurrences(query: &str) -> String {
    let mut seen = HashSet::new();
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| seen.insert(pair.split('=').next().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("&")
}

/// Typed path parameters.
#[derive(Debug, Clone)]
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Path(value)| Path(value))
            .map_err(|rejection| AppError::Validation(rejection.body_text()))
    }
}

//! Request descriptors passed through the authorize/send/guard pipeline.
//! A descriptor is replayable: the guard may send it a second time after a
//! token refresh, so bodies are kept as owned data rather than streams.

use reqwest::{
    Method,
    header::{HeaderMap, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;

/// A file sent as one part of a multipart form.
#[derive(Clone, Debug)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(FilePart),
}

#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
    /// Set once the guard has replayed this request; a replay is never replayed.
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            retried: false,
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

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Encodes `body` as the JSON payload.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the body cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::Config(format!("Failed to encode request: {err}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }

    /// Path without query string or trailing slash, always with a leading slash.
    #[must_use]
    pub fn normalized_path(&self) -> String {
        normalize_path(&self.path)
    }

    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.headers.contains_key(reqwest::header::AUTHORIZATION)
    }

    pub(crate) fn set_authorization(&mut self, value: HeaderValue) {
        self.headers.insert(reqwest::header::AUTHORIZATION, value);
    }

    pub(crate) fn clear_authorization(&mut self) {
        self.headers.remove(reqwest::header::AUTHORIZATION);
    }
}

pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_strips_query_and_slashes() {
        assert_eq!(normalize_path("login"), "/login");
        assert_eq!(normalize_path("/login/"), "/login");
        assert_eq!(normalize_path(" /users?email=a@b.c "), "/users");
        assert_eq!(normalize_path("/users/profile#top"), "/users/profile");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn builder_collects_query_and_body() -> Result<(), ApiError> {
        let request = ApiRequest::get("/groups")
            .query("page", 2)
            .query("search", "team")
            .json(&serde_json::json!({"name": "ops"}))?;

        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("search".to_string(), "team".to_string())
            ]
        );
        assert!(matches!(request.body, RequestBody::Json(_)));
        assert!(!request.retried);
        assert!(!request.is_authorized());
        Ok(())
    }
}

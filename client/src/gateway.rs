//! Request gateway
//!
//! The only component that talks to the network. Every call goes through
//! [`Gateway::send`], which attaches the JSON headers, classifies the
//! response and hands back either a [`Payload`] or a [`GatewayError`].
//! It has no side effects besides the HTTP call and is cheap to clone.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{extract_error_message, GatewayError, GatewayResult};

pub use reqwest::Method;

/// One outbound call, relative to the gateway's base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<Value>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
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

    /// Attach query parameters from a flat struct
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> GatewayResult<Self> {
        self.query = Some(serde_json::to_value(query)?);
        Ok(self)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> GatewayResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// A successful response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204, a zero-length 201, or a 2xx body that is not JSON
    Empty,
    Json(Value),
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }

    /// Decode into `T`; the empty result decodes to `None` without parsing
    pub fn decode<T: DeserializeOwned>(self) -> GatewayResult<Option<T>> {
        match self {
            Payload::Empty => Ok(None),
            Payload::Json(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| GatewayError::Decode(err.to_string())),
        }
    }
}

/// HTTP access to the backend
#[derive(Debug, Clone)]
pub struct Gateway {
    http: Client,
    base_url: Arc<str>,
}

impl Gateway {
    /// Create a gateway rooted at `base_url`
    pub fn new(base_url: impl AsRef<str>) -> GatewayResult<Self> {
        let base_url = base_url.as_ref().trim_end_matches('/');
        reqwest::Url::parse(base_url).map_err(|err| GatewayError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url),
        })
    }

    pub fn from_config(config: &ApiConfig) -> GatewayResult<Self> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a resource path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform the call and normalize the response
    pub async fn send(&self, request: ApiRequest) -> GatewayResult<Payload> {
        let url = self.url(&request.path);
        debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(method = %request.method, url = %url, error = %err, "Request did not complete");
            GatewayError::Network(err)
        })?;

        let status = response.status();
        debug!(method = %request.method, url = %url, status = status.as_u16(), "Response received");

        if !status.is_success() {
            let body = response.bytes().await?;
            let message = extract_error_message(status, &body);
            warn!(method = %request.method, url = %url, status = status.as_u16(), message = %message, "Request failed");
            return Err(GatewayError::from_status(status, message));
        }

        if is_empty_acknowledgement(&response) {
            return Ok(Payload::Empty);
        }

        let body = response.bytes().await?;
        Ok(match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => {
                debug!(url = %url, bytes = body.len(), "Success body is not JSON, treating as empty");
                Payload::Empty
            }
        })
    }
}

/// 204, or 201 with an explicit zero content length
fn is_empty_acknowledgement(response: &Response) -> bool {
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return true;
    }
    status == StatusCode::CREATED
        && response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            == Some("0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_base_and_path() {
        let gateway = Gateway::new("http://localhost:8080/api/").unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8080/api");
        assert_eq!(gateway.url("/users/1"), "http://localhost:8080/api/users/1");
    }

    #[test]
    fn test_rejects_relative_base_url() {
        let err = Gateway::new("localhost/api").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_request_builders() {
        #[derive(Serialize)]
        struct Steps {
            steps: u32,
        }

        let request = ApiRequest::post("/users/1/metrics/steps")
            .query(&Steps { steps: 1000 })
            .unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.query, Some(json!({ "steps": 1000 })));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_payload_decode() {
        assert_eq!(Payload::Empty.decode::<Vec<u32>>().unwrap(), None);
        assert_eq!(
            Payload::Json(json!([1, 2])).decode::<Vec<u32>>().unwrap(),
            Some(vec![1, 2])
        );
        let err = Payload::Json(json!({"oops": true})).decode::<Vec<u32>>().unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}

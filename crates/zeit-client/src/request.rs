//! Request descriptors.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;

/// One outgoing request, fixed once issued.
///
/// The pipeline may reissue the descriptor after a token refresh, so it owns
/// its body and headers rather than borrowing a half-built `reqwest` request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Value>,
}

impl RequestDescriptor {
    /// Create a descriptor for an arbitrary method.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A POST request carrying a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        let mut descriptor = Self::new(Method::POST, path);
        descriptor.body = Some(body);
        descriptor
    }

    /// A PUT request carrying a JSON body.
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        let mut descriptor = Self::new(Method::PUT, path);
        descriptor.body = Some(body);
        descriptor
    }

    /// A DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a caller-supplied header. Caller headers win over the defaults
    /// the pipeline attaches.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

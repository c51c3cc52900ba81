//! Request seam between the reconciliation engine and the network.

use condor_core::errors::{ConductorError, Result};
use std::fmt;

/// HTTP verbs used against the metadata API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Body as text, lossily decoded, for error messages.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn any non-200 status into `RemoteHttp` carrying the body verbatim.
    ///
    /// # Errors
    ///
    /// `RemoteHttp` when the status is not 200.
    pub fn require_ok(self, path: &str) -> Result<Self> {
        if self.is_ok() {
            return Ok(self);
        }
        Err(ConductorError::RemoteHttp {
            status: self.status,
            path: path.to_string(),
            body: self.body_text(),
        })
    }
}

/// Synchronous request executor.
///
/// Implementations perform exactly one request per call and never retry.
/// `path` is relative to the configured endpoint, without a leading `/`.
pub trait Transport {
    /// # Errors
    ///
    /// `Transport` when no response was received. A response with any status
    /// is `Ok`; interpreting the status is the caller's business.
    fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<HttpResponse> {
        (**self).send(method, path, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<HttpResponse> {
        (**self).send(method, path, body)
    }
}

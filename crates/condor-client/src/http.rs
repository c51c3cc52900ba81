//! Blocking HTTP transport.

use crate::config::ProviderConfig;
use crate::transport::{HttpResponse, Method, Transport};
use condor_core::errors::{ConductorError, Result};
use condor_core_types::Sensitive;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// [`Transport`] over `reqwest::blocking`.
///
/// Every request goes to `{endpoint}/{path}` with the configured custom
/// headers and `Content-Type: application/json`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    headers: Vec<(String, Sensitive<String>)>,
}

impl HttpTransport {
    /// # Errors
    ///
    /// `Config` when the configuration is invalid or the client cannot be
    /// built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConductorError::Config {
                reason: format!("cannot build HTTP client: {}", e),
            })?;

        let headers = config
            .custom_headers
            .iter()
            .map(|(key, value)| {
                tracing::debug!(header = %key, "custom header added");
                (key.clone(), value.clone())
            })
            .collect();

        let endpoint = config.base_url().to_string();
        tracing::debug!(endpoint = %endpoint, "conductor http client created");

        Ok(Self {
            client,
            endpoint,
            headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn transport_error(path: &str, err: &reqwest::Error) -> ConductorError {
    ConductorError::Transport {
        path: path.to_string(),
        message: err.to_string(),
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<HttpResponse> {
        let url = self.url(path);
        tracing::debug!(method = method.as_str(), url = %url, "HTTP rest call");

        let mut request = self.client.request(to_reqwest(method), &url);
        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.expose().as_str());
        }
        request = request.header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().map_err(|e| transport_error(path, &e))?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| transport_error(path, &e))?;

        tracing::debug!(status, url = %url, "HTTP rest call done");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

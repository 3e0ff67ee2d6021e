//! Low-level request plumbing behind [`ApiClient::run`](crate::ApiClient::run).

use const_format::concatcp;
use reqwest::Method;
use reqwest::blocking::{Client, Request};
use url::Url;

use crate::auth::AuthorizationHandler;
use crate::error::{Result, VcomError};

const USER_AGENT: &str = concatcp!("vcom-api/", env!("CARGO_PKG_VERSION"));

/// A single API call relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Sends an [`ApiRequest`] and returns the raw response body.
///
/// Implementations report network failures and non-success statuses as
/// errors; callers propagate them unchanged.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<String>;
}

/// HTTP transport backed by a blocking `reqwest` client.
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    auth: Box<dyn AuthorizationHandler>,
}

impl HttpTransport {
    pub fn new(http: Client, base_url: Url, auth: Box<dyn AuthorizationHandler>) -> Self {
        Self {
            http,
            base_url: as_directory(base_url),
            auth,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_request(&self, request: &ApiRequest) -> Result<Request> {
        let url = endpoint_url(&self.base_url, &request.path)?;

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body.clone());
        }

        Ok(self.auth.authorize(builder).build()?)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<String> {
        let response = self.http.execute(self.build_request(request)?)?;

        if !response.status().is_success() {
            return Err(VcomError::Api {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response.text()?)
    }
}

/// Make sure `join` appends to the base path instead of replacing its last segment.
fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|_| VcomError::InvalidUrl(format!("{base}{path}")))
}

use reqwest::Method;
use reqwest::blocking::Client;
use tracing::debug;

use crate::auth::BasicAuthorizationHandler;
use crate::config::Config;
use crate::error::Result;
use crate::tickets::Ticket;
use crate::transport::{ApiRequest, HttpTransport, Transport};

/// Entry point to the API. Every resource call goes through [`ApiClient::run`].
pub struct ApiClient<T = HttpTransport> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Build an HTTP client from config, authorizing with API key and Basic credentials.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        let auth = BasicAuthorizationHandler::from_config(config)?;

        Ok(Self::new(HttpTransport::new(
            http,
            config.api_url()?,
            Box::new(auth),
        )))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one request against `path` (relative to the base URL) and
    /// return the raw response body.
    pub fn run(
        &self,
        path: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<&str>,
        method: Method,
    ) -> Result<String> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query: query
                .unwrap_or_default()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.map(String::from),
        };

        debug!(method = %request.method, path = %request.path, "sending request");
        self.transport.send(&request)
    }

    pub fn ticket(&self, ticket_id: u64) -> Ticket<'_, T> {
        Ticket::new(self, ticket_id)
    }
}

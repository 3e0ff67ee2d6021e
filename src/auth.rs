//! Request authorization.

use reqwest::blocking::RequestBuilder;

use crate::config::Config;
use crate::error::Result;

/// Attaches credentials to an outgoing request.
pub trait AuthorizationHandler {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder;
}

/// API key header plus HTTP Basic credentials.
pub struct BasicAuthorizationHandler {
    api_key: String,
    username: String,
    password: String,
}

impl BasicAuthorizationHandler {
    pub fn new(api_key: String, username: String, password: String) -> Self {
        Self {
            api_key,
            username,
            password,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        let (username, password) = config.credentials()?;
        Ok(Self::new(api_key, username, password))
    }
}

impl AuthorizationHandler for BasicAuthorizationHandler {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-API-KEY", &self.api_key)
            .basic_auth(&self.username, Some(&self.password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn test_basic_handler_sets_headers() {
        let handler = BasicAuthorizationHandler::new(
            "key-123".to_string(),
            "alice".to_string(),
            "hunter2".to_string(),
        );
        let client = reqwest::blocking::Client::new();
        let request = handler
            .authorize(client.get("https://example.com/v2/tickets"))
            .build()
            .unwrap();

        assert_eq!(request.headers()["X-API-KEY"], "key-123");
        let expected = format!("Basic {}", STANDARD.encode("alice:hunter2"));
        assert_eq!(request.headers()["Authorization"], expected.as_str());
    }
}

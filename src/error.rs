use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcomError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    Json(#[from] serde_json::Error),

    /// Client-side validation failure; the request is never sent.
    #[error("Invalid attachment - {0}.")]
    InvalidAttachment(&'static str),

    #[error("Invalid attachment id: {0:?}")]
    InvalidAttachmentId(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("No API key found. Set VCOM_API_KEY env var or add api_key to the config file")]
    MissingApiKey,

    #[error(
        "No credentials found. Set VCOM_USERNAME and VCOM_PASSWORD or add username/password to the config file"
    )]
    MissingCredentials,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, VcomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_attachment_messages() {
        assert_eq!(
            VcomError::InvalidAttachment("empty file name").to_string(),
            "Invalid attachment - empty file name."
        );
        assert_eq!(
            VcomError::InvalidAttachment("empty file content").to_string(),
            "Invalid attachment - empty file content."
        );
    }

    #[test]
    fn test_api_error_message() {
        let err = VcomError::Api {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 404): Not Found");
    }
}

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

use crate::error::{Result, VcomError};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

static DATA_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:(?P<mime>[^,]*?);base64,(?P<payload>[A-Za-z0-9+/=\s]*)$")
        .expect("valid data URI regex")
});

/// Binary content in `data:<mime-type>;base64,<payload>` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn encode(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    pub fn parse(uri: &str) -> Result<Self> {
        let caps = DATA_URI_RE
            .captures(uri.trim())
            .ok_or_else(|| VcomError::InvalidDataUri(preview(uri)))?;

        // Parameters such as `charset=utf-8` are dropped; only the media type is kept.
        let media_type = caps["mime"].split(';').next().unwrap_or_default();
        let mime_type = match media_type.trim() {
            "" => DEFAULT_MIME_TYPE.to_string(),
            mime => mime.to_string(),
        };

        let payload: String = caps["payload"]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        Ok(Self {
            mime_type,
            data: STANDARD.decode(payload)?,
        })
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for DataUri {
    type Err = VcomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Guess content type from a file extension
pub fn guess_content_type(filename: &str) -> &'static str {
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => return DEFAULT_MIME_TYPE,
    };

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// Short, printable excerpt for error messages; content can be megabytes.
fn preview(uri: &str) -> String {
    const MAX: usize = 40;
    match uri.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &uri[..idx]),
        None => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

    #[test]
    fn test_encode_jpeg() {
        let uri = DataUri::new("image/jpeg", JPEG_HEADER);
        assert_eq!(uri.encode(), "data:image/jpeg;base64,/9j/4AAQSkZJRgA=");
        assert_eq!(uri.to_string(), uri.encode());
    }

    #[test]
    fn test_encode_then_parse_restores_bytes() {
        let encoded = DataUri::new("image/jpeg", JPEG_HEADER).encode();
        let decoded: DataUri = encoded.parse().unwrap();
        assert_eq!(decoded.mime_type, "image/jpeg");
        assert_eq!(decoded.data, JPEG_HEADER);
    }

    #[test]
    fn test_parse_empty_mime_defaults() {
        let decoded = DataUri::parse("data:;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded.mime_type, "application/octet-stream");
        assert_eq!(decoded.data, b"hello");
    }

    #[test]
    fn test_parse_with_parameters() {
        let decoded = DataUri::parse("data:text/plain;charset=utf-8;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded.mime_type, "text/plain");
        assert_eq!(decoded.data, b"hello");

        let decoded = DataUri::parse("data:;charset=utf-8;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        let err = DataUri::parse("hello world").unwrap_err();
        assert!(matches!(err, VcomError::InvalidDataUri(_)));
    }

    #[test]
    fn test_parse_rejects_non_base64_uri() {
        let err = DataUri::parse("data:text/plain,hello").unwrap_err();
        assert!(matches!(err, VcomError::InvalidDataUri(_)));
    }

    #[test]
    fn test_parse_rejects_bad_padding() {
        let err = DataUri::parse("data:text/plain;base64,aGVsbG8").unwrap_err();
        assert!(matches!(err, VcomError::Base64(_)));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("photo.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("report.pdf"), "application/pdf");
        assert_eq!(guess_content_type("archive.tar.gz"), "application/gzip");
        assert_eq!(guess_content_type("README"), "application/octet-stream");
        assert_eq!(guess_content_type("data.bin"), "application/octet-stream");
    }

    #[test]
    fn test_preview_truncates() {
        let long = format!("data:{}", "x".repeat(100));
        let short = preview(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 43);
    }
}

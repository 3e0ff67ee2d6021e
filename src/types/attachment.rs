use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::data_uri::{guess_content_type, DataUri};
use crate::error::{Result, VcomError};

/// Attachment identifier; the API returns both numeric and string ids.
///
/// Canonical digit strings (`"1234"`, not `"01234"`) are normalized to
/// `Number` however the id is obtained, so equal ids compare equal.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum AttachmentId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttachmentId {
    Number(u64),
    Text(String),
}

impl From<RawAttachmentId> for AttachmentId {
    fn from(raw: RawAttachmentId) -> Self {
        match raw {
            RawAttachmentId::Number(id) => AttachmentId::Number(id),
            RawAttachmentId::Text(id) => AttachmentId::from(id),
        }
    }
}

impl<'de> Deserialize<'de> for AttachmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        RawAttachmentId::deserialize(deserializer).map(AttachmentId::from)
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentId::Number(id) => write!(f, "{id}"),
            AttachmentId::Text(id) => f.write_str(id),
        }
    }
}

fn canonical_number(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|n| n.to_string() == id)
}

impl FromStr for AttachmentId {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(AttachmentId::from(s))
    }
}

impl From<u64> for AttachmentId {
    fn from(id: u64) -> Self {
        AttachmentId::Number(id)
    }
}

impl From<&str> for AttachmentId {
    fn from(id: &str) -> Self {
        match canonical_number(id) {
            Some(n) => AttachmentId::Number(n),
            None => AttachmentId::Text(id.to_string()),
        }
    }
}

impl From<String> for AttachmentId {
    fn from(id: String) -> Self {
        match canonical_number(&id) {
            Some(n) => AttachmentId::Number(n),
            None => AttachmentId::Text(id),
        }
    }
}

/// A ticket attachment, either built for upload or returned by the API.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<AttachmentId>,
    #[serde(default)]
    pub filename: String,
    /// `data:<mime-type>;base64,<payload>`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
    #[serde(
        default,
        with = "utc_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
}

impl AttachmentFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn from_bytes(filename: impl Into<String>, mime_type: &str, bytes: &[u8]) -> Self {
        Self::new(filename, DataUri::new(mime_type, bytes).encode())
    }

    /// Read a file from disk and encode it, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(VcomError::FileNotFound(path.display().to_string()));
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let bytes = std::fs::read(path).map_err(|e| VcomError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let mime_type = guess_content_type(&filename);
        Ok(Self::from_bytes(filename, mime_type, &bytes))
    }

    pub fn decode_content(&self) -> Result<DataUri> {
        DataUri::parse(&self.content)
    }

    /// Checks required for creation. Nothing is sent when this fails.
    pub fn validate(&self) -> Result<()> {
        if self.filename.is_empty() {
            return Err(VcomError::InvalidAttachment("empty file name"));
        }
        if self.content.is_empty() {
            return Err(VcomError::InvalidAttachment("empty file content"));
        }
        Ok(())
    }
}

/// Server timestamps come without an offset and are UTC.
mod utc_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_full_attachment() {
        let json = r#"{
            "attachmentId": 1234,
            "filename": "test.jpg",
            "content": "data:image/jpeg;base64,/9j/4AAQSkZJRgA=",
            "creatorId": 12345,
            "description": "test attachment",
            "created": "2017-08-29T03:22:23"
        }"#;

        let attachment: AttachmentFile = serde_json::from_str(json).unwrap();
        assert_eq!(
            attachment,
            AttachmentFile {
                attachment_id: Some(AttachmentId::Number(1234)),
                filename: "test.jpg".to_string(),
                content: "data:image/jpeg;base64,/9j/4AAQSkZJRgA=".to_string(),
                description: Some("test attachment".to_string()),
                creator_id: Some(12345),
                created: Some(Utc.with_ymd_and_hms(2017, 8, 29, 3, 22, 23).unwrap()),
            }
        );
    }

    #[test]
    fn test_deserialize_string_id() {
        let attachment: AttachmentFile =
            serde_json::from_str(r#"{"attachmentId": "1234", "filename": "a.jpg"}"#).unwrap();
        assert_eq!(attachment.attachment_id, Some(AttachmentId::Number(1234)));
        assert_eq!(attachment.attachment_id.unwrap().to_string(), "1234");

        let attachment: AttachmentFile =
            serde_json::from_str(r#"{"attachmentId": "att-7", "filename": "a.jpg"}"#).unwrap();
        assert_eq!(
            attachment.attachment_id,
            Some(AttachmentId::Text("att-7".to_string()))
        );
    }

    #[test]
    fn test_attachment_id_from_str() {
        assert_eq!("1234".parse::<AttachmentId>(), Ok(AttachmentId::Number(1234)));
        assert_eq!(
            "abc-1".parse::<AttachmentId>(),
            Ok(AttachmentId::Text("abc-1".to_string()))
        );
    }

    #[test]
    fn test_attachment_id_conversions_agree() {
        let parsed: AttachmentId = "1234".parse().unwrap();
        assert_eq!(AttachmentId::from("1234"), parsed);
        assert_eq!(AttachmentId::from("1234".to_string()), parsed);
        assert_eq!(AttachmentId::from(1234), parsed);

        // Leading zeros are part of the id and must survive.
        assert_eq!(
            AttachmentId::from("01234"),
            AttachmentId::Text("01234".to_string())
        );
        assert_eq!(AttachmentId::from("01234").to_string(), "01234");
    }

    #[test]
    fn test_timestamp_with_offset_converts_to_utc() {
        let parsed = utc_timestamp::parse("2017-08-29T05:22:23+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2017, 8, 29, 3, 22, 23).unwrap());
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        let result: std::result::Result<AttachmentFile, _> =
            serde_json::from_str(r#"{"filename": "a.jpg", "created": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_created_is_none() {
        let attachment: AttachmentFile =
            serde_json::from_str(r#"{"filename": "a.jpg", "created": null}"#).unwrap();
        assert!(attachment.created.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(AttachmentFile::new("a.txt", "data:text/plain;base64,YQ==")
            .validate()
            .is_ok());

        let err = AttachmentFile::new("", "data:text/plain;base64,YQ==")
            .validate()
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid attachment - empty file name.");

        let err = AttachmentFile::new("a.txt", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid attachment - empty file content.");
    }

    #[test]
    fn test_from_path_encodes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let attachment = AttachmentFile::from_path(&path).unwrap();
        assert_eq!(attachment.filename, "notes.txt");
        assert_eq!(attachment.content, "data:text/plain;base64,aGVsbG8=");

        let decoded = attachment.decode_content().unwrap();
        assert_eq!(decoded.data, b"hello");
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AttachmentFile::from_path(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, VcomError::FileNotFound(_)));
    }
}

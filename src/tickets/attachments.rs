use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::client::ApiClient;
use crate::error::{Result, VcomError};
use crate::transport::Transport;
use crate::types::{AttachmentFile, AttachmentId};

/// Unreserved characters: A-Z a-z 0-9 - . _ ~
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Render an id as a single escaped path segment.
fn path_segment(id: &AttachmentId) -> Result<String> {
    let raw = id.to_string();

    // URL joining resolves dot segments even when they are percent-encoded.
    if raw.is_empty() || raw == "." || raw == ".." {
        return Err(VcomError::InvalidAttachmentId(raw));
    }

    Ok(percent_encode(raw.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string())
}

/// List entries only carry the identifying fields.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentSummary {
    attachment_id: AttachmentId,
    filename: String,
}

impl From<AttachmentSummary> for AttachmentFile {
    fn from(summary: AttachmentSummary) -> Self {
        Self {
            attachment_id: Some(summary.attachment_id),
            filename: summary.filename,
            ..Default::default()
        }
    }
}

/// Request body for creation; key order is part of the wire format.
#[derive(Serialize)]
struct NewAttachment<'a> {
    filename: &'a str,
    content: &'a str,
    description: Option<&'a str>,
}

/// Attachments of one ticket.
pub struct Attachments<'a, T> {
    client: &'a ApiClient<T>,
    ticket_id: u64,
}

impl<'a, T: Transport> Attachments<'a, T> {
    pub fn new(client: &'a ApiClient<T>, ticket_id: u64) -> Self {
        Self { client, ticket_id }
    }

    fn path(&self) -> String {
        format!("tickets/{}/attachments", self.ticket_id)
    }

    /// List attachments in server order. Only `attachment_id` and `filename` are set.
    pub fn get(&self) -> Result<Vec<AttachmentFile>> {
        let json = self.client.run(&self.path(), None, None, Method::GET)?;
        let summaries: Vec<AttachmentSummary> = serde_json::from_str(&json)?;

        Ok(summaries.into_iter().map(AttachmentFile::from).collect())
    }

    /// Upload a new attachment and return the server's response object as-is.
    pub fn create(&self, attachment: &AttachmentFile) -> Result<Map<String, Value>> {
        attachment.validate()?;

        let body = serde_json::to_string(&NewAttachment {
            filename: &attachment.filename,
            content: &attachment.content,
            description: attachment.description.as_deref(),
        })?;

        let json = self
            .client
            .run(&self.path(), None, Some(&body), Method::POST)?;
        let created: Map<String, Value> = serde_json::from_str(&json)?;

        info!(
            ticket_id = self.ticket_id,
            filename = %attachment.filename,
            attachment_id = ?created.get("attachmentId"),
            "attachment created"
        );

        Ok(created)
    }
}

/// One attachment of a ticket.
pub struct Attachment<'a, T> {
    client: &'a ApiClient<T>,
    ticket_id: u64,
    attachment_id: AttachmentId,
}

impl<'a, T: Transport> Attachment<'a, T> {
    pub fn new(client: &'a ApiClient<T>, ticket_id: u64, attachment_id: AttachmentId) -> Self {
        Self {
            client,
            ticket_id,
            attachment_id,
        }
    }

    /// Fetch metadata and content. `content` is returned exactly as the server sent it.
    pub fn get(&self) -> Result<AttachmentFile> {
        let path = format!(
            "tickets/{}/attachments/{}",
            self.ticket_id,
            path_segment(&self.attachment_id)?
        );
        let json = self.client.run(&path, None, None, Method::GET)?;

        Ok(serde_json::from_str(&json)?)
    }
}

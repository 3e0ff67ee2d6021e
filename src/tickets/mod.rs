//! Ticket sub-resources.

mod attachments;

pub use attachments::{Attachment, Attachments};

use crate::client::ApiClient;
use crate::transport::Transport;
use crate::types::AttachmentId;

/// A single ticket, addressed by id.
pub struct Ticket<'a, T> {
    client: &'a ApiClient<T>,
    ticket_id: u64,
}

impl<'a, T: Transport> Ticket<'a, T> {
    pub fn new(client: &'a ApiClient<T>, ticket_id: u64) -> Self {
        Self { client, ticket_id }
    }

    pub fn id(&self) -> u64 {
        self.ticket_id
    }

    pub fn attachments(&self) -> Attachments<'a, T> {
        Attachments::new(self.client, self.ticket_id)
    }

    pub fn attachment(&self, attachment_id: impl Into<AttachmentId>) -> Attachment<'a, T> {
        Attachment::new(self.client, self.ticket_id, attachment_id.into())
    }
}

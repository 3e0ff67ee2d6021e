//! Client for the ticket attachment endpoints of the VCOM API.
//!
//! ```no_run
//! use vcom_api::{ApiClient, AttachmentFile, Config};
//!
//! # fn main() -> vcom_api::Result<()> {
//! let client = ApiClient::from_config(&Config::load()?)?;
//!
//! for attachment in client.ticket(123).attachments().get()? {
//!     println!("{:?} {}", attachment.attachment_id, attachment.filename);
//! }
//!
//! let upload = AttachmentFile::from_bytes("note.txt", "text/plain", b"hello")
//!     .with_description("site visit");
//! let created = client.ticket(123).attachments().create(&upload)?;
//! println!("{}", created["attachmentId"]);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod tickets;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::Config;
pub use error::{Result, VcomError};
pub use types::{AttachmentFile, AttachmentId, DataUri};

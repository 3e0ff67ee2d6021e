mod attachment;
mod data_uri;

pub use attachment::{AttachmentFile, AttachmentId};
pub use data_uri::{guess_content_type, DataUri};

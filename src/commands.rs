pub mod attachments;
pub mod init;

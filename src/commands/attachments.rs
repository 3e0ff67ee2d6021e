use std::path::{Path, PathBuf};

use colored::Colorize;
use tabled::Tabled;
use vcom_api::transport::Transport;
use vcom_api::{ApiClient, AttachmentFile, Result};

use crate::cli::{AttachmentArgs, DownloadAttachmentArgs, UploadFileArgs};
use crate::output::{self, format_date, format_size, truncate};

#[derive(Tabled)]
struct AttachmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Filename")]
    filename: String,
}

impl From<&AttachmentFile> for AttachmentRow {
    fn from(attachment: &AttachmentFile) -> Self {
        Self {
            id: attachment
                .attachment_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            filename: truncate(&attachment.filename, 60),
        }
    }
}

pub fn list<T: Transport>(client: &ApiClient<T>, ticket_id: u64) -> Result<()> {
    let attachments = client.ticket(ticket_id).attachments().get()?;

    if attachments.is_empty() {
        output::print_message(&format!("No attachments found for ticket {ticket_id}"));
        return Ok(());
    }

    output::print_table(&attachments, |attachment| AttachmentRow::from(attachment));

    Ok(())
}

pub fn view<T: Transport>(client: &ApiClient<T>, args: AttachmentArgs) -> Result<()> {
    let mut attachment = client
        .ticket(args.ticket)
        .attachment(args.attachment)
        .get()?;

    // Size and type are shown instead of the encoded payload.
    let decoded = attachment.decode_content().ok();
    attachment.content.clear();

    output::print_item(&attachment, |a| {
        println!("{}", a.filename.bold());
        println!("{}", "─".repeat(40));
        if let Some(id) = &a.attachment_id {
            println!("{:<12} {}", "ID:".dimmed(), id);
        }
        if let Some(uri) = &decoded {
            println!("{:<12} {}", "Type:".dimmed(), uri.mime_type);
            println!("{:<12} {}", "Size:".dimmed(), format_size(uri.data.len()));
        }
        if let Some(creator) = a.creator_id {
            println!("{:<12} {}", "Creator:".dimmed(), creator);
        }
        if let Some(created) = &a.created {
            println!("{:<12} {}", "Created:".dimmed(), format_date(created));
        }
        if let Some(description) = &a.description {
            println!();
            println!("{description}");
        }
    });

    Ok(())
}

pub fn download<T: Transport>(client: &ApiClient<T>, args: DownloadAttachmentArgs) -> Result<()> {
    let attachment = client
        .ticket(args.ticket)
        .attachment(args.attachment)
        .get()?;
    let decoded = attachment.decode_content()?;

    if !args.output.exists() {
        std::fs::create_dir_all(&args.output)?;
    }

    let path = output_path(&args.output, &attachment.filename, args.ticket);
    std::fs::write(&path, &decoded.data)?;

    output::print_message(&format!(
        "Downloaded {} ({}) to {}",
        attachment.filename,
        format_size(decoded.data.len()),
        path.display()
    ));

    Ok(())
}

pub fn upload<T: Transport>(client: &ApiClient<T>, args: UploadFileArgs) -> Result<()> {
    let mut attachment = AttachmentFile::from_path(&args.file)?;
    attachment.description = args.description;

    let created = client.ticket(args.ticket).attachments().create(&attachment)?;

    if output::is_json_output() {
        println!(
            "{}",
            serde_json::to_string_pretty(&created).unwrap_or_default()
        );
        return Ok(());
    }

    let id = created
        .get("attachmentId")
        .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
        .unwrap_or_else(|| "?".to_string());

    output::print_message(&format!(
        "Uploaded \"{}\" to ticket {} (attachment {})",
        attachment.filename, args.ticket, id
    ));

    Ok(())
}

fn output_path(dir: &Path, filename: &str, ticket_id: u64) -> PathBuf {
    let name = sanitize_filename(filename);
    if name.is_empty() {
        dir.join(format!("ticket-{ticket_id}-attachment"))
    } else {
        dir.join(name)
    }
}

/// Keep a server-supplied filename from escaping the output directory.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    sanitized.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_plain() {
        assert_eq!(sanitize_filename("test.jpg"), "test.jpg");
        assert_eq!(sanitize_filename("site photo (1).jpg"), "site_photo__1_.jpg");
    }

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename(".."), "");
    }

    #[test]
    fn test_output_path_fallback() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            output_path(dir, "..", 123),
            PathBuf::from("/tmp/out/ticket-123-attachment")
        );
        assert_eq!(
            output_path(dir, "a.jpg", 123),
            PathBuf::from("/tmp/out/a.jpg")
        );
    }
}

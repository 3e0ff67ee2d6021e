use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use vcom_api::AttachmentId;

#[derive(Parser)]
#[command(name = "vcom")]
#[command(about = "A CLI for VCOM ticket attachments", version)]
#[command(after_help = "EXAMPLES:
    vcom attachments list 123               List attachments of ticket 123
    vcom attachments view 123 1234          Show attachment details
    vcom attachments download 123 1234      Save an attachment to disk
    vcom attachments upload 123 ./photo.jpg Attach a file to a ticket")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and request logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage ticket attachments
    #[command(
        alias = "a",
        after_help = "EXAMPLES:
    vcom attachments list 123
    vcom attachments view 123 1234
    vcom attachments download 123 1234 -o ./downloads
    vcom attachments upload 123 ./report.pdf -d \"Inspection report\""
    )]
    Attachments {
        #[command(subcommand)]
        action: AttachmentCommands,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    vcom completions bash > ~/.bash_completion.d/vcom
    vcom completions zsh > ~/.zfunc/_vcom
    vcom completions fish > ~/.config/fish/completions/vcom.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    vcom init")]
    Init,
}

#[derive(Subcommand)]
pub enum AttachmentCommands {
    /// List attachments on a ticket
    #[command(alias = "ls")]
    List {
        /// Ticket ID
        ticket: u64,
    },
    /// Show attachment details
    #[command(alias = "show")]
    View(AttachmentArgs),
    /// Download an attachment to a local file
    Download(DownloadAttachmentArgs),
    /// Upload a file and attach it to a ticket
    Upload(UploadFileArgs),
}

#[derive(Args)]
pub struct AttachmentArgs {
    /// Ticket ID
    pub ticket: u64,

    /// Attachment ID
    pub attachment: AttachmentId,
}

#[derive(Args)]
pub struct DownloadAttachmentArgs {
    /// Ticket ID
    pub ticket: u64,

    /// Attachment ID
    pub attachment: AttachmentId,

    /// Output directory (default: current directory)
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct UploadFileArgs {
    /// Ticket ID
    pub ticket: u64,

    /// Path to file to upload
    pub file: PathBuf,

    /// Description for the attachment
    #[arg(long, short)]
    pub description: Option<String>,
}

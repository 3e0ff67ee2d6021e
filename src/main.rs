mod cli;
mod commands;
mod output;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{AttachmentCommands, Cli, Commands};
use vcom_api::{ApiClient, Config, Result};

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "vcom", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        Commands::Attachments { action } => {
            let config = Config::load()?;
            let client = ApiClient::from_config(&config)?;

            match action {
                AttachmentCommands::List { ticket } => {
                    commands::attachments::list(&client, ticket)?;
                }
                AttachmentCommands::View(args) => {
                    commands::attachments::view(&client, args)?;
                }
                AttachmentCommands::Download(args) => {
                    commands::attachments::download(&client, args)?;
                }
                AttachmentCommands::Upload(args) => {
                    commands::attachments::upload(&client, args)?;
                }
            }
        }
    }

    Ok(())
}

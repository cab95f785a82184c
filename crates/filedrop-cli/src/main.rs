//! filedrop CLI: upload a file to a filedrop storage endpoint.
//!
//! Set FILEDROP_API_URL (or API_BASE_URL), or pass --api-url.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use filedrop_cli::init_tracing;
use filedrop_cli::render::{file_details, success_details, upload_label};
use filedrop_client::{submit, UploadClient};
use filedrop_core::{ClientConfig, SelectedFile, UploadSession, UploadState};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "filedrop", about = "Upload files to a filedrop storage endpoint")]
struct Cli {
    /// Base URL of the storage endpoint (overrides FILEDROP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and upload a file
    Upload {
        /// Path to the file to upload
        file: PathBuf,
        /// Print the server response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a file without uploading it
    Check {
        /// Path to the file to check
        file: PathBuf,
    },
    /// Show the upload guidelines
    Guidelines,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Pick `path` into the session. Fails with the validation message when the
/// file is rejected.
fn select_file(session: &mut UploadSession, path: &Path, quiet: bool) -> anyhow::Result<()> {
    let file = SelectedFile::from_path(path)?;
    if !quiet {
        println!("{}", file_details(&file));
    }

    session.select(Some(file))?;
    if let Some(message) = session.error_message() {
        anyhow::bail!(message);
    }
    Ok(())
}

fn progress_bar() -> anyhow::Result<ProgressBar> {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}]")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );
    bar.set_message(upload_label(false, 0));
    Ok(bar)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut session = UploadSession::default();

    match cli.command {
        Commands::Guidelines => {
            println!("{}", session.rules().guidelines());
        }
        Commands::Check { file } => {
            select_file(&mut session, &file, false)?;
            println!("\nReady to upload.");
        }
        Commands::Upload { file, json } => {
            let config = match cli.api_url {
                Some(url) => ClientConfig::with_base_url(url),
                None => ClientConfig::from_env()?,
            };
            let client = UploadClient::new(&config).context(
                "Failed to create upload client. Set FILEDROP_API_URL or pass --api-url",
            )?;
            tracing::debug!(api_url = %config.api_base_url, "Resolved configuration");

            select_file(&mut session, &file, json)?;

            let bar = progress_bar()?;
            submit(&client, &mut session, |state| {
                if let UploadState::Uploading { percent, .. } = state {
                    bar.set_position(u64::from(*percent));
                    bar.set_message(upload_label(true, *percent));
                }
            })
            .await;
            bar.finish_and_clear();

            match session.state() {
                UploadState::Succeeded { result, .. } => {
                    if json {
                        print_json(result)?;
                    } else {
                        println!("\n{}", success_details(result));
                    }
                }
                _ => {
                    let message = session
                        .error_message()
                        .unwrap_or_else(|| "Upload did not start".to_string());
                    anyhow::bail!(message);
                }
            }
        }
    }

    Ok(())
}

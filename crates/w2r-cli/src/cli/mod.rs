//! CLI for the Web to Reader conversion client.

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use w2r_core::client::BackendClient;
use w2r_core::config;
use w2r_core::model::BookFormat;
use w2r_core::save::DirectorySink;

use commands::{run_books, run_download, run_fetch, run_process, Pick};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "w2r")]
#[command(about = "W2R: turn web pages into PDF or EPUB books", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides config.toml and W2R_BACKEND_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub backend: Option<String>,

    /// Directory to save downloads into (default: config `download_dir`, else current dir).
    #[arg(long, short = 'o', global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Submit a URL for conversion and list the candidate books.
    Process {
        /// Web page to convert.
        url: String,
        /// Output format: pdf or epub.
        #[arg(long, short)]
        format: BookFormat,
    },

    /// Submit a URL, then download the selected books.
    Fetch {
        /// Web page to convert.
        url: String,
        /// Output format: pdf or epub.
        #[arg(long, short)]
        format: BookFormat,
        #[command(flatten)]
        pick: Pick,
    },

    /// List candidates from the backend's book list; download them with --book/--all.
    Books {
        /// Output format used when downloading.
        #[arg(long, short, default_value = "pdf")]
        format: BookFormat,
        /// Source URL sent along with a download.
        #[arg(long)]
        url: Option<String>,
        #[command(flatten)]
        pick: Pick,
    },

    /// Download books by id without listing them first.
    Download {
        /// Output format: pdf or epub.
        #[arg(long, short)]
        format: BookFormat,
        /// Source URL the ids belong to.
        #[arg(long)]
        url: Option<String>,
        /// Book id to include (repeatable).
        #[arg(long = "book", short = 'b', value_name = "ID")]
        books: Vec<String>,
    },
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(backend) = cli.backend {
            cfg.backend_url = backend;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let client = BackendClient::from_config(&cfg)?;
        let download_dir = match cli.output_dir.or_else(|| cfg.download_dir.clone()) {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let sink = DirectorySink::new(download_dir).with_overwrite(cfg.overwrite);
        tracing::debug!(
            backend = client.routes().base_url(),
            download_dir = %sink.dir().display(),
            "client ready"
        );

        match cli.command {
            CliCommand::Process { url, format } => run_process(&client, &url, format).await?,
            CliCommand::Fetch { url, format, pick } => {
                run_fetch(&client, &sink, &url, format, &pick).await?
            }
            CliCommand::Books { format, url, pick } => {
                run_books(&client, &sink, format, url, &pick).await?
            }
            CliCommand::Download { format, url, books } => {
                run_download(&client, &sink, format, url, books).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

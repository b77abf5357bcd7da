//! `w2r fetch <url> --format <fmt> [--book ID... | --all]` – submit, select, download.

use anyhow::Result;
use w2r_core::client::BackendClient;
use w2r_core::flow::{SelectionFlow, SubmissionFlow};
use w2r_core::model::BookFormat;
use w2r_core::save::FileSink;

use super::{list_and_download, Pick};

pub async fn run_fetch(
    client: &BackendClient,
    sink: &dyn FileSink,
    url: &str,
    format: BookFormat,
    pick: &Pick,
) -> Result<()> {
    let mut submission = SubmissionFlow::new(client.clone());
    submission.set_url(url);
    submission.set_format(Some(format));

    println!("Processing {} as {format}...", submission.url());
    let handoff = submission.submit().await?;
    let mut selection = SelectionFlow::from_handoff(client.clone(), handoff);
    list_and_download(&mut selection, pick, sink).await
}

//! `w2r process <url> --format <fmt>` – submit a page and list its candidates.

use anyhow::Result;
use w2r_core::client::BackendClient;
use w2r_core::flow::{SelectionFlow, SubmissionFlow};
use w2r_core::model::BookFormat;

use crate::cli::render;

pub async fn run_process(client: &BackendClient, url: &str, format: BookFormat) -> Result<()> {
    let mut submission = SubmissionFlow::new(client.clone());
    submission.set_url(url);
    submission.set_format(Some(format));

    println!("Processing {} as {format}...", submission.url());
    let handoff = submission.submit().await?;
    let selection = SelectionFlow::from_handoff(client.clone(), handoff);
    for line in render::entry_lines(selection.entries()) {
        println!("{line}");
    }
    Ok(())
}

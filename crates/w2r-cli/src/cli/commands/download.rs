//! `w2r download --format <fmt> --book <ID>...` – download known ids directly.

use anyhow::Result;
use w2r_core::client::BackendClient;
use w2r_core::flow::SelectionFlow;
use w2r_core::model::BookFormat;
use w2r_core::save::FileSink;

pub async fn run_download(
    client: &BackendClient,
    sink: &dyn FileSink,
    format: BookFormat,
    url: Option<String>,
    books: Vec<String>,
) -> Result<()> {
    let mut selection = SelectionFlow::new(client.clone(), format, url);
    let saved = selection.download_ids(books, sink).await?;
    println!("Saved {} ({} bytes)", saved.path.display(), saved.bytes);
    Ok(())
}

//! `w2r books` – list candidates from `/get_books`, optionally download some.

use anyhow::Result;
use w2r_core::client::BackendClient;
use w2r_core::flow::SelectionFlow;
use w2r_core::model::BookFormat;
use w2r_core::save::FileSink;

use super::{list_and_download, Pick};

pub async fn run_books(
    client: &BackendClient,
    sink: &dyn FileSink,
    format: BookFormat,
    url: Option<String>,
    pick: &Pick,
) -> Result<()> {
    let mut selection = SelectionFlow::new(client.clone(), format, url);
    println!("Loading books...");
    selection.load().await?;
    list_and_download(&mut selection, pick, sink).await
}

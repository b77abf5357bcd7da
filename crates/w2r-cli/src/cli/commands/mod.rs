//! CLI command handlers, one file per command.

mod books;
mod download;
mod fetch;
mod process;

pub use books::run_books;
pub use download::run_download;
pub use fetch::run_fetch;
pub use process::run_process;

use anyhow::Result;
use clap::Args;
use w2r_core::flow::SelectionFlow;
use w2r_core::save::FileSink;

use super::render;

/// Which listed books to download.
#[derive(Debug, Clone, Default, Args)]
pub struct Pick {
    /// Book id to download (repeatable).
    #[arg(long = "book", short = 'b', value_name = "ID")]
    pub books: Vec<String>,
    /// Download every listed book.
    #[arg(long, conflicts_with = "books")]
    pub all: bool,
}

impl Pick {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && !self.all
    }
}

/// Print the entries, then download the picked ones. With nothing picked the
/// list is all the user gets.
async fn list_and_download(
    selection: &mut SelectionFlow,
    pick: &Pick,
    sink: &dyn FileSink,
) -> Result<()> {
    for line in render::entry_lines(selection.entries()) {
        println!("{line}");
    }
    if pick.is_empty() {
        if !selection.entries().is_empty() {
            println!("Select books with --book <ID> (repeatable) or --all to download.");
        }
        return Ok(());
    }

    if pick.all {
        selection.select_all();
    } else {
        selection.select_values(&pick.books)?;
    }
    let saved = selection.request_download(sink).await?;
    println!("Saved {} ({} bytes)", saved.path.display(), saved.bytes);
    Ok(())
}

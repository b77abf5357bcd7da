//! Data model shared by both flows: formats, candidates, wire bodies.

mod book;
mod format;
mod wire;

pub use book::{BookCandidate, BookId};
pub use format::{BookFormat, UnknownFormat};
pub use wire::{BackendReply, ConversionRequest, DownloadSelection};

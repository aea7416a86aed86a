mod client;
mod types;

pub use client::{RecordClient, record_url};
pub use types::{FileEntry, FileLinks, Record};

mod args;
mod fetch;
mod params;
mod resolved_command;

pub use args::{Args, FetchCommand, parse_args};
pub use fetch::{DownloadedFile, FetchSummary, fetch_record_files, run_fetch};
pub use params::FetchParams;
pub use resolved_command::resolve_command;

mod download;
mod progress;
mod types;

pub use download::{DOWNLOAD_CHUNK_SIZE, download_file};
pub use progress::{DownloadProgress, NoProgress, ProgressBarReporter};
pub use types::DownloadTarget;

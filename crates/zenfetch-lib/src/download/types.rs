use std::path::PathBuf;

/// Local destination of a download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTarget {
    pub path: PathBuf,
    /// Expected size in bytes, used for progress display only
    pub expected_size: Option<u64>,
}

impl DownloadTarget {
    pub fn new(path: impl Into<PathBuf>, expected_size: Option<u64>) -> Self {
        Self {
            path: path.into(),
            expected_size,
        }
    }

    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

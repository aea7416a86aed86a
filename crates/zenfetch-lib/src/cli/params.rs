use crate::config::Config;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub app_config: Config,
    pub output_dir: PathBuf,
    pub show_progress: bool,
}

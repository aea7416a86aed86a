use crate::cli::args::FetchCommand;
use crate::cli::params::FetchParams;
use crate::config::load_config;
use crate::error::ZenfetchError;
use std::path::{Path, PathBuf};

pub fn resolve_command(command: FetchCommand) -> Result<FetchParams, ZenfetchError> {
    let FetchCommand {
        config_path,
        out_path,
        access_token,
        show_progress,
    } = command;

    let mut app_config = load_config(config_path.as_deref().map(Path::new))?;

    if let Some(access_token) = access_token.filter(|token| !token.is_empty()) {
        app_config.access_token = Some(access_token);
    }

    let output_dir = out_path
        .map(PathBuf::from)
        .or_else(|| app_config.output.path.clone())
        .ok_or_else(|| ZenfetchError::CliArgumentValidation {
            details: "No output directory provided. Pass --out_path or configure output.path."
                .to_string(),
        })?;

    Ok(FetchParams {
        app_config,
        output_dir,
        show_progress,
    })
}

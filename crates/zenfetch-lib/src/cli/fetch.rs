use crate::archive::extract_archive;
use crate::cli::FetchParams;
use crate::config::Config;
use crate::download::{
    DownloadProgress, DownloadTarget, NoProgress, ProgressBarReporter, download_file,
};
use crate::error::ZenfetchError;
use crate::http::build_http_client;
use crate::pointer::write_checkpoint_pointer;
use crate::record::RecordClient;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub downloaded: Vec<DownloadedFile>,
    pub extracted_entries: usize,
    pub pointer_path: Option<PathBuf>,
}

pub async fn run_fetch(params: FetchParams) -> Result<FetchSummary, ZenfetchError> {
    let FetchParams {
        app_config,
        output_dir,
        show_progress,
    } = params;

    let progress: Box<dyn DownloadProgress> = if show_progress {
        Box::new(ProgressBarReporter::new())
    } else {
        Box::new(NoProgress)
    };

    let summary = fetch_record_files(&app_config, &output_dir, progress.as_ref()).await?;

    tracing::info!(
        files = summary.downloaded.len(),
        output = %output_dir.display(),
        "Fetch completed successfully"
    );
    Ok(summary)
}

/// Downloads the configured files of the record into `output_dir`, then runs the
/// optional extraction and pointer steps. The first failing step aborts the rest.
pub async fn fetch_record_files(
    app_config: &Config,
    output_dir: &Path,
    progress: &dyn DownloadProgress,
) -> Result<FetchSummary, ZenfetchError> {
    let record_id = app_config.record_id.as_str();
    let mut summary = FetchSummary::default();

    std::fs::create_dir_all(output_dir).map_err(|e| ZenfetchError::OutputFile {
        path: output_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let http = build_http_client(Duration::from_secs(app_config.connect_timeout_secs))?;
    let client = RecordClient::new(
        http.clone(),
        app_config.api_url.as_str(),
        app_config.access_token.clone(),
    );

    tracing::info!("Fetching metadata of record {}", record_id);
    let record = client.fetch_record(record_id).await?;

    // Every requested file has to be listed before anything is downloaded.
    let entries = app_config
        .files
        .iter()
        .map(|filename| record.require_file(record_id, filename))
        .collect::<Result<Vec<_>, _>>()?;

    for entry in entries {
        let target = DownloadTarget::new(output_dir.join(entry.name()), Some(entry.size));
        let size = download_file(
            &http,
            entry.download_url(),
            client.access_token(),
            &target,
            progress,
        )
        .await?;

        tracing::info!(
            "File '{}' has been downloaded to '{}'",
            entry.name(),
            target.path.display()
        );
        summary.downloaded.push(DownloadedFile {
            name: entry.name().to_string(),
            path: target.path,
            size,
        });
    }

    for archive in &app_config.extract {
        summary.extracted_entries += extract_archive(&output_dir.join(archive), output_dir)?;
    }

    if let Some(checkpoint) = &app_config.checkpoint {
        summary.pointer_path = Some(write_checkpoint_pointer(output_dir, checkpoint)?);
    }

    Ok(summary)
}

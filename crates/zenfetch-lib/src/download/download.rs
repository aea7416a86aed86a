use super::progress::DownloadProgress;
use super::types::DownloadTarget;
use crate::error::ZenfetchError;
use crate::http::{authorized_get, error_for_status};
use futures::StreamExt;
use reqwest::Client;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Size of the write buffer between the response stream and the destination file.
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024 * 1024;

/// Streams `url` into `target.path`, replacing any existing file.
///
/// Nothing is retried or cleaned up: a failure part-way leaves whatever was
/// written so far on disk. Returns the number of bytes written.
pub async fn download_file(
    client: &Client,
    url: &str,
    access_token: Option<&str>,
    target: &DownloadTarget,
    progress: &dyn DownloadProgress,
) -> Result<u64, ZenfetchError> {
    let output_path = &target.path;
    tracing::info!(url, output = %output_path.display(), "Downloading");

    let response = error_for_status(authorized_get(client, url, access_token).send().await?)?;
    let total = response.content_length().or(target.expected_size);
    tracing::debug!(url, total = ?total, "Download started");

    let file = tokio::fs::File::create(output_path)
        .await
        .map_err(|e| ZenfetchError::OutputFile {
            path: output_path.clone(),
            reason: e.to_string(),
        })?;
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);

    progress.start(&target.display_name(), total);

    let mut transferred: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| ZenfetchError::OutputFile {
                path: output_path.clone(),
                reason: e.to_string(),
            })?;

        transferred += chunk.len() as u64;
        progress.update(transferred);
    }

    writer.flush().await.map_err(|e| ZenfetchError::OutputFile {
        path: output_path.clone(),
        reason: e.to_string(),
    })?;
    progress.finish();

    if let Some(total) = total
        && total != transferred
    {
        tracing::warn!(
            url,
            expected = total,
            actual = transferred,
            "Downloaded size differs from the announced size"
        );
    }

    Ok(transferred)
}

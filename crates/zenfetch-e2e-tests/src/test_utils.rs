use eyre::Result;
use mockito::{Mock, ServerGuard};
use std::io::{Cursor, Write};
use std::path::PathBuf;
use tempfile::TempDir;
use zenfetch_lib::config::{CheckpointConfig, Config, OutputConfig};
use zip::write::SimpleFileOptions;

pub const TEST_RECORD_ID: &str = "15040443";

pub fn create_test_config(api_url: &str) -> Config {
    Config {
        api_url: api_url.to_string(),
        record_id: TEST_RECORD_ID.to_string(),
        files: vec!["config.zip".to_string(), "test_dataset.h5".to_string()],
        access_token: None,
        extract: vec!["config.zip".to_string()],
        checkpoint: Some(CheckpointConfig::default()),
        connect_timeout_secs: 5,
        output: OutputConfig::default(),
    }
}

pub fn setup_test_environment(config: &Config) -> Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;

    let config_path = temp_dir.path().join("config.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(config)?)?;

    Ok((temp_dir, config_path))
}

/// A small `config.zip` shaped like the published one: a `data/config` tree.
pub fn config_archive() -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.add_directory("data/", options)?;
    writer.add_directory("data/config/", options)?;
    writer.start_file("data/config/model.yaml", options)?;
    writer.write_all(b"hidden_size: 256\nlayers: 4\n")?;
    writer.start_file("data/config/train.yaml", options)?;
    writer.write_all(b"epochs: 10\n")?;

    Ok(writer.finish()?.into_inner())
}

pub fn dataset_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 256) as u8).collect()
}

pub fn api_url(server: &ServerGuard) -> String {
    format!("{}/api/records", server.url())
}

pub fn file_path(record_id: &str, filename: &str) -> String {
    format!("/api/records/{record_id}/files/{filename}/content")
}

/// Serves the metadata of `record_id` listing `files`. File contents are not mocked.
pub async fn mock_record(
    server: &mut ServerGuard,
    record_id: &str,
    files: &[(&str, &[u8])],
) -> Mock {
    let listing = files
        .iter()
        .map(|(name, content)| {
            serde_json::json!({
                "key": name,
                "size": content.len(),
                "checksum": "md5:00000000000000000000000000000000",
                "links": {"self": format!("{}{}", server.url(), file_path(record_id, name))}
            })
        })
        .collect::<Vec<_>>();
    let body = serde_json::json!({
        "id": record_id.parse::<u64>().unwrap_or_default(),
        "files": listing,
    });

    server
        .mock("GET", format!("/api/records/{record_id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub async fn mock_file(
    server: &mut ServerGuard,
    record_id: &str,
    filename: &str,
    content: &[u8],
) -> Mock {
    server
        .mock("GET", file_path(record_id, filename).as_str())
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body(content)
        .create_async()
        .await
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("zenfetch_lib=debug,zenfetch_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}

use assert_fs::prelude::*;
use predicates::prelude::*;
use zenfetch_e2e_tests::{
    TEST_RECORD_ID, api_url, config_archive, create_test_config, dataset_bytes, file_path,
    init_tracing, mock_file, mock_record, setup_test_environment,
};
use zenfetch_lib::ZenfetchError;
use zenfetch_lib::cli::{FetchCommand, FetchParams, resolve_command, run_fetch};

#[tokio::test]
async fn test_fetch_end_to_end() -> eyre::Result<()> {
    init_tracing();

    let archive = config_archive()?;
    let dataset = dataset_bytes(3 * 1024 * 1024 + 123);

    let mut server = mockito::Server::new_async().await;
    let record_mock = mock_record(
        &mut server,
        TEST_RECORD_ID,
        &[("config.zip", archive.as_slice()), ("test_dataset.h5", dataset.as_slice())],
    )
    .await;
    let archive_mock = mock_file(&mut server, TEST_RECORD_ID, "config.zip", &archive).await;
    let dataset_mock = mock_file(&mut server, TEST_RECORD_ID, "test_dataset.h5", &dataset).await;

    let temp = assert_fs::TempDir::new()?;
    let run_dir = temp.child("run1");

    let summary = run_fetch(FetchParams {
        app_config: create_test_config(&api_url(&server)),
        output_dir: run_dir.path().to_path_buf(),
        show_progress: false,
    })
    .await?;

    record_mock.assert_async().await;
    archive_mock.assert_async().await;
    dataset_mock.assert_async().await;

    run_dir
        .child("config.zip")
        .assert(predicate::path::eq_file(write_reference(&temp, "config.zip", &archive)?));
    run_dir
        .child("test_dataset.h5")
        .assert(predicate::path::eq_file(write_reference(&temp, "test_dataset.h5", &dataset)?));
    run_dir
        .child("data/config/model.yaml")
        .assert("hidden_size: 256\nlayers: 4\n");
    run_dir.child("data/config/train.yaml").assert("epochs: 10\n");

    let expected_pointer = format!("{}/data/config/checkpoint.pth", run_dir.path().display());
    run_dir
        .child("data/config/last_checkpoint")
        .assert(predicate::str::diff(expected_pointer));
    run_dir
        .child("data/config/checkpoint.pth")
        .assert(predicate::path::missing());

    assert_eq!(summary.downloaded.len(), 2);
    assert_eq!(summary.downloaded[0].name, "config.zip");
    assert_eq!(summary.downloaded[1].size, dataset.len() as u64);
    assert_eq!(summary.extracted_entries, 4);
    assert_eq!(
        summary.pointer_path.as_deref(),
        Some(run_dir.child("data/config/last_checkpoint").path())
    );

    Ok(())
}

#[tokio::test]
async fn test_fetch_from_config_file() -> eyre::Result<()> {
    init_tracing();

    let archive = config_archive()?;
    let mut server = mockito::Server::new_async().await;
    mock_record(&mut server, "777", &[("config.zip", archive.as_slice())]).await;
    mock_file(&mut server, "777", "config.zip", &archive).await;

    let mut config = create_test_config(&api_url(&server));
    config.record_id = "777".to_string();
    config.files = vec!["config.zip".to_string()];
    let (temp_dir, config_path) = setup_test_environment(&config)?;
    let out_path = temp_dir.path().join("out");

    let params = resolve_command(FetchCommand {
        config_path: Some(config_path.display().to_string()),
        out_path: Some(out_path.display().to_string()),
        access_token: None,
        show_progress: false,
    })?;
    assert_eq!(params.app_config.record_id, "777");

    run_fetch(params).await?;

    assert_eq!(
        std::fs::read_to_string(out_path.join("data/config/last_checkpoint"))?,
        format!("{}/data/config/checkpoint.pth", out_path.display())
    );
    Ok(())
}

#[tokio::test]
async fn test_download_failure_stops_pipeline() -> eyre::Result<()> {
    init_tracing();

    let archive = config_archive()?;
    let dataset = dataset_bytes(1024);

    let mut server = mockito::Server::new_async().await;
    mock_record(
        &mut server,
        TEST_RECORD_ID,
        &[("config.zip", archive.as_slice()), ("test_dataset.h5", dataset.as_slice())],
    )
    .await;
    mock_file(&mut server, TEST_RECORD_ID, "config.zip", &archive).await;
    server
        .mock("GET", file_path(TEST_RECORD_ID, "test_dataset.h5").as_str())
        .with_status(500)
        .create_async()
        .await;

    let temp = assert_fs::TempDir::new()?;
    let err = run_fetch(FetchParams {
        app_config: create_test_config(&api_url(&server)),
        output_dir: temp.path().to_path_buf(),
        show_progress: false,
    })
    .await
    .unwrap_err();

    assert!(
        matches!(err, ZenfetchError::HttpStatus { status, .. } if status.as_u16() == 500),
        "unexpected error: {err}"
    );
    temp.child("config.zip").assert(predicate::path::exists());
    temp.child("data").assert(predicate::path::missing());
    Ok(())
}

#[tokio::test]
async fn test_missing_file_fails_before_downloading() -> eyre::Result<()> {
    init_tracing();

    let archive = config_archive()?;
    let mut server = mockito::Server::new_async().await;
    mock_record(&mut server, TEST_RECORD_ID, &[("config.zip", archive.as_slice())]).await;
    let archive_mock = server
        .mock("GET", file_path(TEST_RECORD_ID, "config.zip").as_str())
        .with_body(&archive)
        .expect(0)
        .create_async()
        .await;

    let temp = assert_fs::TempDir::new()?;
    let err = run_fetch(FetchParams {
        app_config: create_test_config(&api_url(&server)),
        output_dir: temp.path().to_path_buf(),
        show_progress: false,
    })
    .await
    .unwrap_err();

    match err {
        ZenfetchError::FileNotFound {
            filename,
            record_id,
        } => {
            assert_eq!(filename, "test_dataset.h5");
            assert_eq!(record_id, TEST_RECORD_ID);
        }
        other => panic!("unexpected error: {other}"),
    }
    archive_mock.assert_async().await;
    temp.child("config.zip").assert(predicate::path::missing());
    Ok(())
}

#[tokio::test]
async fn test_pointer_requires_existing_directory() -> eyre::Result<()> {
    init_tracing();

    let dataset = dataset_bytes(64);
    let mut server = mockito::Server::new_async().await;
    mock_record(&mut server, TEST_RECORD_ID, &[("test_dataset.h5", dataset.as_slice())]).await;
    mock_file(&mut server, TEST_RECORD_ID, "test_dataset.h5", &dataset).await;

    let mut config = create_test_config(&api_url(&server));
    config.files = vec!["test_dataset.h5".to_string()];
    config.extract = vec![];

    let temp = assert_fs::TempDir::new()?;
    let err = run_fetch(FetchParams {
        app_config: config,
        output_dir: temp.path().to_path_buf(),
        show_progress: false,
    })
    .await
    .unwrap_err();

    assert!(
        matches!(err, ZenfetchError::PointerWrite { .. }),
        "unexpected error: {err}"
    );
    temp.child("test_dataset.h5").assert(predicate::path::exists());
    Ok(())
}

#[tokio::test]
async fn test_download_only_profile_writes_no_pointer() -> eyre::Result<()> {
    init_tracing();

    let archive = config_archive()?;
    let mut server = mockito::Server::new_async().await;
    mock_record(&mut server, TEST_RECORD_ID, &[("config.zip", archive.as_slice())]).await;
    mock_file(&mut server, TEST_RECORD_ID, "config.zip", &archive).await;

    let mut config = create_test_config(&api_url(&server));
    config.files = vec!["config.zip".to_string()];
    config.extract = vec![];
    config.checkpoint = None;

    let temp = assert_fs::TempDir::new()?;
    let summary = run_fetch(FetchParams {
        app_config: config,
        output_dir: temp.path().to_path_buf(),
        show_progress: false,
    })
    .await?;

    assert_eq!(summary.extracted_entries, 0);
    assert_eq!(summary.pointer_path, None);
    temp.child("config.zip").assert(predicate::path::exists());
    temp.child("data").assert(predicate::path::missing());
    Ok(())
}

/// Resolves the published record on zenodo.org.
#[tokio::test]
#[ignore = "requires network access to zenodo.org"]
async fn test_resolve_published_record() -> eyre::Result<()> {
    init_tracing();

    let app_config = zenfetch_lib::config::load_config(None)?;
    let http = zenfetch_lib::http::build_http_client(std::time::Duration::from_secs(30))?;
    let client = zenfetch_lib::record::RecordClient::new(http, app_config.api_url.as_str(), None);

    for filename in &app_config.files {
        let entry = client.resolve_file(&app_config.record_id, filename).await?;
        assert!(entry.size > 0, "{filename} should not be empty");
    }

    let err = client
        .resolve_file(&app_config.record_id, "does-not-exist.bin")
        .await
        .unwrap_err();
    assert!(matches!(err, ZenfetchError::FileNotFound { .. }));
    Ok(())
}

fn write_reference(
    temp: &assert_fs::TempDir,
    name: &str,
    content: &[u8],
) -> eyre::Result<std::path::PathBuf> {
    let reference = temp.child(format!("reference-{name}"));
    reference.write_binary(content)?;
    Ok(reference.path().to_path_buf())
}

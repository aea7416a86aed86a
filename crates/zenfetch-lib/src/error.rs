use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZenfetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation failed: {details}")]
    ConfigValidation { details: String },

    #[error("Invalid command line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Request to {url} failed with HTTP status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("File '{filename}' not found in record '{record_id}'")]
    FileNotFound { filename: String, record_id: String },

    #[error("Failed to read metadata of record {record_id}: {reason}")]
    RecordMetadata { record_id: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    OutputFile { path: PathBuf, reason: String },

    #[error("Failed to extract archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    #[error("Failed to write checkpoint pointer {path}: {reason}")]
    PointerWrite { path: PathBuf, reason: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

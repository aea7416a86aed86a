use crate::error::ZenfetchError;
use serde::{Deserialize, Serialize};

/// Metadata of a hosted record, as returned by the records API.
///
/// Only the file listing is modelled; everything else in the response is ignored.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Record {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FileEntry {
    /// File name, unique within the record
    pub key: String,
    /// File size in bytes
    pub size: u64,
    pub links: FileLinks,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FileLinks {
    /// Direct retrieval URL of the file content
    #[serde(rename = "self")]
    pub content: String,
}

impl Record {
    pub fn find_file(&self, filename: &str) -> Option<&FileEntry> {
        self.files.iter().find(|entry| entry.key == filename)
    }

    /// Like [`Record::find_file`], but a missing file is an error naming the record.
    pub fn require_file(&self, record_id: &str, filename: &str) -> Result<&FileEntry, ZenfetchError> {
        self.find_file(filename)
            .ok_or_else(|| ZenfetchError::FileNotFound {
                filename: filename.to_string(),
                record_id: record_id.to_string(),
            })
    }
}

impl FileEntry {
    pub fn name(&self) -> &str {
        &self.key
    }

    pub fn download_url(&self) -> &str {
        &self.links.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD_JSON: &str = r#"{
        "id": 15040443,
        "metadata": {"title": "Test dataset"},
        "files": [
            {
                "id": "0b6b",
                "key": "config.zip",
                "size": 2048,
                "checksum": "md5:5d41402abc4b2a76b9719d911017c592",
                "links": {"self": "https://zenodo.org/api/records/15040443/files/config.zip/content"}
            },
            {
                "id": "1c7c",
                "key": "test_dataset.h5",
                "size": 1048576,
                "links": {"self": "https://zenodo.org/api/records/15040443/files/test_dataset.h5/content"}
            }
        ]
    }"#;

    #[test]
    fn test_record_parsing_ignores_unknown_fields() {
        let record: Record = serde_json::from_str(RECORD_JSON).unwrap();
        assert_eq!(record.files.len(), 2);
        assert_eq!(record.files[1].size, 1048576);
    }

    #[test]
    fn test_find_file_matches_exact_name() {
        let record: Record = serde_json::from_str(RECORD_JSON).unwrap();

        let entry = record.find_file("config.zip").expect("config.zip is listed");
        assert_eq!(entry.name(), "config.zip");
        assert_eq!(entry.size, 2048);
        assert_eq!(
            entry.download_url(),
            "https://zenodo.org/api/records/15040443/files/config.zip/content"
        );

        assert!(record.find_file("config").is_none());
        assert!(record.find_file("CONFIG.ZIP").is_none());
        assert!(record.find_file("missing.h5").is_none());
    }

    #[test]
    fn test_require_file_names_record_and_file() {
        let record: Record = serde_json::from_str(RECORD_JSON).unwrap();

        assert!(record.require_file("15040443", "test_dataset.h5").is_ok());

        let err = record.require_file("15040443", "weights.pth").unwrap_err();
        assert_eq!(
            err.to_string(),
            "File 'weights.pth' not found in record '15040443'"
        );
    }

    #[test]
    fn test_record_without_files() {
        let record: Record = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(record.files.is_empty());
        assert!(record.find_file("config.zip").is_none());
    }
}

use crate::error::ZenfetchError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use zip::ZipArchive;

/// Unpacks every entry of the zip archive at `archive_path` below `output_dir`,
/// keeping the entries' relative paths. Existing files are overwritten.
///
/// Returns the number of extracted entries.
pub fn extract_archive(archive_path: &Path, output_dir: &Path) -> Result<usize, ZenfetchError> {
    let archive_error = |reason: String| ZenfetchError::Archive {
        path: archive_path.to_path_buf(),
        reason,
    };
    let output_error = |path: &Path, e: std::io::Error| ZenfetchError::OutputFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    tracing::info!(
        archive = %archive_path.display(),
        output = %output_dir.display(),
        "Extracting"
    );

    let file = File::open(archive_path).map_err(|e| archive_error(e.to_string()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| archive_error(format!("Couldn't open archive: {e}")))?;

    std::fs::create_dir_all(output_dir).map_err(|e| output_error(output_dir, e))?;

    let mut extracted = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| archive_error(format!("Couldn't read entry #{index}: {e}")))?;

        let Some(relative_path) = entry.enclosed_name() else {
            tracing::warn!(entry = entry.name(), "Skipping entry with unsafe path");
            continue;
        };
        let output_path = output_dir.join(relative_path);

        if entry.is_dir() {
            std::fs::create_dir_all(&output_path).map_err(|e| output_error(&output_path, e))?;
        } else {
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| output_error(parent, e))?;
            }
            let mut output_file =
                File::create(&output_path).map_err(|e| output_error(&output_path, e))?;
            std::io::copy(&mut entry, &mut output_file)
                .map_err(|e| archive_error(format!("Couldn't extract {}: {e}", entry.name())))?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&output_path, std::fs::Permissions::from_mode(mode))
                    .map_err(|e| output_error(&output_path, e))?;
            }
        }

        tracing::trace!(entry = entry.name(), output = %output_path.display(), "Extracted");
        extracted += 1;
    }

    tracing::info!(archive = %archive_path.display(), entries = extracted, "Extraction finished");
    Ok(extracted)
}

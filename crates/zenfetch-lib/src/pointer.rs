use crate::config::CheckpointConfig;
use crate::error::ZenfetchError;
use std::path::{Path, PathBuf};

/// Writes the checkpoint pointer below `output_dir`.
///
/// The pointer file holds the path of the checkpoint as a single line. The
/// checkpoint itself does not have to exist, and no directories are created.
/// Returns the path of the pointer file.
pub fn write_checkpoint_pointer(
    output_dir: &Path,
    checkpoint: &CheckpointConfig,
) -> Result<PathBuf, ZenfetchError> {
    let pointer_path = output_dir.join(&checkpoint.pointer_subpath);
    let checkpoint_path = output_dir.join(&checkpoint.checkpoint_subpath);

    std::fs::write(&pointer_path, checkpoint_path.as_os_str().as_encoded_bytes()).map_err(|e| {
        ZenfetchError::PointerWrite {
            path: pointer_path.clone(),
            reason: e.to_string(),
        }
    })?;

    tracing::info!(
        pointer = %pointer_path.display(),
        checkpoint = %checkpoint_path.display(),
        "Checkpoint pointer written"
    );
    Ok(pointer_path)
}

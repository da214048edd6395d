use crate::error::RankError;
use crate::models::UploadedDocument;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_pdf = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Reads each path into an upload keyed by its file name, keeping path order.
pub fn load_uploads(paths: &[PathBuf]) -> Result<Vec<UploadedDocument>, RankError> {
    paths
        .iter()
        .map(|path| {
            let identifier = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| {
                    RankError::InvalidArgument(format!(
                        "path missing filename: {}",
                        path.display()
                    ))
                })?;
            let bytes = fs::read(path)?;
            debug!(path = %path.display(), size = bytes.len(), "loaded upload");
            Ok(UploadedDocument::new(identifier, bytes))
        })
        .collect()
}

/// All PDFs under `folder`, loaded in sorted path order.
pub fn load_folder(folder: &Path) -> Result<Vec<UploadedDocument>, RankError> {
    let files = discover_pdf_files(folder);

    if files.is_empty() {
        return Err(RankError::InvalidArgument(format!(
            "no pdf files found in {}",
            folder.display()
        )));
    }

    load_uploads(&files)
}

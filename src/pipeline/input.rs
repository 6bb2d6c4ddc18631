//! Input validation: make sure the user-supplied path is a readable PDF.
//!
//! pdfium reports a missing file, a permission problem and a non-PDF file
//! all as a generic load failure. Checking up front gives callers a precise
//! [`Pdf2PptxError`] instead.

use crate::error::Pdf2PptxError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate that `path` exists, can be opened and starts with `%PDF`.
pub fn resolve_local(path: &Path) -> Result<PathBuf, Pdf2PptxError> {
    let path = path.to_path_buf();

    if !path.exists() {
        return Err(Pdf2PptxError::FileNotFound { path });
    }
    if path.is_dir() {
        return Err(Pdf2PptxError::NotAPdf {
            path,
            magic: [0; 4],
        });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_err() || &magic != b"%PDF" {
                return Err(Pdf2PptxError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2PptxError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2PptxError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}

/// `output/<stem>.pptx`, used when the caller gives no output path.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from("output").join(format!("{stem}.pptx"))
}

//! pdfium binding and document opening.
//!
//! A fresh [`Pdfium`] instance is bound for every conversion step that needs
//! one; nothing is cached process-wide. The library is looked up in this
//! order:
//!
//! 1. `PDFIUM_LIB_PATH` (a library file, or a directory containing one)
//! 2. the current directory
//! 3. the system library search path

use crate::error::Pdf2PptxError;
use crate::pipeline::input::resolve_local;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pointing at the pdfium shared library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to a pdfium shared library.
pub fn bind_pdfium() -> Result<Pdfium, Pdf2PptxError> {
    let from_env = std::env::var_os(PDFIUM_LIB_PATH_ENV).map(|raw| {
        let path = PathBuf::from(raw);
        let lib = if path.is_dir() {
            Pdfium::pdfium_platform_library_name_at_path(&path)
        } else {
            path
        };
        debug!(lib = %lib.display(), "Binding pdfium from {PDFIUM_LIB_PATH_ENV}");
        Pdfium::bind_to_library(lib)
    });

    let bindings = match from_env {
        Some(Ok(bindings)) => Ok(bindings),
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| Pdf2PptxError::PdfiumBindingFailed(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// Validate `path` and open it with pdfium.
pub fn open_document<'a>(
    pdfium: &'a Pdfium,
    path: &Path,
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, Pdf2PptxError> {
    let path = resolve_local(path)?;
    pdfium
        .load_pdf_from_file(&path, password)
        .map_err(|e| map_open_error(e, &path, password.is_some()))
}

/// Translate a pdfium load failure into the matching open error.
pub fn map_open_error(err: PdfiumError, path: &Path, had_password: bool) -> Pdf2PptxError {
    let path = path.to_path_buf();
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            if had_password {
                Pdf2PptxError::WrongPassword { path }
            } else {
                Pdf2PptxError::PasswordRequired { path }
            }
        }
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::FileError) => {
            Pdf2PptxError::FileNotFound { path }
        }
        other => Pdf2PptxError::CorruptPdf {
            path,
            detail: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_error_depends_on_supplied_password() {
        let p = Path::new("/tmp/locked.pdf");
        let needs = map_open_error(
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError),
            p,
            false,
        );
        assert!(matches!(needs, Pdf2PptxError::PasswordRequired { .. }));

        let wrong = map_open_error(
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError),
            p,
            true,
        );
        assert!(matches!(wrong, Pdf2PptxError::WrongPassword { .. }));
    }

    #[test]
    fn format_error_is_corrupt() {
        let e = map_open_error(
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::FormatError),
            Path::new("/tmp/bad.pdf"),
            false,
        );
        assert!(matches!(e, Pdf2PptxError::CorruptPdf { .. }));
        assert!(e.is_open_error());
    }

    #[test]
    fn open_checks_path_before_pdfium() {
        // Only runs where pdfium binds; path validation still comes first.
        let Ok(pdfium) = bind_pdfium() else {
            return;
        };
        let err = open_document(&pdfium, Path::new("/no/such/file.pdf"), None)
            .err()
            .expect("missing file must not open");
        assert!(matches!(err, Pdf2PptxError::FileNotFound { .. }));
    }
}

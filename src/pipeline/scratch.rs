//! Per-conversion scratch directory for page rasters.
//!
//! The directory is created fresh under the configured parent (or the system
//! temp dir) and owns every raster written into it. Cleanup removes only the
//! files it wrote, then the directory if nothing else is left in it. Anything
//! a third party dropped in there survives and is reported instead.
//!
//! Cleanup runs at most once: explicitly via [`ScratchDir::cleanup`] on the
//! normal path, or from `Drop` on early returns and panics.

use crate::config::RasterFormat;
use crate::error::{ConversionWarning, Pdf2PptxError};
use image::DynamicImage;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    files: Vec<PathBuf>,
    cleaned: bool,
}

impl ScratchDir {
    /// Create `pdf2pptx-XXXXXX` under `parent`, or under the system temp dir.
    pub fn create(parent: Option<&Path>) -> Result<Self, Pdf2PptxError> {
        let parent = parent.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
        fs::create_dir_all(&parent).map_err(|source| Pdf2PptxError::ScratchIo {
            path: parent.clone(),
            source,
        })?;

        let dir = tempfile::Builder::new()
            .prefix("pdf2pptx-")
            .tempdir_in(&parent)
            .map_err(|source| Pdf2PptxError::ScratchIo {
                path: parent.clone(),
                source,
            })?;
        // Take ownership of the path; removal is handled here, not by TempDir.
        #[allow(deprecated)]
        let path = dir.into_path();
        debug!(dir = %path.display(), "Scratch directory created");

        Ok(Self {
            path,
            files: Vec::new(),
            cleaned: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `page_<n>.<ext>` for 1-based page number `n`.
    pub fn raster_path(&self, page_num: usize, format: RasterFormat) -> PathBuf {
        self.path
            .join(format!("page_{page_num}.{}", format.extension()))
    }

    /// Encode `image` into the scratch directory and return its path.
    pub fn persist_raster(
        &mut self,
        page_num: usize,
        image: &DynamicImage,
        format: RasterFormat,
    ) -> Result<PathBuf, Pdf2PptxError> {
        let target = self.raster_path(page_num, format);
        // Tracked before writing so a half-written file is still removed.
        self.files.push(target.clone());

        let saved = match format {
            // JPEG has no alpha channel.
            RasterFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
                .save_with_format(&target, format.image_format()),
            RasterFormat::Png => image.save_with_format(&target, format.image_format()),
        };
        saved.map_err(|e| Pdf2PptxError::ScratchIo {
            path: target.clone(),
            source: io::Error::other(e),
        })?;
        Ok(target)
    }

    /// Remove every raster written, then the directory if it is empty.
    ///
    /// Returns a warning when the directory had to be left behind.
    pub fn cleanup(&mut self) -> Option<ConversionWarning> {
        if self.cleaned {
            return None;
        }
        self.cleaned = true;

        for file in self.files.drain(..) {
            match fs::remove_file(&file) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => debug!(file = %file.display(), "Could not remove scratch raster: {e}"),
            }
        }

        match fs::remove_dir(&self.path) {
            Ok(()) => {
                debug!(dir = %self.path.display(), "Scratch directory removed");
                None
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(_) => {
                let remaining = fs::read_dir(&self.path).map(|d| d.count()).unwrap_or(0);
                Some(ConversionWarning::ScratchCleanupIncomplete {
                    dir: self.path.clone(),
                    remaining,
                })
            }
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(w) = self.cleanup() {
            warn!("{w}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn tiny() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn rasters_are_named_by_page() {
        let parent = tempfile::tempdir().unwrap();
        let mut scratch = ScratchDir::create(Some(parent.path())).unwrap();
        let p = scratch.persist_raster(2, &tiny(), RasterFormat::Png).unwrap();
        assert_eq!(p.file_name().unwrap(), "page_2.png");
        assert!(p.starts_with(parent.path()));
        assert!(p.exists());
    }

    #[test]
    fn jpeg_rasters_drop_alpha() {
        let parent = tempfile::tempdir().unwrap();
        let mut scratch = ScratchDir::create(Some(parent.path())).unwrap();
        let p = scratch.persist_raster(1, &tiny(), RasterFormat::Jpeg).unwrap();
        assert_eq!(p.extension().unwrap(), "jpeg");
        let back = image::open(&p).unwrap();
        assert_eq!((back.width(), back.height()), (4, 3));
    }

    #[test]
    fn cleanup_removes_files_and_directory() {
        let parent = tempfile::tempdir().unwrap();
        let mut scratch = ScratchDir::create(Some(parent.path())).unwrap();
        let dir = scratch.path().to_path_buf();
        for n in 1..=3 {
            scratch.persist_raster(n, &tiny(), RasterFormat::Png).unwrap();
        }
        assert!(scratch.cleanup().is_none());
        assert!(!dir.exists());
        // Second call is a no-op.
        assert!(scratch.cleanup().is_none());
    }

    #[test]
    fn foreign_files_keep_directory_and_warn() {
        let parent = tempfile::tempdir().unwrap();
        let mut scratch = ScratchDir::create(Some(parent.path())).unwrap();
        scratch.persist_raster(1, &tiny(), RasterFormat::Png).unwrap();
        let stray = scratch.path().join("notes.txt");
        fs::write(&stray, b"not ours").unwrap();

        match scratch.cleanup() {
            Some(ConversionWarning::ScratchCleanupIncomplete { remaining, .. }) => {
                assert_eq!(remaining, 1)
            }
            other => panic!("expected cleanup warning, got {other:?}"),
        }
        assert!(stray.exists());
        assert!(!scratch.raster_path(1, RasterFormat::Png).exists());
    }

    #[test]
    fn drop_cleans_up() {
        let parent = tempfile::tempdir().unwrap();
        let dir = {
            let mut scratch = ScratchDir::create(Some(parent.path())).unwrap();
            scratch.persist_raster(1, &tiny(), RasterFormat::Png).unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!dir.exists());
    }

    #[test]
    fn missing_parent_is_created() {
        let parent = tempfile::tempdir().unwrap();
        let nested = parent.path().join("a").join("b");
        let scratch = ScratchDir::create(Some(&nested)).unwrap();
        assert!(scratch.path().starts_with(&nested));
    }
}

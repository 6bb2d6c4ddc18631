//! Configuration types for PDF-to-PPTX conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. One struct holds every knob so the
//! same config can drive the annotation extractor, the slide builder and the
//! async wrapper without threading loose arguments around.

use crate::error::Pdf2PptxError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 600;

/// Highest accepted rendering resolution.
///
/// At 2400 DPI a Letter page is already ~20 400 × 26 400 px (≈2 GB RGBA).
pub const MAX_DPI: u32 = 2400;

/// Configuration for a PDF-to-PPTX conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_pdf2pptx::{ConversionConfig, RasterFormat};
///
/// let config = ConversionConfig::builder()
///     .dpi(300)
///     .raster_format(RasterFormat::Jpeg)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 300);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Rendering DPI used when rasterising each PDF page. Range: 1–2400. Default: 600.
    ///
    /// The picture always fills the slide, so DPI only trades file size for
    /// sharpness when the deck is projected or zoomed.
    pub dpi: u32,

    /// Encoding of the per-page rasters embedded in the deck. Default: PNG.
    pub raster_format: RasterFormat,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Parent directory for the per-conversion scratch directory.
    /// If None, uses the system temp directory.
    pub scratch_dir: Option<PathBuf>,

    /// Copy PDF title / author / subject into the deck properties. Default: true.
    pub include_metadata: bool,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            raster_format: RasterFormat::default(),
            password: None,
            scratch_dir: None,
            include_metadata: true,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dpi", &self.dpi)
            .field("raster_format", &self.raster_format)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("scratch_dir", &self.scratch_dir)
            .field("include_metadata", &self.include_metadata)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl fmt::Debug for ConversionConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl ConversionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn raster_format(mut self, format: RasterFormat) -> Self {
        self.config.raster_format = format;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.scratch_dir = Some(dir.into());
        self
    }

    pub fn include_metadata(mut self, v: bool) -> Self {
        self.config.include_metadata = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2PptxError> {
        let c = &self.config;
        if c.dpi == 0 || c.dpi > MAX_DPI {
            return Err(Pdf2PptxError::InvalidConfig(format!(
                "DPI must be 1–{MAX_DPI}, got {}",
                c.dpi
            )));
        }
        if let Some(ref dir) = c.scratch_dir {
            if dir.as_os_str().is_empty() {
                return Err(Pdf2PptxError::InvalidConfig(
                    "Scratch directory must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Image encoding used for the slide pictures.
///
/// | Format | Trade-off |
/// |--------|-----------|
/// | PNG    | Lossless, crisp text, larger files (default) |
/// | JPEG   | Much smaller decks, slight ringing around glyphs |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    #[default]
    Png,
    Jpeg,
}

impl RasterFormat {
    /// File extension used for scratch files and package media parts.
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpeg",
        }
    }

    /// MIME type registered in `[Content_Types].xml`.
    pub fn content_type(self) -> &'static str {
        match self {
            RasterFormat::Png => "image/png",
            RasterFormat::Jpeg => "image/jpeg",
        }
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            RasterFormat::Png => image::ImageFormat::Png,
            RasterFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

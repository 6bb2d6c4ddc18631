//! In-memory deck model.

use super::template::{default_layouts, SlideLayout, BLANK_LAYOUT_NAME};
use super::{Frame, SlideSize};
use crate::config::RasterFormat;
use crate::error::{ConversionWarning, PackageError};
use std::io::{Seek, Write};
use std::path::Path;

/// Document properties written to `docProps/core.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub subject: Option<String>,
}

impl CoreProperties {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.creator.is_none() && self.subject.is_none()
    }
}

/// An encoded raster image embedded as a package media part.
#[derive(Clone, PartialEq, Eq)]
pub struct Picture {
    data: Vec<u8>,
    format: RasterFormat,
    description: String,
}

impl std::fmt::Debug for Picture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picture")
            .field("bytes", &self.data.len())
            .field("format", &self.format)
            .field("description", &self.description)
            .finish()
    }
}

impl Picture {
    pub fn from_bytes(data: Vec<u8>, format: RasterFormat, description: impl Into<String>) -> Self {
        Self {
            data,
            format,
            description: description.into(),
        }
    }

    /// Read an already-encoded image file. The file name becomes the
    /// picture's alt-text description.
    pub fn from_file(path: &Path, format: RasterFormat) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let description = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_bytes(data, format, description))
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> RasterFormat {
        self.format
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One slide: a picture and, optionally, speaker notes.
#[derive(Debug, Clone)]
pub struct Slide {
    layout: usize,
    picture: Picture,
    frame: Frame,
    notes: Option<String>,
}

impl Slide {
    /// Index into [`SlideDeck::layouts`].
    pub fn layout_index(&self) -> usize {
        self.layout
    }

    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    /// Where the picture sits on the slide.
    pub fn picture_frame(&self) -> Frame {
        self.frame
    }

    /// Speaker-notes text; `None` when the slide has no notes page.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Outcome of looking up the blank layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutChoice {
    pub index: usize,
    /// Set when no blank layout exists and a fallback was chosen.
    pub warning: Option<ConversionWarning>,
}

/// A presentation under construction.
///
/// The slide size is fixed at construction; slides are appended in order and
/// never modified afterwards.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    size: SlideSize,
    layouts: Vec<SlideLayout>,
    slides: Vec<Slide>,
    properties: CoreProperties,
}

impl SlideDeck {
    /// A deck using the built-in eleven-layout template.
    pub fn new(size: SlideSize) -> Self {
        Self::with_layouts(size, default_layouts())
    }

    /// A deck with a custom layout set. An empty set falls back to the
    /// built-in template since every slide needs some layout.
    pub fn with_layouts(size: SlideSize, layouts: Vec<SlideLayout>) -> Self {
        let layouts = if layouts.is_empty() {
            default_layouts()
        } else {
            layouts
        };
        Self {
            size: size.clamped(),
            layouts,
            slides: Vec::new(),
            properties: CoreProperties::default(),
        }
    }

    pub fn size(&self) -> SlideSize {
        self.size
    }

    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn properties(&self) -> &CoreProperties {
        &self.properties
    }

    pub fn set_properties(&mut self, properties: CoreProperties) {
        self.properties = properties;
    }

    /// Find the layout named "Blank", else any layout without text regions,
    /// else fall back to the first layout with a warning.
    pub fn blank_layout(&self) -> LayoutChoice {
        let by_name = self
            .layouts
            .iter()
            .position(|l| l.name == BLANK_LAYOUT_NAME);
        if let Some(index) = by_name.or_else(|| self.layouts.iter().position(SlideLayout::is_blank)) {
            return LayoutChoice {
                index,
                warning: None,
            };
        }
        LayoutChoice {
            index: 0,
            warning: Some(ConversionWarning::LayoutUnavailable {
                wanted: BLANK_LAYOUT_NAME.to_string(),
                used: self.layouts[0].name.clone(),
            }),
        }
    }

    /// Append a slide whose picture covers the full slide area.
    ///
    /// Empty notes text is treated as no notes. Returns the 1-based slide number.
    pub fn add_slide(&mut self, layout: usize, picture: Picture, notes: Option<String>) -> usize {
        let layout = layout.min(self.layouts.len() - 1);
        self.slides.push(Slide {
            layout,
            picture,
            frame: Frame::full(self.size),
            notes: notes.filter(|n| !n.is_empty()),
        });
        self.slides.len()
    }

    /// Serialise the package into any seekable writer.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W, PackageError> {
        super::package::write(self, writer)
    }

    /// Write the package to `path` atomically: the file either appears
    /// complete or not at all.
    pub fn save(&self, path: &Path) -> Result<(), PackageError> {
        super::package::save(self, path)
    }
}

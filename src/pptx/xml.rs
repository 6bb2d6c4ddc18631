//! Small XML emitter over `quick_xml::Writer` plus text sanitising.

use once_cell::sync::Lazy;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use regex::Regex;
use std::borrow::Cow;
use std::io::Cursor;

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Namespace declarations carried by every PresentationML root element.
pub const PML_NAMESPACES: [(&str, &str); 3] =
    [("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)];

/// Characters XML 1.0 forbids even when escaped.
static XML_INVALID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x{FFFE}\x{FFFF}]").expect("valid regex")
});

/// PDF annotation text uses CR, LF or CRLF between lines.
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid regex"));

/// Remove characters that cannot appear in an XML document.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    XML_INVALID.replace_all(text, "")
}

/// Split text into lines on any of CRLF, CR or LF.
pub fn split_lines(text: &str) -> Vec<&str> {
    LINE_BREAK.split(text).collect()
}

/// One XML part being written.
pub struct XmlPart {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlPart {
    /// Start a part with the standard `standalone="yes"` declaration.
    pub fn new() -> Result<Self, quick_xml::Error> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, quick_xml::Error> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(elem))?;
        Ok(self)
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, quick_xml::Error> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(elem))?;
        Ok(self)
    }

    pub fn close(&mut self, name: &str) -> Result<&mut Self, quick_xml::Error> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(self)
    }

    /// Escaped character data; forbidden characters are dropped first.
    pub fn text(&mut self, text: &str) -> Result<&mut Self, quick_xml::Error> {
        let clean = sanitize(text);
        self.writer.write_event(Event::Text(BytesText::new(&clean)))?;
        Ok(self)
    }

    /// Trusted, already well-formed markup copied through verbatim.
    pub fn fragment(&mut self, markup: &str) -> Result<&mut Self, quick_xml::Error> {
        self.writer.write_event(Event::Text(BytesText::from_escaped(markup)))?;
        Ok(self)
    }

    /// `<name attrs>text</name>`
    pub fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<&mut Self, quick_xml::Error> {
        self.open(name, attrs)?.text(text)?.close(name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }
}

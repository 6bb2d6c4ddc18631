//! Zip packaging and atomic save.

use super::deck::SlideDeck;
use super::parts::{self, rels_part};
use super::template::{PRES_PROPS_XML, TABLE_STYLES_XML, THEME_XML, VIEW_PROPS_XML};
use crate::error::PackageError;
use std::io::{Seek, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Thin wrapper choosing the compression per entry: XML is deflated, media
/// is stored since PNG and JPEG are already compressed.
struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    overrides: Vec<(String, &'static str)>,
}

impl<W: Write + Seek> PackageWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            overrides: Vec::new(),
        }
    }

    fn entry(&mut self, name: &str, data: &[u8], method: CompressionMethod) -> Result<(), PackageError> {
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .large_file(data.len() as u64 >= u32::MAX as u64);
        self.zip.start_file(name, options)?;
        self.zip.write_all(data)?;
        Ok(())
    }

    /// An XML part registered in `[Content_Types].xml` under `content_type`.
    fn part(&mut self, name: String, content_type: &'static str, data: &[u8]) -> Result<(), PackageError> {
        self.entry(&name, data, CompressionMethod::Deflated)?;
        self.overrides.push((name, content_type));
        Ok(())
    }

    /// A relationships part for `owner`.
    fn rels(&mut self, owner: &str, data: &[u8]) -> Result<(), PackageError> {
        self.entry(&rels_part(owner), data, CompressionMethod::Deflated)
    }

    fn media(&mut self, name: &str, data: &[u8]) -> Result<(), PackageError> {
        self.entry(name, data, CompressionMethod::Stored)
    }

    fn finish(mut self) -> Result<W, PackageError> {
        // Lists every part written so far, so it goes last.
        let types = parts::content_types(&self.overrides)?;
        self.entry("[Content_Types].xml", &types, CompressionMethod::Deflated)?;
        Ok(self.zip.finish()?)
    }
}

/// Serialise `deck` as a complete `.pptx` package.
pub fn write<W: Write + Seek>(deck: &SlideDeck, writer: W) -> Result<W, PackageError> {
    let mut pkg = PackageWriter::new(writer);

    pkg.entry("_rels/.rels", &parts::root_rels()?, CompressionMethod::Deflated)?;
    pkg.part(parts::CORE_PROPS.into(), parts::CT_CORE_PROPS, &parts::core_properties(deck.properties())?)?;
    pkg.part(parts::APP_PROPS.into(), parts::CT_APP_PROPS, &parts::app_properties(deck)?)?;

    pkg.part(parts::PRESENTATION.into(), parts::CT_PRESENTATION, &parts::presentation(deck)?)?;
    pkg.rels(parts::PRESENTATION, &parts::presentation_rels(deck)?)?;
    pkg.part(parts::PRES_PROPS.into(), parts::CT_PRES_PROPS, PRES_PROPS_XML.as_bytes())?;
    pkg.part(parts::VIEW_PROPS.into(), parts::CT_VIEW_PROPS, VIEW_PROPS_XML.as_bytes())?;
    pkg.part(parts::TABLE_STYLES.into(), parts::CT_TABLE_STYLES, TABLE_STYLES_XML.as_bytes())?;

    let layouts = deck.layouts();
    pkg.part(parts::SLIDE_MASTER.into(), parts::CT_SLIDE_MASTER, &parts::slide_master(layouts.len())?)?;
    pkg.rels(parts::SLIDE_MASTER, &parts::slide_master_rels(layouts.len())?)?;
    let layout_rels = parts::slide_layout_rels()?;
    for (i, layout) in layouts.iter().enumerate() {
        let name = parts::layout_part(i + 1);
        pkg.part(name.clone(), parts::CT_SLIDE_LAYOUT, &parts::slide_layout(layout)?)?;
        pkg.rels(&name, &layout_rels)?;
    }
    pkg.part(parts::THEME_MASTER.into(), parts::CT_THEME, THEME_XML.as_bytes())?;

    pkg.part(parts::NOTES_MASTER.into(), parts::CT_NOTES_MASTER, &parts::notes_master()?)?;
    pkg.rels(parts::NOTES_MASTER, &parts::notes_master_rels()?)?;
    pkg.part(parts::THEME_NOTES.into(), parts::CT_THEME, THEME_XML.as_bytes())?;

    for (i, slide) in deck.slides().iter().enumerate() {
        let n = i + 1;
        let name = parts::slide_part(n);
        pkg.part(name.clone(), parts::CT_SLIDE, &parts::slide(slide)?)?;
        pkg.rels(&name, &parts::slide_rels(slide, n)?)?;
        pkg.media(&parts::media_part(n, slide.picture().format()), slide.picture().data())?;

        if let Some(text) = slide.notes() {
            let notes = parts::notes_slide_part(n);
            pkg.part(notes.clone(), parts::CT_NOTES_SLIDE, &parts::notes_slide(text)?)?;
            pkg.rels(&notes, &parts::notes_slide_rels(n)?)?;
        }
    }

    debug!(
        slides = deck.slide_count(),
        parts = pkg.overrides.len(),
        "Package assembled"
    );
    pkg.finish()
}

/// Write to a temporary sibling of `path`, then rename over it.
///
/// Nothing is left at `path` if serialisation fails; an existing file there
/// is replaced only by a complete package.
pub fn save(deck: &SlideDeck, path: &Path) -> Result<(), PackageError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = tempfile::Builder::new()
        .prefix(".pdf2pptx-")
        .suffix(".pptx.part")
        .tempfile_in(parent)?;
    let file = write(deck, tmp.reopen()?)?;
    file.sync_all()?;
    drop(file);
    tmp.persist(path).map_err(|e| PackageError::Io(e.error))?;
    debug!(path = %path.display(), "Deck saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RasterFormat;
    use crate::pptx::deck::Picture;
    use crate::pptx::SlideSize;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn three_slide_deck() -> SlideDeck {
        let mut deck = SlideDeck::new(SlideSize::from_points(612.0, 792.0));
        let blank = deck.blank_layout().index;
        for n in 1..=3 {
            let pic = Picture::from_bytes(vec![0x89, b'P', b'N', b'G', n], RasterFormat::Png, format!("page_{n}.png"));
            let notes = (n == 2).then(|| "这是测试的备注".to_string());
            deck.add_slide(blank, pic, notes);
        }
        deck
    }

    fn read(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut s = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut s).unwrap();
        s
    }

    fn package(deck: &SlideDeck) -> ZipArchive<Cursor<Vec<u8>>> {
        let cursor = deck.write_to(Cursor::new(Vec::new())).unwrap();
        ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap()
    }

    #[test]
    fn package_contains_required_parts() {
        let mut zip = package(&three_slide_deck());
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            "ppt/slideLayouts/slideLayout11.xml",
            "ppt/slideLayouts/_rels/slideLayout7.xml.rels",
            "ppt/theme/theme1.xml",
            "ppt/theme/theme2.xml",
            "ppt/notesMasters/notesMaster1.xml",
            "ppt/slides/slide3.xml",
            "ppt/media/image1.png",
            "ppt/notesSlides/notesSlide2.xml",
        ] {
            assert!(zip.by_name(name).is_ok(), "missing part {name}");
        }
        assert!(zip.by_name("ppt/notesSlides/notesSlide1.xml").is_err());
        assert!(zip.by_name("ppt/notesSlides/notesSlide3.xml").is_err());
    }

    #[test]
    fn presentation_declares_size_and_slides() {
        let mut zip = package(&three_slide_deck());
        let pres = read(&mut zip, "ppt/presentation.xml");
        assert!(pres.contains(r#"<p:sldSz cx="7772400" cy="10058400"/>"#), "got: {pres}");
        assert_eq!(pres.matches("<p:sldId ").count(), 3);
        let rels = read(&mut zip, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml""#));
    }

    #[test]
    fn only_noted_slide_links_notes() {
        let mut zip = package(&three_slide_deck());
        let rels1 = read(&mut zip, "ppt/slides/_rels/slide1.xml.rels");
        let rels2 = read(&mut zip, "ppt/slides/_rels/slide2.xml.rels");
        assert!(!rels1.contains("notesSlide"));
        assert!(rels2.contains("../notesSlides/notesSlide2.xml"));
        assert!(rels2.contains("../slideLayouts/slideLayout7.xml"));
        let notes = read(&mut zip, "ppt/notesSlides/notesSlide2.xml");
        assert!(notes.contains("这是测试的备注"));
    }

    #[test]
    fn content_types_cover_every_xml_part() {
        let mut zip = package(&three_slide_deck());
        let types = read(&mut zip, "[Content_Types].xml");
        let names: Vec<String> = zip.file_names().map(str::to_string).collect();
        for name in names {
            if name.ends_with(".xml") && name != "[Content_Types].xml" {
                assert!(types.contains(&format!(r#"PartName="/{name}""#)), "no override for {name}");
            }
        }
    }

    #[test]
    fn picture_fills_slide() {
        let mut zip = package(&three_slide_deck());
        let slide = read(&mut zip, "ppt/slides/slide1.xml");
        assert!(slide.contains(r#"<a:off x="0" y="0"/><a:ext cx="7772400" cy="10058400"/>"#), "got: {slide}");
        assert!(slide.contains(r#"r:embed="rId2""#));
        assert!(slide.contains(r#"descr="page_1.png""#));
    }

    #[test]
    fn empty_deck_is_still_a_valid_package() {
        let deck = SlideDeck::new(SlideSize::default());
        let mut zip = package(&deck);
        let pres = read(&mut zip, "ppt/presentation.xml");
        assert!(pres.contains("<p:sldIdLst/>"));
        assert!(pres.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn save_replaces_atomically_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deck.pptx");
        std::fs::write(&out, b"old").unwrap();
        three_slide_deck().save(&out).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name() != "deck.pptx")
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn save_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("deck.pptx");
        assert!(three_slide_deck().save(&out).is_err());
        assert!(!out.exists());
    }
}

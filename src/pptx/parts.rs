//! XML for each package part.
//!
//! Every function returns the complete serialised part. Part and
//! relationship naming lives here too, so the package writer and the
//! relationship targets cannot drift apart.

use super::deck::{CoreProperties, Slide, SlideDeck};
use super::template::{
    master_placeholders, Placeholder, PlaceholderKind, SlideLayout, NOTES_BODY, NOTES_HEIGHT,
    NOTES_SLIDE_IMAGE, NOTES_WIDTH,
};
use super::xml::{split_lines, XmlPart, NS_CONTENT_TYPES, NS_RELS, PML_NAMESPACES};
use super::Frame;
use crate::config::RasterFormat;

type XmlResult = Result<Vec<u8>, quick_xml::Error>;

// ── Part names ───────────────────────────────────────────────────────────

pub const PRESENTATION: &str = "ppt/presentation.xml";
pub const SLIDE_MASTER: &str = "ppt/slideMasters/slideMaster1.xml";
pub const NOTES_MASTER: &str = "ppt/notesMasters/notesMaster1.xml";
pub const THEME_MASTER: &str = "ppt/theme/theme1.xml";
pub const THEME_NOTES: &str = "ppt/theme/theme2.xml";
pub const PRES_PROPS: &str = "ppt/presProps.xml";
pub const VIEW_PROPS: &str = "ppt/viewProps.xml";
pub const TABLE_STYLES: &str = "ppt/tableStyles.xml";
pub const CORE_PROPS: &str = "docProps/core.xml";
pub const APP_PROPS: &str = "docProps/app.xml";

pub fn layout_part(n: usize) -> String {
    format!("ppt/slideLayouts/slideLayout{n}.xml")
}

pub fn slide_part(n: usize) -> String {
    format!("ppt/slides/slide{n}.xml")
}

pub fn notes_slide_part(n: usize) -> String {
    format!("ppt/notesSlides/notesSlide{n}.xml")
}

pub fn media_part(n: usize, format: RasterFormat) -> String {
    format!("ppt/media/image{n}.{}", format.extension())
}

/// The `_rels/<name>.rels` part describing `part`'s relationships.
pub fn rels_part(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

// ── Content types ────────────────────────────────────────────────────────

pub const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
pub const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
pub const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
pub const CT_NOTES_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml";
pub const CT_NOTES_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";
pub const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
pub const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
pub const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
pub const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
pub const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub const CT_APP_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";
const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

// ── Relationship types ───────────────────────────────────────────────────

const RT_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn rel_type(kind: &str) -> String {
    format!("{RT_BASE}/{kind}")
}

const RT_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";

/// First id in `p:sldMasterIdLst`; layout ids continue from here.
const MASTER_ID: u32 = 2_147_483_648;
/// First id in `p:sldIdLst`.
const FIRST_SLIDE_ID: u32 = 256;
/// Relationships of presentation.xml that precede the slides.
const PRESENTATION_FIXED_RELS: usize = 6;

/// `rId` of slide `n` (1-based) in presentation.xml.rels.
pub fn presentation_slide_rel(n: usize) -> String {
    format!("rId{}", PRESENTATION_FIXED_RELS + n)
}

// ── Package-level parts ──────────────────────────────────────────────────

/// `[Content_Types].xml`: defaults for rels/xml/media plus one override per
/// XML part.
pub fn content_types(overrides: &[(String, &str)]) -> XmlResult {
    let mut x = XmlPart::new()?;
    x.open("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    x.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    x.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    for format in [RasterFormat::Png, RasterFormat::Jpeg] {
        x.empty(
            "Default",
            &[("Extension", format.extension()), ("ContentType", format.content_type())],
        )?;
    }
    for (part, ct) in overrides {
        let name = format!("/{part}");
        x.empty("Override", &[("PartName", name.as_str()), ("ContentType", *ct)])?;
    }
    x.close("Types")?;
    Ok(x.into_bytes())
}

/// A relationships part. Each entry is `(id, type, target)`.
pub fn relationships(rels: &[(String, String, String)]) -> XmlResult {
    let mut x = XmlPart::new()?;
    x.open("Relationships", &[("xmlns", NS_RELS)])?;
    for (id, kind, target) in rels {
        x.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", kind.as_str()), ("Target", target.as_str())],
        )?;
    }
    x.close("Relationships")?;
    Ok(x.into_bytes())
}

fn rel(id: usize, kind: &str, target: impl Into<String>) -> (String, String, String) {
    (format!("rId{id}"), rel_type(kind), target.into())
}

pub fn root_rels() -> XmlResult {
    relationships(&[
        rel(1, "officeDocument", PRESENTATION),
        ("rId2".into(), RT_CORE_PROPS.into(), CORE_PROPS.into()),
        rel(3, "extended-properties", APP_PROPS),
    ])
}

pub fn core_properties(props: &CoreProperties) -> XmlResult {
    let mut x = XmlPart::new()?;
    x.open(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    if let Some(title) = &props.title {
        x.leaf("dc:title", &[], title)?;
    }
    if let Some(subject) = &props.subject {
        x.leaf("dc:subject", &[], subject)?;
    }
    if let Some(creator) = &props.creator {
        x.leaf("dc:creator", &[], creator)?;
    }
    x.leaf("cp:revision", &[], "1")?;
    x.close("cp:coreProperties")?;
    Ok(x.into_bytes())
}

pub fn app_properties(deck: &SlideDeck) -> XmlResult {
    let notes = deck.slides().iter().filter(|s| s.notes().is_some()).count();
    let mut x = XmlPart::new()?;
    x.open(
        "Properties",
        &[
            ("xmlns", "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"),
            ("xmlns:vt", "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"),
        ],
    )?;
    x.leaf("Application", &[], env!("CARGO_PKG_NAME"))?;
    x.leaf("PresentationFormat", &[], "Custom")?;
    x.leaf("Slides", &[], &deck.slide_count().to_string())?;
    x.leaf("Notes", &[], &notes.to_string())?;
    x.leaf("AppVersion", &[], "16.0000")?;
    x.close("Properties")?;
    Ok(x.into_bytes())
}

// ── Presentation ─────────────────────────────────────────────────────────

pub fn presentation(deck: &SlideDeck) -> XmlResult {
    let size = deck.size();
    let mut x = XmlPart::new()?;
    let mut root = PML_NAMESPACES.to_vec();
    root.push(("saveSubsetFonts", "1"));
    x.open("p:presentation", &root)?;

    x.open("p:sldMasterIdLst", &[])?;
    let master_id = MASTER_ID.to_string();
    x.empty("p:sldMasterId", &[("id", master_id.as_str()), ("r:id", "rId1")])?;
    x.close("p:sldMasterIdLst")?;

    x.open("p:notesMasterIdLst", &[])?;
    x.empty("p:notesMasterId", &[("r:id", "rId2")])?;
    x.close("p:notesMasterIdLst")?;

    if deck.slide_count() == 0 {
        x.empty("p:sldIdLst", &[])?;
    } else {
        x.open("p:sldIdLst", &[])?;
        for n in 1..=deck.slide_count() {
            let id = (FIRST_SLIDE_ID as usize + n - 1).to_string();
            let rid = presentation_slide_rel(n);
            x.empty("p:sldId", &[("id", id.as_str()), ("r:id", rid.as_str())])?;
        }
        x.close("p:sldIdLst")?;
    }

    let (cx, cy) = (size.cx.to_string(), size.cy.to_string());
    x.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    let (notes_cx, notes_cy) = (NOTES_WIDTH.to_string(), NOTES_HEIGHT.to_string());
    x.empty("p:notesSz", &[("cx", notes_cx.as_str()), ("cy", notes_cy.as_str())])?;
    x.close("p:presentation")?;
    Ok(x.into_bytes())
}

pub fn presentation_rels(deck: &SlideDeck) -> XmlResult {
    let mut rels = vec![
        rel(1, "slideMaster", "slideMasters/slideMaster1.xml"),
        rel(2, "notesMaster", "notesMasters/notesMaster1.xml"),
        rel(3, "theme", "theme/theme1.xml"),
        rel(4, "presProps", "presProps.xml"),
        rel(5, "viewProps", "viewProps.xml"),
        rel(6, "tableStyles", "tableStyles.xml"),
    ];
    for n in 1..=deck.slide_count() {
        rels.push(rel(PRESENTATION_FIXED_RELS + n, "slide", format!("slides/slide{n}.xml")));
    }
    relationships(&rels)
}

// ── Shared shape markup ──────────────────────────────────────────────────

const CLR_MAP: [(&str, &str); 12] = [
    ("bg1", "lt1"),
    ("tx1", "dk1"),
    ("bg2", "lt2"),
    ("tx2", "dk2"),
    ("accent1", "accent1"),
    ("accent2", "accent2"),
    ("accent3", "accent3"),
    ("accent4", "accent4"),
    ("accent5", "accent5"),
    ("accent6", "accent6"),
    ("hlink", "hlink"),
    ("folHlink", "folHlink"),
];

const BACKGROUND: &str =
    r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#;

const TEXT_STYLES: &str = concat!(
    r#"<p:txStyles>"#,
    r#"<p:titleStyle><a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/><a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#,
    r#"<p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/><a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#,
    r#"<p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle>"#,
    r#"</p:txStyles>"#,
);

const NOTES_STYLE: &str = concat!(
    r#"<p:notesStyle>"#,
    r#"<a:lvl1pPr marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:defRPr sz="1200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr>"#,
    r#"</p:notesStyle>"#,
);

fn open_pml(x: &mut XmlPart, root: &str, extra: &[(&str, &str)]) -> Result<(), quick_xml::Error> {
    let mut attrs = PML_NAMESPACES.to_vec();
    attrs.extend_from_slice(extra);
    x.open(root, &attrs)?;
    Ok(())
}

fn open_shape_tree(x: &mut XmlPart) -> Result<(), quick_xml::Error> {
    x.open("p:spTree", &[])?;
    x.open("p:nvGrpSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    x.empty("p:cNvGrpSpPr", &[])?;
    x.empty("p:nvPr", &[])?;
    x.close("p:nvGrpSpPr")?;
    x.open("p:grpSpPr", &[])?;
    x.open("a:xfrm", &[])?;
    x.empty("a:off", &[("x", "0"), ("y", "0")])?;
    x.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    x.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    x.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    x.close("a:xfrm")?;
    x.close("p:grpSpPr")?;
    Ok(())
}

fn xfrm(x: &mut XmlPart, frame: Frame) -> Result<(), quick_xml::Error> {
    x.open("a:xfrm", &[])?;
    let (off_x, off_y) = (frame.x.to_string(), frame.y.to_string());
    let (ext_cx, ext_cy) = (frame.cx.to_string(), frame.cy.to_string());
    x.empty("a:off", &[("x", off_x.as_str()), ("y", off_y.as_str())])?;
    x.empty("a:ext", &[("cx", ext_cx.as_str()), ("cy", ext_cy.as_str())])?;
    x.close("a:xfrm")?;
    Ok(())
}

fn empty_text_body(x: &mut XmlPart, vertical: bool) -> Result<(), quick_xml::Error> {
    x.open("p:txBody", &[])?;
    if vertical {
        x.empty("a:bodyPr", &[("vert", "eaVert")])?;
    } else {
        x.empty("a:bodyPr", &[])?;
    }
    x.empty("a:lstStyle", &[])?;
    x.open("a:p", &[])?;
    x.empty("a:endParaRPr", &[("lang", "en-US")])?;
    x.close("a:p")?;
    x.close("p:txBody")?;
    Ok(())
}

fn placeholder_shape(x: &mut XmlPart, ph: &Placeholder, shape_id: usize) -> Result<(), quick_xml::Error> {
    let id = shape_id.to_string();
    let name = ph.shape_name(shape_id - 1);
    let idx = ph.idx.map(|i| i.to_string());

    let mut ph_attrs: Vec<(&str, &str)> = Vec::new();
    if let Some(t) = ph.kind.type_attr() {
        ph_attrs.push(("type", t));
    }
    if ph.vertical {
        ph_attrs.push(("orient", "vert"));
    }
    if let Some(i) = idx.as_deref() {
        ph_attrs.push(("idx", i));
    }

    x.open("p:sp", &[])?;
    x.open("p:nvSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    x.open("p:cNvSpPr", &[])?;
    x.empty("a:spLocks", &[("noGrp", "1")])?;
    x.close("p:cNvSpPr")?;
    x.open("p:nvPr", &[])?;
    x.empty("p:ph", &ph_attrs)?;
    x.close("p:nvPr")?;
    x.close("p:nvSpPr")?;
    x.open("p:spPr", &[])?;
    xfrm(x, ph.frame)?;
    x.close("p:spPr")?;
    empty_text_body(x, ph.vertical)?;
    x.close("p:sp")?;
    Ok(())
}

// ── Master, layouts, notes master ────────────────────────────────────────

pub fn slide_master(layout_count: usize) -> XmlResult {
    let mut x = XmlPart::new()?;
    open_pml(&mut x, "p:sldMaster", &[])?;
    x.open("p:cSld", &[])?;
    x.fragment(BACKGROUND)?;
    open_shape_tree(&mut x)?;
    for (i, ph) in master_placeholders().iter().enumerate() {
        placeholder_shape(&mut x, ph, i + 2)?;
    }
    x.close("p:spTree")?;
    x.close("p:cSld")?;
    x.empty("p:clrMap", &CLR_MAP)?;
    x.open("p:sldLayoutIdLst", &[])?;
    for n in 1..=layout_count {
        let id = (MASTER_ID as usize + n).to_string();
        let rid = format!("rId{n}");
        x.empty("p:sldLayoutId", &[("id", id.as_str()), ("r:id", rid.as_str())])?;
    }
    x.close("p:sldLayoutIdLst")?;
    x.fragment(TEXT_STYLES)?;
    x.close("p:sldMaster")?;
    Ok(x.into_bytes())
}

pub fn slide_master_rels(layout_count: usize) -> XmlResult {
    let mut rels: Vec<_> = (1..=layout_count)
        .map(|n| rel(n, "slideLayout", format!("../slideLayouts/slideLayout{n}.xml")))
        .collect();
    rels.push(rel(layout_count + 1, "theme", "../theme/theme1.xml"));
    relationships(&rels)
}

pub fn slide_layout(layout: &SlideLayout) -> XmlResult {
    let mut x = XmlPart::new()?;
    open_pml(
        &mut x,
        "p:sldLayout",
        &[("type", layout.layout_type.as_str()), ("preserve", "1")],
    )?;
    x.open("p:cSld", &[("name", layout.name.as_str())])?;
    open_shape_tree(&mut x)?;
    for (i, ph) in layout.placeholders.iter().enumerate() {
        placeholder_shape(&mut x, ph, i + 2)?;
    }
    x.close("p:spTree")?;
    x.close("p:cSld")?;
    master_colour_mapping(&mut x)?;
    x.close("p:sldLayout")?;
    Ok(x.into_bytes())
}

pub fn slide_layout_rels() -> XmlResult {
    relationships(&[rel(1, "slideMaster", "../slideMasters/slideMaster1.xml")])
}

pub fn notes_master() -> XmlResult {
    let mut x = XmlPart::new()?;
    open_pml(&mut x, "p:notesMaster", &[])?;
    x.open("p:cSld", &[])?;
    x.fragment(BACKGROUND)?;
    open_shape_tree(&mut x)?;
    slide_image_shape(&mut x, Some(NOTES_SLIDE_IMAGE))?;
    let body = Placeholder {
        kind: PlaceholderKind::Body,
        idx: Some(1),
        vertical: false,
        frame: NOTES_BODY,
    };
    placeholder_shape(&mut x, &body, 3)?;
    x.close("p:spTree")?;
    x.close("p:cSld")?;
    x.empty("p:clrMap", &CLR_MAP)?;
    x.fragment(NOTES_STYLE)?;
    x.close("p:notesMaster")?;
    Ok(x.into_bytes())
}

pub fn notes_master_rels() -> XmlResult {
    relationships(&[rel(1, "theme", "../theme/theme2.xml")])
}

fn master_colour_mapping(x: &mut XmlPart) -> Result<(), quick_xml::Error> {
    x.open("p:clrMapOvr", &[])?;
    x.empty("a:masterClrMapping", &[])?;
    x.close("p:clrMapOvr")?;
    Ok(())
}

/// Thumbnail of the slide on a notes page. Notes slides inherit the frame
/// from the notes master, so they pass `None`.
fn slide_image_shape(x: &mut XmlPart, frame: Option<Frame>) -> Result<(), quick_xml::Error> {
    x.open("p:sp", &[])?;
    x.open("p:nvSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", "2"), ("name", "Slide Image Placeholder 1")])?;
    x.open("p:cNvSpPr", &[])?;
    x.empty("a:spLocks", &[("noGrp", "1"), ("noRot", "1"), ("noChangeAspect", "1")])?;
    x.close("p:cNvSpPr")?;
    x.open("p:nvPr", &[])?;
    x.empty("p:ph", &[("type", "sldImg")])?;
    x.close("p:nvPr")?;
    x.close("p:nvSpPr")?;
    match frame {
        Some(f) => {
            x.open("p:spPr", &[])?;
            xfrm(x, f)?;
            x.close("p:spPr")?;
        }
        None => {
            x.empty("p:spPr", &[])?;
        }
    }
    x.close("p:sp")?;
    Ok(())
}

// ── Slides ───────────────────────────────────────────────────────────────

pub fn slide(slide: &Slide) -> XmlResult {
    let frame = slide.picture_frame();
    let mut x = XmlPart::new()?;
    open_pml(&mut x, "p:sld", &[])?;
    x.open("p:cSld", &[])?;
    open_shape_tree(&mut x)?;

    x.open("p:pic", &[])?;
    x.open("p:nvPicPr", &[])?;
    x.empty(
        "p:cNvPr",
        &[("id", "2"), ("name", "Picture 1"), ("descr", slide.picture().description())],
    )?;
    x.open("p:cNvPicPr", &[])?;
    x.empty("a:picLocks", &[("noChangeAspect", "1")])?;
    x.close("p:cNvPicPr")?;
    x.empty("p:nvPr", &[])?;
    x.close("p:nvPicPr")?;
    x.open("p:blipFill", &[])?;
    x.empty("a:blip", &[("r:embed", "rId2")])?;
    x.open("a:stretch", &[])?;
    x.empty("a:fillRect", &[])?;
    x.close("a:stretch")?;
    x.close("p:blipFill")?;
    x.open("p:spPr", &[])?;
    xfrm(&mut x, frame)?;
    x.open("a:prstGeom", &[("prst", "rect")])?;
    x.empty("a:avLst", &[])?;
    x.close("a:prstGeom")?;
    x.close("p:spPr")?;
    x.close("p:pic")?;

    x.close("p:spTree")?;
    x.close("p:cSld")?;
    master_colour_mapping(&mut x)?;
    x.close("p:sld")?;
    Ok(x.into_bytes())
}

/// Relationships of slide `n`: its layout, its picture and, if present, its
/// notes page.
pub fn slide_rels(slide: &Slide, n: usize) -> XmlResult {
    let mut rels = vec![
        rel(
            1,
            "slideLayout",
            format!("../slideLayouts/slideLayout{}.xml", slide.layout_index() + 1),
        ),
        rel(
            2,
            "image",
            format!("../media/image{n}.{}", slide.picture().format().extension()),
        ),
    ];
    if slide.notes().is_some() {
        rels.push(rel(3, "notesSlide", format!("../notesSlides/notesSlide{n}.xml")));
    }
    relationships(&rels)
}

/// A notes page whose body holds `text` as one paragraph, with a line break
/// wherever the text had one.
pub fn notes_slide(text: &str) -> XmlResult {
    let mut x = XmlPart::new()?;
    open_pml(&mut x, "p:notes", &[])?;
    x.open("p:cSld", &[])?;
    open_shape_tree(&mut x)?;
    slide_image_shape(&mut x, None)?;

    x.open("p:sp", &[])?;
    x.open("p:nvSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", "3"), ("name", "Notes Placeholder 2")])?;
    x.open("p:cNvSpPr", &[])?;
    x.empty("a:spLocks", &[("noGrp", "1")])?;
    x.close("p:cNvSpPr")?;
    x.open("p:nvPr", &[])?;
    x.empty("p:ph", &[("type", "body"), ("idx", "1")])?;
    x.close("p:nvPr")?;
    x.close("p:nvSpPr")?;
    x.empty("p:spPr", &[])?;
    x.open("p:txBody", &[])?;
    x.empty("a:bodyPr", &[])?;
    x.empty("a:lstStyle", &[])?;
    x.open("a:p", &[])?;
    for (i, line) in split_lines(text).into_iter().enumerate() {
        if i > 0 {
            x.empty("a:br", &[])?;
        }
        if !line.is_empty() {
            x.open("a:r", &[])?;
            x.empty("a:rPr", &[("lang", "en-US"), ("dirty", "0")])?;
            x.leaf("a:t", &[], line)?;
            x.close("a:r")?;
        }
    }
    x.empty("a:endParaRPr", &[("lang", "en-US"), ("dirty", "0")])?;
    x.close("a:p")?;
    x.close("p:txBody")?;
    x.close("p:sp")?;

    x.close("p:spTree")?;
    x.close("p:cSld")?;
    master_colour_mapping(&mut x)?;
    x.close("p:notes")?;
    Ok(x.into_bytes())
}

pub fn notes_slide_rels(n: usize) -> XmlResult {
    relationships(&[
        rel(1, "notesMaster", "../notesMasters/notesMaster1.xml"),
        rel(2, "slide", format!("../slides/slide{n}.xml")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: XmlResult) -> String {
        String::from_utf8(bytes.unwrap()).unwrap()
    }

    #[test]
    fn rels_part_names() {
        assert_eq!(rels_part("ppt/slides/slide3.xml"), "ppt/slides/_rels/slide3.xml.rels");
        assert_eq!(rels_part("ppt/presentation.xml"), "ppt/_rels/presentation.xml.rels");
    }

    #[test]
    fn notes_lines_become_breaks() {
        let xml = text(notes_slide("first\r\nsecond\rthird\nfourth"));
        assert_eq!(xml.matches("<a:br/>").count(), 3, "got: {xml}");
        for line in ["first", "second", "third", "fourth"] {
            assert!(xml.contains(&format!("<a:t>{line}</a:t>")), "missing {line}");
        }
        assert_eq!(xml.matches("<a:p>").count(), 1);
    }

    #[test]
    fn notes_text_is_escaped_and_sanitised() {
        let xml = text(notes_slide("a < b & \u{1}c"));
        assert!(xml.contains("<a:t>a &lt; b &amp; c</a:t>"), "got: {xml}");
    }

    #[test]
    fn notes_keep_non_ascii() {
        let xml = text(notes_slide("这是测试的备注"));
        assert!(xml.contains("<a:t>这是测试的备注</a:t>"));
    }

    #[test]
    fn content_types_lists_overrides() {
        let xml = text(content_types(&[(slide_part(1), CT_SLIDE)]));
        assert!(xml.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(xml.contains(r#"Extension="png""#));
        assert!(xml.contains(r#"Extension="jpeg""#));
    }

    #[test]
    fn core_properties_omit_missing_fields() {
        let xml = text(core_properties(&CoreProperties {
            title: Some("Quarterly <review>".into()),
            ..Default::default()
        }));
        assert!(xml.contains("<dc:title>Quarterly &lt;review&gt;</dc:title>"));
        assert!(!xml.contains("dc:creator"));
    }

    #[test]
    fn vertical_placeholder_has_orientation() {
        let layout = &crate::pptx::template::default_layouts()[10];
        let xml = text(slide_layout(layout));
        assert!(xml.contains(r#"orient="vert""#));
        assert!(xml.contains(r#"type="vertTitleAndTx""#));
    }
}

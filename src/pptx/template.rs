//! The built-in deck template: slide master, eleven standard layouts, themes.
//!
//! Placeholder frames are given in EMU for the 10 × 7.5 in master. The slide
//! builder never places content into placeholders; they only matter when a
//! deck falls back to a non-blank layout, where PowerPoint shows them as
//! empty prompt boxes.

use super::{Emu, Frame};

/// `type` attribute of `<p:sldLayout>` (ST_SlideLayoutType).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutType {
    Title,
    Obj,
    SecHead,
    TwoObj,
    TwoTxTwoObj,
    TitleOnly,
    Blank,
    ObjTx,
    PicTx,
    VertTx,
    VertTitleAndTx,
    Custom,
}

impl LayoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutType::Title => "title",
            LayoutType::Obj => "obj",
            LayoutType::SecHead => "secHead",
            LayoutType::TwoObj => "twoObj",
            LayoutType::TwoTxTwoObj => "twoTxTwoObj",
            LayoutType::TitleOnly => "titleOnly",
            LayoutType::Blank => "blank",
            LayoutType::ObjTx => "objTx",
            LayoutType::PicTx => "picTx",
            LayoutType::VertTx => "vertTx",
            LayoutType::VertTitleAndTx => "vertTitleAndTx",
            LayoutType::Custom => "cust",
        }
    }
}

/// `type` attribute of `<p:ph>` (ST_PlaceholderType).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Title,
    CenteredTitle,
    SubTitle,
    Body,
    /// Generic content placeholder; serialised without a `type` attribute.
    Object,
    Picture,
    Date,
    Footer,
    SlideNumber,
}

impl PlaceholderKind {
    /// Value of the `type` attribute, `None` for the schema default (`obj`).
    pub fn type_attr(self) -> Option<&'static str> {
        match self {
            PlaceholderKind::Title => Some("title"),
            PlaceholderKind::CenteredTitle => Some("ctrTitle"),
            PlaceholderKind::SubTitle => Some("subTitle"),
            PlaceholderKind::Body => Some("body"),
            PlaceholderKind::Object => None,
            PlaceholderKind::Picture => Some("pic"),
            PlaceholderKind::Date => Some("dt"),
            PlaceholderKind::Footer => Some("ftr"),
            PlaceholderKind::SlideNumber => Some("sldNum"),
        }
    }

    /// Text regions are the placeholders a user would type into.
    pub fn is_text_region(self) -> bool {
        !matches!(
            self,
            PlaceholderKind::Date | PlaceholderKind::Footer | PlaceholderKind::SlideNumber
        )
    }

    fn shape_name(self) -> &'static str {
        match self {
            PlaceholderKind::Title | PlaceholderKind::CenteredTitle => "Title",
            PlaceholderKind::SubTitle => "Subtitle",
            PlaceholderKind::Body => "Text Placeholder",
            PlaceholderKind::Object => "Content Placeholder",
            PlaceholderKind::Picture => "Picture Placeholder",
            PlaceholderKind::Date => "Date Placeholder",
            PlaceholderKind::Footer => "Footer Placeholder",
            PlaceholderKind::SlideNumber => "Slide Number Placeholder",
        }
    }
}

/// A placeholder shape on a master or layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    pub idx: Option<u32>,
    pub vertical: bool,
    pub frame: Frame,
}

impl Placeholder {
    fn new(kind: PlaceholderKind, idx: Option<u32>, frame: Frame) -> Self {
        Self {
            kind,
            idx,
            vertical: false,
            frame,
        }
    }

    fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    /// Shape name as PowerPoint would write it, e.g. "Title 1".
    pub fn shape_name(&self, ordinal: usize) -> String {
        format!("{} {}", self.kind.shape_name(), ordinal)
    }
}

/// A named slide layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayout {
    pub name: String,
    pub layout_type: LayoutType,
    pub placeholders: Vec<Placeholder>,
}

impl SlideLayout {
    pub fn new(name: impl Into<String>, layout_type: LayoutType, placeholders: Vec<Placeholder>) -> Self {
        Self {
            name: name.into(),
            layout_type,
            placeholders,
        }
    }

    /// A layout is blank when it is typed `blank` or has no text regions.
    pub fn is_blank(&self) -> bool {
        self.layout_type == LayoutType::Blank
            || !self.placeholders.iter().any(|p| p.kind.is_text_region())
    }
}

/// Name of the layout the slide builder asks for.
pub const BLANK_LAYOUT_NAME: &str = "Blank";

const fn frame(x: Emu, y: Emu, cx: Emu, cy: Emu) -> Frame {
    Frame { x, y, cx, cy }
}

const TITLE: Frame = frame(457_200, 274_638, 8_229_600, 1_143_000);
const BODY: Frame = frame(457_200, 1_600_200, 8_229_600, 4_525_963);
const DATE: Frame = frame(457_200, 6_356_350, 2_133_600, 365_125);
const FOOTER: Frame = frame(3_124_200, 6_356_350, 2_895_600, 365_125);
const SLIDE_NUMBER: Frame = frame(6_553_200, 6_356_350, 2_133_600, 365_125);

fn footers() -> [Placeholder; 3] {
    [
        Placeholder::new(PlaceholderKind::Date, Some(10), DATE),
        Placeholder::new(PlaceholderKind::Footer, Some(11), FOOTER),
        Placeholder::new(PlaceholderKind::SlideNumber, Some(12), SLIDE_NUMBER),
    ]
}

fn with_footers(mut head: Vec<Placeholder>) -> Vec<Placeholder> {
    head.extend(footers());
    head
}

/// Placeholders of the slide master.
pub fn master_placeholders() -> Vec<Placeholder> {
    vec![
        Placeholder::new(PlaceholderKind::Title, None, TITLE),
        Placeholder::new(PlaceholderKind::Body, Some(1), BODY),
        Placeholder::new(PlaceholderKind::Date, Some(2), DATE),
        Placeholder::new(PlaceholderKind::Footer, Some(3), FOOTER),
        Placeholder::new(PlaceholderKind::SlideNumber, Some(4), SLIDE_NUMBER),
    ]
}

/// The eleven standard Office layouts, in their conventional order.
///
/// Index 6 is "Blank".
pub fn default_layouts() -> Vec<SlideLayout> {
    use PlaceholderKind::*;
    let title = || Placeholder::new(Title, None, TITLE);

    vec![
        SlideLayout::new(
            "Title Slide",
            LayoutType::Title,
            with_footers(vec![
                Placeholder::new(CenteredTitle, None, frame(685_800, 2_130_425, 7_772_400, 1_470_025)),
                Placeholder::new(SubTitle, Some(1), frame(1_371_600, 3_886_200, 6_400_800, 1_752_600)),
            ]),
        ),
        SlideLayout::new(
            "Title and Content",
            LayoutType::Obj,
            with_footers(vec![title(), Placeholder::new(Object, Some(1), BODY)]),
        ),
        SlideLayout::new(
            "Section Header",
            LayoutType::SecHead,
            with_footers(vec![
                Placeholder::new(Title, None, frame(722_313, 4_406_900, 7_772_400, 1_362_075)),
                Placeholder::new(Body, Some(1), frame(722_313, 2_906_713, 7_772_400, 1_500_187)),
            ]),
        ),
        SlideLayout::new(
            "Two Content",
            LayoutType::TwoObj,
            with_footers(vec![
                title(),
                Placeholder::new(Object, Some(1), frame(457_200, 1_600_200, 4_038_600, 4_525_963)),
                Placeholder::new(Object, Some(2), frame(4_648_200, 1_600_200, 4_038_600, 4_525_963)),
            ]),
        ),
        SlideLayout::new(
            "Comparison",
            LayoutType::TwoTxTwoObj,
            with_footers(vec![
                title(),
                Placeholder::new(Body, Some(1), frame(457_200, 1_535_113, 4_040_188, 639_762)),
                Placeholder::new(Object, Some(2), frame(457_200, 2_174_875, 4_040_188, 3_951_288)),
                Placeholder::new(Body, Some(3), frame(4_645_025, 1_535_113, 4_041_775, 639_762)),
                Placeholder::new(Object, Some(4), frame(4_645_025, 2_174_875, 4_041_775, 3_951_288)),
            ]),
        ),
        SlideLayout::new("Title Only", LayoutType::TitleOnly, with_footers(vec![title()])),
        SlideLayout::new(BLANK_LAYOUT_NAME, LayoutType::Blank, vec![]),
        SlideLayout::new(
            "Content with Caption",
            LayoutType::ObjTx,
            with_footers(vec![
                Placeholder::new(Title, None, frame(457_200, 273_050, 3_008_313, 1_162_050)),
                Placeholder::new(Object, Some(1), frame(3_575_050, 273_050, 5_111_750, 5_853_113)),
                Placeholder::new(Body, Some(2), frame(457_200, 1_435_100, 3_008_313, 4_691_063)),
            ]),
        ),
        SlideLayout::new(
            "Picture with Caption",
            LayoutType::PicTx,
            with_footers(vec![
                Placeholder::new(Title, None, frame(1_792_288, 4_800_600, 5_486_400, 566_738)),
                Placeholder::new(Picture, Some(1), frame(1_792_288, 612_775, 5_486_400, 4_114_800)),
                Placeholder::new(Body, Some(2), frame(1_792_288, 5_367_338, 5_486_400, 804_862)),
            ]),
        ),
        SlideLayout::new(
            "Title and Vertical Text",
            LayoutType::VertTx,
            with_footers(vec![title(), Placeholder::new(Body, Some(1), BODY).vertical()]),
        ),
        SlideLayout::new(
            "Vertical Title and Text",
            LayoutType::VertTitleAndTx,
            with_footers(vec![
                Placeholder::new(Title, None, frame(6_629_400, 274_638, 2_057_400, 5_851_525)).vertical(),
                Placeholder::new(Body, Some(1), frame(457_200, 274_638, 6_019_800, 5_851_525)).vertical(),
            ]),
        ),
    ]
}

// ── Notes master geometry (7.5 × 10 in portrait page) ────────────────────

pub const NOTES_WIDTH: Emu = 6_858_000;
pub const NOTES_HEIGHT: Emu = 9_144_000;
pub const NOTES_SLIDE_IMAGE: Frame = frame(1_143_000, 685_800, 4_572_000, 3_429_000);
pub const NOTES_BODY: Frame = frame(685_800, 4_343_400, 5_486_400, 4_114_800);

// ── Static parts ─────────────────────────────────────────────────────────

pub const PRES_PROPS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"/>"#;

pub const VIEW_PROPS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:viewPr xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr><p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#;

pub const TABLE_STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}"/>"#;

/// The Office theme, shared by the slide master and the notes master.
pub const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="50000"/><a:satMod val="300000"/></a:schemeClr></a:gs><a:gs pos="35000"><a:schemeClr val="phClr"><a:tint val="37000"/><a:satMod val="300000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:tint val="15000"/><a:satMod val="350000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="16200000" scaled="1"/></a:gradFill><a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:shade val="51000"/><a:satMod val="130000"/></a:schemeClr></a:gs><a:gs pos="80000"><a:schemeClr val="phClr"><a:shade val="93000"/><a:satMod val="130000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="94000"/><a:satMod val="135000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="16200000" scaled="0"/></a:gradFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"><a:shade val="95000"/><a:satMod val="105000"/></a:schemeClr></a:solidFill><a:prstDash val="solid"/></a:ln><a:ln w="25400" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln><a:ln w="38100" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst><a:outerShdw blurRad="40000" dist="23000" dir="5400000" rotWithShape="0"><a:srgbClr val="000000"><a:alpha val="35000"/></a:srgbClr></a:outerShdw></a:effectLst></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="40000"/><a:satMod val="350000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="20000"/><a:satMod val="255000"/></a:schemeClr></a:gs></a:gsLst><a:path path="circle"><a:fillToRect l="50000" t="-80000" r="50000" b="180000"/></a:path></a:gradFill><a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="80000"/><a:satMod val="300000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="30000"/><a:satMod val="200000"/></a:schemeClr></a:gs></a:gsLst><a:path path="circle"><a:fillToRect l="50000" t="50000" r="50000" b="50000"/></a:path></a:gradFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#;

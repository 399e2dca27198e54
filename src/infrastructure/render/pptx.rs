//! PPTX 打包
//!
//! 幻灯片模型 → OOXML 部件 → zip 包。
//! 包内容只由输入决定（固定时间戳、固定部件顺序），同样的输入得到同样的字节。

use std::io::{Cursor, Read, Write};

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use super::layout::{
    Align, Anchor, Fill, Frame, Paragraph, Shape, SlideModel, TextStyle, SLIDE_HEIGHT,
    SLIDE_WIDTH,
};
use crate::domain::theme::{Rgb, ThemeConfig};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// 打包错误
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, PackageError>;

/// 生成完整的 .pptx 字节
pub fn write_package(deck: &[SlideModel], title: &str, theme: &ThemeConfig) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut put = |name: &str, bytes: &[u8]| -> Result<()> {
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
        Ok(())
    };

    put("[Content_Types].xml", content_types(deck.len()).as_bytes())?;
    put("_rels/.rels", root_rels().as_bytes())?;
    put("docProps/core.xml", core_props(title).as_bytes())?;
    put("docProps/app.xml", app_props(deck.len()).as_bytes())?;
    put("ppt/presentation.xml", presentation(deck.len()).as_bytes())?;
    put(
        "ppt/_rels/presentation.xml.rels",
        presentation_rels(deck.len()).as_bytes(),
    )?;
    put("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
    put(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        relationships(&[
            ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
            ("rId2", REL_THEME, "../theme/theme1.xml"),
        ])
        .as_bytes(),
    )?;
    put("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes())?;
    put(
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        relationships(&[(
            "rId1",
            REL_SLIDE_MASTER,
            "../slideMasters/slideMaster1.xml",
        )])
        .as_bytes(),
    )?;
    put("ppt/theme/theme1.xml", theme_part(theme).as_bytes())?;

    let slide_rels = relationships(&[("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")]);
    for (i, slide) in deck.iter().enumerate() {
        let n = i + 1;
        put(&format!("ppt/slides/slide{n}.xml"), &slide_xml(slide)?)?;
        put(
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            slide_rels.as_bytes(),
        )?;
    }

    Ok(zip.finish()?.into_inner())
}

/// 统计包内幻灯片中的非空文字段（`a:t`）
pub fn count_text_runs(package: &[u8]) -> Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(package))?;
    let names: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .map(str::to_string)
        .collect();

    let mut count = 0;
    for name in names {
        let mut xml = String::new();
        archive.by_name(&name)?.read_to_string(&mut xml)?;

        let mut reader = Reader::from_str(&xml);
        reader.trim_text(true);
        let mut in_text = false;
        loop {
            match reader.read_event()? {
                Event::Start(ref e) if e.name().as_ref() == b"a:t" => in_text = true,
                Event::End(ref e) if e.name().as_ref() == b"a:t" => in_text = false,
                Event::Text(ref e) if in_text => {
                    if !e.unescape()?.trim().is_empty() {
                        count += 1;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
    }
    Ok(count)
}

/// 基于 quick-xml Writer 的小型构造器
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn color(&mut self, color: Rgb) -> Result<()> {
        let hex = color.hex();
        self.empty("a:srgbClr", &[("val", hex.as_str())])
    }

    fn fill(&mut self, fill: &Fill) -> Result<()> {
        match *fill {
            Fill::Solid(color) => {
                self.open("a:solidFill", &[])?;
                self.color(color)?;
                self.close("a:solidFill")
            }
            Fill::Gradient { start, end, angle } => {
                self.open("a:gradFill", &[("rotWithShape", "1")])?;
                self.open("a:gsLst", &[])?;
                for (pos, color) in [("0", start), ("100000", end)] {
                    self.open("a:gs", &[("pos", pos)])?;
                    self.color(color)?;
                    self.close("a:gs")?;
                }
                self.close("a:gsLst")?;
                let ang = ooxml_angle(angle).to_string();
                self.empty("a:lin", &[("ang", ang.as_str()), ("scaled", "0")])?;
                self.close("a:gradFill")
            }
        }
    }

    fn xfrm(&mut self, frame: &Frame) -> Result<()> {
        let (x, y) = (frame.x.to_string(), frame.y.to_string());
        let (cx, cy) = (frame.cx.to_string(), frame.cy.to_string());
        self.open("a:xfrm", &[])?;
        self.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
        self.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        self.close("a:xfrm")
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// CSS 角度（0 = 自下而上）→ DrawingML 角度（0 = 自左向右，单位 1/60000 度）
fn ooxml_angle(css_degrees: u16) -> u32 {
    ((u32::from(css_degrees) + 270) % 360) * 60_000
}

fn slide_xml(slide: &SlideModel) -> Result<Vec<u8>> {
    let mut x = XmlOut::new()?;
    x.open("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
    x.open("p:cSld", &[])?;

    x.open("p:bg", &[])?;
    x.open("p:bgPr", &[])?;
    x.fill(&slide.background)?;
    x.empty("a:effectLst", &[])?;
    x.close("p:bgPr")?;
    x.close("p:bg")?;

    x.open("p:spTree", &[])?;
    group_header(&mut x)?;
    for (i, shape) in slide.shapes.iter().enumerate() {
        // id 1 属于 spTree 自身
        write_shape(&mut x, shape, i + 2)?;
    }
    x.close("p:spTree")?;

    x.close("p:cSld")?;
    x.open("p:clrMapOvr", &[])?;
    x.empty("a:masterClrMapping", &[])?;
    x.close("p:clrMapOvr")?;
    x.close("p:sld")?;
    Ok(x.finish())
}

fn group_header(x: &mut XmlOut) -> Result<()> {
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
    x.close("p:grpSpPr")
}

fn write_shape(x: &mut XmlOut, shape: &Shape, id: usize) -> Result<()> {
    let (name, frame, fill, text) = match shape {
        Shape::Text {
            name,
            frame,
            fill,
            anchor,
            paragraphs,
        } => (*name, frame, fill.as_ref(), Some((anchor, paragraphs))),
        Shape::Block { name, frame, fill } => (*name, frame, Some(fill), None),
    };

    let id = id.to_string();
    x.open("p:sp", &[])?;
    x.open("p:nvSpPr", &[])?;
    x.empty("p:cNvPr", &[("id", id.as_str()), ("name", name)])?;
    if text.is_some() {
        x.empty("p:cNvSpPr", &[("txBox", "1")])?;
    } else {
        x.empty("p:cNvSpPr", &[])?;
    }
    x.empty("p:nvPr", &[])?;
    x.close("p:nvSpPr")?;

    x.open("p:spPr", &[])?;
    x.xfrm(frame)?;
    x.open("a:prstGeom", &[("prst", "rect")])?;
    x.empty("a:avLst", &[])?;
    x.close("a:prstGeom")?;
    match fill {
        Some(fill) => x.fill(fill)?,
        None => x.empty("a:noFill", &[])?,
    }
    x.close("p:spPr")?;

    if let Some((anchor, paragraphs)) = text {
        let anchor = match anchor {
            Anchor::Top => "t",
            Anchor::Middle => "ctr",
        };
        x.open("p:txBody", &[])?;
        x.open("a:bodyPr", &[("wrap", "square"), ("rtlCol", "0"), ("anchor", anchor)])?;
        x.empty("a:normAutofit", &[])?;
        x.close("a:bodyPr")?;
        x.empty("a:lstStyle", &[])?;
        for paragraph in paragraphs {
            write_paragraph(x, paragraph)?;
        }
        x.close("p:txBody")?;
    }

    x.close("p:sp")
}

fn write_paragraph(x: &mut XmlOut, p: &Paragraph) -> Result<()> {
    let algn = match p.align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Justify => "just",
    };
    let space = (u32::from(p.space_after) * 100).to_string();

    x.open("a:p", &[])?;
    x.open("a:pPr", &[("algn", algn)])?;
    x.open("a:spcAft", &[])?;
    x.empty("a:spcPts", &[("val", space.as_str())])?;
    x.close("a:spcAft")?;
    x.empty("a:buNone", &[])?;
    x.close("a:pPr")?;

    if let Some(prefix) = &p.prefix {
        let mut style = p.style;
        style.color = prefix.color;
        style.bold = true;
        write_run(x, &format!("{}  ", prefix.text), &style)?;
    }
    write_run(x, &p.text, &p.style)?;

    x.close("a:p")
}

fn write_run(x: &mut XmlOut, text: &str, style: &TextStyle) -> Result<()> {
    let size = (u32::from(style.size) * 100).to_string();
    let mut attrs = vec![("lang", "en-US"), ("sz", size.as_str())];
    if style.bold {
        attrs.push(("b", "1"));
    }
    if style.italic {
        attrs.push(("i", "1"));
    }
    attrs.push(("dirty", "0"));

    x.open("a:r", &[])?;
    x.open("a:rPr", &attrs)?;
    x.open("a:solidFill", &[])?;
    x.color(style.color)?;
    x.close("a:solidFill")?;
    x.empty("a:latin", &[("typeface", style.font)])?;
    x.empty("a:cs", &[("typeface", style.font)])?;
    x.close("a:rPr")?;
    x.open("a:t", &[])?;
    x.text(text)?;
    x.close("a:t")?;
    x.close("a:r")
}

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

fn content_types(slides: usize) -> String {
    let mut xml = format!(
        "{XML_DECL}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"{CT_PRESENTATION}\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"{CT_SLIDE_MASTER}\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"{CT_SLIDE_LAYOUT}\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"{CT_THEME}\"/>\
         <Override PartName=\"/docProps/core.xml\" ContentType=\"{CT_CORE}\"/>\
         <Override PartName=\"/docProps/app.xml\" ContentType=\"{CT_EXTENDED}\"/>"
    );
    for n in 1..=slides {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{n}.xml\" ContentType=\"{CT_SLIDE}\"/>"
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn relationships(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">"
    );
    for (id, kind, target) in rels {
        xml.push_str(&format!(
            "<Relationship Id=\"{id}\" Type=\"{kind}\" Target=\"{target}\"/>"
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn root_rels() -> String {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", REL_CORE, "docProps/core.xml"),
        ("rId3", REL_EXTENDED, "docProps/app.xml"),
    ])
}

/// 关系 ID: rId1 母版，rId2.. 幻灯片，最后是主题
fn presentation_rels(slides: usize) -> String {
    let targets: Vec<(String, &str, String)> = std::iter::once((
        "rId1".to_string(),
        REL_SLIDE_MASTER,
        "slideMasters/slideMaster1.xml".to_string(),
    ))
    .chain((1..=slides).map(|n| (format!("rId{}", n + 1), REL_SLIDE, format!("slides/slide{n}.xml"))))
    .chain(std::iter::once((
        format!("rId{}", slides + 2),
        REL_THEME,
        "theme/theme1.xml".to_string(),
    )))
    .collect();
    let borrowed: Vec<(&str, &str, &str)> = targets
        .iter()
        .map(|(id, kind, target)| (id.as_str(), *kind, target.as_str()))
        .collect();
    relationships(&borrowed)
}

fn presentation(slides: usize) -> String {
    let mut ids = String::new();
    for n in 1..=slides {
        ids.push_str(&format!("<p:sldId id=\"{}\" r:id=\"rId{}\"/>", 255 + n, n + 1));
    }
    format!(
        "{XML_DECL}<p:presentation xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\" saveSubsetFonts=\"1\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>{ids}</p:sldIdLst>\
         <p:sldSz cx=\"{SLIDE_WIDTH}\" cy=\"{SLIDE_HEIGHT}\"/>\
         <p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>"
    )
}

fn core_props(title: &str) -> String {
    format!(
        "{XML_DECL}<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\
         <dc:title>{}</dc:title><dc:creator>deckgen</dc:creator>\
         </cp:coreProperties>",
        escape(title)
    )
}

fn app_props(slides: usize) -> String {
    format!(
        "{XML_DECL}<Properties \
         xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\
         <Application>deckgen</Application><PresentationFormat>Widescreen</PresentationFormat>\
         <Slides>{slides}</Slides></Properties>"
    )
}

const SLIDE_MASTER: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#,
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    r#"</p:spTree></p:cSld>"#,
    r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
    r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
    r#"</p:sldMaster>"#
);

const SLIDE_LAYOUT: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">"#,
    r#"<p:cSld name="Blank"><p:spTree>"#,
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
);

/// 主题部件: 配色与字体取自 ThemeConfig
fn theme_part(theme: &ThemeConfig) -> String {
    let c = &theme.color_scheme;
    let f = &theme.font_scheme;
    let slot = |tag: &str, color: Rgb| format!("<a:{tag}><a:srgbClr val=\"{}\"/></a:{tag}>", color.hex());
    let font = |tag: &str, face: &str| {
        format!(
            "<a:{tag}><a:latin typeface=\"{}\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:{tag}>",
            escape(face)
        )
    };
    let phclr = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";
    let line = format!("<a:ln w=\"6350\">{phclr}</a:ln>");
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";

    format!(
        "{XML_DECL}<a:theme xmlns:a=\"{NS_A}\" name=\"{name}\"><a:themeElements>\
         <a:clrScheme name=\"{name}\">{dk1}{lt1}{dk2}{lt2}{a1}{a2}{a3}{a4}{a5}{a6}{hl}{fhl}</a:clrScheme>\
         <a:fontScheme name=\"{name}\">{major}{minor}</a:fontScheme>\
         <a:fmtScheme name=\"{name}\">\
         <a:fillStyleLst>{phclr}{phclr}{phclr}</a:fillStyleLst>\
         <a:lnStyleLst>{line}{line}{line}</a:lnStyleLst>\
         <a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst>\
         <a:bgFillStyleLst>{phclr}{phclr}{phclr}</a:bgFillStyleLst>\
         </a:fmtScheme></a:themeElements></a:theme>",
        name = escape(theme.display_name),
        dk1 = slot("dk1", c.text_primary),
        lt1 = slot("lt1", c.text_light),
        dk2 = slot("dk2", c.primary),
        lt2 = slot("lt2", c.background_start),
        a1 = slot("accent1", c.primary),
        a2 = slot("accent2", c.secondary),
        a3 = slot("accent3", c.accent),
        a4 = slot("accent4", c.text_secondary),
        a5 = slot("accent5", c.background_end),
        a6 = slot("accent6", c.text_primary),
        hl = slot("hlink", c.secondary),
        fhl = slot("folHlink", c.primary),
        major = font("majorFont", f.title_font),
        minor = font("minorFont", f.content_font),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presentation::{ContentType, Slide, SlideDocument};
    use crate::domain::theme::ThemeRegistry;
    use crate::infrastructure::render::layout::{layout_deck, RenderOptions};

    fn sample_deck(options: RenderOptions) -> (Vec<SlideModel>, ThemeConfig) {
        let theme = *ThemeRegistry::builtin().get("ocean_depths");
        let doc = SlideDocument {
            title: "Tides & Currents".to_string(),
            description: "A <deep> dive".to_string(),
            slides: vec![
                Slide::new("Basics", ContentType::BulletPoints)
                    .with_bullets(["Data from buoys", "Global patterns"]),
                Slide::new("Break", ContentType::TitleOnly),
            ],
        };
        (layout_deck(&doc, &theme, options), theme)
    }

    fn entry(package: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
        let mut xml = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_package_contains_one_part_per_slide() {
        let (deck, theme) = sample_deck(RenderOptions::default());
        let bytes = write_package(&deck, "Tides & Currents", &theme).unwrap();

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let slides = archive
            .file_names()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .count();
        assert_eq!(slides, 3);

        let presentation = entry(&bytes, "ppt/presentation.xml");
        assert!(presentation.contains("cx=\"12192000\" cy=\"6858000\""));
        assert!(presentation.contains("r:id=\"rId4\""));
        assert!(entry(&bytes, "[Content_Types].xml").contains("/ppt/slides/slide3.xml"));
    }

    #[test]
    fn test_text_is_escaped_and_counted() {
        let (deck, theme) = sample_deck(RenderOptions::default());
        let bytes = write_package(&deck, "Tides & Currents", &theme).unwrap();

        let title = entry(&bytes, "ppt/slides/slide1.xml");
        assert!(title.contains("Tides &amp; Currents"));
        assert!(title.contains("A &lt;deep&gt; dive"));
        assert!(title.contains("<a:gradFill"));
        assert!(title.contains(&theme.color_scheme.primary.hex()));

        // 标题页 2 段 + 内容页标题与 2 条要点（各含前缀） + 章节页 1 段
        assert_eq!(count_text_runs(&bytes).unwrap(), 2 + 1 + 4 + 1);
    }

    /// 按文档顺序读出 sldIdLst 中的 (id, r:id)
    fn slide_id_list(presentation: &str) -> Vec<(String, String)> {
        let mut reader = Reader::from_str(presentation);
        let mut ids = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Empty(ref e) if e.name().as_ref() == b"p:sldId" => {
                    let attr = |key: &str| {
                        e.try_get_attribute(key)
                            .unwrap()
                            .unwrap()
                            .unescape_value()
                            .unwrap()
                            .into_owned()
                    };
                    ids.push((attr("id"), attr("r:id")));
                }
                Event::Eof => break,
                _ => {}
            }
        }
        ids
    }

    #[test]
    fn test_slide_parts_follow_document_order() {
        let theme = *ThemeRegistry::builtin().get("ocean_depths");
        let titles = ["Alpha Topic", "Beta Topic", "Gamma Topic", "Delta Topic"];
        let doc = SlideDocument {
            title: "Ordering Deck".to_string(),
            description: String::new(),
            slides: titles
                .iter()
                .map(|t| Slide::new(*t, ContentType::BulletPoints).with_bullets([format!("About {t}")]))
                .collect(),
        };
        let deck = layout_deck(&doc, &theme, RenderOptions::default());
        let bytes = write_package(&deck, &doc.title, &theme).unwrap();

        // slide1 是标题页，第 k 张内容页在 slide{k+2}
        for (k, title) in titles.iter().enumerate() {
            let xml = entry(&bytes, &format!("ppt/slides/slide{}.xml", k + 2));
            assert!(xml.contains(title), "slide{} should hold {title}", k + 2);
            for other in titles.iter().filter(|o| *o != title) {
                assert!(!xml.contains(other));
            }
        }

        let ids = slide_id_list(&entry(&bytes, "ppt/presentation.xml"));
        let expected: Vec<(String, String)> = (1..=titles.len() + 1)
            .map(|n| ((255 + n).to_string(), format!("rId{}", n + 1)))
            .collect();
        assert_eq!(ids, expected);

        let rels = entry(&bytes, "ppt/_rels/presentation.xml.rels");
        for n in 1..=titles.len() + 1 {
            assert!(rels.contains(&format!(
                "Id=\"rId{}\" Type=\"{REL_SLIDE}\" Target=\"slides/slide{n}.xml\"",
                n + 1
            )));
        }
    }

    #[test]
    fn test_solid_backgrounds_without_gradients() {
        let (deck, theme) = sample_deck(RenderOptions { gradients: false });
        let bytes = write_package(&deck, "t", &theme).unwrap();

        assert!(!entry(&bytes, "ppt/slides/slide1.xml").contains("<a:gradFill"));
        assert!(!entry(&bytes, "ppt/slides/slide2.xml").contains("<a:gradFill"));
    }

    #[test]
    fn test_package_bytes_are_deterministic() {
        let (deck, theme) = sample_deck(RenderOptions::default());
        let first = write_package(&deck, "t", &theme).unwrap();
        let second = write_package(&deck, "t", &theme).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_gradient_angle_conversion() {
        assert_eq!(ooxml_angle(180), 5_400_000);
        assert_eq!(ooxml_angle(90), 0);
        assert_eq!(ooxml_angle(135), 2_700_000);
    }
}

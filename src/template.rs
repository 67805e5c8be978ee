//! Template helpers - common WordprocessingML structures
//!
//! Every helper builds through the catalogue factories, so the same schema
//! rules apply as for hand-built trees.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::docx::ElementKind;
use crate::element::{Element, SchemaViolation};

type Result<T> = std::result::Result<T, SchemaViolation>;

/// Font style
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    /// Font family
    pub family: String,
    /// Font size in half-points
    pub size: u32,
    /// RGB hex color, e.g. `0000FF`
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Indentation {
    pub start: i32,
    pub end: i32,
    pub hanging: i32,
    pub first_line: i32,
}

/// Tab stop style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabVal {
    Bar,
    Center,
    Clear,
    Decimal,
    End,
    Num,
    #[default]
    Start,
}

impl TabVal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Center => "center",
            Self::Clear => "clear",
            Self::Decimal => "decimal",
            Self::End => "end",
            Self::Num => "num",
            Self::Start => "start",
        }
    }
}

impl fmt::Display for TabVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tab fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabLeader {
    Dot,
    Heavy,
    Hyphen,
    MiddleDot,
    #[default]
    None,
    Underscore,
}

impl TabLeader {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Heavy => "heavy",
            Self::Hyphen => "hyphen",
            Self::MiddleDot => "middleDot",
            Self::None => "none",
            Self::Underscore => "underscore",
        }
    }
}

impl fmt::Display for TabLeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tab {
    pub pos: i32,
    pub val: TabVal,
    pub leader: TabLeader,
}

/// Paragraph options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    /// Try to keep lines on the same page
    pub keep_lines: bool,
    /// Keep this paragraph on the same page as the next one
    pub keep_next: bool,
    pub spacing: Option<Spacing>,
    pub indentation: Option<Indentation>,
    pub style: Option<Style>,
    pub tabs: Vec<Tab>,
}

/// Run wrapping a single child
pub fn run(child: Element) -> Result<Element> {
    ElementKind::R.create().with_child(child)
}

/// Tab element. `None` yields a bare `<w:tab/>` for use inside a run.
pub fn tab(options: Option<&Tab>) -> Result<Element> {
    let el = ElementKind::Tab.create();
    let Some(options) = options else {
        return Ok(el);
    };

    el.with_attr("w:val", options.val)?
        .with_attr("w:pos", options.pos)?
        .with_attr("w:leader", options.leader)
}

pub fn tabs(tabs: &[Tab]) -> Result<Element> {
    let mut el = ElementKind::Tabs.create();
    for options in tabs {
        el.append(tab(Some(options))?)?;
    }
    Ok(el)
}

/// Indentation element. Zero values are omitted; `firstLine` only applies without `hanging`.
pub fn indentation(options: &Indentation) -> Result<Element> {
    let mut el = ElementKind::Ind.create();

    if options.start != 0 {
        el.set_attr("w:start", options.start)?;
    }
    if options.end != 0 {
        el.set_attr("w:end", options.end)?;
    }
    if options.hanging != 0 {
        el.set_attr("w:hanging", options.hanging)?;
    }
    if options.first_line != 0 && options.hanging == 0 {
        el.set_attr("w:firstLine", options.first_line)?;
    }

    Ok(el)
}

pub fn spacing(options: &Spacing) -> Result<Element> {
    ElementKind::Spacing
        .create()
        .with_attr("w:before", options.before)?
        .with_attr("w:after", options.after)
}

/// Run properties element
pub fn style(options: &Style) -> Result<Element> {
    let mut el = ElementKind::RPr.create();

    if !options.family.is_empty() {
        el.append(font(&options.family)?)?;
    }
    if options.size != 0 {
        el.append(size(options.size)?)?;
    }
    if !options.color.is_empty() {
        el.append(color(&options.color)?)?;
    }
    if options.bold {
        el.append(ElementKind::B.create())?;
    }
    if options.italic {
        el.append(ElementKind::I.create())?;
    }
    if options.underline {
        el.append(ElementKind::U.create().with_attr("w:val", "single")?)?;
    }

    Ok(el)
}

/// Paragraph whose first child is its property element
pub fn paragraph(options: &Paragraph) -> Result<Element> {
    let mut prop = ElementKind::PPr.create();

    if let Some(options) = options.style.as_ref().filter(|s| !s.is_empty()) {
        prop.append(style(options)?)?;
    }
    if let Some(options) = options.spacing.as_ref().filter(|s| **s != Spacing::default()) {
        prop.append(spacing(options)?)?;
    }
    if let Some(options) = options.indentation.as_ref().filter(|i| **i != Indentation::default()) {
        prop.append(indentation(options)?)?;
    }
    if !options.tabs.is_empty() {
        prop.append(tabs(&options.tabs)?)?;
    }
    if options.keep_lines {
        prop.append(ElementKind::KeepLines.create())?;
    }
    if options.keep_next {
        prop.append(ElementKind::KeepNext.create())?;
    }

    ElementKind::P.create().with_child(prop)
}

/// Run holding a text element, optionally styled.
///
/// `preserve` keeps leading and trailing whitespace.
pub fn text(text: &str, style: Option<&Style>, preserve: bool) -> Result<Element> {
    let mut run = ElementKind::R.create();
    let mut t = ElementKind::T.create().with_text(text);

    if let Some(options) = style.filter(|s| !s.is_empty()) {
        run.append(self::style(options)?)?;
    }
    if preserve {
        t.set_attr("xml:space", "preserve")?;
    }

    run.append(t)?;
    Ok(run)
}

pub fn color(color: &str) -> Result<Element> {
    ElementKind::Color.create().with_attr("w:val", color)
}

pub fn font(family: &str) -> Result<Element> {
    ElementKind::RFonts
        .create()
        .with_attr("w:cs", family)?
        .with_attr("w:ascii", family)?
        .with_attr("w:hAnsi", family)
}

pub fn size(size: u32) -> Result<Element> {
    ElementKind::Sz.create().with_attr("w:val", size)
}

fn field_char(kind: &str) -> Result<Element> {
    run(ElementKind::FldChar.create().with_attr("w:fldCharType", kind)?)
}

pub fn fld_begin() -> Result<Element> {
    field_char("begin")
}

pub fn fld_separate() -> Result<Element> {
    field_char("separate")
}

pub fn fld_end() -> Result<Element> {
    field_char("end")
}

/// Field instruction run. `url` must already be XML-escaped.
pub fn hyperlink(url: &str) -> Result<Element> {
    let instr = ElementKind::InstrText
        .create()
        .with_text(format!("HYPERLINK &quot;{url}&quot; "))
        .with_attr("xml:space", "preserve")?;
    run(instr)
}

/// The five runs that render an inline hyperlink field
pub fn link(text: &str, url: &str, style: Option<&Style>) -> Result<Vec<Element>> {
    Ok(vec![
        fld_begin()?,
        hyperlink(url)?,
        fld_separate()?,
        self::text(text, style, true)?,
        fld_end()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Markup;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tab() {
        let el = tab(Some(&Tab {
            val: TabVal::Start,
            pos: 700,
            leader: TabLeader::None,
        }))
        .unwrap();
        assert_eq!(el.render(), r#"<w:tab w:val="start" w:pos="700" w:leader="none"/>"#);
    }

    #[test]
    fn test_bare_tab() {
        assert_eq!(tab(None).unwrap().render(), "<w:tab/>");
    }

    #[test]
    fn test_tabs() {
        let el = tabs(&[
            Tab { val: TabVal::End, pos: 700, leader: TabLeader::None },
            Tab { val: TabVal::Start, pos: 850, leader: TabLeader::None },
        ])
        .unwrap();
        assert_eq!(
            el.render(),
            concat!(
                "<w:tabs>",
                r#"<w:tab w:val="end" w:pos="700" w:leader="none"/>"#,
                r#"<w:tab w:val="start" w:pos="850" w:leader="none"/>"#,
                "</w:tabs>",
            )
        );
    }

    #[test]
    fn test_indentation() {
        let el = indentation(&Indentation {
            start: 500,
            end: 500,
            hanging: 500,
            first_line: 0,
        })
        .unwrap();
        assert_eq!(el.render(), r#"<w:ind w:start="500" w:end="500" w:hanging="500"/>"#);
    }

    #[test]
    fn test_first_line_dropped_with_hanging() {
        let with_hanging = indentation(&Indentation { hanging: 200, first_line: 300, ..Default::default() }).unwrap();
        assert_eq!(with_hanging.render(), r#"<w:ind w:hanging="200"/>"#);

        let without = indentation(&Indentation { first_line: 300, ..Default::default() }).unwrap();
        assert_eq!(without.render(), r#"<w:ind w:firstLine="300"/>"#);
    }

    #[test]
    fn test_spacing() {
        let el = spacing(&Spacing { before: 100, after: 100 }).unwrap();
        assert_eq!(el.render(), r#"<w:spacing w:before="100" w:after="100"/>"#);
    }

    #[test]
    fn test_style() {
        let el = style(&Style {
            color: "000000".to_string(),
            size: 20,
            bold: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(el.render(), r#"<w:rPr><w:sz w:val="20"/><w:color w:val="000000"/><w:b/></w:rPr>"#);
    }

    #[test]
    fn test_style_full_order() {
        let el = style(&Style {
            family: "Arial".to_string(),
            size: 24,
            color: "FF0000".to_string(),
            bold: true,
            italic: true,
            underline: true,
        })
        .unwrap();
        assert_eq!(
            el.render(),
            concat!(
                "<w:rPr>",
                r#"<w:rFonts w:cs="Arial" w:ascii="Arial" w:hAnsi="Arial"/>"#,
                r#"<w:sz w:val="24"/>"#,
                r#"<w:color w:val="FF0000"/>"#,
                "<w:b/><w:i/>",
                r#"<w:u w:val="single"/>"#,
                "</w:rPr>",
            )
        );
    }

    #[test]
    fn test_text() {
        assert_eq!(text("hello", None, false).unwrap().render(), "<w:r><w:t>hello</w:t></w:r>");
    }

    #[test]
    fn test_text_with_style() {
        let style = Style { color: "0000FF".to_string(), ..Default::default() };
        let el = text("hello", Some(&style), true).unwrap();
        assert_eq!(
            el.render(),
            concat!(
                "<w:r>",
                r#"<w:rPr><w:color w:val="0000FF"/></w:rPr>"#,
                r#"<w:t xml:space="preserve">hello</w:t>"#,
                "</w:r>",
            )
        );
    }

    #[test]
    fn test_text_empty_style_skipped() {
        let el = text("hi", Some(&Style::default()), false).unwrap();
        assert_eq!(el.render(), "<w:r><w:t>hi</w:t></w:r>");
    }

    #[test]
    fn test_empty_paragraph() {
        let el = paragraph(&Paragraph::default()).unwrap();
        assert_eq!(el.render(), "<w:p><w:pPr/></w:p>");
    }

    #[test]
    fn test_paragraph_property_order() {
        let el = paragraph(&Paragraph {
            keep_lines: true,
            keep_next: true,
            spacing: Some(Spacing { before: 0, after: 120 }),
            indentation: Some(Indentation { start: 720, ..Default::default() }),
            style: Some(Style { bold: true, ..Default::default() }),
            tabs: vec![Tab { pos: 4000, ..Default::default() }],
        })
        .unwrap();
        assert_eq!(
            el.render(),
            concat!(
                "<w:p><w:pPr>",
                "<w:rPr><w:b/></w:rPr>",
                r#"<w:spacing w:before="0" w:after="120"/>"#,
                r#"<w:ind w:start="720"/>"#,
                r#"<w:tabs><w:tab w:val="start" w:pos="4000" w:leader="none"/></w:tabs>"#,
                "<w:keepLines/><w:keepNext/>",
                "</w:pPr></w:p>",
            )
        );
    }

    #[test]
    fn test_paragraph_skips_empty_spacing_and_indentation() {
        let options: Paragraph = serde_json::from_str(r#"{"spacing": {}, "indentation": {}}"#).unwrap();
        let el = paragraph(&options).unwrap();
        assert_eq!(el.render(), "<w:p><w:pPr/></w:p>");
    }

    #[test]
    fn test_paragraph_accepts_runs() {
        let mut p = paragraph(&Paragraph::default()).unwrap();
        p.append(text("body", None, false).unwrap()).unwrap();
        assert_eq!(p.render(), "<w:p><w:pPr/><w:r><w:t>body</w:t></w:r></w:p>");
    }

    #[test]
    fn test_hyperlink() {
        let el = hyperlink("https://www.example.com/").unwrap();
        assert_eq!(
            el.render(),
            r#"<w:r><w:instrText xml:space="preserve">HYPERLINK &quot;https://www.example.com/&quot; </w:instrText></w:r>"#
        );
    }

    #[test]
    fn test_link() {
        let style = Style { underline: true, color: "0000FF".to_string(), ..Default::default() };
        let link = link("example", "https://www.example.com/", Some(&style)).unwrap();

        assert_eq!(link.len(), 5);
        assert_eq!(link[0].get_child(0).map(|c| c.tag_name()), Some("w:fldChar"));
        assert_eq!(link[1].get_child(0).map(|c| c.tag_name()), Some("w:instrText"));
        assert_eq!(link[2].render(), r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
        assert_eq!(link[4].render(), r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
    }

    #[test]
    fn test_paragraph_options_from_json() {
        let options: Paragraph = serde_json::from_str(
            r#"{"keepNext": true, "tabs": [{"pos": 850, "val": "end", "leader": "middleDot"}]}"#,
        )
        .unwrap();
        assert!(options.keep_next);
        assert_eq!(options.tabs[0].val, TabVal::End);
        assert_eq!(options.tabs[0].leader, TabLeader::MiddleDot);
        assert_eq!(options.spacing, None);
    }
}

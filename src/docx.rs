//! WordprocessingML element catalogue
//!
//! See http://officeopenxml.com/anatomyofOOXML.php for the element anatomy.

use std::sync::LazyLock;

use crate::element::{Element, ElementFactory};
use crate::schema::SchemaDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    P,
    PPr,
    R,
    T,
    RPr,
    KeepLines,
    KeepNext,
    Tabs,
    Spacing,
    Ind,
    Tab,
    Sz,
    B,
    I,
    U,
    FldChar,
    InstrText,
    RFonts,
    Color,
}

const KIND_COUNT: usize = 19;

const NONE: &[&str] = &[];

struct Rules {
    tag: &'static str,
    attributes: &'static [&'static str],
    children: &'static [&'static str],
}

impl Rules {
    const fn new(
        tag: &'static str,
        attributes: &'static [&'static str],
        children: &'static [&'static str],
    ) -> Self {
        Self { tag, attributes, children }
    }
}

static FACTORIES: LazyLock<[ElementFactory; KIND_COUNT]> =
    LazyLock::new(|| ElementKind::ALL.map(|kind| ElementFactory::from_trusted(kind.descriptor())));

impl ElementKind {
    pub const ALL: [ElementKind; KIND_COUNT] = [
        Self::P,
        Self::PPr,
        Self::R,
        Self::T,
        Self::RPr,
        Self::KeepLines,
        Self::KeepNext,
        Self::Tabs,
        Self::Spacing,
        Self::Ind,
        Self::Tab,
        Self::Sz,
        Self::B,
        Self::I,
        Self::U,
        Self::FldChar,
        Self::InstrText,
        Self::RFonts,
        Self::Color,
    ];

    /// Semantic name used for registry lookups
    pub fn name(self) -> &'static str {
        match self {
            Self::P => "p",
            Self::PPr => "pPr",
            Self::R => "r",
            Self::T => "t",
            Self::RPr => "rPr",
            Self::KeepLines => "keepLines",
            Self::KeepNext => "keepNext",
            Self::Tabs => "tabs",
            Self::Spacing => "spacing",
            Self::Ind => "ind",
            Self::Tab => "tab",
            Self::Sz => "sz",
            Self::B => "b",
            Self::I => "i",
            Self::U => "u",
            Self::FldChar => "fldChar",
            Self::InstrText => "instrText",
            Self::RFonts => "rFonts",
            Self::Color => "color",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn rules(self) -> Rules {
        match self {
            Self::P => Rules::new("w:p", NONE, &["w:r", "w:pPr"]),
            Self::PPr => Rules::new(
                "w:pPr",
                NONE,
                &["w:keepLines", "w:keepNext", "w:tabs", "w:spacing", "w:ind", "w:rPr"],
            ),
            Self::R => Rules::new(
                "w:r",
                NONE,
                &["w:t", "w:rPr", "w:tab", "w:fldChar", "w:instrText"],
            ),
            Self::T => Rules::new("w:t", &["xml:space"], NONE),
            Self::RPr => Rules::new(
                "w:rPr",
                NONE,
                &["w:b", "w:i", "w:u", "w:sz", "w:color", "w:rFonts"],
            ),
            Self::KeepLines => Rules::new("w:keepLines", NONE, NONE),
            Self::KeepNext => Rules::new("w:keepNext", NONE, NONE),
            Self::Tabs => Rules::new("w:tabs", NONE, &["w:tab"]),
            Self::Spacing => Rules::new("w:spacing", &["w:before", "w:after"], NONE),
            Self::Ind => Rules::new(
                "w:ind",
                &["w:start", "w:end", "w:hanging", "w:firstLine"],
                NONE,
            ),
            Self::Tab => Rules::new("w:tab", &["w:val", "w:pos", "w:leader"], NONE),
            Self::Sz => Rules::new("w:sz", &["w:val"], NONE),
            Self::B => Rules::new("w:b", NONE, NONE),
            Self::I => Rules::new("w:i", NONE, NONE),
            Self::U => Rules::new("w:u", &["w:val", "w:color"], NONE),
            Self::FldChar => Rules::new("w:fldChar", &["w:fldCharType"], NONE),
            Self::InstrText => Rules::new("w:instrText", &["xml:space"], NONE),
            Self::RFonts => Rules::new(
                "w:rFonts",
                &["w:ascii", "w:cs", "w:hAnsi", "w:eastAsia"],
                NONE,
            ),
            Self::Color => Rules::new("w:color", &["w:val"], NONE),
        }
    }

    pub fn descriptor(self) -> SchemaDescriptor {
        let rules = self.rules();
        SchemaDescriptor::new(rules.tag)
            .with_attributes(rules.attributes.iter().copied())
            .with_children(rules.children.iter().copied())
    }

    pub fn tag_name(self) -> &'static str {
        self.rules().tag
    }

    /// Shared factory for this kind
    pub fn factory(self) -> &'static ElementFactory {
        &FACTORIES[self as usize]
    }

    pub fn create(self) -> Element {
        self.factory().create()
    }
}

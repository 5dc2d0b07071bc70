// src/document/model.rs
//! Format-neutral document model: an ordered list of immutable blocks that
//! the DOCX writer lowers at the very end.

use crate::image_validator::DecodedImage;
use crate::types::Rgb;

pub const HYPERLINK_COLOR: Rgb = Rgb(0x00, 0x00, 0xFF);
pub const BULLET_PREFIX: &str = "•\t";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Rgb>,
    pub size_pt: Option<f32>,
    pub font: Option<String>,
}

impl RunStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn hyperlink() -> Self {
        Self {
            underline: true,
            color: Some(HYPERLINK_COLOR),
            ..Self::default()
        }
    }

    /// Plain run pinned to the document's base font.
    pub fn base(base: &BaseStyle) -> Self {
        Self {
            font: Some(base.font_family.clone()),
            size_pt: Some(base.size_pt),
            ..Self::default()
        }
    }

    pub fn sized(mut self, size_pt: f32) -> Self {
        self.size_pt = Some(size_pt);
        self
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Text may contain `\n`, which the writer turns into line breaks.
    Text { text: String, style: RunStyle },
    LineBreak,
    Picture(Picture),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub image: DecodedImage,
    pub width_in: f32,
}

impl Picture {
    pub fn new(image: DecodedImage, width_in: f32) -> Self {
        Self { image, width_in }
    }

    /// Height keeping the source aspect ratio at the fixed display width.
    pub fn height_in(&self) -> f32 {
        self.width_in * self.image.height_px as f32 / self.image.width_px.max(1) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphKind {
    #[default]
    Normal,
    Heading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indent {
    pub left_pt: f32,
    pub first_line_pt: f32,
}

impl Indent {
    /// Hanging indent so wrapped lines align under the text, not the bullet.
    pub const BULLET: Indent = Indent {
        left_pt: 36.0,
        first_line_pt: -18.0,
    };
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub alignment: Option<Alignment>,
    pub indent: Option<Indent>,
    pub space_after_pt: Option<f32>,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(text: &str) -> Self {
        let mut p = Self {
            kind: ParagraphKind::Heading,
            ..Self::default()
        };
        p.push_text(text, RunStyle::plain());
        p
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }

    pub fn push_text(&mut self, text: impl Into<String>, style: RunStyle) {
        self.inlines.push(Inline::Text {
            text: text.into(),
            style,
        });
    }

    pub fn push_break(&mut self) {
        self.inlines.push(Inline::LineBreak);
    }

    pub fn push_picture(&mut self, picture: Picture) {
        self.inlines.push(Inline::Picture(picture));
    }

    /// Text runs with their styles, in order.
    pub fn runs(&self) -> Vec<(&str, &RunStyle)> {
        self.inlines
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text { text, style } => Some((text.as_str(), style)),
                _ => None,
            })
            .collect()
    }

    /// Concatenated text, with line breaks rendered as `\n`.
    pub fn text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text { text, .. } => text.as_str(),
                Inline::LineBreak => "\n",
                Inline::Picture(_) => "",
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub width_in: f32,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Single-row borderless table.
    Table(Vec<TableCell>),
    Paragraph(Paragraph),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseStyle {
    pub font_family: String,
    pub size_pt: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingStyle {
    pub id: &'static str,
    pub font_family: String,
    pub size_pt: f32,
    pub bold: bool,
    pub color: Rgb,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub base: BaseStyle,
    pub heading: HeadingStyle,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn headings(&self) -> Vec<String> {
        self.paragraphs()
            .filter(|p| p.kind == ParagraphKind::Heading)
            .map(Paragraph::text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_and_runs() {
        let mut p = Paragraph::new();
        assert!(p.is_empty());
        p.push_text("Title", RunStyle::bold());
        p.push_break();
        p.push_text("Company", RunStyle::italic());
        assert_eq!(p.text(), "Title\nCompany");
        assert_eq!(p.runs().len(), 2);
        assert!(p.runs()[0].1.bold);
    }

    #[test]
    fn test_picture_height_keeps_aspect() {
        let picture = Picture::new(
            DecodedImage {
                bytes: Vec::new(),
                width_px: 200,
                height_px: 100,
                format: "png",
            },
            1.4,
        );
        assert!((picture.height_in() - 0.7).abs() < 1e-6);
    }
}

// src/document/docx.rs
//! Lowering of the block model to a WordprocessingML package via `docx-rs`.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, Paragraph as DocxParagraph, Pic, Run, RunFonts,
    SpecialIndentType, Style, StyleType, Table, TableBorders, TableCell as DocxCell,
    TableLayoutType, TableRow, WidthType,
};
use tracing::{debug, error};

use super::model::{
    Alignment, Block, Document, HeadingStyle, Inline, Paragraph, ParagraphKind, Picture,
    RunStyle, TableCell,
};
use crate::error::{RenderError, Result};

const EMU_PER_INCH: f32 = 914_400.0;
const TWIPS_PER_INCH: f32 = 1440.0;
const TWIPS_PER_POINT: f32 = 20.0;

fn half_points(pt: f32) -> usize {
    (pt * 2.0).round().max(1.0) as usize
}

fn twips(pt: f32) -> i32 {
    (pt * TWIPS_PER_POINT).round() as i32
}

fn inch_twips(inches: f32) -> usize {
    (inches * TWIPS_PER_INCH).round() as usize
}

fn emu(inches: f32) -> u32 {
    (inches * EMU_PER_INCH).round() as u32
}

fn fonts(family: &str) -> RunFonts {
    RunFonts::new()
        .ascii(family)
        .hi_ansi(family)
        .east_asia(family)
        .cs(family)
}

/// Paragraph and picture ids, numbered per document. docx-rs defaults draw
/// them from process-wide counters.
#[derive(Default)]
struct Ids {
    paragraphs: usize,
    pictures: usize,
}

impl Ids {
    fn paragraph(&mut self) -> String {
        self.paragraphs += 1;
        format!("{:08X}", self.paragraphs)
    }

    fn picture(&mut self) -> String {
        self.pictures += 1;
        format!("rIdImage{}", self.pictures)
    }
}

/// Serialize `document` to DOCX bytes.
pub fn write(document: &Document) -> Result<Vec<u8>> {
    let mut ids = Ids::default();
    let mut docx = Docx::new()
        .default_fonts(fonts(&document.base.font_family))
        .default_size(half_points(document.base.size_pt))
        .add_style(heading_style(&document.heading));

    for block in &document.blocks {
        docx = match block {
            Block::Table(cells) => docx.add_table(table(cells, &mut ids)),
            Block::Paragraph(p) => {
                docx.add_paragraph(paragraph(p, &document.heading, &mut ids))
            }
        };
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).map_err(|e| {
        error!("DOCX packaging failed: {}", e);
        RenderError::Docx(e.to_string())
    })?;

    let bytes = cursor.into_inner();
    debug!("Packed DOCX ({} bytes)", bytes.len());
    Ok(bytes)
}

fn heading_style(heading: &HeadingStyle) -> Style {
    let mut style = Style::new(heading.id, StyleType::Paragraph)
        .name("Section Heading")
        .size(half_points(heading.size_pt))
        .color(heading.color.hex())
        .fonts(fonts(&heading.font_family))
        .line_spacing(
            LineSpacing::new()
                .before(twips(heading.space_before_pt) as u32)
                .after(twips(heading.space_after_pt) as u32),
        );
    if heading.bold {
        style = style.bold();
    }
    style
}

fn table(cells: &[TableCell], ids: &mut Ids) -> Table {
    let grid = cells.iter().map(|c| inch_twips(c.width_in)).collect();
    let mut docx_cells = Vec::with_capacity(cells.len());
    for cell in cells {
        let mut docx_cell = DocxCell::new().width(inch_twips(cell.width_in), WidthType::Dxa);
        for p in &cell.paragraphs {
            docx_cell = docx_cell.add_paragraph(plain_paragraph(p, ids));
        }
        docx_cells.push(docx_cell);
    }

    Table::new(vec![TableRow::new(docx_cells)])
        .set_grid(grid)
        .layout(TableLayoutType::Fixed)
        .set_borders(TableBorders::with_empty())
}

fn paragraph(p: &Paragraph, heading: &HeadingStyle, ids: &mut Ids) -> DocxParagraph {
    let out = plain_paragraph(p, ids);
    match p.kind {
        ParagraphKind::Heading => out.style(heading.id),
        ParagraphKind::Normal => out,
    }
}

fn plain_paragraph(p: &Paragraph, ids: &mut Ids) -> DocxParagraph {
    let mut out = DocxParagraph::new().id(ids.paragraph());
    for inline in &p.inlines {
        out = match inline {
            Inline::Text { text, style } => out.add_run(text_run(text, style)),
            Inline::LineBreak => out.add_run(Run::new().add_break(BreakType::TextWrapping)),
            Inline::Picture(picture) => out.add_run(picture_run(picture, ids.picture())),
        };
    }

    if let Some(alignment) = p.alignment {
        out = out.align(match alignment {
            Alignment::Left => AlignmentType::Left,
            Alignment::Center => AlignmentType::Center,
            Alignment::Right => AlignmentType::Right,
        });
    }

    if let Some(indent) = p.indent {
        out = out.indent(
            Some(twips(indent.left_pt)),
            Some(SpecialIndentType::Hanging(twips(-indent.first_line_pt))),
            None,
            None,
        );
    }

    if let Some(after) = p.space_after_pt {
        out = out.line_spacing(LineSpacing::new().after(twips(after) as u32));
    }

    out
}

/// One run per text item; embedded newlines become text-wrapping breaks.
fn text_run(text: &str, style: &RunStyle) -> Run {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }

    if style.bold {
        run = run.bold();
    }
    if style.italic {
        run = run.italic();
    }
    if style.underline {
        run = run.underline("single");
    }
    if let Some(color) = style.color {
        run = run.color(color.hex());
    }
    if let Some(size) = style.size_pt {
        run = run.size(half_points(size));
    }
    if let Some(font) = style.font.as_deref() {
        run = run.fonts(fonts(font));
    }
    run
}

/// `bytes` are always PNG; the validator transcodes other formats.
fn picture_run(picture: &Picture, id: String) -> Run {
    let pic = Pic::new_with_dimensions(
        picture.image.bytes.clone(),
        picture.image.width_px,
        picture.image.height_px,
    )
    .id(id)
    .size(emu(picture.width_in), emu(picture.height_in()));
    Run::new().add_image(pic)
}

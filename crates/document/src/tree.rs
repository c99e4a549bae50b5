//! Backend-neutral visual tree of one invoice page.
//!
//! `Page → Block → Row → Cell → Inline`. Blocks stack vertically, cells sit
//! side by side with relative widths, inlines stack vertically inside a cell.
//! The tree owns no state beyond what was projected from the invoice.

use std::path::PathBuf;

use serde::Serialize;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const MUTED: Rgb = Rgb(0x4a, 0x4a, 0x4a);
    pub const LABEL: Rgb = Rgb(0x44, 0x44, 0x44);
    pub const VALUE: Rgb = Rgb(0x55, 0x55, 0x55);
    pub const RULE: Rgb = Rgb(0xcc, 0xcc, 0xcc);
    pub const RULE_LIGHT: Rgb = Rgb(0xee, 0xee, 0xee);
    pub const BAND: Rgb = Rgb(0xf3, 0xf3, 0xf3);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    /// Font size in points.
    pub size: u8,
    pub bold: bool,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(size: u8) -> Self {
        Self {
            size,
            bold: false,
            color: Rgb::BLACK,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
}

impl TextRun {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRole {
    BrandMark,
    ScanCode,
}

/// Reference to an image asset; the render target loads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRef {
    pub role: ImageRole,
    pub path: PathBuf,
    /// Rendered edge length in points (images are square).
    pub size_pt: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    Text(TextRun),
    Image(ImageRef),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub inlines: Vec<Inline>,
    /// Relative width among the cells of its row.
    pub weight: usize,
    pub align: Align,
}

impl Cell {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            inlines: vec![Inline::Text(TextRun::new(text, style))],
            weight: 1,
            align: Align::Left,
        }
    }

    pub fn stack(inlines: Vec<Inline>) -> Self {
        Self {
            inlines,
            weight: 1,
            align: Align::Left,
        }
    }

    pub fn weight(mut self, weight: usize) -> Self {
        self.weight = weight;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.inlines.iter().filter_map(|i| match i {
            Inline::Text(run) => Some(run),
            Inline::Image(_) => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.inlines.iter().filter_map(|i| match i {
            Inline::Image(img) => Some(img),
            Inline::Text(_) => None,
        })
    }

    /// All text of the cell joined with newlines.
    pub fn plain_text(&self) -> String {
        self.texts().map(|r| r.text.as_str()).collect::<Vec<_>>().join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Background band behind the whole row.
    pub shade: Option<Rgb>,
    /// Hairline drawn under the row.
    pub rule_below: Option<Rgb>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            shade: None,
            rule_below: None,
        }
    }

    pub fn shaded(mut self, color: Rgb) -> Self {
        self.shade = Some(color);
        self
    }

    pub fn ruled(mut self, color: Rgb) -> Self {
        self.rule_below = Some(color);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    Header,
    BillTo,
    ItemTable,
    Summary,
    Notes,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub role: BlockRole,
    pub rows: Vec<Row>,
    pub rule_above: Option<Rgb>,
    pub rule_below: Option<Rgb>,
    /// Vertical space after the block, in points.
    pub space_after: f32,
}

impl Block {
    pub fn new(role: BlockRole, rows: Vec<Row>) -> Self {
        Self {
            role,
            rows,
            rule_above: None,
            rule_below: None,
            space_after: 0.0,
        }
    }

    pub fn rule_above(mut self, color: Rgb) -> Self {
        self.rule_above = Some(color);
        self
    }

    pub fn rule_below(mut self, color: Rgb) -> Self {
        self.rule_below = Some(color);
        self
    }

    pub fn space_after(mut self, points: f32) -> Self {
        self.space_after = points;
        self
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .flat_map(Cell::texts)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|r| r.text.contains(needle))
    }
}

/// ISO paper sizes the target understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaperSize {
    A4,
}

impl PaperSize {
    /// Width and height in millimetres.
    pub fn mm(self) -> (u32, u32) {
        match self {
            PaperSize::A4 => (210, 297),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub size: PaperSize,
    /// Uniform page padding in points.
    pub padding_pt: f32,
    pub base_font_size: u8,
    pub blocks: Vec<Block>,
}

/// The projected document: one fixed-size page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentTree {
    pub title: String,
    pub page: Page,
}

impl DocumentTree {
    pub fn block(&self, role: BlockRole) -> Option<&Block> {
        self.page.blocks.iter().find(|b| b.role == role)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.page.blocks.iter().flat_map(Block::texts)
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.page
            .blocks
            .iter()
            .flat_map(|b| b.rows.iter())
            .flat_map(|r| r.cells.iter())
            .flat_map(Cell::images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_layout_fields() {
        let cell = Cell::text("x", TextStyle::new(12).bold().color(Rgb::RED))
            .weight(3)
            .align(Align::Right);
        assert_eq!(cell.weight, 3);
        assert_eq!(cell.align, Align::Right);
        let run = cell.texts().next().unwrap();
        assert!(run.style.bold);
        assert_eq!(run.style.color, Rgb::RED);
    }

    #[test]
    fn block_queries_walk_all_cells() {
        let block = Block::new(
            BlockRole::Summary,
            vec![
                Row::new(vec![Cell::text("a", TextStyle::new(12))]),
                Row::new(vec![Cell::stack(vec![
                    Inline::Text(TextRun::new("b", TextStyle::new(12))),
                    Inline::Image(ImageRef {
                        role: ImageRole::ScanCode,
                        path: PathBuf::from("qr.png"),
                        size_pt: 100.0,
                    }),
                ])]),
            ],
        );
        assert_eq!(block.texts().count(), 2);
        assert!(block.contains_text("b"));
        assert!(!block.contains_text("c"));
    }

    #[test]
    fn a4_dimensions() {
        assert_eq!(PaperSize::A4.mm(), (210, 297));
    }
}

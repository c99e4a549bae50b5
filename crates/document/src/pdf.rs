//! PDF output through `genpdf`.

use genpdf::elements::{Break, Image, LinearLayout, Paragraph, TableLayout};
use genpdf::style::{Color, LineStyle, Style};
use genpdf::{Alignment, Document, Element, Margins, Position, Scale, SimplePageDecorator, Size};

use quickbill_invoicing::Invoice;

use crate::error::RenderResult;
use crate::fonts::FontRegistry;
use crate::tree::{Align, Block, Cell, DocumentTree, ImageRef, Inline, PaperSize, Rgb, Row};

/// Turns a [`DocumentTree`] into file bytes.
///
/// Implementations must be usable from a background thread.
pub trait RenderTarget: Send + Sync {
    fn render_to_bytes(&self, tree: &DocumentTree) -> RenderResult<Vec<u8>>;
}

const MM_PER_PT: f64 = 25.4 / 72.0;
/// Resolution genpdf assumes for images without an explicit DPI.
const IMAGE_DPI: f64 = 300.0;
const RULE_THICKNESS_MM: f64 = 0.2;

/// Single-page A4 PDF using one registered font family.
#[derive(Debug, Clone)]
pub struct PdfTarget {
    fonts: FontRegistry,
}

impl PdfTarget {
    pub fn new(fonts: FontRegistry) -> Self {
        Self { fonts }
    }

    fn document(&self, tree: &DocumentTree) -> RenderResult<Document> {
        let page = &tree.page;
        let mut doc = Document::new(self.fonts.family());
        doc.set_title(tree.title.as_str());
        doc.set_paper_size(paper_size(page.size));
        doc.set_font_size(page.base_font_size);

        let margin = pt_to_mm(page.padding_pt);
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::trbl(margin, margin, margin, margin));
        doc.set_page_decorator(decorator);

        for block in &page.blocks {
            doc.push(self.block(block, page.base_font_size)?);
        }
        Ok(doc)
    }

    fn block(&self, block: &Block, base_font_size: u8) -> RenderResult<LinearLayout> {
        let mut layout = LinearLayout::vertical();
        if let Some(color) = block.rule_above {
            layout.push(Rule::new(color));
        }
        for row in &block.rows {
            layout.push(self.row(row)?);
            if let Some(color) = row.rule_below {
                layout.push(Rule::new(color));
            }
        }
        if let Some(color) = block.rule_below {
            layout.push(Rule::new(color));
        }
        if block.space_after > 0.0 {
            let lines = f64::from(block.space_after) / f64::from(base_font_size.max(1));
            layout.push(Break::new(lines));
        }
        Ok(layout)
    }

    fn row(&self, row: &Row) -> RenderResult<TableLayout> {
        let weights = row.cells.iter().map(|c| c.weight.max(1)).collect();
        let mut table = TableLayout::new(weights);

        // genpdf cannot fill areas; a shaded band is drawn as a framed row.
        if row.shade.is_some() {
            table.set_cell_decorator(genpdf::elements::FrameCellDecorator::new(true, true, false));
        }

        let mut table_row = table.row();
        for cell in &row.cells {
            table_row.push_element(self.cell(cell).padded(Margins::trbl(1, 1, 1, 1)));
        }
        table_row.push()?;
        Ok(table)
    }

    fn cell(&self, cell: &Cell) -> LinearLayout {
        let alignment = alignment(cell.align);
        let mut layout = LinearLayout::vertical();
        for inline in &cell.inlines {
            match inline {
                Inline::Text(run) => {
                    let mut style = Style::new()
                        .with_font_size(run.style.size)
                        .with_color(color(run.style.color));
                    if run.style.bold {
                        style = style.bold();
                    }
                    layout.push(Paragraph::new(run.text.as_str()).aligned(alignment).styled(style));
                }
                Inline::Image(image) => {
                    if let Some(element) = load_image(image, alignment) {
                        layout.push(element);
                    }
                }
            }
        }
        layout
    }
}

/// Download name for the rendered invoice.
pub fn output_file_name(invoice: &Invoice) -> String {
    invoice.file_name()
}

impl RenderTarget for PdfTarget {
    fn render_to_bytes(&self, tree: &DocumentTree) -> RenderResult<Vec<u8>> {
        let doc = self.document(tree)?;
        let mut buffer = Vec::new();
        doc.render(&mut buffer)?;

        tracing::info!(
            title = %tree.title,
            bytes = buffer.len(),
            family = self.fonts.family_name(),
            "pdf rendered"
        );
        Ok(buffer)
    }
}

/// Horizontal hairline across the available width.
struct Rule {
    color: Rgb,
}

impl Rule {
    fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl Element for Rule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: genpdf::render::Area<'_>,
        _style: Style,
    ) -> Result<genpdf::RenderResult, genpdf::error::Error> {
        let width = area.size().width;
        let line = LineStyle::new()
            .with_color(color(self.color))
            .with_thickness(RULE_THICKNESS_MM);
        area.draw_line(vec![Position::new(0, 1), Position::new(width, 1)], line);

        Ok(genpdf::RenderResult {
            size: Size::new(width, 2),
            has_more: false,
        })
    }
}

/// Load an image scaled to its square target size.
///
/// Images are decorative: a missing or unreadable file is logged and left
/// out rather than failing the whole document.
fn load_image(image: &ImageRef, alignment: Alignment) -> Option<Image> {
    let bytes = match std::fs::read(&image.path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(path = %image.path.display(), error = %err, "image skipped");
            return None;
        }
    };
    let element = match Image::from_path(&image.path) {
        Ok(element) => element,
        Err(err) => {
            tracing::warn!(path = %image.path.display(), error = %err, "image skipped");
            return None;
        }
    };

    let target_mm = pt_to_mm(image.size_pt);
    let scale = match png_dimensions(&bytes) {
        Some((width, height)) => Scale::new(
            scale_for(target_mm, width),
            scale_for(target_mm, height),
        ),
        None => Scale::new(1, 1),
    };
    Some(element.with_alignment(alignment).with_scale(scale))
}

/// Factor that renders `pixels` at `target_mm`: genpdf draws
/// `25.4 * scale * pixels / 300` millimetres.
fn scale_for(target_mm: f64, pixels: u32) -> f64 {
    if pixels == 0 {
        return 1.0;
    }
    target_mm * IMAGE_DPI / (25.4 * f64::from(pixels))
}

/// Width and height from a PNG header, if `bytes` is one.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || &bytes[0..8] != b"\x89PNG\r\n\x1a\n" {
        return None;
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Some((width, height))
}

fn pt_to_mm(points: f32) -> f64 {
    f64::from(points) * MM_PER_PT
}

fn paper_size(size: PaperSize) -> Size {
    let (width, height) = size.mm();
    Size::new(width, height)
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

use quickbill_invoicing::{Customer, Invoice, LineItem};

use crate::brand::BrandProfile;
use crate::locale::{BN_BD, Locale};
use crate::tree::{
    Align, Block, BlockRole, Cell, DocumentTree, ImageRef, ImageRole, Inline, Page, PaperSize,
    Rgb, Row, TextRun, TextStyle,
};

const PAGE_PADDING_PT: f32 = 30.0;
const BASE_FONT_SIZE: u8 = 12;
const LOGO_PT: f32 = 32.0;
const SCAN_CODE_PT: f32 = 100.0;

const COMPANY: TextStyle = TextStyle::new(28).color(Rgb::RED);
const TITLE: TextStyle = TextStyle::new(18).bold();
const SECTION: TextStyle = TextStyle::new(16).bold();
const BODY: TextStyle = TextStyle::new(BASE_FONT_SIZE);
const LABEL: TextStyle = TextStyle::new(BASE_FONT_SIZE).bold().color(Rgb::LABEL);
const VALUE: TextStyle = TextStyle::new(BASE_FONT_SIZE).color(Rgb::VALUE);
const TABLE_HEAD: TextStyle = TextStyle::new(BASE_FONT_SIZE).bold();
const SUMMARY: TextStyle = TextStyle::new(BASE_FONT_SIZE).color(Rgb::MUTED);
const TOTAL: TextStyle = TextStyle::new(16).bold();
const NOTES: TextStyle = TextStyle::new(11).color(Rgb::MUTED);
const CAPTION: TextStyle = TextStyle::new(10).color(Rgb::MUTED);

/// Item table column weights: product, quantity, price, total.
const ITEM_COLUMNS: [usize; 4] = [4, 2, 2, 2];

/// Projects an [`Invoice`] into a [`DocumentTree`].
///
/// Rendering is a single pass over the invoice: no state is kept between
/// calls and the same invoice always yields the same tree.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    brand: BrandProfile,
    locale: &'static Locale,
}

impl DocumentRenderer {
    pub fn new(brand: BrandProfile) -> Self {
        Self {
            brand,
            locale: &BN_BD,
        }
    }

    pub fn brand(&self) -> &BrandProfile {
        &self.brand
    }

    pub fn render(&self, invoice: &Invoice) -> DocumentTree {
        let blocks = vec![
            self.header(invoice),
            self.bill_to(invoice.customer()),
            self.item_table(invoice.items()),
            self.summary(invoice),
            self.notes(),
            self.footer(),
        ];

        tracing::debug!(
            invoice_id = %invoice.id(),
            rows = invoice.items().len(),
            "document tree rendered"
        );

        DocumentTree {
            title: format!("Invoice {}", invoice.id()),
            page: Page {
                size: PaperSize::A4,
                padding_pt: PAGE_PADDING_PT,
                base_font_size: BASE_FONT_SIZE,
                blocks,
            },
        }
    }

    fn header(&self, invoice: &Invoice) -> Block {
        let mut brand_mark = Vec::with_capacity(2);
        if let Some(path) = &self.brand.logo {
            brand_mark.push(Inline::Image(ImageRef {
                role: ImageRole::BrandMark,
                path: path.clone(),
                size_pt: LOGO_PT,
            }));
        }
        brand_mark.push(Inline::Text(TextRun::new(
            self.brand.company_name.as_str(),
            COMPANY,
        )));

        let details = Cell::stack(vec![
            Inline::Text(TextRun::new("INVOICE", TITLE)),
            Inline::Text(TextRun::new(
                format!("Date: {}", self.locale.format_date_long(invoice.issue_date())),
                BODY,
            )),
            Inline::Text(TextRun::new(
                format!("Invoice ID#: {}", invoice.id()),
                BODY,
            )),
            Inline::Text(TextRun::new(
                format!("Payment: {}", invoice.payment_method().label()),
                BODY,
            )),
        ])
        .align(Align::Right);

        Block::new(
            BlockRole::Header,
            vec![Row::new(vec![Cell::stack(brand_mark), details])],
        )
        .space_after(20.0)
    }

    fn bill_to(&self, customer: &Customer) -> Block {
        let mut rows = vec![Row::new(vec![Cell::text("Bill To", SECTION)])];
        rows.push(labelled("Name:", &customer.name));
        rows.push(labelled("Address:", &customer.address));
        if let Some(apartment) = &customer.apartment {
            rows.push(Row::new(vec![
                Cell::text("", LABEL),
                Cell::text(apartment.as_str(), VALUE).weight(3),
            ]));
        }
        rows.push(labelled("Phone:", &customer.phone));
        if let Some(email) = &customer.email {
            rows.push(labelled("Email:", email));
        }

        Block::new(BlockRole::BillTo, rows)
            .rule_below(Rgb::RULE)
            .space_after(20.0)
    }

    fn item_table(&self, items: &[LineItem]) -> Block {
        let [product, quantity, price, total] = ITEM_COLUMNS;
        let mut rows = Vec::with_capacity(items.len() + 1);

        rows.push(
            Row::new(vec![
                Cell::text("Product", TABLE_HEAD).weight(product),
                Cell::text("Quantity", TABLE_HEAD).weight(quantity),
                Cell::text("Price", TABLE_HEAD)
                    .weight(price)
                    .align(Align::Right),
                Cell::text("Total", TABLE_HEAD)
                    .weight(total)
                    .align(Align::Right),
            ])
            .shaded(Rgb::BAND)
            .ruled(Rgb::RULE),
        );

        for item in items {
            rows.push(
                Row::new(vec![
                    Cell::text(item.name.as_str(), BODY).weight(product),
                    Cell::text(self.quantity(item.quantity), BODY).weight(quantity),
                    Cell::text(self.locale.format_money(item.unit_price), BODY)
                        .weight(price)
                        .align(Align::Right),
                    Cell::text(self.locale.format_money(item.line_total()), BODY)
                        .weight(total)
                        .align(Align::Right),
                ])
                .ruled(Rgb::RULE_LIGHT),
            );
        }

        Block::new(BlockRole::ItemTable, rows).space_after(20.0)
    }

    fn summary(&self, invoice: &Invoice) -> Block {
        let summary = invoice.summary();
        let line = |label: &str, amount: f64, style: TextStyle| {
            Row::new(vec![
                Cell::text(label, style).weight(3).align(Align::Right),
                Cell::text(self.locale.format_money(amount), style).align(Align::Right),
            ])
        };

        Block::new(
            BlockRole::Summary,
            vec![
                line("Subtotal:", summary.subtotal, SUMMARY),
                line("Delivery Charge:", summary.delivery_charge, SUMMARY),
                line("Total Amount:", summary.total, TOTAL),
            ],
        )
        .space_after(20.0)
    }

    fn notes(&self) -> Block {
        Block::new(
            BlockRole::Notes,
            vec![Row::new(vec![Cell::text(self.brand.thank_you.as_str(), NOTES)])],
        )
        .rule_above(Rgb::RULE)
        .space_after(10.0)
    }

    fn footer(&self) -> Block {
        let mut inlines = Vec::with_capacity(2);
        if let Some(path) = &self.brand.scan_code {
            inlines.push(Inline::Image(ImageRef {
                role: ImageRole::ScanCode,
                path: path.clone(),
                size_pt: SCAN_CODE_PT,
            }));
        }
        inlines.push(Inline::Text(TextRun::new(self.brand.website_line(), CAPTION)));

        Block::new(
            BlockRole::Footer,
            vec![Row::new(vec![Cell::stack(inlines).align(Align::Center)])],
        )
    }

    fn quantity(&self, quantity: f64) -> String {
        let amount = self.locale.format_quantity(quantity);
        match &self.brand.quantity_unit {
            Some(unit) => format!("{amount} {unit}"),
            None => amount,
        }
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(BrandProfile::default())
    }
}

fn labelled(label: &str, value: &str) -> Row {
    Row::new(vec![
        Cell::text(label, LABEL),
        Cell::text(value, VALUE).weight(3),
    ])
}

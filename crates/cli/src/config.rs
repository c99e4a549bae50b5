//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use quickbill_document::BrandProfile;
use quickbill_document::fonts::DEFAULT_FAMILY;
use quickbill_invoicing::RequiredFieldsPolicy;
use quickbill_observability::LogFormat;

/// Generate a PDF invoice from an order file.
#[derive(Debug, Clone, Parser)]
#[command(name = "quickbill", version, about)]
pub struct Args {
    /// Order to invoice (JSON).
    #[arg(long)]
    pub order: PathBuf,

    /// Directory the PDF is written to.
    #[arg(long, env = "QUICKBILL_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Directory holding `<family>-Regular.ttf` and optionally `-Bold`, `-Italic`, `-BoldItalic`.
    #[arg(long, env = "QUICKBILL_FONT_DIR", default_value = "fonts")]
    pub font_dir: PathBuf,

    #[arg(long, env = "QUICKBILL_FONT_FAMILY", default_value = DEFAULT_FAMILY)]
    pub font_family: String,

    /// Product catalog (JSON list of `{name, price}`); built-in list if unset.
    #[arg(long, env = "QUICKBILL_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Logo image shown next to the company name.
    #[arg(long, env = "QUICKBILL_LOGO")]
    pub logo: Option<PathBuf>,

    /// Scan-code image printed in the footer.
    #[arg(long, env = "QUICKBILL_QR")]
    pub qr: Option<PathBuf>,

    /// Unit appended to quantities in the item table.
    #[arg(long, env = "QUICKBILL_QUANTITY_UNIT")]
    pub quantity_unit: Option<String>,

    /// Also write the laid-out document as JSON to this path.
    #[arg(long)]
    pub dump_tree: Option<PathBuf>,

    /// Refuse orders with a blank name, address or phone.
    #[arg(long)]
    pub require_customer_fields: bool,

    /// `json` or `pretty`.
    #[arg(long, env = "QUICKBILL_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,
}

impl Args {
    pub fn policy(&self) -> RequiredFieldsPolicy {
        if self.require_customer_fields {
            RequiredFieldsPolicy::Reject
        } else {
            RequiredFieldsPolicy::Allow
        }
    }

    pub fn brand(&self) -> BrandProfile {
        let mut brand = BrandProfile::default();
        if let Some(logo) = &self.logo {
            brand = brand.with_logo(logo);
        }
        if let Some(qr) = &self.qr {
            brand = brand.with_scan_code(qr);
        }
        if let Some(unit) = &self.quantity_unit {
            brand = brand.with_quantity_unit(unit);
        }
        brand
    }
}

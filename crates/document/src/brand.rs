use std::path::PathBuf;

/// Shop identity printed on every invoice.
///
/// Passed to [`DocumentRenderer`](crate::DocumentRenderer) explicitly. Image
/// paths are optional; an absent path simply leaves the image out.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandProfile {
    pub company_name: String,
    pub thank_you: String,
    pub website_caption: String,
    pub website_url: String,
    /// Appended to quantities in the item table, e.g. `"pcs"`.
    pub quantity_unit: Option<String>,
    pub logo: Option<PathBuf>,
    pub scan_code: Option<PathBuf>,
}

impl BrandProfile {
    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo = Some(path.into());
        self
    }

    pub fn with_scan_code(mut self, path: impl Into<PathBuf>) -> Self {
        self.scan_code = Some(path.into());
        self
    }

    pub fn with_quantity_unit(mut self, unit: impl Into<String>) -> Self {
        self.quantity_unit = Some(unit.into());
        self
    }

    /// Caption line under the scan code: caption followed by the URL.
    pub fn website_line(&self) -> String {
        format!("{} {}", self.website_caption, self.website_url)
    }
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            company_name: "Optiwatch BD".to_string(),
            thank_you: "Thanks for your order. We hope to serve you again soon.".to_string(),
            website_caption: "আমাদের ওয়েবসাইট ভিজিট করুন:".to_string(),
            website_url: "https://al-amin-watachandsunglassessbd.netlify.app/".to_string(),
            quantity_unit: None,
            logo: None,
            scan_code: None,
        }
    }
}

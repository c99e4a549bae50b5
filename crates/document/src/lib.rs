//! Invoice documents.
//!
//! [`DocumentRenderer`] projects an [`Invoice`](quickbill_invoicing::Invoice)
//! into a [`DocumentTree`]; a [`RenderTarget`] such as [`PdfTarget`] turns the
//! tree into bytes. [`RenderJob`] runs that last step off the caller's thread
//! and [`GenerationSession`] ties build and render into one lifecycle.

pub mod brand;
pub mod error;
pub mod fonts;
pub mod job;
pub mod locale;
pub mod pdf;
pub mod renderer;
pub mod session;
pub mod tree;

pub use brand::BrandProfile;
pub use error::{RenderError, RenderResult};
pub use fonts::FontRegistry;
pub use job::{RenderJob, RenderStatus};
pub use locale::{BN_BD, Locale};
pub use pdf::{PdfTarget, RenderTarget, output_file_name};
pub use renderer::DocumentRenderer;
pub use session::{Artifact, GenerationSession, SessionState};
pub use tree::{
    Align, Block, BlockRole, Cell, DocumentTree, ImageRef, ImageRole, Inline, Page, PaperSize, Rgb,
    Row, TextRun, TextStyle,
};

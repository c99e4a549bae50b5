//! Pipeline wiring for the binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};

use quickbill_document::{
    DocumentRenderer, FontRegistry, GenerationSession, PdfTarget, RenderTarget, SessionState,
};
use quickbill_invoicing::{Invoice, InvoiceBuilder, OrderInput};
use quickbill_orders::OrderForm;
use quickbill_products::ProductCatalog;

use crate::config::Args;

/// A PDF written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub path: PathBuf,
    pub invoice: Arc<Invoice>,
}

pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<ProductCatalog> {
    let Some(path) = path else {
        return Ok(ProductCatalog::builtin());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = ProductCatalog::from_json(&raw)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), products = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Read an order file and run it through the form, so rows naming a catalog
/// product without a price pick up the catalog price.
pub fn load_order(path: &Path, catalog: &ProductCatalog) -> anyhow::Result<OrderInput> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading order {}", path.display()))?;
    let input: OrderInput = serde_json::from_str(&raw)
        .with_context(|| format!("parsing order {}", path.display()))?;

    let mut form = OrderForm::from(input);
    let filled = form.fill_missing_prices(catalog);
    tracing::debug!(rows = form.items().len(), filled, "order loaded");
    Ok(form.snapshot())
}

/// Build, render and write one invoice into `out_dir`.
pub fn generate(
    order: &OrderInput,
    builder: InvoiceBuilder,
    renderer: DocumentRenderer,
    target: Arc<dyn RenderTarget>,
    out_dir: &Path,
) -> anyhow::Result<Generated> {
    let mut session = GenerationSession::new(builder, renderer, target);
    let invoice = session.generate(order).context("generating invoice")?;

    match session.wait() {
        SessionState::Ready => {}
        SessionState::Failed(reason) => bail!("rendering invoice {}: {reason}", invoice.id()),
        other => bail!("rendering invoice {} ended in {other:?}", invoice.id()),
    }
    let Some(artifact) = session.artifact() else {
        bail!("invoice {} has no output", invoice.id());
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let path = out_dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes).with_context(|| format!("writing {}", path.display()))?;

    tracing::info!(
        invoice_id = %invoice.id(),
        path = %path.display(),
        total = invoice.summary().total,
        "invoice written"
    );

    Ok(Generated { path, invoice })
}

/// Everything the binary does after parsing arguments.
pub fn run(args: &Args) -> anyhow::Result<Generated> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let order = load_order(&args.order, &catalog)?;

    let fonts = FontRegistry::load(&args.font_dir, &args.font_family)
        .context("loading invoice font")?;
    let target: Arc<dyn RenderTarget> = Arc::new(PdfTarget::new(fonts));
    let renderer = DocumentRenderer::new(args.brand());

    let generated = generate(
        &order,
        InvoiceBuilder::new().with_policy(args.policy()),
        renderer.clone(),
        target,
        &args.out_dir,
    )?;

    if let Some(path) = &args.dump_tree {
        dump_tree(&renderer, &generated.invoice, path)?;
    }
    Ok(generated)
}

/// Write the document tree of `invoice` as pretty JSON.
pub fn dump_tree(
    renderer: &DocumentRenderer,
    invoice: &Invoice,
    path: &Path,
) -> anyhow::Result<()> {
    let tree = renderer.render(invoice);
    let json = serde_json::to_string_pretty(&tree).context("serializing document tree")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "document tree written");
    Ok(())
}

//! Order files on disk through to a written artifact, with a stub target.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use quickbill_cli::{dump_tree, generate, load_catalog, load_order};
use quickbill_core::InvoiceId;
use quickbill_document::{DocumentRenderer, DocumentTree, RenderResult, RenderTarget};
use quickbill_invoicing::{InvoiceBuilder, PaymentMethod, RequiredFieldsPolicy};

struct TitleTarget;

impl RenderTarget for TitleTarget {
    fn render_to_bytes(&self, tree: &DocumentTree) -> RenderResult<Vec<u8>> {
        Ok(tree.title.as_bytes().to_vec())
    }
}

/// Fresh scratch directory per test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quickbill-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const ORDER: &str = r#"{
    "name": "Karim",
    "address": "House 12, Dhanmondi",
    "phone": "01700000000",
    "email": "",
    "date": "2026-10-16",
    "payment_method": "bkash",
    "delivery_charge": "60",
    "items": [
        { "name": "Smart Watch", "quantity": "2" },
        { "name": "Strap", "quantity": 1, "price": 150 },
        { "name": "Sunglass", "quantity": "abc", "price": 300 }
    ]
}"#;

#[test]
fn lenient_order_file_is_loaded_and_auto_filled() {
    let dir = scratch("load");
    let path = dir.join("order.json");
    fs::write(&path, ORDER).unwrap();

    let order = load_order(&path, &load_catalog(None).unwrap()).unwrap();

    assert_eq!(order.date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    assert_eq!(order.payment_method, PaymentMethod::Bkash);
    assert_eq!(order.delivery_charge, 60.0);
    assert_eq!(order.items[0].unit_price, 800.0);
    assert_eq!(order.items[1].unit_price, 150.0);
    assert_eq!(order.items[2].quantity, 0.0);
}

#[test]
fn catalog_file_replaces_builtin_list() {
    let dir = scratch("catalog");
    let path = dir.join("catalog.json");
    fs::write(&path, r#"[{"name": "Strap", "price": 120}]"#).unwrap();

    let catalog = load_catalog(Some(&path)).unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.lookup("Strap").unwrap().unit_price, 120.0);
    assert!(catalog.lookup("Smart Watch").is_none());
}

#[test]
fn broken_files_report_their_path() {
    let dir = scratch("broken");
    let path = dir.join("order.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_order(&path, &load_catalog(None).unwrap()).unwrap_err();
    assert!(format!("{err:#}").contains("order.json"));

    let missing = dir.join("missing.json");
    assert!(load_catalog(Some(&missing)).is_err());
}

#[test]
fn generated_invoice_lands_in_out_dir() {
    let dir = scratch("generate");
    let order_path = dir.join("order.json");
    fs::write(&order_path, ORDER).unwrap();
    let order = load_order(&order_path, &load_catalog(None).unwrap()).unwrap();

    let out_dir = dir.join("out");
    let generated = generate(
        &order,
        InvoiceBuilder::new().with_id_source(|| InvoiceId::from_seed(42)),
        DocumentRenderer::default(),
        Arc::new(TitleTarget),
        &out_dir,
    )
    .unwrap();

    assert_eq!(generated.path, out_dir.join("invoice_2026-10-16.pdf"));
    assert_eq!(generated.invoice.summary().total, 1810.0);
    let written = fs::read(&generated.path).unwrap();
    assert_eq!(written, format!("Invoice {}", generated.invoice.id()).into_bytes());
}

#[test]
fn document_tree_dumps_as_json() {
    let dir = scratch("dump");
    let order_path = dir.join("order.json");
    fs::write(&order_path, ORDER).unwrap();
    let order = load_order(&order_path, &load_catalog(None).unwrap()).unwrap();
    let invoice = InvoiceBuilder::new().build(&order);

    let tree_path = dir.join("tree.json");
    dump_tree(&DocumentRenderer::default(), &invoice, &tree_path).unwrap();

    let raw = fs::read_to_string(&tree_path).unwrap();
    let tree: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let blocks = tree["page"]["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 6);
    assert_eq!(blocks[2]["role"], "item_table");
    assert_eq!(blocks[2]["rows"].as_array().unwrap().len(), 4);
}

#[test]
fn required_fields_policy_blocks_incomplete_orders() {
    let dir = scratch("reject");
    let order_path = dir.join("order.json");
    fs::write(&order_path, r#"{ "name": "Karim", "date": "2026-10-16" }"#).unwrap();
    let order = load_order(&order_path, &load_catalog(None).unwrap()).unwrap();

    let result = generate(
        &order,
        InvoiceBuilder::new().with_policy(RequiredFieldsPolicy::Reject),
        DocumentRenderer::default(),
        Arc::new(TitleTarget),
        &dir.join("out"),
    );

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("address, phone"));
    assert!(!dir.join("out").exists());
}

#[test]
fn negative_rows_in_order_files_are_clamped() {
    let dir = scratch("negative");
    let path = dir.join("order.json");
    fs::write(
        &path,
        r#"{ "date": "2026-10-16", "items": [{ "name": "Strap", "quantity": -2, "price": 100 }] }"#,
    )
    .unwrap();

    let order = load_order(&path, &load_catalog(None).unwrap()).unwrap();

    assert_eq!(order.items[0].quantity, 0.0);
    assert_eq!(InvoiceBuilder::new().build(&order).summary().subtotal, 0.0);
}

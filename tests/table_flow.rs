//! End-to-end flow through the public API: stores, view bindings, events,
//! pagination, infinite scroll, and export.

use chrono::NaiveDate;
use invopak::app::{handle_event, PerPage, ViewEvent};
use invopak::domain::{Invoice, InvoiceStatus, Product};
use invopak::store::{ExportFormat, FileExporter, JsonStore, MemoryStore, RecordStore};
use invopak::view::{presets, RowActionKind, TableView, ViewRegistry};

fn invoice(n: usize, status: InvoiceStatus, day: u32) -> Invoice {
    Invoice {
        id: format!("inv-{n:03}"),
        invoice_number: format!("INV-2024-{n:03}"),
        invoice_type: if n % 5 == 0 { "debit_note" } else { "sale" }.to_string(),
        invoice_date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        seller_ntn: "1234567-8".to_string(),
        seller_name: "Acme Traders".to_string(),
        buyer_ntn: "7654321-0".to_string(),
        buyer_name: format!("Buyer {n}"),
        taxable_value: n as f64 * 1_000.0,
        sales_tax: n as f64 * 180.0,
        grand_total: n as f64 * 1_180.0,
        status,
    }
}

fn product(n: usize) -> Product {
    Product {
        id: format!("prod-{n:03}"),
        description: format!("Product {n}"),
        hs_code: format!("{:04}.{:04}", 2500 + n, n),
        uom: if n % 2 == 0 { "KG" } else { "MT" }.to_string(),
        category: "construction".to_string(),
        unit_price: n as f64 * 100.0,
        tax_rate: 18.0,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[test]
fn invoice_table_flow() {
    let exports = tempfile::tempdir().unwrap();

    // 25 invoices: odd ones are drafts, even ones approved; days cycle 1..28.
    let invoices: Vec<Invoice> = (1..=25)
        .map(|n| {
            invoice(
                n,
                if n % 2 == 0 {
                    InvoiceStatus::Approved
                } else {
                    InvoiceStatus::Draft
                },
                (n % 28 + 1) as u32,
            )
        })
        .collect();

    let mut view = TableView::new(
        presets::invoices_view(),
        Box::new(MemoryStore::with_records(invoices)),
        Box::new(FileExporter::new(exports.path())),
    )
    .unwrap();

    // Initial mount: reload, sort by invoice number, first page of three.
    let (render, _) = handle_event(&mut view, &ViewEvent::Reload).unwrap();
    assert!(render);
    handle_event(
        &mut view,
        &ViewEvent::SortRequested {
            field: "invoice_number".to_string(),
        },
    )
    .unwrap();

    let vm = view.viewmodel_at(today());
    let pagination = vm.pagination.clone().unwrap();
    assert_eq!(pagination.total_pages, 3);
    assert_eq!(pagination.range_label(), "1-10 of 25");
    assert_eq!(vm.rows[0].cells[0], "INV-2024-001");
    // Draft rows expose the mutating actions, approved rows only View.
    assert_eq!(
        vm.rows[0].actions,
        vec![
            RowActionKind::Edit,
            RowActionKind::Duplicate,
            RowActionKind::Delete
        ]
    );
    assert_eq!(vm.rows[1].actions, vec![RowActionKind::View]);

    // Jump to the last page.
    handle_event(&mut view, &ViewEvent::PageSelected { page: 3 }).unwrap();
    let vm = view.viewmodel_at(today());
    assert_eq!(vm.rows.len(), 5);
    assert_eq!(vm.pagination.unwrap().range_label(), "21-25 of 25");

    // Typing a search is debounced, then resets to page 1 when it lands.
    handle_event(
        &mut view,
        &ViewEvent::SearchInput {
            text: "buyer 7".to_string(),
            now_ms: 10_000,
        },
    )
    .unwrap();
    let (render, _) = handle_event(&mut view, &ViewEvent::Tick { now_ms: 10_100 }).unwrap();
    assert!(!render, "quiet window not elapsed yet");
    let (render, _) = handle_event(&mut view, &ViewEvent::Tick { now_ms: 10_400 }).unwrap();
    assert!(render);
    let vm = view.viewmodel_at(today());
    assert_eq!(vm.rows.len(), 1);
    assert_eq!(view.filter_state().page, 1);

    // Clear filters, constrain by status, export the full filtered set.
    handle_event(&mut view, &ViewEvent::FiltersCleared).unwrap();
    handle_event(
        &mut view,
        &ViewEvent::FilterSelected {
            key: "status".to_string(),
            value: "draft".to_string(),
        },
    )
    .unwrap();
    let (_, actions) = handle_event(
        &mut view,
        &ViewEvent::ExportRequested {
            format: ExportFormat::Csv,
        },
    )
    .unwrap();
    assert_eq!(actions.len(), 1, "export emits a notification");

    let csv = std::fs::read_to_string(exports.path().join("invoices.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    // Header plus the 13 drafts, regardless of the current page.
    assert_eq!(lines.len(), 14);
    assert!(lines[0].contains("invoice_number"));
}

#[test]
fn product_catalogue_scrolls_from_a_json_store() {
    let dir = tempfile::tempdir().unwrap();

    // Seed the JSON store the way the CRUD screens would.
    {
        let mut store: JsonStore<Product> = JsonStore::open_in(dir.path()).unwrap();
        for n in 1..=45 {
            store.put(&product(n)).unwrap();
        }
    }

    let store: JsonStore<Product> = JsonStore::open_in(dir.path()).unwrap();
    let mut view = TableView::new(
        presets::products_view(),
        Box::new(store),
        Box::new(FileExporter::new(dir.path().join("exports"))),
    )
    .unwrap();

    handle_event(&mut view, &ViewEvent::Reload).unwrap();
    let vm = view.viewmodel_at(today());
    assert_eq!(vm.rows.len(), 20, "initial scroll window");
    assert!(vm.load_more.clone().unwrap().has_more);
    assert!(vm.pagination.is_none());

    // Two sentinel hits exhaust the catalogue.
    handle_event(&mut view, &ViewEvent::SentinelVisible).unwrap();
    handle_event(&mut view, &ViewEvent::SentinelVisible).unwrap();
    let vm = view.viewmodel_at(today());
    assert_eq!(vm.rows.len(), 45);
    assert!(!vm.load_more.unwrap().has_more);

    // A dimension filter resets the window and constrains strictly.
    handle_event(
        &mut view,
        &ViewEvent::FilterSelected {
            key: "uom".to_string(),
            value: "MT".to_string(),
        },
    )
    .unwrap();
    let vm = view.viewmodel_at(today());
    assert_eq!(vm.load_more.unwrap().total_items, 23);
    assert_eq!(vm.rows.len(), 20);
}

#[test]
fn registry_drives_named_views() {
    let dir = tempfile::tempdir().unwrap();
    let config = invopak::Config {
        data_dir: dir.path().join("data"),
        export_dir: dir.path().join("exports"),
        ..invopak::Config::default()
    };

    // Seed sellers before wiring the registry.
    {
        let mut store: JsonStore<invopak::domain::Seller> =
            JsonStore::open_in(&config.data_dir).unwrap();
        store
            .put(&invopak::domain::Seller {
                ntn: "1234567-8".to_string(),
                business_name: "Acme Traders".to_string(),
                province: "Punjab".to_string(),
                address: "12 Mall Road, Lahore".to_string(),
                registration_type: "registered".to_string(),
            })
            .unwrap();
    }

    let mut registry: ViewRegistry = invopak::initialize(&config);
    assert_eq!(
        registry.names(),
        vec!["buyers", "invoices", "products", "sellers"]
    );

    assert!(registry.refresh("sellers").unwrap());
    let vm = registry.get("sellers").unwrap().viewmodel();
    assert_eq!(vm.rows.len(), 1);
    assert_eq!(vm.rows[0].id, "1234567-8");

    // Empty views show their configured empty message.
    registry.refresh("buyers").unwrap();
    let vm = registry.get("buyers").unwrap().viewmodel();
    assert!(vm.rows.is_empty());
    assert_eq!(
        vm.empty_state.unwrap().message,
        "No buyers recorded yet."
    );

    // Per-page change through the type-erased event surface.
    let view = registry.get_mut("sellers").unwrap();
    view.handle_event(&ViewEvent::PerPageSelected {
        per_page: PerPage::Limit(1),
    })
    .unwrap();
    let vm = view.viewmodel();
    assert_eq!(vm.pagination.unwrap().per_page, PerPage::Limit(1));
}

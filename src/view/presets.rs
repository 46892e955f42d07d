//! Standard view configurations for the four entity types.
//!
//! These are the declarative bindings the composition root registers at
//! startup: invoices, products, sellers, and buyers, each with its columns,
//! dropdown filters, date-filter enablement, pagination defaults, export
//! formats, and row-action rules.

use crate::app::state::PerPage;
use crate::domain::invoice::Invoice;
use crate::domain::party::{Buyer, Seller};
use crate::domain::product::Product;
use crate::domain::record::FieldValue;
use crate::query::schema::{ColumnDescriptor, ColumnType, FilterDescriptor};
use crate::store::backend::ExportFormat;
use crate::view::config::{PaginationMode, ViewConfig};
use crate::view::row_actions::{RowActionKind, RowActionRules};

/// Page sizes offered by every paged view.
fn standard_page_sizes() -> Vec<PerPage> {
    vec![
        PerPage::Limit(1),
        PerPage::Limit(10),
        PerPage::Limit(20),
        PerPage::Limit(50),
        PerPage::Limit(100),
        PerPage::All,
    ]
}

/// Derived column combining the buyer name and tax number.
fn buyer_with_ntn(invoice: &Invoice) -> FieldValue {
    FieldValue::Text(format!("{} ({})", invoice.buyer_name, invoice.buyer_ntn))
}

/// The invoices list: date-filtered, status-gated row actions.
#[must_use]
pub fn invoices_view() -> ViewConfig<Invoice> {
    ViewConfig {
        data_type: "invoices".to_string(),
        display_name: "Invoices".to_string(),
        columns: vec![
            ColumnDescriptor::new("invoice_number", "Invoice #", ColumnType::Text),
            ColumnDescriptor::new("invoice_date", "Date", ColumnType::Date),
            ColumnDescriptor::new("buyer", "Buyer", ColumnType::Text).derived(buyer_with_ntn),
            ColumnDescriptor::new("invoice_type", "Type", ColumnType::Text),
            ColumnDescriptor::new("taxable_value", "Taxable Value", ColumnType::Currency),
            ColumnDescriptor::new("sales_tax", "Sales Tax", ColumnType::Currency),
            ColumnDescriptor::new("grand_total", "Total", ColumnType::Currency),
            ColumnDescriptor::new("status", "Status", ColumnType::Status),
        ],
        filters: vec![
            FilterDescriptor::new(
                "status",
                "Status",
                [
                    ("draft", "Draft"),
                    ("submitted", "Submitted"),
                    ("approved", "Approved"),
                    ("rejected", "Rejected"),
                    ("cancelled", "Cancelled"),
                    ("paid", "Paid"),
                ],
            ),
            FilterDescriptor::new(
                "invoice_type",
                "Type",
                [("sale", "Sale Invoice"), ("debit_note", "Debit Note")],
            ),
        ],
        show_date_filter: true,
        date_field: "invoice_date".to_string(),
        default_per_page: PerPage::Limit(10),
        pagination_options: standard_page_sizes(),
        pagination: PaginationMode::Paged,
        scroll_window: 20,
        export_formats: vec![
            ExportFormat::Json,
            ExportFormat::Csv,
            ExportFormat::Excel,
            ExportFormat::Pdf,
        ],
        empty_message: "No invoices yet. Create your first invoice to get started.".to_string(),
        row_actions: RowActionRules::ByStatus {
            field: "status".to_string(),
        },
    }
}

/// The product catalogue: infinite scroll, no date filter.
#[must_use]
pub fn products_view() -> ViewConfig<Product> {
    ViewConfig {
        data_type: "products".to_string(),
        display_name: "Products".to_string(),
        columns: vec![
            ColumnDescriptor::new("description", "Description", ColumnType::Text),
            ColumnDescriptor::new("hs_code", "HS Code", ColumnType::Text),
            ColumnDescriptor::new("uom", "UoM", ColumnType::Text),
            ColumnDescriptor::new("category", "Category", ColumnType::Text),
            ColumnDescriptor::new("unit_price", "Unit Price", ColumnType::Currency),
            ColumnDescriptor::new("tax_rate", "Tax Rate %", ColumnType::Number),
        ],
        filters: vec![
            FilterDescriptor::new(
                "category",
                "Category",
                [
                    ("construction", "Construction"),
                    ("textile", "Textile"),
                    ("food", "Food Items"),
                    ("electronics", "Electronics"),
                    ("services", "Services"),
                ],
            ),
            FilterDescriptor::new(
                "uom",
                "Unit of Measure",
                [("KG", "Kilogram"), ("MT", "Metric Ton"), ("Numbers", "Numbers")],
            ),
        ],
        show_date_filter: false,
        date_field: String::new(),
        default_per_page: PerPage::Limit(20),
        pagination_options: standard_page_sizes(),
        pagination: PaginationMode::InfiniteScroll,
        scroll_window: 20,
        export_formats: vec![ExportFormat::Json, ExportFormat::Csv, ExportFormat::Excel],
        empty_message: "No products in the catalogue yet.".to_string(),
        row_actions: RowActionRules::Fixed(vec![
            RowActionKind::View,
            RowActionKind::Edit,
            RowActionKind::Delete,
        ]),
    }
}

/// The sellers list.
#[must_use]
pub fn sellers_view() -> ViewConfig<Seller> {
    ViewConfig {
        data_type: "sellers".to_string(),
        display_name: "Sellers".to_string(),
        columns: vec![
            ColumnDescriptor::new("ntn", "NTN", ColumnType::Text),
            ColumnDescriptor::new("business_name", "Business Name", ColumnType::Text),
            ColumnDescriptor::new("province", "Province", ColumnType::Text),
            ColumnDescriptor::new("address", "Address", ColumnType::Text).unsortable(),
            ColumnDescriptor::new("registration_type", "Registration", ColumnType::Status),
        ],
        filters: vec![province_filter()],
        show_date_filter: false,
        date_field: String::new(),
        default_per_page: PerPage::Limit(10),
        pagination_options: standard_page_sizes(),
        pagination: PaginationMode::Paged,
        scroll_window: 20,
        export_formats: vec![ExportFormat::Json, ExportFormat::Csv, ExportFormat::Excel],
        empty_message: "No sellers registered yet.".to_string(),
        row_actions: RowActionRules::Fixed(vec![
            RowActionKind::View,
            RowActionKind::Edit,
            RowActionKind::Delete,
        ]),
    }
}

/// The buyers list.
#[must_use]
pub fn buyers_view() -> ViewConfig<Buyer> {
    ViewConfig {
        data_type: "buyers".to_string(),
        display_name: "Buyers".to_string(),
        columns: vec![
            ColumnDescriptor::new("ntn", "NTN / CNIC", ColumnType::Text),
            ColumnDescriptor::new("business_name", "Business Name", ColumnType::Text),
            ColumnDescriptor::new("province", "Province", ColumnType::Text),
            ColumnDescriptor::new("address", "Address", ColumnType::Text).unsortable(),
            ColumnDescriptor::new("registration_type", "Registration", ColumnType::Status),
        ],
        filters: vec![
            province_filter(),
            FilterDescriptor::new(
                "registration_type",
                "Registration",
                [("registered", "Registered"), ("unregistered", "Unregistered")],
            ),
        ],
        show_date_filter: false,
        date_field: String::new(),
        default_per_page: PerPage::Limit(10),
        pagination_options: standard_page_sizes(),
        pagination: PaginationMode::Paged,
        scroll_window: 20,
        export_formats: vec![ExportFormat::Json, ExportFormat::Csv, ExportFormat::Excel],
        empty_message: "No buyers recorded yet.".to_string(),
        row_actions: RowActionRules::Fixed(vec![
            RowActionKind::View,
            RowActionKind::Edit,
            RowActionKind::Delete,
        ]),
    }
}

/// Province dimension shared by sellers and buyers.
fn province_filter() -> FilterDescriptor {
    FilterDescriptor::new(
        "province",
        "Province",
        [
            ("Punjab", "Punjab"),
            ("Sindh", "Sindh"),
            ("Khyber Pakhtunkhwa", "Khyber Pakhtunkhwa"),
            ("Balochistan", "Balochistan"),
            ("Islamabad Capital Territory", "Islamabad Capital Territory"),
            ("Gilgit-Baltistan", "Gilgit-Baltistan"),
            ("Azad Jammu and Kashmir", "Azad Jammu and Kashmir"),
        ],
    )
}

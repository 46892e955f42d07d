//! Invoice domain model and submission-status state machine.
//!
//! An invoice moves through the FBR submission workflow (handled outside this
//! crate) and its status determines which row actions a table view offers:
//! only drafts may be edited, duplicated, or deleted; every other status is
//! view-only from the table's perspective.

use crate::domain::record::{FieldValue, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Submission status of an invoice.
///
/// With respect to row actions this is a small state machine: `Draft` is the
/// only state that unlocks mutating actions; all other states are terminal
/// view-only states. Transitions between states happen in the submission
/// workflow, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Editable local draft, not yet submitted to FBR.
    #[default]
    Draft,
    /// Submitted and awaiting a response.
    Submitted,
    /// Accepted by FBR.
    Approved,
    /// Rejected by FBR.
    Rejected,
    /// Cancelled after submission.
    Cancelled,
    /// Settled by the buyer.
    Paid,
    /// Status token not recognized (tolerated, treated as view-only).
    Unknown,
}

impl InvoiceStatus {
    /// Parses a stored status token. Unrecognized tokens map to `Unknown`
    /// rather than an error so malformed records stay browsable.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "draft" => Self::Draft,
            "submitted" => Self::Submitted,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "paid" => Self::Paid,
            _ => Self::Unknown,
        }
    }

    /// Returns the canonical storage token for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Paid => "paid",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this status unlocks mutating row actions (edit, duplicate,
    /// delete). Only drafts do.
    #[must_use]
    pub const fn unlocks_mutation(self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sales invoice under the FBR digital-invoicing regime.
///
/// Line items and tax arithmetic live outside this crate; the table core only
/// needs the header fields that are displayed, searched, filtered, and sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Stable identifier used as the storage key.
    pub id: String,

    /// Human-facing invoice number (FBR reference once submitted).
    pub invoice_number: String,

    /// Invoice kind token, e.g. `sale` or `debit_note`.
    pub invoice_type: String,

    /// Issue date of the invoice.
    pub invoice_date: NaiveDate,

    /// Seller national tax number.
    pub seller_ntn: String,

    /// Seller business name.
    pub seller_name: String,

    /// Buyer national tax number (or CNIC for unregistered buyers).
    pub buyer_ntn: String,

    /// Buyer business name.
    pub buyer_name: String,

    /// Value of supplies excluding sales tax.
    pub taxable_value: f64,

    /// Sales tax charged.
    pub sales_tax: f64,

    /// Total payable including tax.
    pub grand_total: f64,

    /// Current submission status.
    pub status: InvoiceStatus,
}

impl Record for Invoice {
    fn id(&self) -> &str {
        &self.id
    }

    fn entity_type() -> &'static str {
        "invoices"
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(&self.id),
            "invoice_number" => FieldValue::text(&self.invoice_number),
            "invoice_type" => FieldValue::text(&self.invoice_type),
            "invoice_date" => FieldValue::Date(self.invoice_date),
            "seller_ntn" => FieldValue::text(&self.seller_ntn),
            "seller_name" => FieldValue::text(&self.seller_name),
            "buyer_ntn" => FieldValue::text(&self.buyer_ntn),
            "buyer_name" => FieldValue::text(&self.buyer_name),
            "taxable_value" => FieldValue::Number(self.taxable_value),
            "sales_tax" => FieldValue::Number(self.sales_tax),
            "grand_total" => FieldValue::Number(self.grand_total),
            "status" => FieldValue::text(self.status.as_str()),
            _ => FieldValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Invoice {
        Invoice {
            id: "inv-001".to_string(),
            invoice_number: "INV-2024-001".to_string(),
            invoice_type: "sale".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            seller_ntn: "1234567-8".to_string(),
            seller_name: "Acme Traders".to_string(),
            buyer_ntn: "7654321-0".to_string(),
            buyer_name: "Beta Retail".to_string(),
            taxable_value: 10_000.0,
            sales_tax: 1_800.0,
            grand_total: 11_800.0,
            status: InvoiceStatus::Draft,
        }
    }

    #[test]
    fn status_parsing_tolerates_garbage() {
        assert_eq!(InvoiceStatus::parse("Draft"), InvoiceStatus::Draft);
        assert_eq!(InvoiceStatus::parse(" approved "), InvoiceStatus::Approved);
        assert_eq!(InvoiceStatus::parse("???"), InvoiceStatus::Unknown);
    }

    #[test]
    fn only_draft_unlocks_mutation() {
        assert!(InvoiceStatus::Draft.unlocks_mutation());
        for status in [
            InvoiceStatus::Submitted,
            InvoiceStatus::Approved,
            InvoiceStatus::Rejected,
            InvoiceStatus::Cancelled,
            InvoiceStatus::Paid,
            InvoiceStatus::Unknown,
        ] {
            assert!(!status.unlocks_mutation(), "{status} must be view-only");
        }
    }

    #[test]
    fn field_extraction_covers_schema_keys() {
        let inv = sample();
        assert_eq!(inv.field("invoice_number"), FieldValue::text("INV-2024-001"));
        assert_eq!(inv.field("grand_total"), FieldValue::Number(11_800.0));
        assert_eq!(inv.field("status"), FieldValue::text("draft"));
        assert_eq!(inv.field("nonexistent"), FieldValue::Missing);
        assert_eq!(Invoice::entity_type(), "invoices");
    }
}

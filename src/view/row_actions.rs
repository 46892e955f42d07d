//! Row-action resolution rules.
//!
//! Which actions a row offers (view, edit, duplicate, delete) is decided by
//! tagged rules resolved against the record when the view model is computed —
//! never by string-keyed handler lookup at render time. For invoices the rule
//! is the submission-status machine: only drafts unlock mutating actions,
//! every other status is view-only.

use crate::domain::invoice::InvoiceStatus;
use crate::domain::record::Record;
use serde::{Deserialize, Serialize};

/// One action a table row can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowActionKind {
    /// Open the record read-only.
    View,
    /// Open the record for editing.
    Edit,
    /// Create a copy of the record as a new draft.
    Duplicate,
    /// Delete the record.
    Delete,
}

impl RowActionKind {
    /// Human-readable action label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Edit => "Edit",
            Self::Duplicate => "Duplicate",
            Self::Delete => "Delete",
        }
    }
}

/// How a view derives the action set for one record.
#[derive(Debug, Clone)]
pub enum RowActionRules<R> {
    /// The same actions for every record.
    Fixed(Vec<RowActionKind>),

    /// Status-gated actions: the named field is parsed as an
    /// [`InvoiceStatus`]; drafts get edit/duplicate/delete, everything else
    /// is view-only.
    ByStatus {
        /// Record field holding the status token.
        field: String,
    },

    /// Entity-specific resolver function.
    Custom(fn(&R) -> Vec<RowActionKind>),
}

impl<R> Default for RowActionRules<R> {
    fn default() -> Self {
        Self::Fixed(vec![RowActionKind::View])
    }
}

impl<R: Record> RowActionRules<R> {
    /// Resolves the action set for one record.
    #[must_use]
    pub fn resolve(&self, record: &R) -> Vec<RowActionKind> {
        match self {
            Self::Fixed(kinds) => kinds.clone(),
            Self::ByStatus { field } => {
                let token = record.field(field).as_search_text().unwrap_or_default();
                if InvoiceStatus::parse(&token).unlocks_mutation() {
                    vec![
                        RowActionKind::Edit,
                        RowActionKind::Duplicate,
                        RowActionKind::Delete,
                    ]
                } else {
                    vec![RowActionKind::View]
                }
            }
            Self::Custom(resolve) => resolve(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Invoice, InvoiceStatus};
    use chrono::NaiveDate;

    fn invoice(status: InvoiceStatus) -> Invoice {
        Invoice {
            id: "inv-1".to_string(),
            invoice_number: "INV-1".to_string(),
            invoice_type: "sale".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            seller_ntn: "1234567-8".to_string(),
            seller_name: "Acme Traders".to_string(),
            buyer_ntn: "7654321-0".to_string(),
            buyer_name: "Beta Retail".to_string(),
            taxable_value: 1000.0,
            sales_tax: 180.0,
            grand_total: 1180.0,
            status,
        }
    }

    #[test]
    fn draft_unlocks_mutating_actions() {
        let rules: RowActionRules<Invoice> = RowActionRules::ByStatus {
            field: "status".to_string(),
        };
        assert_eq!(
            rules.resolve(&invoice(InvoiceStatus::Draft)),
            vec![
                RowActionKind::Edit,
                RowActionKind::Duplicate,
                RowActionKind::Delete
            ]
        );
    }

    #[test]
    fn every_other_status_is_view_only() {
        let rules: RowActionRules<Invoice> = RowActionRules::ByStatus {
            field: "status".to_string(),
        };
        for status in [
            InvoiceStatus::Submitted,
            InvoiceStatus::Approved,
            InvoiceStatus::Rejected,
            InvoiceStatus::Cancelled,
            InvoiceStatus::Paid,
            InvoiceStatus::Unknown,
        ] {
            assert_eq!(rules.resolve(&invoice(status)), vec![RowActionKind::View]);
        }
    }

    #[test]
    fn fixed_and_custom_rules() {
        let fixed: RowActionRules<Invoice> =
            RowActionRules::Fixed(vec![RowActionKind::View, RowActionKind::Delete]);
        assert_eq!(
            fixed.resolve(&invoice(InvoiceStatus::Paid)),
            vec![RowActionKind::View, RowActionKind::Delete]
        );

        fn only_view(_: &Invoice) -> Vec<RowActionKind> {
            vec![RowActionKind::View]
        }
        let custom: RowActionRules<Invoice> = RowActionRules::Custom(only_view);
        assert_eq!(
            custom.resolve(&invoice(InvoiceStatus::Draft)),
            vec![RowActionKind::View]
        );
    }
}

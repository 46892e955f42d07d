//! Product domain model.
//!
//! Products are the catalogue entries invoice lines are built from: an HS
//! code, a unit of measure, and pricing/tax-rate defaults looked up from the
//! tax-authority reference data (the lookup itself lives outside this crate).

use crate::domain::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier used as the storage key.
    pub id: String,

    /// Product description as printed on invoice lines.
    pub description: String,

    /// Harmonized System code classifying the product.
    pub hs_code: String,

    /// Unit of measure token, e.g. `KG`, `MT`, `Numbers`.
    pub uom: String,

    /// Product category used for dropdown filtering.
    pub category: String,

    /// Default unit price excluding tax.
    pub unit_price: f64,

    /// Default sales-tax rate in percent.
    pub tax_rate: f64,
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn entity_type() -> &'static str {
        "products"
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(&self.id),
            "description" => FieldValue::text(&self.description),
            "hs_code" => FieldValue::text(&self.hs_code),
            "uom" => FieldValue::text(&self.uom),
            "category" => FieldValue::text(&self.category),
            "unit_price" => FieldValue::Number(self.unit_price),
            "tax_rate" => FieldValue::Number(self.tax_rate),
            _ => FieldValue::Missing,
        }
    }
}

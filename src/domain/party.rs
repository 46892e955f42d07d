//! Seller and buyer domain models.
//!
//! Parties are keyed by their national tax number (NTN) rather than a
//! synthetic id: the tax identifier is the stable identity under the FBR
//! regime and the record store uses it as the storage key.

use crate::domain::record::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// A registered seller (the business issuing invoices).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// National tax number; the storage key.
    pub ntn: String,

    /// Registered business name.
    pub business_name: String,

    /// Province of registration, e.g. `Punjab`, `Sindh`.
    pub province: String,

    /// Registered business address.
    pub address: String,

    /// Registration type token, e.g. `registered`, `unregistered`.
    pub registration_type: String,
}

impl Record for Seller {
    fn id(&self) -> &str {
        &self.ntn
    }

    fn entity_type() -> &'static str {
        "sellers"
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "ntn" => FieldValue::text(&self.ntn),
            "business_name" => FieldValue::text(&self.business_name),
            "province" => FieldValue::text(&self.province),
            "address" => FieldValue::text(&self.address),
            "registration_type" => FieldValue::text(&self.registration_type),
            _ => FieldValue::Missing,
        }
    }
}

/// A buyer (the invoice counterparty).
///
/// Unregistered buyers carry a CNIC in place of an NTN; the field is still
/// the identity key either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    /// National tax number or CNIC; the storage key.
    pub ntn: String,

    /// Business or person name.
    pub business_name: String,

    /// Province, e.g. `Punjab`, `Sindh`.
    pub province: String,

    /// Address.
    pub address: String,

    /// Registration type token, e.g. `registered`, `unregistered`.
    pub registration_type: String,
}

impl Record for Buyer {
    fn id(&self) -> &str {
        &self.ntn
    }

    fn entity_type() -> &'static str {
        "buyers"
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "ntn" => FieldValue::text(&self.ntn),
            "business_name" => FieldValue::text(&self.business_name),
            "province" => FieldValue::text(&self.province),
            "address" => FieldValue::text(&self.address),
            "registration_type" => FieldValue::text(&self.registration_type),
            _ => FieldValue::Missing,
        }
    }
}

//! Plain data holders for order attributes.
//!
//! Addresses and order lines are carriers with no behavior beyond
//! serialization. They exist so callers can build order payloads with
//! named fields instead of raw JSON, and convert into [`serde_json::Value`]
//! for insertion into an order's field map.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Billing or shipping address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// Given (first) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    /// Family (last) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    /// Care-of line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_of: Option<String>,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Address {
    /// Converts the address into a JSON value for an order field.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Json`] if serialization fails.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// A line item in the order cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    /// Item type (e.g. "physical", "shipping_fee", "discount").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// Merchant item reference (SKU).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Item display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Quantity ordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Unit price in minor units, tax included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<i64>,
    /// Tax rate in hundredths of a percent (2500 = 25%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<i64>,
    /// Discount rate in hundredths of a percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<i64>,
}

impl OrderLine {
    /// Converts the line into a JSON value for a cart items array.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Json`] if serialization fails.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_address_skips_absent_fields() {
        let address = Address {
            given_name: Some("Testperson-se".to_owned()),
            family_name: Some("Approved".to_owned()),
            postal_code: Some("12345".to_owned()),
            city: Some("Ankeborg".to_owned()),
            country: Some("se".to_owned()),
            ..Default::default()
        };

        let value = address.to_value().unwrap();
        assert_eq!(value["given_name"], json!("Testperson-se"));
        assert!(value.get("care_of").is_none());
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_address_roundtrip() {
        let address = Address {
            street_address: Some("Stårgatan 1".to_owned()),
            email: Some("checkout@example.com".to_owned()),
            ..Default::default()
        };
        let value = address.to_value().unwrap();
        let parsed: Address = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_order_line_type_field_rename() {
        let line = OrderLine {
            item_type: Some("physical".to_owned()),
            reference: Some("19-402".to_owned()),
            name: Some("Battery Power Pack".to_owned()),
            quantity: Some(1),
            unit_price: Some(45_000),
            tax_rate: Some(2500),
            discount_rate: None,
        };

        let value = line.to_value().unwrap();
        assert_eq!(value["type"], json!("physical"));
        assert!(value.get("item_type").is_none());
        assert!(value.get("discount_rate").is_none());
        assert_eq!(value["unit_price"], json!(45_000));
    }

    #[test]
    fn test_order_line_parses_wire_format() {
        let line: OrderLine = serde_json::from_value(json!({
            "type": "shipping_fee",
            "name": "Shipping",
            "quantity": 1,
            "unit_price": 4900,
            "tax_rate": 2500
        }))
        .unwrap();
        assert_eq!(line.item_type.as_deref(), Some("shipping_fee"));
        assert_eq!(line.quantity, Some(1));
    }
}

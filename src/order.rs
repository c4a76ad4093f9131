//! The checkout order resource.
//!
//! An order is an identity-bearing resource with an open-ended set of
//! domain fields (cart, addresses, status, totals, merchant URIs, ...)
//! kept as an ordered JSON object so server-defined fields round-trip
//! without a fixed schema. The remote identifier is absent until the first
//! successful create and is only ever assigned by the gateway after a
//! confirmed response.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Fields that must be present before an order without an id may be
/// transmitted.
const REQUIRED_FIELDS: [&str; 4] = ["purchase_country", "purchase_currency", "locale", "merchant"];

/// A checkout order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use klarna_checkout::order::Order;
///
/// let mut order = Order::new();
/// order.set_field("purchase_country", json!("SE"));
/// order.set_field("purchase_currency", json!("SEK"));
/// order.set_field("locale", json!("sv-se"));
/// order.set_field("merchant", json!({ "id": "1234" }));
/// assert!(order.is_valid());
/// assert!(order.id().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    id: Option<String>,
    fields: Map<String, Value>,
}

impl Order {
    /// Creates an empty order with no identifier and no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an order from a field map.
    #[must_use]
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { id: None, fields }
    }

    /// Creates an order carrying only a remote identifier.
    ///
    /// Useful for updating an order without fetching it first: pass the
    /// resulting order to `update_order` together with the attributes to
    /// change.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), fields: Map::new() }
    }

    /// Constructs an order from a parsed wire representation.
    ///
    /// The `"id"` member, when present, becomes the order's identifier and
    /// is removed from the field map; everything else is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the value is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(Error::Json(serde::de::Error::custom("order body must be a JSON object")));
        };
        let id = match fields.remove("id") {
            Some(Value::String(id)) => Some(id),
            Some(other) => Some(other.to_string()),
            None => None,
        };
        Ok(Self { id, fields })
    }

    /// Parses an order from wire-format bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the bytes are not a JSON object; an order
    /// is never partially constructed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// Returns the remote identifier, if the order has been created.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Assigns the remote identifier.
    ///
    /// The gateway calls this after a confirmed successful create; callers
    /// normally have no reason to.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Returns a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets a field value.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Returns the full field map.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Checks the locally-verifiable precondition for transmission.
    ///
    /// An order that already carries an id addresses an existing remote
    /// resource and is always transmittable. An id-less order must carry
    /// every required field with a non-null value.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.id.is_some() {
            return true;
        }
        REQUIRED_FIELDS
            .iter()
            .all(|name| self.fields.get(*name).is_some_and(|v| !v.is_null()))
    }

    /// Serializes the order to the exact bytes transmitted on the wire.
    ///
    /// The identifier is not part of the payload; it is addressed via the
    /// request path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if a field value fails to serialize.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.fields)?)
    }
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_fields() -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("purchase_country".to_owned(), json!("SE"));
        fields.insert("purchase_currency".to_owned(), json!("SEK"));
        fields.insert("locale".to_owned(), json!("sv-se"));
        fields.insert("merchant".to_owned(), json!({ "id": "1234" }));
        fields
    }

    #[test]
    fn test_new_order_is_empty_and_invalid() {
        let order = Order::new();
        assert!(order.id().is_none());
        assert!(order.fields().is_empty());
        assert!(!order.is_valid());
    }

    #[test]
    fn test_order_with_required_fields_is_valid() {
        let order = Order::from_fields(valid_fields());
        assert!(order.is_valid());
    }

    #[test]
    fn test_order_missing_required_field_is_invalid() {
        let mut fields = valid_fields();
        fields.remove("locale");
        assert!(!Order::from_fields(fields).is_valid());
    }

    #[test]
    fn test_order_null_required_field_is_invalid() {
        let mut fields = valid_fields();
        fields.insert("merchant".to_owned(), Value::Null);
        assert!(!Order::from_fields(fields).is_valid());
    }

    #[test]
    fn test_order_with_id_is_valid_without_fields() {
        // Supports updating an order without fetching it first.
        let order = Order::with_id("abc123");
        assert!(order.is_valid());
        assert_eq!(order.id(), Some("abc123"));
    }

    #[test]
    fn test_from_slice_extracts_id() {
        let order = Order::from_slice(
            br#"{"id":"abc123","status":"checkout_incomplete","purchase_country":"SE"}"#,
        )
        .unwrap();
        assert_eq!(order.id(), Some("abc123"));
        assert_eq!(order.field("status"), Some(&json!("checkout_incomplete")));
        // "id" is lifted out of the field map, not duplicated.
        assert!(order.field("id").is_none());
    }

    #[test]
    fn test_from_slice_without_id() {
        let order = Order::from_slice(br#"{"status":"created"}"#).unwrap();
        assert!(order.id().is_none());
    }

    #[test]
    fn test_from_slice_rejects_non_object() {
        assert!(Order::from_slice(b"[1,2,3]").is_err());
        assert!(Order::from_slice(b"not json").is_err());
    }

    #[test]
    fn test_to_body_excludes_id() {
        let mut order = Order::from_fields(valid_fields());
        order.set_id("abc123");

        let body = order.to_body().unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["purchase_country"], json!("SE"));
    }

    #[test]
    fn test_to_body_preserves_field_order() {
        let mut order = Order::new();
        order.set_field("zeta", json!(1));
        order.set_field("alpha", json!(2));
        order.set_field("mid", json!(3));

        let body = String::from_utf8(order.to_body().unwrap()).unwrap();
        let zeta = body.find("zeta").unwrap();
        let alpha = body.find("alpha").unwrap();
        let mid = body.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_preserves_arbitrary_server_fields() {
        let order = Order::from_slice(
            br#"{"id":"x","gui":{"layout":"desktop"},"unknown_future_field":[1,{"a":true}]}"#,
        )
        .unwrap();
        assert_eq!(order.field("unknown_future_field"), Some(&json!([1, { "a": true }])));
    }

    #[test]
    fn test_serialize_matches_to_body() {
        let order = Order::from_fields(valid_fields());
        let via_serde = serde_json::to_vec(&order).unwrap();
        assert_eq!(via_serde, order.to_body().unwrap());
    }
}

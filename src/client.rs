//! The order gateway.
//!
//! [`Client`] mediates all HTTP interaction with the remote checkout API:
//! it validates local preconditions, signs the exact outgoing bytes,
//! issues the call through the transport, classifies the response status,
//! and either parses the remote representation or performs a follow-up
//! read.

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};
use url::Url;

use crate::{
    config::{ClientConfig, Environment, SharedSecret},
    error::{check_status, Error, Result},
    order::Order,
    sign::sign_payload,
    transport::{HttpTransport, Transport, TransportResponse},
};

/// Versioned media type for the aggregated order representation.
pub const AGGREGATED_ORDER_MEDIA_TYPE: &str =
    "application/vnd.klarna.checkout.aggregated-order-v2+json";

/// Authorization scheme word preceding the signature token.
const AUTH_SCHEME: &str = "Klarna";

/// Orders collection path.
const ORDERS_PATH: &str = "/checkout/orders";

/// Client for the checkout order API.
///
/// Holds the environment, the shared secret used as signing key material,
/// and a transport bound to the resolved host. Operations are sequential:
/// each issues at most two network calls and awaits each before
/// proceeding. The client provides no locking; sharing one [`Order`]
/// across concurrent in-flight writes is the caller's responsibility.
///
/// # Examples
///
/// ```no_run
/// use serde_json::json;
/// use klarna_checkout::{Client, ClientConfig, Environment, Order, SharedSecret};
///
/// # async fn example() -> klarna_checkout::Result<()> {
/// let config = ClientConfig::new(Environment::Test, SharedSecret::new("shared-secret"));
/// let client = Client::new(config)?;
///
/// let mut order = Order::new();
/// order.set_field("purchase_country", json!("SE"));
/// order.set_field("purchase_currency", json!("SEK"));
/// order.set_field("locale", json!("sv-se"));
/// order.set_field("merchant", json!({ "id": "1234" }));
///
/// if client.create_order(&mut order).await? {
///     let fetched = client.read_order(order.id().unwrap()).await?;
///     println!("status: {:?}", fetched.field("status"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<T: Transport = HttpTransport> {
    environment: Environment,
    shared_secret: SharedSecret,
    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client from configuration, binding an HTTPS transport to
    /// the host resolved for the configured environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for out-of-bounds HTTP settings,
    /// [`Error::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(config.environment.base_url(), &config.http)?;
        Ok(Self {
            environment: config.environment,
            shared_secret: config.shared_secret,
            transport,
        })
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client with an injected transport.
    ///
    /// The transport is assumed to be bound to the host for `environment`.
    #[must_use]
    pub fn with_transport(
        environment: Environment,
        shared_secret: SharedSecret,
        transport: T,
    ) -> Self {
        Self { environment, shared_secret, transport }
    }

    /// Returns the configured environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the base URL for the configured environment.
    #[must_use]
    pub fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }

    /// Creates the order remotely and assigns the new identifier onto it.
    ///
    /// Returns `Ok(false)` without any network call if the order fails its
    /// local validity check. On success the order carries the identifier
    /// extracted from the `Location` header's final path segment and the
    /// result is `Ok(true)`. The identifier is only assigned after a
    /// confirmed successful response; a failed create leaves the order
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns the status-mapped error for any non-2xx response,
    /// [`Error::MissingLocation`] if the acknowledgment lacks a `Location`
    /// header.
    #[instrument(skip(self, order), fields(environment = %self.environment))]
    pub async fn create_order(&self, order: &mut Order) -> Result<bool> {
        if !order.is_valid() {
            debug!("order failed local validation, not transmitted");
            return Ok(false);
        }

        let body = order.to_body()?;
        let response = self.write_order(order.id(), body).await?;

        let id = location_order_id(&response)?;
        info!(order_id = %id, "order created");
        order.set_id(id);
        Ok(true)
    }

    /// Reads the order with the given identifier.
    ///
    /// Signs the empty body and constructs a fresh [`Order`] from the
    /// response; never returns a partially-constructed order.
    ///
    /// # Errors
    ///
    /// Returns the status-mapped error for any non-2xx response (notably
    /// [`Error::NotFound`] for unknown identifiers), [`Error::Json`] if the
    /// body is not an order object.
    #[instrument(skip(self), fields(environment = %self.environment))]
    pub async fn read_order(&self, id: &str) -> Result<Order> {
        let token = sign_payload(b"", &self.shared_secret);
        let headers = [
            ("Authorization", format!("{AUTH_SCHEME} {token}")),
            ("Accept", AGGREGATED_ORDER_MEDIA_TYPE.to_owned()),
            ("Accept-Encoding", String::new()),
        ];

        let path = format!("{ORDERS_PATH}/{id}");
        let response = self.transport.get(&path, &headers).await?;
        check_status(response.status, &response.body)?;

        Order::from_slice(&response.body)
    }

    /// Updates the order remotely, returning the updated representation.
    ///
    /// Returns `Ok(None)` without any network call if the order fails its
    /// local validity check. If `attributes` is a non-empty map, only those
    /// attributes are transmitted (partial update); otherwise the full
    /// order body is sent. This lets a caller update just a status field
    /// without re-transmitting the whole resource, and — together with
    /// [`Order::with_id`] — update an order without fetching it first.
    ///
    /// The write goes to the collection when the order has no identifier
    /// and to the single-resource path when it does; the path, not the
    /// verb, distinguishes create from update. The result differs
    /// accordingly:
    ///
    /// - identifier present: the update response already carries the full
    ///   updated representation, which is parsed and returned directly;
    /// - identifier absent: the response is only a creation acknowledgment,
    ///   so the new identifier is taken from `Location` and a follow-up
    ///   [`read_order`](Self::read_order) fetches the authoritative
    ///   representation. This costs a second round trip by design.
    ///
    /// # Errors
    ///
    /// Returns the status-mapped error for any non-2xx response on either
    /// call, [`Error::MissingLocation`] if a creation acknowledgment lacks
    /// a `Location` header.
    #[instrument(skip(self, order, attributes), fields(environment = %self.environment, order_id = ?order.id()))]
    pub async fn update_order(
        &self,
        order: &Order,
        attributes: Option<&Map<String, Value>>,
    ) -> Result<Option<Order>> {
        if !order.is_valid() {
            debug!("order failed local validation, not transmitted");
            return Ok(None);
        }

        let body = match attributes {
            Some(attrs) if !attrs.is_empty() => serde_json::to_vec(attrs)?,
            _ => order.to_body()?,
        };

        let response = self.write_order(order.id(), body).await?;

        let updated = match order.id() {
            // The update response is an updated representation of the order.
            Some(_) => Order::from_slice(&response.body)?,
            // The create response is only the URI of the new resource; a
            // follow-up read obtains the full representation.
            None => {
                let id = location_order_id(&response)?;
                info!(order_id = %id, "order created, fetching representation");
                self.read_order(&id).await?
            }
        };

        Ok(Some(updated))
    }

    /// Creates or updates the order, depending on the identifier being
    /// present or not, and classifies the response status.
    async fn write_order(&self, id: Option<&str>, body: Vec<u8>) -> Result<TransportResponse> {
        let path = match id {
            Some(id) => format!("{ORDERS_PATH}/{id}"),
            None => ORDERS_PATH.to_owned(),
        };

        // The token must cover the identical bytes handed to the transport.
        let token = sign_payload(&body, &self.shared_secret);
        let headers = [
            ("Authorization", format!("{AUTH_SCHEME} {token}")),
            ("Accept", AGGREGATED_ORDER_MEDIA_TYPE.to_owned()),
            ("Content-Type", AGGREGATED_ORDER_MEDIA_TYPE.to_owned()),
            // Disable transport compression: the signature is computed over
            // the uncompressed bytes the server will see.
            ("Accept-Encoding", String::new()),
        ];

        let response = self.transport.post(&path, &headers, body).await?;
        check_status(response.status, &response.body)?;
        Ok(response)
    }
}

/// Extracts the new resource identifier from a create acknowledgment: the
/// final path segment of the `Location` header.
fn location_order_id(response: &TransportResponse) -> Result<String> {
    let location = response.header("Location").ok_or(Error::MissingLocation)?;

    let id = match Url::parse(location) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(ToOwned::to_owned),
        // Relative Location: fall back to plain path splitting.
        Err(_) => location.rsplit('/').find(|s| !s.is_empty()).map(ToOwned::to_owned),
    };

    id.filter(|id| !id.is_empty()).ok_or(Error::MissingLocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_location(location: &str) -> TransportResponse {
        TransportResponse {
            status: 201,
            body: vec![],
            headers: vec![("Location".to_owned(), location.to_owned())],
        }
    }

    #[test]
    fn test_location_order_id_absolute_url() {
        let response =
            response_with_location("https://checkout.testdrive.klarna.com/checkout/orders/abc123");
        assert_eq!(location_order_id(&response).unwrap(), "abc123");
    }

    #[test]
    fn test_location_order_id_trailing_slash() {
        let response =
            response_with_location("https://checkout.klarna.com/checkout/orders/xyz789/");
        assert_eq!(location_order_id(&response).unwrap(), "xyz789");
    }

    #[test]
    fn test_location_order_id_relative_path() {
        let response = response_with_location("/checkout/orders/rel456");
        assert_eq!(location_order_id(&response).unwrap(), "rel456");
    }

    #[test]
    fn test_location_order_id_missing_header() {
        let response = TransportResponse { status: 201, body: vec![], headers: vec![] };
        assert!(matches!(location_order_id(&response).unwrap_err(), Error::MissingLocation));
    }

    #[test]
    fn test_location_order_id_empty_header() {
        let response = response_with_location("");
        assert!(matches!(location_order_id(&response).unwrap_err(), Error::MissingLocation));
    }

    #[test]
    fn test_client_new_resolves_environment_host() {
        let config = ClientConfig::new(Environment::Production, SharedSecret::new("s"));
        let client = Client::new(config).unwrap();
        assert_eq!(client.base_url(), "https://checkout.klarna.com");
        assert_eq!(client.environment(), Environment::Production);

        let config = ClientConfig::new(Environment::Test, SharedSecret::new("s"));
        let client = Client::new(config).unwrap();
        assert_eq!(client.base_url(), "https://checkout.testdrive.klarna.com");
    }
}

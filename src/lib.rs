//! Client for the Klarna Checkout order API.
//!
//! This crate creates, reads, and updates checkout order resources over
//! HTTPS, authenticating every request with a computed signature: the
//! base64-encoded SHA-256 digest of the request body with a shared secret
//! appended.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   create / read / update    ┌──────────────────────┐
//! │   Caller    │────────────────────────────▶│   Client (gateway)   │
//! └─────────────┘                             │  validate ─ sign ─   │
//!                                             │  classify status     │
//!                                             └──────────┬───────────┘
//!                                                        │ HTTPS
//!                                             ┌──────────▼───────────┐
//!                                             │  Transport (reqwest) │
//!                                             └──────────────────────┘
//! ```
//!
//! - [`client`]: the order gateway — lifecycle operations, upsert dispatch,
//!   header contract
//! - [`sign`]: the pure request signer
//! - [`order`]: the order resource with its open-ended field map
//! - [`models`]: plain address and order-line data holders
//! - [`transport`]: the HTTPS request/response exchanger
//! - [`config`]: environment, shared secret, and HTTP settings
//! - [`error`]: the typed status-to-error taxonomy
//!
//! # Quick start
//!
//! ```no_run
//! use serde_json::json;
//! use klarna_checkout::{Client, ClientConfig, Environment, Order, SharedSecret};
//!
//! # async fn example() -> klarna_checkout::Result<()> {
//! let config = ClientConfig::from_toml(
//!     r#"
//!     environment = "test"
//!     shared_secret = "shared-secret"
//!     "#,
//! )?;
//! let client = Client::new(config)?;
//!
//! // Build an order.
//! let mut order = Order::new();
//! order.set_field("purchase_country", json!("SE"));
//! order.set_field("purchase_currency", json!("SEK"));
//! order.set_field("locale", json!("sv-se"));
//! order.set_field("merchant", json!({
//!     "id": "1234",
//!     "terms_uri": "https://example.com/terms",
//!     "checkout_uri": "https://example.com/checkout",
//!     "confirmation_uri": "https://example.com/confirmation",
//! }));
//!
//! // Create it remotely; the identifier is assigned from the response.
//! if client.create_order(&mut order).await? {
//!     println!("created order {}", order.id().unwrap());
//! }
//!
//! // Update just the status without re-transmitting the whole resource.
//! let mut attributes = serde_json::Map::new();
//! attributes.insert("status".to_owned(), json!("checkout_complete"));
//! let updated = client.update_order(&order, Some(&attributes)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Validation and errors
//!
//! `create_order` and `update_order` refuse to transmit an order that
//! fails its local validity check, returning `Ok(false)` / `Ok(None)`
//! without touching the network. Remote failures map one typed error per
//! documented status ([`error::Error`]), each carrying the raw response
//! body for diagnostics. There are no retries and no local recovery:
//! every remote error propagates directly to the caller.
//!
//! # Security
//!
//! The shared secret is used only as signing key material. It is never
//! transmitted, and its `Debug` representation is redacted so it cannot
//! leak through logs or tracing spans.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod order;
pub mod sign;
pub mod transport;

pub use client::Client;
pub use config::{ClientConfig, Environment, SharedSecret};
pub use error::{Error, Result};
pub use models::{Address, OrderLine};
pub use order::Order;

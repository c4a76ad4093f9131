//! Request signing for the Klarna Checkout API.
//!
//! Every request to the checkout API carries an `Authorization` header of
//! the form `Klarna <token>`, where the token is the base64-encoded SHA-256
//! digest of the request body with the shared secret appended. The token
//! must be computed over the exact bytes that are transmitted: signing a
//! re-serialized copy that differs byte-for-byte is rejected by the server.

use sha2::{Digest, Sha256};

use crate::config::SharedSecret;

/// Computes the authorization token for a request body.
///
/// The token is `base64(SHA-256(body ++ secret))` with no separator between
/// the two inputs and the standard (not URL-safe) base64 alphabet. The
/// function is pure and succeeds for any input; read requests sign the
/// empty body, which digests the secret alone.
///
/// # Examples
///
/// ```
/// use klarna_checkout::config::SharedSecret;
/// use klarna_checkout::sign::sign_payload;
///
/// let secret = SharedSecret::new("my-secret");
/// let token = sign_payload(b"{\"cart\":{}}", &secret);
/// assert_eq!(token, sign_payload(b"{\"cart\":{}}", &secret));
/// ```
#[must_use]
pub fn sign_payload(body: &[u8], secret: &SharedSecret) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    hasher.update(secret.as_bytes());
    base64::Engine::encode(&base64::engine::general_purpose::STANDARD, hasher.finalize())
}

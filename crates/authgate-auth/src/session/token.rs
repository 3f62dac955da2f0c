//! Session token generation.

use authgate_entity::session::SessionToken;

/// Random bytes per token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Draw a fresh token from the thread-local CSPRNG, hex-encoded.
///
/// Every token is exactly `2 * TOKEN_BYTES` lowercase hex characters, which
/// survive a cookie value unchanged.
pub fn generate_token() -> SessionToken {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    SessionToken::new(hex::encode(bytes))
}

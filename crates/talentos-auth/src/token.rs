//! Opaque invitation token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Generate a cryptographically random opaque invitation token
/// (32 bytes → base64url-encoded, no padding).
///
/// The token is the sole credential needed to read or redeem an
/// invitation, so it must be unguessable; it is stored as issued and
/// embedded verbatim in the emailed link.
pub fn gerar_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rand::Rng::random(&mut rng);
    URL_SAFE_NO_PAD.encode(bytes)
}

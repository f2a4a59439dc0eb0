use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;

/// Generate a cryptographically random anti-forgery state parameter.
/// 12 random bytes, base64url-encoded without padding (16 characters).
pub fn generate_state() -> String {
    let bytes: [u8; 12] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

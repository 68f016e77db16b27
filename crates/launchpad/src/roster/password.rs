use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

pub(crate) const PBKDF2_ITERATIONS: u32 = 210_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Hash a plaintext password as
/// `pbkdf2-sha256$<iterations>$<salt>$<key>` with both binary parts
/// base64-encoded. A fresh random salt is drawn per call.
pub fn hash_password(plain: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    encode(plain, &salt, PBKDF2_ITERATIONS)
}

/// Check a plaintext candidate against a stored hash. Malformed stored values
/// never verify.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    match (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) {
        (Some("pbkdf2-sha256"), Some(iterations), Some(salt), Some(_key), None) => {
            let Ok(iterations) = iterations.parse::<u32>() else {
                return false;
            };
            let Ok(salt) = BASE64.decode(salt) else {
                return false;
            };
            encode(plain, &salt, iterations) == stored
        }
        _ => false,
    }
}

fn encode(plain: &str, salt: &[u8], iterations: u32) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(plain.as_bytes(), salt, iterations, &mut key);
    format!(
        "pbkdf2-sha256${iterations}${}${}",
        BASE64.encode(salt),
        BASE64.encode(key)
    )
}

#[cfg(test)]
pub(crate) fn hash_with_salt_for_tests(plain: &str, salt: &[u8]) -> String {
    encode(plain, salt, PBKDF2_ITERATIONS)
}

//! Password verification using Argon2id.
//!
//! Hashing lives next to the store (the repository hashes before
//! writing); this module only compares a candidate password against a
//! stored PHC-format hash.

use argon2::{Argon2, PasswordVerifier};

use crate::error::AuthError;

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// If `pepper` is provided it is prepended to the password before
/// verification — this must match the pepper used during hashing.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verificar_senha(
    senha: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{senha}");
            peppered.as_bytes()
        }
        None => senha.as_bytes(),
    };

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(input, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;

    /// Helper: hash a password with optional pepper using Argon2id.
    fn hash_senha(senha: &str, pepper: Option<&str>) -> String {
        let peppered: String;
        let input = match pepper {
            Some(p) => {
                peppered = format!("{p}{senha}");
                peppered.as_bytes()
            }
            None => senha.as_bytes(),
        };
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(input, &salt)
            .unwrap()
            .to_string()
    }

    #[test]
    fn correct_password_verifies() {
        let hash = hash_senha("Password1!", None);
        assert!(verificar_senha("Password1!", &hash, None).unwrap());
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_senha("Password1!", None);
        assert!(!verificar_senha("OutraSenha2@", &hash, None).unwrap());
    }

    #[test]
    fn pepper_must_match() {
        let hash = hash_senha("Password1!", Some("segredo"));
        assert!(verificar_senha("Password1!", &hash, Some("segredo")).unwrap());
        assert!(!verificar_senha("Password1!", &hash, None).unwrap());
        assert!(!verificar_senha("Password1!", &hash, Some("outro")).unwrap());
    }

    #[test]
    fn malformed_hash_is_a_crypto_error() {
        assert!(verificar_senha("Password1!", "not-a-phc-hash", None).is_err());
    }
}

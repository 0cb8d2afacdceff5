use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use uuid::Uuid;

/// Hashes a password with Argon2id and a fresh random salt
///
/// # Returns
/// A PHC string such as `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())?;
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks a password against a hash produced by [`hash_password`]
///
/// Stored values that are not valid PHC strings never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("hunter2").unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &stored));
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(
            hash_password("same").unwrap(),
            hash_password("same").unwrap()
        );
    }

    #[test]
    fn test_malformed_hash() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "md5$salt$abc"));
        assert!(!verify_password("x", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_legacy_sha256_format_is_rejected() {
        let legacy = "sha256$0f1e2d3c4b5a69788796a5b4c3d2e1f0$e3b0c44298fc1c149afbf4c8996fb924";
        assert!(!verify_password("", legacy));
    }
}

//! Password value object.
//!
//! Wraps an Argon2 PHC string. Plain text never leaves this module.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Hashed password, compared by value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a new plain text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than
    /// [`MIN_PASSWORD_LENGTH`] characters.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::check_strength(plain_text)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Length rule shared by registration and password change.
    pub fn check_strength(plain_text: &str) -> DomainResult<()> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    /// Restore from a stored hash.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let password = Password::new("employee123").unwrap();

        assert!(password.verify("employee123"));
        assert!(!password.verify("employee124"));
    }

    #[test]
    fn restored_hash_still_verifies() {
        let password = Password::new("admin123").unwrap();
        let restored = Password::from_hash(password.as_str().to_string());

        assert!(restored.verify("admin123"));
    }

    #[test]
    fn same_password_gets_different_salts() {
        let first = Password::new("samesame").unwrap();
        let second = Password::new("samesame").unwrap();

        assert_ne!(first.as_str(), second.as_str());
    }

    #[test]
    fn rejects_short_password() {
        assert!(matches!(
            Password::new("12345"),
            Err(DomainError::Validation(_))
        ));
        assert!(Password::new("123456").is_ok());
    }

    #[test]
    fn garbage_hash_never_verifies() {
        let password = Password::from_hash("not-a-phc-string".into());
        assert!(!password.verify("anything"));
    }

    #[test]
    fn debug_output_hides_hash() {
        let password = Password::new("secret-ish").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(password.as_str()));
    }
}

// Password policy and hashing helpers.
// The store only ever sees the SHA-256 hex digest produced here; raw
// passwords never touch disk. No salt is applied, so equal passwords
// produce equal digests.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Minimum length accepted by the registration policy.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Policy violations, reported in the order the checks run so the user
/// sees the first unmet requirement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("password must be at least 8 characters long")]
    TooShort,
    #[error("password must contain an uppercase letter")]
    MissingUppercase,
    #[error("password must contain a lowercase letter")]
    MissingLowercase,
    #[error("password must contain a digit")]
    MissingDigit,
    #[error("password must contain a special character")]
    MissingSpecial,
}

/// Check a candidate password against the registration policy: at least
/// 8 characters with an uppercase letter, a lowercase letter, a digit
/// and a non-alphanumeric character.
pub fn validate_password(password: &str) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordPolicyError::TooShort);
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(PasswordPolicyError::MissingSpecial);
    }
    Ok(())
}

/// SHA-256 digest of the password as lowercase hex. This is the form
/// persisted in the store file.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Compare a stored digest against the digest of an entered password.
pub fn verify_password(stored_digest: &str, entered: &str) -> bool {
    stored_digest == hash_password(entered)
}

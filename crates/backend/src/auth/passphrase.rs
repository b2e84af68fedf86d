//! Passphrase gate for the write endpoints.
//!
//! The check is a plain string comparison with no rate limiting.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("passphrase missing or incorrect")]
pub struct Unauthorized;

/// Accept only an exact, case-sensitive match. Nothing is trimmed.
pub fn authorize_write(supplied: Option<&str>, expected: &str) -> Result<(), Unauthorized> {
    match supplied {
        Some(passphrase) if passphrase == expected => Ok(()),
        _ => Err(Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_passphrase() {
        assert_eq!(authorize_write(Some("secret"), "secret"), Ok(()));
    }

    #[test]
    fn test_missing_or_empty_passphrase() {
        assert_eq!(authorize_write(None, "secret"), Err(Unauthorized));
        assert_eq!(authorize_write(Some(""), "secret"), Err(Unauthorized));
    }

    #[test]
    fn test_exact_match_only() {
        assert_eq!(authorize_write(Some("Secret"), "secret"), Err(Unauthorized));
        assert_eq!(authorize_write(Some("secret "), "secret"), Err(Unauthorized));
    }
}

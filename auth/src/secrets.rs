//! Random one-time values for confirmation and reset flows.

use rand::rngs::OsRng;
use rand::Rng;
use uuid::Uuid;

/// Opaque random identifier (UUID v4, 32 hex characters, no hyphens).
pub fn random_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Numeric one-time code of exactly `digits` decimal digits.
///
/// Leading zeros are kept, so the code is a string rather than a number.
pub fn numeric_code(digits: usize) -> String {
    let mut rng = OsRng;
    (0..digits)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id_shape() {
        let id = random_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, random_id());
    }

    #[test]
    fn test_numeric_code_shape() {
        for _ in 0..50 {
            let code = numeric_code(6);
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_numeric_code_empty() {
        assert_eq!(numeric_code(0), "");
    }
}

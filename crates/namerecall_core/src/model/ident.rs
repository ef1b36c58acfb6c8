//! Identifier generation for person records.
//!
//! # Responsibility
//! - Produce short opaque ids that are effectively unique at single-collection
//!   scale (hundreds to low thousands of records).
//! - Provide the random palette pick used at record creation.
//!
//! # Invariants
//! - Ids never depend on record content; retries always yield fresh values.
//! - Generated ids are 9 lowercase base-36 characters.

use crate::model::person::ColorVariant;
use uuid::Uuid;

const ID_LENGTH: usize = 9;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a short opaque person id from UUIDv4 entropy.
pub fn generate_id() -> String {
    let mut entropy = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(ID_LENGTH);
    for _ in 0..ID_LENGTH {
        let digit = (entropy % 36) as usize;
        id.push(BASE36_DIGITS[digit] as char);
        entropy /= 36;
    }
    id
}

/// Picks a palette variant for a newly created record.
pub fn pick_color_variant() -> ColorVariant {
    let roll = (Uuid::new_v4().as_u128() % ColorVariant::PALETTE.len() as u128) as usize;
    ColorVariant::PALETTE[roll]
}

#[cfg(test)]
mod tests {
    use super::{generate_id, ID_LENGTH};

    #[test]
    fn generated_ids_have_expected_shape() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn generated_ids_do_not_collide_in_practice() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_id()));
        }
    }
}

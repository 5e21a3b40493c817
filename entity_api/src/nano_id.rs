//! Nano-id generation for entity primary keys.
//!
//! Every entity id is a short, URL-safe alphanumeric string rather than a
//! database sequence, so ids can be generated before the insert and embedded
//! directly in client payloads.

use rand::Rng;

const ID_CHARACTERS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a standard entity id.
pub const ID_SIZE: usize = 25;

/// Generate a new entity id of the standard length.
pub fn generate() -> String {
    generate_sized(ID_SIZE)
}

/// Generate an id of an arbitrary length, e.g. for application API keys.
pub fn generate_sized(size: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..size)
        .map(|_| ID_CHARACTERS[rng.gen_range(0..ID_CHARACTERS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_ids_of_standard_length() {
        assert_eq!(generate().len(), ID_SIZE);
    }

    #[test]
    fn generates_ids_of_requested_length() {
        assert_eq!(generate_sized(40).len(), 40);
    }

    #[test]
    fn generates_ids_from_the_allowed_alphabet() {
        let id = generate();
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(generate(), generate());
    }
}

/// Current UTC timestamp.
pub fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

/// Generate an opaque record id (UUID v4, simple format).
///
/// Ids are never reused; the facade assigns one at create time and callers
/// treat it as an opaque string.
pub fn record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Generate a human-readable fraud-claim number, e.g. `FC-7K2M9QX4`.
///
/// Uppercase alphanumerics without 0/O/1/I to keep the number readable
/// over the phone. Collision-free at claims-per-business scale.
pub fn claim_number() -> String {
    use rand::Rng;
    const ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..8)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("FC-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_unique() {
        let a = record_id();
        let b = record_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn claim_number_format() {
        let n = claim_number();
        assert!(n.starts_with("FC-"));
        assert_eq!(n.len(), 11);
        assert!(!n.contains('O') && !n.contains('0'));
    }
}

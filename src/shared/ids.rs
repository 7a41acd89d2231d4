use getrandom::getrandom;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SALT_SPACE: u32 = 36 * 36 * 36 * 36;

static NEXT_TRACK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn base36_encode_u64(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while value > 0 {
        chars.push(BASE36_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    chars.into_iter().rev().collect()
}

fn base36_encode_fixed_u32(mut value: u32, width: usize) -> String {
    let mut chars = vec!['0'; width];
    for idx in (0..width).rev() {
        chars[idx] = BASE36_ALPHABET[(value % 36) as usize] as char;
        value /= 36;
    }
    chars.into_iter().collect()
}

/// Opaque identifier of a track row.
///
/// Ids are unique for the lifetime of the process: the leading segment is a
/// monotonically increasing counter, the trailing segment is a random salt.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn generate() -> Self {
        let sequence = NEXT_TRACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0_u8; 4];
        let salt = match getrandom(&mut bytes) {
            Ok(()) => u32::from_le_bytes(bytes) % SALT_SPACE,
            Err(_) => 0,
        };
        Self(format!(
            "t-{}-{}",
            base36_encode_u64(sequence),
            base36_encode_fixed_u32(salt, 4)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn base36_helpers_encode_expected_values() {
        assert_eq!(base36_encode_u64(0), "0");
        assert_eq!(base36_encode_u64(35), "z");
        assert_eq!(base36_encode_u64(36), "10");
        assert_eq!(base36_encode_fixed_u32(1, 4), "0001");
    }

    #[test]
    fn generated_ids_are_distinct_and_prefixed() {
        let ids = (0..500).map(|_| TrackId::generate()).collect::<Vec<_>>();
        let unique = ids.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| id.as_str().starts_with("t-")));
    }
}

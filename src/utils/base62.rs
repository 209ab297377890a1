//! Base-62 codec for allocator-generated identifiers.

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Encode `value` with the alphabet `0-9a-zA-Z`. Zero encodes as `"0"`.
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    // u64::MAX needs 11 digits
    let mut buf = [0u8; 11];
    let mut pos = buf.len();
    while value > 0 {
        pos -= 1;
        buf[pos] = ALPHABET[(value % 62) as usize];
        value /= 62;
    }

    buf[pos..].iter().map(|&b| b as char).collect()
}

/// Inverse of [`encode`]. Returns `None` on foreign characters, empty input
/// or overflow.
pub fn decode(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }

    s.bytes().try_fold(0u64, |acc, b| {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'z' => b - b'a' + 10,
            b'A'..=b'Z' => b - b'A' + 36,
            _ => return None,
        };
        acc.checked_mul(62)?.checked_add(digit as u64)
    })
}

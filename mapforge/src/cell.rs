//! Waypoint / cell index encoding.
//!
//! Waypoints travel through action and team fields as spreadsheet-column letters of the
//! index plus one: 0 is `A`, 25 is `Z`, 26 is `AA`.

/// Encode a waypoint index as base-26 letters.
pub fn encode(index: u32) -> String {
    let mut n = u64::from(index) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = match n % 26 {
            0 => 26,
            r => r,
        };
        letters.push(b'A' + (rem - 1) as u8);
        n = (n - rem) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Decode letters produced by [`encode`]. Returns `None` for empty input, anything outside
/// `A`-`Z`, or values that do not fit a `u32` index.
pub fn decode(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        n = n.checked_mul(26)?.checked_add(u64::from(b - b'A' + 1))?;
    }
    u32::try_from(n - 1).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors() {
        assert_eq!(encode(0), "A");
        assert_eq!(encode(25), "Z");
        assert_eq!(encode(26), "AA");
        assert_eq!(encode(27), "AB");
        assert_eq!(encode(51), "AZ");
        assert_eq!(encode(52), "BA");
        assert_eq!(encode(701), "ZZ");
        assert_eq!(encode(702), "AAA");
    }

    #[test]
    fn round_trips_first_thousand() {
        for n in 0..=1000 {
            assert_eq!(decode(&encode(n)), Some(n), "index {n}");
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("a"), None);
        assert_eq!(decode("A1"), None);
    }

    #[test]
    fn largest_index_encodes() {
        assert_eq!(decode(&encode(u32::MAX)), Some(u32::MAX));
    }
}

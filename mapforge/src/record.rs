//! Helpers shared by the record renderers.

use crate::error::{ForgeError, Result};

/// Lines of this length or longer are truncated by the engine's parser.
pub const MAX_LINE_LEN: usize = 512;

/// Sentinel written for an absent reference.
pub const NONE: &str = "<none>";

/// Check that `key=value` stays under [`MAX_LINE_LEN`] and hand the value back.
///
/// # Errors
/// `RecordTooLong` when the rendered line would reach the ceiling.
pub fn fit(section: &str, key: &str, value: String) -> Result<String> {
    let len = key.len() + 1 + value.len();
    if len >= MAX_LINE_LEN {
        return Err(ForgeError::RecordTooLong {
            section: section.to_string(),
            key: key.to_string(),
            len,
            limit: MAX_LINE_LEN,
        });
    }
    Ok(value)
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn bit(flag: bool) -> u8 {
    u8::from(flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lines_below_the_ceiling() {
        let value = "x".repeat(MAX_LINE_LEN - 10);
        assert!(fit("Actions", "03A00001", value).is_ok());
    }

    #[test]
    fn rejects_lines_at_the_ceiling() {
        // 8 char key + '=' + 503 = 512
        let value = "x".repeat(503);
        match fit("Actions", "03A00001", value) {
            Err(ForgeError::RecordTooLong { len, limit, .. }) => {
                assert_eq!(len, 512);
                assert_eq!(limit, MAX_LINE_LEN);
            },
            other => panic!("expected RecordTooLong, got {other:?}"),
        }
    }

    #[test]
    fn booleans_render_as_words() {
        assert_eq!(yes_no(true), "yes");
        assert_eq!(yes_no(false), "no");
        assert_eq!(bit(true), 1);
    }
}

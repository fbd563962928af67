const MASK: char = '•';
const VISIBLE: usize = 4;
const MAX_MASKED: usize = 20;

/// Masks a secret for display: the first four characters followed by at most twenty bullets.
///
/// Secrets shorter than four characters become `****`; an empty secret stays empty.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len == 0 {
        return String::new();
    }
    if len < VISIBLE {
        return "****".to_owned();
    }

    let mut masked: String = secret.chars().take(VISIBLE).collect();
    masked.extend(std::iter::repeat_n(MASK, (len - VISIBLE).min(MAX_MASKED)));
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_after_four_characters() {
        assert_eq!(mask_secret("R0UTINGKEY"), "R0UT••••••");
        assert_eq!(mask_secret("abcd"), "abcd");
    }

    #[test]
    fn caps_bullets_and_handles_short_values() {
        let long = "x".repeat(64);
        assert_eq!(mask_secret(&long).chars().count(), 24);
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret(""), "");
    }
}

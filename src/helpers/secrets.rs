/// Mask a credential for debug/log output, keeping just enough of the
/// prefix and suffix to identify which key was used.
pub fn mask_secret(secret: &str) -> String {
    if secret.len() > 8 {
        let start = &secret[..3];
        let end = &secret[secret.len() - 3..];
        format!("{}{}{}", start, "*".repeat(secret.len() - 6), end)
    } else {
        "*".repeat(secret.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_middle_of_long_secrets() {
        let masked = mask_secret("sk_test_123456789abcdef");
        assert!(masked.starts_with("sk_"));
        assert!(masked.ends_with("def"));
        assert!(masked.contains('*'));
        assert_eq!(masked.len(), "sk_test_123456789abcdef".len());
    }

    #[test]
    fn fully_masks_short_secrets() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }
}

//! Input validation utilities

/// Validate a post or comment body
pub fn validate_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Text is required".to_string());
    }

    if text.chars().count() > 10_000 {
        return Err("Text must be at most 10000 characters long".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text() {
        assert!(validate_text("hello world").is_ok());

        assert!(validate_text("").is_err());
        assert!(validate_text("   ").is_err());
        assert!(validate_text(&"x".repeat(10_001)).is_err());
    }

    #[test]
    fn test_validate_text_counts_characters_not_bytes() {
        // Multibyte text within the character limit passes even though it
        // exceeds the limit in bytes
        assert!(validate_text(&"é".repeat(9_000)).is_ok());
        assert!(validate_text(&"é".repeat(10_001)).is_err());
    }
}

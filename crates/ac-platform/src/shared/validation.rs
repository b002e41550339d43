//! Input checks shared by the services.

use std::sync::OnceLock;

use regex::Regex;

use crate::shared::error::{PlatformError, Result};

/// Maximum length of organization, role and right names.
pub const MAX_NAME_LENGTH: usize = 200;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("static email pattern")
    })
}

pub fn validate_name(entity_type: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PlatformError::validation(format!(
            "{} name must not be blank",
            entity_type
        )));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(PlatformError::validation(format!(
            "{} name must be at most {} characters",
            entity_type, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    if email_pattern().is_match(email) {
        Ok(())
    } else {
        Err(PlatformError::validation(format!("Invalid email address: {}", email)))
    }
}

/// Drop repeated ids, keeping first-seen order.
pub fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Role", "admin").is_ok());
        assert!(validate_name("Role", "   ").is_err());
        assert!(validate_name("Role", "").is_err());
        assert!(validate_name("Role", &"x".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_name("Role", &"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last+tag@example.co.uk").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_unique_ids_keeps_order() {
        assert_eq!(unique_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(unique_ids(&[]).is_empty());
    }
}

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

// (11) 98765-4321, 11987654321, +55 11 98765-4321
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+55\s?)?\(?[1-9][0-9]\)?\s?9?[0-9]{4}-?[0-9]{4}$").unwrap()
});

pub fn validate_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone.trim())
}

pub fn validate_phone_field(phone: &str) -> Result<(), ValidationError> {
    if validate_phone(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

pub fn validate_not_blank(input: &str) -> Result<(), ValidationError> {
    if is_blank(input) {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

pub fn sanitize_string(input: &str) -> String {
    input.trim().to_string()
}

pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("(11) 98765-4321"));
        assert!(validate_phone("11987654321"));
        assert!(validate_phone("+55 11 98765-4321"));
        assert!(validate_phone("(81) 3456-7890"));
        assert!(!validate_phone("98765"));
        assert!(!validate_phone("(01) 98765-4321"));
        assert!(!validate_phone("phone"));
    }

    #[test]
    fn test_blank_and_sanitize() {
        assert!(is_blank(""));
        assert!(is_blank("   \n"));
        assert!(!is_blank(" a "));
        assert_eq!(sanitize_string("  Vazamento  "), "Vazamento");
        assert!(validate_not_blank(" \t ").is_err());
        assert!(validate_not_blank("Ana").is_ok());
    }
}

//! Validation utilities for the Manufacturing ERP Platform

use rust_decimal::Decimal;

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate username format (3-30 chars, alphanumeric plus . _ -)
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 30 {
        return Err("Username must be at most 30 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    {
        return Err("Username may only contain letters, digits, '.', '_' and '-'");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate product code format (2-50 uppercase alphanumeric, '-' allowed)
pub fn validate_product_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 {
        return Err("Product code must be at least 2 characters");
    }
    if code.len() > 50 {
        return Err("Product code must be at most 50 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Product code must be uppercase alphanumeric (dashes allowed)");
    }
    Ok(())
}

/// Validate a ledger reference number (non-empty, at most 100 chars)
pub fn validate_reference_number(reference: &str) -> Result<(), &'static str> {
    if reference.trim().is_empty() {
        return Err("Reference number is required");
    }
    if reference.len() > 100 {
        return Err("Reference number must be at most 100 characters");
    }
    Ok(())
}

/// Validate a quantity is strictly positive
pub fn validate_positive_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@factory.co").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("jdoe").is_ok());
        assert!(validate_username("j.doe_42").is_ok());
        assert!(validate_username("shift-lead").is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert!(validate_username("ab").is_err()); // Too short
        assert!(validate_username(&"a".repeat(31)).is_err()); // Too long
        assert!(validate_username("j doe").is_err()); // Space
        assert!(validate_username("j@doe").is_err()); // Special char
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_product_code_valid() {
        assert!(validate_product_code("RM-0042").is_ok());
        assert!(validate_product_code("FG100").is_ok());
    }

    #[test]
    fn test_validate_product_code_invalid() {
        assert!(validate_product_code("X").is_err()); // Too short
        assert!(validate_product_code("rm-0042").is_err()); // Lowercase
        assert!(validate_product_code("RM 0042").is_err()); // Space
    }

    #[test]
    fn test_validate_reference_number() {
        assert!(validate_reference_number("PO-2025-00017").is_ok());
        assert!(validate_reference_number("  ").is_err());
        assert!(validate_reference_number(&"R".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_positive_quantity() {
        assert!(validate_positive_quantity(Decimal::from(1)).is_ok());
        assert!(validate_positive_quantity(Decimal::ZERO).is_err());
        assert!(validate_positive_quantity(Decimal::from(-5)).is_err());
    }
}

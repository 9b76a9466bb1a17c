//! Checks that run before any request leaves the device

use crate::error::{IdentityError, Result};
use crate::models::RegistrationProfile;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Trim and lower-case a login identifier or email
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IdentityError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_login(identifier: &str, secret: &str) -> Result<()> {
    require("email", identifier)?;
    require("password", secret)
}

pub fn validate_email(email: &str) -> Result<()> {
    require("email", email)?;
    if !is_valid_email(email) {
        return Err(IdentityError::Validation("email address is not valid".to_string()));
    }
    Ok(())
}

pub fn validate_registration(profile: &RegistrationProfile) -> Result<()> {
    require("username", &profile.username)?;
    require("first_name", &profile.first_name)?;
    require("last_name", &profile.last_name)?;
    require("email", &profile.email)?;
    require("password", &profile.password)?;
    require("confirm_password", &profile.confirm_password)?;

    validate_email(&profile.email)?;

    if profile.password != profile.confirm_password {
        return Err(IdentityError::Validation("passwords do not match".to_string()));
    }
    Ok(())
}

pub fn validate_new_password(new_secret: &str, confirm_secret: &str, min_length: usize) -> Result<()> {
    require("new_password", new_secret)?;
    require("confirm_password", confirm_secret)?;

    if new_secret.chars().count() < min_length {
        return Err(IdentityError::Validation(format!(
            "password must be at least {min_length} characters"
        )));
    }
    if new_secret != confirm_secret {
        return Err(IdentityError::Validation("passwords do not match".to_string()));
    }
    Ok(())
}

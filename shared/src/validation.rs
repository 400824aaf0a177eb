//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Uses both custom validators and the `validator` crate.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use validator::ValidateUrl;

/// bcrypt only consumes the first 72 bytes of a password
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Compiled once; `None` only if the pattern itself were invalid
static EMAIL_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if !email.contains('@') || !email.contains('.') {
        return Err("Invalid email format".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = EMAIL_REGEX
        .as_ref()
        .ok_or_else(|| "Invalid email format".to_string())?;
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate a password before hashing
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate an optional display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be blank".to_string());
    }
    if name.chars().count() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

// ============================================================================
// Video Validation
// ============================================================================

/// Validate a video title
pub fn validate_video_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be blank".to_string());
    }
    if title.chars().count() > 200 {
        return Err("Title too long".to_string());
    }
    Ok(())
}

/// Validate a video URL (absolute http or https)
pub fn validate_video_url(url: &str) -> Result<(), String> {
    if !url.validate_url() {
        return Err("Invalid URL".to_string());
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err("URL must use http or https".to_string());
    }
    if url.len() > 2048 {
        return Err("URL too long".to_string());
    }
    Ok(())
}

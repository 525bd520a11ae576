pub mod health;
pub use self::health::health;

pub mod user_register;
pub use self::user_register::register;

pub mod user_login;
pub use self::user_login::login;

pub mod user_profile;
pub use self::user_profile::profile;

// common functions for the handlers
use crate::janua::outcome::FieldError;
use axum::http::{header::AUTHORIZATION, HeaderMap};

const NAME_MIN_LENGTH: usize = 3;
const USERNAME_MIN_LENGTH: usize = 3;
const PASSWORD_MIN_LENGTH: usize = 6;

/// Shape validation for registration; messages preserved from the original
/// schema.
pub fn validate_registration(name: &str, username: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.chars().count() < NAME_MIN_LENGTH {
        errors.push(FieldError::new(
            "name",
            "Name is required and must be at least 3 character long",
        ));
    }

    if username.chars().count() < USERNAME_MIN_LENGTH {
        errors.push(FieldError::new(
            "username",
            "Username must be at least 3 characters long",
        ));
    }

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    }

    errors
}

/// Shape validation for login, both fields are only required to be non-empty.
pub fn validate_login(username: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if username.is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    }

    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    errors
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_validate_registration_ok() {
        assert!(validate_registration("John Doe", "johndoe", "password123").is_empty());
    }

    #[test]
    fn test_validate_registration_all_fields() {
        let errors = validate_registration("J", "jd", "12345");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "name");
        assert_eq!(
            errors[0].message,
            "Name is required and must be at least 3 character long"
        );
        assert_eq!(errors[1].field, "username");
        assert_eq!(
            errors[1].message,
            "Username must be at least 3 characters long"
        );
        assert_eq!(errors[2].field, "password");
        assert_eq!(
            errors[2].message,
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_validate_registration_boundaries() {
        assert!(validate_registration("Jon", "jon", "123456").is_empty());
        assert_eq!(validate_registration("Jon", "jon", "12345").len(), 1);
    }

    #[test]
    fn test_validate_login() {
        assert!(validate_login("johndoe", "password123").is_empty());

        let errors = validate_login("", "");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Username is required");
        assert_eq!(errors[1].message, "Password is required");
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}

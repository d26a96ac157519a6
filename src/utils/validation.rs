use crate::utils::error::{Result, WarrantyError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn invalid_value(field: &str, value: impl ToString, reason: impl Into<String>) -> WarrantyError {
    WarrantyError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Accepts only absolute `http`/`https` URLs; lookups and reference fetches go over HTTP.
pub fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| invalid_value(field, value, format!("not a URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_value(field, value, format!("scheme {} is not http(s)", url.scheme())));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid_value(field_name, value, "must not be blank"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid_value(field_name, value, format!("must be between {} and {}", min, max)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("endpoints.lookup", "https://example.com/wcResults.do").is_ok());
        assert!(validate_http_url("endpoints.lookup", "http://127.0.0.1:8080").is_ok());
        assert!(validate_http_url("endpoints.lookup", "").is_err());
        assert!(validate_http_url("endpoints.lookup", "selfsolve.apple.com").is_err());

        match validate_http_url("endpoints.lookup", "ftp://example.com") {
            Err(WarrantyError::InvalidConfigValueError { field, reason, .. }) => {
                assert_eq!(field, "endpoints.lookup");
                assert!(reason.contains("ftp"));
            }
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("http.timeout_seconds", 30u64, 1, 600).is_ok());
        assert!(validate_range("http.timeout_seconds", 0u64, 1, 600).is_err());
        assert!(validate_range("http.timeout_seconds", 601u64, 1, 600).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("http.user_agent", "warranty-check").is_ok());
        assert!(validate_non_empty_string("http.user_agent", "   ").is_err());
    }
}

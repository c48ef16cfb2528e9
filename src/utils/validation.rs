use crate::utils::error::{CartError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CartError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Storage keys are namespaced, e.g. `@RocketShoes:cart`.
pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    let reason = if key.chars().any(char::is_whitespace) {
        Some("Key cannot contain whitespace")
    } else {
        match key.split_once(':') {
            Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => None,
            _ => Some("Key must look like <namespace>:<name>"),
        }
    };

    match reason {
        Some(reason) => Err(CartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("catalog.base_url", "https://example.com").is_ok());
        assert!(validate_url("catalog.base_url", "http://localhost:3333").is_ok());
        assert!(validate_url("catalog.base_url", "").is_err());
        assert!(validate_url("catalog.base_url", "invalid-url").is_err());
        assert!(validate_url("catalog.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path_and_key() {
        assert!(validate_path("storage.path", "./cart.json").is_ok());
        assert!(validate_path("storage.path", "").is_err());
        assert!(validate_path("storage.path", "bad\0path").is_err());
        assert!(validate_non_empty_string("storage.key", "@RocketShoes:cart").is_ok());
        assert!(validate_non_empty_string("storage.key", "   ").is_err());
    }

    #[test]
    fn test_validate_storage_key() {
        assert!(validate_storage_key("storage.key", "@RocketShoes:cart").is_ok());
        assert!(validate_storage_key("storage.key", "@Shop:cart").is_ok());
        assert!(validate_storage_key("storage.key", "cart").is_err());
        assert!(validate_storage_key("storage.key", ":cart").is_err());
        assert!(validate_storage_key("storage.key", "@Shop: cart").is_err());
    }
}

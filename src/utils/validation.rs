use crate::utils::error::{OfferError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OfferError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(OfferError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OfferError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
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
        return Err(OfferError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_formats(field_name: &str, formats: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    for format in formats {
        if !allowed_set.contains(format.as_str()) {
            return Err(OfferError::InvalidConfigValue {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!("Unsupported format. Valid formats: {}", allowed.join(", ")),
            });
        }
    }

    Ok(())
}

/// 目錄中的名稱：不可為空，長度上限以位元組計算
pub fn validate_display_name(location: &str, name: &str, max_len: usize) -> Result<()> {
    if name.trim().is_empty() {
        return Err(OfferError::schema(location, "name cannot be empty"));
    }
    if name.len() > max_len {
        return Err(OfferError::schema(
            location,
            format!("name too long ({} bytes, limit {})", name.len(), max_len),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("catalog.path", "options.json").is_ok());
        assert!(validate_path("catalog.path", "").is_err());
        assert!(validate_path("catalog.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("display.name_width", 12, 1, 255).is_ok());
        assert!(validate_range("display.name_width", 0, 1, 255).is_err());
        assert!(validate_range("display.name_width", 256, 1, 255).is_err());
    }

    #[test]
    fn test_validate_formats() {
        let formats = vec!["txt".to_string(), "csv".to_string()];
        assert!(validate_formats("offer.formats", &formats, &["txt", "csv", "json"]).is_ok());

        let invalid = vec!["xml".to_string()];
        assert!(validate_formats("offer.formats", &invalid, &["txt", "csv", "json"]).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("essential[0].name", "Basic", 255).is_ok());
        assert!(validate_display_name("essential[0].name", "  ", 255).is_err());

        let long = "x".repeat(256);
        match validate_display_name("essential[0].name", &long, 255) {
            Err(OfferError::Schema { location, message }) => {
                assert_eq!(location, "essential[0].name");
                assert!(message.contains("name too long"));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }
}

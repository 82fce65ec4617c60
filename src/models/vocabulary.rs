// src/models/vocabulary.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for `POST /api/generate`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(custom(function = validate_category))]
    pub category: String,
}

fn validate_category(category: &str) -> Result<(), validator::ValidationError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(validator::ValidationError::new("category_cannot_be_empty"));
    }
    if trimmed.chars().count() > 100 {
        return Err(validator::ValidationError::new("category_too_long"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_category_is_rejected() {
        let req = GenerateRequest {
            category: "   ".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn ordinary_category_passes() {
        let req = GenerateRequest {
            category: "Kitchen utensils".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}

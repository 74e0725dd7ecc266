use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid pricing rule: {0}")]
    InvalidRule(String),
}

impl PricingError {
    /// Stable machine-readable code, mapped to an API error body by the
    /// calling service.
    pub fn code(&self) -> &'static str {
        match self {
            PricingError::InvalidArgument(_) => "INVALID_ARGUMENT",
            PricingError::InvalidRule(_) => "INVALID_RULE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            PricingError::InvalidArgument("bad capacity".to_string()).code(),
            "INVALID_ARGUMENT"
        );
        assert_eq!(
            PricingError::InvalidRule("min above max".to_string()).code(),
            "INVALID_RULE"
        );
    }

    #[test]
    fn test_display_includes_detail() {
        let err = PricingError::InvalidArgument("total_capacity must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: total_capacity must be positive"
        );
    }
}

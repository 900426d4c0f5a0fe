use std::fmt;

/// Pricing library error types
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// An input field failed a precondition check
    InvalidInput { field: &'static str, reason: String },
    /// A tier string did not name a known traffic tier
    UnknownTier(String),
}

impl PricingError {
    /// Shorthand for an `InvalidInput` naming the offending field.
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Stable snake_case code for this error, usable as a metrics label.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::UnknownTier(_) => "unknown_tier",
        }
    }

    /// The input field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
            Self::UnknownTier(_) => "tier",
        }
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { field, reason } => {
                write!(f, "Invalid input for '{}': {}", field, reason)
            }
            Self::UnknownTier(value) => write!(f, "Unknown traffic tier: {}", value),
        }
    }
}

impl std::error::Error for PricingError {}

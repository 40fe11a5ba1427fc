//! Rule table errors

/// Errors loading or validating a rule set
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// TOML parse / deserialization error
    #[error("rule parse error: {0}")]
    Parse(String),

    /// Structurally valid but unusable rules
    #[error("rule validation error: {0}")]
    Validation(String),

    /// Rule set could not be rendered
    #[error("rule encode error: {0}")]
    Encode(String),
}

impl RuleError {
    /// Create validation error
    #[inline]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

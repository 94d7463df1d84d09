use thiserror::Error;

/// Main error type for snortrule
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Malformed rule: {0}")]
    MalformedRule(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

/// Result type alias for snortrule operations
pub type Result<T> = std::result::Result<T, RuleError>;

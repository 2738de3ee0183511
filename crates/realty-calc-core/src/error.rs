use thiserror::Error;

#[derive(Debug, Error)]
pub enum RealtyCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("No stamp duty rate configured for {jurisdiction} / {category}")]
    UnmappedRate {
        jurisdiction: String,
        category: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RealtyCalcError {
    fn from(e: serde_json::Error) -> Self {
        RealtyCalcError::SerializationError(e.to_string())
    }
}

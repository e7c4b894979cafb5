//! Boundary error types.

use thiserror::Error;

use tessera_commerce::EngineError;

/// Errors converting inbound catalog records into engine types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The variation's string-encoded price did not parse.
    #[error("Invalid price {price:?} for variation {variation_id}")]
    BadPrice { variation_id: i64, price: String },

    /// The variation carries no recognizable size attribute.
    #[error("No size attribute on variation {0}")]
    MissingSize(i64),
}

/// Errors from the cart collaborator's network boundary.
#[derive(Debug, Error)]
pub enum CartApiError {
    /// The collaborator answered with an error status.
    #[error("HTTP error: {status} for cart line")]
    Http { status: u16 },

    /// The request never completed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The call timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CartApiError {
    /// Whether a retry has any chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            CartApiError::Http { status } => (500..600).contains(status),
            CartApiError::Connection(_) | CartApiError::Timeout(_) => true,
            CartApiError::Serialization(_) => false,
        }
    }
}

impl From<serde_json::Error> for CartApiError {
    fn from(e: serde_json::Error) -> Self {
        CartApiError::Serialization(e.to_string())
    }
}

impl From<CartApiError> for EngineError {
    fn from(e: CartApiError) -> Self {
        EngineError::CartAddFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(CartApiError::Http { status: 503 }.is_transient());
        assert!(!CartApiError::Http { status: 400 }.is_transient());
        assert!(CartApiError::Connection("reset".into()).is_transient());
        assert!(!CartApiError::Serialization("bad".into()).is_transient());
    }

    #[test]
    fn test_into_engine_error() {
        let err: EngineError = CartApiError::Http { status: 502 }.into();
        assert!(matches!(err, EngineError::CartAddFailed(_)));
    }
}

//! Error types for the store crate.

/// Errors that can occur while talking to the flow store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The configured endpoint is not a usable URL.
    #[error("invalid store endpoint: {0}")]
    Endpoint(String),

    /// The store could not be reached or the connection failed mid-flight.
    #[error("store transport failure: {0}")]
    Transport(String),

    /// The store answered with a non-success HTTP status.
    #[error("store returned HTTP {status}")]
    BadStatus { status: u16, body: String },

    /// The store executed the request but reported protocol-level errors.
    #[error("store rejected request: {0}")]
    Graphql(String),

    /// The response body was not the shape the operation promises.
    #[error("malformed store response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display_includes_detail() {
        let err = StoreError::Transport("connection refused".to_owned());
        assert!(err.to_string().contains("connection refused"));

        let err = StoreError::BadStatus { status: 503, body: String::new() };
        assert!(err.to_string().contains("503"));
    }
}

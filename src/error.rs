// Upstream failure classification shared by the RPC and marketplace clients

/// Why an outbound call failed. Detail strings are for logs only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpstreamError {
    /// Transport failure, timeout or non-success HTTP status.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
    /// Body is not the expected JSON shape.
    #[error("upstream returned a malformed response: {0}")]
    Malformed(String),
    /// The node answered with a JSON-RPC error object.
    #[error("upstream rejected the request ({code}): {message}")]
    Rejected { code: i64, message: String },
}

impl UpstreamError {
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Unavailable(_) => "upstream_unavailable",
            UpstreamError::Malformed(_) => "upstream_malformed_response",
            UpstreamError::Rejected { .. } => "upstream_rejected",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            UpstreamError::Malformed(e.to_string())
        } else {
            UpstreamError::Unavailable(e.to_string())
        }
    }
}

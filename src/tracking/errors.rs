// Error types for the transfer tracking core
use std::fmt;

#[derive(Debug, Clone)]
pub enum TrackError {
    // Persistence errors (logged and swallowed at the store boundary)
    StorageWrite(String),

    // Remote fetch errors
    NetworkFetch(String),
    RemoteProtocol(String),

    // Local give-up signal, not a remote failure
    ClientTimeout(String),

    // Explicit user actions
    UserCancelled(String),
    InvalidRetry { id: String, status: String },

    // Lookup errors
    RecordNotFound(String),
    FlowNotRegistered(String),

    // Unknown
    Unknown(String),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageWrite(msg) => write!(f, "Storage write failed: {}", msg),
            Self::NetworkFetch(msg) => write!(f, "Status fetch failed: {}", msg),
            Self::RemoteProtocol(msg) => write!(f, "Malformed remote status: {}", msg),
            Self::ClientTimeout(flow_id) => write!(f, "Polling timed out for flow {}", flow_id),
            Self::UserCancelled(id) => write!(f, "Transfer {} cancelled by user", id),
            Self::InvalidRetry { id, status } => {
                write!(f, "Cannot retry transfer {} in status {}", id, status)
            }
            Self::RecordNotFound(id) => write!(f, "Transfer {} not found", id),
            Self::FlowNotRegistered(id) => {
                write!(f, "Transfer {} has no tracking flow registered", id)
            }
            Self::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for TrackError {}

impl From<anyhow::Error> for TrackError {
    fn from(err: anyhow::Error) -> Self {
        TrackError::Unknown(err.to_string())
    }
}

// Error code mapping for logs and API responses
impl TrackError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::StorageWrite(_) => "STORAGE_WRITE_FAILED",
            Self::NetworkFetch(_) => "NETWORK_FETCH_FAILED",
            Self::RemoteProtocol(_) => "REMOTE_PROTOCOL_ERROR",
            Self::ClientTimeout(_) => "CLIENT_TIMEOUT",
            Self::UserCancelled(_) => "USER_CANCELLED",
            Self::InvalidRetry { .. } => "INVALID_RETRY",
            Self::RecordNotFound(_) => "RECORD_NOT_FOUND",
            Self::FlowNotRegistered(_) => "FLOW_NOT_REGISTERED",
            Self::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Retryable errors never abort a polling job; they are retried on the
    /// next scheduled tick
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageWrite(_) | Self::NetworkFetch(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = TrackError::NetworkFetch("connection refused".to_string());
        assert_eq!(err.error_code(), "NETWORK_FETCH_FAILED");
        assert!(err.is_retryable());

        let err2 = TrackError::RemoteProtocol("missing field `status`".to_string());
        assert_eq!(err2.error_code(), "REMOTE_PROTOCOL_ERROR");
        assert!(!err2.is_retryable());

        let err3 = TrackError::InvalidRetry {
            id: "tx-1".to_string(),
            status: "finalized".to_string(),
        };
        assert_eq!(err3.error_code(), "INVALID_RETRY");
        assert!(!err3.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = TrackError::InvalidRetry {
            id: "tx-1".to_string(),
            status: "finalized".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot retry transfer tx-1 in status finalized");

        let err2 = TrackError::ClientTimeout("flow-9".to_string());
        assert_eq!(err2.to_string(), "Polling timed out for flow flow-9");
    }
}

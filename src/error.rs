//! Error handling for whois-rdap

use thiserror::Error;

/// Main error type for whois-rdap
#[derive(Error, Debug, Clone)]
pub enum WhoisRdapError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid domain name '{domain}': {message}")]
    Validation { domain: String, message: String },

    #[error("Domain not found: {domain}")]
    NotFound { domain: String, server: Option<String> },

    #[error("Network error: {message}")]
    Network {
        message: String,
        server: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl WhoisRdapError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error for a requested domain
    pub fn validation(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(domain: impl Into<String>, server: Option<String>) -> Self {
        Self::NotFound {
            domain: domain.into(),
            server,
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>, server: Option<String>) -> Self {
        Self::Network {
            message: message.into(),
            server,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// HTTP status code used when this error ends a request.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            _ => 500,
        }
    }

    /// Title of the RDAP error document for this error.
    pub fn title(&self) -> &'static str {
        match self.status_code() {
            404 => "Not Found",
            400 => "Bad Request",
            _ => "Internal Server Error",
        }
    }

    /// Check whether a retry against the same server could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. } | Self::Io { .. })
    }
}

/// Convert from common error types
impl From<std::io::Error> for WhoisRdapError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WhoisRdapError>;

/// Helper macro for configuration errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::WhoisRdapError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::WhoisRdapError::config(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(WhoisRdapError::not_found("example.com", None).status_code(), 404);
        assert_eq!(WhoisRdapError::validation("", "empty").status_code(), 400);
        assert_eq!(WhoisRdapError::network("reset", None).status_code(), 500);
        assert_eq!(WhoisRdapError::timeout("WHOIS read", 10).status_code(), 500);
    }

    #[test]
    fn test_titles() {
        assert_eq!(WhoisRdapError::not_found("a.com", None).title(), "Not Found");
        assert_eq!(WhoisRdapError::io("broken pipe").title(), "Internal Server Error");
    }

    #[test]
    fn test_config_macro() {
        let err = config_error!("bad port {}", 99999);
        assert!(err.to_string().contains("bad port 99999"));
        assert!(matches!(err, WhoisRdapError::Config { .. }));
    }

    #[test]
    fn test_from_io_error() {
        let err: WhoisRdapError =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer").into();
        assert!(err.is_transient());
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_transient() {
        assert!(WhoisRdapError::network("reset", None).is_transient());
        assert!(!WhoisRdapError::not_found("a.com", None).is_transient());
    }
}

//! Error category classification.
//!
//! Categories are logged with every failed exchange and pick the recovery
//! hint shown when history cannot be saved.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout.
    Network,

    /// Service-side failures (HTTP 5xx, stream cut by the server).
    Server,

    /// API key rejected or missing.
    Auth,

    /// Malformed data or a request the service refused.
    Client,

    /// Local persistence problems (quota, filesystem).
    Storage,

    /// Missing or invalid settings.
    Configuration,
}

impl ErrorCategory {
    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Client => "client",
            ErrorCategory::Storage => "storage",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested recovery action for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => {
                "The service may be experiencing issues. Please try again later"
            }
            ErrorCategory::Auth => "Run `chatstream login` or set OPENAI_API_KEY",
            ErrorCategory::Client => "This may be a bug. Please report it if it persists",
            ErrorCategory::Storage => "Free up disk space or raise the storage quota",
            ErrorCategory::Configuration => "Check your CHATSTREAM_* environment settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(ErrorCategory::Storage.as_str(), "storage");
    }

    #[test]
    fn test_recovery_hint() {
        assert!(ErrorCategory::Auth.recovery_hint().contains("login"));
        assert!(ErrorCategory::Network.recovery_hint().contains("internet"));
    }
}

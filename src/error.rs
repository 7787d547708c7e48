use reqwest::StatusCode;
use std::fmt;

/// Failure while acquiring session cookies from the landing page.
#[derive(Debug)]
pub enum SessionError {
    Request(String),
    NoCookies,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::Request(msg) => write!(f, "Bootstrap request error: {}", msg),
            SessionError::NoCookies => write!(f, "Landing page returned no cookies"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        SessionError::Request(err.to_string())
    }
}

/// Failure of a single fetch attempt. All variants except `Bootstrap` are
/// retried with backoff until the attempt budget runs out.
#[derive(Debug)]
pub enum FetchError {
    /// Cookie bootstrap or refresh failed; the whole fetch fails at once.
    Bootstrap(SessionError),
    /// Still not 200 after a 401-triggered cookie refresh.
    Unauthorized(StatusCode),
    /// Any other non-200 status.
    Status(StatusCode),
    Transport(String),
    Parse(String),
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::Bootstrap(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Bootstrap(err) => write!(f, "Cookie bootstrap failed: {}", err),
            FetchError::Unauthorized(status) => {
                write!(f, "Still unauthorized after cookie refresh: {}", status)
            }
            FetchError::Status(status) => write!(f, "Unexpected status: {}", status),
            FetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<SessionError> for FetchError {
    fn from(err: SessionError) -> Self {
        FetchError::Bootstrap(err)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Snapshot not analyzable this cycle. Logged and skipped, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSkip {
    EmptyRecords,
    NoStrikes,
}

impl fmt::Display for AnalysisSkip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalysisSkip::EmptyRecords => write!(f, "No records in snapshot"),
            AnalysisSkip::NoStrikes => write!(f, "No strike prices in snapshot"),
        }
    }
}

impl std::error::Error for AnalysisSkip {}

/// Delivery failure from the notifier boundary.
#[derive(Debug)]
pub enum NotifyError {
    Request(String),
    Status(StatusCode),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotifyError::Request(msg) => write!(f, "Notify request error: {}", msg),
            NotifyError::Status(status) => write!(f, "Notify endpoint returned {}", status),
        }
    }
}

impl std::error::Error for NotifyError {}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Request(err.to_string())
    }
}

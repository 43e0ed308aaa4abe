use serde::Serialize;

const AUTO_HIDE_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A notification rendered as an `alert` at the bottom of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
    pub autohide_ms: u64,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message.into())
    }

    fn new(severity: Severity, message: String) -> Self {
        Self {
            severity,
            message,
            autohide_ms: AUTO_HIDE_MS,
        }
    }
}

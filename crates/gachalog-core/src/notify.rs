// User-facing toast messages.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Success,
    Error,
}

impl Severity {
    /// Icon marker shown in front of the message.
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Warning => "ⓘ",
            Severity::Success => "✔",
            Severity::Error => "✖",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Notification {
            severity,
            message: message.into(),
        }
    }

    /// `"{icon} {message}"`.
    pub fn display_text(&self) -> String {
        format!("{} {}", self.severity.icon(), self.message)
    }
}

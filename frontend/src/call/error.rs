use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Network response was not ok";
pub const UNKNOWN_FAILURE: &str = "Something went wrong";

/// Everything that can go wrong with one call request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Transport failed before any response arrived.
    #[error("{0}")]
    Network(String),

    #[error("Request timed out after {0} ms")]
    TimedOut(u32),

    /// Non-2xx response whose body carried a `message`.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Non-2xx response without a usable body.
    #[error("{}", GENERIC_FAILURE)]
    Unreadable { status: u16 },

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl CallError {
    /// Text shown to the visitor. Never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_FAILURE.to_string()
        } else {
            message
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CallError::Rejected { status, .. } | CallError::Unreadable { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = CallError::Rejected { status: 500, message: "busy".to_string() };
        assert_eq!(err.user_message(), "busy");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn unreadable_response_uses_generic_text() {
        let err = CallError::Unreadable { status: 502 };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn empty_fault_message_falls_back() {
        assert_eq!(CallError::Network(String::new()).user_message(), UNKNOWN_FAILURE);
        assert_eq!(CallError::Network("  ".to_string()).user_message(), UNKNOWN_FAILURE);
        assert_eq!(
            CallError::Network("Failed to fetch".to_string()).user_message(),
            "Failed to fetch"
        );
        assert_eq!(CallError::Network("x".to_string()).status(), None);
    }

    #[test]
    fn timeout_names_the_limit() {
        assert_eq!(CallError::TimedOut(15000).user_message(), "Request timed out after 15000 ms");
    }
}

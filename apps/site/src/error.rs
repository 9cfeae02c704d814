use thiserror::Error;

/// Reasons the data document could not be obtained.
///
/// All three kinds are handled the same way by the renderer: one logged diagnostic
/// and one fallback message in the research container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("malformed lab data: {0}")]
    Malformed(String),
}

impl LoadError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(error: serde_json::Error) -> Self {
        Self::Malformed(error.to_string())
    }
}

/// A render target refused a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render target error in #{container}: {message}")]
pub struct TargetError {
    pub container: &'static str,
    pub message: String,
}

impl TargetError {
    pub fn new(container: &'static str, message: impl Into<String>) -> Self {
        Self {
            container,
            message: message.into(),
        }
    }
}

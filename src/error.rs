use thiserror::Error;

/// Errors raised while building an environment or decoding actions.
///
/// Illegal moves are not errors: the transition engine reports them as a
/// normal `(false, state)` result.
///
/// # Examples
///
/// ```
/// use dragon_env::EnvError;
///
/// let error = EnvError::InvalidWorld("no goal position".to_string());
/// assert_eq!(format!("{}", error), "Invalid world: no goal position");
/// ```
#[derive(Error, Debug)]
pub enum EnvError {
    /// The world description is malformed or structurally inconsistent
    #[error("Invalid world: {0}")]
    InvalidWorld(String),

    /// An action symbol outside the known vocabulary
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A wrapper around standard IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for environment operations.
pub type Result<T> = std::result::Result<T, EnvError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_world_display() {
        let err = EnvError::InvalidWorld("two goals".to_string());
        assert_eq!(format!("{}", err), "Invalid world: two goals");
    }

    #[test]
    fn test_invalid_action_display() {
        let err = EnvError::InvalidAction("jump".to_string());
        assert_eq!(format!("{}", err), "Invalid action: jump");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = EnvError::from(io);
        assert!(err.source().is_some());
        assert!(format!("{}", err).starts_with("IO error:"));
    }
}

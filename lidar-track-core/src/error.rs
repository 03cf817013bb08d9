//! Error types for target reacquisition.

use thiserror::Error;

/// Errors raised by the tracking core.
///
/// None of these leave the controller in a corrupted state. Empty sensor
/// rings and degenerate geometry are handled inside a cycle; only invalid
/// elapsed time and invalid configuration reach the caller.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The sensor ring is empty, no probe can be issued
    #[error("no sensors available")]
    NoSensorsAvailable,

    /// Predicted point coincides with the probe origin
    #[error("predicted point coincides with probe origin")]
    DegenerateGeometry,

    /// Elapsed time was negative or not a number
    #[error("invalid elapsed time: {0}")]
    InvalidElapsedTime(f64),

    /// Configuration value out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", TrackError::NoSensorsAvailable),
            "no sensors available"
        );
        assert_eq!(
            format!("{}", TrackError::InvalidElapsedTime(-1.5)),
            "invalid elapsed time: -1.5"
        );
    }
}

use std::path::PathBuf;

use lidar_track_core::TrackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error(transparent)]
    Track(#[from] TrackError),
}

//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names and touch buttons to logical actions)
//! - Collaborator failures that must never stop the simulation

pub mod input;

pub use input::{Action, InputTracker};

use thiserror::Error;

/// Failures of the page around the game (DOM, GPU, audio)
///
/// None of these are fatal: the frame loop logs them and keeps simulating
/// with the affected collaborator switched off.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("browser window is not available")]
    NoWindow,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{0} has the wrong type")]
    WrongElementType(String),
    #[error("no compatible GPU adapter")]
    NoAdapter,
    #[error("GPU setup failed: {0}")]
    Gpu(String),
    #[error("audio unavailable: {0}")]
    Audio(String),
}

/// Log a collaborator failure and carry on without it
pub fn degrade<T>(result: Result<T, PlatformError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{} disabled: {}", what, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrade_swallows_errors() {
        let failed: Result<u32, PlatformError> = Err(PlatformError::NoAdapter);
        assert_eq!(degrade(failed, "Rendering"), None);
        assert_eq!(degrade(Ok::<_, PlatformError>(3), "Rendering"), Some(3));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PlatformError::MissingElement("canvas".into()).to_string(),
            "element #canvas not found"
        );
    }
}

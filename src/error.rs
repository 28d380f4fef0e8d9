use thiserror::Error;

use crate::gnc::phase::Phase;
use crate::vehicle::config::ConfigError;

/// Errors that stop the guidance loop.
///
/// Conditions absorbed inside a cycle (no ballistic solution, throttle
/// saturation, missing SAS modes) never surface here.
#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("no rendezvous target selected")]
    NoTarget,
    #[error("invalid guidance setup: {0}")]
    InvalidSetup(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("illegal phase transition {from:?} -> {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
    #[error("cycle limit of {0} reached before touchdown")]
    CycleLimit(u64),
}

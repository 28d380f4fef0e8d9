pub mod attitude;
pub mod controller;
pub mod event;
pub mod phase;
pub mod profile;
pub mod throttle;

pub use attitude::AttitudePolicy;
pub use controller::{CycleOutcome, LandingController, LandingReport};
pub use event::{EventKind, GuidanceEvent};
pub use phase::{AttitudeMode, Phase, PhaseState};
pub use profile::{ProfileInputs, SpeedProfile, SuicideBurnProfile};
pub use throttle::{saturate, ThrottleLaw};

pub mod physics;
pub mod dynamics;
pub mod vehicle;
mod gnc_mod;
pub mod sim;
pub mod io;
pub mod error;
pub mod vessel;

// The gnc module: expose gnc_mod as `gnc` publicly
pub mod gnc {
    pub use crate::gnc_mod::*;
}

pub use error::GuidanceError;
pub use gnc::{LandingController, LandingReport};
pub use vessel::Vessel;

pub mod types {
    pub use crate::dynamics::state::{Situation, VehicleState};
    pub use crate::physics::gravity::{BodyModel, G0};
    pub use crate::vehicle::config::GuidanceConfig;
    pub use crate::vehicle::engine::{EngineMount, ThrustModel};
}

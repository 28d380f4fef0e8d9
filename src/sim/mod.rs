pub mod integrator;
pub mod runner;
pub mod scenario;
pub mod vessel;

pub use runner::{simulate_landing, simulate_landing_with, LandingRun};
pub use scenario::{presets, Scenario, SimVehicle};
pub use vessel::{SimSample, SimVessel};

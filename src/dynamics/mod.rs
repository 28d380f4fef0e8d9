pub mod state;

pub use state::{Situation, VehicleState};

pub mod config;
pub mod engine;

pub use config::{ConfigError, GuidanceConfig};
pub use engine::{vehicle_radius, EngineMount, ThrustModel};

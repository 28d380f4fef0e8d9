use std::time::Duration;

use nalgebra::Vector3;
use thiserror::Error;

use crate::dynamics::state::Situation;
use crate::physics::geometry::Frame;
use crate::vehicle::engine::EngineMount;

/// Stability-assist hold modes the controller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SasMode {
    StabilityAssist,
    Radial,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActuatorError {
    #[error("SAS mode {0:?} is not available on this vessel")]
    ModeUnavailable(SasMode),
}

/// Telemetry and actuation interface of the vessel being landed.
///
/// Reads are snapshots; writes are fire-and-forget. Implement this to connect
/// the guidance loop to a real vehicle link or to a simulator.
pub trait Vessel {
    fn name(&self) -> &str;

    // --- telemetry ---------------------------------------------------------
    fn mass(&self) -> f64;
    /// Velocity relative to the central body, in the body frame (m/s).
    fn velocity(&self) -> Vector3<f64>;
    fn vertical_speed(&self) -> f64;
    /// Magnitude of velocity relative to the surface (m/s).
    fn speed(&self) -> f64;
    fn surface_altitude(&self) -> f64;
    /// Pitch above the local horizon, degrees.
    fn pitch(&self) -> f64;
    fn situation(&self) -> Situation;
    /// Lowest point of the vessel's bounding box along local up, relative to
    /// the point `surface_altitude` refers to (usually negative).
    fn lowest_point_offset(&self) -> f64;
    /// Position of the selected rendezvous target in the surface frame.
    fn target_position(&self) -> Option<Vector3<f64>>;
    /// Surface gravity of the body the vessel is orbiting, m/s^2.
    fn surface_gravity(&self) -> f64;
    fn engines(&self) -> Vec<EngineMount>;
    /// Widths of the liquid-fuel tanks across the vessel's long axis (m).
    fn fuel_tank_widths(&self) -> Vec<f64>;
    fn transform_direction(&self, dir: &Vector3<f64>, from: Frame, to: Frame) -> Vector3<f64>;

    // --- actuation ---------------------------------------------------------
    fn set_throttle(&mut self, throttle: f64);
    fn set_gear(&mut self, deployed: bool);
    fn set_brakes(&mut self, on: bool);
    fn set_rcs(&mut self, on: bool);
    fn set_sas(&mut self, on: bool);
    fn set_sas_mode(&mut self, mode: SasMode) -> Result<(), ActuatorError>;
    fn engage_autopilot(&mut self);
    fn disengage_autopilot(&mut self);
    fn set_autopilot_reference_frame(&mut self, frame: Frame);
    fn set_autopilot_roll(&mut self, roll_deg: f64);
    fn set_autopilot_direction(&mut self, dir: Vector3<f64>);

    /// Block until the next control cycle.
    fn sleep(&mut self, period: Duration) {
        std::thread::sleep(period);
    }
}

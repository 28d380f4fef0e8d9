use nalgebra::Vector3;

use crate::dynamics::state::VehicleState;
use crate::vehicle::config::GuidanceConfig;
use super::phase::{AttitudeMode, PhaseState};

// ---------------------------------------------------------------------------
// Attitude policy: desired pointing direction (surface frame)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct AttitudePolicy {
    /// Length of the up-axis bias while tracking the target.
    pub forward_bias: f64,
    /// Share of the target/prograde error fed back per cycle.
    pub error_blend: f64,
    /// Gain on the vertical retrograde component during the final burn.
    pub final_retro_gain: f64,
}

impl Default for AttitudePolicy {
    fn default() -> Self {
        Self { forward_bias: 2.0, error_blend: 0.5, final_retro_gain: 10.0 }
    }
}

impl AttitudePolicy {
    pub fn from_config(config: &GuidanceConfig) -> Self {
        Self {
            forward_bias: config.forward_bias,
            error_blend: config.error_blend,
            final_retro_gain: config.final_retro_gain,
        }
    }

    /// Pointing direction in the surface frame [up, north, east]. Not normalised;
    /// the autopilot only uses its direction.
    pub fn direction(&self, state: &VehicleState, phase: &PhaseState) -> Vector3<f64> {
        if phase.attitude_mode() == AttitudeMode::TargetTracking {
            if let Some(target) = state.target {
                return self.track_target(&target, &state.velocity);
            }
        }
        if state.is_descending() {
            self.retrograde(&state.velocity, phase.final_burn())
        } else {
            Vector3::x()
        }
    }

    /// Bias toward local up while nulling part of the angle between the
    /// velocity and the line of sight to the target.
    pub fn track_target(&self, target: &Vector3<f64>, velocity: &Vector3<f64>) -> Vector3<f64> {
        let target_dir = target.try_normalize(1e-9).unwrap_or_else(Vector3::zeros);
        let prograde = velocity.try_normalize(1e-9).unwrap_or_else(Vector3::zeros);
        let error = target_dir - prograde;
        Vector3::new(self.forward_bias, 0.0, 0.0) + error * self.error_blend
    }

    /// Anti-velocity, with the vertical component weighted up in the final burn.
    pub fn retrograde(&self, velocity: &Vector3<f64>, final_burn: bool) -> Vector3<f64> {
        let k = if final_burn { self.final_retro_gain } else { 1.0 };
        Vector3::new(-k * velocity.x, -velocity.y, -velocity.z)
    }
}

use nalgebra::Vector3;

use crate::physics::geometry::Frame;
use crate::vessel::Vessel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    Flying,
    Landed,
    Splashed,
    Other,
}

impl Situation {
    pub fn is_down(self) -> bool {
        matches!(self, Situation::Landed | Situation::Splashed)
    }
}

// ---------------------------------------------------------------------------
// Per-cycle telemetry snapshot
// ---------------------------------------------------------------------------

/// Telemetry captured once per control cycle. Read-only to the guidance core.
#[derive(Debug, Clone)]
pub struct VehicleState {
    pub mass: f64,                     // kg
    pub velocity: Vector3<f64>,        // m/s, surface frame [up, north, east]
    pub vertical_speed: f64,           // m/s, positive up
    pub ground_speed: f64,             // m/s, magnitude of surface velocity
    pub surface_altitude: f64,         // m
    pub pitch: f64,                    // deg above horizon
    pub bounding_box_offset: f64,      // m, lowest point relative to surface_altitude
    pub situation: Situation,
    pub target: Option<Vector3<f64>>,  // m, surface frame
}

impl VehicleState {
    pub fn capture<V: Vessel + ?Sized>(vessel: &V) -> Self {
        let velocity = vessel.transform_direction(&vessel.velocity(), Frame::Body, Frame::Surface);
        Self {
            mass: vessel.mass(),
            velocity,
            vertical_speed: vessel.vertical_speed(),
            ground_speed: vessel.speed(),
            surface_altitude: vessel.surface_altitude(),
            pitch: vessel.pitch(),
            bounding_box_offset: vessel.lowest_point_offset(),
            situation: vessel.situation(),
            target: vessel.target_position(),
        }
    }

    /// Height of the vessel's lowest point above the terrain, never negative.
    pub fn altitude(&self) -> f64 {
        (self.surface_altitude + self.bounding_box_offset).max(0.0)
    }

    pub fn is_descending(&self) -> bool {
        self.vertical_speed < 0.0
    }
}

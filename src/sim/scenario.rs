use nalgebra::Vector3;

use crate::physics::gravity::BodyModel;
use crate::vehicle::engine::EngineMount;

// ---------------------------------------------------------------------------
// Simulated landing scenarios
// ---------------------------------------------------------------------------

/// Vehicle definition for the in-process simulator.
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub name: String,
    pub dry_mass: f64,            // kg
    pub propellant_mass: f64,     // kg
    pub engines: Vec<EngineMount>,
    pub tank_widths: Vec<f64>,    // m
    pub lowest_point_offset: f64, // m, below the reference point (negative)
    pub slew_rate: f64,           // deg/s, autopilot turn rate
}

impl SimVehicle {
    pub fn total_mass(&self) -> f64 {
        self.dry_mass + self.propellant_mass
    }
}

/// Initial conditions and surroundings of one landing.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub body: BodyModel,
    pub vehicle: SimVehicle,
    pub altitude: f64,                 // m, reference point above terrain
    pub velocity: Vector3<f64>,        // m/s [up, north, east]
    /// Target on the ground, relative to the point below the vessel [north, east].
    pub target: Option<[f64; 2]>,
    pub site: (f64, f64),              // latitude, longitude (deg)
    pub radial_sas: bool,
    pub water: bool,
    pub dt: f64,                       // physics step, s
}

impl Scenario {
    pub fn target_position(&self) -> Option<Vector3<f64>> {
        self.target.map(|[n, e]| Vector3::new(0.0, n, e))
    }
}

pub mod presets {
    use super::*;
    use crate::physics::gravity::bodies;

    /// Small lander dropping onto the Moon from 8.5 km.
    pub fn lunar_hopper() -> Scenario {
        Scenario {
            name: "Lunar Hopper".into(),
            body: bodies::moon(),
            vehicle: SimVehicle {
                name: "Hopper".into(),
                dry_mass: 1_200.0,
                propellant_mass: 600.0,
                engines: vec![EngineMount::axial(9_000.0, 311.0)],
                tank_widths: vec![1.25],
                lowest_point_offset: -1.5,
                slew_rate: 30.0,
            },
            altitude: 8_500.0,
            velocity: Vector3::new(-60.0, 4.0, 0.0),
            target: Some([150.0, 0.0]),
            site: (0.7, 23.4),
            radial_sas: true,
            water: false,
            dt: 0.002,
        }
    }

    /// Spent booster returning through the atmosphere.
    pub fn kerbin_booster() -> Scenario {
        Scenario {
            name: "Kerbin Booster".into(),
            body: bodies::kerbin(),
            vehicle: SimVehicle {
                name: "Booster".into(),
                dry_mass: 8_000.0,
                propellant_mass: 4_000.0,
                engines: vec![EngineMount::axial(215_000.0, 300.0)],
                tank_widths: vec![2.5, 2.5],
                lowest_point_offset: -6.0,
                slew_rate: 20.0,
            },
            altitude: 9_000.0,
            velocity: Vector3::new(-220.0, 0.0, 30.0),
            target: Some([0.0, 600.0]),
            site: (-0.1, -74.6),
            radial_sas: false,
            water: false,
            dt: 0.002,
        }
    }

    pub fn by_name(name: &str) -> Option<Scenario> {
        match name {
            "lunar" | "lunar_hopper" => Some(lunar_hopper()),
            "kerbin" | "kerbin_booster" => Some(kerbin_booster()),
            _ => None,
        }
    }
}

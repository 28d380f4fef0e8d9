use serde::Deserialize;

// ---------------------------------------------------------------------------
// Engines and effective thrust
// ---------------------------------------------------------------------------

/// One engine as mounted on the vessel.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EngineMount {
    pub active: bool,
    pub available_thrust: f64, // N
    /// Component of the engine's thrust direction along the vessel's long axis
    /// (1.0 = aligned, less for canted engines).
    pub axial_component: f64,
    #[serde(default = "default_isp")]
    pub isp: f64,              // s
}

fn default_isp() -> f64 {
    300.0
}

impl EngineMount {
    pub fn axial(available_thrust: f64, isp: f64) -> Self {
        Self { active: true, available_thrust, axial_component: 1.0, isp }
    }
}

/// Thrust available along the vessel's body axis. Fixed for the descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustModel {
    pub effective_thrust: f64, // N, >= 0
}

impl ThrustModel {
    pub fn new(effective_thrust: f64) -> Self {
        Self { effective_thrust: effective_thrust.max(0.0) }
    }

    /// Sum of the active engines' available thrust projected onto the long axis.
    pub fn from_engines(engines: &[EngineMount]) -> Self {
        let thrust = engines
            .iter()
            .filter(|e| e.active)
            .map(|e| e.available_thrust * e.axial_component)
            .sum();
        Self::new(thrust)
    }

    /// Thrust derated by the engine threshold, as handed to the speed profile.
    pub fn derated(&self, eng_threshold: f64) -> f64 {
        self.effective_thrust * eng_threshold
    }

    /// Acceleration available at full throttle (m/s^2).
    pub fn specific_thrust(&self, mass: f64) -> f64 {
        if mass > 0.0 {
            self.effective_thrust / mass
        } else {
            0.0
        }
    }
}

/// Vehicle radius used by the speed profile: half the widest fuel tank,
/// never less than 0.25 m.
pub fn vehicle_radius(tank_widths: &[f64]) -> f64 {
    let widest = tank_widths.iter().map(|w| w.abs()).fold(0.5_f64, f64::max);
    widest / 2.0
}

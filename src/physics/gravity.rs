use serde::Deserialize;

use crate::physics::aerodynamics::Atmosphere;

pub const G0: f64 = 9.80665; // standard gravity, m/s^2 (Isp conversion only)

/// Gravity model of the body being landed on. Immutable for a session.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyModel {
    pub name: String,
    pub surface_gravity: f64,             // m/s^2, > 0
    #[serde(default)]
    pub atmosphere: Option<Atmosphere>,
}

impl BodyModel {
    /// Airless body with the given surface gravity.
    pub fn new(name: impl Into<String>, surface_gravity: f64) -> Self {
        Self { name: name.into(), surface_gravity, atmosphere: None }
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = Some(atmosphere);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.surface_gravity.is_finite() && self.surface_gravity > 0.0
    }

    /// Constant free-fall deceleration used for the gear-deployment estimate.
    ///
    /// Half of surface gravity, independent of thrust. This is a modelling
    /// simplification inherited from the flight-tested controller and is kept as-is.
    pub fn gear_estimate_deceleration(&self) -> f64 {
        -0.5 * self.surface_gravity
    }

    /// Air density at `altitude` (0 on airless bodies).
    pub fn density(&self, altitude: f64) -> f64 {
        self.atmosphere.as_ref().map_or(0.0, |atm| atm.density(altitude))
    }
}

pub mod bodies {
    use super::*;

    pub fn moon() -> BodyModel {
        BodyModel::new("Moon", 1.625)
    }

    pub fn mun() -> BodyModel {
        BodyModel::new("Mun", 1.63)
    }

    pub fn kerbin() -> BodyModel {
        BodyModel::new("Kerbin", 9.81).with_atmosphere(Atmosphere {
            surface_density: 1.225,
            scale_height: 5_600.0,
        })
    }
}

use nalgebra::Vector3;
use serde::Deserialize;

/// Exponential atmosphere: `rho(h) = rho0 * exp(-h / H)`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Atmosphere {
    pub surface_density: f64, // kg/m^3
    pub scale_height: f64,    // m
}

impl Atmosphere {
    /// Clamps negative altitudes to the surface.
    pub fn density(&self, altitude: f64) -> f64 {
        let h = altitude.max(0.0);
        if self.scale_height <= 0.0 {
            return 0.0;
        }
        self.surface_density * (-h / self.scale_height).exp()
    }
}

/// Blunt-body drag coefficient for a vertically descending stage.
pub const CD_TAIL_FIRST: f64 = 1.0;

/// Frontal area of a cylinder of the given radius, m^2.
pub fn frontal_area(radius: f64) -> f64 {
    std::f64::consts::PI * radius * radius
}

/// Quadratic drag force opposing velocity.
pub fn drag_force(vel: &Vector3<f64>, density: f64, cd: f64, area: f64) -> Vector3<f64> {
    let speed = vel.norm();
    if speed > 1e-6 && density > 0.0 {
        let q_dyn = 0.5 * density * speed * speed;
        -vel.normalize() * q_dyn * cd * area
    } else {
        Vector3::zeros()
    }
}

/// Drag deceleration magnitude for a speed (scalar form, always >= 0).
pub fn drag_accel(speed: f64, density: f64, cd: f64, area: f64, mass: f64) -> f64 {
    if mass <= 0.0 {
        return 0.0;
    }
    0.5 * density * speed * speed * cd * area / mass
}

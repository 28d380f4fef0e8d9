use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Point-mass state and RK4 step (surface frame, flat ground)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct PointMass {
    pub pos: Vector3<f64>, // m   [up, north, east], relative to the landing site
    pub vel: Vector3<f64>, // m/s
    pub mass: f64,         // kg
}

#[derive(Debug, Clone, Copy)]
pub struct Deriv {
    pub dpos: Vector3<f64>,
    pub dvel: Vector3<f64>,
    pub dmass: f64,
}

impl PointMass {
    /// Advance state by a derivative scaled by dt (used inside RK4).
    pub fn apply(&self, d: &Deriv, dt: f64) -> PointMass {
        PointMass {
            pos: self.pos + d.dpos * dt,
            vel: self.vel + d.dvel * dt,
            mass: (self.mass + d.dmass * dt).max(0.0),
        }
    }
}

/// Single RK4 step with the forcing held by `derivatives`.
pub fn rk4_step<F>(state: &PointMass, derivatives: F, dt: f64) -> PointMass
where
    F: Fn(&PointMass) -> Deriv,
{
    let k1 = derivatives(state);
    let k2 = derivatives(&state.apply(&k1, dt * 0.5));
    let k3 = derivatives(&state.apply(&k2, dt * 0.5));
    let k4 = derivatives(&state.apply(&k3, dt));

    PointMass {
        pos: state.pos + (k1.dpos + 2.0 * k2.dpos + 2.0 * k3.dpos + k4.dpos) * (dt / 6.0),
        vel: state.vel + (k1.dvel + 2.0 * k2.dvel + 2.0 * k3.dvel + k4.dvel) * (dt / 6.0),
        mass: (state.mass + (k1.dmass + 2.0 * k2.dmass + 2.0 * k3.dmass + k4.dmass) * (dt / 6.0))
            .max(0.0),
    }
}

use crate::error::GuidanceError;
use crate::physics::aerodynamics::{drag_accel, frontal_area, CD_TAIL_FIRST};
use crate::physics::gravity::BodyModel;

// ---------------------------------------------------------------------------
// Reference vertical-speed profile
// ---------------------------------------------------------------------------

/// Target vertical speed (m/s, negative = down) for the remaining height above
/// the hover point.
pub trait SpeedProfile {
    fn get_speed(&self, remaining_altitude: f64) -> f64;
}

impl<F: Fn(f64) -> f64> SpeedProfile for F {
    fn get_speed(&self, remaining_altitude: f64) -> f64 {
        self(remaining_altitude)
    }
}

/// What a profile is built from, sampled at the end of the wait phase.
#[derive(Debug, Clone)]
pub struct ProfileInputs {
    pub radius: f64,      // m
    pub mass: f64,        // kg
    pub thrust: f64,      // N, already derated by the engine threshold
    pub altitude: f64,    // m
    pub final_speed: f64, // m/s
    pub body: BodyModel,
}

/// Braking curve obtained by integrating a full-thrust descent backward from
/// touchdown at `final_speed`. Mass is held at its initial value, so the real
/// (lighter) vehicle always has margin over the curve.
#[derive(Debug, Clone)]
pub struct SuicideBurnProfile {
    final_speed: f64,
    // (height above touchdown point, vertical speed), height ascending
    table: Vec<(f64, f64)>,
}

const PROFILE_DT: f64 = 0.02; // s
const PROFILE_MAX_STEPS: usize = 500_000;

impl SuicideBurnProfile {
    pub fn new(inputs: &ProfileInputs) -> Result<Self, GuidanceError> {
        if !(inputs.mass > 0.0) || !inputs.body.is_valid() {
            return Err(GuidanceError::InvalidSetup("profile needs positive mass and gravity".into()));
        }
        let accel = inputs.thrust / inputs.mass;
        let g = inputs.body.surface_gravity;
        if !(accel > g) {
            return Err(GuidanceError::InvalidSetup(format!(
                "thrust-to-weight {:.2} cannot arrest a descent",
                accel / g
            )));
        }

        let area = frontal_area(inputs.radius);
        let deriv = |h: f64, v: f64| -> (f64, f64) {
            let drag = drag_accel(v, inputs.body.density(h), CD_TAIL_FIRST, area, inputs.mass);
            // v < 0 on the way down, so drag acts upward
            (v, accel - g + drag)
        };

        let top = inputs.altitude.max(0.0) * 1.1 + 100.0;
        let (mut h, mut v) = (0.0_f64, inputs.final_speed.min(0.0));
        let mut table = vec![(h, v)];
        let dt = -PROFILE_DT;

        for _ in 0..PROFILE_MAX_STEPS {
            if h >= top {
                break;
            }
            let (k1h, k1v) = deriv(h, v);
            let (k2h, k2v) = deriv(h + k1h * dt * 0.5, v + k1v * dt * 0.5);
            let (k3h, k3v) = deriv(h + k2h * dt * 0.5, v + k2v * dt * 0.5);
            let (k4h, k4v) = deriv(h + k3h * dt, v + k3v * dt);
            let nh = h + (k1h + 2.0 * k2h + 2.0 * k3h + k4h) * (dt / 6.0);
            let nv = v + (k1v + 2.0 * k2v + 2.0 * k3v + k4v) * (dt / 6.0);
            if !(nh > h) || !nv.is_finite() {
                break;
            }
            h = nh;
            v = nv;
            table.push((h, v));
        }

        log::debug!(
            "speed profile: {} samples up to {:.0} m, {:.1} m/s at top",
            table.len(),
            h,
            v
        );
        Ok(Self { final_speed: inputs.final_speed.min(0.0), table })
    }

    pub fn top(&self) -> f64 {
        self.table.last().map_or(0.0, |&(h, _)| h)
    }
}

impl SpeedProfile for SuicideBurnProfile {
    fn get_speed(&self, remaining_altitude: f64) -> f64 {
        if !(remaining_altitude > 0.0) {
            return self.final_speed;
        }
        let idx = self.table.partition_point(|&(h, _)| h < remaining_altitude);
        if idx == 0 {
            return self.final_speed;
        }
        match self.table.get(idx) {
            Some(&(h1, v1)) => {
                let (h0, v0) = self.table[idx - 1];
                let frac = (remaining_altitude - h0) / (h1 - h0);
                v0 + frac * (v1 - v0)
            }
            None => self.table.last().map_or(self.final_speed, |&(_, v)| v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::gravity::bodies;

    fn inputs(body: BodyModel) -> ProfileInputs {
        ProfileInputs {
            radius: 1.25,
            mass: 10_000.0,
            thrust: 200_000.0,
            altitude: 5_000.0,
            final_speed: -2.0,
            body,
        }
    }

    #[test]
    fn vacuum_profile_matches_constant_deceleration() {
        let i = inputs(bodies::mun());
        let p = SuicideBurnProfile::new(&i).unwrap();
        let a_net = i.thrust / i.mass - i.body.surface_gravity;
        for h in [10.0, 250.0, 3000.0] {
            let expected = -(4.0 + 2.0 * a_net * h).sqrt();
            let got = p.get_speed(h);
            assert!((got - expected).abs() < 0.05, "h={h}: {got} vs {expected}");
        }
    }

    #[test]
    fn faster_allowed_higher_up() {
        let p = SuicideBurnProfile::new(&inputs(bodies::kerbin())).unwrap();
        assert!(p.get_speed(2000.0) < p.get_speed(200.0));
        assert!(p.get_speed(200.0) < p.get_speed(20.0));
    }

    #[test]
    fn drag_allows_faster_descent() {
        let vac = SuicideBurnProfile::new(&inputs(BodyModel::new("vac", 9.81))).unwrap();
        let air = SuicideBurnProfile::new(&inputs(bodies::kerbin())).unwrap();
        assert!(air.get_speed(3000.0) < vac.get_speed(3000.0));
    }

    #[test]
    fn touchdown_and_beyond_table() {
        let p = SuicideBurnProfile::new(&inputs(bodies::moon())).unwrap();
        assert_eq!(p.get_speed(0.0), -2.0);
        assert_eq!(p.get_speed(-15.0), -2.0);
        assert!(p.top() >= 5_600.0);
        assert!((p.get_speed(1e9) - p.get_speed(p.top())).abs() < 1e-9);
    }

    #[test]
    fn underpowered_vehicle_is_rejected() {
        let mut i = inputs(bodies::kerbin());
        i.thrust = 50_000.0;
        assert!(matches!(SuicideBurnProfile::new(&i), Err(GuidanceError::InvalidSetup(_))));
    }

    #[test]
    fn closures_are_profiles() {
        let p = |h: f64| -h / 10.0;
        assert_eq!(p.get_speed(100.0), -10.0);
    }
}

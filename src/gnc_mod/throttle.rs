use crate::physics::gravity::BodyModel;
use crate::vehicle::engine::ThrustModel;

// ---------------------------------------------------------------------------
// Throttle law: desired vertical acceleration -> throttle fraction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct ThrottleLaw {
    thrust: ThrustModel,
    surface_gravity: f64,
}

impl ThrottleLaw {
    pub fn new(thrust: ThrustModel, body: &BodyModel) -> Self {
        Self { thrust, surface_gravity: body.surface_gravity }
    }

    /// Unclamped throttle that cancels gravity and adds `accel * gain` of
    /// vertical acceleration, given the thrust axis at `pitch_deg` above the
    /// horizon and the current `mass`.
    ///
    /// Near-horizontal attitudes make the result unbounded (or NaN with zero
    /// thrust); callers pass it through [`saturate`].
    pub fn compute(&self, accel: f64, pitch_deg: f64, gain: f64, mass: f64) -> f64 {
        let aeng = self.thrust.specific_thrust(mass);
        (self.surface_gravity + accel * gain) / (aeng * pitch_deg.to_radians().sin())
    }
}

/// Bound a throttle command to [0, 1]. Non-finite values command zero thrust.
pub fn saturate(throttle: f64) -> f64 {
    if throttle.is_nan() {
        0.0
    } else {
        throttle.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn law() -> ThrottleLaw {
        ThrottleLaw::new(ThrustModel::new(20_000.0), &BodyModel::new("T", 9.81))
    }

    // gravity-cancelling throttle with no correction term
    fn hover(l: &ThrottleLaw, pitch_deg: f64, mass: f64) -> f64 {
        l.compute(0.0, pitch_deg, 1.0, mass)
    }

    #[test]
    fn hover_throttle_cancels_gravity() {
        let t = law().compute(0.0, 90.0, 10.0, 1000.0);
        assert!((t - 0.4905).abs() < 1e-9, "got {t}");
    }

    #[test]
    fn tilted_thrust_needs_more_throttle() {
        let l = law();
        assert!(hover(&l, 45.0, 1000.0) > hover(&l, 90.0, 1000.0));
        let expected = 0.4905 / 45f64.to_radians().sin();
        assert!((hover(&l, 45.0, 1000.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn monotonic_in_desired_acceleration() {
        let l = law();
        let mut prev = f64::NEG_INFINITY;
        for i in -50..50 {
            let t = l.compute(i as f64 * 0.5, 70.0, 5.0, 1200.0);
            assert!(t > prev);
            prev = t;
        }
    }

    #[test]
    fn lighter_vehicle_needs_less_throttle() {
        let l = law();
        assert!(hover(&l, 90.0, 500.0) < hover(&l, 90.0, 1000.0));
    }

    #[test]
    fn horizontal_attitude_saturates() {
        let raw = law().compute(0.0, 0.0, 10.0, 1000.0);
        assert!(!raw.is_finite() || raw.abs() > 1e6);
        assert_eq!(saturate(raw), 1.0);
    }

    #[test]
    fn saturate_bounds_and_nan() {
        assert_eq!(saturate(-3.0), 0.0);
        assert_eq!(saturate(0.25), 0.25);
        assert_eq!(saturate(7.0), 1.0);
        assert_eq!(saturate(f64::NAN), 0.0);
        assert_eq!(saturate(f64::NEG_INFINITY), 0.0);
    }
}

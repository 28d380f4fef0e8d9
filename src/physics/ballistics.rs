use thiserror::Error;

// ---------------------------------------------------------------------------
// Ballistic time-to-impact
// ---------------------------------------------------------------------------

/// The fall equation has no real solution for the given inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("no real time-to-impact for a={deceleration}, v={velocity}, h={height}")]
pub struct DomainError {
    pub deceleration: f64,
    pub velocity: f64,
    pub height: f64,
}

/// Time until `height` is consumed under constant `deceleration` (m/s^2, < 0)
/// starting at vertical `velocity` (m/s, negative = falling).
///
/// Solves `height = -velocity*t - deceleration*t^2` and returns the larger root
/// of `(-v ± sqrt(v^2 - 4*a*h)) / (2*a)`. A negative discriminant, a zero
/// deceleration or non-finite inputs yield [`DomainError`]; the result is never NaN.
pub fn time_to_impact(deceleration: f64, velocity: f64, height: f64) -> Result<f64, DomainError> {
    let err = DomainError { deceleration, velocity, height };
    if !(deceleration.is_finite() && velocity.is_finite() && height.is_finite()) {
        return Err(err);
    }
    if deceleration.abs() < f64::EPSILON {
        return Err(err);
    }

    let disc = velocity * velocity - 4.0 * deceleration * height;
    if disc < 0.0 {
        return Err(err);
    }
    let d = disc.sqrt();

    let t1 = (-velocity + d) / (2.0 * deceleration);
    let t2 = (-velocity - d) / (2.0 * deceleration);
    Ok(t1.max(t2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(a: f64, v: f64, h: f64, t: f64) -> f64 {
        -v * t - a * t * t - h
    }

    #[test]
    fn falling_vehicle_root_substitutes_back() {
        let (a, v, h) = (-4.905, -50.0, 2000.0);
        let t = time_to_impact(a, v, h).unwrap();
        assert!((t - 15.727).abs() < 1e-2, "expected ~15.73 s, got {t}");
        assert!(residual(a, v, h, t).abs() < 1e-6);
    }

    #[test]
    fn returns_larger_root() {
        let (a, v, h) = (-1.625, 12.0, 300.0);
        let t = time_to_impact(a, v, h).unwrap();
        let d = (v * v - 4.0 * a * h).sqrt();
        let other = (-v + d) / (2.0 * a);
        assert!(t >= other);
        assert!(residual(a, v, h, t).abs() < 1e-6);
    }

    #[test]
    fn roots_reproduce_height_over_a_grid() {
        for &a in &[-0.8, -4.905, -12.0] {
            for &v in &[-120.0, -20.0, 0.0, 15.0] {
                for &h in &[0.0, 5.0, 800.0, 9000.0] {
                    let t = time_to_impact(a, v, h).unwrap();
                    assert!(t.is_finite());
                    let err = residual(a, v, h, t).abs();
                    assert!(err < 1e-6 * h.max(1.0), "a={a} v={v} h={h} residual {err}");
                }
            }
        }
    }

    #[test]
    fn at_ground_level_with_zero_speed() {
        assert_eq!(time_to_impact(-4.9, 0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn negative_discriminant_is_domain_error() {
        // v^2 < 4*a*h
        let r = time_to_impact(2.0, 3.0, 10.0);
        assert!(r.is_err());
        let r = time_to_impact(-4.905, 5.0, -100.0);
        assert!(r.is_err());
    }

    #[test]
    fn zero_or_nan_deceleration_is_domain_error() {
        assert!(time_to_impact(0.0, -10.0, 100.0).is_err());
        assert!(time_to_impact(f64::NAN, -10.0, 100.0).is_err());
        assert!(time_to_impact(-4.9, f64::INFINITY, 100.0).is_err());
    }
}

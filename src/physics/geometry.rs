use nalgebra::{UnitQuaternion, Vector3};

// ---------------------------------------------------------------------------
// Reference frames
// ---------------------------------------------------------------------------
//
// Surface frame: origin at the vessel, x = local up, y = north, z = east.
// Body frame: fixed to the central body; the attitude actuator works in it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Surface,
    Body,
}

/// Fixed rotation taking surface-frame directions into the body frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameRotation {
    surface_to_body: UnitQuaternion<f64>,
}

impl FrameRotation {
    pub fn identity() -> Self {
        Self { surface_to_body: UnitQuaternion::identity() }
    }

    /// Rotation of the local surface frame at the given site on the body.
    pub fn at_site(latitude_deg: f64, longitude_deg: f64) -> Self {
        let lat = latitude_deg.to_radians();
        let lon = longitude_deg.to_radians();
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), lon)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -lat);
        Self { surface_to_body: q }
    }

    pub fn transform(&self, v: &Vector3<f64>, from: Frame, to: Frame) -> Vector3<f64> {
        match (from, to) {
            (Frame::Surface, Frame::Body) => self.surface_to_body * v,
            (Frame::Body, Frame::Surface) => self.surface_to_body.inverse() * v,
            _ => *v,
        }
    }
}

/// Unit vector along `v`, or zero when `v` has no usable direction.
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(1e-9).unwrap_or_else(Vector3::zeros)
}

/// Pitch above the local horizon (deg) of a surface-frame direction.
pub fn pitch_of(dir: &Vector3<f64>) -> f64 {
    let n = dir.norm();
    if n < 1e-12 {
        return 0.0;
    }
    (dir.x / n).clamp(-1.0, 1.0).asin().to_degrees()
}

/// Horizontal (north, east) distance of a surface-frame vector.
pub fn horizontal_norm(v: &Vector3<f64>) -> f64 {
    (v.y * v.y + v.z * v.z).sqrt()
}

pub mod aerodynamics;
pub mod ballistics;
pub mod geometry;
pub mod gravity;

pub use ballistics::{time_to_impact, DomainError};
pub use geometry::{Frame, FrameRotation};
pub use gravity::BodyModel;

//! 3D geometry for sight-line rendering.
//!
//! Provides axis rotations and the construction of line-of-sight segments
//! from angular observations, in both the sphere-relative and
//! flat-plane-relative coordinate families.

mod rotation;
mod sight;

pub use rotation::{rotate_x, rotate_y, rotate_z};
pub use sight::{flat_line_of_sight, globe_line_of_sight, Segment3, SIGHT_LENGTH};

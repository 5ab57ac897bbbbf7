//! Line-of-sight segment construction from angular observations.

use glam::DVec3;

use super::{rotate_x, rotate_y, rotate_z};
use crate::observation::Observation;

/// Length of the sighted-direction segment, in unit-sphere units.
pub const SIGHT_LENGTH: f64 = 2.0;

/// A 3D line of sight: the reference point and the sighted-direction point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment3 {
    /// Point the observation was taken from.
    pub origin: DVec3,
    /// Point marking the sighted direction.
    pub tip: DVec3,
}

/// Builds the direction part of the sight vector shared by both families:
/// a segment of [`SIGHT_LENGTH`] along local north, tilted out of the
/// horizon plane by `alt` and swung about the local vertical by `azm`.
fn sight_vector(azm: f64, alt: f64) -> DVec3 {
    let b = DVec3::new(0.0, SIGHT_LENGTH, 0.0);
    rotate_z(rotate_x(b, -alt), azm)
}

/// Constructs a sight segment in sphere-centered coordinates.
///
/// The local frame starts at the sphere's north pole (both points shifted
/// `+1` along Z onto the unit sphere), then is carried to the observation's
/// latitude (rotation about X by `lat`) and longitude plus the animation
/// rotation (rotation about Y by `-lon - rotation`).
///
/// Pure function of its inputs; any finite angles are valid.
pub fn globe_line_of_sight(obs: Observation, rotation: f64) -> Segment3 {
    let mut a = DVec3::ZERO;
    let mut b = sight_vector(obs.azm, obs.alt);
    a.z += 1.0;
    b.z += 1.0;

    let place = |v: DVec3| rotate_y(rotate_x(v, obs.lat), -obs.lon - rotation);
    Segment3 {
        origin: place(a),
        tip: place(b),
    }
}

/// Constructs a sight segment in flat-plane (azimuthal-equidistant)
/// coordinates.
///
/// Latitude becomes a linear offset along Y (`lat/PI - 0.5`); longitude and
/// the animation rotation spin the plane about Z.
///
/// Pure function of its inputs; any finite angles are valid.
pub fn flat_line_of_sight(obs: Observation, rotation: f64) -> Segment3 {
    let mut a = DVec3::ZERO;
    let mut b = sight_vector(obs.azm, obs.alt);

    let dy = obs.lat / std::f64::consts::PI - 0.5;
    a.y += dy;
    b.y += dy;

    let place = |v: DVec3| rotate_z(v, -obs.lon - rotation);
    Segment3 {
        origin: place(a),
        tip: place(b),
    }
}

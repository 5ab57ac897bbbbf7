//! Projection modes and their earth-grid/sight renderers.
//!
//! A [`RenderMode`] names one of the four projections; each resolves to a
//! [`Projection`] implementation pairing an earth-grid renderer with a
//! sight renderer over the same 3D data. The globe family projects the
//! unit sphere orthographically; the AE family is its azimuthal-equidistant
//! flat equivalent. Both come in a top-down ("up") and an equatorial
//! ("side") variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RenderConfig;
use crate::canvas::{Canvas, Rgba};
use crate::geometry::{flat_line_of_sight, globe_line_of_sight, Segment3};
use crate::observation::Observation;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Error returned when a mode name cannot be recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown render mode '{0}' (expected globeUp, globeSide, aeUp or aeSide)")]
pub struct ParseModeError(String);

/// The closed set of projection modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Top-down orthographic view of the sphere.
    GlobeUp,
    /// Equatorial orthographic view of the sphere.
    GlobeSide,
    /// Azimuthal-equidistant flat view, top-down.
    AeUp,
    /// Azimuthal-equidistant flat view, edge-on.
    AeSide,
}

impl RenderMode {
    /// All modes, in declaration order.
    pub fn all() -> [RenderMode; 4] {
        [
            RenderMode::GlobeUp,
            RenderMode::GlobeSide,
            RenderMode::AeUp,
            RenderMode::AeSide,
        ]
    }

    /// Returns the canonical name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::GlobeUp => "globeUp",
            RenderMode::GlobeSide => "globeSide",
            RenderMode::AeUp => "aeUp",
            RenderMode::AeSide => "aeSide",
        }
    }

    /// Resolves the mode to its projection implementation.
    ///
    /// Every mode carries both an earth renderer and a sight renderer; the
    /// pairing is fixed by construction.
    pub fn projection(&self) -> &'static dyn Projection {
        match self {
            RenderMode::GlobeUp => &GlobeUpProjection,
            RenderMode::GlobeSide => &GlobeSideProjection,
            RenderMode::AeUp => &AeUpProjection,
            RenderMode::AeSide => &AeSideProjection,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RenderMode {
    type Err = ParseModeError;

    /// Accepts the canonical camelCase names as well as kebab/snake-case
    /// variants, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "globeup" => Ok(RenderMode::GlobeUp),
            "globeside" => Ok(RenderMode::GlobeSide),
            "aeup" => Ok(RenderMode::AeUp),
            "aeside" => Ok(RenderMode::AeSide),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// One projection of the 3D scene onto the 2D surface.
///
/// `draw_earth` and `draw_sight` must interpret the same 3D data: a mode's
/// sight renderer projects the segments produced for that mode's family
/// with the same axis selection its grid implies.
pub trait Projection: Sync {
    /// Draws the sphere grid (or its flat equivalent) for the current
    /// animation rotation.
    fn draw_earth(&self, canvas: &mut dyn Canvas, config: &RenderConfig, rotation: f64);

    /// Draws one observation's sight line in the given color.
    fn draw_sight(
        &self,
        canvas: &mut dyn Canvas,
        config: &RenderConfig,
        observation: Observation,
        rotation: f64,
        color: Rgba,
    );
}

fn stroke_projected(
    canvas: &mut dyn Canvas,
    config: &RenderConfig,
    segment: Segment3,
    project: impl Fn(glam::DVec3) -> (f64, f64),
    color: Rgba,
) {
    let (ax, ay) = project(segment.origin);
    let (bx, by) = project(segment.tip);
    canvas.begin_path();
    canvas.move_to(ax, ay);
    canvas.line_to(bx, by);
    canvas.stroke(config.stroke_width(), color);
}

/// Top-down orthographic globe: meridians become radial lines, latitude
/// circles stay concentric with radius `cos(lat)`.
pub struct GlobeUpProjection;

impl Projection for GlobeUpProjection {
    fn draw_earth(&self, canvas: &mut dyn Canvas, config: &RenderConfig, rotation: f64) {
        let width = config.stroke_width();

        canvas.begin_path();
        for i in 0..config.n_longs {
            let angle = f64::from(i) / f64::from(config.n_longs) * TAU + rotation;
            canvas.move_to(0.0, 0.0);
            canvas.line_to(angle.sin(), -angle.cos());
        }
        canvas.stroke(width, config.earth_line_color);

        let n = config.n_lats / 2;
        for i in 0..n {
            let lat = f64::from(i) / f64::from(n) * FRAC_PI_2;
            canvas.begin_path();
            canvas.arc(0.0, 0.0, lat.cos(), 0.0, TAU);
            canvas.stroke(width, config.earth_line_color);
        }
    }

    fn draw_sight(
        &self,
        canvas: &mut dyn Canvas,
        config: &RenderConfig,
        observation: Observation,
        rotation: f64,
        color: Rgba,
    ) {
        let segment = globe_line_of_sight(observation, rotation);
        stroke_projected(canvas, config, segment, |p| (p.x, -p.z), color);
    }
}

/// Equatorial orthographic globe: latitude chords plus the meridians on the
/// viewer-facing hemisphere.
pub struct GlobeSideProjection;

impl GlobeSideProjection {
    fn meridian_curve(canvas: &mut dyn Canvas, angle: f64) {
        // Wrap to [-pi, pi); meridians more than a quarter turn away are on
        // the back of the sphere.
        let wrapped = (angle + PI).rem_euclid(TAU) - PI;
        if wrapped.abs() >= FRAC_PI_2 {
            return;
        }

        let sin = wrapped.sin();
        const STEPS: u32 = 90;
        canvas.move_to(0.0, -1.0);
        for i in 1..STEPS {
            let lat = (f64::from(i) / f64::from(STEPS) - 0.5) * PI;
            canvas.line_to(sin * lat.cos(), lat.sin());
        }
    }
}

impl Projection for GlobeSideProjection {
    fn draw_earth(&self, canvas: &mut dyn Canvas, config: &RenderConfig, rotation: f64) {
        canvas.begin_path();
        canvas.arc(0.0, 0.0, 1.0, 0.0, TAU);

        for i in 1..config.n_lats {
            let angle = PI * (f64::from(i) / f64::from(config.n_lats) - 0.5);
            let y = angle.sin();
            let dx = angle.cos();
            canvas.move_to(-dx, y);
            canvas.line_to(dx, y);
        }

        for i in 0..config.n_longs {
            let lon = TAU * (f64::from(i) / f64::from(config.n_longs) - 0.5);
            Self::meridian_curve(canvas, lon + rotation);
        }

        canvas.stroke(config.stroke_width(), config.earth_line_color);
    }

    fn draw_sight(
        &self,
        canvas: &mut dyn Canvas,
        config: &RenderConfig,
        observation: Observation,
        rotation: f64,
        color: Rgba,
    ) {
        let segment = globe_line_of_sight(observation, rotation);
        stroke_projected(canvas, config, segment, |p| (p.x, p.y), color);
    }
}

/// Azimuthal-equidistant top-down view: evenly spaced latitude circles and
/// radial meridians inside the unit outline.
pub struct AeUpProjection;

impl Projection for AeUpProjection {
    fn draw_earth(&self, canvas: &mut dyn Canvas, config: &RenderConfig, rotation: f64) {
        let width = config.stroke_width();

        canvas.begin_path();
        canvas.arc(0.0, 0.0, 1.0, 0.0, TAU);
        for i in 0..config.n_longs {
            let angle = f64::from(i) / f64::from(config.n_longs) * TAU + rotation;
            canvas.move_to(0.0, 0.0);
            canvas.line_to(angle.sin(), -angle.cos());
        }
        canvas.stroke(width, config.earth_line_color);

        for i in 1..config.n_lats {
            let radius = f64::from(i) / f64::from(config.n_lats);
            canvas.begin_path();
            canvas.arc(0.0, 0.0, radius, 0.0, TAU);
            canvas.stroke(width, config.earth_line_color);
        }
    }

    fn draw_sight(
        &self,
        canvas: &mut dyn Canvas,
        config: &RenderConfig,
        observation: Observation,
        rotation: f64,
        color: Rgba,
    ) {
        let segment = flat_line_of_sight(observation, rotation);
        stroke_projected(canvas, config, segment, |p| (p.x, p.y), color);
    }
}

/// Azimuthal-equidistant edge-on view: the plane collapses to a single
/// diameter line.
pub struct AeSideProjection;

impl Projection for AeSideProjection {
    fn draw_earth(&self, canvas: &mut dyn Canvas, config: &RenderConfig, _rotation: f64) {
        canvas.begin_path();
        canvas.move_to(-1.0, 0.0);
        canvas.line_to(1.0, 0.0);
        canvas.stroke(config.stroke_width(), config.earth_line_color);
    }

    fn draw_sight(
        &self,
        canvas: &mut dyn Canvas,
        config: &RenderConfig,
        observation: Observation,
        rotation: f64,
        color: Rgba,
    ) {
        let segment = flat_line_of_sight(observation, rotation);
        stroke_projected(canvas, config, segment, |p| (p.x, p.z), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCall, RecordingCanvas};

    fn test_config() -> RenderConfig {
        RenderConfig {
            n_longs: 4,
            n_lats: 4,
            end: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_name_parse_round_trip() {
        for mode in RenderMode::all() {
            assert_eq!(mode.name().parse::<RenderMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_accepts_kebab_case() {
        assert_eq!("globe-up".parse::<RenderMode>().unwrap(), RenderMode::GlobeUp);
        assert_eq!("AE-SIDE".parse::<RenderMode>().unwrap(), RenderMode::AeSide);
        assert!("mercator".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_every_mode_has_a_projection() {
        for mode in RenderMode::all() {
            // Resolving must not panic, and both halves must be callable.
            let projection = mode.projection();
            let mut canvas = RecordingCanvas::new(100, 100);
            let config = test_config();
            projection.draw_earth(&mut canvas, &config, 0.0);
            projection.draw_sight(
                &mut canvas,
                &config,
                Observation::new(0.0, 0.0, 0.0, 0.0),
                0.0,
                Rgba::rgb(255, 255, 255),
            );
            assert!(!canvas.is_empty());
        }
    }

    #[test]
    fn test_ae_side_earth_is_a_single_diameter() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let config = test_config();
        RenderMode::AeSide
            .projection()
            .draw_earth(&mut canvas, &config, 1.25);

        assert_eq!(
            canvas.calls(),
            &[
                DrawCall::BeginPath,
                DrawCall::MoveTo { x: -1.0, y: 0.0 },
                DrawCall::LineTo { x: 1.0, y: 0.0 },
                DrawCall::Stroke {
                    width: config.stroke_width(),
                    color: config.earth_line_color
                },
            ]
        );
    }

    #[test]
    fn test_globe_up_earth_stroke_counts() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let config = test_config();
        RenderMode::GlobeUp
            .projection()
            .draw_earth(&mut canvas, &config, 0.0);

        // One stroke for all meridians plus n_lats/2 latitude circles.
        let strokes = canvas.stroke_colors().len();
        assert_eq!(strokes, 1 + (config.n_lats / 2) as usize);

        let arcs = canvas
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::Arc { .. }))
            .count();
        assert_eq!(arcs, (config.n_lats / 2) as usize);
    }

    #[test]
    fn test_globe_up_latitude_radii_shrink_as_cosine() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let config = test_config();
        RenderMode::GlobeUp
            .projection()
            .draw_earth(&mut canvas, &config, 0.0);

        let radii: Vec<f64> = canvas
            .calls()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        // n_lats = 4 -> two circles: cos(0) and cos(pi/4).
        assert_eq!(radii.len(), 2);
        assert!((radii[0] - 1.0).abs() < 1e-12);
        assert!((radii[1] - (PI / 4.0).cos()).abs() < 1e-12);
    }

    #[test]
    fn test_globe_side_culls_back_meridians() {
        let config = RenderConfig {
            n_longs: 8,
            n_lats: 1,
            end: 0,
            ..Default::default()
        };

        let mut canvas = RecordingCanvas::new(100, 100);
        RenderMode::GlobeSide
            .projection()
            .draw_earth(&mut canvas, &config, 0.0);

        // Meridian polylines each start with MoveTo(0, -1); of the 8
        // meridians at rotation 0, angles ±pi/2 and beyond are culled,
        // leaving 3 visible.
        let meridian_starts = canvas
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::MoveTo { x, y } if *x == 0.0 && *y == -1.0))
            .count();
        assert_eq!(meridian_starts, 3);
    }

    #[test]
    fn test_globe_side_culling_wraps_over_full_turns() {
        let config = RenderConfig {
            n_longs: 8,
            n_lats: 1,
            end: 0,
            ..Default::default()
        };

        // Same picture a whole number of turns later, in both directions.
        for rotation in [0.0, TAU * 3.0, -TAU * 3.0] {
            let mut canvas = RecordingCanvas::new(100, 100);
            RenderMode::GlobeSide
                .projection()
                .draw_earth(&mut canvas, &config, rotation);
            let meridian_starts = canvas
                .calls()
                .iter()
                .filter(|call| matches!(call, DrawCall::MoveTo { x, y } if *x == 0.0 && *y == -1.0))
                .count();
            assert_eq!(meridian_starts, 3, "rotation {}", rotation);
        }
    }

    #[test]
    fn test_sight_projection_axes_differ_between_families() {
        let obs = Observation::new(0.4, 0.9, 1.3, 0.2);
        let rotation = 0.6;

        let globe = globe_line_of_sight(obs, rotation);
        let flat = flat_line_of_sight(obs, rotation);
        let config = test_config();

        let expected: [(RenderMode, (f64, f64)); 4] = [
            (RenderMode::GlobeUp, (globe.origin.x, -globe.origin.z)),
            (RenderMode::GlobeSide, (globe.origin.x, globe.origin.y)),
            (RenderMode::AeUp, (flat.origin.x, flat.origin.y)),
            (RenderMode::AeSide, (flat.origin.x, flat.origin.z)),
        ];

        for (mode, (x, y)) in expected {
            let mut canvas = RecordingCanvas::new(100, 100);
            mode.projection()
                .draw_sight(&mut canvas, &config, obs, rotation, Rgba::rgb(1, 2, 3));
            assert_eq!(
                canvas.calls()[1],
                DrawCall::MoveTo { x, y },
                "wrong 2D axes for {}",
                mode
            );
        }
    }
}

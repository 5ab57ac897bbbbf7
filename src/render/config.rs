//! Configuration for the frame renderer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RenderMode;
use crate::canvas::Rgba;

/// Errors raised when a configuration violates a renderer invariant.
///
/// Validation is eager: a bad configuration is rejected when it is handed
/// to the renderer, never silently carried into a frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Surface dimensions must be positive: {0}x{1}")]
    ZeroDimensions(u32, u32),
    #[error("Animation range start ({start}) exceeds end ({end})")]
    StartAfterEnd { start: usize, end: usize },
    #[error("Animation range end ({end}) exceeds observation count ({count})")]
    EndPastObservations { end: usize, count: usize },
    #[error("Visible radius must be positive and finite: {0}")]
    InvalidVisibleRadius(f64),
    #[error("Line width must be positive and finite: {0}")]
    InvalidLineWidth(f64),
    #[error("Trail opacity must be within [0, 1]: {0}")]
    OpacityOutOfRange(f64),
    #[error("Grid line counts must be at least 1: {longs} longitudes, {lats} latitudes")]
    ZeroGridLines { longs: u32, lats: u32 },
    #[error("Per-frame rotation must be finite: {0}")]
    NonFiniteRotation(f64),
}

/// Visual and animation parameters read during a frame render.
///
/// All values may be replaced between frames via
/// [`FrameRenderer::set_config`](super::FrameRenderer::set_config), which
/// revalidates; a configuration is never mutated mid-frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// First frame of the trail/animation range.
    pub start: usize,
    /// One past the last frame of the animation range.
    pub end: usize,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Rotation increment per frame index, in degrees.
    pub rot_per_frame: f64,
    /// Active projection.
    pub mode: RenderMode,
    /// Whether prior observations are drawn as a fading trail.
    pub cumulative: bool,
    /// Suppress observations whose altitude is below the horizon.
    pub hide_negative_alt: bool,
    /// Normalized-to-pixel scale factor of the view transform.
    pub visible_rad: f64,
    pub background_color: Rgba,
    pub earth_line_color: Rgba,
    pub prev_sight_color: Rgba,
    pub curr_sight_color: Rgba,
    /// Number of longitude grid lines.
    pub n_longs: u32,
    /// Number of latitude grid lines.
    pub n_lats: u32,
    /// Stroke width for grid and sights, in normalized units.
    pub line_width: f64,
    /// Trail fade opacity in [0, 1].
    pub prev_opacity: f64,
    /// Draw the angle readout overlay.
    pub show_legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            start: 0,
            end: 24,
            width: 800,
            height: 600,
            rot_per_frame: 15.0,
            mode: RenderMode::GlobeUp,
            cumulative: true,
            hide_negative_alt: false,
            visible_rad: 200.0,
            background_color: Rgba::rgb(0x33, 0x33, 0x33),
            earth_line_color: Rgba::rgb(0x00, 0x77, 0xff),
            prev_sight_color: Rgba::rgb(0xff, 0xff, 0xff),
            curr_sight_color: Rgba::rgb(0xff, 0xff, 0xff),
            n_longs: 32,
            n_lats: 32,
            line_width: 1.0,
            prev_opacity: 0.2,
            show_legend: false,
        }
    }
}

impl RenderConfig {
    /// Checks every invariant against the observation sequence this
    /// configuration will render.
    pub fn validate(&self, observation_count: usize) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimensions(self.width, self.height));
        }
        if self.start > self.end {
            return Err(ConfigError::StartAfterEnd {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > observation_count {
            return Err(ConfigError::EndPastObservations {
                end: self.end,
                count: observation_count,
            });
        }
        if !(self.visible_rad.is_finite() && self.visible_rad > 0.0) {
            return Err(ConfigError::InvalidVisibleRadius(self.visible_rad));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }
        if !(0.0..=1.0).contains(&self.prev_opacity) {
            return Err(ConfigError::OpacityOutOfRange(self.prev_opacity));
        }
        if self.n_longs == 0 || self.n_lats == 0 {
            return Err(ConfigError::ZeroGridLines {
                longs: self.n_longs,
                lats: self.n_lats,
            });
        }
        if !self.rot_per_frame.is_finite() {
            return Err(ConfigError::NonFiniteRotation(self.rot_per_frame));
        }
        Ok(())
    }

    /// Animation rotation for a frame index, in radians.
    pub fn rotation(&self, frame: usize) -> f64 {
        frame as f64 * self.rot_per_frame.to_radians()
    }

    /// Stroke width in normalized units, sized so one configured unit maps
    /// to roughly one device pixel under the view transform.
    pub fn stroke_width(&self) -> f64 {
        self.line_width / self.visible_rad
    }
}

//! Per-frame rendering and trail replay.

use glam::{DAffine2, DVec2};

use super::{ConfigError, RenderConfig};
use crate::canvas::{Canvas, Rgba};
use crate::observation::Observation;

const LEGEND_COLOR: Rgba = Rgba::rgb(0xaa, 0xaa, 0xaa);

/// Renders animation frames for one observation sequence.
///
/// The renderer owns its configuration; there is no process-wide state, so
/// multiple renderers with independent settings can coexist. Configuration
/// is validated on construction and on every replacement, and is read-only
/// for the duration of a frame (`render_frame` takes `&self`).
pub struct FrameRenderer {
    config: RenderConfig,
    observations: Vec<Observation>,
}

impl FrameRenderer {
    /// Creates a renderer over a fully materialized observation sequence.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the configuration violates an
    /// invariant (zero dimensions, `start > end`, range past the end of the
    /// sequence, bad scalars).
    pub fn new(config: RenderConfig, observations: Vec<Observation>) -> Result<Self, ConfigError> {
        config.validate(observations.len())?;
        Ok(Self {
            config,
            observations,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replaces the configuration between frames, revalidating it.
    pub fn set_config(&mut self, config: RenderConfig) -> Result<(), ConfigError> {
        config.validate(self.observations.len())?;
        self.config = config;
        Ok(())
    }

    /// The observation sequence, indexed by frame number.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Redraws the entire surface for frame `frame`.
    ///
    /// Out-of-range indices (negative or past the observation count) are a
    /// silent no-op, a clipping policy rather than an error: no draw call
    /// is issued and no failure is observable for any integer input.
    pub fn render_frame(&self, canvas: &mut dyn Canvas, frame: i64) {
        let Ok(index) = usize::try_from(frame) else {
            return;
        };
        if index >= self.observations.len() {
            return;
        }

        let config = &self.config;
        if canvas.size() != (config.width, config.height) {
            log::debug!(
                "resizing surface to {}x{} for frame {}",
                config.width,
                config.height,
                index
            );
            canvas.resize(config.width, config.height);
        }

        let rotation = config.rotation(index);
        canvas.clear(config.background_color);
        canvas.set_transform(view_transform(config));

        let projection = config.mode.projection();
        projection.draw_earth(canvas, config, rotation);

        if config.cumulative {
            let faded = config.prev_sight_color.with_opacity(config.prev_opacity);
            // Strictly increasing replay: later sights overdraw earlier ones.
            for j in config.start..index {
                let observation = self.observations[j];
                if observation.alt < 0.0 && config.hide_negative_alt {
                    continue;
                }
                projection.draw_sight(canvas, config, observation, config.rotation(j), faded);
            }
        }

        let current = self.observations[index];
        if current.alt >= 0.0 || !config.hide_negative_alt {
            projection.draw_sight(canvas, config, current, rotation, config.curr_sight_color);
        }

        if config.show_legend {
            draw_legend(canvas, current, rotation);
        }
    }
}

/// The normalized view transform: uniform scale by the visible radius, a
/// Y-flip, and the origin at the surface center, so coordinates in `[-1, 1]`
/// map onto the visible area.
fn view_transform(config: &RenderConfig) -> DAffine2 {
    let s = config.visible_rad;
    DAffine2::from_cols(
        DVec2::new(s, 0.0),
        DVec2::new(0.0, -s),
        DVec2::new(f64::from(config.width) / 2.0, f64::from(config.height) / 2.0),
    )
}

fn draw_legend(canvas: &mut dyn Canvas, observation: Observation, rotation: f64) {
    let (lat, lon, azm, alt) = observation.to_degrees();
    let text = format!(
        "rot={:.1}, lat={:.1}, lon={:.1}, azm={:.1}, alt={:.1}",
        rotation.to_degrees(),
        lat,
        lon,
        azm,
        alt
    );
    canvas.set_transform(DAffine2::IDENTITY);
    canvas.fill_text(&text, 10.0, 10.0, LEGEND_COLOR);
}

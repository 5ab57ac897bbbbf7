//! PNG export for rendered animation frames.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, RgbaImage};
use rayon::prelude::*;
use thiserror::Error;

use crate::canvas::RasterCanvas;
use crate::render::FrameRenderer;

/// Errors that can occur during frame export.
#[derive(Error, Debug)]
pub enum FrameExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Options for PNG frame export.
#[derive(Debug, Clone)]
pub struct FrameExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for FrameExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Encodes a single rendered frame as an RGBA PNG.
pub fn export_frame_png(
    image: &RgbaImage,
    path: &Path,
    options: &FrameExportOptions,
) -> Result<(), FrameExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(())
}

/// Renders and exports every frame of the configured animation range.
///
/// Files are named `{base_name}_{frame:04}.png` under `output_dir`. Frames
/// are independent pure redraws, so each one is rendered on its own canvas
/// and the range is processed in parallel.
///
/// # Returns
/// The number of frames written; an empty range writes nothing and is not
/// an error.
pub fn export_animation_png(
    renderer: &FrameRenderer,
    output_dir: &Path,
    base_name: &str,
    options: &FrameExportOptions,
) -> Result<usize, FrameExportError> {
    std::fs::create_dir_all(output_dir)?;

    let config = renderer.config();
    let (start, end) = (config.start, config.end);

    (start..end).into_par_iter().try_for_each(|frame| {
        let mut canvas = RasterCanvas::new(config.width, config.height);
        renderer.render_frame(&mut canvas, frame as i64);

        let filename = format!("{}_{:04}.png", base_name, frame);
        export_frame_png(canvas.image(), &output_dir.join(filename), options)
    })?;

    Ok(end - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Observation;
    use crate::render::RenderConfig;
    use tempfile::tempdir;

    fn small_renderer(count: usize) -> FrameRenderer {
        let config = RenderConfig {
            width: 32,
            height: 32,
            visible_rad: 12.0,
            end: count,
            n_longs: 4,
            n_lats: 4,
            ..Default::default()
        };
        let observations = (0..count)
            .map(|i| Observation::new(0.3, 0.2 * i as f64, 1.0, 0.5))
            .collect();
        FrameRenderer::new(config, observations).unwrap()
    }

    #[test]
    fn test_export_frame_png() {
        let renderer = small_renderer(1);
        let mut canvas = RasterCanvas::new(32, 32);
        renderer.render_frame(&mut canvas, 0);

        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        export_frame_png(canvas.image(), &path, &FrameExportOptions::default()).unwrap();

        assert!(path.exists());
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_export_animation_writes_every_frame() {
        let renderer = small_renderer(3);
        let dir = tempdir().unwrap();

        let written =
            export_animation_png(&renderer, dir.path(), "obs", &FrameExportOptions::default())
                .unwrap();

        assert_eq!(written, 3);
        for frame in 0..3 {
            let path = dir.path().join(format!("obs_{:04}.png", frame));
            assert!(path.exists(), "missing frame {}", frame);
        }
    }

    #[test]
    fn test_export_empty_range_writes_nothing() {
        let mut renderer = small_renderer(3);
        let mut config = renderer.config().clone();
        config.start = 2;
        config.end = 2;
        renderer.set_config(config).unwrap();

        let dir = tempdir().unwrap();
        let written =
            export_animation_png(&renderer, dir.path(), "obs", &FrameExportOptions::default())
                .unwrap();
        assert_eq!(written, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_exported_frame_decodes_back() {
        let renderer = small_renderer(1);
        let mut canvas = RasterCanvas::new(32, 32);
        renderer.render_frame(&mut canvas, 0);

        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        export_frame_png(canvas.image(), &path, &FrameExportOptions::default()).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (32, 32));
        // Background fill must survive the round trip.
        assert_eq!(decoded.get_pixel(0, 0).0, [0x33, 0x33, 0x33, 0xff]);
    }
}

//! Image-backed canvas implementation.
//!
//! Records path points under the current transform, flattens arcs to
//! polylines, and strokes segments as thick antialiased lines with
//! source-over alpha blending into an RGBA8 buffer.

use glam::{DAffine2, DVec2};
use image::RgbaImage;

use super::{Canvas, Rgba};

const ARC_STEPS: usize = 90;

/// A [`Canvas`] that rasterizes into an [`RgbaImage`].
pub struct RasterCanvas {
    image: RgbaImage,
    transform: DAffine2,
    // Subpaths in device coordinates, transformed at recording time.
    path: Vec<Vec<DVec2>>,
}

impl RasterCanvas {
    /// Creates a canvas of the given pixel size with all channels zeroed.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            transform: DAffine2::IDENTITY,
            path: Vec::new(),
        }
    }

    /// The rendered image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the canvas, returning the rendered image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Uniform scale factor of the current transform.
    fn device_scale(&self) -> f64 {
        self.transform.matrix2.determinant().abs().sqrt()
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba, coverage: f64) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = f64::from(color.a) / 255.0 * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let blend = |src: u8, dst: u8| -> u8 {
            (f64::from(src) * alpha + f64::from(dst) * (1.0 - alpha)).round() as u8
        };
        let out_a = alpha + f64::from(dst[3]) / 255.0 * (1.0 - alpha);
        dst[0] = blend(color.r, dst[0]);
        dst[1] = blend(color.g, dst[1]);
        dst[2] = blend(color.b, dst[2]);
        dst[3] = (out_a * 255.0).round() as u8;
    }

    fn stroke_segment(&mut self, p0: DVec2, p1: DVec2, half_width: f64, color: Rgba) {
        let pad = half_width + 1.0;
        let x_min = (p0.x.min(p1.x) - pad).floor() as i64;
        let x_max = (p0.x.max(p1.x) + pad).ceil() as i64;
        let y_min = (p0.y.min(p1.y) - pad).floor() as i64;
        let y_max = (p0.y.max(p1.y) + pad).ceil() as i64;

        let delta = p1 - p0;
        let len_sq = delta.length_squared();

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let point = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let t = if len_sq > 0.0 {
                    ((point - p0).dot(delta) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dist = (point - (p0 + delta * t)).length();
                let coverage = half_width + 0.5 - dist;
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    fn push_point(&mut self, point: DVec2) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push(point),
            // line_to without a preceding move_to starts a subpath
            None => self.path.push(vec![point]),
        }
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
        self.path.clear();
    }

    fn clear(&mut self, color: Rgba) {
        for pixel in self.image.pixels_mut() {
            *pixel = image::Rgba([color.r, color.g, color.b, color.a]);
        }
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.transform = transform;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let point = self.transform.transform_point2(DVec2::new(x, y));
        self.path.push(vec![point]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let point = self.transform.transform_point2(DVec2::new(x, y));
        self.push_point(point);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = end_angle - start_angle;
        let mut subpath = Vec::with_capacity(ARC_STEPS + 1);
        for i in 0..=ARC_STEPS {
            let angle = start_angle + sweep * i as f64 / ARC_STEPS as f64;
            let point = DVec2::new(cx + radius * angle.cos(), cy + radius * angle.sin());
            subpath.push(self.transform.transform_point2(point));
        }
        self.path.push(subpath);
    }

    fn stroke(&mut self, width: f64, color: Rgba) {
        let half_width = (width * self.device_scale() / 2.0).max(0.0);
        let subpaths = self.path.clone();
        for subpath in &subpaths {
            for pair in subpath.windows(2) {
                self.stroke_segment(pair[0], pair[1], half_width, color);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgba) {
        let mut cx = x.round() as i64;
        let cy = y.round() as i64;
        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..5u8 {
                        if bits & (1 << (4 - col)) != 0 {
                            self.blend_pixel(cx + i64::from(col), cy + row as i64, color, 1.0);
                        }
                    }
                }
            }
            cx += 6;
        }
    }
}

/// 5x7 glyph rows for the legend character set; 5 bits per row, MSB left.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'l' => [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'm' => [0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10101, 0b10101],
        'n' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'o' => [0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        't' => [0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110],
        'z' => [0b00000, 0b00000, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111],
        _ => return None,
    };
    Some(rows)
}

//! Background color derived from album art.
//!
//! The representative color is a median of medians: the median of every pixel
//! column first, then the median of those column medians, per channel. Bright
//! corners or logos shift a mean but barely move this value. The result is
//! clamped so text on top of it stays readable.

use std::path::Path;
use std::time::{Duration, Instant};

use image::{ImageReader, RgbImage};

use crate::error::{CarThingError, Result};

/// Darkest allowed channel value before normalization
pub const MIN_CHANNEL: u8 = 64;
/// Brightest allowed channel value before normalization
pub const MAX_CHANNEL: u8 = 195;

/// Normalized RGBA color, channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl BackgroundColor {
    pub const BLACK: BackgroundColor = BackgroundColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Clamp each channel to `[MIN_CHANNEL, MAX_CHANNEL]`, normalize, and make opaque
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(|channel| channel.clamp(MIN_CHANNEL, MAX_CHANNEL) as f32 / 255.0);
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Linear interpolation towards `target`; `t` is clamped to `0.0..=1.0`
    pub fn lerp(&self, target: &BackgroundColor, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: f32, to: f32| from + (to - from) * t;
        Self {
            r: mix(self.r, target.r),
            g: mix(self.g, target.g),
            b: mix(self.b, target.b),
            a: mix(self.a, target.a),
        }
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Median of medians over an RGB grid, truncated to integers
pub fn median_color(image: &RgbImage) -> Result<[u8; 3]> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CarThingError::Artwork("image has no pixels".to_string()));
    }

    let mut column_medians: [Vec<f64>; 3] = Default::default();
    let mut column = vec![0.0; height as usize];

    for x in 0..width {
        for (channel, medians) in column_medians.iter_mut().enumerate() {
            for y in 0..height {
                column[y as usize] = f64::from(image.get_pixel(x, y)[channel]);
            }
            medians.push(median(&mut column));
        }
    }

    Ok(column_medians.map(|mut medians| median(&mut medians) as u8))
}

/// Even-length input averages the two middle values
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

pub fn extract(image: &RgbImage) -> Result<BackgroundColor> {
    let rgb = median_color(image)?;
    log::debug!("Album art median color: {:?}", rgb);
    Ok(BackgroundColor::from_rgb8(rgb))
}

/// Format is sniffed from the content, the file extension is only a fallback
pub fn extract_from_path(path: &Path) -> Result<BackgroundColor> {
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_rgb8();
    extract(&image)
}

pub fn extract_from_memory(bytes: &[u8]) -> Result<BackgroundColor> {
    let image = image::load_from_memory(bytes)?.to_rgb8();
    extract(&image)
}

/// Timed linear transition between two background colors
#[derive(Debug, Clone, Copy)]
pub struct BackgroundFade {
    from: BackgroundColor,
    to: BackgroundColor,
    started: Instant,
    duration: Duration,
}

impl BackgroundFade {
    pub fn new(from: BackgroundColor, to: BackgroundColor, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    /// A fade that already rests on `color`
    pub fn settled(color: BackgroundColor, now: Instant) -> Self {
        Self::new(color, color, now, Duration::ZERO)
    }

    pub fn target(&self) -> BackgroundColor {
        self.to
    }

    pub fn at(&self, now: Instant) -> BackgroundColor {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(&self.to, t)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Start a new fade from wherever this one currently is
    pub fn retarget(&self, to: BackgroundColor, now: Instant) -> Self {
        Self::new(self.at(now), to, now, self.duration)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

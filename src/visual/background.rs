use crate::noise_field::NoiseField;
use crate::palette::{Rgb, Rgba, AURORA_HIGH, AURORA_LOW};
use crate::surface::Surface;
use crate::visual::shape::map_range;

pub const STRIP_STEP: usize = 6;
pub const STRIP_SCALE_X: f64 = 0.003;
pub const BRIGHTNESS_GAMMA: f32 = 0.9;
pub const MIN_ALPHA: f32 = 50.0;
pub const MAX_ALPHA: f32 = 180.0;
/// Background noise time added once per frame.
pub const BACKGROUND_STEP: f64 = 0.03;

/// Power-shaped noise value; pulls mid values upward so bright bands win.
pub fn shape_level(n: f32) -> f32 {
    n.clamp(0.0, 1.0).powf(BRIGHTNESS_GAMMA)
}

/// Opacity for a shaped level, linear over `[MIN_ALPHA, MAX_ALPHA]`.
pub fn strip_alpha(level: f32) -> u8 {
    map_range(level.clamp(0.0, 1.0), 0.0, 1.0, MIN_ALPHA, MAX_ALPHA).round() as u8
}

pub fn strip_color(noise: &dyn NoiseField, x: usize, time: f64) -> Rgba {
    let level = shape_level(noise.noise2(x as f64 * STRIP_SCALE_X, time));
    AURORA_LOW.lerp(AURORA_HIGH, level).with_alpha(strip_alpha(level))
}

/// Clears to `base` and lays translucent vertical strips over it. Each strip
/// is one unit wider than the step so neighbours overlap and leave no seams.
pub fn draw_background(surface: &mut dyn Surface, noise: &dyn NoiseField, base: Rgb, time: f64) {
    surface.clear(base);
    let w = surface.width();
    let h = surface.height() as f32;
    for x in (0..w).step_by(STRIP_STEP) {
        let color = strip_color(noise, x, time);
        surface.fill_rect(x as f32, 0.0, (STRIP_STEP + 1) as f32, h, color);
    }
}

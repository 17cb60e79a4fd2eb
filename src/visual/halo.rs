use crate::layout::Ornament;
use crate::noise_field::NoiseField;
use crate::surface::{Point, Surface};
use crate::visual::shape::{map_range, remap_signed};

pub const HALO_LAYERS: usize = 4;
pub const HALO_SEGMENTS: usize = 80;
/// Halo strength of the reference composition.
pub const DEFAULT_HALO_INTENSITY: f32 = 0.7;

const LAYER_NOISE_STRIDE: f64 = 10.0;
const VERTEX_NOISE_STEP: f64 = 0.07;

/// Per-layer parameters; layer 0 is the innermost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HaloLayer {
    pub radius_scale: f32,
    pub amp: f32,
    pub alpha: u8,
}

pub fn halo_layer(k: usize, intensity: f32) -> HaloLayer {
    let last = (HALO_LAYERS - 1) as f32;
    let k = k as f32;
    let alpha = map_range(k, 0.0, last, 120.0, 40.0) * (1.0 - intensity * 0.3);
    HaloLayer {
        radius_scale: map_range(k, 0.0, last, 0.6, 1.2),
        amp: map_range(k, 0.0, last, 0.25, 0.45),
        alpha: alpha.round().clamp(0.0, 255.0) as u8,
    }
}

/// Builds the closed outline of layer `k`: `HALO_SEGMENTS + 1` vertices,
/// the last one repeating the start angle.
pub fn halo_outline(
    noise: &dyn NoiseField,
    ornament: &Ornament,
    intensity: f32,
    k: usize,
    out: &mut Vec<Point>,
) {
    let layer = halo_layer(k, intensity);
    let base = ornament.radius * (1.0 + 0.5 * intensity);
    let max_extra = ornament.radius * (0.8 + intensity);

    out.clear();
    for i in 0..=HALO_SEGMENTS {
        let angle = (i as f32 / HALO_SEGMENTS as f32) * std::f32::consts::TAU;
        let pos = ornament.aura_time + k as f64 * LAYER_NOISE_STRIDE + i as f64 * VERTEX_NOISE_STEP;
        let extra = remap_signed(noise.noise1(pos), layer.amp) * max_extra;
        out.push(ornament.center.polar(base * layer.radius_scale + extra, angle));
    }
}

/// Four translucent noisy blobs in the ornament's second palette color.
pub fn draw_halo(
    surface: &mut dyn Surface,
    noise: &dyn NoiseField,
    ornament: &Ornament,
    intensity: f32,
    scratch: &mut Vec<Point>,
) {
    let color = ornament.palette[1];
    for k in 0..HALO_LAYERS {
        halo_outline(noise, ornament, intensity, k, scratch);
        let alpha = halo_layer(k, intensity).alpha;
        surface.fill_polygon(scratch, color.with_alpha(alpha));
    }
}

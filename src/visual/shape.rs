use crate::noise_field::NoiseField;

/// Wavy radius for a contour point.
///
/// `angle * freq` is wrapped onto a unit circle shifted into [0,1]², then
/// offset along the diagonal by `time` and fed to 2D noise. The [0,1]
/// sample maps linearly to `[-amp, +amp]`, so the result always lies in
/// `[base * (1 - amp), base * (1 + amp)]`. `freq` sets how many lobes a
/// revolution shows.
pub fn modulate(
    noise: &dyn NoiseField,
    base: f32,
    angle: f32,
    time: f64,
    amp: f32,
    freq: f32,
) -> f32 {
    let a = angle * freq;
    let nx = (a.cos() * 0.5 + 0.5) as f64;
    let ny = (a.sin() * 0.5 + 0.5) as f64;
    let n = noise.noise2(nx + time, ny + time).clamp(0.0, 1.0);
    base * (1.0 + remap_signed(n, amp))
}

/// Maps a [0,1] sample to `[-amp, +amp]`.
#[inline]
pub fn remap_signed(n: f32, amp: f32) -> f32 {
    -amp + n * 2.0 * amp
}

/// Angle of element `i` out of `n` evenly spaced around a circle.
#[inline]
pub fn ring_angle(i: usize, n: usize) -> f32 {
    i as f32 * std::f32::consts::TAU / n.max(1) as f32
}

/// Linear map of `v` from `[a0, a1]` onto `[b0, b1]`.
#[inline]
pub fn map_range(v: f32, a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    let span = a1 - a0;
    if span.abs() < f32::EPSILON {
        return b0;
    }
    b0 + (v - a0) / span * (b1 - b0)
}

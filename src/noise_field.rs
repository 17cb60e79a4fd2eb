use noise::{NoiseFn, Perlin};

/// Coherent noise source. Both calls return values in [0,1] and vary
/// smoothly with their inputs.
pub trait NoiseField {
    fn noise1(&self, x: f64) -> f32;
    fn noise2(&self, x: f64, y: f64) -> f32;
}

impl<N: NoiseField + ?Sized> NoiseField for Box<N> {
    fn noise1(&self, x: f64) -> f32 {
        (**self).noise1(x)
    }

    fn noise2(&self, x: f64, y: f64) -> f32 {
        (**self).noise2(x, y)
    }
}

pub const DEFAULT_OCTAVES: u32 = 4;
pub const DEFAULT_FALLOFF: f32 = 0.5;
const MAX_OCTAVES: u32 = 8;

// Off-lattice row used for the 1D call so it never degenerates to the
// zero crossings Perlin has on integer coordinates.
const ROW_1D: f64 = 0.318;

/// Octave-summed Perlin noise (`noise` crate) remapped to [0,1].
#[derive(Clone)]
pub struct PerlinField {
    perlin: Perlin,
    octaves: u32,
    falloff: f64,
}

impl PerlinField {
    pub fn new(seed: u32) -> Self {
        Self::with_detail(seed, DEFAULT_OCTAVES, DEFAULT_FALLOFF)
    }

    /// `octaves` is clamped to 1..=8 and `falloff` (per-octave amplitude
    /// multiplier) to [0,1].
    pub fn with_detail(seed: u32, octaves: u32, falloff: f32) -> Self {
        let falloff = if falloff.is_finite() { falloff.clamp(0.0, 1.0) } else { DEFAULT_FALLOFF };
        Self {
            perlin: Perlin::new(seed),
            octaves: octaves.clamp(1, MAX_OCTAVES),
            falloff: falloff as f64,
        }
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn falloff(&self) -> f32 {
        self.falloff as f32
    }

    fn fbm(&self, x: f64, y: f64) -> f64 {
        let mut sum = 0.0;
        let mut norm = 0.0;
        let mut amp = 1.0;
        let mut freq = 1.0;
        for _ in 0..self.octaves {
            sum += amp * self.perlin.get([x * freq, y * freq]);
            norm += amp;
            amp *= self.falloff;
            freq *= 2.0;
        }
        if norm > 0.0 { sum / norm } else { 0.0 }
    }
}

impl NoiseField for PerlinField {
    fn noise1(&self, x: f64) -> f32 {
        self.noise2(x, ROW_1D)
    }

    fn noise2(&self, x: f64, y: f64) -> f32 {
        let v = self.fbm(x, y) * 0.5 + 0.5;
        if v.is_finite() { v.clamp(0.0, 1.0) as f32 } else { 0.5 }
    }
}

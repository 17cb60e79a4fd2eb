#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear blend; `t` is clamped to [0,1].
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: lerp_u8(self.r, other.r, t),
            g: lerp_u8(self.g, other.g, t),
            b: lerp_u8(self.b, other.b, t),
        }
    }

    pub fn with_alpha(self, a: u8) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub fn opaque(self) -> Rgba {
        self.with_alpha(255)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Cyan end of the background aurora.
pub const AURORA_LOW: Rgb = Rgb::new(0, 210, 255);
/// Magenta end of the background aurora.
pub const AURORA_HIGH: Rgb = Rgb::new(255, 0, 110);

const DEFAULT_COLORS: [Rgb; 10] = [
    Rgb::new(10, 13, 24),
    Rgb::new(255, 90, 0),
    Rgb::new(255, 0, 110),
    Rgb::new(80, 220, 100),
    Rgb::new(255, 200, 0),
    Rgb::new(0, 210, 255),
    Rgb::new(140, 110, 255),
    Rgb::new(255, 80, 170),
    Rgb::new(255, 120, 40),
    Rgb::new(40, 255, 200),
];

/// Ordered color set. Entry 0 is the background; the rest form the pool
/// ornaments sample from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl Palette {
    /// Builds a palette from `background` followed by `pool`. The pool must
    /// be non-empty since ornaments never draw the background color.
    pub fn new(background: Rgb, pool: &[Rgb]) -> Option<Self> {
        if pool.is_empty() {
            return None;
        }
        let mut colors = Vec::with_capacity(pool.len() + 1);
        colors.push(background);
        colors.extend_from_slice(pool);
        Some(Self { colors })
    }

    pub fn background(&self) -> Rgb {
        self.colors[0]
    }

    pub fn pool(&self) -> &[Rgb] {
        &self.colors[1..]
    }

    /// Every color, background included.
    pub fn all(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn sample_pool(&self, rng: &mut fastrand::Rng) -> Rgb {
        let pool = self.pool();
        pool[rng.usize(..pool.len())]
    }

    /// Draws from the full set. Only the spokes core disk uses this.
    pub fn sample_any(&self, rng: &mut fastrand::Rng) -> Rgb {
        self.colors[rng.usize(..self.colors.len())]
    }
}

pub(crate) fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let t = t.clamp(0.0, 1.0);
    (a as f32 * (1.0 - t) + b as f32 * t).round() as u8
}

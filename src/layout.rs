use crate::palette::{Palette, Rgb};
use crate::surface::Point;

/// Minimum center distance, as a multiple of the summed radii.
pub const SPACING: f32 = 1.25;
/// Candidate draws per ornament before accepting an overlapping spot.
pub const MAX_TRIES: usize = 200;
pub const SHAPE_SEED_MAX: f64 = 7000.0;
pub const AURA_SEED_MAX: f64 = 9000.0;
pub const PALETTE_LEN: usize = 5;
pub const MAX_PER_CLASS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Spokes,
    Dots,
}

impl Style {
    pub fn label(self) -> &'static str {
        match self {
            Self::Spokes => "spokes",
            Self::Dots => "dots",
        }
    }

    /// Radius range as fractions of the shorter canvas side.
    pub const fn radius_fraction(self) -> (f32, f32) {
        match self {
            Self::Spokes => (0.09, 0.14),
            Self::Dots => (0.06, 0.09),
        }
    }

    /// Extra inset from the canvas edge, on top of the radius.
    pub const fn margin(self) -> f32 {
        match self {
            Self::Spokes => 50.0,
            Self::Dots => 40.0,
        }
    }
}

/// One placed mandala. Only the two time fields change after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Ornament {
    pub center: Point,
    pub radius: f32,
    pub palette: [Rgb; PALETTE_LEN],
    pub style: Style,
    /// Drives the body contour noise.
    pub shape_time: f64,
    /// Drives the halo contour noise.
    pub aura_time: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub spokes: usize,
    pub dots: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self { spokes: 5, dots: 7 }
    }
}

impl LayoutParams {
    pub fn new(spokes: usize, dots: usize) -> Self {
        Self {
            spokes: spokes.min(MAX_PER_CLASS),
            dots: dots.min(MAX_PER_CLASS),
        }
    }

    pub fn total(&self) -> usize {
        self.spokes + self.dots
    }
}

/// Outcome of a single rejection-sampling run. `exact` is false when the
/// retry budget ran out and the last candidate was taken anyway.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub center: Point,
    pub exact: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub ornaments: Vec<Ornament>,
    /// Ornaments placed without satisfying the spacing rule.
    pub degraded: usize,
}

pub fn generate_layout(
    width: usize,
    height: usize,
    params: LayoutParams,
    palette: &Palette,
    rng: &mut fastrand::Rng,
) -> Layout {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    let s = w.min(h);
    let params = LayoutParams::new(params.spokes, params.dots);

    let mut layout = Layout {
        ornaments: Vec::with_capacity(params.total()),
        degraded: 0,
    };

    // Large ornaments go first so the small ones pack around them.
    let classes = [(Style::Spokes, params.spokes), (Style::Dots, params.dots)];
    for (style, count) in classes {
        let (lo, hi) = style.radius_fraction();
        for _ in 0..count {
            let radius = uniform(rng, s * lo, s * hi);
            let placement = find_position(radius, style.margin(), &layout.ornaments, w, h, rng);
            if !placement.exact {
                layout.degraded += 1;
                log::warn!(
                    "no free spot for {} ornament (r={radius:.1}) after {MAX_TRIES} tries; overlapping",
                    style.label()
                );
            }

            let palette = std::array::from_fn(|_| palette.sample_pool(rng));
            layout.ornaments.push(Ornament {
                center: placement.center,
                radius,
                palette,
                style,
                shape_time: rng.f64() * SHAPE_SEED_MAX,
                aura_time: rng.f64() * AURA_SEED_MAX,
            });
        }
    }

    log::debug!(
        "layout {}x{}: {} ornaments, {} degraded",
        width,
        height,
        layout.ornaments.len(),
        layout.degraded
    );
    layout
}

/// Rejection sampling inside the canvas inset by `margin + radius`.
pub fn find_position(
    radius: f32,
    margin: f32,
    placed: &[Ornament],
    w: f32,
    h: f32,
    rng: &mut fastrand::Rng,
) -> Placement {
    let border = margin + radius;
    let mut center = Point::new(w * 0.5, h * 0.5);

    for _ in 0..MAX_TRIES {
        center = Point::new(uniform(rng, border, w - border), uniform(rng, border, h - border));
        if is_clear(center, radius, placed) {
            return Placement { center, exact: true };
        }
    }

    Placement { center, exact: false }
}

fn is_clear(center: Point, radius: f32, placed: &[Ornament]) -> bool {
    placed
        .iter()
        .all(|o| center.distance(o.center) >= (radius + o.radius) * SPACING)
}

/// Number of ornament pairs closer than the spacing rule allows.
pub fn overlapping_pairs(ornaments: &[Ornament]) -> usize {
    let mut n = 0;
    for (i, a) in ornaments.iter().enumerate() {
        for b in &ornaments[i + 1..] {
            if a.center.distance(b.center) < (a.radius + b.radius) * SPACING {
                n += 1;
            }
        }
    }
    n
}

/// Uniform draw in `[lo, hi)`. A collapsed or inverted range (canvas
/// smaller than the inset) yields its midpoint.
pub(crate) fn uniform(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        lo + rng.f32() * (hi - lo)
    } else {
        (lo + hi) * 0.5
    }
}

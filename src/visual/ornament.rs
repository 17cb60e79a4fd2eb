use crate::layout::{Ornament, Style};
use crate::noise_field::NoiseField;
use crate::palette::{Palette, Rgb};
use crate::surface::{Point, Surface};
use crate::visual::shape::{modulate, ring_angle};

/// How many elements a ring holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Count {
    Fixed(usize),
    /// `max(min, floor(R / 5))`.
    PerRadius { min: usize },
}

impl Count {
    pub fn resolve(self, radius: f32) -> usize {
        match self {
            Self::Fixed(n) => n,
            Self::PerRadius { min } => min.max((radius / 5.0).floor().max(0.0) as usize),
        }
    }
}

/// Dot diameter, either absolute or a fraction of the ornament radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Size {
    Px(f32),
    OfRadius(f32),
}

impl Size {
    fn resolve(self, radius: f32) -> f32 {
        match self {
            Self::Px(v) => v,
            Self::OfRadius(f) => f * radius,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Palette(usize),
    /// Fresh draw over every palette color, background included.
    AnyColor,
}

/// Contour wobble: amplitude fraction and lobes per revolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wobble {
    pub amp: f32,
    pub freq: f32,
}

/// One primitive group of a body. Radii are fractions of the ornament
/// radius; `color` indexes the ornament's 5-color palette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layer {
    Ring {
        diameter: f32,
        weight_frac: f32,
        color: usize,
    },
    Spokes {
        count: usize,
        inner: f32,
        outer: f32,
        wobble: Wobble,
        color: usize,
    },
    Dots {
        count: Count,
        radius: f32,
        wobble: Wobble,
        size: Size,
        color: usize,
    },
    Disk {
        diameter: f32,
        fill: Fill,
    },
}

const MIN_RING_WEIGHT: f32 = 2.0;
const SPOKE_WEIGHT: f32 = 2.0;

const SPOKES_LAYERS: [Layer; 7] = [
    Layer::Ring { diameter: 2.0, weight_frac: 0.08, color: 0 },
    Layer::Spokes {
        count: 15,
        inner: 0.12,
        outer: 0.88,
        wobble: Wobble { amp: 0.35, freq: 2.0 },
        color: 1,
    },
    Layer::Ring { diameter: 1.2, weight_frac: 0.04, color: 2 },
    Layer::Dots {
        count: Count::PerRadius { min: 7 },
        radius: 0.38,
        wobble: Wobble { amp: 0.3, freq: 3.0 },
        size: Size::Px(7.0),
        color: 3,
    },
    Layer::Dots {
        count: Count::PerRadius { min: 3 },
        radius: 0.26,
        wobble: Wobble { amp: 0.18, freq: 2.5 },
        size: Size::Px(6.0),
        color: 1,
    },
    Layer::Disk { diameter: 0.24, fill: Fill::Palette(4) },
    Layer::Disk { diameter: 0.12, fill: Fill::AnyColor },
];

const DOTS_LAYERS: [Layer; 5] = [
    Layer::Spokes {
        count: 8,
        inner: 0.12,
        outer: 0.80,
        wobble: Wobble { amp: 0.32, freq: 2.3 },
        color: 1,
    },
    Layer::Dots {
        count: Count::Fixed(8),
        radius: 0.22,
        wobble: Wobble { amp: 0.22, freq: 2.4 },
        size: Size::OfRadius(0.10),
        color: 2,
    },
    Layer::Dots {
        count: Count::Fixed(19),
        radius: 0.52,
        wobble: Wobble { amp: 0.28, freq: 3.1 },
        size: Size::OfRadius(0.08),
        color: 3,
    },
    Layer::Dots {
        count: Count::Fixed(24),
        radius: 0.55,
        wobble: Wobble { amp: 0.30, freq: 3.5 },
        size: Size::OfRadius(0.09),
        color: 4,
    },
    Layer::Disk { diameter: 0.20, fill: Fill::Palette(0) },
];

/// Back-to-front layer table of a body style.
pub fn layers(style: Style) -> &'static [Layer] {
    match style {
        Style::Spokes => &SPOKES_LAYERS,
        Style::Dots => &DOTS_LAYERS,
    }
}

/// Radius the body is drawn at. Currently the fixed base radius.
pub fn animated_radius(ornament: &Ornament) -> f32 {
    ornament.radius
}

pub fn draw_body(
    surface: &mut dyn Surface,
    noise: &dyn NoiseField,
    ornament: &Ornament,
    palette: &Palette,
    rng: &mut fastrand::Rng,
) {
    let r = animated_radius(ornament);
    let c = ornament.center;
    let t = ornament.shape_time;
    let color = |i: usize| -> Rgb { ornament.palette[i % ornament.palette.len()] };

    for layer in layers(ornament.style) {
        match *layer {
            Layer::Ring { diameter, weight_frac, color: ci } => {
                let weight = MIN_RING_WEIGHT.max(r * weight_frac);
                surface.stroke_circle(c, r * diameter * 0.5, weight, color(ci).opaque());
            }
            Layer::Spokes { count, inner, outer, wobble, color: ci } => {
                let paint = color(ci).opaque();
                for i in 0..count {
                    let a = ring_angle(i, count);
                    let outer_r = modulate(noise, r * outer, a, t, wobble.amp, wobble.freq);
                    surface.line(c.polar(r * inner, a), c.polar(outer_r, a), SPOKE_WEIGHT, paint);
                }
            }
            Layer::Dots { size, color: ci, .. } => {
                let paint = color(ci).opaque();
                let dot_r = size.resolve(r) * 0.5;
                for p in dot_positions(noise, ornament, *layer) {
                    surface.fill_circle(p, dot_r, paint);
                }
            }
            Layer::Disk { diameter, fill } => {
                let paint = match fill {
                    Fill::Palette(i) => color(i),
                    Fill::AnyColor => palette.sample_any(rng),
                };
                surface.fill_circle(c, r * diameter * 0.5, paint.opaque());
            }
        }
    }
}

/// Dot centers of a ring layer in drawing order; empty for other layers.
pub fn dot_positions<'a>(
    noise: &'a dyn NoiseField,
    ornament: &'a Ornament,
    layer: Layer,
) -> impl Iterator<Item = Point> + 'a {
    let r = animated_radius(ornament);
    let (n, radius, wobble) = match layer {
        Layer::Dots { count, radius, wobble, .. } => (count.resolve(r), radius, wobble),
        _ => (0, 0.0, Wobble { amp: 0.0, freq: 0.0 }),
    };
    (0..n).map(move |i| {
        let a = ring_angle(i, n);
        let ring_r = modulate(noise, r * radius, a, ornament.shape_time, wobble.amp, wobble.freq);
        ornament.center.polar(ring_r, a)
    })
}

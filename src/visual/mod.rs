pub mod background;
pub mod halo;
pub mod ornament;
pub mod shape;

use crate::layout::{generate_layout, overlapping_pairs, LayoutParams, Ornament};
use crate::noise_field::NoiseField;
use crate::palette::Palette;
use crate::surface::{PixelCanvas, Point, Surface};

pub use background::BACKGROUND_STEP;
pub use halo::DEFAULT_HALO_INTENSITY;

/// Base rate all noise clocks are derived from.
pub const NOISE_SPEED: f64 = 0.01;
/// Per-frame advance of an ornament's body noise time.
pub const SHAPE_STEP: f64 = NOISE_SPEED * 0.4;
/// Per-frame advance of an ornament's halo noise time.
pub const AURA_STEP: f64 = NOISE_SPEED * 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    pub layout: LayoutParams,
    /// Fixed halo strength in [0,1].
    pub halo_intensity: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            layout: LayoutParams::default(),
            halo_intensity: DEFAULT_HALO_INTENSITY,
        }
    }
}

impl SceneSettings {
    pub fn new(spokes: usize, dots: usize, halo_intensity: f32) -> Self {
        let halo_intensity = if halo_intensity.is_finite() {
            halo_intensity.clamp(0.0, 1.0)
        } else {
            DEFAULT_HALO_INTENSITY
        };
        Self {
            layout: LayoutParams::new(spokes, dots),
            halo_intensity,
        }
    }
}

/// Summary of the current layout, for HUDs and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutReport {
    pub width: usize,
    pub height: usize,
    pub ornaments: usize,
    /// Placements that exhausted the retry budget.
    pub degraded: usize,
    pub overlapping_pairs: usize,
}

/// Owns the ornament set, the noise clocks, and an RGBA canvas.
///
/// A frame is: advance every clock by one tick, paint the background,
/// then each ornament's halo followed by its body, in layout order.
/// `resize` rebuilds the whole ornament set in one swap.
pub struct MandalaEngine {
    settings: SceneSettings,
    palette: Palette,
    noise: Box<dyn NoiseField>,
    rng: fastrand::Rng,
    ornaments: Vec<Ornament>,
    degraded: usize,
    background_time: f64,
    frames: u64,
    canvas: PixelCanvas,
    scratch: Vec<Point>,
}

impl MandalaEngine {
    pub fn new(settings: SceneSettings, noise: Box<dyn NoiseField>, rng: fastrand::Rng) -> Self {
        Self::with_palette(settings, Palette::default(), noise, rng)
    }

    pub fn with_palette(
        settings: SceneSettings,
        palette: Palette,
        noise: Box<dyn NoiseField>,
        rng: fastrand::Rng,
    ) -> Self {
        Self {
            settings,
            palette,
            noise,
            rng,
            ornaments: Vec::new(),
            degraded: 0,
            background_time: 0.0,
            frames: 0,
            canvas: PixelCanvas::new(1, 1),
            scratch: Vec::with_capacity(halo::HALO_SEGMENTS + 1),
        }
    }

    /// Resizes the canvas and lays the ornaments out again from scratch.
    pub fn resize(&mut self, w: usize, h: usize) {
        self.canvas.resize(w, h);
        self.relayout();
    }

    /// Discards the current ornaments and places a fresh set at the current
    /// canvas size.
    pub fn relayout(&mut self) {
        let (w, h) = self.size();
        let layout = generate_layout(w, h, self.settings.layout, &self.palette, &mut self.rng);
        self.ornaments = layout.ornaments;
        self.degraded = layout.degraded;
    }

    /// One animation tick without drawing.
    pub fn advance_frame(&mut self) {
        for o in &mut self.ornaments {
            o.shape_time += SHAPE_STEP;
            o.aura_time += AURA_STEP;
        }
        self.background_time += BACKGROUND_STEP;
        self.frames += 1;
    }

    /// Advances one tick and paints it into the internal canvas.
    pub fn render_frame(&mut self) -> &[u8] {
        self.advance_frame();
        self.redraw()
    }

    /// Repaints the current state without advancing time.
    pub fn redraw(&mut self) -> &[u8] {
        compose(
            &mut self.canvas,
            &*self.noise,
            &self.palette,
            &self.ornaments,
            self.settings.halo_intensity,
            self.background_time,
            &mut self.rng,
            &mut self.scratch,
        );
        self.canvas.pixels()
    }

    /// Paints the current state onto a host-provided surface.
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        compose(
            surface,
            &*self.noise,
            &self.palette,
            &self.ornaments,
            self.settings.halo_intensity,
            self.background_time,
            &mut self.rng,
            &mut self.scratch,
        );
    }

    pub fn size(&self) -> (usize, usize) {
        (self.canvas.width(), self.canvas.height())
    }

    pub fn pixels(&self) -> &[u8] {
        self.canvas.pixels()
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn background_time(&self) -> f64 {
        self.background_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn layout_report(&self) -> LayoutReport {
        let (width, height) = self.size();
        LayoutReport {
            width,
            height,
            ornaments: self.ornaments.len(),
            degraded: self.degraded,
            overlapping_pairs: overlapping_pairs(&self.ornaments),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn compose(
    surface: &mut dyn Surface,
    noise: &dyn NoiseField,
    palette: &Palette,
    ornaments: &[Ornament],
    halo_intensity: f32,
    background_time: f64,
    rng: &mut fastrand::Rng,
    scratch: &mut Vec<Point>,
) {
    background::draw_background(surface, noise, palette.background(), background_time);
    for o in ornaments {
        halo::draw_halo(surface, noise, o, halo_intensity, scratch);
        ornament::draw_body(surface, noise, o, palette, rng);
    }
}

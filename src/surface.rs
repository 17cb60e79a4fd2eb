use crate::palette::{Rgb, Rgba};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `radius` from `self` in direction `angle` (radians).
    pub fn polar(self, radius: f32, angle: f32) -> Point {
        Point::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }
}

/// Drawing primitives the renderers need from a host.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn clear(&mut self, color: Rgb);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);
    fn stroke_circle(&mut self, center: Point, radius: f32, weight: f32, color: Rgba);
    fn line(&mut self, a: Point, b: Point, weight: f32, color: Rgba);
    fn fill_polygon(&mut self, points: &[Point], color: Rgba);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let quad = [
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ];
        self.fill_polygon(&quad, color);
    }
}

/// Software RGBA8 canvas. Samples at pixel centers and composites with
/// straight source-over alpha; the destination stays opaque.
pub struct PixelCanvas {
    w: usize,
    h: usize,
    pixels: Vec<u8>,
    crossings: Vec<f32>,
}

impl PixelCanvas {
    pub fn new(w: usize, h: usize) -> Self {
        let mut canvas = Self {
            w: 0,
            h: 0,
            pixels: Vec::new(),
            crossings: Vec::new(),
        };
        canvas.resize(w, h);
        canvas
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w.max(1);
        self.h = h.max(1);
        let n = self.w.saturating_mul(self.h).saturating_mul(4);
        self.pixels.clear();
        self.pixels.resize(n, 0);
        for px in self.pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.w || y >= self.h {
            return None;
        }
        let i = (y * self.w + x) * 4;
        Some(Rgba {
            r: self.pixels[i],
            g: self.pixels[i + 1],
            b: self.pixels[i + 2],
            a: self.pixels[i + 3],
        })
    }

    /// Inclusive pixel span whose centers may fall in `[lo, hi]`, clipped.
    fn span(lo: f32, hi: f32, limit: usize) -> Option<(usize, usize)> {
        if !(lo.is_finite() && hi.is_finite()) || hi < 0.0 || limit == 0 {
            return None;
        }
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).floor().min(limit as f32 - 1.0);
        if end < start {
            return None;
        }
        Some((start as usize, end as usize))
    }

    fn blend(&mut self, x: usize, y: usize, c: Rgba) {
        let i = (y * self.w + x) * 4;
        let px = &mut self.pixels[i..i + 4];
        match c.a {
            0 => {}
            255 => {
                px[0] = c.r;
                px[1] = c.g;
                px[2] = c.b;
            }
            a => {
                let a = a as u32;
                let ia = 255 - a;
                px[0] = ((c.r as u32 * a + px[0] as u32 * ia + 127) / 255) as u8;
                px[1] = ((c.g as u32 * a + px[1] as u32 * ia + 127) / 255) as u8;
                px[2] = ((c.b as u32 * a + px[2] as u32 * ia + 127) / 255) as u8;
            }
        }
        px[3] = 255;
    }

    fn fill_where(
        &mut self,
        min: Point,
        max: Point,
        color: Rgba,
        inside: impl Fn(f32, f32) -> bool,
    ) {
        let Some((x0, x1)) = Self::span(min.x, max.x, self.w) else {
            return;
        };
        let Some((y0, y1)) = Self::span(min.y, max.y, self.h) else {
            return;
        };
        for y in y0..=y1 {
            let py = y as f32 + 0.5;
            for x in x0..=x1 {
                if inside(x as f32 + 0.5, py) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> usize {
        self.w
    }

    fn height(&self) -> usize {
        self.h
    }

    fn clear(&mut self, color: Rgb) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        self.fill_where(
            Point::new(center.x - radius, center.y - radius),
            Point::new(center.x + radius, center.y + radius),
            color,
            |x, y| {
                let dx = x - center.x;
                let dy = y - center.y;
                dx * dx + dy * dy <= r2
            },
        );
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, weight: f32, color: Rgba) {
        let half = weight.max(0.0) * 0.5;
        let outer = radius + half;
        let inner = (radius - half).max(0.0);
        if outer <= 0.0 {
            return;
        }
        let (o2, i2) = (outer * outer, inner * inner);
        self.fill_where(
            Point::new(center.x - outer, center.y - outer),
            Point::new(center.x + outer, center.y + outer),
            color,
            |x, y| {
                let dx = x - center.x;
                let dy = y - center.y;
                let d2 = dx * dx + dy * dy;
                d2 <= o2 && d2 >= i2
            },
        );
    }

    fn line(&mut self, a: Point, b: Point, weight: f32, color: Rgba) {
        // Round-capped capsule around the segment.
        let half = (weight * 0.5).max(0.5);
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len2 = dx * dx + dy * dy;
        let h2 = half * half;
        self.fill_where(
            Point::new(a.x.min(b.x) - half, a.y.min(b.y) - half),
            Point::new(a.x.max(b.x) + half, a.y.max(b.y) + half),
            color,
            |x, y| {
                let t = if len2 > 0.0 {
                    (((x - a.x) * dx + (y - a.y) * dy) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let px = a.x + dx * t - x;
                let py = a.y + dy * t - y;
                px * px + py * py <= h2
            },
        );
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        let Some((y0, y1)) = Self::span(min_y, max_y, self.h) else {
            return;
        };

        // Even-odd scanline fill at pixel centers.
        let mut crossings = std::mem::take(&mut self.crossings);
        for y in y0..=y1 {
            let py = y as f32 + 0.5;
            crossings.clear();
            let mut prev = points[points.len() - 1];
            for &p in points {
                if (prev.y <= py) != (p.y <= py) {
                    let t = (py - prev.y) / (p.y - prev.y);
                    crossings.push(prev.x + t * (p.x - prev.x));
                }
                prev = p;
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                if let Some((x0, x1)) = Self::span(pair[0], pair[1], self.w) {
                    for x in x0..=x1 {
                        self.blend(x, y, color);
                    }
                }
            }
        }
        self.crossings = crossings;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let Some((x0, x1)) = Self::span(x, x + w, self.w) else {
            return;
        };
        let Some((y0, y1)) = Self::span(y, y + h, self.h) else {
            return;
        };
        for yy in y0..=y1 {
            for xx in x0..=x1 {
                self.blend(xx, yy, color);
            }
        }
    }
}

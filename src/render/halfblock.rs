use crate::render::{frame_begin, frame_end, write_bg_rgb, write_fg_rgb, Frame, Renderer};
use std::io::Write;

/// Two canvas pixels per cell: the upper one as the `▀` foreground, the
/// lower one as the cell background.
pub struct HalfBlockRenderer {
    last_fg: Option<(u8, u8, u8)>,
    last_bg: Option<(u8, u8, u8)>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_at(pixels: &[u8], i: usize) -> (u8, u8, u8) {
    (pixels[i], pixels[i + 1], pixels[i + 2])
}

impl Renderer for HalfBlockRenderer {
    fn name(&self) -> &'static str {
        "halfblock"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, rows)) = frame_begin(frame, 1, 2, out)? else {
            return Ok(());
        };
        self.last_fg = None;
        self.last_bg = None;

        const HALF_BLOCK: &str = "\u{2580}";
        let w = frame.pixel_width;

        for row in 0..rows {
            let top = row * 2 * w;
            let bottom = top + w;
            for x in 0..cols {
                let fg = rgb_at(frame.pixels_rgba, (top + x) * 4);
                let bg = rgb_at(frame.pixels_rgba, (bottom + x) * 4);
                if self.last_fg != Some(fg) {
                    write_fg_rgb(out, fg.0, fg.1, fg.2)?;
                    self.last_fg = Some(fg);
                }
                if self.last_bg != Some(bg) {
                    write_bg_rgb(out, bg.0, bg.1, bg.2)?;
                    self.last_bg = Some(bg);
                }
                out.write_all(HALF_BLOCK.as_bytes())?;
            }
            out.write_all(b"\r\n")?;
        }

        frame_end(frame, cols, rows, out)
    }
}

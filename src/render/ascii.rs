use crate::render::{frame_begin, frame_end, luma_u8, write_fg_rgb, Frame, Renderer};
use std::io::Write;

pub struct AsciiRenderer {
    last_fg: Option<(u8, u8, u8)>,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self { last_fg: None }
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, rows)) = frame_begin(frame, 1, 1, out)? else {
            return Ok(());
        };
        self.last_fg = None;

        // Dark to bright.
        const RAMP: &[u8] = b" .:-=+*oO#%@";

        for y in 0..rows {
            for x in 0..cols {
                let i = (y * frame.pixel_width + x) * 4;
                let (r, g, b) = (frame.pixels_rgba[i], frame.pixels_rgba[i + 1], frame.pixels_rgba[i + 2]);
                let glyph = RAMP[luma_u8(r, g, b) as usize * (RAMP.len() - 1) / 255];

                if self.last_fg != Some((r, g, b)) {
                    write_fg_rgb(out, r, g, b)?;
                    self.last_fg = Some((r, g, b));
                }
                out.write_all(&[glyph])?;
            }
            out.write_all(b"\r\n")?;
        }

        frame_end(frame, cols, rows, out)
    }
}

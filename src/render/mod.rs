mod ascii;
mod halfblock;

pub use ascii::AsciiRenderer;
pub use halfblock::HalfBlockRenderer;

use crate::config::RendererMode;
use std::io::Write;

/// One composited RGBA frame plus the terminal area it is shown in.
pub struct Frame<'a> {
    pub term_cols: u16,
    /// Rows given to the picture; the HUD sits below them.
    pub visual_rows: u16,
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub pixels_rgba: &'a [u8],
    pub hud: &'a str,
    pub hud_rows: u16,
    pub sync_updates: bool,
}

pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub fn make_renderer(mode: RendererMode) -> Box<dyn Renderer> {
    match mode {
        RendererMode::Ascii => Box::new(AsciiRenderer::new()),
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
    }
}

/// Rec. 601 luma.
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

pub(crate) fn write_fg_rgb(out: &mut dyn Write, r: u8, g: u8, b: u8) -> std::io::Result<()> {
    write!(out, "\x1b[38;2;{r};{g};{b}m")
}

pub(crate) fn write_bg_rgb(out: &mut dyn Write, r: u8, g: u8, b: u8) -> std::io::Result<()> {
    write!(out, "\x1b[48;2;{r};{g};{b}m")
}

/// Validates the frame against a cell geometry of `px_w x px_h` pixels and
/// writes the frame preamble. Returns `(cols, visual_rows)` or `None` when
/// there is nothing sensible to draw.
pub(crate) fn frame_begin(
    frame: &Frame<'_>,
    px_w: usize,
    px_h: usize,
    out: &mut dyn Write,
) -> anyhow::Result<Option<(usize, usize)>> {
    let cols = frame.term_cols as usize;
    let rows = frame.visual_rows as usize;
    let (w, h) = (frame.pixel_width, frame.pixel_height);
    if cols == 0 || rows == 0 || w == 0 || h == 0 {
        return Ok(None);
    }
    if w != cols * px_w || h != rows * px_h {
        // Size changed between render and present; skip this one.
        return Ok(None);
    }
    if frame.pixels_rgba.len() < w.saturating_mul(h).saturating_mul(4) {
        return Ok(None);
    }

    if frame.sync_updates {
        out.write_all(b"\x1b[?2026h")?;
    }
    // Home, reset, autowrap off while painting full-width rows.
    out.write_all(b"\x1b[H\x1b[0m\x1b[?7l")?;
    Ok(Some((cols, rows)))
}

/// Writes the HUD rows, restores autowrap and closes the sync bracket.
pub(crate) fn frame_end(frame: &Frame<'_>, cols: usize, rows: usize, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut hud_lines = frame.hud.lines();
    for i in 0..frame.hud_rows as usize {
        write!(out, "\x1b[{};1H\x1b[0m\x1b[2K", rows + i + 1)?;
        if let Some(line) = hud_lines.next() {
            let clipped: String = line.chars().take(cols).collect();
            out.write_all(clipped.as_bytes())?;
        }
    }
    out.write_all(b"\x1b[0m\x1b[?7h")?;
    if frame.sync_updates {
        out.write_all(b"\x1b[?2026l")?;
    }
    out.flush()?;
    Ok(())
}

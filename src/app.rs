use crate::config::Config;
use crate::noise_field::PerlinField;
use crate::render::{make_renderer, Frame};
use crate::terminal::{terminal_size, TerminalGuard};
use crate::visual::{LayoutReport, MandalaEngine};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io::{stdout, BufWriter};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Relayout,
    TogglePause,
    ToggleHud,
}

pub fn key_action(code: KeyCode, mods: KeyModifiers) -> Option<KeyAction> {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return Some(KeyAction::Quit);
    }
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Relayout),
        KeyCode::Char(' ') => Some(KeyAction::TogglePause),
        KeyCode::Char('i') | KeyCode::Char('I') => Some(KeyAction::ToggleHud),
        _ => None,
    }
}

/// Canvas pixels for a terminal of `size` cells with `hud_rows` reserved
/// at the bottom. Always at least one visual row.
pub fn canvas_size(size: (u16, u16), hud_rows: u16, cell_pixels: (usize, usize)) -> (usize, usize) {
    let (cols, rows) = size;
    let visual_rows = rows.saturating_sub(hud_rows).max(1);
    (
        (cols.max(1) as usize).saturating_mul(cell_pixels.0),
        (visual_rows as usize).saturating_mul(cell_pixels.1),
    )
}

pub fn hud_rows(show_hud: bool, term_rows: u16) -> u16 {
    if show_hud && term_rows > 2 { 1 } else { 0 }
}

pub fn build_hud(fps: f32, report: &LayoutReport, paused: bool, renderer: &str) -> String {
    format!(
        "FPS {:>5.1} | ornaments {} | degraded {} | overlaps {} | {}x{} | {}{} | r relayout  space pause  i hud  q quit",
        fps,
        report.ornaments,
        report.degraded,
        report.overlapping_pairs,
        report.width,
        report.height,
        renderer,
        if paused { " | PAUSED" } else { "" },
    )
}

pub fn build_engine(cfg: &Config) -> MandalaEngine {
    let mut rng = cfg.rng();
    let noise = PerlinField::with_detail(rng.u32(..), cfg.noise_octaves, cfg.noise_falloff);
    MandalaEngine::new(cfg.scene_settings(), Box::new(noise), rng)
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let mut engine = build_engine(&cfg);
    let mut renderer = make_renderer(cfg.renderer);
    let cell_pixels = cfg.renderer.cell_pixels();

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(stdout());

    let mut show_hud = cfg.hud;
    let mut paused = false;
    let mut last_size = terminal_size()?;
    let mut hud = hud_rows(show_hud, last_size.1);
    let (w, h) = canvas_size(last_size, hud, cell_pixels);
    engine.resize(w, h);
    log::info!("started {}x{} canvas, renderer {}", w, h, renderer.name());

    let mut fps = FpsCounter::new();
    let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);

    loop {
        let now = Instant::now();
        let mut size = last_size;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => match key_action(k.code, k.modifiers) {
                    Some(KeyAction::Quit) => return Ok(()),
                    Some(KeyAction::Relayout) => engine.relayout(),
                    Some(KeyAction::TogglePause) => paused = !paused,
                    Some(KeyAction::ToggleHud) => show_hud = !show_hud,
                    None => {}
                },
                Event::Resize(c, r) => size = (c.max(1), r.max(1)),
                _ => {}
            }
        }

        // Resize events can be missed by some terminals.
        let polled = terminal_size()?;
        if polled != last_size {
            size = polled;
        }
        let wanted_hud = hud_rows(show_hud, size.1);
        if size != last_size || wanted_hud != hud {
            last_size = size;
            hud = wanted_hud;
            let (w, h) = canvas_size(last_size, hud, cell_pixels);
            engine.resize(w, h);
        }

        let hud_text = if hud > 0 {
            build_hud(fps.fps(), &engine.layout_report(), paused, renderer.name())
        } else {
            String::new()
        };
        let (pixel_width, pixel_height) = engine.size();
        let pixels = if paused { engine.redraw() } else { engine.render_frame() };

        let frame = Frame {
            term_cols: last_size.0,
            visual_rows: last_size.1.saturating_sub(hud).max(1),
            pixel_width,
            pixel_height,
            pixels_rgba: pixels,
            hud: &hud_text,
            hud_rows: hud,
            sync_updates: cfg.sync_updates,
        };
        renderer.render(&frame, &mut out)?;
        fps.tick();

        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let dt = self.last.elapsed().as_secs_f32();
        if dt >= 0.5 {
            self.fps = self.frames as f32 / dt;
            self.frames = 0;
            self.last = Instant::now();
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}

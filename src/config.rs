use clap::{Parser, ValueEnum};

use crate::noise_field::{DEFAULT_FALLOFF, DEFAULT_OCTAVES};
use crate::visual::{SceneSettings, DEFAULT_HALO_INTENSITY};

#[derive(Parser, Debug, Clone)]
#[command(name = "mandala-garden", version, about = "Noise-animated mandala garden for the terminal")]
pub struct Config {
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    /// Large spoked ornaments, placed first.
    #[arg(long, default_value_t = 5)]
    pub spokes: usize,

    /// Small dotted ornaments packed around the large ones.
    #[arg(long, default_value_t = 7)]
    pub dots: usize,

    #[arg(long, default_value_t = DEFAULT_HALO_INTENSITY)]
    pub halo_intensity: f32,

    #[arg(long, default_value_t = DEFAULT_OCTAVES)]
    pub noise_octaves: u32,

    #[arg(long, default_value_t = DEFAULT_FALLOFF)]
    pub noise_falloff: f32,

    /// Fixes layout and noise for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub hud: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(alias = "ansi", alias = "text")]
    Ascii,
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
}

impl RendererMode {
    /// Canvas pixels per terminal cell, (columns, rows).
    pub fn cell_pixels(self) -> (usize, usize) {
        match self {
            Self::Ascii => (1, 1),
            Self::HalfBlock => (1, 2),
        }
    }
}

impl Config {
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings::new(self.spokes, self.dots, self.halo_intensity)
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

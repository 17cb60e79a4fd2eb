use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use anyhow::{bail, Context, Result};
use clap::Parser;
use mandala_garden::noise_field::{PerlinField, DEFAULT_FALLOFF, DEFAULT_OCTAVES};
use mandala_garden::visual::{MandalaEngine, SceneSettings, DEFAULT_HALO_INTENSITY};

const DEFAULT_OUTPUT: &str = "export.mp4";
const DEFAULT_SEED: u64 = 0x4D41_4E44;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "export_video",
    version,
    about = "Headless mandala render (raw RGBA frames -> MP4 via ffmpeg)"
)]
pub(crate) struct Cli {
    #[arg(long, value_name = "MP4", default_value = DEFAULT_OUTPUT)]
    pub(crate) out: PathBuf,

    #[arg(long, default_value_t = 1280)]
    pub(crate) width: usize,

    #[arg(long, default_value_t = 720)]
    pub(crate) height: usize,

    #[arg(long, default_value_t = 60)]
    pub(crate) fps: u32,

    #[arg(long, default_value_t = 600)]
    pub(crate) frames: usize,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub(crate) seed: u64,

    #[arg(long, default_value_t = 5)]
    pub(crate) spokes: usize,

    #[arg(long, default_value_t = 7)]
    pub(crate) dots: usize,

    #[arg(long, default_value_t = DEFAULT_HALO_INTENSITY)]
    pub(crate) halo_intensity: f32,
}

pub(crate) fn validate_args(args: &Cli) -> Result<()> {
    let checks = [
        ("--width", args.width),
        ("--height", args.height),
        ("--fps", args.fps as usize),
        ("--frames", args.frames),
    ];
    for (flag, value) in checks {
        if value == 0 {
            bail!("{flag} must be >= 1");
        }
    }
    Ok(())
}

pub(crate) fn build_engine(args: &Cli) -> MandalaEngine {
    let mut rng = fastrand::Rng::with_seed(args.seed);
    let noise = PerlinField::with_detail(rng.u32(..), DEFAULT_OCTAVES, DEFAULT_FALLOFF);
    let settings = SceneSettings::new(args.spokes, args.dots, args.halo_intensity);
    let mut engine = MandalaEngine::new(settings, Box::new(noise), rng);
    engine.resize(args.width, args.height);
    engine
}

/// Renders `frames` ticks into `sink`, one raw RGBA frame after another.
pub(crate) fn render_frames(engine: &mut MandalaEngine, frames: usize, sink: &mut dyn Write) -> Result<()> {
    for idx in 0..frames {
        let pixels = engine.render_frame();
        sink.write_all(pixels)
            .with_context(|| format!("write frame {idx} to ffmpeg stdin"))?;
    }
    Ok(())
}

/// Encoder command line: raw RGBA on stdin, H.264 MP4 out.
pub(crate) fn encoder_args(args: &Cli) -> Vec<OsString> {
    let mut argv: Vec<OsString> = [
        "-hide_banner", "-loglevel", "error", "-y",
        "-f", "rawvideo", "-pix_fmt", "rgba",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    argv.push("-video_size".into());
    argv.push(format!("{}x{}", args.width, args.height).into());
    argv.push("-framerate".into());
    argv.push(args.fps.to_string().into());
    argv.extend(
        ["-i", "-", "-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"]
            .into_iter()
            .map(OsString::from),
    );
    argv.push(args.out.clone().into_os_string());
    argv
}

/// Folds the encoder's exit status into the streaming outcome. A broken pipe
/// usually means ffmpeg died first, so its status goes on top of the error.
pub(crate) fn check_encoder(streamed: Result<()>, status: ExitStatus, out: &Path) -> Result<()> {
    match streamed {
        Err(err) => Err(err.context(format!("ffmpeg stopped early ({status})"))),
        Ok(()) if !status.success() => {
            bail!("ffmpeg failed ({status}) writing {}", out.display())
        }
        Ok(()) => Ok(()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}

fn run(args: Cli) -> Result<()> {
    validate_args(&args)?;
    ensure_parent_dir(&args.out)?;

    let mut engine = build_engine(&args);
    let report = engine.layout_report();
    log::info!(
        "layout: {} ornaments, {} degraded placements",
        report.ornaments,
        report.degraded
    );

    let mut encoder = spawn_encoder(&args)?;
    let Some(mut stdin) = encoder.stdin.take() else {
        bail!("ffmpeg started without a stdin pipe");
    };
    let streamed = render_frames(&mut engine, args.frames, &mut stdin);
    // Closing stdin lets ffmpeg finish the file.
    drop(stdin);

    let status = encoder.wait().context("wait for ffmpeg")?;
    check_encoder(streamed, status, &args.out)?;

    log::info!(
        "exported {} frames @ {} fps ({:.3}s) -> {}",
        args.frames,
        args.fps,
        args.frames as f32 / args.fps as f32,
        args.out.display()
    );
    Ok(())
}

fn ensure_parent_dir(out: &Path) -> Result<()> {
    match out.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display())),
        _ => Ok(()),
    }
}

fn spawn_encoder(args: &Cli) -> Result<Child> {
    let spawned = Command::new("ffmpeg")
        .args(encoder_args(args))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn();
    match spawned {
        Ok(child) => Ok(child),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            bail!("ffmpeg not found in PATH; install it to export video")
        }
        Err(err) => Err(err).with_context(|| format!("spawn ffmpeg for {}", args.out.display())),
    }
}

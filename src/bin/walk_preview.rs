use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::{Rgba, RgbaImage};
use sprite_sheet_tools::animation::{FrameClock, PlayerAnimator, SheetKind};
use sprite_sheet_tools::data::{SheetManifest, IDLE_SHEET, WALK_SHEET};
use sprite_sheet_tools::input::FacingConvention;
use sprite_sheet_tools::rendering::{save_png, SpriteSheet};
use sprite_sheet_tools::script::KeyScript;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Convention {
    /// Row order of the stock walk/idle sheets
    Legacy,
    /// 0 = right, counter-clockwise
    Sector,
}

impl From<Convention> for FacingConvention {
    fn from(convention: Convention) -> Self {
        match convention {
            Convention::Legacy => FacingConvention::Legacy,
            Convention::Sector => FacingConvention::Sector,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a key script through the walk animation and write PNG frames", long_about = None)]
struct Args {
    /// JSON sheet manifest (defaults to Walk.png 18x8 and idle.png 1x8)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Held keys and seconds, e.g. "d:1,wd:1,:0.5"
    #[arg(long, default_value = "d:1,wd:1,w:1,a:1,:1")]
    script: String,

    /// Frame rate
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Canvas width
    #[arg(long, default_value = "800")]
    width: u32,

    /// Canvas height
    #[arg(long, default_value = "800")]
    height: u32,

    /// Drawn sprite size in pixels
    #[arg(long, default_value = "300")]
    sprite_size: u32,

    /// Walking speed in pixels per second
    #[arg(long, default_value = "300")]
    speed: f32,

    /// How movement directions map to sheet rows
    #[arg(long, value_enum, default_value = "legacy")]
    convention: Convention,

    /// Directory for the rendered frames
    #[arg(long, default_value = "preview_frames")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    anyhow::ensure!(args.fps > 0, "fps must be positive");

    let manifest = match &args.manifest {
        Some(path) => SheetManifest::load(path)?,
        None => SheetManifest::default(),
    };

    let walk_descriptor = manifest
        .sheet(WALK_SHEET)
        .context("Manifest has no walk sheet")?;
    let idle_descriptor = manifest
        .sheet(IDLE_SHEET)
        .context("Manifest has no idle sheet")?;

    // Load both sheets
    let walk = SpriteSheet::load(walk_descriptor)?;
    let idle = SpriteSheet::load(idle_descriptor)?;

    let script = KeyScript::parse(&args.script).context("Invalid key script")?;
    let clock = FrameClock::new(args.fps as f32);
    let total_frames = clock.frame_count(script.duration());

    log::info!(
        "Preview: {}x{} @ {} fps, {} frames ({:.2}s)",
        args.width,
        args.height,
        args.fps,
        total_frames,
        script.duration()
    );

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {:?}", args.output_dir))?;

    let mut player = PlayerAnimator::new(walk.directions()?, idle.directions()?)
        .with_convention(args.convention.into())
        .with_speed(args.speed);

    let center = [args.width as f32 * 0.5, args.height as f32 * 0.5];
    let start = std::time::Instant::now();

    for frame_number in 0..total_frames {
        let time = clock.frame_to_time(frame_number);
        let dt = if frame_number == 0 { 0.0 } else { clock.delta() };
        let keys = script.keys_at(time);

        let frame = player.tick(&keys, time, dt)?;
        let sheet = match frame.sheet {
            SheetKind::Walk => &walk,
            SheetKind::Idle => &idle,
        };

        let mut canvas = RgbaImage::from_pixel(args.width, args.height, Rgba([0, 0, 0, 255]));
        sheet.draw_frame(
            &mut canvas,
            frame.rect,
            [center[0] + frame.position[0], center[1] + frame.position[1]],
            args.sprite_size,
        );

        let path = args.output_dir.join(format!("frame_{:05}.png", frame_number));
        save_png(&canvas, &path)?;

        // Progress logging
        if frame_number % args.fps as usize == 0 || frame_number == total_frames - 1 {
            log::info!(
                "Frame {}/{} | {:?} facing {} at ({:.0}, {:.0})",
                frame_number + 1,
                total_frames,
                frame.sheet,
                frame.facing,
                frame.position[0],
                frame.position[1]
            );
        }
    }

    let elapsed = start.elapsed();
    log::info!(
        "Rendered {} frames to {:?} in {:.2}s",
        total_frames,
        args.output_dir,
        elapsed.as_secs_f32()
    );
    Ok(())
}

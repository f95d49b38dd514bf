use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use sprite_sheet_tools::rendering::GridComposer;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tile a directory of same-sized images into a sprite sheet", long_about = None)]
struct Args {
    /// Directory whose image files become the sheet's frames, in file name order
    source_dir: PathBuf,

    /// Output PNG path (overwritten if it exists)
    output: PathBuf,

    /// Number of columns in the sheet
    columns: u32,

    /// Only use files whose name matches this regex
    #[arg(long)]
    filter: Option<String>,

    /// Also write a JSON descriptor of the sheet layout to this path
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Source: {:?}", args.source_dir);
    log::info!("Output: {:?} ({} columns)", args.output, args.columns);

    let mut composer = GridComposer::new(args.columns).context("Invalid column count")?;
    if let Some(pattern) = &args.filter {
        composer = composer.with_filter(Regex::new(pattern).context("Invalid filter regex")?);
    }

    let sheet = composer
        .run(&args.source_dir, &args.output)
        .with_context(|| format!("Failed to build sprite sheet from {:?}", args.source_dir))?;

    if let Some(manifest_path) = &args.manifest {
        let name = args
            .output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sheet".to_string());

        sheet
            .descriptor(&name, &args.output)
            .save(manifest_path)
            .context("Failed to write sheet manifest")?;
    }

    log::info!(
        "Done! {} frames in {}x{} cells of {}x{} px",
        sheet.frames.len(),
        sheet.layout.columns,
        sheet.layout.rows,
        sheet.layout.cell_width,
        sheet.layout.cell_height
    );
    Ok(())
}

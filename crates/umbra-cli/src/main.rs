//! Umbra CLI - Command-line interface for offline SDF raymarching

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use umbra_core::prelude::*;

#[derive(Parser)]
#[command(name = "umbra")]
#[command(about = "Raymarch a signed-distance scene over an image", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene description to an image file
    Render {
        /// Scene description (.toml or .json), uses the default scene if not provided
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Image to composite over; its size overrides --width/--height
        #[arg(short, long)]
        background: Option<PathBuf>,

        /// Output image file (format auto-detected from extension)
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,

        /// Image width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Image height
        #[arg(long, default_value = "720")]
        height: u32,

        /// Clamp out-of-range settings instead of rejecting them
        #[arg(long)]
        clamp: bool,
    },

    /// Write the default scene description
    Init {
        /// Output file (.toml or .json)
        #[arg(short, long, default_value = "scene.toml")]
        output: PathBuf,
    },

    /// Validate a scene description without rendering
    Check {
        /// Scene description (.toml or .json)
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            background,
            output,
            width,
            height,
            clamp,
        } => {
            run_render(
                config.as_deref(),
                background.as_deref(),
                &output,
                (width, height),
                clamp,
            )?;
        }
        Commands::Init { output } => {
            run_init(&output)?;
        }
        Commands::Check { config } => {
            run_check(&config)?;
        }
    }

    Ok(())
}

fn load_scene(config: Option<&Path>) -> Result<SceneDescription> {
    match config {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene from {}", path.display())),
        None => {
            tracing::info!("No scene given, using the default scene");
            Ok(SceneDescription::default())
        }
    }
}

fn run_render(
    config: Option<&Path>,
    background: Option<&Path>,
    output: &Path,
    size: (u32, u32),
    clamp: bool,
) -> Result<()> {
    let mut scene = load_scene(config)?;
    if clamp {
        scene.settings = scene.settings.clamp_to_range();
    } else {
        scene
            .settings
            .validate()
            .context("Invalid scene settings (pass --clamp to clamp them)")?;
    }

    let background = match background {
        Some(path) => image::open(path)
            .with_context(|| format!("Failed to open background {}", path.display()))?
            .to_rgba32f(),
        None => gradient_background(size.0, size.1, Vec3::new(0.35, 0.45, 0.65), Vec3::ONE),
    };
    let (width, height) = background.dimensions();
    if width == 0 || height == 0 {
        anyhow::bail!("Cannot render an empty {}x{} image", width, height);
    }

    println!(
        "Rendering to {} ({}x{})...",
        output.display(),
        width,
        height
    );

    let params = scene.frame(width, height);
    let frame = render_frame(&params, width, height, &background)?;

    let img = image::DynamicImage::ImageRgba32F(frame.image).to_rgba8();
    img.save(output)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    println!(
        "Saved to: {} ({} hits, {} misses)",
        output.display(),
        frame.stats.hits,
        frame.stats.misses
    );

    Ok(())
}

fn run_init(output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }

    SceneDescription::default()
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote default scene to {}", output.display());

    Ok(())
}

fn run_check(config: &Path) -> Result<()> {
    let scene = load_scene(Some(config))?;

    match scene.settings.validate() {
        Ok(()) => {
            let camera = &scene.camera;
            println!("{} is valid", config.display());
            println!(
                "  camera: {} -> {}, fov {} deg",
                camera.position, camera.target, camera.fov_degrees
            );
            println!(
                "  march: max distance {}, {} iterations, accuracy {}",
                scene.settings.march.max_distance,
                scene.settings.march.max_iterations,
                scene.settings.march.accuracy
            );
            Ok(())
        }
        Err(e) => {
            let clamped = scene.settings.clamp_to_range();
            eprintln!("{} is invalid: {}", config.display(), e);
            eprintln!(
                "Clamped march settings would be: max distance {}, {} iterations, accuracy {}",
                clamped.march.max_distance,
                clamped.march.max_iterations,
                clamped.march.accuracy
            );
            Err(e.into())
        }
    }
}

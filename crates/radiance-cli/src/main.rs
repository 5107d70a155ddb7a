//! Radiance CLI - Command-line interface for 2D radiance cascades

mod scene_file;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use radiance_core::prelude::*;
use scene_file::SceneFile;
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "radiance")]
#[command(about = "2D global illumination with radiance cascades", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Light a scene and write its irradiance to an image
    Render {
        /// Scene description (.json), uses the demo scene if not provided
        #[arg(short, long)]
        scene: Option<PathBuf>,

        /// Output image file (.png)
        #[arg(short, long, default_value = "irradiance.png")]
        output: PathBuf,

        /// Demo scene width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Demo scene height
        #[arg(long, default_value = "720")]
        height: u32,

        /// Multiplier applied before tone mapping
        #[arg(long, default_value = "1.0")]
        exposure: f32,

        #[command(flatten)]
        topology: TopologyArgs,
    },

    /// Print the cascade layout for a scene size
    Info {
        /// Scene width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Scene height
        #[arg(long, default_value = "720")]
        height: u32,

        #[command(flatten)]
        topology: TopologyArgs,
    },

    /// Print the irradiance at a single point
    Sample {
        /// Scene description (.json), uses the demo scene if not provided
        #[arg(short, long)]
        scene: Option<PathBuf>,

        /// Query point X
        #[arg(short, allow_hyphen_values = true)]
        x: f32,

        /// Query point Y
        #[arg(short, allow_hyphen_values = true)]
        y: f32,

        /// Demo scene width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Demo scene height
        #[arg(long, default_value = "720")]
        height: u32,

        #[command(flatten)]
        topology: TopologyArgs,
    },
}

/// Overrides for the cascade topology parameters
#[derive(Args)]
struct TopologyArgs {
    /// Probe spacing and first interval length of cascade 0
    #[arg(long)]
    base_interval: Option<f32>,

    /// Directions per probe in cascade 0
    #[arg(long)]
    base_directions: Option<u32>,
}

impl TopologyArgs {
    fn apply(&self, mut config: CascadeConfig) -> CascadeConfig {
        if let Some(interval) = self.base_interval {
            config = config.with_base_interval(interval);
        }
        if let Some(directions) = self.base_directions {
            config = config.with_base_directions(directions);
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            output,
            width,
            height,
            exposure,
            topology,
        } => {
            let file = SceneFile::load_or_demo(scene.as_deref(), width as f32, height as f32)?;
            run_render(&file, &topology, &output, exposure)?;
        }
        Commands::Info {
            width,
            height,
            topology,
        } => {
            let config = topology.apply(CascadeConfig::default());
            run_info(Vec2::new(width as f32, height as f32), config)?;
        }
        Commands::Sample {
            scene,
            x,
            y,
            width,
            height,
            topology,
        } => {
            let file = SceneFile::load_or_demo(scene.as_deref(), width as f32, height as f32)?;
            run_sample(&file, &topology, Vec2::new(x, y))?;
        }
    }

    Ok(())
}

/// Build the hierarchy for a scene file and run one update cycle
fn lit_hierarchy(file: &SceneFile, topology: &TopologyArgs) -> Result<CascadeHierarchy> {
    let config = topology.apply(file.config);
    let mut hierarchy = CascadeHierarchy::new(file.size, config)
        .context("Failed to build cascade hierarchy")?;

    let stats = hierarchy.update(&file.scene, &file.light);
    tracing::info!(
        "Traced {} rays over {} cascades in {:.1} ms ({} hits, {} escaped)",
        stats.rays_traced,
        hierarchy.cascade_count(),
        stats.duration.as_secs_f64() * 1000.0,
        stats.hits,
        stats.escapes
    );

    Ok(hierarchy)
}

fn run_render(file: &SceneFile, topology: &TopologyArgs, output: &Path, exposure: f32) -> Result<()> {
    let width = file.size.x.round().max(1.0) as u32;
    let height = file.size.y.round().max(1.0) as u32;

    println!(
        "Rendering irradiance to {} ({}x{})...",
        output.display(),
        width,
        height
    );

    let hierarchy = lit_hierarchy(file, topology)?;
    let map = hierarchy.irradiance_map(width, height)?;

    let img = image::RgbImage::from_fn(width, height, |x, y| {
        let e = map[(y * width + x) as usize];
        image::Rgb(tone_map(e * exposure))
    });
    img.save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Saved to: {}", output.display());
    Ok(())
}

fn run_info(size: Vec2, config: CascadeConfig) -> Result<()> {
    let hierarchy = CascadeHierarchy::new(size, config)?;

    println!(
        "Scene {}x{}, {} cascades",
        size.x,
        size.y,
        hierarchy.cascade_count()
    );
    println!(
        "{:>7} {:>9} {:>15} {:>20} {:>10}",
        "cascade", "probes", "spacing", "interval", "directions"
    );
    for layout in hierarchy.layouts() {
        println!(
            "{:>7} {:>9} {:>15} {:>20} {:>10}",
            layout.index,
            format!("{}x{}", layout.probe_count.x, layout.probe_count.y),
            format!("{:.1}x{:.1}", layout.spacing.x, layout.spacing.y),
            format!("[{:.0}, {:.0})", layout.interval_start, layout.interval_end()),
            layout.directions
        );
    }

    Ok(())
}

fn run_sample(file: &SceneFile, topology: &TopologyArgs, point: Vec2) -> Result<()> {
    let hierarchy = lit_hierarchy(file, topology)?;
    let e = hierarchy.sample_irradiance(point);
    println!("{:.6} {:.6} {:.6}", e.x, e.y, e.z);
    Ok(())
}

/// Reinhard tone mapping followed by gamma encoding
fn tone_map(e: Vec3) -> [u8; 3] {
    let mapped = e.max(Vec3::ZERO) / (Vec3::ONE + e.max(Vec3::ZERO));
    let encoded = mapped.powf(1.0 / 2.2) * 255.0;
    [
        encoded.x.round() as u8,
        encoded.y.round() as u8,
        encoded.z.round() as u8,
    ]
}

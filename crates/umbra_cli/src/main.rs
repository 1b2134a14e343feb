use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use umbra_renderer::{load_scene, presets, render, save_image, Camera, RenderConfig, SceneDescription};

/// Built-in scenes selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    ThreeSpheres,
    RandomSpheres,
}

/// Render a sphere scene with the Umbra path tracer.
#[derive(Debug, Parser)]
#[command(name = "umbra", version, about)]
struct Opt {
    /// JSON scene file; overrides --preset
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Built-in scene to render when no scene file is given
    #[arg(long, value_enum, default_value = "three-spheres")]
    preset: Preset,

    /// Output image (.ppm, or any format the image crate can write, e.g. .png)
    #[arg(short, long, default_value = "image.ppm")]
    output: PathBuf,

    #[arg(long, default_value_t = 400)]
    width: u32,

    #[arg(long, default_value_t = 225)]
    height: u32,

    /// Samples per pixel
    #[arg(short = 's', long, default_value_t = 100)]
    samples: u32,

    /// Maximum bounces per path
    #[arg(short = 'd', long, default_value_t = 50)]
    max_depth: u32,

    /// Worker threads (defaults to all cores)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Seed for reproducible renders and random presets
    #[arg(long)]
    seed: Option<u64>,

    /// Print the scene as JSON instead of rendering it
    #[arg(long)]
    dump_scene: bool,
}

impl Opt {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            image_width: self.width,
            image_height: self.height,
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            threads: self.threads,
            seed: self.seed,
        }
    }

    fn scene(&self) -> Result<SceneDescription> {
        match &self.scene {
            Some(path) => {
                load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))
            }
            None => Ok(match self.preset {
                Preset::ThreeSpheres => presets::three_spheres(),
                Preset::RandomSpheres => presets::random_spheres(self.seed.unwrap_or(0)),
            }),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();
    log::debug!("{:?}", opt);

    let description = opt.scene()?;
    if opt.dump_scene {
        println!("{}", description.to_json_string()?);
        return Ok(());
    }

    let config = opt.render_config();
    config.validate().context("Invalid render settings")?;

    let scene = description.build().context("Failed to build scene")?;
    let camera = Camera::new(&scene.camera, config.aspect_ratio()).context("Failed to set up camera")?;

    let image = render(&camera, &scene.world, &config).context("Render failed")?;
    save_image(&image, &opt.output)
        .with_context(|| format!("Failed to save {}", opt.output.display()))?;

    Ok(())
}

//! Umbra renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! surfaces, lit only by a sky gradient.
//!
//! # Example
//!
//! ```ignore
//! use umbra_renderer::{presets, render, save_image, Camera, RenderConfig};
//!
//! let config = RenderConfig::default().with_resolution(400, 225).with_seed(7);
//! let scene = presets::three_spheres();
//! let camera = Camera::new(&scene.camera, config.aspect_ratio())?;
//! let image = render(&camera, &scene.world, &config)?;
//! save_image(&image, "image.ppm")?;
//! ```

mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod renderer;
pub mod scene;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList, Primitive};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{save_image, write_ppm, OutputError, OutputResult};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, ImageBuffer,
    RenderConfig, T_MIN,
};
pub use scene::{load_scene, presets, Scene, SceneDescription, SceneError};
pub use sphere::Sphere;

/// Re-export the math types used throughout the renderer
pub use umbra_math::{Color, Interval, Point3, Ray, Vec3};

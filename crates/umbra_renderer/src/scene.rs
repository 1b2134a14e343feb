//! Scene descriptions and their conversion into renderable worlds.
//!
//! Scenes are plain JSON: a camera block, a table of named materials and a
//! list of objects referring to materials by name. Every object naming the
//! same material shares one `Arc<Material>`.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CameraSettings, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere};
use umbra_math::Point3;

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Object {index} refers to unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid object {index}: {reason}")]
    InvalidObject { index: usize, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A material entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refractive_index: f32,
    },
}

impl MaterialDesc {
    fn build(&self, name: &str) -> SceneResult<Material> {
        let invalid = |reason: String| SceneError::InvalidMaterial {
            name: name.to_string(),
            reason,
        };
        let check_albedo = |albedo: Color| {
            if albedo.min_element() >= 0.0 && albedo.max_element() <= 1.0 {
                Ok(albedo)
            } else {
                Err(invalid(format!("albedo {albedo:?} outside [0, 1]")))
            }
        };

        match *self {
            MaterialDesc::Lambertian { albedo } => {
                Ok(Lambertian::new(check_albedo(albedo)?).into())
            }
            MaterialDesc::Metal { albedo, fuzz } => {
                if !(0.0..=1.0).contains(&fuzz) {
                    log::warn!("Material '{}': fuzz {} clamped to [0, 1]", name, fuzz);
                }
                Ok(Metal::new(check_albedo(albedo)?, fuzz).into())
            }
            MaterialDesc::Dielectric { refractive_index } => {
                if refractive_index > 0.0 && refractive_index.is_finite() {
                    Ok(Dielectric::new(refractive_index).into())
                } else {
                    Err(invalid(format!(
                        "refractive_index must be positive, got {refractive_index}"
                    )))
                }
            }
        }
    }
}

/// An object entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    Sphere {
        center: Point3,
        /// Negative radii flip the normal (hollow shells)
        radius: f32,
        material: String,
    },
}

/// Everything needed to render: where the camera is and what it sees.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDesc>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

/// A built scene, ready for rendering.
pub struct Scene {
    pub camera: CameraSettings,
    pub world: HittableList,
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the scene back to pretty JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register a material under `name`, replacing any previous entry.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) {
        self.materials.insert(name.into(), material);
    }

    /// Add a sphere using a previously registered material.
    pub fn add_sphere(&mut self, center: Point3, radius: f32, material: impl Into<String>) {
        self.objects.push(ObjectDesc::Sphere {
            center,
            radius,
            material: material.into(),
        });
    }

    /// Resolve materials and build the world.
    pub fn build(&self) -> SceneResult<Scene> {
        let mut materials: BTreeMap<&str, Arc<Material>> = BTreeMap::new();
        for (name, desc) in &self.materials {
            materials.insert(name.as_str(), Arc::new(desc.build(name)?));
        }

        let mut world = HittableList::new();
        for (index, object) in self.objects.iter().enumerate() {
            match object {
                ObjectDesc::Sphere {
                    center,
                    radius,
                    material,
                } => {
                    if *radius == 0.0 || !radius.is_finite() || !center.is_finite() {
                        return Err(SceneError::InvalidObject {
                            index,
                            reason: format!("sphere at {center:?} with radius {radius}"),
                        });
                    }
                    let material = materials.get(material.as_str()).ok_or_else(|| {
                        SceneError::UnknownMaterial {
                            index,
                            name: material.clone(),
                        }
                    })?;
                    world.add(Sphere::new(*center, *radius, Arc::clone(material)));
                }
            }
        }

        for (name, material) in &materials {
            if Arc::strong_count(material) == 1 {
                log::warn!("Material '{}' is not used by any object", name);
            }
        }

        log::info!(
            "Built scene: {} objects, {} materials",
            world.len(),
            materials.len()
        );

        Ok(Scene {
            camera: self.camera,
            world,
        })
    }
}

/// Load a scene description from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = SceneDescription::from_json_str(&text)?;
    log::info!(
        "Loaded scene {} ({} objects)",
        path.display(),
        scene.objects.len()
    );
    Ok(scene)
}

/// Built-in scenes.
pub mod presets {
    use super::{MaterialDesc, SceneDescription};
    use crate::{CameraSettings, Color};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use umbra_math::random::{gen_f32, gen_range_f32, random_vec3};
    use umbra_math::Vec3;

    /// Ground, a diffuse ball, a hollow glass ball and a gold mirror ball.
    pub fn three_spheres() -> SceneDescription {
        let mut scene = SceneDescription {
            camera: CameraSettings::new()
                .with_position(Vec3::new(3.0, 3.0, 2.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
                .with_lens(20.0, 0.5, None),
            ..Default::default()
        };

        scene.add_material(
            "ground",
            MaterialDesc::Lambertian {
                albedo: Color::new(0.8, 0.8, 0.0),
            },
        );
        scene.add_material(
            "center",
            MaterialDesc::Lambertian {
                albedo: Color::new(0.1, 0.2, 0.5),
            },
        );
        scene.add_material(
            "glass",
            MaterialDesc::Dielectric {
                refractive_index: 1.5,
            },
        );
        scene.add_material(
            "gold",
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 0.0,
            },
        );

        scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "ground");
        scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, "center");
        // Hollow shell: outer surface plus an inward-facing inner surface
        scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "glass");
        scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, "glass");
        scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "gold");

        scene
    }

    /// The field of small random spheres around three large ones.
    pub fn random_spheres(seed: u64) -> SceneDescription {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scene = SceneDescription {
            camera: CameraSettings::new()
                .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
                .with_lens(20.0, 0.1, Some(10.0)),
            ..Default::default()
        };

        scene.add_material(
            "ground",
            MaterialDesc::Lambertian {
                albedo: Color::splat(0.5),
            },
        );
        scene.add_material(
            "glass",
            MaterialDesc::Dielectric {
                refractive_index: 1.5,
            },
        );
        scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

        for a in -11..11 {
            for b in -11..11 {
                let choose_mat = gen_f32(&mut rng);
                let center = Vec3::new(
                    a as f32 + 0.9 * gen_f32(&mut rng),
                    0.2,
                    b as f32 + 0.9 * gen_f32(&mut rng),
                );

                if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                    continue;
                }

                if choose_mat < 0.95 {
                    let name = format!("small_{a}_{b}");
                    let material = if choose_mat < 0.8 {
                        // Diffuse
                        MaterialDesc::Lambertian {
                            albedo: random_vec3(&mut rng, 0.0, 1.0) * random_vec3(&mut rng, 0.0, 1.0),
                        }
                    } else {
                        // Metal
                        MaterialDesc::Metal {
                            albedo: random_vec3(&mut rng, 0.5, 1.0),
                            fuzz: gen_range_f32(&mut rng, 0.0, 0.5),
                        }
                    };
                    scene.add_material(name.clone(), material);
                    scene.add_sphere(center, 0.2, name);
                } else {
                    scene.add_sphere(center, 0.2, "glass");
                }
            }
        }

        scene.add_material(
            "brown",
            MaterialDesc::Lambertian {
                albedo: Color::new(0.4, 0.2, 0.1),
            },
        );
        scene.add_material(
            "steel",
            MaterialDesc::Metal {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.0,
            },
        );
        scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, "glass");
        scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, "brown");
        scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, "steel");

        scene
    }
}

//! Camera for ray generation.

use crate::{RenderError, RenderResult};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use umbra_math::{random::random_in_unit_disk, unit_vector, Point3, Ray, Vec3};

/// User-facing camera parameters, as found in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter; 0 gives a pinhole camera
    pub aperture: f32,
    /// Distance to the plane of perfect focus, `|look_from - look_at|` if unset
    pub focus_dist: Option<f32>,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: None,
        }
    }
}

impl CameraSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: Option<f32>) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    fn validate(&self, aspect_ratio: f32) -> RenderResult<()> {
        if (self.look_from - self.look_at).length_squared() == 0.0 {
            return Err(RenderError::InvalidCamera(
                "look_from and look_at coincide".into(),
            ));
        }
        if self.vup.length_squared() == 0.0 {
            return Err(RenderError::InvalidCamera("vup is a zero vector".into()));
        }
        let w = self.look_from - self.look_at;
        if self.vup.cross(w).length_squared() == 0.0 {
            return Err(RenderError::InvalidCamera(
                "vup is parallel to the view direction".into(),
            ));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::InvalidCamera(format!(
                "vfov must be in (0, 180) degrees, got {}",
                self.vfov
            )));
        }
        if !(self.aperture >= 0.0) {
            return Err(RenderError::InvalidCamera(format!(
                "aperture must be non-negative, got {}",
                self.aperture
            )));
        }
        if let Some(focus_dist) = self.focus_dist {
            if !(focus_dist > 0.0) {
                return Err(RenderError::InvalidCamera(format!(
                    "focus_dist must be positive, got {focus_dist}"
                )));
            }
        }
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return Err(RenderError::InvalidCamera(format!(
                "aspect ratio must be positive, got {aspect_ratio}"
            )));
        }
        Ok(())
    }
}

/// Thin-lens camera. Immutable once built, so it can be shared by every
/// render worker.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Build the camera basis and viewport from its settings.
    pub fn new(settings: &CameraSettings, aspect_ratio: f32) -> RenderResult<Self> {
        settings.validate(aspect_ratio)?;

        let theta = settings.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = aspect_ratio * viewport_height;

        let w = unit_vector(settings.look_from - settings.look_at);
        let u = unit_vector(settings.vup.cross(w));
        let v = w.cross(u);

        let focus_dist = settings
            .focus_dist
            .unwrap_or_else(|| (settings.look_from - settings.look_at).length());

        let origin = settings.look_from;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        })
    }

    /// Generate a ray through image-plane coordinates `(s, t)` in [0, 1],
    /// with `(0, 0)` at the lower-left corner.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }

    /// Camera position (center of the lens).
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Unit vector pointing from the scene back towards the camera.
    pub fn w(&self) -> Vec3 {
        self.w
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

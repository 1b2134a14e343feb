//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use std::sync::Arc;
use umbra_math::{Interval, Point3, Ray, Vec3};

/// A sphere primitive.
///
/// A negative radius keeps the surface where `|radius|` puts it but flips the
/// outward normal, which is how hollow glass shells are modeled.
#[derive(Clone)]
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Geometric normal at a surface point, before facing it against a ray.
    ///
    /// Dividing by the signed radius points it inward for negative radii.
    pub fn outward_normal(&self, p: Point3) -> Vec3 {
        (p - self.center) / self.radius
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = self.outward_normal(ray.at(root));
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Sphere};
use umbra_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` against the ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the closest intersection with `t` inside `ray_t` (inclusive).
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// Every shape the renderer knows how to intersect.
pub enum Primitive {
    Sphere(Sphere),
    List(HittableList),
}

impl Hittable for Primitive {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::List(list) => list.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<HittableList> for Primitive {
    fn from(list: HittableList) -> Self {
        Primitive::List(list)
    }
}

/// A list of hittable objects, searched linearly.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Primitive>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.objects.push(object.into());
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the direct children.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.objects.iter()
    }
}

impl FromIterator<Primitive> for HittableList {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            let closest_so_far = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;
    use std::sync::Arc;

    fn grey() -> Arc<Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)).into())
    }

    #[test]
    fn test_set_face_normal_outside() {
        let mat = Material::from(Lambertian::new(Vec3::ONE));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, &mat);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.p, Vec3::ZERO);
    }

    #[test]
    fn test_set_face_normal_inside() {
        let mat = Material::from(Lambertian::new(Vec3::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, &mat);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_list_returns_closest_regardless_of_order() {
        let near = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, grey());
        let far = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let ray_t = Interval::new(0.001, f32::INFINITY);

        let mut front_first = HittableList::new();
        front_first.add(near.clone());
        front_first.add(far.clone());

        let mut back_first = HittableList::new();
        back_first.add(far);
        back_first.add(near);

        for world in [&front_first, &back_first] {
            let rec = world.hit(&ray, ray_t).expect("ray should hit");
            assert!((rec.t - 1.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_nested_list() {
        let mut inner = HittableList::new();
        inner.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey()));

        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, grey()));
        world.add(inner);
        assert_eq!(world.len(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit");
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_list_respects_t_max() {
        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey()));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::new(0.001, 3.0)).is_none());
    }
}

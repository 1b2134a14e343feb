//! Surface materials and how they scatter light.

use crate::hittable::HitRecord;
use rand::RngCore;
use umbra_math::{
    near_zero,
    random::{random_in_unit_sphere, random_unit_vector},
    reflect, try_refract, unit_vector, Color, Ray, Refraction,
};

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel fraction of the scattered light that survives
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// Every surface response the renderer supports.
///
/// Materials are immutable after construction and shared between
/// primitives (and worker threads) behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => Some(m.scatter(rec, rng)),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => Some(m.scatter(ray_in, rec, rng)),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(unit_vector(ray_in.direction()), rec.normal);
        let scattered_dir = if self.fuzz > 0.0 {
            reflected + self.fuzz * random_in_unit_sphere(rng)
        } else {
            reflected
        };

        // Fuzz can push the reflection below the surface; absorb those
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = unit_vector(ray_in.direction());
        let direction = match try_refract(unit_direction, rec.normal, refraction_ratio, rng) {
            Refraction::Refracted(direction) => direction,
            Refraction::MustReflect => reflect(unit_direction, rec.normal),
        };

        ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use umbra_math::Vec3;

    fn record<'a>(ray: &Ray, material: &'a Material) -> HitRecord<'a> {
        // Hit a floor at y = 0 facing up
        HitRecord::new(ray, 1.0, Vec3::Y, material)
    }

    #[test]
    fn test_lambertian_scatter() {
        let albedo = Color::new(0.8, 0.3, 0.1);
        let material = Material::from(Lambertian::new(albedo));
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record(&ray, &material);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let result = material
                .scatter(&ray, &rec, &mut rng)
                .expect("lambertian never absorbs");
            assert_eq!(result.scattered.origin(), rec.p);
            assert_eq!(result.attenuation, albedo);
            // normal + unit vector stays in the closed upper hemisphere
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_metal_mirror() {
        let material = Material::from(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(2.0, -2.0, 0.0));
        let rec = record(&ray, &material);
        let mut rng = StdRng::seed_from_u64(1);

        let expected = reflect(unit_vector(ray.direction()), Vec3::Y);
        for _ in 0..10 {
            let result = material
                .scatter(&ray, &rec, &mut rng)
                .expect("mirror reflection stays above the surface");
            assert_eq!(result.scattered.direction(), expected);
            assert_eq!(result.scattered.origin(), rec.p);
            assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
        }
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
        assert_eq!(Metal::new(Color::ONE, 0.3).fuzz(), 0.3);
    }

    #[test]
    fn test_metal_absorbs_below_surface() {
        // Full fuzz on a grazing reflection sends some rays into the surface
        let material = Material::from(Metal::new(Color::ONE, 1.0));
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = record(&ray, &material);
        let mut rng = StdRng::seed_from_u64(3);

        let mut absorbed = 0;
        for _ in 0..200 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_matched_index_does_not_bend() {
        let material = Material::from(Dielectric::new(1.0));
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -3.0, 0.0));
        let rec = record(&ray, &material);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..50 {
            let result = material
                .scatter(&ray, &rec, &mut rng)
                .expect("dielectric never absorbs");
            assert!((result.scattered.direction() - Vec3::NEG_Y).length() < 1e-6);
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::from(Dielectric::new(1.5));
        // Inside the glass heading out at a shallow angle
        let ray = Ray::new(Vec3::new(-1.0, 0.2, 0.0), Vec3::new(1.0, -0.2, 0.0));
        let mut rec = record(&ray, &material);
        rec.front_face = false;
        let mut rng = StdRng::seed_from_u64(9);

        let result = material
            .scatter(&ray, &rec, &mut rng)
            .expect("dielectric never absorbs");
        let expected = reflect(unit_vector(ray.direction()), rec.normal);
        assert!((result.scattered.direction() - expected).length() < 1e-6);
        assert_eq!(result.attenuation, Color::ONE);
    }

    #[test]
    fn test_dielectric_grazing_entry_reflects_or_refracts() {
        let material = Material::from(Dielectric::new(1.5));
        // Outside the glass, skimming the surface on the way in
        let ray = Ray::new(Vec3::new(-1.0, 0.2, 0.0), Vec3::new(1.0, -0.2, 0.0));
        let rec = record(&ray, &material);
        assert!(rec.front_face);
        let mut rng = StdRng::seed_from_u64(21);

        let mirror = reflect(unit_vector(ray.direction()), rec.normal);
        let mut reflected = 0;
        let mut refracted = 0;
        for _ in 0..500 {
            let result = material
                .scatter(&ray, &rec, &mut rng)
                .expect("dielectric never absorbs");
            assert_eq!(result.attenuation, Color::ONE);
            assert_eq!(result.scattered.origin(), rec.p);

            let direction = result.scattered.direction();
            if direction.y > 0.0 {
                assert!((direction - mirror).length() < 1e-6);
                reflected += 1;
            } else {
                assert!((direction.length() - 1.0).abs() < 1e-5);
                refracted += 1;
            }
        }
        assert!(reflected > 0);
        assert!(refracted > 0);
    }
}

//! Umbra math - vectors, rays and sampling helpers for the path tracer.
//!
//! `Vec3` comes straight from glam; `Point3` and `Color` are aliases used
//! where a vector is meant as a position or an RGB triple.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub mod random;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{near_zero, reflect, reflectance, refract, try_refract, unit_vector, Refraction};

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color. Components are nominally in [0, 1] but never clamped
/// until quantization.
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sample_vec(rng: &mut StdRng) -> Vec3 {
        Vec3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        )
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn test_negation_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let v = sample_vec(&mut rng);
            assert_eq!(-(-v), v);
            assert_eq!(v + (-v), Vec3::ZERO);
        }
    }

    #[test]
    fn test_cross_anticommutative() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let a = sample_vec(&mut rng);
            let b = sample_vec(&mut rng);
            assert_eq!(a.cross(b), -(b.cross(a)));
        }
    }

    #[test]
    fn test_triple_product_cyclic() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let u = sample_vec(&mut rng);
            let v = sample_vec(&mut rng);
            let w = sample_vec(&mut rng);
            let a = u.dot(v.cross(w));
            let b = v.dot(w.cross(u));
            let c = w.dot(u.cross(v));
            let tol = 1e-3 * (1.0 + a.abs());
            assert!((a - b).abs() < tol, "{a} vs {b}");
            assert!((a - c).abs() < tol, "{a} vs {c}");
            // Repeating a vector collapses the volume
            assert!(u.dot(u.cross(w)).abs() < 1e-2);
        }
    }
}

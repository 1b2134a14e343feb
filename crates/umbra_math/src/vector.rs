//! Vector helpers layered on top of glam's `Vec3`.

use crate::random::gen_f32;
use crate::Vec3;
use rand::RngCore;

/// Per-component threshold below which a vector counts as zero.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Normalize a vector.
///
/// # Panics
///
/// Panics on a zero-length vector. No render path normalizes one on
/// purpose, so hitting this is a bug upstream rather than a NaN to carry.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    assert!(len_sq > 0.0, "cannot normalize zero-length vector {v:?}");
    v / len_sq.sqrt()
}

/// True if every component is within `NEAR_ZERO_EPSILON` of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with the given eta ratio.
///
/// Pure Snell's law; callers decide beforehand whether refraction is
/// possible (see [`try_refract`]).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Outcome of an attempted refraction at a dielectric boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refraction {
    /// The ray passes through with this direction.
    Refracted(Vec3),
    /// Total internal reflection, or the Schlick coin flip chose reflection.
    MustReflect,
}

/// Attempt to refract `unit_direction` through a surface with normal `n`.
///
/// The Schlick draw only happens when refraction is geometrically possible.
pub fn try_refract(
    unit_direction: Vec3,
    n: Vec3,
    refraction_ratio: f32,
    rng: &mut dyn RngCore,
) -> Refraction {
    let cos_theta = (-unit_direction).dot(n).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    let cannot_refract = refraction_ratio * sin_theta > 1.0;
    if cannot_refract || reflectance(cos_theta, refraction_ratio) > gen_f32(rng) {
        Refraction::MustReflect
    } else {
        Refraction::Refracted(refract(unit_direction, n, refraction_ratio))
    }
}

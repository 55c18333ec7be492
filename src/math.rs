/*
 * Math Module
 *
 * Small vector helpers shared by the steering rules: unit vectors that
 * degrade to zero, view-cone angles, squared distances and speed clamping.
 * Random helpers take the caller's generator instead of a global engine.
 */

use glam::Vec3;
use rand::Rng;

/// Unit vector in the direction of `v`, or `Vec3::ZERO` when `v` has no direction.
#[inline]
pub fn unit_or_zero(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Angle between two vectors in degrees, in `[0, 180]`.
///
/// A zero-length input has no direction and yields `0.0`, so it never
/// excludes anything from a view cone.
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f32 {
    let a = unit_or_zero(a);
    let b = unit_or_zero(b);
    if a == Vec3::ZERO || b == Vec3::ZERO {
        return 0.0;
    }

    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}

#[inline]
pub fn distance_squared(a: Vec3, b: Vec3) -> f32 {
    (a - b).length_squared()
}

#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

/// Limit the length of `v` to `max`. Identity when `|v| <= max`.
pub fn clamp_length(v: Vec3, max: f32) -> Vec3 {
    if v.length_squared() > max * max {
        unit_or_zero(v) * max
    } else {
        v
    }
}

/// Uniform sample in `[min, max)`; returns `min` for an empty range.
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Uniform point inside the box spanned by `min` and `max`.
pub fn random_point_in<R: Rng + ?Sized>(rng: &mut R, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        random_range(rng, min.x, max.x),
        random_range(rng, min.y, max.y),
        random_range(rng, min.z, max.z),
    )
}

/// Random vector with every component in `[0, 100)`.
pub fn random_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        random_range(rng, 0.0, 100.0),
        random_range(rng, 0.0, 100.0),
        random_range(rng, 0.0, 100.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn unit_of_zero_is_zero() {
        assert_eq!(unit_or_zero(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(unit_or_zero(Vec3::new(0.0, 3.0, 0.0)), Vec3::Y);
    }

    #[test]
    fn angle_between_axes() {
        assert!((angle_between_degrees(Vec3::X, Vec3::Y) - 90.0).abs() < 1e-4);
        assert!((angle_between_degrees(Vec3::X, -Vec3::X) - 180.0).abs() < 1e-3);
        assert_eq!(angle_between_degrees(Vec3::X, Vec3::X * 5.0), 0.0);
    }

    #[test]
    fn angle_with_zero_vector_is_unrestricted() {
        assert_eq!(angle_between_degrees(Vec3::ZERO, Vec3::X), 0.0);
        assert_eq!(angle_between_degrees(Vec3::X, Vec3::ZERO), 0.0);
        assert!(!angle_between_degrees(Vec3::ZERO, Vec3::ZERO).is_nan());
    }

    #[test]
    fn clamp_length_bounds_magnitude() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = Vec3::new(
                random_range(&mut rng, -50.0, 50.0),
                random_range(&mut rng, -50.0, 50.0),
                random_range(&mut rng, -50.0, 50.0),
            );
            let clamped = clamp_length(v, 5.0);
            assert!(clamped.length() <= 5.0 + 1e-4);
            if v.length() <= 5.0 {
                assert_eq!(clamped, v);
            }
        }
    }

    #[test]
    fn random_point_stays_in_box() {
        let mut rng = SmallRng::seed_from_u64(1);
        let min = Vec3::new(-20.0, 0.0, -20.0);
        let max = Vec3::new(20.0, 20.0, 20.0);
        for _ in 0..100 {
            let p = random_point_in(&mut rng, min, max);
            assert!(p.cmpge(min).all() && p.cmplt(max).all());
        }
    }
}

use glam::{Vec3, Vec4};

/// Rotate `pos` by the quaternion `q` (`x, y, z` = vector part, `w` = scalar
/// part).
///
/// Uses the vector form `pos + w·t + u × t` with `t = 2(u × pos)` instead of
/// the sandwich product `q · pos · q⁻¹`. For unit `q` both are equal.
///
/// `q` is not normalized. A non-unit quaternion yields a rotation combined
/// with a scale, and NaN components propagate to the result.
#[inline]
#[must_use]
pub fn rotate(pos: Vec3, q: Vec4) -> Vec3 {
    let u = q.truncate();
    let t = 2.0 * u.cross(pos);
    pos + q.w * t + u.cross(t)
}

#[cfg(test)]
mod tests {
    use glam::Quat;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn random_unit_quat(rng: &mut StdRng) -> Vec4 {
        loop {
            let q = Vec4::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            if q.length() > 1e-3 {
                return q.normalize();
            }
        }
    }

    #[test]
    fn identity_leaves_position_untouched() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..256 {
            let pos = Vec3::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
            );
            assert_eq!(rotate(pos, Vec4::new(0.0, 0.0, 0.0, 1.0)), pos);
        }
    }

    #[test]
    fn pure_scalar_quaternion_is_identity_for_any_w() {
        let pos = Vec3::new(1.5, -2.0, 3.25);
        for w in [0.0, 0.5, 1.0, -3.0, 42.0] {
            assert_eq!(rotate(pos, Vec4::new(0.0, 0.0, 0.0, w)), pos);
        }
    }

    #[test]
    fn half_turn_about_x() {
        let rotated = rotate(Vec3::Y, Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(rotated, Vec3::NEG_Y);
    }

    #[test]
    fn quarter_turn_about_z() {
        let q = Vec4::from(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        let rotated = rotate(Vec3::X, q);
        assert!(rotated.abs_diff_eq(Vec3::Y, 1e-6), "got {rotated}");
    }

    #[test]
    fn unit_quaternions_preserve_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1024 {
            let q = random_unit_quat(&mut rng);
            let pos = Vec3::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
            );
            let before = pos.length();
            let after = rotate(pos, q).length();
            assert!(
                (after - before).abs() <= 1e-5 * before.max(1.0),
                "length {before} became {after} under {q}"
            );
        }
    }

    #[test]
    fn matches_glam_sandwich_product() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..256 {
            let q = random_unit_quat(&mut rng);
            let pos = Vec3::new(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
            );
            let expected = Quat::from_vec4(q) * pos;
            assert!(rotate(pos, q).abs_diff_eq(expected, 1e-4));
        }
    }

    #[test]
    fn non_unit_quaternion_is_not_normalized() {
        // Scaling q by k gives pos + k^2 (R pos - pos), not R pos.
        let unit = Vec4::from(Quat::from_rotation_z(0.3));
        let pos = Vec3::new(1.0, 0.5, -2.0);
        let expected = 4.0 * rotate(pos, unit) - 3.0 * pos;
        let rotated = rotate(pos, unit * 2.0);
        assert!(rotated.abs_diff_eq(expected, 1e-4), "got {rotated}");
        assert!((rotated.length() - pos.length()).abs() > 1e-2);
    }

    #[test]
    fn nan_in_quaternion_propagates() {
        let rotated = rotate(Vec3::X, Vec4::new(f32::NAN, 0.0, 0.0, 1.0));
        assert!(rotated.is_nan());
        let rotated = rotate(Vec3::X, Vec4::new(0.0, 0.0, 0.0, f32::NAN));
        assert!(rotated.is_nan());
    }
}

use glam::{Vec3, Vec4};

/// Scale the rotated local position by `pos_scale.w`, then translate by
/// `pos_scale.xyz`.
///
/// The order is fixed: scale before translate. A zero scale collapses every
/// position onto the translation and a negative scale mirrors the primitive.
#[inline]
#[must_use]
pub fn place(rotated: Vec3, pos_scale: Vec4) -> Vec3 {
    rotated * pos_scale.w + pos_scale.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_applied_before_translation() {
        let world = place(Vec3::X, Vec4::new(10.0, 0.0, 0.0, 2.0));
        assert_eq!(world, Vec3::new(12.0, 0.0, 0.0));
    }

    #[test]
    fn zero_scale_collapses_to_translation() {
        let t = Vec4::new(-3.0, 4.5, 7.0, 0.0);
        for rotated in [Vec3::X, Vec3::new(-8.0, 2.0, 0.25), Vec3::splat(1e6)] {
            assert_eq!(place(rotated, t), t.truncate());
        }
    }

    #[test]
    fn negative_scale_mirrors() {
        let world =
            place(Vec3::new(1.0, 2.0, 3.0), Vec4::new(0.0, 0.0, 0.0, -1.0));
        assert_eq!(world, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn nan_scale_propagates() {
        let world = place(Vec3::ZERO, Vec4::new(1.0, 1.0, 1.0, f32::NAN));
        assert!(world.is_nan());
    }
}

use glam::Vec4;

/// Fragment stage: return the rasterizer-interpolated color unchanged.
///
/// No gamma correction, blending or alpha test happens here.
#[inline]
#[must_use]
pub fn pass_through(color: Vec4) -> Vec4 {
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_returned_bit_exact() {
        let color = Vec4::new(0.2, 0.4, 0.6, 1.0);
        let out = pass_through(color);
        assert_eq!(
            out.to_array().map(f32::to_bits),
            color.to_array().map(f32::to_bits)
        );
    }

    #[test]
    fn out_of_range_values_are_not_clamped() {
        let color = Vec4::new(-1.0, 2.5, f32::INFINITY, 0.0);
        assert_eq!(pass_through(color), color);
    }
}

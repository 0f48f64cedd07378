/// Cubic ease `t²(3 - 2t)`, input clamped to `[0, 1]`.
///
/// The output is clamped as well so rounding near `t = 1` can never push an
/// opacity above one.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::smoothstep;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn clamps_out_of_range_input() {
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.5), 1.0);
    }
}

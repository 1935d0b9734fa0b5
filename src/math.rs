//! Types, aliases and helper operations for doing math with `ultraviolet`.
pub use ultraviolet as uv;

/// The vector type used throughout the crate.
///
/// Shapes are axis-aligned and offsets are pure translations,
/// so plain vectors are all the transform machinery we need.
pub type Vec2 = uv::DVec2;

/// The z component of the cross product of two plane vectors.
///
/// Positive when `b` points to the left of `a`.
#[inline]
pub fn perp_dot(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Componentwise exact equality.
///
/// Some collision tests are defined in terms of exact coordinate matches
/// (points on an integer grid); this spells out that no tolerance is involved.
#[inline]
pub fn same_point(a: Vec2, b: Vec2) -> bool {
    a.x == b.x && a.y == b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perp_dot_signs() {
        let right = Vec2::new(1.0, 0.0);
        let up = Vec2::new(0.0, 1.0);
        assert!(perp_dot(right, up) > 0.0);
        assert!(perp_dot(up, right) < 0.0);
        assert_eq!(perp_dot(right, right), 0.0);
    }
}

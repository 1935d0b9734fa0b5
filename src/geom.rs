//! Low-level segment, grid and area primitives shared by the overlap
//! and contact queries.

use crate::math as m;

/// Upper bound on samples per rasterized segment, to keep pathological
/// step configurations from walking forever.
const MAX_RASTER_SAMPLES: usize = 1 << 20;

/// Resolution parameters for the discrete parts of the collision tests.
///
/// The point-on-line and line-in-region tests work on a sampled grid
/// rather than analytically, and the point-in-triangle test compares
/// areas for equality. Both behaviors come from the integer-coordinate
/// heritage of this shape family and are kept configurable instead of
/// being replaced with exact tests, which would change results right at
/// shape boundaries.
#[derive(Clone, Copy, Debug)]
pub struct Tolerance {
    /// Grid cell size for rasterized tests. Must be positive.
    /// The default of 1.0 reproduces integer-coordinate behavior.
    pub raster_step: f64,
    /// Allowed difference in the triangle area-sum comparison.
    pub area_slack: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            raster_step: 1.0,
            area_slack: 1e-9,
        }
    }
}

impl Tolerance {
    pub fn with_raster_step(mut self, step: f64) -> Self {
        self.raster_step = step;
        self
    }

    pub fn with_area_slack(mut self, slack: f64) -> Self {
        self.area_slack = slack;
        self
    }
}

/// Outcome of solving two segments' parametric equations against each other.
#[derive(Clone, Copy, Debug)]
pub(crate) enum SegmentHit {
    /// The segments cross at the carried point.
    Cross(m::Vec2),
    /// Zero determinant with both numerators zero: the segments lie on
    /// the same infinite line. Whether their ranges actually overlap is
    /// not checked.
    SameLine,
    /// No crossing within both segments.
    Miss,
}

/// Classic parametric segment intersection via the direction determinant.
pub(crate) fn segments_meet(a1: m::Vec2, a2: m::Vec2, b1: m::Vec2, b2: m::Vec2) -> SegmentHit {
    let dir_a = a2 - a1;
    let dir_b = b2 - b1;
    let between = b1 - a1;

    let denom = m::perp_dot(dir_a, dir_b);
    let num_t = m::perp_dot(between, dir_b);
    let num_u = m::perp_dot(between, dir_a);

    if denom == 0.0 {
        return if num_t == 0.0 && num_u == 0.0 {
            SegmentHit::SameLine
        } else {
            SegmentHit::Miss
        };
    }

    let t = num_t / denom;
    let u = num_u / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        SegmentHit::Cross(a1 + dir_a * t)
    } else {
        SegmentHit::Miss
    }
}

/// The point on segment `a`-`b` closest to `p`.
pub(crate) fn closest_point_on_segment(a: m::Vec2, b: m::Vec2, p: m::Vec2) -> m::Vec2 {
    let ab = b - a;
    let len_sq = ab.mag_sq();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Walk a segment as evenly spaced samples, one per grid step along the
/// longer axis, endpoints included.
pub(crate) fn raster_points(
    begin: m::Vec2,
    end: m::Vec2,
    step: f64,
) -> impl Iterator<Item = m::Vec2> {
    let delta = end - begin;
    let steps = ((delta.x.abs().max(delta.y.abs()) / step).ceil() as usize)
        .clamp(1, MAX_RASTER_SAMPLES);
    (0..=steps).map(move |i| begin + delta * (i as f64 / steps as f64))
}

/// Snap a point to the corner of its grid cell by per-axis truncation.
pub(crate) fn snap_to_grid(v: m::Vec2, step: f64) -> m::Vec2 {
    m::Vec2::new((v.x / step).trunc() * step, (v.y / step).trunc() * step)
}

/// Whether two points fall in the same grid cell.
pub(crate) fn same_cell(a: m::Vec2, b: m::Vec2, step: f64) -> bool {
    (a.x / step).trunc() == (b.x / step).trunc() && (a.y / step).trunc() == (b.y / step).trunc()
}

/// Area of the triangle spanned by three points.
pub(crate) fn triangle_area(a: m::Vec2, b: m::Vec2, c: m::Vec2) -> f64 {
    0.5 * m::perp_dot(b - a, c - a).abs()
}

/// Edges of a closed vertex loop, each translated by `origin`.
/// The loop closes implicitly from the last vertex back to the first.
pub(crate) fn loop_edges(
    origin: m::Vec2,
    vertices: &[m::Vec2],
) -> impl Iterator<Item = (m::Vec2, m::Vec2)> + '_ {
    let count = vertices.len();
    (0..count).map(move |i| (vertices[i] + origin, vertices[(i + 1) % count] + origin))
}

/// The four edges of an axis-aligned rectangle in bottom, right, top,
/// left order.
pub(crate) fn rect_edges(begin: m::Vec2, end: m::Vec2) -> [(m::Vec2, m::Vec2); 4] {
    let bottom_right = m::Vec2::new(end.x, begin.y);
    let top_left = m::Vec2::new(begin.x, end.y);
    [
        (begin, bottom_right),
        (bottom_right, end),
        (end, top_left),
        (top_left, begin),
    ]
}

/// Even-odd point-in-polygon test: toggle on every edge the point's
/// horizontal ray crosses. Winding-agnostic.
pub(crate) fn point_in_polygon(p: m::Vec2, origin: m::Vec2, vertices: &[m::Vec2]) -> bool {
    let mut inside = false;
    for (a, b) in loop_edges(origin, vertices) {
        if (a.y > p.y) != (b.y > p.y) {
            let crossing_x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < crossing_x {
                inside = !inside;
            }
        }
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math as m;

    #[test]
    fn crossing_segments_meet_at_the_crossing() {
        let hit = segments_meet(
            m::Vec2::new(0.0, 0.0),
            m::Vec2::new(10.0, 10.0),
            m::Vec2::new(0.0, 10.0),
            m::Vec2::new(10.0, 0.0),
        );
        match hit {
            SegmentHit::Cross(p) => {
                assert!((p.x - 5.0).abs() < 1e-12);
                assert!((p.y - 5.0).abs() < 1e-12);
            }
            other => panic!("expected a crossing, got {other:?}"),
        }
    }

    #[test]
    fn parallel_and_collinear_are_distinguished() {
        // parallel but offset: plain miss
        assert!(matches!(
            segments_meet(
                m::Vec2::new(0.0, 0.0),
                m::Vec2::new(10.0, 0.0),
                m::Vec2::new(0.0, 1.0),
                m::Vec2::new(10.0, 1.0),
            ),
            SegmentHit::Miss
        ));
        // same infinite line, even without range overlap
        assert!(matches!(
            segments_meet(
                m::Vec2::new(0.0, 0.0),
                m::Vec2::new(10.0, 0.0),
                m::Vec2::new(20.0, 0.0),
                m::Vec2::new(30.0, 0.0),
            ),
            SegmentHit::SameLine
        ));
        // short of each other on crossing lines
        assert!(matches!(
            segments_meet(
                m::Vec2::new(0.0, 0.0),
                m::Vec2::new(1.0, 1.0),
                m::Vec2::new(10.0, 0.0),
                m::Vec2::new(9.0, 1.0),
            ),
            SegmentHit::Miss
        ));
    }

    #[test]
    fn closest_point_clamps_to_endpoints() {
        let a = m::Vec2::new(0.0, 0.0);
        let b = m::Vec2::new(10.0, 0.0);
        assert_eq!(
            closest_point_on_segment(a, b, m::Vec2::new(5.0, 3.0)),
            m::Vec2::new(5.0, 0.0)
        );
        assert_eq!(
            closest_point_on_segment(a, b, m::Vec2::new(-4.0, 2.0)),
            a
        );
        assert_eq!(
            closest_point_on_segment(a, b, m::Vec2::new(15.0, -2.0)),
            b
        );
        // zero-length segment degenerates to its single point
        assert_eq!(
            closest_point_on_segment(a, a, m::Vec2::new(3.0, 4.0)),
            a
        );
    }

    #[test]
    fn raster_walk_includes_both_endpoints() {
        let samples: Vec<m::Vec2> = raster_points(
            m::Vec2::new(0.0, 0.0),
            m::Vec2::new(10.0, 5.0),
            1.0,
        )
        .collect();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0], m::Vec2::new(0.0, 0.0));
        assert_eq!(samples[10], m::Vec2::new(10.0, 5.0));
    }

    #[test]
    fn grid_cells_follow_truncation() {
        assert!(same_cell(
            m::Vec2::new(3.2, 4.9),
            m::Vec2::new(3.7, 4.1),
            1.0
        ));
        assert!(!same_cell(
            m::Vec2::new(3.2, 4.9),
            m::Vec2::new(4.0, 4.9),
            1.0
        ));
        assert_eq!(
            snap_to_grid(m::Vec2::new(7.9, 2.1), 1.0),
            m::Vec2::new(7.0, 2.0)
        );
        // coarser grid merges cells
        assert!(same_cell(
            m::Vec2::new(3.2, 4.9),
            m::Vec2::new(4.0, 4.9),
            5.0
        ));
    }

    #[test]
    fn polygon_containment_ignores_winding() {
        let ccw = [
            m::Vec2::new(0.0, 0.0),
            m::Vec2::new(10.0, 0.0),
            m::Vec2::new(10.0, 10.0),
            m::Vec2::new(0.0, 10.0),
        ];
        let cw: Vec<m::Vec2> = ccw.iter().rev().copied().collect();
        let inside = m::Vec2::new(5.0, 5.0);
        let outside = m::Vec2::new(15.0, 5.0);
        let origin = m::Vec2::zero();
        assert!(point_in_polygon(inside, origin, &ccw));
        assert!(point_in_polygon(inside, origin, &cw));
        assert!(!point_in_polygon(outside, origin, &ccw));
        assert!(!point_in_polygon(outside, origin, &cw));
    }

    #[test]
    fn loop_edges_close_the_loop() {
        let verts = [
            m::Vec2::new(0.0, 0.0),
            m::Vec2::new(4.0, 0.0),
            m::Vec2::new(0.0, 3.0),
        ];
        let edges: Vec<_> = loop_edges(m::Vec2::new(1.0, 1.0), &verts).collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].0, m::Vec2::new(1.0, 1.0));
        assert_eq!(edges[2], (m::Vec2::new(1.0, 4.0), m::Vec2::new(1.0, 1.0)));
    }
}

//! The pairwise overlap predicate: does shape A, placed at its owner's
//! position, touch shape B at its owner's position?

use crate::geom::{self, SegmentHit, Tolerance};
use crate::math as m;
use crate::shape::Shape;

/// Check two positioned shapes for overlap with [`Tolerance::default`].
///
/// See [`overlap_check_with`] for the full contract.
pub fn overlap_check(pos1: m::Vec2, shape1: &Shape, pos2: m::Vec2, shape2: &Shape) -> bool {
    overlap_check_with(pos1, shape1, pos2, shape2, Tolerance::default())
}

/// Check two positioned shapes for overlap.
///
/// Each shape's anchors are translated by its position, then the pair is
/// routed to the test for that combination of kinds. Compounds recurse
/// into their parts with accumulated origins; polygons decompose into
/// their edge loops. Kind pairs with no test, round rectangles and
/// unknown masks always report no overlap. Mirrored pairs route to the
/// same underlying function with the arguments swapped, so both
/// directions always agree, with one documented exception: a polygon
/// wholly containing another is only detected with the container as the
/// first argument.
pub fn overlap_check_with(
    pos1: m::Vec2,
    shape1: &Shape,
    pos2: m::Vec2,
    shape2: &Shape,
    tol: Tolerance,
) -> bool {
    use Shape::*;
    match (shape1, shape2) {
        // compounds recurse before anything else so their parts pair
        // with every other kind
        (Multi { origin, parts }, _) => parts
            .iter()
            .any(|part| overlap_check_with(pos1 + *origin, part, pos2, shape2, tol)),
        (_, Multi { origin, parts }) => parts
            .iter()
            .any(|part| overlap_check_with(pos1, shape1, pos2 + *origin, part, tol)),

        (Point { at: a }, Point { at: b }) => m::same_point(*a + pos1, *b + pos2),
        (Point { at }, Line { begin, end }) => {
            point_line(*at + pos1, *begin + pos2, *end + pos2, tol)
        }
        (Line { begin, end }, Point { at }) => {
            point_line(*at + pos2, *begin + pos1, *end + pos1, tol)
        }
        (Point { at }, Rect { begin, end }) => {
            point_rect(*at + pos1, *begin + pos2, *end + pos2)
        }
        (Rect { begin, end }, Point { at }) => {
            point_rect(*at + pos2, *begin + pos1, *end + pos1)
        }
        (Point { at }, Circle { center, radius }) => {
            point_circle(*at + pos1, *center + pos2, *radius)
        }
        (Circle { center, radius }, Point { at }) => {
            point_circle(*at + pos2, *center + pos1, *radius)
        }

        (
            Line {
                begin: b1,
                end: e1,
            },
            Line {
                begin: b2,
                end: e2,
            },
        ) => line_line(*b1 + pos1, *e1 + pos1, *b2 + pos2, *e2 + pos2),
        (Line { begin, end }, Rect { begin: rb, end: re }) => line_rect(
            *begin + pos1,
            *end + pos1,
            *rb + pos2,
            *re + pos2,
            tol,
        ),
        (Rect { begin: rb, end: re }, Line { begin, end }) => line_rect(
            *begin + pos2,
            *end + pos2,
            *rb + pos1,
            *re + pos1,
            tol,
        ),
        (Line { begin, end }, Circle { center, radius }) => {
            line_circle(*begin + pos1, *end + pos1, *center + pos2, *radius)
        }
        (Circle { center, radius }, Line { begin, end }) => {
            line_circle(*begin + pos2, *end + pos2, *center + pos1, *radius)
        }

        (
            Rect {
                begin: b1,
                end: e1,
            },
            Rect {
                begin: b2,
                end: e2,
            },
        ) => rect_rect(*b1 + pos1, *e1 + pos1, *b2 + pos2, *e2 + pos2),
        (Rect { begin, end }, Circle { center, radius }) => {
            rect_circle(*begin + pos1, *end + pos1, *center + pos2, *radius)
        }
        (Circle { center, radius }, Rect { begin, end }) => {
            rect_circle(*begin + pos2, *end + pos2, *center + pos1, *radius)
        }

        (
            Circle {
                center: c1,
                radius: r1,
            },
            Circle {
                center: c2,
                radius: r2,
            },
        ) => circle_circle(*c1 + pos1, *r1, *c2 + pos2, *r2),

        (Triangle { origin, corners }, Point { at }) => {
            triangle_point(*origin + pos1, corners, *at + pos2, tol)
        }
        (Point { at }, Triangle { origin, corners }) => {
            triangle_point(*origin + pos2, corners, *at + pos1, tol)
        }
        (Triangle { origin, corners }, Line { begin, end }) => triangle_line(
            *origin + pos1,
            corners,
            *begin + pos2,
            *end + pos2,
            tol,
        ),
        (Line { begin, end }, Triangle { origin, corners }) => triangle_line(
            *origin + pos2,
            corners,
            *begin + pos1,
            *end + pos1,
            tol,
        ),

        (Polygon { origin, vertices }, Point { at }) => {
            geom::point_in_polygon(*at + pos2, *origin + pos1, vertices)
        }
        (Point { at }, Polygon { origin, vertices }) => {
            geom::point_in_polygon(*at + pos1, *origin + pos2, vertices)
        }
        (Polygon { origin, vertices }, Line { begin, end }) => polygon_line(
            *origin + pos1,
            vertices,
            *begin + pos2,
            *end + pos2,
        ),
        (Line { begin, end }, Polygon { origin, vertices }) => polygon_line(
            *origin + pos2,
            vertices,
            *begin + pos1,
            *end + pos1,
        ),
        (Polygon { origin, vertices }, Rect { begin, end }) => polygon_rect(
            *origin + pos1,
            vertices,
            *begin + pos2,
            *end + pos2,
            tol,
        ),
        (Rect { begin, end }, Polygon { origin, vertices }) => polygon_rect(
            *origin + pos2,
            vertices,
            *begin + pos1,
            *end + pos1,
            tol,
        ),
        (Polygon { origin, vertices }, Circle { center, radius }) => polygon_circle(
            *origin + pos1,
            vertices,
            *center + pos2,
            *radius,
        ),
        (Circle { center, radius }, Polygon { origin, vertices }) => polygon_circle(
            *origin + pos2,
            vertices,
            *center + pos1,
            *radius,
        ),
        (
            Polygon {
                origin: o1,
                vertices: v1,
            },
            Polygon {
                origin: o2,
                vertices: v2,
            },
        ) => polygon_polygon(*o1 + pos1, v1, *o2 + pos2, v2),

        // round rectangles, triangles beyond point/line, unknown masks,
        // and every other unlisted combination
        _ => false,
    }
}

//
// POINT <-> X
//

/// On-segment test against the rasterized line: an exact endpoint match,
/// or the point's grid cell appearing in the walked sample sequence.
pub(crate) fn point_line(p: m::Vec2, a: m::Vec2, b: m::Vec2, tol: Tolerance) -> bool {
    if m::same_point(p, a) || m::same_point(p, b) {
        return true;
    }
    geom::raster_points(a, b, tol.raster_step).any(|s| geom::same_cell(s, p, tol.raster_step))
}

/// Strict interior test; points on the boundary are outside.
pub(crate) fn point_rect(p: m::Vec2, min: m::Vec2, max: m::Vec2) -> bool {
    p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
}

pub(crate) fn point_circle(p: m::Vec2, center: m::Vec2, radius: f64) -> bool {
    (p - center).mag_sq() <= radius * radius
}

//
// LINE <-> X
//

fn line_line(a1: m::Vec2, a2: m::Vec2, b1: m::Vec2, b2: m::Vec2) -> bool {
    // segments on the same infinite line count as touching whether or
    // not their ranges overlap
    !matches!(geom::segments_meet(a1, a2, b1, b2), SegmentHit::Miss)
}

fn line_rect(a: m::Vec2, b: m::Vec2, min: m::Vec2, max: m::Vec2, tol: Tolerance) -> bool {
    if m::same_point(a, min)
        || m::same_point(a, max)
        || m::same_point(b, min)
        || m::same_point(b, max)
    {
        return true;
    }
    geom::raster_points(a, b, tol.raster_step)
        .any(|s| point_rect(geom::snap_to_grid(s, tol.raster_step), min, max))
}

fn line_circle(a: m::Vec2, b: m::Vec2, center: m::Vec2, radius: f64) -> bool {
    let r_sq = radius * radius;
    if (a - center).mag_sq() <= r_sq || (b - center).mag_sq() <= r_sq {
        return true;
    }
    (geom::closest_point_on_segment(a, b, center) - center).mag_sq() <= r_sq
}

//
// RECT <-> X
//

fn rect_rect(min1: m::Vec2, max1: m::Vec2, min2: m::Vec2, max2: m::Vec2) -> bool {
    min1.x <= max2.x && max1.x >= min2.x && min1.y <= max2.y && max1.y >= min2.y
}

fn rect_circle(min: m::Vec2, max: m::Vec2, center: m::Vec2, radius: f64) -> bool {
    let closest = m::Vec2::new(
        center.x.max(min.x).min(max.x),
        center.y.max(min.y).min(max.y),
    );
    (closest - center).mag_sq() <= radius * radius
}

//
// CIRCLE <-> CIRCLE
//

pub(crate) fn circle_circle(c1: m::Vec2, r1: f64, c2: m::Vec2, r2: f64) -> bool {
    let r_sum = r1 + r2;
    (c2 - c1).mag_sq() <= r_sum * r_sum
}

//
// TRIANGLE <-> X
//

/// Area-sum containment: the point is inside iff the three triangles it
/// forms with the corners together cover exactly the whole area.
fn triangle_point(origin: m::Vec2, corners: &[m::Vec2; 3], p: m::Vec2, tol: Tolerance) -> bool {
    let [a, b, c] = corners.map(|v| v + origin);
    let whole = geom::triangle_area(a, b, c);
    let parts = geom::triangle_area(p, a, b)
        + geom::triangle_area(p, b, c)
        + geom::triangle_area(p, c, a);
    (parts - whole).abs() <= tol.area_slack
}

fn triangle_line(
    origin: m::Vec2,
    corners: &[m::Vec2; 3],
    a: m::Vec2,
    b: m::Vec2,
    tol: Tolerance,
) -> bool {
    geom::raster_points(a, b, tol.raster_step)
        .any(|s| triangle_point(origin, corners, geom::snap_to_grid(s, tol.raster_step), tol))
}

//
// POLYGON <-> X
//

fn polygon_line(origin: m::Vec2, vertices: &[m::Vec2], a: m::Vec2, b: m::Vec2) -> bool {
    geom::loop_edges(origin, vertices).any(|(e1, e2)| line_line(e1, e2, a, b))
}

fn polygon_rect(
    origin: m::Vec2,
    vertices: &[m::Vec2],
    min: m::Vec2,
    max: m::Vec2,
    tol: Tolerance,
) -> bool {
    geom::loop_edges(origin, vertices).any(|(e1, e2)| line_rect(e1, e2, min, max, tol))
}

fn polygon_circle(origin: m::Vec2, vertices: &[m::Vec2], center: m::Vec2, radius: f64) -> bool {
    geom::loop_edges(origin, vertices).any(|(e1, e2)| line_circle(e1, e2, center, radius))
}

/// Edge-vs-edge scan, then a one-sided containment check on the second
/// polygon's first vertex.
///
/// The containment direction makes this pair order-dependent: a polygon
/// wholly inside another is found when the container comes first but not
/// the other way around. The behavior is load-bearing for existing
/// content and kept as is.
fn polygon_polygon(
    origin1: m::Vec2,
    verts1: &[m::Vec2],
    origin2: m::Vec2,
    verts2: &[m::Vec2],
) -> bool {
    for (a1, a2) in geom::loop_edges(origin1, verts1) {
        for (b1, b2) in geom::loop_edges(origin2, verts2) {
            if !matches!(geom::segments_meet(a1, a2, b1, b2), SegmentHit::Miss) {
                return true;
            }
        }
    }
    match verts2.first() {
        Some(v0) => geom::point_in_polygon(*v0 + origin2, origin1, verts1),
        None => false,
    }
}

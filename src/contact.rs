//! The contact-point query: where do two positioned shapes touch?
//!
//! Shares its dispatch structure and most of its math with
//! [`overlap`][crate::overlap], but returns a representative point of
//! contact instead of a boolean. `None` is the ordinary "no contact"
//! result, distinct from every real point; it is not an error.

use crate::geom::{self, SegmentHit, Tolerance};
use crate::math as m;
use crate::overlap;
use crate::shape::Shape;

/// Find a contact point between two positioned shapes with
/// [`Tolerance::default`].
///
/// See [`contact_check_with`] for the full contract.
pub fn contact_check(
    pos1: m::Vec2,
    shape1: &Shape,
    pos2: m::Vec2,
    shape2: &Shape,
) -> Option<m::Vec2> {
    contact_check_with(pos1, shape1, pos2, shape2, Tolerance::default())
}

/// Find a representative point of contact between two positioned shapes.
///
/// The dispatch mirrors the overlap predicate: compounds recurse and
/// return the first contact a part produces, polygons scan their edges
/// in order and return the first edge contact. Kind pairs with no
/// contact implementation (round rectangles among them) return `None`.
///
/// # Panics
///
/// Triangle and unknown shapes have no contact implementation and are
/// rejected loudly, including when nested inside a compound. Callers
/// must keep them away from this query; the boolean overlap test is the
/// only collision support triangles have.
pub fn contact_check_with(
    pos1: m::Vec2,
    shape1: &Shape,
    pos2: m::Vec2,
    shape2: &Shape,
    tol: Tolerance,
) -> Option<m::Vec2> {
    use Shape::*;
    assert_contact_support(shape1);
    assert_contact_support(shape2);
    match (shape1, shape2) {
        (Multi { origin, parts }, _) => parts
            .iter()
            .find_map(|part| contact_check_with(pos1 + *origin, part, pos2, shape2, tol)),
        (_, Multi { origin, parts }) => parts
            .iter()
            .find_map(|part| contact_check_with(pos1, shape1, pos2 + *origin, part, tol)),

        (Point { at: a }, Point { at: b }) => point_point_contact(*a + pos1, *b + pos2),
        (Point { at }, Line { begin, end }) => {
            point_line_contact(*at + pos1, *begin + pos2, *end + pos2, tol)
        }
        (Line { begin, end }, Point { at }) => {
            point_line_contact(*at + pos2, *begin + pos1, *end + pos1, tol)
        }
        (Point { at }, Rect { begin, end }) => {
            point_rect_contact(*at + pos1, *begin + pos2, *end + pos2)
        }
        (Rect { begin, end }, Point { at }) => {
            point_rect_contact(*at + pos2, *begin + pos1, *end + pos1)
        }
        (Point { at }, Circle { center, radius }) => {
            point_circle_contact(*at + pos1, *center + pos2, *radius)
        }
        (Circle { center, radius }, Point { at }) => {
            point_circle_contact(*at + pos2, *center + pos1, *radius)
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
        ) => line_line_contact(*b1 + pos1, *e1 + pos1, *b2 + pos2, *e2 + pos2),
        (Line { begin, end }, Rect { begin: rb, end: re }) => line_rect_contact(
            *begin + pos1,
            *end + pos1,
            *rb + pos2,
            *re + pos2,
            tol,
        ),
        (Rect { begin: rb, end: re }, Line { begin, end }) => line_rect_contact(
            *begin + pos2,
            *end + pos2,
            *rb + pos1,
            *re + pos1,
            tol,
        ),
        (Line { begin, end }, Circle { center, radius }) => {
            line_circle_contact(*begin + pos1, *end + pos1, *center + pos2, *radius)
        }
        (Circle { center, radius }, Line { begin, end }) => {
            line_circle_contact(*begin + pos2, *end + pos2, *center + pos1, *radius)
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
        ) => rect_rect_contact(*b1 + pos1, *e1 + pos1, *b2 + pos2, *e2 + pos2, tol),
        (Rect { begin, end }, Circle { center, radius }) => rect_circle_contact(
            *begin + pos1,
            *end + pos1,
            *center + pos2,
            *radius,
            tol,
        ),
        (Circle { center, radius }, Rect { begin, end }) => rect_circle_contact(
            *begin + pos2,
            *end + pos2,
            *center + pos1,
            *radius,
            tol,
        ),

        (
            Circle {
                center: c1,
                radius: r1,
            },
            Circle {
                center: c2,
                radius: r2,
            },
        ) => circle_circle_contact(*c1 + pos1, *r1, *c2 + pos2, *r2),

        (Polygon { origin, vertices }, Point { at }) => {
            polygon_point_contact(*origin + pos1, vertices, *at + pos2, tol)
        }
        (Point { at }, Polygon { origin, vertices }) => {
            polygon_point_contact(*origin + pos2, vertices, *at + pos1, tol)
        }
        (Polygon { origin, vertices }, Line { begin, end }) => polygon_line_contact(
            *origin + pos1,
            vertices,
            *begin + pos2,
            *end + pos2,
        ),
        (Line { begin, end }, Polygon { origin, vertices }) => polygon_line_contact(
            *origin + pos2,
            vertices,
            *begin + pos1,
            *end + pos1,
        ),
        (Polygon { origin, vertices }, Rect { begin, end }) => polygon_rect_contact(
            *origin + pos1,
            vertices,
            *begin + pos2,
            *end + pos2,
            tol,
        ),
        (Rect { begin, end }, Polygon { origin, vertices }) => polygon_rect_contact(
            *origin + pos2,
            vertices,
            *begin + pos1,
            *end + pos1,
            tol,
        ),
        (Polygon { origin, vertices }, Circle { center, radius }) => polygon_circle_contact(
            *origin + pos1,
            vertices,
            *center + pos2,
            *radius,
        ),
        (Circle { center, radius }, Polygon { origin, vertices }) => polygon_circle_contact(
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
        ) => polygon_polygon_contact(*o1 + pos1, v1, *o2 + pos2, v2),

        _ => None,
    }
}

fn assert_contact_support(shape: &Shape) {
    assert!(
        !matches!(shape, Shape::Triangle { .. } | Shape::Unknown),
        "contact queries do not support {} shapes",
        shape.kind()
    );
}

//
// POINT <-> X
//

// When the point is in contact at all, the point itself is the contact.

fn point_point_contact(a: m::Vec2, b: m::Vec2) -> Option<m::Vec2> {
    m::same_point(a, b).then_some(a)
}

fn point_line_contact(p: m::Vec2, a: m::Vec2, b: m::Vec2, tol: Tolerance) -> Option<m::Vec2> {
    overlap::point_line(p, a, b, tol).then_some(p)
}

fn point_rect_contact(p: m::Vec2, min: m::Vec2, max: m::Vec2) -> Option<m::Vec2> {
    overlap::point_rect(p, min, max).then_some(p)
}

fn point_circle_contact(p: m::Vec2, center: m::Vec2, radius: f64) -> Option<m::Vec2> {
    overlap::point_circle(p, center, radius).then_some(p)
}

//
// LINE <-> X
//

fn line_line_contact(a1: m::Vec2, a2: m::Vec2, b1: m::Vec2, b2: m::Vec2) -> Option<m::Vec2> {
    match geom::segments_meet(a1, a2, b1, b2) {
        SegmentHit::Cross(p) => Some(p),
        // segments on the same infinite line overlap in the boolean test
        // but have no single crossing point to report
        SegmentHit::SameLine | SegmentHit::Miss => None,
    }
}

/// A shared endpoint/corner if there is one, else the first rasterized
/// sample of the line strictly inside the rectangle.
fn line_rect_contact(
    a: m::Vec2,
    b: m::Vec2,
    min: m::Vec2,
    max: m::Vec2,
    tol: Tolerance,
) -> Option<m::Vec2> {
    for corner in [min, max] {
        if m::same_point(a, corner) {
            return Some(a);
        }
        if m::same_point(b, corner) {
            return Some(b);
        }
    }
    geom::raster_points(a, b, tol.raster_step)
        .map(|s| geom::snap_to_grid(s, tol.raster_step))
        .find(|s| overlap::point_rect(*s, min, max))
}

/// The point on the segment closest to the center, whenever that point
/// is within the radius. Covers every overlapping configuration: if any
/// part of the segment is inside the circle, so is the closest point.
fn line_circle_contact(a: m::Vec2, b: m::Vec2, center: m::Vec2, radius: f64) -> Option<m::Vec2> {
    let closest = geom::closest_point_on_segment(a, b, center);
    ((closest - center).mag_sq() <= radius * radius).then_some(closest)
}

//
// RECT <-> X
//

/// One rectangle's edges tested against the other as line contacts;
/// if A's edges find nothing, B's edges get one try against A before
/// giving up. The second pass covers B's edges entering A.
fn rect_rect_contact(
    min1: m::Vec2,
    max1: m::Vec2,
    min2: m::Vec2,
    max2: m::Vec2,
    tol: Tolerance,
) -> Option<m::Vec2> {
    rect_edges_vs_rect(min1, max1, min2, max2, tol)
        .or_else(|| rect_edges_vs_rect(min2, max2, min1, max1, tol))
}

fn rect_edges_vs_rect(
    amin: m::Vec2,
    amax: m::Vec2,
    bmin: m::Vec2,
    bmax: m::Vec2,
    tol: Tolerance,
) -> Option<m::Vec2> {
    geom::rect_edges(amin, amax)
        .into_iter()
        .find_map(|(a, b)| line_rect_contact(a, b, bmin, bmax, tol))
}

/// The rectangle's edges as line-circle contacts first; when the circle
/// sits wholly inside the rectangle those all miss, so its horizontal
/// and vertical diameters get tested against the rectangle as lines.
fn rect_circle_contact(
    min: m::Vec2,
    max: m::Vec2,
    center: m::Vec2,
    radius: f64,
    tol: Tolerance,
) -> Option<m::Vec2> {
    if let Some(p) = geom::rect_edges(min, max)
        .into_iter()
        .find_map(|(a, b)| line_circle_contact(a, b, center, radius))
    {
        return Some(p);
    }
    let across = m::Vec2::new(radius, 0.0);
    let down = m::Vec2::new(0.0, radius);
    line_rect_contact(center - across, center + across, min, max, tol)
        .or_else(|| line_rect_contact(center - down, center + down, min, max, tol))
}

//
// CIRCLE <-> CIRCLE
//

/// On overlap, the point between the centers weighted by the opposite
/// radius. A radius-proportional blend, not the deepest-penetration
/// point.
fn circle_circle_contact(c1: m::Vec2, r1: f64, c2: m::Vec2, r2: f64) -> Option<m::Vec2> {
    if !overlap::circle_circle(c1, r1, c2, r2) {
        return None;
    }
    let r_sum = r1 + r2;
    if r_sum == 0.0 {
        // two zero-radius circles only overlap when their centers
        // coincide; the blend degenerates to that shared center
        return Some(c1);
    }
    Some((c1 * r2 + c2 * r1) / r_sum)
}

//
// POLYGON <-> X
//

/// Edge scan only: a point strictly inside the polygon touches no edge
/// and reports no contact, even though the boolean test (which ray-casts
/// the interior) reports overlap there.
fn polygon_point_contact(
    origin: m::Vec2,
    vertices: &[m::Vec2],
    p: m::Vec2,
    tol: Tolerance,
) -> Option<m::Vec2> {
    geom::loop_edges(origin, vertices).find_map(|(a, b)| point_line_contact(p, a, b, tol))
}

fn polygon_line_contact(
    origin: m::Vec2,
    vertices: &[m::Vec2],
    a: m::Vec2,
    b: m::Vec2,
) -> Option<m::Vec2> {
    geom::loop_edges(origin, vertices).find_map(|(e1, e2)| line_line_contact(e1, e2, a, b))
}

fn polygon_rect_contact(
    origin: m::Vec2,
    vertices: &[m::Vec2],
    min: m::Vec2,
    max: m::Vec2,
    tol: Tolerance,
) -> Option<m::Vec2> {
    geom::loop_edges(origin, vertices).find_map(|(e1, e2)| line_rect_contact(e1, e2, min, max, tol))
}

fn polygon_circle_contact(
    origin: m::Vec2,
    vertices: &[m::Vec2],
    center: m::Vec2,
    radius: f64,
) -> Option<m::Vec2> {
    geom::loop_edges(origin, vertices).find_map(|(e1, e2)| line_circle_contact(e1, e2, center, radius))
}

fn polygon_polygon_contact(
    origin1: m::Vec2,
    verts1: &[m::Vec2],
    origin2: m::Vec2,
    verts2: &[m::Vec2],
) -> Option<m::Vec2> {
    geom::loop_edges(origin1, verts1)
        .find_map(|(a, b)| polygon_line_contact(origin2, verts2, a, b))
}

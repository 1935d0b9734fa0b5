//! The shape data model: nine primitive kinds of collision mask.

use crate::math as m;
use std::fmt;

/// A collision mask in local space, relative to the owning body's position.
///
/// Shapes are pure data; the overlap and contact queries in
/// [`overlap`][crate::overlap] and [`contact`][crate::contact] interpret them.
/// All shapes are axis-aligned; there is no rotation support.
///
/// Fields are public so shapes can be matched on and built as literals,
/// but the constructors on this type are the checked path: they reject
/// unordered rectangle corners, negative radii and short polygons.
/// [`Shape::validate`] re-checks those invariants on any value, which is
/// mainly useful after deserialization.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Shape {
    /// A single point at `at`.
    Point { at: m::Vec2 },
    /// A segment from `begin` to `end`.
    Line { begin: m::Vec2, end: m::Vec2 },
    /// An axis-aligned rectangle; `begin` is the minimum corner,
    /// `end` the maximum corner.
    Rect { begin: m::Vec2, end: m::Vec2 },
    /// A rectangle with rounded corners, same corner convention as
    /// [`Rect`][Shape::Rect].
    ///
    /// Carried for rendering purposes; it takes part in no collision test.
    RoundRect {
        begin: m::Vec2,
        end: m::Vec2,
        radius: f64,
    },
    /// A circle of radius `radius` centered on `center`.
    Circle { center: m::Vec2, radius: f64 },
    /// Three corners, all translated by `origin`.
    ///
    /// Supported by the overlap test against points and lines only,
    /// and not supported by the contact query at all.
    Triangle {
        origin: m::Vec2,
        corners: [m::Vec2; 3],
    },
    /// A closed vertex loop, all vertices translated by `origin`.
    /// The loop closes implicitly from the last vertex back to the first.
    Polygon {
        origin: m::Vec2,
        vertices: Vec<m::Vec2>,
    },
    /// A group of shapes with a shared additional offset.
    ///
    /// Parts own their children by value, so a compound can never
    /// contain itself and recursion is bounded by construction.
    Multi { origin: m::Vec2, parts: Vec<Shape> },
    /// The "mask not set" placeholder. Takes part in no collision test.
    Unknown,
}

/// The variant of a [`Shape`], used in messages and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Point,
    Line,
    Rect,
    RoundRect,
    Circle,
    Triangle,
    Polygon,
    Multi,
    Unknown,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeKind::Point => "point",
            ShapeKind::Line => "line",
            ShapeKind::Rect => "rectangle",
            ShapeKind::RoundRect => "round rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Multi => "multi",
            ShapeKind::Unknown => "unknown",
        })
    }
}

/// An invariant violation found when constructing or validating a [`Shape`].
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq)]
pub enum ShapeError {
    #[error("rectangle corners must be ordered with begin at the minimum")]
    UnorderedCorners,
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),
    #[error("polygon requires at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}

impl Default for Shape {
    /// A body starts with no mask and collides with nothing.
    fn default() -> Self {
        Shape::Unknown
    }
}

impl Shape {
    pub fn point(at: m::Vec2) -> Self {
        Shape::Point { at }
    }

    pub fn line(begin: m::Vec2, end: m::Vec2) -> Self {
        Shape::Line { begin, end }
    }

    /// Create an axis-aligned rectangle from its minimum and maximum corners.
    ///
    /// Swapped corners are rejected rather than silently reordered.
    pub fn rect(begin: m::Vec2, end: m::Vec2) -> Result<Self, ShapeError> {
        let shape = Shape::Rect { begin, end };
        shape.validate()?;
        Ok(shape)
    }

    /// Create a rounded rectangle, same corner convention as [`Shape::rect`].
    pub fn round_rect(begin: m::Vec2, end: m::Vec2, radius: f64) -> Result<Self, ShapeError> {
        let shape = Shape::RoundRect { begin, end, radius };
        shape.validate()?;
        Ok(shape)
    }

    pub fn circle(center: m::Vec2, radius: f64) -> Result<Self, ShapeError> {
        let shape = Shape::Circle { center, radius };
        shape.validate()?;
        Ok(shape)
    }

    /// Create a triangle with its origin at zero.
    /// Use [`Shape::translated`] to move it.
    pub fn triangle(a: m::Vec2, b: m::Vec2, c: m::Vec2) -> Self {
        Shape::Triangle {
            origin: m::Vec2::zero(),
            corners: [a, b, c],
        }
    }

    /// Create a closed polygon with its origin at zero.
    /// Use [`Shape::translated`] to move it.
    pub fn polygon(vertices: Vec<m::Vec2>) -> Result<Self, ShapeError> {
        let shape = Shape::Polygon {
            origin: m::Vec2::zero(),
            vertices,
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Group shapes into a compound with its origin at zero.
    /// Use [`Shape::translated`] to move the whole group.
    pub fn multi(parts: Vec<Shape>) -> Self {
        Shape::Multi {
            origin: m::Vec2::zero(),
            parts,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point { .. } => ShapeKind::Point,
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Rect { .. } => ShapeKind::Rect,
            Shape::RoundRect { .. } => ShapeKind::RoundRect,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Triangle { .. } => ShapeKind::Triangle,
            Shape::Polygon { .. } => ShapeKind::Polygon,
            Shape::Multi { .. } => ShapeKind::Multi,
            Shape::Unknown => ShapeKind::Unknown,
        }
    }

    /// Check the construction invariants, recursing into compound parts.
    ///
    /// Values built through the constructors always pass; this exists for
    /// shapes assembled as literals or read from data files.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Shape::Rect { begin, end } => ordered_corners(*begin, *end),
            Shape::RoundRect { begin, end, radius } => {
                ordered_corners(*begin, *end)?;
                nonnegative_radius(*radius)
            }
            Shape::Circle { radius, .. } => nonnegative_radius(*radius),
            Shape::Polygon { vertices, .. } => {
                if vertices.len() < 3 {
                    Err(ShapeError::TooFewVertices(vertices.len()))
                } else {
                    Ok(())
                }
            }
            Shape::Multi { parts, .. } => parts.iter().try_for_each(Shape::validate),
            _ => Ok(()),
        }
    }

    /// Shift the whole shape rigidly by `by`.
    ///
    /// For anchored kinds this moves the anchor points; for triangles,
    /// polygons and compounds it moves the origin and leaves the local
    /// vertex data untouched.
    pub fn translated(self, by: m::Vec2) -> Self {
        match self {
            Shape::Point { at } => Shape::Point { at: at + by },
            Shape::Line { begin, end } => Shape::Line {
                begin: begin + by,
                end: end + by,
            },
            Shape::Rect { begin, end } => Shape::Rect {
                begin: begin + by,
                end: end + by,
            },
            Shape::RoundRect { begin, end, radius } => Shape::RoundRect {
                begin: begin + by,
                end: end + by,
                radius,
            },
            Shape::Circle { center, radius } => Shape::Circle {
                center: center + by,
                radius,
            },
            Shape::Triangle { origin, corners } => Shape::Triangle {
                origin: origin + by,
                corners,
            },
            Shape::Polygon { origin, vertices } => Shape::Polygon {
                origin: origin + by,
                vertices,
            },
            Shape::Multi { origin, parts } => Shape::Multi {
                origin: origin + by,
                parts,
            },
            Shape::Unknown => Shape::Unknown,
        }
    }
}

fn ordered_corners(begin: m::Vec2, end: m::Vec2) -> Result<(), ShapeError> {
    if end.x >= begin.x && end.y >= begin.y {
        Ok(())
    } else {
        Err(ShapeError::UnorderedCorners)
    }
}

fn nonnegative_radius(radius: f64) -> Result<(), ShapeError> {
    if radius >= 0.0 {
        Ok(())
    } else {
        Err(ShapeError::NegativeRadius(radius))
    }
}

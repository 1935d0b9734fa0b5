//! The collidable entity as the collision pass sees it.

use crate::math as m;
use crate::shape::Shape;
use std::collections::HashSet;

/// Key identifying a [`Body`] in a [`BodySet`].
pub type BodyKey = thunderdome::Index;

/// The caller-owned store of bodies. The collision pass borrows it for
/// the duration of one run and keeps nothing across runs.
pub type BodySet = thunderdome::Arena<Body>;

/// Everything the collision pass reads about an entity.
///
/// The scene owns the rest of the entity (rendering, behavior, whatever
/// else it carries); a body is only the collision-relevant slice:
/// where it is, what space it occupies, and how it can be addressed by
/// reaction filters.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Body {
    /// World-space position the mask is anchored to.
    pub position: m::Vec2,
    /// The collision mask in local space.
    pub mask: Shape,
    /// Non-solid bodies are skipped by the collision pass entirely.
    pub solid: bool,
    /// Inactive bodies are skipped by the collision pass entirely.
    pub active: bool,
    /// Addressed by name filters. Not required to be unique.
    pub name: String,
    /// Addressed by tag filters.
    pub tags: HashSet<String>,
}

impl Body {
    /// A solid, active body at the origin with the given mask
    /// and no name or tags.
    pub fn new(mask: Shape) -> Self {
        Self {
            position: m::Vec2::zero(),
            mask,
            solid: true,
            active: true,
            name: String::new(),
            tags: HashSet::new(),
        }
    }

    /// Set the position in a builder-like chain.
    pub fn at(mut self, position: m::Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the name in a builder-like chain.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add one tag in a builder-like chain.
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether the collision pass should consider this body at all.
    #[inline]
    pub fn participates(&self) -> bool {
        self.active && self.solid
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl Default for Body {
    /// An unknown mask: present in the set but collides with nothing.
    fn default() -> Self {
        Self::new(Shape::Unknown)
    }
}

/// A borrowed view of another body, handed to reaction listeners.
#[derive(Clone, Copy, Debug)]
pub struct BodyRef<'a> {
    pub key: BodyKey,
    pub body: &'a Body,
}

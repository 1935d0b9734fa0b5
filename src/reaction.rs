//! Reaction registration: who gets told when a body hits something.
//!
//! The registry is owned by the caller and passed into the collision
//! pass by reference; there is no global listener state. Listeners run
//! strictly sequentially after the pair scan has finished, so they are
//! free to carry mutable state of their own, but they only get a shared
//! borrow of the other body. Changes a listener wants to make to bodies
//! are recorded in the listener and applied by the caller afterwards.

use crate::body::{Body, BodyKey, BodyRef};
use std::collections::HashMap;

/// A reaction to a collision, receiving the other body involved.
///
/// Any `FnMut(BodyRef)` closure qualifies via a blanket impl.
pub trait CollisionListener {
    fn on_collision(&mut self, other: BodyRef<'_>);
}

impl<F: FnMut(BodyRef<'_>)> CollisionListener for F {
    fn on_collision(&mut self, other: BodyRef<'_>) {
        self(other)
    }
}

/// Conditions the *other* body must satisfy for a filtered entry to fire.
///
/// Both filters are optional and every filter that is present must
/// match: an empty filter always fires, a name filter requires an exact
/// name match, a tag filter requires the tag to be present, and a
/// name+tag filter requires both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-types",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ColliderFilter {
    pub name: Option<String>,
    pub tag: Option<String>,
}

impl ColliderFilter {
    /// A filter that matches every body.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            tag: None,
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            name: None,
            tag: Some(tag.into()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn matches(&self, other: &Body) -> bool {
        let name_ok = self.name.as_deref().map_or(true, |name| other.name == name);
        let tag_ok = self.tag.as_deref().map_or(true, |tag| other.has_tag(tag));
        name_ok && tag_ok
    }
}

struct FilteredEntry {
    filter: ColliderFilter,
    listener: Box<dyn CollisionListener>,
}

/// Per-body reaction listeners, keyed by [`BodyKey`].
///
/// Two kinds of entry exist: unconditional pair listeners, which fire on
/// every hit involving their body, and filtered collider entries, which
/// fire only when the other body passes their [`ColliderFilter`].
#[derive(Default)]
pub struct ReactionRegistry {
    pair: HashMap<BodyKey, Vec<Box<dyn CollisionListener>>>,
    filtered: HashMap<BodyKey, Vec<FilteredEntry>>,
}

impl ReactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener that fires on every hit involving `key`.
    pub fn add_pair(&mut self, key: BodyKey, listener: impl CollisionListener + 'static) {
        self.pair.entry(key).or_default().push(Box::new(listener));
    }

    /// Register a listener that fires when `key` hits a body matching
    /// `filter`.
    pub fn add_collider(
        &mut self,
        key: BodyKey,
        filter: ColliderFilter,
        listener: impl CollisionListener + 'static,
    ) {
        self.filtered.entry(key).or_default().push(FilteredEntry {
            filter,
            listener: Box::new(listener),
        });
    }

    /// Drop every entry registered for `key`.
    /// Call when the body leaves the scene.
    pub fn remove(&mut self, key: BodyKey) {
        self.pair.remove(&key);
        self.filtered.remove(&key);
    }

    pub fn clear(&mut self) {
        self.pair.clear();
        self.filtered.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pair.is_empty() && self.filtered.is_empty()
    }

    /// Run the entries registered for `me` against the body it hit.
    pub(crate) fn dispatch(&mut self, me: BodyKey, other: BodyRef<'_>) {
        if let Some(listeners) = self.pair.get_mut(&me) {
            for listener in listeners.iter_mut() {
                listener.on_collision(other);
            }
        }
        if let Some(entries) = self.filtered.get_mut(&me) {
            for entry in entries.iter_mut() {
                if entry.filter.matches(other.body) {
                    entry.listener.on_collision(other);
                }
            }
        }
    }
}

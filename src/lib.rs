pub mod math;
pub use math::{uv, Vec2};

pub mod shape;
pub use shape::{Shape, ShapeError, ShapeKind};

pub mod geom;
pub use geom::Tolerance;

pub mod overlap;
pub use overlap::{overlap_check, overlap_check_with};

pub mod contact;
pub use contact::{contact_check, contact_check_with};

pub mod body;
pub use body::{Body, BodyKey, BodyRef, BodySet};

pub mod reaction;
pub use reaction::{ColliderFilter, CollisionListener, ReactionRegistry};

pub mod pipeline;
pub use pipeline::CollisionPipeline;

// Re-exported thunderdome to guarantee versions match
pub use thunderdome;

//! The per-step collision pass: exhaustive pair testing over the body
//! set and dispatch of the results to registered reactions.

use crate::body::{Body, BodyKey, BodyRef, BodySet};
use crate::geom::Tolerance;
use crate::overlap::overlap_check_with;
use crate::reaction::ReactionRegistry;
use crate::shape::Shape;
use crate::math as m;

#[cfg(not(feature = "parallel"))]
use itertools::Itertools;
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

const PAIR_VANISHED_ERR: &str = "Collision pass hit a body that is no longer in the set";

/// The collision pass. Holds no per-body state of its own, only query
/// configuration; one pipeline value can serve any number of body sets.
///
/// Every ordered pair of distinct live bodies is tested, with no spatial
/// pruning: a pair `(a, b)` is evaluated once as `(a, b)` and once as
/// `(b, a)`, so each side's reactions fire from its own evaluation and
/// asymmetric kind pairs get exercised from both directions.
///
/// The scan over pairs is pure; with the `parallel` feature it runs on
/// the rayon thread pool, outer loop split across workers. Reactions
/// always run after the scan, sequentially, in scan order, so listeners
/// never observe a half-finished pass and never race with each other.
#[derive(Clone, Copy, Debug)]
pub struct CollisionPipeline {
    tolerance: Tolerance,
}

impl CollisionPipeline {
    pub fn new() -> Self {
        Self {
            tolerance: Tolerance::default(),
        }
    }

    /// Set the query tolerance in a builder-like chain.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Run one collision step: test every ordered pair of active, solid
    /// bodies and fire the registered reactions for each hit.
    ///
    /// Bodies are borrowed shared for the whole pass; reactions receive
    /// the other body as a [`BodyRef`] and record what they want to
    /// change rather than changing it here.
    pub fn run(&self, bodies: &BodySet, reactions: &mut ReactionRegistry) {
        let live: Vec<(BodyKey, &Body)> = bodies
            .iter()
            .filter(|(_, body)| body.participates())
            .collect();

        let hits = self.scan(&live);
        debug!(
            "collision pass: {} live bodies, {} hits",
            live.len(),
            hits.len()
        );

        for (first, second) in hits {
            let other = BodyRef {
                key: second,
                body: bodies.get(second).expect(PAIR_VANISHED_ERR),
            };
            reactions.dispatch(first, other);
        }
    }

    /// Whether `mask` placed at `at` would sit clear of every live body.
    pub fn place_free(&self, bodies: &BodySet, mask: &Shape, at: m::Vec2) -> bool {
        !bodies.iter().any(|(_, body)| {
            body.participates()
                && overlap_check_with(at, mask, body.position, &body.mask, self.tolerance)
        })
    }

    /// Every live body whose mask overlaps the given point.
    ///
    /// Kinds with no point pairing (round rectangles, unknown masks)
    /// never match.
    pub fn bodies_at_point(&self, bodies: &BodySet, point: m::Vec2) -> Vec<BodyKey> {
        let probe = Shape::point(m::Vec2::zero());
        bodies
            .iter()
            .filter(|(_, body)| {
                body.participates()
                    && overlap_check_with(point, &probe, body.position, &body.mask, self.tolerance)
            })
            .map(|(key, _)| key)
            .collect()
    }

    fn pair_overlaps(&self, first: &Body, second: &Body) -> bool {
        overlap_check_with(
            first.position,
            &first.mask,
            second.position,
            &second.mask,
            self.tolerance,
        )
    }

    /// All ordered hit pairs in outer-then-inner order. The parallel
    /// and sequential paths produce identical results.
    #[cfg(feature = "parallel")]
    fn scan(&self, live: &[(BodyKey, &Body)]) -> Vec<(BodyKey, BodyKey)> {
        let per_first: Vec<Vec<(BodyKey, BodyKey)>> = live
            .par_iter()
            .map(|&(first_key, first)| {
                live.iter()
                    .filter(|&&(second_key, second)| {
                        first_key != second_key && self.pair_overlaps(first, second)
                    })
                    .map(|&(second_key, _)| (first_key, second_key))
                    .collect()
            })
            .collect();
        per_first.into_iter().flatten().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(&self, live: &[(BodyKey, &Body)]) -> Vec<(BodyKey, BodyKey)> {
        live.iter()
            .cartesian_product(live.iter())
            .filter_map(|(&(first_key, first), &(second_key, second))| {
                (first_key != second_key && self.pair_overlaps(first, second))
                    .then_some((first_key, second_key))
            })
            .collect()
    }
}

impl Default for CollisionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::ColliderFilter;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn v(x: f64, y: f64) -> m::Vec2 {
        m::Vec2::new(x, y)
    }

    fn circle_body(x: f64, y: f64, r: f64) -> Body {
        Body::new(Shape::circle(m::Vec2::zero(), r).unwrap()).at(v(x, y))
    }

    #[test]
    fn both_sides_hear_about_a_hit_exactly_once() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(circle_body(0.0, 0.0, 5.0));
        let b = bodies.insert(circle_body(6.0, 0.0, 5.0));
        let far = bodies.insert(circle_body(100.0, 0.0, 1.0));

        let heard = Rc::new(RefCell::new(Vec::new()));
        let mut reactions = ReactionRegistry::new();
        for key in [a, b, far] {
            let log = heard.clone();
            reactions.add_pair(key, move |other: BodyRef| {
                log.borrow_mut().push((key, other.key));
            });
        }

        CollisionPipeline::new().run(&bodies, &mut reactions);

        let heard = heard.borrow();
        assert_eq!(heard.as_slice(), &[(a, b), (b, a)]);
    }

    #[test]
    fn inactive_and_intangible_bodies_are_skipped() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(circle_body(0.0, 0.0, 5.0));
        let sleeping = bodies.insert(circle_body(1.0, 0.0, 5.0).with_active(false));
        let ghost = bodies.insert(circle_body(2.0, 0.0, 5.0).with_solid(false));

        let count = Rc::new(RefCell::new(0));
        let mut reactions = ReactionRegistry::new();
        for key in [a, sleeping, ghost] {
            let c = count.clone();
            reactions.add_pair(key, move |_: BodyRef| *c.borrow_mut() += 1);
        }

        CollisionPipeline::new().run(&bodies, &mut reactions);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn filtered_entries_fire_per_policy_during_a_pass() {
        let mut bodies = BodySet::new();
        let player = bodies.insert(circle_body(0.0, 0.0, 5.0).named("player"));
        let lava = bodies.insert(circle_body(4.0, 0.0, 3.0).named("pool").tagged("lava"));
        let coin = bodies.insert(circle_body(-4.0, 0.0, 3.0).named("coin"));

        let heard = Rc::new(RefCell::new(Vec::new()));
        let mut reactions = ReactionRegistry::new();
        let log = heard.clone();
        reactions.add_collider(player, ColliderFilter::tag("lava"), move |other: BodyRef| {
            log.borrow_mut().push(("burned by", other.key));
        });
        let log = heard.clone();
        reactions.add_collider(player, ColliderFilter::name("coin"), move |other: BodyRef| {
            log.borrow_mut().push(("picked up", other.key));
        });
        let log = heard.clone();
        reactions.add_collider(
            player,
            ColliderFilter::name("pool").with_tag("wet"),
            move |other: BodyRef| {
                log.borrow_mut().push(("soaked by", other.key));
            },
        );

        CollisionPipeline::new().run(&bodies, &mut reactions);

        let heard = heard.borrow();
        // both overlap the player; only the matching filters fired,
        // and the name+tag entry failed its tag half
        assert!(heard.contains(&("burned by", lava)));
        assert!(heard.contains(&("picked up", coin)));
        assert_eq!(heard.len(), 2);
    }

    #[test]
    fn masks_of_different_kinds_meet_in_the_pass() {
        let mut bodies = BodySet::new();
        let wall = bodies.insert(
            Body::new(Shape::rect(v(0.0, 0.0), v(10.0, 10.0)).unwrap()).named("wall"),
        );
        let ball = bodies.insert(circle_body(12.0, 5.0, 3.0).named("ball"));
        bodies.insert(Body::default().at(v(5.0, 5.0)));

        let heard = Rc::new(RefCell::new(Vec::new()));
        let mut reactions = ReactionRegistry::new();
        let log = heard.clone();
        reactions.add_pair(wall, move |other: BodyRef| {
            log.borrow_mut().push(other.key);
        });

        CollisionPipeline::new().run(&bodies, &mut reactions);

        // the unknown-masked body overlaps nothing; the ball does
        assert_eq!(heard.borrow().as_slice(), &[ball]);
    }

    #[test]
    fn place_free_and_point_probes_respect_masks() {
        let mut bodies = BodySet::new();
        let block = bodies.insert(
            Body::new(Shape::rect(v(0.0, 0.0), v(10.0, 10.0)).unwrap()),
        );
        bodies.insert(circle_body(30.0, 0.0, 2.0).with_solid(false));

        let pipeline = CollisionPipeline::new();
        let probe = Shape::circle(m::Vec2::zero(), 2.0).unwrap();

        assert!(!pipeline.place_free(&bodies, &probe, v(5.0, 5.0)));
        assert!(pipeline.place_free(&bodies, &probe, v(20.0, 5.0)));
        // the non-solid circle does not block placement
        assert!(pipeline.place_free(&bodies, &probe, v(30.0, 0.0)));

        assert_eq!(pipeline.bodies_at_point(&bodies, v(5.0, 5.0)), vec![block]);
        assert!(pipeline.bodies_at_point(&bodies, v(50.0, 50.0)).is_empty());
    }

    #[test]
    fn coarser_tolerance_flows_into_the_queries() {
        let mut bodies = BodySet::new();
        // a diagonal wire: the default grid rasters it finely enough
        // that an off-grid probe point misses its cells
        bodies.insert(Body::new(Shape::line(v(0.0, 0.0), v(10.0, 5.0))));

        let fine = CollisionPipeline::new();
        let coarse =
            CollisionPipeline::new().with_tolerance(Tolerance::default().with_raster_step(4.0));

        let probe = v(2.0, 2.0);
        assert!(fine.bodies_at_point(&bodies, probe).is_empty());
        assert_eq!(coarse.bodies_at_point(&bodies, probe).len(), 1);
    }
}

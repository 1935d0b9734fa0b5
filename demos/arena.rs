//! A little console walk through an arena: a player circle marches
//! east, picking up coins, wading through a lava pool and finally
//! bumping into a statue. Run with RUST_LOG=debug to see the per-step
//! pass summaries.

use rand::{distributions as distr, distributions::Distribution};

use hitmask::{
    math as m, Body, BodyKey, BodyRef, BodySet, ColliderFilter, CollisionPipeline,
    ReactionRegistry, Shape,
};

use std::cell::RefCell;
use std::rc::Rc;

fn v(x: f64, y: f64) -> m::Vec2 {
    m::Vec2::new(x, y)
}

fn main() {
    env_logger::init();

    let mut bodies = BodySet::new();
    let pipeline = CollisionPipeline::new();

    spawn_arena(&mut bodies);
    let player = bodies.insert(
        Body::new(Shape::circle(m::Vec2::zero(), 1.0).expect("bad player mask"))
            .at(v(2.0, 5.0))
            .named("player"),
    );
    spawn_coins(&mut bodies, &pipeline, 6);

    // listeners record what happened; the bodies only change between passes
    let picked: Rc<RefCell<Vec<BodyKey>>> = Rc::new(RefCell::new(Vec::new()));
    let burns = Rc::new(RefCell::new(0u32));
    let bumped = Rc::new(RefCell::new(false));

    let mut reactions = ReactionRegistry::new();
    let log = picked.clone();
    reactions.add_collider(player, ColliderFilter::name("coin"), move |other: BodyRef| {
        log.borrow_mut().push(other.key);
    });
    let count = burns.clone();
    reactions.add_collider(player, ColliderFilter::tag("lava"), move |_: BodyRef| {
        *count.borrow_mut() += 1;
        println!("  ouch, lava!");
    });
    let flag = bumped.clone();
    reactions.add_collider(player, ColliderFilter::tag("scenery"), move |other: BodyRef| {
        println!("  bumped into the {}", other.body.name);
        *flag.borrow_mut() = true;
    });

    //
    // The walk
    //

    let step = v(2.0, 0.0);
    let mut score = 0u32;
    for _ in 0..32 {
        let from = bodies[player].position;
        bodies[player].position = from + step;
        println!("step to x = {:.0}", bodies[player].position.x);

        pipeline.run(&bodies, &mut reactions);

        for key in picked.borrow_mut().drain(..) {
            if let Some(coin) = bodies.remove(key) {
                score += 1;
                println!("  picked up a coin at x = {:.1}", coin.position.x);
            }
        }
        if *bumped.borrow() {
            bodies[player].position = from;
            break;
        }
    }

    let remaining = bodies.iter().filter(|(_, body)| body.name == "coin").count();
    println!(
        "run over at x = {:.0}: {} coins banked, {} left behind, burned {} times",
        bodies[player].position.x,
        score,
        remaining,
        *burns.borrow(),
    );

    let blockers: Vec<String> = pipeline
        .bodies_at_point(&bodies, v(34.0, 5.0))
        .into_iter()
        .map(|key| bodies[key].name.clone())
        .collect();
    println!("in the way: {:?}", blockers);
}

//
// Scene setup
//

fn spawn_arena(bodies: &mut BodySet) {
    // border walls with absolute corners, anchored at the origin
    let walls = [
        Shape::rect(v(-1.0, -1.0), v(0.0, 11.0)),
        Shape::rect(v(40.0, -1.0), v(41.0, 11.0)),
        Shape::rect(v(-1.0, -1.0), v(41.0, 0.0)),
        Shape::rect(v(-1.0, 10.0), v(41.0, 11.0)),
    ];
    for wall in walls {
        bodies.insert(
            Body::new(wall.expect("bad wall corners"))
                .named("wall")
                .tagged("scenery"),
        );
    }

    bodies.insert(
        Body::new(Shape::rect(v(-2.0, -1.0), v(2.0, 1.0)).expect("bad pool corners"))
            .at(v(24.0, 5.0))
            .named("lava pool")
            .tagged("lava"),
    );

    bodies.insert(
        Body::new(Shape::multi(vec![
            Shape::rect(v(-1.2, -5.0), v(1.2, -1.0)).expect("bad statue base"),
            Shape::circle(m::Vec2::zero(), 1.2).expect("bad statue head"),
        ]))
        .at(v(34.0, 5.0))
        .named("statue")
        .tagged("scenery"),
    );
}

/// Scatter coins along the corridor, rerolling spots already occupied
/// by the pool, the statue or an earlier coin.
fn spawn_coins(bodies: &mut BodySet, pipeline: &CollisionPipeline, count: usize) {
    let mask = Shape::circle(m::Vec2::zero(), 0.6).expect("bad coin mask");
    let mut rng = rand::thread_rng();
    let corridor_x = distr::Uniform::from(4.0..32.0);
    for _ in 0..count {
        let spot = loop {
            let spot = v(corridor_x.sample(&mut rng), 5.0);
            if pipeline.place_free(bodies, &mask, spot) {
                break spot;
            }
        };
        bodies.insert(Body::new(mask.clone()).at(spot).named("coin"));
        println!("coin spawned at x = {:.1}", spot.x);
    }
}

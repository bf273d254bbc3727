use log::{debug, warn};

use super::body::Body;
use super::parameters::PairIteration;
use super::units::{Float, DIMENSIONALITY};

fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert_ne!(i, j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Resolves a single pair. Returns whether an impulse was applied.
///
/// Separating pairs and pairs with coincident centres are left alone; the
/// latter have no collision normal.
pub(crate) fn resolve_pair(body1: &mut Body, body2: &mut Body, elasticity: Float) -> bool {
    let dist = body1.distance_to(body2);
    if dist > body1.radius() + body2.radius() {
        return false;
    }
    if dist <= 0. {
        warn!("Skipping collision between bodies with coincident centres.");
        return false;
    }

    let mut normal = [0.; DIMENSIONALITY];
    let mut vel_along_normal = 0.;
    for k in 0..DIMENSIONALITY {
        normal[k] = (body2.position[k] - body1.position[k]) / dist;
        vel_along_normal += (body2.velocity[k] - body1.velocity[k]) * normal[k];
    }
    if vel_along_normal > 0. {
        return false;
    }

    let j = -(1. + elasticity) * vel_along_normal / (1. / body1.mass() + 1. / body2.mass());
    // Pairs at rest relative to each other get a zero impulse.
    if j <= 0. {
        return false;
    }
    for k in 0..DIMENSIONALITY {
        body1.velocity[k] -= j / body1.mass() * normal[k];
        body2.velocity[k] += j / body2.mass() * normal[k];
    }
    true
}

/// Runs the collision pass over all pairs and returns the number of impulses
/// applied.
///
/// With [`PairIteration::Ordered`] each pair is visited as `(i, j)` and again
/// as `(j, i)`, the second visit seeing the velocities left by the first.
pub(crate) fn resolve_collisions(
    bodies: &mut [Body],
    elasticity: Float,
    pair_iteration: PairIteration,
) -> usize {
    let mut impulses = 0;
    for i in 0..bodies.len() {
        let start = match pair_iteration {
            PairIteration::Ordered => 0,
            PairIteration::Unordered => i + 1,
        };
        for j in start..bodies.len() {
            if i == j {
                continue;
            }
            let (body1, body2) = pair_mut(bodies, i, j);
            if resolve_pair(body1, body2, elasticity) {
                debug!("Collision detected between bodies {} and {}.", i, j);
                impulses += 1;
            }
        }
    }
    impulses
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn overlaps(body1: &Body, body2: &Body) -> bool {
        body1.distance_to(body2) <= body1.radius() + body2.radius()
    }

    fn ball(x: Float, vx: Float, mass: Float) -> Body {
        Body::new([x, 0.], [vx, 0.], mass, 1.).unwrap()
    }

    #[test]
    fn head_on_collision_of_equal_masses() {
        let mut bodies = vec![ball(0., 5., 10.), ball(2., -5., 10.)];
        let impulses = resolve_collisions(&mut bodies, 0.7, PairIteration::Ordered);
        // The reverse visit sees a separating pair.
        assert_eq!(impulses, 1);
        assert_relative_eq!(bodies[0].velocity[0], -3.5, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].velocity[0], 3.5, epsilon = 1e-12);
        assert_eq!(bodies[0].velocity[1], 0.);
        assert_eq!(bodies[1].velocity[1], 0.);
    }

    #[test]
    fn unordered_iteration_matches_for_a_single_pair() {
        let mut bodies = vec![ball(0., 5., 10.), ball(2., -5., 10.)];
        let impulses = resolve_collisions(&mut bodies, 0.7, PairIteration::Unordered);
        assert_eq!(impulses, 1);
        assert_relative_eq!(bodies[0].velocity[0], -3.5, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].velocity[0], 3.5, epsilon = 1e-12);
    }

    #[test]
    fn reversed_order_gives_the_same_response() {
        let mut bodies = vec![ball(2., -5., 10.), ball(0., 5., 10.)];
        resolve_collisions(&mut bodies, 0.7, PairIteration::Ordered);
        assert_relative_eq!(bodies[0].velocity[0], 3.5, epsilon = 1e-12);
        assert_relative_eq!(bodies[1].velocity[0], -3.5, epsilon = 1e-12);
    }

    #[test]
    fn perfectly_inelastic_pair_counts_one_impulse() {
        let mut bodies = vec![ball(0., 5., 10.), ball(2., -5., 10.)];
        let impulses = resolve_collisions(&mut bodies, 0., PairIteration::Ordered);
        assert_eq!(impulses, 1);
        assert_relative_eq!(bodies[0].velocity[0], 0., epsilon = 1e-12);
        assert_relative_eq!(bodies[1].velocity[0], 0., epsilon = 1e-12);
    }

    fn middle_ball_first() -> Vec<Body> {
        vec![ball(1.5, 0., 10.), ball(0., 5., 10.), ball(3., -5., 10.)]
    }

    #[test]
    fn ordered_iteration_revisits_pairs_with_updated_velocities() {
        let mut bodies = middle_ball_first();
        let impulses = resolve_collisions(&mut bodies, 0.7, PairIteration::Ordered);
        println!("{:?}", bodies);
        // (0, 1), (0, 2), then (1, 0) again since (0, 2) pushed ball 0 back into ball 1.
        assert_eq!(impulses, 3);
        assert_relative_eq!(bodies[0].velocity[0], 0.095625, epsilon = 1e-9);
        assert_relative_eq!(bodies[1].velocity[0], -2.958125, epsilon = 1e-9);
        assert_relative_eq!(bodies[2].velocity[0], 2.8625, epsilon = 1e-9);
    }

    #[test]
    fn unordered_iteration_visits_each_pair_once() {
        let mut bodies = middle_ball_first();
        let impulses = resolve_collisions(&mut bodies, 0.7, PairIteration::Unordered);
        println!("{:?}", bodies);
        assert_eq!(impulses, 2);
        assert_relative_eq!(bodies[0].velocity[0], -3.6125, epsilon = 1e-9);
        assert_relative_eq!(bodies[1].velocity[0], 0.75, epsilon = 1e-9);
        assert_relative_eq!(bodies[2].velocity[0], 2.8625, epsilon = 1e-9);
    }

    #[test]
    fn separating_pairs_are_untouched() {
        let mut bodies = vec![ball(0., -5., 10.), ball(1., 5., 10.)];
        let impulses = resolve_collisions(&mut bodies, 0.7, PairIteration::Ordered);
        assert_eq!(impulses, 0);
        assert_eq!(bodies[0].velocity, [-5., 0.]);
        assert_eq!(bodies[1].velocity, [5., 0.]);
    }

    #[test]
    fn distant_pairs_are_untouched() {
        let mut bodies = vec![ball(0., 5., 10.), ball(2.5, -5., 10.)];
        assert!(!overlaps(&bodies[0], &bodies[1]));
        let impulses = resolve_collisions(&mut bodies, 0.7, PairIteration::Ordered);
        assert_eq!(impulses, 0);
        assert_eq!(bodies[0].velocity, [5., 0.]);
    }

    #[test]
    fn coincident_centres_are_skipped() {
        let mut bodies = vec![ball(1., 5., 10.), ball(1., -5., 10.)];
        let impulses = resolve_collisions(&mut bodies, 0.7, PairIteration::Ordered);
        assert_eq!(impulses, 0);
        assert_eq!(bodies[0].velocity, [5., 0.]);
        assert_eq!(bodies[1].velocity, [-5., 0.]);
    }

    #[test]
    fn collision_conserves_momentum_for_unequal_masses() {
        let mut body1 = Body::new([0., 0.], [3., 1.], 2., 1.).unwrap();
        let mut body2 = Body::new([1., 1.], [-1., -2.], 7., 1.).unwrap();
        let before: Vec<Float> = (0..DIMENSIONALITY)
            .map(|k| body1.momentum()[k] + body2.momentum()[k])
            .collect();
        assert!(resolve_pair(&mut body1, &mut body2, 0.7));
        for k in 0..DIMENSIONALITY {
            let after = body1.momentum()[k] + body2.momentum()[k];
            assert_relative_eq!(after, before[k], epsilon = 1e-12);
        }
    }

    #[test]
    fn perfectly_elastic_collision_conserves_kinetic_energy() {
        let mut body1 = Body::new([0., 0.], [3., 1.], 2., 1.).unwrap();
        let mut body2 = Body::new([1., 1.], [-1., -2.], 7., 1.).unwrap();
        let before = body1.kinetic_energy() + body2.kinetic_energy();
        assert!(resolve_pair(&mut body1, &mut body2, 1.));
        let after = body1.kinetic_energy() + body2.kinetic_energy();
        assert_relative_eq!(after, before, epsilon = 1e-12);
    }

    #[test]
    fn bodies_remain_overlapping_after_impulse() {
        let mut bodies = vec![ball(0., 5., 10.), ball(1., -5., 10.)];
        resolve_collisions(&mut bodies, 0.7, PairIteration::Ordered);
        assert_eq!(bodies[0].position, [0., 0.]);
        assert_eq!(bodies[1].position, [1., 0.]);
        assert!(overlaps(&bodies[0], &bodies[1]));
    }
}

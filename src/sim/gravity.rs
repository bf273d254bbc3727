use super::body::Body;
use super::units::{Float, DIMENSIONALITY};

/// Acceleration of `accelerated` due to `accelerating`, or `None` if the two
/// centres coincide.
pub(crate) fn get_acceleration(
    accelerated: &Body,
    accelerating: &Body,
    gravitational_constant: Float,
) -> Option<[Float; DIMENSIONALITY]> {
    let dist = accelerated.distance_to(accelerating);
    if dist <= 0. {
        return None;
    }
    let force = gravitational_constant * accelerated.mass() * accelerating.mass() / (dist * dist);
    let accel = force / accelerated.mass();
    let mut acceleration = [0.; DIMENSIONALITY];
    for k in 0..DIMENSIONALITY {
        let direction = (accelerating.position[k] - accelerated.position[k]) / dist;
        acceleration[k] = direction * accel;
    }
    Some(acceleration)
}

/// Adds the attraction of every other body to each body's velocity, scaled by
/// the time step. Positions are left untouched, so the visiting order only
/// matters for rounding.
pub(crate) fn accumulate(bodies: &mut [Body], gravitational_constant: Float, time_step: Float) {
    for i in 0..bodies.len() {
        for j in 0..bodies.len() {
            if i == j {
                continue;
            }
            let Some(acceleration) =
                get_acceleration(&bodies[i], &bodies[j], gravitational_constant)
            else {
                continue;
            };
            for k in 0..DIMENSIONALITY {
                bodies[i].velocity[k] += acceleration[k] * time_step;
            }
        }
    }
}

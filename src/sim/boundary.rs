use super::body::Body;
use super::units::{Float, WALL_RESTITUTION};

const X: usize = 0;
const Y: usize = 1;

fn reflect(body: &mut Body, axis: usize, wall_position: Float) {
    body.position[axis] = wall_position;
    body.velocity[axis] = -body.velocity[axis] * WALL_RESTITUTION;
}

/// Clamps the body's centre so that it does not penetrate any wall and
/// reflects the velocity component normal to each touched wall.
pub(crate) fn confine(body: &mut Body, width: Float, height: Float) {
    let r = body.radius();

    // floor
    if body.position[Y] - r < 0. {
        reflect(body, Y, r);
    }

    if body.position[X] - r < 0. {
        reflect(body, X, r);
    } else if body.position[X] + r > width {
        reflect(body, X, width - r);
    }

    // ceiling
    if body.position[Y] + r > height {
        reflect(body, Y, height - r);
    }
}

use thiserror::Error;

use crate::sim::units::{Float, DIMENSIONALITY, EARTH_MASS};

#[derive(Debug, Error, PartialEq)]
pub(crate) enum BodyError {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(Float),
    #[error("body radius must be positive, got {0}")]
    NonPositiveRadius(Float),
    #[error("body state must be finite")]
    NonFinite,
}

/// A point mass with a collision radius.
///
/// Mass and radius are fixed at construction; position and velocity are
/// rewritten by every simulation pass.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Body {
    pub(crate) position: [Float; DIMENSIONALITY],
    pub(crate) velocity: [Float; DIMENSIONALITY],
    mass: Float,
    radius: Float,
}

impl Body {
    pub(crate) fn new(
        position: [Float; DIMENSIONALITY],
        velocity: [Float; DIMENSIONALITY],
        mass: Float,
        radius: Float,
    ) -> Result<Body, BodyError> {
        if position.iter().chain(velocity.iter()).any(|x| !x.is_finite()) {
            return Err(BodyError::NonFinite);
        }
        // NaN fails the comparison and is caught here as well.
        if !(mass > 0.) || mass.is_infinite() {
            return Err(BodyError::NonPositiveMass(mass));
        }
        if !(radius > 0.) || radius.is_infinite() {
            return Err(BodyError::NonPositiveRadius(radius));
        }
        Ok(Body {
            position,
            velocity,
            mass,
            radius,
        })
    }

    /// A resting ball with the mass of the earth.
    pub(crate) fn with_default_mass(x: Float, y: Float, radius: Float) -> Result<Body, BodyError> {
        Self::new([x, y], [0., 0.], EARTH_MASS, radius)
    }

    pub(crate) fn mass(&self) -> Float {
        self.mass
    }

    pub(crate) fn radius(&self) -> Float {
        self.radius
    }

    pub(crate) fn distance_to(&self, other: &Self) -> Float {
        let mut distance_squared = 0.;
        for k in 0..DIMENSIONALITY {
            let d = self.position[k] - other.position[k];
            distance_squared += d * d;
        }
        distance_squared.sqrt()
    }

    pub(crate) fn momentum(&self) -> [Float; DIMENSIONALITY] {
        let mut momentum = [0.; DIMENSIONALITY];
        for k in 0..DIMENSIONALITY {
            momentum[k] = self.mass * self.velocity[k];
        }
        momentum
    }

    pub(crate) fn kinetic_energy(&self) -> Float {
        let speed_squared = self.velocity.iter().map(|v| v * v).sum::<Float>();
        0.5 * self.mass * speed_squared
    }

    pub(crate) fn potential_energy(&self, other: &Self, gravitational_constant: Float) -> Float {
        let distance = self.distance_to(other);
        if distance <= 0. {
            return 0.;
        }
        -gravitational_constant * self.mass * other.mass / distance
    }
}

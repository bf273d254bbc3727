use thiserror::Error;

use super::units::{Float, ELASTICITY, G, SCREEN_HEIGHT, SCREEN_WIDTH, TIME_STEP};

#[derive(Debug, Error, PartialEq)]
pub(crate) enum ParameterError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(Float),
    #[error("domain must have positive finite extents, got {0} x {1}")]
    InvalidDomain(Float, Float),
    #[error("elasticity must be non-negative and finite, got {0}")]
    InvalidElasticity(Float),
    #[error("gravitational constant must be non-negative and finite, got {0}")]
    InvalidGravitationalConstant(Float),
}

/// How the collision pass walks over pairs of bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PairIteration {
    /// Every ordered pair `(i, j)` with `i != j`, so each pair is visited twice per tick.
    #[default]
    Ordered,
    /// Every unordered pair `i < j`, visited once per tick.
    Unordered,
}

/// Fixed configuration of a simulation, known at construction and never
/// changed by a tick.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SimulationParameters {
    pub(crate) gravitational_constant: Float,
    pub(crate) time_step: Float,
    pub(crate) elasticity: Float,
    pub(crate) width: Float,
    pub(crate) height: Float,
    pub(crate) pair_iteration: PairIteration,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            time_step: TIME_STEP,
            elasticity: ELASTICITY,
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            pair_iteration: PairIteration::Ordered,
        }
    }
}

fn is_positive(x: Float) -> bool {
    x.is_finite() && x > 0.
}

fn is_non_negative(x: Float) -> bool {
    x.is_finite() && x >= 0.
}

impl SimulationParameters {
    pub(crate) fn validate(&self) -> Result<(), ParameterError> {
        if !is_positive(self.time_step) {
            return Err(ParameterError::InvalidTimeStep(self.time_step));
        }
        if !is_positive(self.width) || !is_positive(self.height) {
            return Err(ParameterError::InvalidDomain(self.width, self.height));
        }
        if !is_non_negative(self.elasticity) {
            return Err(ParameterError::InvalidElasticity(self.elasticity));
        }
        if !is_non_negative(self.gravitational_constant) {
            return Err(ParameterError::InvalidGravitationalConstant(
                self.gravitational_constant,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParameters::default();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.elasticity, 0.7);
        assert_eq!(params.time_step, 0.016);
        assert_eq!(params.pair_iteration, PairIteration::Ordered);
    }

    #[test]
    fn invalid_values_are_reported() {
        let params = SimulationParameters {
            time_step: 0.,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParameterError::InvalidTimeStep(0.)));

        let params = SimulationParameters {
            height: -1.,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParameterError::InvalidDomain(1200., -1.))
        );

        let params = SimulationParameters {
            elasticity: -0.1,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParameterError::InvalidElasticity(-0.1))
        );

        let params = SimulationParameters {
            gravitational_constant: Float::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::InvalidGravitationalConstant(_))
        ));
    }

    #[test]
    fn gravity_and_elasticity_may_be_switched_off() {
        let params = SimulationParameters {
            gravitational_constant: 0.,
            elasticity: 0.,
            ..Default::default()
        };
        assert_eq!(params.validate(), Ok(()));
    }
}

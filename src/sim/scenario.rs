use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};
use serde::Deserialize;
use thiserror::Error;

use super::body::{Body, BodyError};
use super::parameters::{PairIteration, ParameterError, SimulationParameters};
use super::units::{Float, DIMENSIONALITY};

// Chosen so that a sun-like mass of 1e15 gets a radius of about 20.
const RANDOM_BODY_DENSITY: Float = 3e10;

#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid body #{index}: {source}")]
    Body {
        index: usize,
        #[source]
        source: BodyError,
    },
    #[error("invalid parameters: {0}")]
    Parameters(#[from] ParameterError),
    #[error("variance must be non-negative and finite, got {0}")]
    InvalidVariance(Float),
    #[error("invalid distribution: {0}")]
    Distribution(#[from] NormalError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Preset {
    /// One resting ball with the mass of the earth.
    Single,
    /// A sun with an earth and a moon on tangential velocities.
    SolarSystem,
    /// Two equal masses circling each other.
    Twins,
    /// Two equal masses on a wider, slower orbit.
    IrregularTwins,
    /// Four equal masses arranged in a cross.
    FourSymmetrical,
    /// Ten small bodies scattered around the centre.
    Clustered,
    /// The three-body figure-eight orbit.
    FigureEight,
    /// A heavy star surrounded by normally distributed bodies.
    Random,
}

/// Settings for [`Preset::Random`].
pub(crate) struct RandomParameters {
    pub(crate) body_count: u32,
    pub(crate) total_mass: Float,
    pub(crate) stellar_mass_fraction: Float,
    pub(crate) position_variance: Float,
    pub(crate) velocity_variance: Float,
}

impl Default for RandomParameters {
    fn default() -> Self {
        Self {
            body_count: 20,
            total_mass: 1e15,
            stellar_mass_fraction: 0.9,
            position_variance: 150.,
            velocity_variance: 1.,
        }
    }
}

fn radius_from_mass(mass: Float) -> Float {
    const MASS_TO_VOLUME_FACTOR: Float =
        3. / (4. * std::f64::consts::PI * RANDOM_BODY_DENSITY);
    (mass * MASS_TO_VOLUME_FACTOR).cbrt()
}

fn random_vector<R: Rng>(
    variance: Float,
    rng: &mut R,
) -> Result<[Float; DIMENSIONALITY], ScenarioError> {
    // Normal::new only rejects non-finite deviations.
    if !(variance >= 0.) || variance.is_infinite() {
        return Err(ScenarioError::InvalidVariance(variance));
    }
    let mut vector = [0.; DIMENSIONALITY];
    let distribution = Normal::new(0., variance)?;
    for x in vector.iter_mut() {
        *x = distribution.sample(rng);
    }
    Ok(vector)
}

fn body(
    x: Float,
    y: Float,
    radius: Float,
    mass: Float,
    vx: Float,
    vy: Float,
) -> Result<Body, BodyError> {
    Body::new([x, y], [vx, vy], mass, radius)
}

fn random_bodies<R: Rng>(
    params: &RandomParameters,
    centre: [Float; DIMENSIONALITY],
    rng: &mut R,
) -> Result<Vec<Body>, ScenarioError> {
    let stellar_mass = params.total_mass * params.stellar_mass_fraction;
    let mut bodies = vec![Body::new(
        centre,
        [0., 0.],
        stellar_mass,
        radius_from_mass(stellar_mass),
    )
    .map_err(|source| ScenarioError::Body { index: 0, source })?];
    if params.body_count == 0 {
        return Ok(bodies);
    }
    let mass = params.total_mass * (1. - params.stellar_mass_fraction) / params.body_count as Float;
    for i in 0..params.body_count {
        let offset = random_vector(params.position_variance, rng)?;
        let velocity = random_vector(params.velocity_variance, rng)?;
        let position = [centre[0] + offset[0], centre[1] + offset[1]];
        let body = Body::new(position, velocity, mass, radius_from_mass(mass)).map_err(
            |source| ScenarioError::Body {
                index: i as usize + 1,
                source,
            },
        )?;
        bodies.push(body);
    }
    Ok(bodies)
}

/// Builds the bodies of a preset, centred in the domain of `parameters`.
pub(crate) fn build_preset<R: Rng>(
    preset: Preset,
    parameters: &SimulationParameters,
    rng: &mut R,
) -> Result<Vec<Body>, ScenarioError> {
    let cx = parameters.width / 2.;
    let cy = parameters.height / 2.;
    let bodies = match preset {
        Preset::Single => vec![Body::with_default_mass(cx, cy, 50.)],
        Preset::SolarSystem => vec![
            body(cx, cy, 20., 1.989e15, 0., 0.),
            body(cx + 430., cy, 5., 5.97219e12, 0., 2.),
            body(cx + 450., cy, 2., 7.342e7, 0., 2.5),
        ],
        Preset::Twins => vec![
            body(cx - 50., cy, 10., 5e15, 0., -5.),
            body(cx + 50., cy, 10., 5e15, 0., 5.),
        ],
        Preset::IrregularTwins => vec![
            body(cx - 100., cy, 10., 5e15, 0., -2.),
            body(cx + 100., cy, 10., 5e15, 0., 2.),
        ],
        Preset::FourSymmetrical => vec![
            body(cx - 150., cy, 10., 6e15, 0., -6.),
            body(cx + 150., cy, 10., 6e15, 0., 6.),
            body(cx, cy - 150., 10., 6e15, 6., 0.),
            body(cx, cy + 150., 10., 6e15, -6., 0.),
        ],
        Preset::Clustered => (0..10)
            .map(|_| {
                let x = cx + rng.gen_range(-50..50_i32) as Float;
                let y = cy + rng.gen_range(-50..50_i32) as Float;
                let vx = rng.gen_range(-2..=2_i32) as Float;
                let vy = rng.gen_range(-2..=2_i32) as Float;
                body(x, y, 5., 1e14, vx, vy)
            })
            .collect(),
        Preset::FigureEight => {
            // Stable between roughly 4.25 and 4.35, slightly chaotic at 4.
            let divisor = 4.3;
            let mass = 5e14;
            vec![
                body(cx - 97., cy + 24.3, 10., mass, 4.66 / divisor, 4.32 / divisor),
                body(cx, cy, 10., mass, -9.32 / divisor, -8.65 / divisor),
                body(cx + 97., cy - 24.3, 10., mass, 4.66 / divisor, 4.32 / divisor),
            ]
        }
        Preset::Random => return random_bodies(&RandomParameters::default(), [cx, cy], rng),
    };
    bodies
        .into_iter()
        .enumerate()
        .map(|(index, body)| body.map_err(|source| ScenarioError::Body { index, source }))
        .collect()
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ParametersConfig {
    pub(crate) gravitational_constant: Option<Float>,
    pub(crate) time_step: Option<Float>,
    pub(crate) elasticity: Option<Float>,
    pub(crate) width: Option<Float>,
    pub(crate) height: Option<Float>,
    pub(crate) unordered_pairs: Option<bool>,
}

impl ParametersConfig {
    /// Overrides the fields of `base` that are set in the file.
    pub(crate) fn apply_to(&self, base: SimulationParameters) -> SimulationParameters {
        SimulationParameters {
            gravitational_constant: self
                .gravitational_constant
                .unwrap_or(base.gravitational_constant),
            time_step: self.time_step.unwrap_or(base.time_step),
            elasticity: self.elasticity.unwrap_or(base.elasticity),
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            pair_iteration: match self.unordered_pairs {
                Some(true) => PairIteration::Unordered,
                Some(false) => PairIteration::Ordered,
                None => base.pair_iteration,
            },
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub(crate) struct BodyConfig {
    pub(crate) position: [Float; DIMENSIONALITY],
    #[serde(default)]
    pub(crate) velocity: [Float; DIMENSIONALITY],
    pub(crate) mass: Float,
    pub(crate) radius: Float,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScenarioConfig {
    #[serde(default)]
    pub(crate) parameters: ParametersConfig,
    pub(crate) bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<ScenarioConfig, ScenarioError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub(crate) fn load(path: &Path) -> Result<ScenarioConfig, ScenarioError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Validates the file contents against `base` and turns them into runtime state.
    pub(crate) fn build(
        &self,
        base: SimulationParameters,
    ) -> Result<(SimulationParameters, Vec<Body>), ScenarioError> {
        let parameters = self.parameters.apply_to(base);
        parameters.validate()?;
        let bodies = self
            .bodies
            .iter()
            .enumerate()
            .map(|(index, bc)| {
                Body::new(bc.position, bc.velocity, bc.mass, bc.radius)
                    .map_err(|source| ScenarioError::Body { index, source })
            })
            .collect::<Result<Vec<Body>, ScenarioError>>()?;
        Ok((parameters, bodies))
    }
}

use log::trace;

use crate::sim::{
    body::Body,
    boundary, collision, gravity,
    parameters::{ParameterError, SimulationParameters},
    units::{Float, DIMENSIONALITY},
};

/// The full body set together with the configuration that drives it.
#[derive(Clone, Debug)]
pub(crate) struct World {
    bodies: Vec<Body>,
    parameters: SimulationParameters,
    ticks: u64,
}

impl World {
    pub(crate) fn new(
        bodies: Vec<Body>,
        parameters: SimulationParameters,
    ) -> Result<World, ParameterError> {
        parameters.validate()?;
        Ok(World {
            bodies,
            parameters,
            ticks: 0,
        })
    }

    pub(crate) fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub(crate) fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(crate) fn current_time(&self) -> Float {
        self.ticks as Float * self.parameters.time_step
    }

    /// Moves every body by its current velocity and keeps it inside the domain.
    fn do_motion_step(&mut self) {
        let (width, height) = (self.parameters.width, self.parameters.height);
        for body in self.bodies.iter_mut() {
            for k in 0..DIMENSIONALITY {
                body.position[k] += body.velocity[k];
            }
            boundary::confine(body, width, height);
        }
    }

    /// Advances the simulation by exactly one tick.
    pub(crate) fn step(&mut self) {
        self.do_motion_step();
        gravity::accumulate(
            &mut self.bodies,
            self.parameters.gravitational_constant,
            self.parameters.time_step,
        );
        let impulses = collision::resolve_collisions(
            &mut self.bodies,
            self.parameters.elasticity,
            self.parameters.pair_iteration,
        );
        self.ticks += 1;
        trace!("Tick {} done, {} collision impulses.", self.ticks, impulses);
    }

    pub(crate) fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub(crate) fn total_momentum(&self) -> [Float; DIMENSIONALITY] {
        let mut total = [0.; DIMENSIONALITY];
        for body in self.bodies.iter() {
            let momentum = body.momentum();
            for k in 0..DIMENSIONALITY {
                total[k] += momentum[k];
            }
        }
        total
    }

    pub(crate) fn total_kinetic_energy(&self) -> Float {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub(crate) fn potential_energy(&self) -> Float {
        let g = self.parameters.gravitational_constant;
        let mut energy = 0.;
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                energy += self.bodies[i].potential_energy(&self.bodies[j], g);
            }
        }
        energy
    }
}

pub(crate) type Float = f64;
pub(crate) const DIMENSIONALITY: usize = 2;

// Units are arbitrary screen units: positions in pixels, velocities in pixels per tick.
pub(crate) const G: Float = 6.67430e-11;
pub(crate) const TIME_STEP: Float = 0.016; // ~60 FPS
pub(crate) const ELASTICITY: Float = 0.7;
pub(crate) const WALL_RESTITUTION: Float = 0.8;

pub(crate) const SCREEN_WIDTH: Float = 1200.;
pub(crate) const SCREEN_HEIGHT: Float = 800.;

pub(crate) const EARTH_MASS: Float = 5.97219e24;

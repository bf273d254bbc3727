use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gui::Gui;
use iced::{Size, Task};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use sim::{
    parameters::{PairIteration, SimulationParameters},
    scenario::{build_preset, Preset, ScenarioConfig},
    system::World,
    units::Float,
};

mod gui;
mod sim;

#[derive(Parser, Debug)]
#[command(about = "Point masses under mutual gravity, bouncing off walls and each other.")]
struct Args {
    /// Built-in initial configuration.
    #[arg(long, value_enum, default_value_t = Preset::SolarSystem)]
    preset: Preset,
    /// YAML scenario file, takes precedence over --preset.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Seed for the randomised presets.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long)]
    elasticity: Option<Float>,
    #[arg(long)]
    time_step: Option<Float>,
    #[arg(long)]
    gravitational_constant: Option<Float>,
    /// Resolve each overlapping pair once per tick instead of once per ordering.
    #[arg(long)]
    unordered_pairs: bool,
    /// Run this many ticks without a window, then print the final state.
    #[arg(long)]
    headless: Option<u64>,
}

impl Args {
    fn override_parameters(&self, mut params: SimulationParameters) -> SimulationParameters {
        if let Some(elasticity) = self.elasticity {
            params.elasticity = elasticity;
        }
        if let Some(time_step) = self.time_step {
            params.time_step = time_step;
        }
        if let Some(g) = self.gravitational_constant {
            params.gravitational_constant = g;
        }
        if self.unordered_pairs {
            params.pair_iteration = PairIteration::Unordered;
        }
        params
    }
}

fn load_world(args: &Args) -> Result<World> {
    let (params, bodies) = match &args.scenario {
        Some(path) => {
            let config = ScenarioConfig::load(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?;
            let (params, bodies) = config.build(SimulationParameters::default())?;
            (args.override_parameters(params), bodies)
        }
        None => {
            let params = args.override_parameters(SimulationParameters::default());
            let mut rng = StdRng::seed_from_u64(args.seed);
            let bodies = build_preset(args.preset, &params, &mut rng)?;
            (params, bodies)
        }
    };
    info!("Starting simulation with {} bodies.", bodies.len());
    Ok(World::new(bodies, params)?)
}

fn log_state(world: &World) {
    info!(
        "After {} ticks (t = {:.3}):",
        world.ticks(),
        world.current_time()
    );
    for (i, body) in world.bodies().iter().enumerate() {
        info!(
            "  body {}: position {:?}, velocity {:?}",
            i, body.position, body.velocity
        );
    }
    info!("  total momentum: {:?}", world.total_momentum());
    info!(
        "  kinetic energy: {:e}, potential energy: {:e}",
        world.total_kinetic_energy(),
        world.potential_energy()
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let mut world = load_world(&args)?;

    if let Some(ticks) = args.headless {
        world.run(ticks);
        log_state(&world);
        return Ok(());
    }

    let size = Size::new(
        world.parameters().width as f32,
        world.parameters().height as f32,
    );
    let mut window_settings = iced::window::Settings::default();
    window_settings.size = size;
    iced::application("Gravity project", Gui::update, Gui::view)
        .subscription(Gui::subscription)
        .antialiasing(true)
        .window(window_settings)
        .run_with(move || (Gui::new(world), Task::none()))?;
    info!("Window closed.");
    Ok(())
}

use clap::{Args, Parser, Subcommand};
use glam::Vec2;
use orbit_core::{EngineConfig, EngineError, Mobility, SimulationMode, Simulation};

mod sandbox;

#[derive(Parser)]
#[command(name = "orbit")]
#[command(about = "Orbit - a 2D gravity and collision sandbox", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive sandbox window
    Sandbox {
        #[command(flatten)]
        engine: EngineArgs,

        /// Canvas width in pixels
        #[arg(long, default_value_t = 640)]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value_t = 480)]
        height: u32,

        /// Simulation ticks per second (defaults to 60 for orbit, 30 for collision)
        #[arg(long)]
        fps: Option<u32>,
    },
    /// Run a fixed number of ticks without a window and print the result
    Run {
        #[command(flatten)]
        engine: EngineArgs,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 100)]
        steps: u64,

        /// Body as `[fixed:|movable:]x,y[,mass]`, inserted in the order given
        #[arg(long = "body", value_parser = parse_body_spec)]
        bodies: Vec<BodySpec>,
    },
}

#[derive(Args, Clone)]
struct EngineArgs {
    /// Interaction mode: `orbit` or `collision`
    #[arg(long, default_value = "orbit")]
    mode: SimulationMode,

    /// Default mass (and radius) of spawned bodies
    #[arg(long)]
    mass: Option<f32>,

    /// Collision bounce coefficient
    #[arg(long)]
    bounce: Option<f32>,
}

impl EngineArgs {
    fn to_config(&self) -> EngineConfig {
        let mut config = EngineConfig::for_mode(self.mode);
        if let Some(mass) = self.mass {
            config.set_default_spawn_mass(mass);
        }
        if let Some(bounce) = self.bounce {
            config.set_bounce_coefficient(bounce);
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BodySpec {
    pos: Vec2,
    mass: Option<f32>,
    mobility: Mobility,
}

fn parse_body_spec(s: &str) -> Result<BodySpec, String> {
    let (mobility, coords) = match s.split_once(':') {
        Some((kind, rest)) => match kind.trim() {
            "fixed" => (Mobility::Fixed, rest),
            "movable" => (Mobility::Movable, rest),
            other => return Err(format!("unknown body kind '{}'", other)),
        },
        None => (Mobility::Movable, s),
    };

    let parts: Vec<&str> = coords.split(',').map(str::trim).collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(format!("expected `x,y` or `x,y,mass`, got '{}'", s));
    }

    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        let value: f32 = part
            .parse()
            .map_err(|_| format!("'{}' is not a number", part))?;
        if !value.is_finite() {
            return Err(format!("'{}' is not a finite number", part));
        }
        values.push(value);
    }

    Ok(BodySpec {
        pos: Vec2::new(values[0], values[1]),
        mass: values.get(2).copied(),
        mobility,
    })
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let result = match cli.command {
        Commands::Sandbox {
            engine,
            width,
            height,
            fps,
        } => {
            let fps = fps.unwrap_or(match engine.mode {
                SimulationMode::Orbit => 60,
                SimulationMode::CollisionOnly => 30,
            });
            run_sandbox(engine.to_config(), width, height, fps)
        }
        Commands::Run {
            engine,
            steps,
            bodies,
        } => run_headless(engine.to_config(), steps, &bodies),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_sandbox(
    config: EngineConfig,
    width: u32,
    height: u32,
    fps: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "starting sandbox: {}x{} at {} fps, mode {}",
        width,
        height,
        fps,
        config.mode
    );
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Orbit")
            .with_inner_size([width as f32, height as f32 + sandbox::PANEL_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(
        "Orbit",
        options,
        Box::new(move |cc| {
            Ok(Box::new(sandbox::SandboxApp::new(
                cc,
                config,
                Vec2::new(width as f32, height as f32),
                fps,
            )))
        }),
    )?;
    Ok(())
}

fn run_headless(
    config: EngineConfig,
    steps: u64,
    bodies: &[BodySpec],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = Simulation::new(config);
    spawn_all(&mut sim, bodies)?;

    log::info!("running {} ticks over {} bodies", steps, sim.world.len());
    for _ in 0..steps {
        sim.tick();
    }

    for (i, state) in sim.snapshot().iter().enumerate() {
        println!(
            "{} {:?} pos=({:.4}, {:.4}) vel=({:.4}, {:.4}) mass={}",
            i, state.mobility, state.pos.x, state.pos.y, state.vel.x, state.vel.y, state.mass
        );
    }

    Ok(())
}

/// Spawn bodies in command-line order, which is also render order
fn spawn_all(sim: &mut Simulation, bodies: &[BodySpec]) -> Result<(), EngineError> {
    for spec in bodies {
        match spec.mass {
            Some(mass) => sim.spawn_with_mass(spec.pos, spec.mobility, mass)?,
            None => sim.spawn(spec.pos, spec.mobility)?,
        };
    }
    Ok(())
}

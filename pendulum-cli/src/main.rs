mod viewer;

use clap::{Args, Parser, Subcommand};
use pendulum_core::glam::DVec2;
use pendulum_core::{run_headless, ChainConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pendulum")]
#[command(about = "Pendulum chain simulator with quadratic air drag", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step the simulation headless and print an energy table
    Run {
        #[command(flatten)]
        chain: ChainArgs,
        /// Number of fixed steps to simulate
        #[arg(long, default_value_t = 600)]
        steps: u64,
        /// Print a row every N steps
        #[arg(long, default_value_t = 60)]
        report_every: u64,
    },
    /// Open the interactive viewer
    View {
        #[command(flatten)]
        chain: ChainArgs,
    },
}

/// Chain settings. Flags override values from `--config`.
#[derive(Args, Debug, Clone)]
struct ChainArgs {
    /// JSON preset file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of bobs (1-10)
    #[arg(long)]
    bobs: Option<usize>,
    /// Mass per bob in kg (1-10)
    #[arg(long)]
    mass: Option<f64>,
    /// Total chain length in meters (1-5)
    #[arg(long)]
    length: Option<f64>,
    /// Initial angle from vertical in degrees (1-60)
    #[arg(long)]
    angle: Option<f64>,
    /// Drag coefficient (0.01-0.05)
    #[arg(long)]
    drag: Option<f64>,
}

impl ChainArgs {
    fn resolve(&self) -> Result<ChainConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ChainConfig::load(path)?,
            None => ChainConfig::default(),
        };
        if let Some(bobs) = self.bobs {
            config.bob_count = bobs;
        }
        if let Some(mass) = self.mass {
            config.mass = mass;
        }
        if let Some(length) = self.length {
            config.length_m = length;
        }
        if let Some(angle) = self.angle {
            config.angle_deg = angle;
        }
        if let Some(drag) = self.drag {
            config.drag = drag;
        }
        Ok(config.clamped())
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            chain,
            steps,
            report_every,
        } => run_table(&chain, steps, report_every),
        Commands::View { chain } => run_viewer(&chain),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_table(
    chain: &ChainArgs,
    steps: u64,
    report_every: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = chain.resolve()?;
    log::info!("running {} steps with {:?}", steps, config);

    // Same anchor the viewer uses for a 1000 px wide window
    let pivot = DVec2::new(500.0, viewer::PIVOT_TOP);
    let samples = run_headless(config, pivot, steps, report_every);

    println!("bobs: {}", config.bob_count);
    println!(
        "{:>8} {:>8} {:>12} {:>12} {:>12}",
        "step", "time(s)", "kinetic(J)", "potential(J)", "total(J)"
    );
    for sample in samples {
        println!(
            "{:>8} {:>8.3} {:>12.3} {:>12.3} {:>12.3}",
            sample.step,
            sample.time,
            sample.energies.kinetic,
            sample.energies.potential,
            sample.energies.total()
        );
    }

    Ok(())
}

fn run_viewer(chain: &ChainArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = chain.resolve()?;
    let config_path = chain.config.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_title("Pendulum Chain Simulator"),
        ..Default::default()
    };

    eframe::run_native(
        "pendulum",
        options,
        Box::new(move |cc| Ok(Box::new(viewer::PendulumApp::new(config, config_path, cc)))),
    )
    .map_err(|e| format!("viewer failed: {}", e))?;

    Ok(())
}

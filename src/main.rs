//! swe1d command-line driver.
//!
//! Builds a scenario, runs it with the chosen Riemann solver and precision
//! policy, and writes VTK snapshots (optionally also a console table).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use swe1d::io::{ConsoleWriter, VtkWriter, Writer};
use swe1d::precision::{Bf16Safe, Double, MixedBf16, MixedSingle, Precision, PrecisionPolicy, Tolerances};
use swe1d::scenario::{DamBreak, Scenario, ShockRare, Subcritical, Supercritical};
use swe1d::{BoundaryCondition, CellState, Simulation, SimulationConfig, SolverKind, WavePropagationBlock, create_solver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScenarioKind {
    /// Dam break on a flat bed
    DamBreak,
    /// Shock-shock or rare-rare problem (sign of --hu-left)
    ShockRare,
    /// Subcritical flow over a bump
    Subcritical,
    /// Supercritical flow over a bump
    Supercritical,
}

/// One-dimensional shallow water solver
#[derive(Parser, Debug)]
#[command(name = "swe1d")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "One-dimensional finite-volume shallow water solver", long_about = None)]
struct Cli {
    /// Initial condition
    #[arg(short, long, value_enum, default_value_t = ScenarioKind::DamBreak)]
    scenario: ScenarioKind,

    /// Number of cells
    #[arg(short = 'n', long, default_value_t = 100)]
    size: usize,

    /// Domain width [m] (dam break and shock-rare)
    #[arg(short, long, default_value_t = 1000.0)]
    width: f64,

    /// Water height left of the dam, or the constant height of shock-rare [m]
    #[arg(long, default_value_t = 14.0)]
    h_left: f64,

    /// Water height right of the dam [m]
    #[arg(long, default_value_t = 3.5)]
    h_right: f64,

    /// Velocity right of the dam [m/s]
    #[arg(long, default_value_t = 0.0)]
    u_right: f64,

    /// Momentum left of the discontinuity in shock-rare [m²/s]
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    hu_left: f64,

    /// Number of time steps
    #[arg(short = 't', long, default_value_t = 200)]
    steps: usize,

    /// Simulation end time [s]; overrides --steps
    #[arg(long)]
    end_time: Option<f64>,

    /// Riemann solver (fwave, hllc, rusanov, osher)
    #[arg(long, default_value = "fwave")]
    solver: SolverKind,

    /// Precision policy (double, single, bf16, mixed-bf16)
    #[arg(long, default_value = "double")]
    precision: Precision,

    /// Left boundary condition (outflow, reflecting)
    #[arg(long, default_value = "outflow")]
    left_bc: BoundaryCondition,

    /// Right boundary condition (outflow, reflecting)
    #[arg(long, default_value = "outflow")]
    right_bc: BoundaryCondition,

    /// CFL factor; defaults to the solver's recommendation
    #[arg(long)]
    cfl: Option<f64>,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Write a snapshot every this many steps (0 disables output)
    #[arg(long, default_value_t = 1)]
    output_every: usize,

    /// Also print every snapshot to stdout
    #[arg(long)]
    console: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn scenario(&self) -> Result<Box<dyn Scenario>> {
        let scenario: Box<dyn Scenario> = match self.scenario {
            ScenarioKind::DamBreak => Box::new(DamBreak::new(
                self.width,
                self.size,
                self.h_left,
                self.h_right,
                self.u_right,
            )?),
            ScenarioKind::ShockRare => {
                Box::new(ShockRare::centered(self.width, self.size, self.h_left, self.hu_left)?)
            }
            ScenarioKind::Subcritical => Box::new(Subcritical::new(self.size)?),
            ScenarioKind::Supercritical => Box::new(Supercritical::new(self.size)?),
        };
        Ok(scenario)
    }

    fn simulation_config(&self) -> SimulationConfig {
        let config = SimulationConfig::default().with_log_interval(100);
        match self.end_time {
            Some(end_time) => config.with_end_time(end_time),
            None => config.with_max_steps(self.steps),
        }
    }
}

fn run<P: PrecisionPolicy>(cli: &Cli, scenario: &dyn Scenario) -> Result<()> {
    let tolerances = Tolerances::<P::Work>::for_storage::<P::Store>();
    let solver = create_solver(cli.solver, tolerances)?;

    let mut state = CellState::<P::Store>::from_scenario(scenario, cli.size)?;
    let mut block = WavePropagationBlock::<P, _>::new(&mut state, scenario.cell_size(), solver)?;
    if let Some(cfl) = cli.cfl {
        block = block.with_cfl(cfl)?;
    }
    block.set_left_boundary_condition(cli.left_bc)?;
    block.set_right_boundary_condition(cli.right_bc)?;

    info!(
        scenario = scenario.name(),
        solver = %cli.solver,
        precision = P::NAME,
        cells = cli.size,
        cell_size = scenario.cell_size(),
        left_bc = %cli.left_bc,
        right_bc = %cli.right_bc,
        "configured"
    );

    let mut vtk = VtkWriter::new(&cli.output, "swe1d", scenario.cell_size())
        .with_context(|| format!("cannot create output directory {}", cli.output.display()))?;
    let mut console = cli.console.then(ConsoleWriter::stdout);

    if cli.output_every > 0 {
        vtk.write(0.0, block.state())?;
        if let Some(console) = console.as_mut() {
            console.write(0.0, block.state())?;
        }
    }

    let result = Simulation::new(block)
        .with_config(cli.simulation_config())
        .run_with_observer(|report, state| -> Result<()> {
            if cli.output_every > 0 && report.step % cli.output_every == 0 {
                vtk.write(report.time, state)?;
                if let Some(console) = console.as_mut() {
                    console.write(report.time, state)?;
                }
            }
            Ok(())
        })?;

    vtk.finish()?;
    if let Some(console) = console.as_mut() {
        console.finish()?;
    }

    info!(
        steps = result.n_steps,
        final_time = result.final_time,
        volume_change = result.relative_volume_change(),
        frames = vtk.frames(),
        output = %vtk.collection_path().display(),
        "done"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let scenario = cli.scenario().context("invalid scenario parameters")?;
    match cli.precision {
        Precision::Double => run::<Double>(&cli, scenario.as_ref()),
        Precision::MixedSingle => run::<MixedSingle>(&cli, scenario.as_ref()),
        Precision::Bf16Safe => run::<Bf16Safe>(&cli, scenario.as_ref()),
        Precision::MixedBf16 => run::<MixedBf16>(&cli, scenario.as_ref()),
    }
}

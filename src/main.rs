use clap::Parser;
use kerbal_stage::*;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kerbal-sim")]
#[command(about = "Single-stage rocket performance and flight simulator")]
#[command(version)]
struct Cli {
    /// Integration time step in seconds
    #[arg(long, default_value_t = TIME_STEP)]
    dt: f64,

    /// Stop the flight after this many simulated seconds
    #[arg(long, default_value_t = MAX_SIMULATION_TIME)]
    max_time: f64,

    /// Print every n-th sample of the trajectory (0 prints none)
    #[arg(long, default_value_t = 0)]
    samples: usize,

    /// Parts making up the stage, by catalog name
    #[arg(long, num_args = 1.., default_values = ["CommandPodMk1", "BACC"])]
    parts: Vec<String>,

    /// Delta-v spent leaving the atmosphere, enabling the true dv figure
    #[arg(long, requires = "dv_escape")]
    dv_out: Option<f64>,

    /// Delta-v needed to escape the planet once out of the atmosphere
    #[arg(long, requires = "dv_out")]
    dv_escape: Option<f64>,

    /// Log debug events
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(level)
        .init();

    let config = SimulationConfig::new(cli.dt, cli.max_time)?;
    let catalog = Catalog::standard();
    let mut planet = catalog.body("Kerbin")?;
    if let (Some(dv_out), Some(dv_escape)) = (cli.dv_out, cli.dv_escape) {
        planet = planet.with_escape_budget(dv_out, dv_escape)?;
    }
    let names: Vec<&str> = cli.parts.iter().map(String::as_str).collect();
    let stage = catalog.stage(&names)?;

    println!("{}\n", planet);
    for engine in stage.engines() {
        if let Some(booster) = engine.borrow().as_solid_booster() {
            println!("{}\n", booster);
        }
    }
    println!(
        "{}\n",
        StageReport {
            stage: &stage,
            planet: &planet,
        }
    );

    let mut simulator = Simulator::new(&stage, &planet)?;
    let telemetry = simulator.run(&config)?;

    if cli.samples > 0 {
        println!("--- Trajectory ---");
        for sample in telemetry.samples().iter().step_by(cli.samples) {
            println!(
                "t={:>8} | Alt: {:>10} | Vel: {:>13} | Terminal: {:>13}",
                Telemetry::format_time(sample.time),
                Telemetry::format_altitude(sample.altitude),
                Telemetry::format_speed(sample.velocity),
                Telemetry::format_speed(sample.terminal_velocity)
            );
        }
        println!();
    }

    println!("{}", telemetry);

    Ok(())
}

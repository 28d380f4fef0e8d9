use std::process::ExitCode;

use clap::Parser;

use landing_guidance::gnc::EventKind;
use landing_guidance::io::{self, FlightSummary};
use landing_guidance::sim::{self, presets, LandingRun};
use landing_guidance::types::GuidanceConfig;
use landing_guidance::GuidanceError;

/// Simulated powered-descent landing driven by the guidance loop
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Scenario preset (lunar, kerbin)
    #[arg(short, long, default_value = "lunar")]
    preset: String,

    /// Guidance tuning file (TOML); defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Write the trajectory to this CSV file
    #[arg(long)]
    csv: Option<String>,

    /// Write a JSON flight summary to this file
    #[arg(long)]
    summary: Option<String>,

    /// Simulate a vessel without radial SAS (exercises the RCS hold)
    #[arg(long)]
    no_radial_sas: bool,

    /// Fly without a rendezvous target
    #[arg(long)]
    no_target: bool,

    /// Splash down instead of landing
    #[arg(long)]
    water: bool,

    /// Abort after this many control cycles
    #[arg(long, default_value_t = 1_000_000)]
    cycle_limit: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match fly(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn fly(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut scenario = presets::by_name(&args.preset)
        .ok_or_else(|| format!("unknown preset: {}", args.preset))?;
    if args.no_radial_sas {
        scenario.radial_sas = false;
    }
    if args.no_target {
        scenario.target = None;
    }
    scenario.water |= args.water;

    let mut config = match &args.config {
        Some(path) => GuidanceConfig::load(path).map_err(GuidanceError::from)?,
        None => GuidanceConfig::default(),
    };
    config.cycle_limit.get_or_insert(args.cycle_limit);

    let run = sim::simulate_landing(&scenario, &config)?;
    print_report(&run);

    if let Some(path) = &args.csv {
        io::write_trajectory_file(path, &run.trajectory)?;
        log::info!("trajectory written to {path}");
    }
    if let Some(path) = &args.summary {
        let mut file = std::fs::File::create(path)?;
        io::write_summary(&mut file, &FlightSummary::from_run(&run))?;
        log::info!("summary written to {path}");
    }
    Ok(())
}

fn print_report(run: &LandingRun) {
    let summary = FlightSummary::from_run(run);

    println!();
    println!("====================================================================");
    println!("  POWERED DESCENT: {} ({})", run.scenario, run.report.vessel);
    println!("====================================================================");
    println!();

    println!("  Guidance Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &run.report.events {
        let label = match e.kind {
            EventKind::DescentStarted => "DESCENT".to_owned(),
            EventKind::BurnStarted => "BURN".to_owned(),
            EventKind::TargetTrackingEngaged => "TRACKING".to_owned(),
            EventKind::GearDeployed => "GEAR".to_owned(),
            EventKind::FinalBurn => "FINAL".to_owned(),
            EventKind::Touchdown(s) => format!("{s:?}").to_uppercase(),
            EventKind::SasFallback => "RCS HOLD".to_owned(),
            EventKind::Safed => "SAFED".to_owned(),
        };
        println!("  {:<10} t={:>7.2}s   alt={:>8.1}m", label, e.time, e.altitude);
    }
    println!();

    println!("  Touchdown");
    println!("  ──────────────────────────────────────────────────────────────────");
    if let Some(vz) = summary.touchdown_vertical_speed {
        println!(
            "  Vertical:      {:>8.2} m/s   Horizontal:   {:>8.2} m/s",
            vz,
            summary.touchdown_horizontal_speed.unwrap_or(0.0)
        );
    }
    if let Some(d) = summary.target_distance {
        println!("  Target miss:   {:>8.1} m", d);
    }
    println!(
        "  Propellant:    {:>8.1} kg    Max speed:    {:>8.1} m/s",
        summary.propellant_used, summary.max_speed
    );
    println!(
        "  Flight time:   {:>8.1} s     Cycles:       {:>8}",
        summary.flight_time, summary.cycles
    );
    println!();
}

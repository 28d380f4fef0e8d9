use landing_guidance::gnc::ProfileInputs;
use landing_guidance::sim::{self, presets};
use landing_guidance::types::GuidanceConfig;
use landing_guidance::GuidanceError;

/// A conservative linear profile: descend at one tenth of the remaining
/// height per second, never slower than the touchdown speed.
fn linear_profile(inputs: &ProfileInputs) -> Result<impl Fn(f64) -> f64, GuidanceError> {
    let final_speed = inputs.final_speed;
    Ok(move |remaining: f64| (-remaining / 10.0).min(final_speed))
}

fn main() {
    let scenario = presets::lunar_hopper();
    let config = GuidanceConfig { cycle_limit: Some(1_000_000), ..Default::default() };

    println!("Flying {} with a linear speed profile...", scenario.name);
    match sim::simulate_landing_with(&scenario, &config, linear_profile) {
        Ok(run) => {
            let vz = run.touchdown_velocity.map_or(0.0, |v| v.x);
            println!("Situation: {:?}", run.report.situation);
            println!("Touchdown vertical speed: {:.2} m/s", vz);
            println!("Flight time: {:.1} s", run.report.elapsed);
            println!("Propellant used: {:.1} kg", run.propellant_used);
        }
        Err(e) => eprintln!("landing failed: {e}"),
    }
}

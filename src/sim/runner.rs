use nalgebra::Vector3;

use crate::error::GuidanceError;
use crate::gnc::{LandingController, LandingReport, ProfileInputs, SpeedProfile, SuicideBurnProfile};
use crate::vehicle::config::GuidanceConfig;
use crate::vehicle::engine::ThrustModel;
use crate::vessel::Vessel;
use super::scenario::Scenario;
use super::vessel::{SimSample, SimVessel};

/// Everything recorded from one simulated landing.
#[derive(Debug, Clone)]
pub struct LandingRun {
    pub scenario: String,
    pub report: LandingReport,
    pub trajectory: Vec<SimSample>,
    pub touchdown_velocity: Option<Vector3<f64>>,
    pub propellant_used: f64,
    pub target_distance: Option<f64>,
}

// ---------------------------------------------------------------------------
// Full landing simulation
// ---------------------------------------------------------------------------

/// Fly a scenario with a custom speed profile.
pub fn simulate_landing_with<P, F>(
    scenario: &Scenario,
    config: &GuidanceConfig,
    build_profile: F,
) -> Result<LandingRun, GuidanceError>
where
    P: SpeedProfile,
    F: FnOnce(&ProfileInputs) -> Result<P, GuidanceError>,
{
    let vessel = SimVessel::from_scenario(scenario);
    let initial_propellant = vessel.propellant_remaining();
    // thrust is fixed once, before the loop starts
    let thrust = ThrustModel::from_engines(&vessel.engines());

    let mut controller = LandingController::new(vessel, scenario.body.clone(), thrust, config.clone())?;
    let report = controller.run_with(build_profile)?;
    let vessel = controller.into_vessel();

    log::info!(
        "{}: {:?} after {:.1} s, {} cycles",
        scenario.name,
        report.situation,
        report.elapsed,
        report.cycles
    );

    Ok(LandingRun {
        scenario: scenario.name.clone(),
        report,
        touchdown_velocity: vessel.touchdown_velocity(),
        propellant_used: initial_propellant - vessel.propellant_remaining(),
        target_distance: vessel.target_distance(),
        trajectory: vessel.trajectory().to_vec(),
    })
}

/// Fly a scenario with the built-in suicide-burn profile (convenience wrapper).
pub fn simulate_landing(scenario: &Scenario, config: &GuidanceConfig) -> Result<LandingRun, GuidanceError> {
    simulate_landing_with(scenario, config, SuicideBurnProfile::new)
}

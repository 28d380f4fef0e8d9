use std::io::{self, Write};

use serde::Serialize;

use crate::gnc::event::{first_time, EventKind};
use crate::sim::runner::LandingRun;

/// Summary statistics of one simulated landing.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub scenario: String,
    pub vessel: String,
    pub situation: String,
    pub flight_time: f64,
    pub cycles: u64,
    pub touchdown_vertical_speed: Option<f64>,
    pub touchdown_horizontal_speed: Option<f64>,
    pub max_speed: f64,
    pub propellant_used: f64,
    pub target_distance: Option<f64>,
    pub burn_start_time: Option<f64>,
    pub gear_time: Option<f64>,
    pub final_burn_time: Option<f64>,
    pub sas_fallback: bool,
}

impl FlightSummary {
    pub fn from_run(run: &LandingRun) -> Self {
        let events = &run.report.events;
        let max_speed = run
            .trajectory
            .iter()
            .map(|s| s.vertical_speed.hypot(s.horizontal_speed))
            .fold(0.0_f64, f64::max);

        FlightSummary {
            scenario: run.scenario.clone(),
            vessel: run.report.vessel.clone(),
            situation: format!("{:?}", run.report.situation),
            flight_time: run.report.elapsed,
            cycles: run.report.cycles,
            touchdown_vertical_speed: run.touchdown_velocity.map(|v| v.x),
            touchdown_horizontal_speed: run.touchdown_velocity.map(|v| v.y.hypot(v.z)),
            max_speed,
            propellant_used: run.propellant_used,
            target_distance: run.target_distance,
            burn_start_time: first_time(events, EventKind::BurnStarted),
            gear_time: first_time(events, EventKind::GearDeployed),
            final_burn_time: first_time(events, EventKind::FinalBurn),
            sas_fallback: first_time(events, EventKind::SasFallback).is_some(),
        }
    }
}

/// Write flight summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: &mut W, summary: &FlightSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)
}

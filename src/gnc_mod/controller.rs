use std::time::Duration;

use nalgebra::Vector3;

use crate::dynamics::state::{Situation, VehicleState};
use crate::error::GuidanceError;
use crate::physics::ballistics::time_to_impact;
use crate::physics::geometry::Frame;
use crate::physics::gravity::BodyModel;
use crate::vehicle::config::GuidanceConfig;
use crate::vehicle::engine::{vehicle_radius, ThrustModel};
use crate::vessel::{SasMode, Vessel};
use super::attitude::AttitudePolicy;
use super::event::{EventKind, GuidanceEvent};
use super::phase::{Phase, PhaseState};
use super::profile::{ProfileInputs, SpeedProfile, SuicideBurnProfile};
use super::throttle::{saturate, ThrottleLaw};

/// Relative mismatch allowed between the vessel's gravity reading and the body model.
const GRAVITY_TOLERANCE: f64 = 0.01;

/// Result of a single descent cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Continue,
    Touchdown,
}

/// Summary handed back once the vehicle has been safed.
#[derive(Debug, Clone)]
pub struct LandingReport {
    pub vessel: String,
    pub situation: Situation,
    pub cycles: u64,
    pub elapsed: f64,
    pub gear_deployed: bool,
    pub final_burn: bool,
    pub burn_started: bool,
    pub events: Vec<GuidanceEvent>,
}

// ---------------------------------------------------------------------------
// Landing controller: wait -> descent -> final burn -> landed -> safed
// ---------------------------------------------------------------------------

pub struct LandingController<V: Vessel> {
    vessel: V,
    body: BodyModel,
    thrust: ThrustModel,
    config: GuidanceConfig,
    throttle_law: ThrottleLaw,
    attitude: AttitudePolicy,
    state: PhaseState,
    events: Vec<GuidanceEvent>,
    cycles: u64,
    elapsed: f64,
    last_throttle: f64,
}

impl<V: Vessel> LandingController<V> {
    /// Fails with [`GuidanceError::NoTarget`] before touching any actuator
    /// when the vessel has no rendezvous target selected.
    pub fn new(
        vessel: V,
        body: BodyModel,
        thrust: ThrustModel,
        config: GuidanceConfig,
    ) -> Result<Self, GuidanceError> {
        config.validate()?;
        if !body.is_valid() {
            return Err(GuidanceError::InvalidSetup(format!(
                "surface gravity of {} must be positive",
                body.name
            )));
        }
        let sensed = vessel.surface_gravity();
        if !((sensed - body.surface_gravity).abs() <= GRAVITY_TOLERANCE * body.surface_gravity) {
            return Err(GuidanceError::InvalidSetup(format!(
                "vessel reports {sensed:.3} m/s^2 but {} is modelled at {:.3} m/s^2",
                body.name, body.surface_gravity
            )));
        }
        if vessel.target_position().is_none() {
            return Err(GuidanceError::NoTarget);
        }

        Ok(Self {
            throttle_law: ThrottleLaw::new(thrust, &body),
            attitude: AttitudePolicy::from_config(&config),
            vessel,
            body,
            thrust,
            config,
            state: PhaseState::new(),
            events: Vec::new(),
            cycles: 0,
            elapsed: 0.0,
            last_throttle: 0.0,
        })
    }

    pub fn phase_state(&self) -> &PhaseState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn events(&self) -> &[GuidanceEvent] {
        &self.events
    }

    pub fn last_throttle(&self) -> f64 {
        self.last_throttle
    }

    pub fn vessel(&self) -> &V {
        &self.vessel
    }

    pub fn vessel_mut(&mut self) -> &mut V {
        &mut self.vessel
    }

    pub fn into_vessel(self) -> V {
        self.vessel
    }

    /// Run the whole landing with the built-in suicide-burn profile.
    pub fn run(&mut self) -> Result<LandingReport, GuidanceError> {
        self.run_with(SuicideBurnProfile::new)
    }

    /// Run the whole landing, building the reference profile from the vehicle
    /// as it is when the wait phase ends.
    pub fn run_with<P, F>(&mut self, build_profile: F) -> Result<LandingReport, GuidanceError>
    where
        P: SpeedProfile,
        F: FnOnce(&ProfileInputs) -> Result<P, GuidanceError>,
    {
        self.initialize();

        if self.wait_for_descent()? == CycleOutcome::Continue {
            let inputs = self.profile_inputs();
            let profile = build_profile(&inputs)?;
            loop {
                self.pause(self.config.cycle_period());
                self.count_cycle()?;
                if self.step(&profile)? == CycleOutcome::Touchdown {
                    break;
                }
            }
        }

        self.safe_vehicle()?;
        Ok(self.report())
    }

    /// Put the vessel in its descent configuration.
    pub fn initialize(&mut self) {
        self.vessel.set_throttle(0.0);
        self.last_throttle = 0.0;
        self.vessel.set_brakes(true);
        self.vessel.set_rcs(true);
        self.vessel.engage_autopilot();
        self.vessel.set_autopilot_roll(self.config.target_roll);
        self.vessel.set_autopilot_reference_frame(Frame::Body);
        log::info!(
            "{}: guidance armed, {:.0} N effective thrust on {}",
            self.vessel.name(),
            self.thrust.effective_thrust,
            self.body.name
        );
    }

    /// Hold retrograde until falling below the wait altitude.
    pub fn wait_for_descent(&mut self) -> Result<CycleOutcome, GuidanceError> {
        loop {
            let s = VehicleState::capture(&self.vessel);
            if s.situation.is_down() {
                self.touchdown(&s)?;
                return Ok(CycleOutcome::Touchdown);
            }
            if s.vertical_speed <= 0.0 && s.altitude() <= self.config.wait_altitude {
                self.enter_descent(&s)?;
                return Ok(CycleOutcome::Continue);
            }
            self.aim(&s);
            self.pause(self.config.cycle_period());
            self.count_cycle()?;
        }
    }

    /// One descent cycle: read telemetry, aim, then command throttle.
    pub fn step(&mut self, profile: &dyn SpeedProfile) -> Result<CycleOutcome, GuidanceError> {
        let s = VehicleState::capture(&self.vessel);

        if s.situation.is_down() {
            self.touchdown(&s)?;
            return Ok(CycleOutcome::Touchdown);
        }
        if self.state.phase() == Phase::Wait {
            self.enter_descent(&s)?;
        }

        self.aim(&s);

        let throttle = if s.vertical_speed < 0.0 && s.pitch > 0.0 {
            if self.state.phase() == Phase::FinalBurn {
                self.final_burn_throttle(&s)
            } else {
                self.descent_throttle(&s, profile)?
            }
        } else {
            0.0
        };

        self.vessel.set_throttle(throttle);
        self.last_throttle = throttle;
        Ok(CycleOutcome::Continue)
    }

    fn descent_throttle(&mut self, s: &VehicleState, profile: &dyn SpeedProfile) -> Result<f64, GuidanceError> {
        let alt = s.altitude();

        if alt <= self.config.final_burn_altitude() {
            if self.state.advance(Phase::FinalBurn)? {
                log::info!("final burn at {alt:.1} m, {:.1} m/s", s.vertical_speed);
                self.emit(EventKind::FinalBurn, alt);
            }
        } else {
            match time_to_impact(self.body.gear_estimate_deceleration(), s.vertical_speed, alt) {
                Ok(t) if t <= self.config.gears_delay => self.deploy_gear(alt),
                Ok(_) => {}
                Err(e) => log::trace!("gear estimate skipped: {e}"),
            }
        }

        let target_speed = profile.get_speed(alt - self.config.hover_altitude);
        let delta_speed = target_speed + s.ground_speed;
        let raw = self.throttle_law.compute(delta_speed, s.pitch, self.config.descent_gain, s.mass);

        if raw > 0.0 {
            if self.state.start_burn() {
                log::info!("braking burn started at {alt:.0} m");
                self.emit(EventKind::BurnStarted, alt);
            }
            if self.state.engage_target_tracking() {
                self.emit(EventKind::TargetTrackingEngaged, alt);
            }
        }

        let throttle = saturate(raw);
        log::debug!(
            "alt {alt:.1} m  vs {:.1}  target {target_speed:.1}  throttle {throttle:.3}",
            s.vertical_speed
        );
        Ok(throttle)
    }

    fn final_burn_throttle(&mut self, s: &VehicleState) -> f64 {
        // gear is forced down on every final-burn cycle
        self.deploy_gear(s.altitude());
        let raw = self.throttle_law.compute(
            self.config.final_speed - s.vertical_speed,
            s.pitch,
            self.config.final_gain,
            s.mass,
        );
        saturate(raw)
    }

    fn deploy_gear(&mut self, alt: f64) {
        self.vessel.set_gear(true);
        if self.state.deploy_gear() {
            log::info!("gear down at {alt:.1} m");
            self.emit(EventKind::GearDeployed, alt);
        }
    }

    fn enter_descent(&mut self, s: &VehicleState) -> Result<(), GuidanceError> {
        if self.state.advance(Phase::Descent)? {
            log::info!("descent guidance active at {:.0} m", s.altitude());
            self.emit(EventKind::DescentStarted, s.altitude());
        }
        Ok(())
    }

    fn touchdown(&mut self, s: &VehicleState) -> Result<(), GuidanceError> {
        self.vessel.set_throttle(0.0);
        self.last_throttle = 0.0;
        self.vessel.set_brakes(false);
        self.state.advance(Phase::Landed)?;
        log::info!("{} landed ({:?})", self.vessel.name(), s.situation);
        self.emit(EventKind::Touchdown(s.situation), s.altitude());
        Ok(())
    }

    /// Hand attitude back to SAS. Falls back to an RCS hold along local up
    /// when radial SAS is not available.
    pub fn safe_vehicle(&mut self) -> Result<(), GuidanceError> {
        self.vessel.disengage_autopilot();
        self.vessel.set_sas(true);
        self.pause(self.config.settle_period());

        if let Err(e) = self.vessel.set_sas_mode(SasMode::Radial) {
            log::info!("{e}; holding local up on RCS for {:.1} s", self.config.rcs_hold_s);
            self.emit(EventKind::SasFallback, 0.0);
            self.vessel.engage_autopilot();
            let up = self.vessel.transform_direction(&Vector3::x(), Frame::Surface, Frame::Body);
            self.vessel.set_autopilot_direction(up);
            self.vessel.set_rcs(true);
            self.pause(self.config.rcs_hold());
            self.vessel.set_rcs(false);
            self.vessel.disengage_autopilot();
        }

        self.state.advance(Phase::Safed)?;
        self.emit(EventKind::Safed, 0.0);
        Ok(())
    }

    fn aim(&mut self, s: &VehicleState) {
        let dir = self.attitude.direction(s, &self.state);
        let body_dir = self.vessel.transform_direction(&dir, Frame::Surface, Frame::Body);
        self.vessel.set_autopilot_direction(body_dir);
    }

    fn profile_inputs(&self) -> ProfileInputs {
        let s = VehicleState::capture(&self.vessel);
        ProfileInputs {
            radius: vehicle_radius(&self.vessel.fuel_tank_widths()),
            mass: s.mass,
            thrust: self.thrust.derated(self.config.eng_threshold),
            altitude: s.altitude(),
            final_speed: self.config.final_speed,
            body: self.body.clone(),
        }
    }

    fn pause(&mut self, period: Duration) {
        self.vessel.sleep(period);
        self.elapsed += period.as_secs_f64();
    }

    fn count_cycle(&mut self) -> Result<(), GuidanceError> {
        self.cycles += 1;
        if let Some(limit) = self.config.cycle_limit {
            if self.cycles > limit {
                self.vessel.set_throttle(0.0);
                self.last_throttle = 0.0;
                return Err(GuidanceError::CycleLimit(limit));
            }
        }
        Ok(())
    }

    fn emit(&mut self, kind: EventKind, altitude: f64) {
        self.events.push(GuidanceEvent { time: self.elapsed, altitude, kind });
    }

    fn report(&self) -> LandingReport {
        let situation = self
            .events
            .iter()
            .find_map(|e| match e.kind {
                EventKind::Touchdown(s) => Some(s),
                _ => None,
            })
            .unwrap_or(Situation::Other);
        LandingReport {
            vessel: self.vessel.name().to_owned(),
            situation,
            cycles: self.cycles,
            elapsed: self.elapsed,
            gear_deployed: self.state.gear_deployed(),
            final_burn: self.state.final_burn(),
            burn_started: self.state.burn_started(),
            events: self.events.clone(),
        }
    }
}

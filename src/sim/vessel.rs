use std::time::Duration;

use nalgebra::{UnitQuaternion, Vector3};

use crate::dynamics::state::Situation;
use crate::physics::aerodynamics::{drag_force, frontal_area, CD_TAIL_FIRST};
use crate::physics::geometry::{horizontal_norm, pitch_of, Frame, FrameRotation};
use crate::physics::gravity::{BodyModel, G0};
use crate::vehicle::engine::{vehicle_radius, EngineMount, ThrustModel};
use crate::vessel::{ActuatorError, SasMode, Vessel};
use super::integrator::{rk4_step, Deriv, PointMass};
use super::scenario::Scenario;

/// One telemetry sample, recorded at the end of every `sleep`.
#[derive(Debug, Clone, Copy)]
pub struct SimSample {
    pub time: f64,
    pub altitude: f64,
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub throttle: f64,
    pub pitch: f64,
    pub mass: f64,
    pub gear: bool,
    pub target_distance: Option<f64>,
}

// ---------------------------------------------------------------------------
// Simulated vessel: point mass over flat terrain
// ---------------------------------------------------------------------------

/// In-process vessel implementing [`Vessel`]. Time only advances in `sleep`,
/// so a control loop driving it runs deterministically and as fast as the CPU allows.
pub struct SimVessel {
    name: String,
    body: BodyModel,
    rotation: FrameRotation,
    state: PointMass,
    time: f64,
    dt: f64,

    dry_mass: f64,
    engines: Vec<EngineMount>,
    thrust: f64,
    isp: f64,
    tank_widths: Vec<f64>,
    drag_area: f64,
    lowest_point_offset: f64,
    slew_rate: f64, // rad/s

    pointing: Vector3<f64>, // unit, surface frame
    situation: Situation,
    water: bool,
    target_site: Option<Vector3<f64>>,
    radial_sas: bool,

    throttle: f64,
    gear: bool,
    brakes: bool,
    rcs: bool,
    sas: bool,
    sas_mode: SasMode,
    autopilot: bool,
    ap_frame: Frame,
    ap_roll: f64,
    ap_direction: Option<Vector3<f64>>,

    touchdown_velocity: Option<Vector3<f64>>,
    trajectory: Vec<SimSample>,
}

impl SimVessel {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let v = &scenario.vehicle;
        let thrust = ThrustModel::from_engines(&v.engines).effective_thrust;
        let active: Vec<&EngineMount> = v.engines.iter().filter(|e| e.active).collect();
        // thrust-weighted Isp of the active engines
        let isp = if thrust > 0.0 {
            active.iter().map(|e| e.available_thrust * e.axial_component * e.isp).sum::<f64>() / thrust
        } else {
            0.0
        };
        let pointing = (-scenario.velocity).try_normalize(1e-9).unwrap_or_else(Vector3::x);

        let mut vessel = Self {
            name: v.name.clone(),
            body: scenario.body.clone(),
            rotation: FrameRotation::at_site(scenario.site.0, scenario.site.1),
            state: PointMass {
                pos: Vector3::new(scenario.altitude, 0.0, 0.0),
                vel: scenario.velocity,
                mass: v.total_mass(),
            },
            time: 0.0,
            dt: scenario.dt.max(1e-4),
            dry_mass: v.dry_mass,
            engines: v.engines.clone(),
            thrust,
            isp,
            tank_widths: v.tank_widths.clone(),
            drag_area: frontal_area(vehicle_radius(&v.tank_widths)),
            lowest_point_offset: v.lowest_point_offset,
            slew_rate: v.slew_rate.to_radians(),
            pointing,
            situation: Situation::Flying,
            water: scenario.water,
            target_site: scenario.target_position(),
            radial_sas: scenario.radial_sas,
            throttle: 0.0,
            gear: false,
            brakes: false,
            rcs: false,
            sas: false,
            sas_mode: SasMode::StabilityAssist,
            autopilot: false,
            ap_frame: Frame::Body,
            ap_roll: 0.0,
            ap_direction: None,
            touchdown_velocity: None,
            trajectory: Vec::new(),
        };
        vessel.check_contact();
        vessel.record();
        vessel
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn trajectory(&self) -> &[SimSample] {
        &self.trajectory
    }

    pub fn touchdown_velocity(&self) -> Option<Vector3<f64>> {
        self.touchdown_velocity
    }

    pub fn propellant_remaining(&self) -> f64 {
        (self.state.mass - self.dry_mass).max(0.0)
    }

    pub fn position(&self) -> Vector3<f64> {
        self.state.pos
    }

    pub fn gear_deployed(&self) -> bool {
        self.gear
    }

    pub fn brakes(&self) -> bool {
        self.brakes
    }

    pub fn rcs(&self) -> bool {
        self.rcs
    }

    pub fn sas(&self) -> (bool, SasMode) {
        (self.sas, self.sas_mode)
    }

    pub fn autopilot_engaged(&self) -> bool {
        self.autopilot
    }

    pub fn autopilot_roll(&self) -> f64 {
        self.ap_roll
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Horizontal distance from the target, if one is set.
    pub fn target_distance(&self) -> Option<f64> {
        self.target_site.map(|t| horizontal_norm(&(t - self.state.pos)))
    }

    fn lowest_altitude(&self) -> f64 {
        self.state.pos.x + self.lowest_point_offset
    }

    /// Direction the attitude system is currently steering toward (surface frame).
    fn steering_goal(&self) -> Option<Vector3<f64>> {
        if self.autopilot {
            self.ap_direction.map(|d| match self.ap_frame {
                Frame::Body => self.rotation.transform(&d, Frame::Body, Frame::Surface),
                Frame::Surface => d,
            })
        } else if self.sas && self.sas_mode == SasMode::Radial {
            Some(Vector3::x())
        } else {
            None
        }
    }

    fn slew(&mut self, dt: f64) {
        let Some(goal) = self.steering_goal().and_then(|g| g.try_normalize(1e-9)) else {
            return;
        };
        let angle = self.pointing.angle(&goal);
        let max_step = self.slew_rate * dt;
        if angle <= max_step {
            self.pointing = goal;
            return;
        }
        let rot = UnitQuaternion::rotation_between(&self.pointing, &goal).unwrap_or_else(|| {
            // antiparallel: turn about any axis perpendicular to the pointing
            let axis = self.pointing.cross(&Vector3::y()).try_normalize(1e-9).unwrap_or_else(Vector3::z);
            UnitQuaternion::from_axis_angle(&nalgebra::Unit::new_unchecked(axis), angle)
        });
        self.pointing = (rot.powf(max_step / angle) * self.pointing).normalize();
    }

    fn integrate(&mut self, dt: f64) {
        let propellant = self.state.mass > self.dry_mass;
        let thrust = if propellant { self.thrust * self.throttle } else { 0.0 };
        let mdot = if thrust > 0.0 && self.isp > 0.0 { thrust / (self.isp * G0) } else { 0.0 };
        let dir = self.pointing;
        let g = self.body.surface_gravity;
        let body = &self.body;
        let (area, dry) = (self.drag_area, self.dry_mass);

        let next = rk4_step(
            &self.state,
            |s: &PointMass| {
                let mass = s.mass.max(dry);
                let drag = drag_force(&s.vel, body.density(s.pos.x), CD_TAIL_FIRST, area);
                Deriv {
                    dpos: s.vel,
                    dvel: dir * (thrust / mass) + Vector3::new(-g, 0.0, 0.0) + drag / mass,
                    dmass: -mdot,
                }
            },
            dt,
        );
        self.state = next;
        self.state.mass = self.state.mass.max(self.dry_mass);
    }

    fn check_contact(&mut self) {
        if self.situation.is_down() || self.lowest_altitude() > 0.0 {
            return;
        }
        self.touchdown_velocity = Some(self.state.vel);
        self.situation = if self.water { Situation::Splashed } else { Situation::Landed };
        self.state.pos.x = -self.lowest_point_offset;
        self.state.vel = Vector3::zeros();
        log::debug!("sim: contact at t={:.2}s", self.time);
    }

    fn record(&mut self) {
        let sample = SimSample {
            time: self.time,
            altitude: self.lowest_altitude().max(0.0),
            vertical_speed: self.state.vel.x,
            horizontal_speed: horizontal_norm(&self.state.vel),
            throttle: self.throttle,
            pitch: pitch_of(&self.pointing),
            mass: self.state.mass,
            gear: self.gear,
            target_distance: self.target_distance(),
        };
        self.trajectory.push(sample);
    }

    /// Advance the simulation by `period` seconds.
    pub fn advance(&mut self, period: f64) {
        let steps = (period / self.dt).ceil().max(1.0) as usize;
        let dt = period / steps as f64;
        for _ in 0..steps {
            self.slew(dt);
            if !self.situation.is_down() {
                self.integrate(dt);
                self.check_contact();
            }
            self.time += dt;
        }
        self.record();
    }
}

impl Vessel for SimVessel {
    fn name(&self) -> &str {
        &self.name
    }

    fn mass(&self) -> f64 {
        self.state.mass
    }

    fn velocity(&self) -> Vector3<f64> {
        self.rotation.transform(&self.state.vel, Frame::Surface, Frame::Body)
    }

    fn vertical_speed(&self) -> f64 {
        self.state.vel.x
    }

    fn speed(&self) -> f64 {
        self.state.vel.norm()
    }

    fn surface_altitude(&self) -> f64 {
        self.state.pos.x
    }

    fn pitch(&self) -> f64 {
        pitch_of(&self.pointing)
    }

    fn situation(&self) -> Situation {
        self.situation
    }

    fn lowest_point_offset(&self) -> f64 {
        self.lowest_point_offset
    }

    fn target_position(&self) -> Option<Vector3<f64>> {
        self.target_site.map(|t| t - self.state.pos)
    }

    fn surface_gravity(&self) -> f64 {
        self.body.surface_gravity
    }

    fn engines(&self) -> Vec<EngineMount> {
        self.engines.clone()
    }

    fn fuel_tank_widths(&self) -> Vec<f64> {
        self.tank_widths.clone()
    }

    fn transform_direction(&self, dir: &Vector3<f64>, from: Frame, to: Frame) -> Vector3<f64> {
        self.rotation.transform(dir, from, to)
    }

    fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle.clamp(0.0, 1.0);
    }

    fn set_gear(&mut self, deployed: bool) {
        self.gear = deployed;
    }

    fn set_brakes(&mut self, on: bool) {
        self.brakes = on;
    }

    fn set_rcs(&mut self, on: bool) {
        self.rcs = on;
    }

    fn set_sas(&mut self, on: bool) {
        self.sas = on;
    }

    fn set_sas_mode(&mut self, mode: SasMode) -> Result<(), ActuatorError> {
        if mode == SasMode::Radial && !self.radial_sas {
            return Err(ActuatorError::ModeUnavailable(mode));
        }
        self.sas_mode = mode;
        Ok(())
    }

    fn engage_autopilot(&mut self) {
        self.autopilot = true;
    }

    fn disengage_autopilot(&mut self) {
        self.autopilot = false;
    }

    fn set_autopilot_reference_frame(&mut self, frame: Frame) {
        self.ap_frame = frame;
    }

    fn set_autopilot_roll(&mut self, roll_deg: f64) {
        self.ap_roll = roll_deg;
    }

    fn set_autopilot_direction(&mut self, dir: Vector3<f64>) {
        self.ap_direction = Some(dir);
    }

    fn sleep(&mut self, period: Duration) {
        self.advance(period.as_secs_f64());
    }
}

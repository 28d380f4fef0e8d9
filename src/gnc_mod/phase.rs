use crate::error::GuidanceError;

// ---------------------------------------------------------------------------
// Landing phases
// ---------------------------------------------------------------------------

/// Exclusive phases, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Wait,
    Descent,
    FinalBurn,
    Landed,
    Safed,
}

impl Phase {
    fn can_advance_to(self, to: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, to),
            (Wait, Descent)
                | (Descent, FinalBurn)
                | (Wait | Descent | FinalBurn, Landed)
                | (Landed, Safed)
        )
    }
}

/// How the attitude policy picks its pointing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttitudeMode {
    /// Anti-velocity while falling, straight up otherwise.
    Retrograde,
    /// Forward-biased correction of prograde toward the target.
    TargetTracking,
}

/// Controller-owned state. Every flag here only ever goes false -> true, and
/// the phase only moves forward.
#[derive(Debug, Clone)]
pub struct PhaseState {
    phase: Phase,
    final_burn: bool,
    gear_deployed: bool,
    burn_started: bool,
    attitude_mode: AttitudeMode,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Wait,
            final_burn: false,
            gear_deployed: false,
            burn_started: false,
            attitude_mode: AttitudeMode::Retrograde,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once the final hover burn has been entered, including after touchdown.
    pub fn final_burn(&self) -> bool {
        self.final_burn
    }

    pub fn gear_deployed(&self) -> bool {
        self.gear_deployed
    }

    /// True once the descent loop has commanded positive thrust.
    pub fn burn_started(&self) -> bool {
        self.burn_started
    }

    pub fn attitude_mode(&self) -> AttitudeMode {
        self.attitude_mode
    }

    /// Move to `to`. Returns `Ok(false)` if already there.
    pub fn advance(&mut self, to: Phase) -> Result<bool, GuidanceError> {
        if self.phase == to {
            return Ok(false);
        }
        if !self.phase.can_advance_to(to) {
            return Err(GuidanceError::InvalidTransition { from: self.phase, to });
        }
        self.phase = to;
        if to == Phase::FinalBurn {
            self.final_burn = true;
        }
        Ok(true)
    }

    /// Returns true the first time only.
    pub fn deploy_gear(&mut self) -> bool {
        !std::mem::replace(&mut self.gear_deployed, true)
    }

    pub fn start_burn(&mut self) -> bool {
        !std::mem::replace(&mut self.burn_started, true)
    }

    pub fn engage_target_tracking(&mut self) -> bool {
        let changed = self.attitude_mode != AttitudeMode::TargetTracking;
        self.attitude_mode = AttitudeMode::TargetTracking;
        changed
    }
}

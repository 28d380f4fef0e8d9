use crate::dynamics::state::Situation;

// ---------------------------------------------------------------------------
// Guidance events
// ---------------------------------------------------------------------------

/// Kinds of one-shot events emitted by the landing controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    DescentStarted,
    BurnStarted,
    TargetTrackingEngaged,
    GearDeployed,
    FinalBurn,
    Touchdown(Situation),
    SasFallback,
    Safed,
}

/// An event with the controller's elapsed loop time (s) when it fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceEvent {
    pub time: f64,
    pub altitude: f64,
    pub kind: EventKind,
}

/// Time of the first event of `kind`, if any.
pub fn first_time(events: &[GuidanceEvent], kind: EventKind) -> Option<f64> {
    events.iter().find(|e| e.kind == kind).map(|e| e.time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_matching_event() {
        let events = [
            GuidanceEvent { time: 1.0, altitude: 900.0, kind: EventKind::DescentStarted },
            GuidanceEvent { time: 2.5, altitude: 40.0, kind: EventKind::GearDeployed },
            GuidanceEvent { time: 3.0, altitude: 0.0, kind: EventKind::Touchdown(Situation::Landed) },
        ];
        assert_eq!(first_time(&events, EventKind::GearDeployed), Some(2.5));
        assert_eq!(first_time(&events, EventKind::Touchdown(Situation::Landed)), Some(3.0));
        assert_eq!(first_time(&events, EventKind::SasFallback), None);
    }
}

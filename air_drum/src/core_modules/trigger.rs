// THEORY:
// The `trigger` module adds memory to the otherwise stateless per-frame analysis.
// A stick resting inside a pad is seen on every frame; without memory every one
// of those frames would fire the sample again. The `TriggerLatch` keeps one lock
// per pad so a sound fires only on the frame an object *enters* the pad.
//
// Per-pad lifecycle:
//     Idle   + hit     -> emit trigger, Locked
//     Locked + hit     -> nothing,      Locked
//     any    + not hit -> nothing,      Idle
//
// Consequences:
// - Exactly one trigger per unbroken run of hit frames, however long the run.
// - Leaving the pad for a single frame re-arms it.
// - Pads are fully independent of each other.

use crate::core_modules::hit_resolver::HitState;
use crate::core_modules::zone::ZoneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatchState {
    #[default]
    Idle,
    Locked,
}

/// The per-pad debounce table, indexed by `ZoneId`. Survives across frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerLatch {
    states: Vec<LatchState>,
}

impl TriggerLatch {
    pub fn new(zone_count: usize) -> Self {
        Self {
            states: vec![LatchState::Idle; zone_count],
        }
    }

    /// Advances every pad by one frame and returns the pads that fired, in
    /// registry order.
    pub fn update(&mut self, hits: &HitState) -> Vec<ZoneId> {
        debug_assert_eq!(hits.len(), self.states.len());
        let mut fired = Vec::new();

        for (index, state) in self.states.iter_mut().enumerate() {
            let id = ZoneId(index);
            *state = match (*state, hits.is_hit(id)) {
                (LatchState::Idle, true) => {
                    fired.push(id);
                    LatchState::Locked
                }
                (LatchState::Locked, true) => LatchState::Locked,
                (_, false) => LatchState::Idle,
            };
        }

        fired
    }

    pub fn state(&self, id: ZoneId) -> LatchState {
        self.states[id.index()]
    }

    /// True while the pad is inside an unbroken run of hits; drives the struck tint.
    pub fn is_locked(&self, id: ZoneId) -> bool {
        self.state(id) == LatchState::Locked
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wander system that picks NPC directions and proposes NPC steps.
//!
//! The system keeps one [`WanderState`] per NPC. An NPC with steps remaining
//! keeps walking in its committed direction; once the counter drops to zero
//! or below it draws a new direction and dwell from the injected
//! [`WanderSource`].

use std::collections::BTreeMap;

use chaser_core::{Command, Direction, DwellRange, Event, NpcId, NpcView, WanderPolicy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the random choices made while wandering.
pub trait WanderSource {
    /// Draws one of the four cardinal directions uniformly.
    fn direction(&mut self) -> Direction;

    /// Draws a dwell length uniformly from `range`, bounds inclusive.
    fn dwell(&mut self, range: DwellRange) -> u32;
}

/// Production random source backed by a seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a source whose draws are fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl WanderSource for SeededSource {
    fn direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }

    fn dwell(&mut self, range: DwellRange) -> u32 {
        let low = range.min();
        let high = range.max().max(low);
        self.rng.gen_range(low..=high)
    }
}

/// Wander bookkeeping tracked for a single NPC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WanderState {
    /// Direction the NPC currently walks in.
    pub direction: Direction,
    /// Updates left before a new direction is drawn; the NPC is deciding
    /// whenever this is zero or negative.
    pub steps_remaining: i64,
}

impl WanderState {
    /// State every NPC starts in: deciding, so the first update draws.
    pub const DECIDING: Self = Self {
        direction: Direction::Up,
        steps_remaining: 0,
    };

    /// Reports whether the next update draws a new direction.
    #[must_use]
    pub const fn is_deciding(&self) -> bool {
        self.steps_remaining <= 0
    }
}

impl Default for WanderState {
    fn default() -> Self {
        Self::DECIDING
    }
}

/// Pure system that emits one step command per NPC on every NPC update.
#[derive(Debug)]
pub struct Wander<S = SeededSource> {
    policy: WanderPolicy,
    source: S,
    states: BTreeMap<NpcId, WanderState>,
}

impl<S: WanderSource> Wander<S> {
    /// Creates a wander system following `policy` and drawing from `source`.
    #[must_use]
    pub fn new(policy: WanderPolicy, source: S) -> Self {
        Self {
            policy,
            source,
            states: BTreeMap::new(),
        }
    }

    /// Consumes world events and the NPC view to emit step commands.
    ///
    /// Every `TimeAdvanced` event that schedules NPCs triggers one update of
    /// every NPC in identifier order. The dwell counter is decremented after
    /// the step is proposed, whether or not the world accepts it.
    pub fn handle(&mut self, events: &[Event], npcs: &NpcView, out: &mut Vec<Command>) {
        let updates = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { npcs_due: true, .. }))
            .count();

        for _ in 0..updates {
            for snapshot in npcs.iter() {
                let direction = self.advance(snapshot.id);
                out.push(Command::StepNpc {
                    npc: snapshot.id,
                    direction,
                });
            }
        }
    }

    /// Current wander state of the provided NPC, if it has been updated.
    #[must_use]
    pub fn state(&self, npc: NpcId) -> Option<WanderState> {
        self.states.get(&npc).copied()
    }

    fn advance(&mut self, npc: NpcId) -> Direction {
        let state = self.states.entry(npc).or_default();

        match self.policy {
            WanderPolicy::Committed { dwell } => {
                if state.is_deciding() {
                    state.direction = self.source.direction();
                    state.steps_remaining = i64::from(self.source.dwell(dwell));
                }
                let direction = state.direction;
                state.steps_remaining -= 1;
                direction
            }
            WanderPolicy::EveryMove => {
                state.direction = self.source.direction();
                state.direction
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_source_is_reproducible() {
        let mut first = SeededSource::new(17);
        let mut second = SeededSource::new(17);
        let range = DwellRange::new(100, 1099);

        for _ in 0..64 {
            assert_eq!(first.direction(), second.direction());
            assert_eq!(first.dwell(range), second.dwell(range));
        }
    }

    #[test]
    fn seeded_dwell_stays_inside_range() {
        let mut source = SeededSource::new(5);
        let range = DwellRange::new(100, 1099);

        for _ in 0..512 {
            let dwell = source.dwell(range);
            assert!((100..=1099).contains(&dwell), "dwell {dwell} out of range");
        }
        assert_eq!(source.dwell(DwellRange::new(7, 7)), 7);
    }

    #[test]
    fn seeded_directions_cover_all_cardinals() {
        let mut source = SeededSource::new(11);
        let drawn: Vec<Direction> = (0..256).map(|_| source.direction()).collect();

        for direction in Direction::ALL {
            assert!(drawn.contains(&direction), "{direction:?} never drawn");
        }
    }

    #[test]
    fn default_state_is_deciding() {
        assert!(WanderState::default().is_deciding());
        assert!(!WanderState {
            direction: Direction::Left,
            steps_remaining: 1,
        }
        .is_deciding());
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game loop that drives the world and its systems one tick at a time.
//!
//! Each call to [`Simulation::step`] runs a full tick: a quit request ends
//! the game before anything moves, then the player moves, then the NPCs are
//! stepped when the tick schedules them, and finally the player is checked
//! against every NPC.

use chaser_core::{Command, Direction, Event, GameState, HeldKeys, Layout, Rules, RulesError};
use chaser_system_collision::CollisionDetector;
use chaser_system_spawning::Spawning;
use chaser_system_wander::{SeededSource, Wander, WanderSource};
use chaser_world::{self as world, query, World};
use tracing::{info, trace};

const WANDER_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Input gathered for a single tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    /// The window asked the game to close.
    pub quit: bool,
    /// Direction keys held down during the tick.
    pub held: HeldKeys,
    /// Direction keys pressed since the previous tick, in arrival order.
    pub pressed: Vec<Direction>,
}

/// Owns the world together with the systems reacting to it.
#[derive(Debug)]
pub struct Simulation<S = SeededSource> {
    world: World,
    wander: Wander<S>,
    collision: CollisionDetector,
    last_events: Vec<Event>,
}

impl Simulation<SeededSource> {
    /// Creates a simulation whose layout and wandering derive from `seed`.
    pub fn new(rules: Rules, seed: u64) -> Result<Self, RulesError> {
        let layout = Spawning::new(seed).layout(&rules);
        Self::with_layout(rules, layout, SeededSource::new(seed ^ WANDER_STREAM))
    }
}

impl<S: WanderSource> Simulation<S> {
    /// Creates a simulation from an explicit layout and wander source.
    pub fn with_layout(rules: Rules, layout: Layout, source: S) -> Result<Self, RulesError> {
        let wander = Wander::new(rules.wander_policy(), source);
        let world = World::new(rules, layout)?;

        Ok(Self {
            world,
            wander,
            collision: CollisionDetector,
            last_events: Vec::new(),
        })
    }

    /// Advances the game by one tick and reports the resulting state.
    ///
    /// Once the game has ended further calls leave the world untouched.
    pub fn step(&mut self, input: &TickInput) -> GameState {
        self.last_events.clear();
        if self.state().is_ended() {
            return self.state();
        }

        let mut events = Vec::new();
        if input.quit {
            world::apply(&mut self.world, Command::Quit, &mut events);
            return self.finish(events);
        }

        for direction in &input.pressed {
            world::apply(
                &mut self.world,
                Command::StepPlayer {
                    direction: *direction,
                },
                &mut events,
            );
        }
        world::apply(
            &mut self.world,
            Command::Tick { held: input.held },
            &mut events,
        );

        let mut commands = Vec::new();
        self.wander
            .handle(&events, &query::npc_view(&self.world), &mut commands);
        for command in commands.drain(..) {
            if let Command::StepNpc { npc, direction } = &command {
                trace!(npc = npc.get(), ?direction, "npc step");
            }
            world::apply(&mut self.world, command, &mut events);
        }

        let rules = query::rules(&self.world);
        self.collision.handle(
            &events,
            rules.collision_rule(),
            rules.size(),
            query::player_position(&self.world),
            &query::npc_view(&self.world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        self.finish(events)
    }

    /// Current lifecycle state of the game.
    #[must_use]
    pub fn state(&self) -> GameState {
        query::game_state(&self.world)
    }

    /// Read-only access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Events produced by the most recent call to [`Simulation::step`].
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.last_events
    }

    fn finish(&mut self, events: Vec<Event>) -> GameState {
        for event in &events {
            if let Event::GameEnded { reason } = event {
                info!(?reason, tick = query::tick_index(&self.world), "game ended");
            }
        }
        self.last_events = events;
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_holds_nothing() {
        let input = TickInput::default();

        assert!(!input.quit);
        assert!(input.held.is_empty());
        assert!(input.pressed.is_empty());
    }

    #[test]
    fn seeded_simulation_spawns_configured_npcs() {
        let simulation = Simulation::new(Rules::discrete(), 1).expect("preset rules are valid");

        assert_eq!(query::npc_view(simulation.world()).len(), 4);
        assert_eq!(simulation.state(), GameState::Running);
        assert!(simulation.last_events().is_empty());
    }
}

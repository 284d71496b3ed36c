#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Chaser.

mod entity;

use chaser_core::{
    Bounds, Command, EndReason, Event, GameState, Layout, NpcId, Position, Rules, RulesError,
    Variant,
};

use self::entity::{Entity, Motion, MoveContext, Outcome};

/// Represents the authoritative Chaser world state.
#[derive(Debug)]
pub struct World {
    rules: Rules,
    bounds: Bounds,
    player: Entity,
    npcs: Vec<Entity>,
    state: GameState,
    tick_index: u64,
}

impl World {
    /// Creates a world populated with the entities described by `layout`.
    ///
    /// Every starting position is converted to the variant's coordinate
    /// representation and clamped inside the world, so the bounds invariant
    /// holds before the first tick.
    pub fn new(rules: Rules, layout: Layout) -> Result<Self, RulesError> {
        rules.validate()?;
        let bounds = rules.bounds();

        let player = Entity::Player {
            position: settle(layout.player, &rules, bounds),
        };
        let npcs = layout
            .npcs
            .into_iter()
            .enumerate()
            .map(|(index, position)| Entity::Npc {
                id: NpcId::new(index as u32),
                position: settle(position, &rules, bounds),
            })
            .collect();

        Ok(Self {
            rules,
            bounds,
            player,
            npcs,
            state: GameState::Running,
            tick_index: 0,
        })
    }

    /// Variant the world simulates.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.rules.variant
    }

    fn npc_index(&self, npc: NpcId) -> Option<usize> {
        self.npcs
            .iter()
            .position(|entity| entity.npc_id() == Some(npc))
    }

    fn move_player(&mut self, motion: Motion, out_events: &mut Vec<Event>) {
        let context = MoveContext {
            rules: &self.rules,
            bounds: self.bounds,
            npcs: &self.npcs,
        };

        match entity::resolve(&self.player, motion, &context) {
            Outcome::Moved { from, to } => {
                self.player.set_position(to);
                out_events.push(Event::PlayerMoved { from, to });
            }
            Outcome::Blocked { direction } => {
                out_events.push(Event::PlayerBlocked { direction });
            }
            Outcome::Unchanged => {}
        }
    }

    fn move_npc(&mut self, npc: NpcId, motion: Motion, out_events: &mut Vec<Event>) {
        let Some(index) = self.npc_index(npc) else {
            return;
        };

        let context = MoveContext {
            rules: &self.rules,
            bounds: self.bounds,
            npcs: &self.npcs,
        };

        match entity::resolve(&self.npcs[index], motion, &context) {
            Outcome::Moved { from, to } => {
                self.npcs[index].set_position(to);
                out_events.push(Event::NpcMoved { npc, from, to });
            }
            Outcome::Blocked { direction } => {
                out_events.push(Event::NpcBlocked { npc, direction });
            }
            Outcome::Unchanged => {}
        }
    }

    fn end(&mut self, reason: EndReason, out_events: &mut Vec<Event>) {
        self.state = GameState::Ended(reason);
        out_events.push(Event::GameEnded { reason });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the game has ended every command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.state.is_ended() {
        return;
    }

    match command {
        Command::Quit => world.end(EndReason::Quit, out_events),
        Command::StepPlayer { direction } => {
            world.move_player(Motion::Step(direction), out_events);
        }
        Command::Tick { held } => {
            world.move_player(Motion::Held(held), out_events);

            let tick = world.tick_index;
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick,
                npcs_due: world.rules.npcs_due(tick),
            });
        }
        Command::StepNpc { npc, direction } => {
            world.move_npc(npc, Motion::Step(direction), out_events);
        }
        Command::ReportCollision { npc } => {
            world.end(EndReason::Collision { npc }, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use chaser_core::{Bounds, GameState, NpcSnapshot, NpcView, Position, Rules};

    use super::World;

    /// Rules the world was created with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Rectangle every entity is confined to.
    #[must_use]
    pub fn bounds(world: &World) -> Bounds {
        world.bounds
    }

    /// Current lifecycle state of the game.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.state
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Current top-left corner of the player.
    #[must_use]
    pub fn player_position(world: &World) -> Position {
        world.player.position()
    }

    /// Captures a read-only view of the NPCs inhabiting the world.
    #[must_use]
    pub fn npc_view(world: &World) -> NpcView {
        NpcView::from_snapshots(
            world
                .npcs
                .iter()
                .filter_map(|entity| {
                    entity.npc_id().map(|id| NpcSnapshot {
                        id,
                        position: entity.position(),
                    })
                })
                .collect(),
        )
    }
}

fn settle(position: Position, rules: &Rules, bounds: Bounds) -> Position {
    match position.for_variant(rules.variant) {
        Position::Continuous(position) => {
            Position::Continuous(bounds.clamp(position, rules.size()))
        }
        Position::Grid(cell) => Position::Grid(bounds.clamp_cell(cell, rules.entity_size)),
    }
}

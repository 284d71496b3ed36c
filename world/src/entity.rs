//! Player and NPC variants together with the movement rules dispatched on them.

use chaser_core::{Bounds, Direction, HeldKeys, NpcId, Position, Rules};
use glam::IVec2;

/// Positioned actor living in the world.
#[derive(Clone, Debug)]
pub(crate) enum Entity {
    /// The entity steered by input.
    Player { position: Position },
    /// A wandering non-player character.
    Npc { id: NpcId, position: Position },
}

impl Entity {
    pub(crate) fn position(&self) -> Position {
        match self {
            Self::Player { position } | Self::Npc { position, .. } => *position,
        }
    }

    pub(crate) fn set_position(&mut self, destination: Position) {
        match self {
            Self::Player { position } | Self::Npc { position, .. } => *position = destination,
        }
    }

    pub(crate) fn npc_id(&self) -> Option<NpcId> {
        match self {
            Self::Player { .. } => None,
            Self::Npc { id, .. } => Some(*id),
        }
    }
}

/// Movement request handed to [`resolve`].
#[derive(Clone, Copy, Debug)]
pub(crate) enum Motion {
    /// Keys held down for the duration of a tick.
    Held(HeldKeys),
    /// A single discrete step.
    Step(Direction),
}

/// Result of resolving a movement request against the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Outcome {
    Moved { from: Position, to: Position },
    Blocked { direction: Direction },
    Unchanged,
}

/// Read-only state a movement request is resolved against.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MoveContext<'a> {
    pub(crate) rules: &'a Rules,
    pub(crate) bounds: Bounds,
    pub(crate) npcs: &'a [Entity],
}

/// Resolves where `entity` ends up after `motion` without mutating anything.
pub(crate) fn resolve(entity: &Entity, motion: Motion, context: &MoveContext<'_>) -> Outcome {
    let from = entity.position();
    let proposal = match entity {
        Entity::Player { .. } => player_destination(from, motion, context),
        Entity::Npc { id, .. } => npc_destination(*id, from, motion, context),
    };

    match proposal {
        Proposal::Destination(to) if to != from => Outcome::Moved { from, to },
        Proposal::Destination(_) | Proposal::Ignored => Outcome::Unchanged,
        Proposal::Refused(direction) => Outcome::Blocked { direction },
    }
}

enum Proposal {
    Destination(Position),
    Refused(Direction),
    Ignored,
}

fn player_destination(from: Position, motion: Motion, context: &MoveContext<'_>) -> Proposal {
    let rules = context.rules;
    match (from, motion) {
        (Position::Continuous(position), Motion::Held(held)) => {
            let mut next = position;
            for direction in held.iter() {
                next += direction.unit() * rules.player_speed;
            }
            Proposal::Destination(Position::Continuous(
                context.bounds.clamp(next, rules.size()),
            ))
        }
        (Position::Grid(cell), Motion::Step(direction)) => {
            let candidate = grid_step(cell, direction, rules.entity_size);
            if context.bounds.admits(candidate, rules.entity_size) {
                Proposal::Destination(Position::Grid(candidate))
            } else {
                Proposal::Refused(direction)
            }
        }
        (Position::Continuous(_), Motion::Step(_)) | (Position::Grid(_), Motion::Held(_)) => {
            Proposal::Ignored
        }
    }
}

fn npc_destination(
    id: NpcId,
    from: Position,
    motion: Motion,
    context: &MoveContext<'_>,
) -> Proposal {
    let rules = context.rules;
    let Motion::Step(direction) = motion else {
        return Proposal::Ignored;
    };

    match from {
        Position::Continuous(position) => {
            let next = position + direction.unit() * rules.npc_speed;
            Proposal::Destination(Position::Continuous(
                context.bounds.clamp(next, rules.size()),
            ))
        }
        Position::Grid(cell) => {
            let candidate = grid_step(cell, direction, rules.entity_size);
            if context.bounds.admits(candidate, rules.entity_size)
                && !blocked_by_neighbour(id, candidate, context)
            {
                Proposal::Destination(Position::Grid(candidate))
            } else {
                Proposal::Refused(direction)
            }
        }
    }
}

fn blocked_by_neighbour(mover: NpcId, candidate: IVec2, context: &MoveContext<'_>) -> bool {
    let rule = context.rules.collision_rule();
    let size = context.rules.size();
    let candidate = candidate.as_dvec2();
    context
        .npcs
        .iter()
        .filter(|other| other.npc_id() != Some(mover))
        .any(|other| rule.collides(candidate, other.position().as_dvec2(), size))
}

fn grid_step(cell: IVec2, direction: Direction, size: u32) -> IVec2 {
    let size = i32::try_from(size).unwrap_or(i32::MAX);
    let offset = direction.offset();
    IVec2::new(
        cell.x.saturating_add(offset.x.saturating_mul(size)),
        cell.y.saturating_add(offset.y.saturating_mul(size)),
    )
}

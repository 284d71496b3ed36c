#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Chaser engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod geometry;
mod rules;

pub use geometry::{centers_within, rectangles_overlap, Bounds, CollisionRule};
pub use rules::{DwellRange, Rules, RulesError, WanderPolicy};

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Chaser.";

/// Selects which of the two game prototypes drives the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Free top-down movement with held keys, committed wandering and
    /// rectangle-overlap collisions.
    Continuous,
    /// Grid movement with one step per key press, restless wandering and
    /// center-distance collisions.
    Discrete,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Reports that the windowing system asked the game to close.
    Quit,
    /// Requests a single grid step of the player, issued once per key press.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Advances the simulation by one tick using the keys currently held.
    Tick {
        /// Direction keys held down while the tick elapsed.
        held: HeldKeys,
    },
    /// Requests that an NPC advance a single step in the specified direction.
    StepNpc {
        /// Identifier of the NPC attempting to move.
        npc: NpcId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Reports that the player and an NPC overlap.
    ReportCollision {
        /// Identifier of the NPC touching the player.
        npc: NpcId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one tick.
    TimeAdvanced {
        /// Index of the tick that elapsed, counted from zero.
        tick: u64,
        /// Whether NPCs are scheduled to move during this tick.
        npcs_due: bool,
    },
    /// Confirms that the player changed position.
    PlayerMoved {
        /// Position occupied before the move.
        from: Position,
        /// Position occupied after the move.
        to: Position,
    },
    /// Reports that a player step was refused because it would leave the world.
    PlayerBlocked {
        /// Direction of the refused step.
        direction: Direction,
    },
    /// Confirms that an NPC changed position.
    NpcMoved {
        /// Identifier of the NPC that moved.
        npc: NpcId,
        /// Position occupied before the move.
        from: Position,
        /// Position occupied after the move.
        to: Position,
    },
    /// Reports that an NPC step was refused by the bounds or by another NPC.
    NpcBlocked {
        /// Identifier of the NPC that stayed put.
        npc: NpcId,
        /// Direction of the refused step.
        direction: Direction,
    },
    /// Announces that the game reached its terminal state.
    GameEnded {
        /// Why the game ended.
        reason: EndReason,
    },
}

/// Cardinal movement directions available to every entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing `y`.
    Up,
    /// Movement toward increasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

impl Direction {
    /// Every direction in the order random draws index into.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit grid offset travelled by a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> IVec2 {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }

    /// Unit vector pointing in this direction.
    #[must_use]
    pub fn unit(self) -> DVec2 {
        self.offset().as_dvec2()
    }
}

/// Set of direction keys held down during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldKeys(u8);

impl HeldKeys {
    /// A set with no keys held.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Returns a copy of the set with the provided direction held.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | Self::bit(direction))
    }

    /// Marks the provided direction as held.
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= Self::bit(direction);
    }

    /// Reports whether the provided direction is held.
    #[must_use]
    pub const fn contains(&self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    /// Reports whether no direction is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the held directions in [`Direction::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }

    const fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }
}

impl FromIterator<Direction> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::none(), |held, direction| held.with(direction))
    }
}

/// Unique identifier assigned to an NPC, equal to its spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NpcId(u32);

impl NpcId {
    /// Creates a new NPC identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of an entity's top-left corner.
///
/// Continuous entities carry sub-pixel coordinates; grid entities stay on
/// whole-unit coordinates for their entire lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Floating-point position used by the continuous variant.
    Continuous(DVec2),
    /// Integer position used by the discrete variant.
    Grid(IVec2),
}

impl Position {
    /// Position expressed as floating-point world units.
    #[must_use]
    pub fn as_dvec2(self) -> DVec2 {
        match self {
            Self::Continuous(position) => position,
            Self::Grid(cell) => cell.as_dvec2(),
        }
    }

    /// Converts the position into the representation used by `variant`.
    ///
    /// Continuous coordinates are truncated toward zero when moved onto the grid.
    #[must_use]
    pub fn for_variant(self, variant: Variant) -> Self {
        match (self, variant) {
            (Self::Continuous(position), Variant::Discrete) => Self::Grid(position.as_ivec2()),
            (Self::Grid(cell), Variant::Continuous) => Self::Continuous(cell.as_dvec2()),
            (position, _) => position,
        }
    }
}

/// Lifecycle of a single game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    /// Input is processed and entities keep moving.
    #[default]
    Running,
    /// Terminal state; no further command has any effect.
    Ended(EndReason),
}

impl GameState {
    /// Reports whether the game reached its terminal state.
    #[must_use]
    pub const fn is_ended(&self) -> bool {
        matches!(self, Self::Ended(_))
    }
}

/// Reasons a game session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The windowing system delivered a quit signal.
    Quit,
    /// The player collided with an NPC.
    Collision {
        /// Identifier of the NPC that caught the player.
        npc: NpcId,
    },
}

/// Starting positions of every entity, produced once when a game begins.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Initial position of the player.
    pub player: Position,
    /// Initial positions of the NPCs in identifier order.
    pub npcs: Vec<Position>,
}

/// Immutable representation of a single NPC used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NpcSnapshot {
    /// Unique identifier assigned to the NPC.
    pub id: NpcId,
    /// Current top-left corner of the NPC.
    pub position: Position,
}

/// Read-only snapshot describing all NPCs in the world.
#[derive(Clone, Debug, Default)]
pub struct NpcView {
    snapshots: Vec<NpcSnapshot>,
}

impl NpcView {
    /// Creates a new NPC view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<NpcSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured NPC snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &NpcSnapshot> {
        self.snapshots.iter()
    }

    /// Number of NPCs captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no NPCs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<NpcSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_iterate_in_draw_order() {
        let held: HeldKeys = [Direction::Right, Direction::Up].into_iter().collect();

        assert!(held.contains(Direction::Up));
        assert!(held.contains(Direction::Right));
        assert!(!held.contains(Direction::Down));
        assert_eq!(
            held.iter().collect::<Vec<_>>(),
            vec![Direction::Up, Direction::Right]
        );
    }

    #[test]
    fn held_keys_start_empty() {
        let mut held = HeldKeys::none();
        assert!(held.is_empty());

        held.insert(Direction::Left);
        assert!(!held.is_empty());
        assert_eq!(held, HeldKeys::default().with(Direction::Left));
    }

    #[test]
    fn direction_offsets_point_along_screen_axes() {
        assert_eq!(Direction::Up.offset(), IVec2::new(0, -1));
        assert_eq!(Direction::Down.offset(), IVec2::new(0, 1));
        assert_eq!(Direction::Left.offset(), IVec2::new(-1, 0));
        assert_eq!(Direction::Right.unit(), DVec2::new(1.0, 0.0));
    }

    #[test]
    fn grid_positions_convert_to_continuous_losslessly() {
        let cell = Position::Grid(IVec2::new(160, 120));

        assert_eq!(cell.as_dvec2(), DVec2::new(160.0, 120.0));
        assert_eq!(
            cell.for_variant(Variant::Continuous),
            Position::Continuous(DVec2::new(160.0, 120.0))
        );
        assert_eq!(cell.for_variant(Variant::Discrete), cell);
    }

    #[test]
    fn continuous_positions_truncate_onto_grid() {
        let position = Position::Continuous(DVec2::new(12.9, 7.2));

        assert_eq!(
            position.for_variant(Variant::Discrete),
            Position::Grid(IVec2::new(12, 7))
        );
    }

    #[test]
    fn npc_view_orders_snapshots_by_identifier() {
        let view = NpcView::from_snapshots(vec![
            NpcSnapshot {
                id: NpcId::new(2),
                position: Position::Grid(IVec2::ZERO),
            },
            NpcSnapshot {
                id: NpcId::new(0),
                position: Position::Grid(IVec2::ONE),
            },
        ]);

        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn ended_state_is_terminal() {
        assert!(!GameState::Running.is_ended());
        assert!(GameState::Ended(EndReason::Quit).is_ended());
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for the starting layout.

use chaser_core::{Layout, Position, Rules, Variant};
use glam::{DVec2, IVec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pure system that places the player and NPCs when a game begins.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a spawning system drawing from a stream seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Builds the starting layout for the provided rules.
    ///
    /// The player starts at the world center. Discrete NPCs line up on a
    /// diagonal from the first quarter of the world, one entity apart;
    /// continuous NPCs are scattered uniformly across the world. Positions
    /// may lie partly outside the world and are clamped when the world is
    /// created.
    pub fn layout(&mut self, rules: &Rules) -> Layout {
        let bounds = rules.bounds();
        let center = bounds.center();

        match rules.variant {
            Variant::Continuous => Layout {
                player: Position::Continuous(center),
                npcs: (0..rules.npc_count)
                    .map(|_| Position::Continuous(self.scatter(rules)))
                    .collect(),
            },
            Variant::Discrete => Layout {
                player: Position::Grid(center.as_ivec2()),
                npcs: (0..rules.npc_count)
                    .map(|index| Position::Grid(diagonal_slot(rules, index)))
                    .collect(),
            },
        }
    }

    fn scatter(&mut self, rules: &Rules) -> DVec2 {
        let x = self.rng.gen_range(0..rules.world_width.max(1));
        let y = self.rng.gen_range(0..rules.world_height.max(1));
        DVec2::new(f64::from(x), f64::from(y))
    }
}

fn diagonal_slot(rules: &Rules, index: u32) -> IVec2 {
    let offset = i64::from(index) * i64::from(rules.entity_size);
    IVec2::new(
        to_coordinate(i64::from(rules.world_width / 4) + offset),
        to_coordinate(i64::from(rules.world_height / 4) + offset),
    )
}

fn to_coordinate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

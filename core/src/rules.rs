//! Tuning constants for each game variant.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Bounds, CollisionRule, Variant};

/// Inclusive range of ticks an NPC commits to a wander direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DwellRange {
    min: u32,
    max: u32,
}

impl DwellRange {
    /// Creates a dwell range spanning `min..=max` ticks.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Shortest dwell that may be drawn.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Longest dwell that may be drawn.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }
}

/// How an NPC decides which way to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WanderPolicy {
    /// Keep a random direction for a random number of updates drawn from
    /// `dwell`, then choose again.
    Committed {
        /// Range the dwell length is drawn from.
        dwell: DwellRange,
    },
    /// Choose a fresh random direction on every update.
    EveryMove,
}

/// Every constant that shapes a game session.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    /// Variant the rules belong to.
    pub variant: Variant,
    /// Width of the world in world units.
    pub world_width: u32,
    /// Height of the world in world units.
    pub world_height: u32,
    /// Side length of every entity's square extent.
    pub entity_size: u32,
    /// Distance the player covers per tick and held key (continuous only).
    pub player_speed: f64,
    /// Distance an NPC covers per update (continuous only).
    pub npc_speed: f64,
    /// Number of NPCs spawned at the start of the game.
    pub npc_count: u32,
    /// Dwell range used by committed wandering (continuous only).
    pub dwell: DwellRange,
    /// Center-distance threshold used for collisions (discrete only).
    pub hitbox_radius: f64,
    /// NPCs move on ticks divisible by this value.
    pub npc_cadence: u32,
    /// Fixed pause inserted after every frame, zero for none.
    pub frame_delay_ms: u64,
}

impl Rules {
    /// Rules of the top-down prototype driven by held arrow keys.
    #[must_use]
    pub const fn continuous() -> Self {
        Self {
            variant: Variant::Continuous,
            world_width: 640,
            world_height: 480,
            entity_size: 32,
            player_speed: 0.1,
            npc_speed: 0.1,
            npc_count: 5,
            dwell: DwellRange::new(100, 1099),
            hitbox_radius: 40.0,
            npc_cadence: 1,
            frame_delay_ms: 0,
        }
    }

    /// Rules of the grid prototype driven by W/A/S/D presses.
    #[must_use]
    pub const fn discrete() -> Self {
        Self {
            variant: Variant::Discrete,
            world_width: 640,
            world_height: 480,
            entity_size: 16,
            player_speed: 0.1,
            npc_speed: 0.1,
            npc_count: 4,
            dwell: DwellRange::new(100, 1099),
            hitbox_radius: 40.0,
            npc_cadence: 10,
            frame_delay_ms: 1000 / 60,
        }
    }

    /// Preset rules for the provided variant.
    #[must_use]
    pub const fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Continuous => Self::continuous(),
            Variant::Discrete => Self::discrete(),
        }
    }

    /// World rectangle described by the rules.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.world_width, self.world_height)
    }

    /// Entity extent as floating-point world units.
    #[must_use]
    pub fn size(&self) -> f64 {
        f64::from(self.entity_size)
    }

    /// Overlap semantics used by the variant.
    #[must_use]
    pub const fn collision_rule(&self) -> CollisionRule {
        match self.variant {
            Variant::Continuous => CollisionRule::RectangleOverlap,
            Variant::Discrete => CollisionRule::CenterDistance {
                radius: self.hitbox_radius,
            },
        }
    }

    /// Wander behaviour used by the variant.
    #[must_use]
    pub const fn wander_policy(&self) -> WanderPolicy {
        match self.variant {
            Variant::Continuous => WanderPolicy::Committed { dwell: self.dwell },
            Variant::Discrete => WanderPolicy::EveryMove,
        }
    }

    /// Reports whether NPCs move during the tick with the provided index.
    #[must_use]
    pub const fn npcs_due(&self, tick: u64) -> bool {
        self.npc_cadence != 0 && tick % self.npc_cadence as u64 == 0
    }

    /// Pause inserted after each frame, if any.
    #[must_use]
    pub const fn frame_delay(&self) -> Option<Duration> {
        if self.frame_delay_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.frame_delay_ms))
        }
    }

    /// Verifies that the rules describe a playable world.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.entity_size == 0 {
            return Err(RulesError::ZeroEntitySize);
        }

        if self.world_width < self.entity_size || self.world_height < self.entity_size {
            return Err(RulesError::WorldTooSmall {
                width: self.world_width,
                height: self.world_height,
                entity_size: self.entity_size,
            });
        }

        if self.npc_cadence == 0 {
            return Err(RulesError::ZeroCadence);
        }

        match self.variant {
            Variant::Continuous => {
                if !(self.player_speed.is_finite() && self.player_speed > 0.0) {
                    return Err(RulesError::InvalidSpeed {
                        speed: self.player_speed,
                    });
                }
                if !(self.npc_speed.is_finite() && self.npc_speed > 0.0) {
                    return Err(RulesError::InvalidSpeed {
                        speed: self.npc_speed,
                    });
                }
                if self.dwell.min() == 0 || self.dwell.min() > self.dwell.max() {
                    return Err(RulesError::InvalidDwell {
                        min: self.dwell.min(),
                        max: self.dwell.max(),
                    });
                }
            }
            Variant::Discrete => {
                if !(self.hitbox_radius.is_finite() && self.hitbox_radius >= 0.0) {
                    return Err(RulesError::InvalidHitbox {
                        radius: self.hitbox_radius,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Reasons a set of rules cannot drive a game.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RulesError {
    /// Entities need a positive extent.
    #[error("entity size must be positive")]
    ZeroEntitySize,
    /// The world cannot hold a single entity.
    #[error("world {width}x{height} cannot hold an entity of size {entity_size}")]
    WorldTooSmall {
        /// Configured world width.
        width: u32,
        /// Configured world height.
        height: u32,
        /// Configured entity size.
        entity_size: u32,
    },
    /// NPCs would never be scheduled.
    #[error("npc cadence must be positive")]
    ZeroCadence,
    /// Movement speeds must be finite and positive.
    #[error("speed must be finite and positive (received {speed})")]
    InvalidSpeed {
        /// Rejected speed.
        speed: f64,
    },
    /// Dwell ranges must be non-empty and start above zero.
    #[error("dwell range {min}..={max} must be non-empty and start above zero")]
    InvalidDwell {
        /// Lower end of the rejected range.
        min: u32,
        /// Upper end of the rejected range.
        max: u32,
    },
    /// Hitbox radii must be finite and non-negative.
    #[error("hitbox radius must be finite and non-negative (received {radius})")]
    InvalidHitbox {
        /// Rejected radius.
        radius: f64,
    },
}

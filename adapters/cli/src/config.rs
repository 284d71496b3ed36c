//! Optional TOML overrides layered on top of a variant's preset rules.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chaser_core::{DwellRange, Rules, RulesError, Variant};
use serde::Deserialize;
use thiserror::Error;

/// Fields of [`Rules`] that a configuration file may override.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RulesOverrides {
    world_width: Option<u32>,
    world_height: Option<u32>,
    entity_size: Option<u32>,
    player_speed: Option<f64>,
    npc_speed: Option<f64>,
    npc_count: Option<u32>,
    dwell: Option<DwellRange>,
    hitbox_radius: Option<f64>,
    npc_cadence: Option<u32>,
    frame_delay_ms: Option<u64>,
}

impl RulesOverrides {
    /// Parses overrides from TOML text.
    pub(crate) fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Replaces every field of `rules` that has an override.
    pub(crate) fn apply(self, rules: &mut Rules) {
        let Self {
            world_width,
            world_height,
            entity_size,
            player_speed,
            npc_speed,
            npc_count,
            dwell,
            hitbox_radius,
            npc_cadence,
            frame_delay_ms,
        } = self;

        override_field(&mut rules.world_width, world_width);
        override_field(&mut rules.world_height, world_height);
        override_field(&mut rules.entity_size, entity_size);
        override_field(&mut rules.player_speed, player_speed);
        override_field(&mut rules.npc_speed, npc_speed);
        override_field(&mut rules.npc_count, npc_count);
        override_field(&mut rules.dwell, dwell);
        override_field(&mut rules.hitbox_radius, hitbox_radius);
        override_field(&mut rules.npc_cadence, npc_cadence);
        override_field(&mut rules.frame_delay_ms, frame_delay_ms);
    }
}

fn override_field<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// Failures while turning a configuration file into rules.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("configured rules are unplayable")]
    Invalid(#[from] RulesError),
}

/// Resolves the rules for `variant`, applying the overrides stored at `path`.
pub(crate) fn load_rules(variant: Variant, path: Option<&Path>) -> Result<Rules, ConfigError> {
    let overrides = match path {
        Some(path) => {
            let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            RulesOverrides::from_toml(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => RulesOverrides::default(),
    };

    resolve_rules(variant, overrides)
}

/// Applies `overrides` to the preset of `variant` and validates the result.
pub(crate) fn resolve_rules(
    variant: Variant,
    overrides: RulesOverrides,
) -> Result<Rules, ConfigError> {
    let mut rules = Rules::for_variant(variant);
    overrides.apply(&mut rules);
    rules.validate()?;
    Ok(rules)
}

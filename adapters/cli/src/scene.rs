//! Translation between the simulation and the rendering contracts.

use std::path::PathBuf;

use chaser_core::{Position, Rules, Variant};
use chaser_rendering::{Color, FrameInput, Presentation, Scene, TextureSource};
use chaser_simulation::TickInput;
use chaser_world::{query, World};
use glam::Vec2;

const CLEAR_COLOR: Color = Color::from_rgb_u8(0, 0, 0);
const PLAYER_FILL: Color = Color::from_rgb_u8(255, 0, 0);
const NPC_FILL: Color = Color::from_rgb_u8(0, 255, 0);

/// Image files used by the continuous variant.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SpritePaths {
    pub(crate) player: PathBuf,
    pub(crate) npc: PathBuf,
}

/// Title of the window opened for `variant`.
pub(crate) fn window_title(variant: Variant) -> &'static str {
    match variant {
        Variant::Continuous => "Chaser (continuous)",
        Variant::Discrete => "Chaser (discrete)",
    }
}

/// Describes the window, textures and first frame of a game.
pub(crate) fn presentation(rules: &Rules, sprites: &SpritePaths, world: &World) -> Presentation {
    let bounds = query::bounds(world);
    let mut scene = Scene::new(
        bounds.width() as f32,
        bounds.height() as f32,
        rules.entity_size as f32,
    );
    populate(&mut scene, world);

    let (player_texture, npc_texture) = match rules.variant {
        Variant::Continuous => (
            TextureSource::ImageFile(sprites.player.clone()),
            TextureSource::ImageFile(sprites.npc.clone()),
        ),
        Variant::Discrete => (
            TextureSource::SolidFill(PLAYER_FILL),
            TextureSource::SolidFill(NPC_FILL),
        ),
    };

    Presentation::new(
        window_title(rules.variant),
        CLEAR_COLOR,
        scene,
        player_texture,
        npc_texture,
    )
}

/// Copies the current entity positions into the scene.
pub(crate) fn populate(scene: &mut Scene, world: &World) {
    scene.player = to_scene(query::player_position(world));
    scene.npcs.clear();
    scene.npcs.extend(
        query::npc_view(world)
            .iter()
            .map(|snapshot| to_scene(snapshot.position)),
    );
}

/// Converts the input sampled by the backend into simulation input.
pub(crate) fn tick_input(input: FrameInput) -> TickInput {
    let FrameInput {
        quit_requested,
        held,
        pressed,
    } = input;

    TickInput {
        quit: quit_requested,
        held,
        pressed,
    }
}

fn to_scene(position: Position) -> Vec2 {
    position.as_dvec2().as_vec2()
}

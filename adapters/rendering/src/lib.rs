#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Chaser adapters.

use anyhow::Result as AnyResult;
use chaser_core::{Direction, HeldKeys};
use glam::Vec2;
use std::path::PathBuf;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color into byte RGBA channels, clamping out-of-range values.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
            channel_to_u8(self.alpha),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Where the pixels of a sprite come from.
#[derive(Clone, Debug, PartialEq)]
pub enum TextureSource {
    /// Image decoded from a file on disk; failure to read it is fatal.
    ImageFile(PathBuf),
    /// Square filled with a single color; always succeeds.
    SolidFill(Color),
}

/// Positions of every sprite drawn in a frame, in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Width of the world and of the window.
    pub world_width: f32,
    /// Height of the world and of the window.
    pub world_height: f32,
    /// Side length of every sprite.
    pub sprite_size: f32,
    /// Top-left corner of the player sprite.
    pub player: Vec2,
    /// Top-left corners of the NPC sprites in identifier order.
    pub npcs: Vec<Vec2>,
}

impl Scene {
    /// Creates an empty scene covering a world of the provided size.
    #[must_use]
    pub fn new(world_width: f32, world_height: f32, sprite_size: f32) -> Self {
        Self {
            world_width,
            world_height,
            sprite_size,
            player: Vec2::ZERO,
            npcs: Vec::new(),
        }
    }

    /// Verifies that the scene describes a window that can be opened.
    pub fn validate(&self) -> Result<(), StartupError> {
        let dimensions = [self.world_width, self.world_height, self.sprite_size];
        if dimensions
            .iter()
            .any(|value| !value.is_finite() || *value <= 0.0)
        {
            return Err(StartupError::Init {
                details: format!(
                    "scene {}x{} with sprite size {} cannot be presented",
                    self.world_width, self.world_height, self.sprite_size
                ),
            });
        }

        Ok(())
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
    /// Pixels drawn for the player.
    pub player_texture: TextureSource,
    /// Pixels drawn for every NPC.
    pub npc_texture: TextureSource,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        scene: Scene,
        player_texture: TextureSource,
        npc_texture: TextureSource,
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
            player_texture,
            npc_texture,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the window was closed or Escape was pressed on this frame.
    pub quit_requested: bool,
    /// Direction keys held down on this frame.
    pub held: HeldKeys,
    /// Direction keys that went down on this frame.
    pub pressed: Vec<Direction>,
}

/// Decision returned by the scene update closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Render the updated scene and keep running.
    Continue,
    /// Stop the loop and close the window.
    Exit,
}

/// Rendering backend capable of presenting Chaser scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives per-frame input captured
    /// by the adapter and may mutate the scene before it is rendered. Startup
    /// failures are returned before the closure is ever invoked.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Failures detected while bringing up the window and its resources.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartupError {
    /// The window or renderer could not be created.
    #[error("failed to initialise window: {details}")]
    Init {
        /// Diagnostic reported by the platform layer.
        details: String,
    },
    /// A sprite image could not be read or decoded.
    #[error("failed to load texture {}: {details}", path.display())]
    AssetLoad {
        /// Path of the image that failed to load.
        path: PathBuf,
        /// Diagnostic reported by the loader.
        details: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_colors_round_trip_through_rgba8() {
        let red = Color::from_rgb_u8(255, 0, 0);

        assert_eq!(red.to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(
            Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(),
            [255, 0, 128, 255]
        );
    }

    #[test]
    fn scene_validation_accepts_positive_dimensions() {
        assert_eq!(Scene::new(640.0, 480.0, 32.0).validate(), Ok(()));
    }

    #[test]
    fn scene_validation_rejects_degenerate_window() {
        let error = Scene::new(0.0, 480.0, 16.0)
            .validate()
            .expect_err("zero width must be rejected");

        assert!(matches!(error, StartupError::Init { .. }));
        assert!(Scene::new(640.0, f32::NAN, 16.0).validate().is_err());
    }

    #[test]
    fn asset_errors_name_the_offending_path() {
        let error = StartupError::AssetLoad {
            path: PathBuf::from("assets/player.png"),
            details: "No such file or directory".to_owned(),
        };

        assert_eq!(
            error.to_string(),
            "failed to load texture assets/player.png: No such file or directory"
        );
    }

    #[test]
    fn default_frame_input_is_idle() {
        let input = FrameInput::default();

        assert!(!input.quit_requested);
        assert!(input.held.is_empty());
        assert!(input.pressed.is_empty());
    }
}

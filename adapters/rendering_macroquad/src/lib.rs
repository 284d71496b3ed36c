#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Chaser.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The backend owns the window, the two sprite textures, keyboard polling and
//! frame pacing. Everything it knows about the game arrives through the
//! [`Scene`] mutated by the update closure.

mod input;
mod sprites;

use anyhow::{Context, Result};
use chaser_rendering::{FrameControl, Presentation, RenderingBackend, Scene, StartupError};
use macroquad::input::prevent_quit;
use std::{sync::mpsc, thread, time::Duration};

use self::sprites::SpriteSet;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    frame_delay: Option<Duration>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures a fixed pause inserted after every presented frame.
    #[must_use]
    pub fn with_frame_delay(mut self, frame_delay: Option<Duration>) -> Self {
        self.frame_delay = frame_delay.filter(|delay| !delay.is_zero());
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(chaser_rendering::FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            frame_delay,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
            player_texture,
            npc_texture,
        } = presentation;

        scene.validate().context("invalid scene description")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_dimension(scene.world_width),
            window_height: window_dimension(scene.world_height),
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let sprite_size = texture_dimension(scene.sprite_size);
        let (startup_sender, startup_receiver) = mpsc::channel::<Result<(), StartupError>>();

        macroquad::Window::from_config(config, async move {
            let sprites = match SpriteSet::load(&player_texture, &npc_texture, sprite_size) {
                Ok(sprites) => sprites,
                Err(error) => {
                    let _ = startup_sender.send(Err(error));
                    return;
                }
            };
            let _ = startup_sender.send(Ok(()));

            prevent_quit();
            let background = to_macroquad_color(clear_color);
            let mut scene = scene;

            loop {
                let frame_input = input::poll();
                if update_scene(frame_input, &mut scene) == FrameControl::Exit {
                    break;
                }

                macroquad::window::clear_background(background);
                draw_scene(&scene, &sprites);

                macroquad::window::next_frame().await;
                if let Some(delay) = frame_delay {
                    thread::sleep(delay);
                }
            }
        });

        let startup = startup_receiver.recv().unwrap_or_else(|_| {
            Err(StartupError::Init {
                details: "window closed before startup completed".to_owned(),
            })
        });
        startup.context("failed to start the macroquad backend")?;

        Ok(())
    }
}

fn draw_scene(scene: &Scene, sprites: &SpriteSet) {
    let size = scene.sprite_size;
    sprites.draw_player(scene.player.x, scene.player.y, size);
    for npc in &scene.npcs {
        sprites.draw_npc(npc.x, npc.y, size);
    }
}

fn window_dimension(extent: f32) -> i32 {
    extent.round().clamp(1.0, i32::MAX as f32) as i32
}

fn texture_dimension(extent: f32) -> u16 {
    extent.round().clamp(1.0, f32::from(u16::MAX)) as u16
}

fn to_macroquad_color(color: chaser_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaser_rendering::{Color, TextureSource};

    #[test]
    fn vsync_toggle_maps_to_swap_interval() {
        assert_eq!(
            MacroquadBackend::new().with_vsync(true).swap_interval,
            Some(1)
        );
        assert_eq!(
            MacroquadBackend::new().with_vsync(false).swap_interval,
            Some(0)
        );
        assert_eq!(MacroquadBackend::new().swap_interval, None);
    }

    #[test]
    fn zero_frame_delay_disables_pacing() {
        let backend = MacroquadBackend::new().with_frame_delay(Some(Duration::ZERO));
        assert_eq!(backend.frame_delay, None);

        let backend = MacroquadBackend::new().with_frame_delay(Some(Duration::from_millis(16)));
        assert_eq!(backend.frame_delay, Some(Duration::from_millis(16)));
    }

    #[test]
    fn dimensions_round_to_whole_pixels() {
        assert_eq!(window_dimension(640.0), 640);
        assert_eq!(window_dimension(479.6), 480);
        assert_eq!(window_dimension(-3.0), 1);
        assert_eq!(texture_dimension(16.0), 16);
        assert_eq!(texture_dimension(1.0e9), u16::MAX);
    }

    #[test]
    fn colors_convert_channel_by_channel() {
        let converted = to_macroquad_color(Color::new(0.25, 0.5, 0.75, 1.0));

        assert_eq!(converted.r, 0.25);
        assert_eq!(converted.g, 0.5);
        assert_eq!(converted.b, 0.75);
        assert_eq!(converted.a, 1.0);
    }

    #[test]
    fn invalid_scene_fails_before_opening_a_window() {
        let presentation = Presentation::new(
            "Chaser (discrete)",
            Color::from_rgb_u8(0, 0, 0),
            Scene::new(0.0, 480.0, 16.0),
            TextureSource::SolidFill(Color::from_rgb_u8(255, 0, 0)),
            TextureSource::SolidFill(Color::from_rgb_u8(0, 255, 0)),
        );

        let error = MacroquadBackend::new()
            .run(presentation, |_, _| FrameControl::Exit)
            .expect_err("degenerate scene must be rejected");

        assert!(matches!(
            error.downcast_ref::<StartupError>(),
            Some(StartupError::Init { .. })
        ));
    }
}

use std::{fs, path::Path};

use chaser_rendering::{Color, StartupError, TextureSource};
use image::ImageFormat;
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};
use tracing::debug;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Textures drawn for the player and for every NPC.
#[derive(Debug)]
pub(crate) struct SpriteSet {
    player: Texture2D,
    npc: Texture2D,
}

impl SpriteSet {
    /// Loads both textures, failing on the first one that cannot be produced.
    pub(crate) fn load(
        player: &TextureSource,
        npc: &TextureSource,
        size: u16,
    ) -> Result<Self, StartupError> {
        Self::load_with(player, npc, size, &mut default_loader)
    }

    fn load_with(
        player: &TextureSource,
        npc: &TextureSource,
        size: u16,
        loader: &mut impl FnMut(&TextureSource, u16) -> Result<Texture2D, StartupError>,
    ) -> Result<Self, StartupError> {
        let player = loader(player, size)?;
        let npc = loader(npc, size)?;
        Ok(Self { player, npc })
    }

    /// Draws the player sprite with its top-left corner at `(x, y)`.
    pub(crate) fn draw_player(&self, x: f32, y: f32, size: f32) {
        draw_sprite(self.player, x, y, size);
    }

    /// Draws an NPC sprite with its top-left corner at `(x, y)`.
    pub(crate) fn draw_npc(&self, x: f32, y: f32, size: f32) {
        draw_sprite(self.npc, x, y, size);
    }
}

fn draw_sprite(texture: Texture2D, x: f32, y: f32, size: f32) {
    let params = DrawTextureParams {
        dest_size: Some(MacroquadVec2::new(size, size)),
        ..DrawTextureParams::default()
    };
    texture::draw_texture_ex(texture, x, y, WHITE, params);
}

fn default_loader(source: &TextureSource, size: u16) -> Result<Texture2D, StartupError> {
    match source {
        TextureSource::ImageFile(path) => {
            let image = read_image(path)?;
            debug!(
                path = %path.display(),
                width = image.width,
                height = image.height,
                "loaded sprite image"
            );
            Ok(Texture2D::from_rgba8(image.width, image.height, &image.rgba))
        }
        TextureSource::SolidFill(color) => {
            debug!(?color, size, "filled solid sprite");
            Ok(Texture2D::from_rgba8(size, size, &solid_rgba(*color, size)))
        }
    }
}

/// Decoded RGBA8 pixels of a sprite image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DecodedImage {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) rgba: Vec<u8>,
}

/// Reads and decodes a PNG file into RGBA8 pixels.
pub(crate) fn read_image(path: &Path) -> Result<DecodedImage, StartupError> {
    let asset_error = |details: String| StartupError::AssetLoad {
        path: path.to_path_buf(),
        details,
    };

    let bytes = fs::read(path).map_err(|error| asset_error(error.to_string()))?;
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(asset_error("file is not a PNG image".to_owned()));
    }

    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .map_err(|error| asset_error(error.to_string()))?
        .into_rgba8();
    let (width, height) = decoded.dimensions();
    let (Ok(width), Ok(height)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(asset_error(format!(
            "image of {width}x{height} pixels exceeds the texture limit"
        )));
    };

    Ok(DecodedImage {
        width,
        height,
        rgba: decoded.into_raw(),
    })
}

/// RGBA pixels of a square of side `size` filled with `color`.
pub(crate) fn solid_rgba(color: Color, size: u16) -> Vec<u8> {
    let pixel = color.to_rgba8();
    let pixels = usize::from(size) * usize::from(size);
    pixel.repeat(pixels)
}

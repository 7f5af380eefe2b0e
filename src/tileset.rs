use macroquad::math::{Rect, UVec2, Vec2};
use macroquad::texture::{load_texture, FilterMode, Texture2D};
use std::rc::Rc;

use crate::error::TileLayerError;

/// Source of tile textures for a layer.
pub trait Tileset {
    type Texture;

    fn texture(&self) -> Option<&Self::Texture>;

    fn has_texture(&self) -> bool {
        self.texture().is_some()
    }

    /// Pixel size of one tile in the atlas.
    fn tile_size(&self) -> UVec2;

    /// Offset added to every tile position.
    fn offset(&self) -> Vec2;

    /// Normalized sub-rectangle of the atlas for `tile`.
    fn compute_texture_coords(&self, tile: u32) -> Rect;
}

impl<T: Tileset + ?Sized> Tileset for &T {
    type Texture = T::Texture;

    fn texture(&self) -> Option<&Self::Texture> {
        (**self).texture()
    }
    fn tile_size(&self) -> UVec2 {
        (**self).tile_size()
    }
    fn offset(&self) -> Vec2 {
        (**self).offset()
    }
    fn compute_texture_coords(&self, tile: u32) -> Rect {
        (**self).compute_texture_coords(tile)
    }
}

impl<T: Tileset + ?Sized> Tileset for Rc<T> {
    type Texture = T::Texture;

    fn texture(&self) -> Option<&Self::Texture> {
        (**self).texture()
    }
    fn tile_size(&self) -> UVec2 {
        (**self).tile_size()
    }
    fn offset(&self) -> Vec2 {
        (**self).offset()
    }
    fn compute_texture_coords(&self, tile: u32) -> Rect {
        (**self).compute_texture_coords(tile)
    }
}

/// Normalized texture rect of `tile` in a regular atlas with margin and spacing.
///
/// Returns the zero rect when the atlas cannot hold a single column.
pub fn atlas_texture_coords(
    texture_size: Vec2,
    tile_size: UVec2,
    margin: u32,
    spacing: u32,
    tile: u32,
) -> Rect {
    let tex_w = texture_size.x as u32;
    let stride = tile_size + UVec2::splat(spacing);
    if stride.x == 0 || texture_size.x <= 0.0 || texture_size.y <= 0.0 {
        return Rect::default();
    }

    let cols = (tex_w + spacing).saturating_sub(2 * margin) / stride.x;
    if cols == 0 {
        return Rect::default();
    }

    let col = tile % cols;
    let row = tile / cols;
    let sx = margin + col * stride.x;
    let sy = margin + row * stride.y;

    Rect::new(
        sx as f32 / texture_size.x,
        sy as f32 / texture_size.y,
        tile_size.x as f32 / texture_size.x,
        tile_size.y as f32 / texture_size.y,
    )
}

/// A regular-grid tile atlas backed by a macroquad texture.
#[derive(Debug, Clone, Default)]
pub struct AtlasTileset {
    texture: Option<Texture2D>,
    texture_size: Vec2,
    tile_size: UVec2,
    offset: Vec2,
    margin: u32,
    spacing: u32,
}

impl AtlasTileset {
    pub fn new(tile_size: UVec2) -> Self {
        AtlasTileset {
            tile_size,
            ..Default::default()
        }
    }

    /// Load the atlas image with nearest filtering.
    pub async fn load(path: &str, tile_size: UVec2) -> Result<Self, TileLayerError> {
        let texture = load_texture(path)
            .await
            .map_err(|err| TileLayerError::Texture(format!("{path}: {err}")))?;
        texture.set_filter(FilterMode::Nearest);

        let mut tileset = AtlasTileset::new(tile_size);
        tileset.set_texture(texture);
        Ok(tileset)
    }

    pub fn set_texture(&mut self, texture: Texture2D) {
        self.texture_size = texture.size();
        self.texture = Some(texture);
    }

    pub fn reset_texture(&mut self) {
        self.texture = None;
        self.texture_size = Vec2::ZERO;
    }

    pub fn texture_size(&self) -> Vec2 {
        self.texture_size
    }

    pub fn set_tile_size(&mut self, tile_size: UVec2) {
        self.tile_size = tile_size;
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub fn set_margin(&mut self, margin: u32) {
        self.margin = margin;
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }
}

impl Tileset for AtlasTileset {
    type Texture = Texture2D;

    fn texture(&self) -> Option<&Texture2D> {
        self.texture.as_ref()
    }

    fn tile_size(&self) -> UVec2 {
        self.tile_size
    }

    fn offset(&self) -> Vec2 {
        self.offset
    }

    fn compute_texture_coords(&self, tile: u32) -> Rect {
        if self.texture.is_none() {
            return Rect::default();
        }
        atlas_texture_coords(self.texture_size, self.tile_size, self.margin, self.spacing, tile)
    }
}

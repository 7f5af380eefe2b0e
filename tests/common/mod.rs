// tests/common/mod.rs
#![allow(dead_code)]

use macroquad::math::{Mat3, Rect, UVec2, Vec2};
use macroquad_tile_layer::{PrimitiveType, RenderStates, RenderTarget, TileVertex, Tileset, View};

/// Atlas with 4x4 tiles and a dummy texture, usable without a GPU context.
pub struct GridAtlas {
    pub texture: Option<u32>,
    pub tile_size: UVec2,
    pub offset: Vec2,
}

impl GridAtlas {
    pub fn new(tile_size: UVec2) -> Self {
        GridAtlas {
            texture: Some(7),
            tile_size,
            offset: Vec2::ZERO,
        }
    }
}

impl Tileset for GridAtlas {
    type Texture = u32;

    fn texture(&self) -> Option<&u32> {
        self.texture.as_ref()
    }
    fn tile_size(&self) -> UVec2 {
        self.tile_size
    }
    fn offset(&self) -> Vec2 {
        self.offset
    }
    fn compute_texture_coords(&self, tile: u32) -> Rect {
        Rect::new((tile % 4) as f32 * 0.25, (tile / 4) as f32 * 0.25, 0.25, 0.25)
    }
}

pub struct Draw {
    pub vertices: Vec<TileVertex>,
    pub transform: Mat3,
    pub texture: Option<u32>,
}

pub struct RecordingTarget {
    pub view: View,
    pub draws: Vec<Draw>,
}

impl RecordingTarget {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        RecordingTarget {
            view: View::new(center, size),
            draws: Vec::new(),
        }
    }
}

impl RenderTarget for RecordingTarget {
    type Texture = u32;

    fn view(&self) -> View {
        self.view
    }

    fn draw_vertices(
        &mut self,
        vertices: &[TileVertex],
        _primitive: PrimitiveType,
        states: &RenderStates<'_, u32>,
    ) {
        self.draws.push(Draw {
            vertices: vertices.to_vec(),
            transform: states.transform,
            texture: states.texture.copied(),
        });
    }
}

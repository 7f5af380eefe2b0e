use macroquad::math::{Rect, Vec2};
use std::sync::Arc;

use crate::render::cull::GridRect;
use crate::render::placement::Placement;
use crate::spatial::flip::Flip;
use crate::spatial::grid::{Cell, Grid, NO_TILE};
use crate::tileset::Tileset;

/// Vertices emitted per non-empty cell (two triangles).
pub const VERTICES_PER_TILE: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TileVertex {
    pub position: Vec2,
    /// Normalized texture coordinates, in `[0, 1]^2`.
    pub tex_coords: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrimitiveType {
    #[default]
    Triangles,
}

/// Growable vertex stream, rebuilt from scratch rather than patched.
#[derive(Debug, Clone, Default)]
pub struct VertexArray {
    primitive: PrimitiveType,
    vertices: Vec<TileVertex>,
}

impl VertexArray {
    pub fn new(primitive: PrimitiveType) -> Self {
        VertexArray {
            primitive,
            vertices: Vec::new(),
        }
    }

    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }

    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.vertices.reserve(additional);
    }

    pub fn append(&mut self, vertex: TileVertex) {
        self.vertices.push(vertex);
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn into_buffer(self) -> VertexBuffer {
        VertexBuffer {
            primitive: self.primitive,
            vertices: self.vertices.into(),
        }
    }
}

/// Immutable geometry snapshot. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct VertexBuffer {
    primitive: PrimitiveType,
    vertices: Arc<[TileVertex]>,
}

impl VertexBuffer {
    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }

    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// The four corners of a tile quad: top-left, top-right, bottom-left, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad(pub [TileVertex; 4]);

impl Quad {
    pub fn new(bounds: Rect, tex_coords: Rect, flip: Flip) -> Self {
        let corner = |r: Rect| {
            [
                Vec2::new(r.left(), r.top()),
                Vec2::new(r.right(), r.top()),
                Vec2::new(r.left(), r.bottom()),
                Vec2::new(r.right(), r.bottom()),
            ]
        };
        let positions = corner(bounds);
        let mut uvs = corner(tex_coords);
        apply_flip(&mut uvs, flip);

        Quad(std::array::from_fn(|i| TileVertex {
            position: positions[i],
            tex_coords: uvs[i],
        }))
    }

    /// Triangles (TL, TR, BL) and (BL, TR, BR).
    pub fn triangles(&self) -> [TileVertex; VERTICES_PER_TILE] {
        let [tl, tr, bl, br] = self.0;
        [tl, tr, bl, bl, tr, br]
    }
}

/// Order matters and follows the Tiled convention: diagonal, then horizontal, then vertical.
pub fn apply_flip<T>(corners: &mut [T; 4], flip: Flip) {
    if flip.contains(Flip::DIAGONAL) {
        corners.swap(1, 2);
    }
    if flip.contains(Flip::HORIZONTAL) {
        corners.swap(0, 1);
        corners.swap(2, 3);
    }
    if flip.contains(Flip::VERTICAL) {
        corners.swap(0, 2);
        corners.swap(1, 3);
    }
}

/// Append two triangles for every non-empty cell of `rect` to `array`.
pub fn fill_vertex_array<S>(
    array: &mut VertexArray,
    rect: GridRect,
    grid: &Grid,
    placement: &Placement,
    tileset: &S,
) where
    S: Tileset + ?Sized,
{
    array.reserve(rect.cell_count() * VERTICES_PER_TILE);

    for cell in rect.cells() {
        let cell = cell.as_uvec2();
        let Cell { tile, flip } = *grid.get(cell);

        if tile == NO_TILE {
            continue;
        }

        let Some(bounds) = placement.cell_box(cell) else {
            continue;
        };

        let quad = Quad::new(bounds, tileset.compute_texture_coords(tile), flip);
        for vertex in quad.triangles() {
            array.append(vertex);
        }
    }
}

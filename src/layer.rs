use log::{debug, trace};
use macroquad::math::{Rect, UVec2};

use crate::error::TileLayerError;
use crate::render::cull::{visible_grid_rect, GridRect};
use crate::render::placement::{Orientation, Placement, StaggerIndex};
use crate::render::target::{RenderStates, RenderTarget};
use crate::render::tessellate::{fill_vertex_array, PrimitiveType, VertexArray, VertexBuffer};
use crate::spatial::flip::Flip;
use crate::spatial::grid::{Cell, Grid};
use crate::tileset::Tileset;
use crate::transform::{Anchor, Transformable};

/// A grid of tiles drawn from one tileset.
///
/// Only the cells that may be visible in the target's view are tessellated, and
/// the geometry is rebuilt only when that set of cells changes (or the layer is
/// edited). Positions passed to the accessors must lie inside the layer;
/// the `try_` variants report [`TileLayerError::OutOfBounds`] instead of panicking.
#[derive(Debug)]
pub struct TileLayer<S> {
    layer_size: UVec2,
    tile_size: UVec2,
    orientation: Orientation,
    stagger_index: StaggerIndex,
    tiles: Grid,
    tileset: S,
    transformable: Transformable,
    rect: GridRect,
    dirty: bool,
    vertices: VertexArray,
    geometry_revision: u64,
}

impl<S: Tileset> TileLayer<S> {
    pub fn new(layer_size: UVec2, orientation: Orientation, tileset: S) -> Self {
        TileLayer {
            layer_size,
            tile_size: UVec2::ZERO,
            orientation,
            stagger_index: StaggerIndex::default(),
            tiles: Grid::new(layer_size),
            tileset,
            transformable: Transformable::default(),
            rect: GridRect::EMPTY,
            dirty: false,
            vertices: VertexArray::new(PrimitiveType::Triangles),
            geometry_revision: 0,
        }
    }

    pub fn layer_size(&self) -> UVec2 {
        self.layer_size
    }

    pub fn tile_size(&self) -> UVec2 {
        self.tile_size
    }

    pub fn set_tile_size(&mut self, tile_size: UVec2) {
        self.tile_size = tile_size;
        self.dirty = true;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.dirty = true;
    }

    pub fn stagger_index(&self) -> StaggerIndex {
        self.stagger_index
    }

    pub fn set_stagger_index(&mut self, stagger_index: StaggerIndex) {
        self.stagger_index = stagger_index;
        self.dirty = true;
    }

    pub fn tileset(&self) -> &S {
        &self.tileset
    }

    /// Edits through this handle are picked up on the next draw.
    pub fn tileset_mut(&mut self) -> &mut S {
        self.dirty = true;
        &mut self.tileset
    }

    pub fn transformable(&self) -> &Transformable {
        &self.transformable
    }

    pub fn transformable_mut(&mut self) -> &mut Transformable {
        &mut self.transformable
    }

    /// Panics if `position` lies outside the layer.
    pub fn set_tile(&mut self, position: UVec2, tile: u32, flip: Flip) {
        self.tiles.set(position, Cell { tile, flip });
        self.dirty = true;
    }

    pub fn try_set_tile(
        &mut self,
        position: UVec2,
        tile: u32,
        flip: Flip,
    ) -> Result<(), TileLayerError> {
        self.tiles.try_set(position, Cell { tile, flip })?;
        self.dirty = true;
        Ok(())
    }

    /// Panics if `position` lies outside the layer.
    pub fn tile(&self, position: UVec2) -> u32 {
        self.tiles.get(position).tile
    }

    pub fn try_tile(&self, position: UVec2) -> Result<u32, TileLayerError> {
        Ok(self.tiles.try_get(position)?.tile)
    }

    /// Panics if `position` lies outside the layer.
    pub fn flip(&self, position: UVec2) -> Flip {
        self.tiles.get(position).flip
    }

    pub fn try_flip(&self, position: UVec2) -> Result<Flip, TileLayerError> {
        Ok(self.tiles.try_get(position)?.flip)
    }

    /// Number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.tiles.non_empty_count()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.dirty = true;
    }

    pub fn local_bounds(&self) -> Rect {
        let size = self.layer_size.as_vec2() * self.tile_size.as_vec2();
        Rect::new(0.0, 0.0, size.x, size.y)
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        let bounds = self.local_bounds();
        self.transformable
            .set_origin_from_anchor_and_bounds(anchor, bounds);
    }

    /// Cells covered by the live geometry, as of the last draw.
    pub fn visible_rect(&self) -> GridRect {
        self.rect
    }

    /// Geometry produced by the last draw.
    pub fn vertices(&self) -> &VertexArray {
        &self.vertices
    }

    /// Bumped every time the live geometry is rebuilt.
    pub fn geometry_revision(&self) -> u64 {
        self.geometry_revision
    }

    fn placement(&self) -> Placement {
        Placement {
            orientation: self.orientation,
            stagger_index: self.stagger_index,
            tile_size: self.tile_size,
            tileset_tile_size: self.tileset.tile_size(),
            tileset_offset: self.tileset.offset(),
        }
    }

    /// Geometry of the whole layer, regardless of any view.
    pub fn commit_geometry(&self) -> VertexBuffer {
        let mut vertices = VertexArray::new(PrimitiveType::Triangles);
        fill_vertex_array(
            &mut vertices,
            GridRect::full(self.layer_size),
            &self.tiles,
            &self.placement(),
            &self.tileset,
        );
        vertices.into_buffer()
    }

    /// Draw the part of the layer visible in `target`'s view.
    ///
    /// A layer without texture or orientation draws nothing.
    pub fn draw<R>(&mut self, target: &mut R, states: &RenderStates<'_, S::Texture>)
    where
        R: RenderTarget<Texture = S::Texture> + ?Sized,
    {
        if !self.tileset.has_texture() || self.orientation == Orientation::Unknown {
            debug!("skipping draw of unconfigured tile layer");
            return;
        }

        let rect = visible_grid_rect(
            &target.view(),
            &self.transformable.inverse_transform(),
            self.layer_size,
            self.placement().effective_tile_size(),
        );

        if rect != self.rect || self.dirty {
            debug!("visible tiles changed to {:?}..={:?}", rect.min, rect.max);
            self.rect = rect;
            self.update_geometry();
        }

        let local_states = RenderStates {
            transform: states.transform * self.transformable.transform(),
            texture: self.tileset.texture(),
        };
        target.draw_vertices(
            self.vertices.vertices(),
            self.vertices.primitive(),
            &local_states,
        );
    }

    fn update_geometry(&mut self) {
        self.vertices.clear();
        self.dirty = false;
        self.geometry_revision += 1;

        if !self.tileset.has_texture() || self.tile_size.x == 0 || self.tile_size.y == 0 {
            debug!("tile layer has no texture or a zero tile size, leaving geometry empty");
            return;
        }

        let placement = self.placement();
        fill_vertex_array(
            &mut self.vertices,
            self.rect,
            &self.tiles,
            &placement,
            &self.tileset,
        );
        trace!("tessellated {} vertices", self.vertices.len());
    }
}

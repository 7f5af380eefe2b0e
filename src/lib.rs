//! View-culled tile layers for Macroquad.
//!
//! A [`TileLayer`] stores a grid of `(tile, flip)` cells and turns the part of it
//! visible through a [`RenderTarget`]'s view into a flat triangle list. Geometry is
//! only rebuilt when the visible range of cells changes, so panning inside the
//! same tile window costs a single draw call. [`TileLayer::commit_geometry`] bakes
//! the whole layer once for static content.
//!
//! Flip flags follow the Tiled convention (diagonal, then horizontal, then
//! vertical), and layers can be read straight from Tiled JSON maps.

mod error;
mod layer;
mod loader {
    pub mod json_loader;
}
mod render {
    pub mod cull;
    pub mod placement;
    pub mod target;
    pub mod tessellate;
}
mod spatial {
    pub mod flip;
    pub mod grid;
}
mod tileset;
mod transform;

pub use error::TileLayerError;
pub use layer::TileLayer;
pub use loader::json_loader::{decode_tile_layer, load_tile_layer_file, TileLayerDesc};
pub use render::cull::{transform_rect, visible_grid_rect, GridRect, View};
pub use render::placement::{Orientation, Placement, StaggerIndex};
pub use render::target::{mesh_batches, MacroquadTarget, RenderStates, RenderTarget, MAX_MESH_VERTICES};
pub use render::tessellate::{
    apply_flip, fill_vertex_array, PrimitiveType, Quad, TileVertex, VertexArray, VertexBuffer,
    VERTICES_PER_TILE,
};
pub use spatial::flip::{Flip, TileGid, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub use spatial::grid::{Cell, Grid, NO_TILE};
pub use tileset::{atlas_texture_coords, AtlasTileset, Tileset};
pub use transform::{Anchor, Transformable};

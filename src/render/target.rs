use macroquad::camera::{Camera, Camera2D};
use macroquad::color::{colors::WHITE, Color};
use macroquad::math::{vec2, Mat3, Rect, Vec3};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::texture::Texture2D;
use macroquad::window::{screen_height, screen_width};

use crate::render::cull::View;
use crate::render::tessellate::{PrimitiveType, TileVertex, VertexBuffer};

/// Transform and texture a batch of vertices is drawn with.
#[derive(Debug)]
pub struct RenderStates<'a, T> {
    pub transform: Mat3,
    pub texture: Option<&'a T>,
}

impl<T> Clone for RenderStates<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RenderStates<'_, T> {}

impl<T> Default for RenderStates<'_, T> {
    fn default() -> Self {
        RenderStates {
            transform: Mat3::IDENTITY,
            texture: None,
        }
    }
}

/// Something geometry can be presented to.
pub trait RenderTarget {
    type Texture;

    /// Part of the world currently shown.
    fn view(&self) -> View;

    fn draw_vertices(
        &mut self,
        vertices: &[TileVertex],
        primitive: PrimitiveType,
        states: &RenderStates<'_, Self::Texture>,
    );

    fn draw_buffer(&mut self, buffer: &VertexBuffer, states: &RenderStates<'_, Self::Texture>) {
        self.draw_vertices(buffer.vertices(), buffer.primitive(), states);
    }
}

/// Largest mesh we hand to macroquad: whole tiles, within the default
/// `draw_call_index_capacity` of 5000. Bigger meshes get truncated by the batcher.
pub const MAX_MESH_VERTICES: usize = 4_998;

/// Splits a triangle list into meshes macroquad will draw in full.
pub fn mesh_batches(vertices: &[TileVertex]) -> impl Iterator<Item = &[TileVertex]> + '_ {
    vertices.chunks(MAX_MESH_VERTICES)
}

/// Draws through macroquad's immediate-mode mesh API, in the current camera.
#[derive(Debug, Clone)]
pub struct MacroquadTarget {
    view: View,
    pub tint: Color,
}

impl MacroquadTarget {
    pub fn new(view: View) -> Self {
        MacroquadTarget { view, tint: WHITE }
    }

    /// The default screen-space camera.
    pub fn screen() -> Self {
        MacroquadTarget::new(View::from_rect(Rect::new(
            0.0,
            0.0,
            screen_width(),
            screen_height(),
        )))
    }

    /// World area covered by `camera`; its rotation is absorbed by the culler's margin.
    pub fn from_camera(camera: &Camera2D) -> Self {
        MacroquadTarget::new(camera_view(camera))
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }
}

/// The world point under the screen center, which `offset` moves away from `target`.
fn camera_view(camera: &Camera2D) -> View {
    let center = camera.matrix().inverse().project_point3(Vec3::ZERO).truncate();
    let size = vec2(2.0 / camera.zoom.x.abs(), 2.0 / camera.zoom.y.abs());
    View::new(center, size)
}

impl RenderTarget for MacroquadTarget {
    type Texture = Texture2D;

    fn view(&self) -> View {
        self.view
    }

    fn draw_vertices(
        &mut self,
        vertices: &[TileVertex],
        _primitive: PrimitiveType,
        states: &RenderStates<'_, Texture2D>,
    ) {
        for batch in mesh_batches(vertices) {
            let mesh = Mesh {
                vertices: batch
                    .iter()
                    .map(|v| {
                        let p = states.transform.transform_point2(v.position);
                        Vertex::new(p.x, p.y, 0.0, v.tex_coords.x, v.tex_coords.y, self.tint)
                    })
                    .collect(),
                indices: (0..batch.len() as u16).collect(),
                texture: states.texture.cloned(),
            };
            draw_mesh(&mesh);
        }
    }
}

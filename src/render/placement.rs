use macroquad::math::{Rect, UVec2, Vec2};

/// How grid cells are laid out in layer space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Nothing is drawn for a layer of unknown orientation.
    #[default]
    Unknown,
    Orthogonal,
    /// Rows at half-tile vertical steps, alternating rows shifted by half a tile.
    Staggered,
}

/// Which rows of a staggered layer are shifted right by half a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaggerIndex {
    #[default]
    Odd,
    Even,
}

impl StaggerIndex {
    #[inline]
    fn is_shifted(self, row: u32) -> bool {
        match self {
            StaggerIndex::Odd => row % 2 == 1,
            StaggerIndex::Even => row % 2 == 0,
        }
    }
}

/// Everything needed to place a cell, copied out of the layer and its tileset.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub orientation: Orientation,
    pub stagger_index: StaggerIndex,
    /// Nominal cell size of the layer.
    pub tile_size: UVec2,
    /// Pixel size of one tile in the tileset.
    pub tileset_tile_size: UVec2,
    pub tileset_offset: Vec2,
}

impl Placement {
    /// Layer-space box covered by `cell`, or `None` when the orientation is unknown.
    pub fn cell_box(&self, cell: UVec2) -> Option<Rect> {
        let (position, size) = match self.orientation {
            Orientation::Unknown => return None,
            Orientation::Orthogonal => (
                cell.as_vec2() * self.tile_size.as_vec2(),
                self.tile_size.as_vec2(),
            ),
            Orientation::Staggered => {
                let mut position = cell.as_vec2() * self.tile_size.as_vec2();
                position.y /= 2.0;
                if self.stagger_index.is_shifted(cell.y) {
                    position.x += (self.tile_size.x / 2) as f32;
                }
                (position, self.tileset_tile_size.as_vec2())
            }
        };

        let position = position + self.tileset_offset;
        Some(Rect::new(position.x, position.y, size.x, size.y))
    }

    /// Cell size used to map layer space back to grid space.
    pub fn effective_tile_size(&self) -> UVec2 {
        match self.orientation {
            Orientation::Staggered => UVec2::new(self.tile_size.x, self.tile_size.y / 2),
            _ => self.tile_size,
        }
    }
}

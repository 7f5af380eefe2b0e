use macroquad::math::UVec2;

use crate::error::TileLayerError;
use crate::spatial::flip::Flip;

/// Sentinel tile index for an empty cell.
pub const NO_TILE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub tile: u32,
    pub flip: Flip,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        tile: NO_TILE,
        flip: Flip::empty(),
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tile == NO_TILE
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// Fixed-size dense grid of cells, row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    size: UVec2,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: UVec2) -> Self {
        Grid {
            size,
            cells: vec![Cell::EMPTY; (size.x as usize) * (size.y as usize)],
        }
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    #[inline]
    pub fn is_valid(&self, pos: UVec2) -> bool {
        pos.x < self.size.x && pos.y < self.size.y
    }

    #[inline]
    fn idx(&self, pos: UVec2) -> usize {
        pos.y as usize * self.size.x as usize + pos.x as usize
    }

    /// Panics if `pos` lies outside the grid.
    pub fn get(&self, pos: UVec2) -> &Cell {
        assert!(
            self.is_valid(pos),
            "cell {pos} out of bounds for grid of size {}",
            self.size
        );
        &self.cells[self.idx(pos)]
    }

    /// Panics if `pos` lies outside the grid.
    pub fn set(&mut self, pos: UVec2, cell: Cell) {
        assert!(
            self.is_valid(pos),
            "cell {pos} out of bounds for grid of size {}",
            self.size
        );
        let idx = self.idx(pos);
        self.cells[idx] = cell;
    }

    pub fn try_get(&self, pos: UVec2) -> Result<&Cell, TileLayerError> {
        if !self.is_valid(pos) {
            return Err(TileLayerError::OutOfBounds {
                position: pos,
                size: self.size,
            });
        }
        Ok(&self.cells[self.idx(pos)])
    }

    pub fn try_set(&mut self, pos: UVec2, cell: Cell) -> Result<(), TileLayerError> {
        if !self.is_valid(pos) {
            return Err(TileLayerError::OutOfBounds {
                position: pos,
                size: self.size,
            });
        }
        let idx = self.idx(pos);
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    pub fn non_empty_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

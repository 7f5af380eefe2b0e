use macroquad::math::{ivec2, IVec2, Mat3, Rect, UVec2, Vec2};
use std::f32::consts::SQRT_2;

/// The part of the world a render target is looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub center: Vec2,
    pub size: Vec2,
}

impl View {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        View { center, size }
    }

    pub fn from_rect(rect: Rect) -> Self {
        View {
            center: rect.center(),
            size: rect.size(),
        }
    }
}

/// Inclusive rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRect {
    pub min: IVec2,
    pub max: IVec2,
}

impl GridRect {
    /// Covers no cell at all.
    pub const EMPTY: GridRect = GridRect {
        min: IVec2::ZERO,
        max: IVec2::NEG_ONE,
    };

    /// Any rect with `min > max` on an axis collapses to [`GridRect::EMPTY`].
    pub fn new(min: IVec2, max: IVec2) -> Self {
        if min.x > max.x || min.y > max.y {
            return GridRect::EMPTY;
        }
        GridRect { min, max }
    }

    /// Every cell of a layer of size `size`.
    pub fn full(size: UVec2) -> Self {
        GridRect::new(IVec2::ZERO, size.as_ivec2() - IVec2::ONE)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.max.x - self.min.x + 1) as u32
        }
    }

    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.max.y - self.min.y + 1) as u32
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    pub fn intersect(&self, other: &GridRect) -> GridRect {
        GridRect::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Cells in row-major order (y outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = IVec2> {
        let GridRect { min, max } = *self;
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| ivec2(x, y)))
    }
}

/// Bounding box of `rect` after applying `transform` to its four corners.
pub fn transform_rect(transform: &Mat3, rect: Rect) -> Rect {
    let corners = [
        rect.point(),
        Vec2::new(rect.right(), rect.top()),
        Vec2::new(rect.left(), rect.bottom()),
        Vec2::new(rect.right(), rect.bottom()),
    ]
    .map(|p| transform.transform_point2(p));

    let mut low = corners[0];
    let mut high = corners[0];
    for p in &corners[1..] {
        low = low.min(*p);
        high = high.max(*p);
    }
    Rect::new(low.x, low.y, high.x - low.x, high.y - low.y)
}

pub fn grow(rect: Rect, amount: f32) -> Rect {
    Rect::new(
        rect.x - amount,
        rect.y - amount,
        rect.w + 2.0 * amount,
        rect.h + 2.0 * amount,
    )
}

/// Overlap of two rects; touching edges do not count.
pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
    let left = a.left().max(b.left());
    let top = a.top().max(b.top());
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(left, top, right - left, bottom - top))
}

/// Grid cells of a layer that may be visible through `view`.
///
/// The view is widened to a square of side `sqrt(2) * max(w, h)` so any rotation
/// of the camera stays covered, brought into layer space with `inverse_transform`,
/// then grown by one tile so cells straddling the border are kept.
/// Layer space to grid space rounds half up (`+ 0.5` then truncate).
pub fn visible_grid_rect(
    view: &View,
    inverse_transform: &Mat3,
    layer_size: UVec2,
    tile_size: UVec2,
) -> GridRect {
    let extent = SQRT_2 * view.size.x.max(view.size.y);
    let world = Rect::new(
        view.center.x - extent / 2.0,
        view.center.y - extent / 2.0,
        extent,
        extent,
    );
    let local = grow(
        transform_rect(inverse_transform, world),
        tile_size.max_element() as f32,
    );

    let layer_world = layer_size.as_vec2() * tile_size.as_vec2();
    let layer = Rect::new(0.0, 0.0, layer_world.x, layer_world.y);

    let Some(visible) = intersection(local, layer) else {
        return GridRect::EMPTY;
    };

    let tile = tile_size.as_vec2();
    let min = (visible.point() / tile + 0.5).as_ivec2();
    let size = (visible.size() / tile + 0.5).as_ivec2();
    GridRect::new(min, min + size).intersect(&GridRect::full(layer_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::{uvec2, vec2};

    #[test]
    fn empty_rect_has_no_cells() {
        assert!(GridRect::EMPTY.is_empty());
        assert_eq!(GridRect::EMPTY.cell_count(), 0);
        assert_eq!(GridRect::EMPTY.cells().count(), 0);
        assert_eq!(GridRect::new(ivec2(3, 0), ivec2(2, 5)), GridRect::EMPTY);
        assert_eq!(GridRect::full(uvec2(0, 4)), GridRect::EMPTY);
    }

    #[test]
    fn cells_are_row_major_and_inclusive() {
        let rect = GridRect::new(ivec2(1, 1), ivec2(2, 2));
        let cells: Vec<IVec2> = rect.cells().collect();
        assert_eq!(cells, vec![ivec2(1, 1), ivec2(2, 1), ivec2(1, 2), ivec2(2, 2)]);
        assert_eq!(rect.cell_count(), 4);
    }

    #[test]
    fn transform_rect_bounds_rotated_corners() {
        let rotate = Mat3::from_angle(std::f32::consts::FRAC_PI_2);
        let r = transform_rect(&rotate, Rect::new(0.0, 0.0, 2.0, 1.0));
        assert!((r.w - 1.0).abs() < 1e-5);
        assert!((r.h - 2.0).abs() < 1e-5);
        assert!((r.x + 1.0).abs() < 1e-5);
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(intersection(a, Rect::new(10.0, 0.0, 5.0, 5.0)), None);
        assert_eq!(
            intersection(a, Rect::new(5.0, 5.0, 10.0, 10.0)),
            Some(Rect::new(5.0, 5.0, 5.0, 5.0))
        );
    }

    #[test]
    fn centered_small_view_yields_strict_subrect() {
        let layer = uvec2(100, 100);
        let view = View::new(vec2(1600.0, 1600.0), vec2(320.0, 320.0));
        let rect = visible_grid_rect(&view, &Mat3::IDENTITY, layer, uvec2(32, 32));
        let full = GridRect::full(layer);

        assert!(!rect.is_empty());
        assert!(rect.cell_count() < full.cell_count());
        assert_eq!(rect.intersect(&full), rect);
        assert_eq!(rect, GridRect::new(ivec2(42, 42), ivec2(58, 58)));
    }

    #[test]
    fn half_tile_boundary_rounds_up() {
        // grown local rect spans 80..144: min is exactly 2.5 tiles, size 2 tiles
        let view = View::new(vec2(112.0, 112.0), vec2(0.0, 0.0));
        let rect = visible_grid_rect(&view, &Mat3::IDENTITY, uvec2(100, 100), uvec2(32, 32));
        assert_eq!(rect, GridRect::new(ivec2(3, 3), ivec2(5, 5)));
    }

    #[test]
    fn layer_extent_beyond_u32_does_not_overflow() {
        let layer = uvec2(65_536, 65_536);
        let view = View::new(vec2(100_000.0, 100_000.0), vec2(10.0, 10.0));
        let rect = visible_grid_rect(&view, &Mat3::IDENTITY, layer, uvec2(65_536, 65_536));
        assert_eq!(rect, GridRect::new(ivec2(1, 1), ivec2(3, 3)));
    }

    #[test]
    fn huge_view_is_clamped_to_layer() {
        let layer = uvec2(10, 5);
        let view = View::new(vec2(0.0, 0.0), vec2(10_000.0, 10_000.0));
        let rect = visible_grid_rect(&view, &Mat3::IDENTITY, layer, uvec2(16, 16));
        assert_eq!(rect, GridRect::full(layer));
    }

    #[test]
    fn view_far_away_is_empty() {
        let view = View::new(vec2(-5000.0, -5000.0), vec2(100.0, 100.0));
        let rect = visible_grid_rect(&view, &Mat3::IDENTITY, uvec2(10, 10), uvec2(16, 16));
        assert_eq!(rect, GridRect::EMPTY);
    }

    #[test]
    fn zero_tile_size_is_empty() {
        let view = View::new(vec2(0.0, 0.0), vec2(100.0, 100.0));
        let rect = visible_grid_rect(&view, &Mat3::IDENTITY, uvec2(10, 10), uvec2(0, 16));
        assert_eq!(rect, GridRect::EMPTY);
    }

    #[test]
    fn inverse_transform_moves_view_into_layer_space() {
        // layer placed at (1000, 1000) in world space
        let transform = Mat3::from_translation(vec2(1000.0, 1000.0));
        let view = View::new(vec2(1000.0, 1000.0), vec2(10.0, 10.0));
        let rect = visible_grid_rect(&view, &transform.inverse(), uvec2(50, 50), uvec2(10, 10));
        assert_eq!(rect.min, ivec2(0, 0));
        assert!(rect.max.x < 5);
    }
}

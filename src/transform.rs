use macroquad::math::{vec2, Mat3, Rect, Vec2};

/// Reference point of a bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Position of the anchor relative to a box, `(0,0)` top-left to `(1,1)` bottom-right.
    pub fn fraction(self) -> Vec2 {
        match self {
            Anchor::TopLeft => vec2(0.0, 0.0),
            Anchor::TopCenter => vec2(0.5, 0.0),
            Anchor::TopRight => vec2(1.0, 0.0),
            Anchor::CenterLeft => vec2(0.0, 0.5),
            Anchor::Center => vec2(0.5, 0.5),
            Anchor::CenterRight => vec2(1.0, 0.5),
            Anchor::BottomLeft => vec2(0.0, 1.0),
            Anchor::BottomCenter => vec2(0.5, 1.0),
            Anchor::BottomRight => vec2(1.0, 1.0),
        }
    }
}

/// Origin, position, rotation and scale of a drawable in 2D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformable {
    pub origin: Vec2,
    pub position: Vec2,
    /// Radians.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transformable {
    fn default() -> Self {
        Transformable {
            origin: Vec2::ZERO,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transformable {
    /// Local to world: the origin lands on `position`, scaled then rotated around it.
    pub fn transform(&self) -> Mat3 {
        Mat3::from_scale_angle_translation(self.scale, self.rotation, self.position)
            * Mat3::from_translation(-self.origin)
    }

    pub fn inverse_transform(&self) -> Mat3 {
        self.transform().inverse()
    }

    pub fn set_origin_from_anchor_and_bounds(&mut self, anchor: Anchor, bounds: Rect) {
        self.origin = bounds.point() + anchor.fraction() * bounds.size();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        let t = Transformable::default();
        assert_eq!(t.transform(), Mat3::IDENTITY);
    }

    #[test]
    fn origin_maps_to_position() {
        let t = Transformable {
            origin: vec2(10.0, 20.0),
            position: vec2(100.0, 100.0),
            rotation: 1.0,
            scale: vec2(2.0, 3.0),
        };
        let p = t.transform().transform_point2(t.origin);
        assert!((p - t.position).length() < 1e-4);

        let back = t.inverse_transform().transform_point2(p);
        assert!((back - t.origin).length() < 1e-4);
    }

    #[test]
    fn anchor_sets_origin_inside_bounds() {
        let mut t = Transformable::default();
        let bounds = Rect::new(0.0, 0.0, 64.0, 32.0);
        t.set_origin_from_anchor_and_bounds(Anchor::Center, bounds);
        assert_eq!(t.origin, vec2(32.0, 16.0));
        t.set_origin_from_anchor_and_bounds(Anchor::BottomRight, bounds);
        assert_eq!(t.origin, vec2(64.0, 32.0));
    }
}

use bitflags::bitflags;

bitflags! {
    /// Mirroring applied to a tile's texture sampling (never to its geometry).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Flip: u8 {
        const HORIZONTAL = 1 << 0;
        const VERTICAL   = 1 << 1;
        const DIAGONAL   = 1 << 2;
    }
}

pub const FLIP_H: u32 = 0x8000_0000; // bit 31
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
pub const GID_MASK: u32 = 0x1FFF_FFFF; // keep lower 29 bits (bit 28 is free)

/// A raw Tiled global tile id, flip flags included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileGid(pub u32);

impl TileGid {
    #[inline] pub fn raw(self) -> u32 { self.0 }
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }

    /// The flip set encoded in the high bits.
    pub fn flip(self) -> Flip {
        let mut flip = Flip::empty();
        flip.set(Flip::HORIZONTAL, self.flip_h());
        flip.set(Flip::VERTICAL, self.flip_v());
        flip.set(Flip::DIAGONAL, self.flip_d());
        flip
    }

    /// Re-encode a clean gid with a flip set.
    pub fn with_flip(gid: u32, flip: Flip) -> Self {
        let mut raw = gid & GID_MASK;
        if flip.contains(Flip::HORIZONTAL) {
            raw |= FLIP_H;
        }
        if flip.contains(Flip::VERTICAL) {
            raw |= FLIP_V;
        }
        if flip.contains(Flip::DIAGONAL) {
            raw |= FLIP_D;
        }
        TileGid(raw)
    }
}

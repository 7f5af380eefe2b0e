use macroquad::math::UVec2;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for tile layer loading and checked grid access
#[derive(Debug, Error)]
pub enum TileLayerError {
    /// File I/O error
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON parse error
    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// JSON parse error in an in-memory document
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// The map file is not something we can read
    #[error("invalid map: {0}")]
    InvalidMap(String),
    /// No matching tile layer was found in the map JSON
    #[error("no matching tile layer found in map JSON")]
    NoLayer,
    /// A layer's data length does not match width * height
    #[error("invalid size for layer '{layer}': expected {expected} tiles, found {actual}")]
    InvalidLayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },
    /// A gid refers to a tile before the tileset's first gid
    #[error("layer '{layer}' references gid {gid}, below first gid {first_gid}")]
    InvalidTileGid {
        layer: String,
        gid: u32,
        first_gid: u32,
    },
    /// Grid access outside `[0, width) x [0, height)`
    #[error("cell {position} is out of bounds for a layer of size {size}")]
    OutOfBounds { position: UVec2, size: UVec2 },
    /// The tileset texture failed to load
    #[error("failed to load texture: {0}")]
    Texture(String),
}

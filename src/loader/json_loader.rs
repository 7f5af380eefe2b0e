// src/loader/json_loader.rs
use crate::error::TileLayerError;
use crate::layer::TileLayer;
use crate::render::placement::{Orientation, StaggerIndex};
use crate::spatial::flip::TileGid;
use crate::spatial::grid::Cell;
use crate::tileset::Tileset;
use log::warn;
use macroquad::math::{uvec2, UVec2};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" expected here
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct JsonMap {
    #[serde(default)]
    orientation: String,
    #[serde(default)]
    staggeraxis: Option<String>,
    #[serde(default)]
    staggerindex: Option<String>,
    tilewidth: u32,
    tileheight: u32,
    layers: Vec<JsonLayer>,
}

/// One tile layer of a Tiled JSON map, decoded and validated.
#[derive(Debug, Clone)]
pub struct TileLayerDesc {
    pub name: String,
    pub visible: bool,
    pub layer_size: UVec2,
    pub tile_size: UVec2,
    pub orientation: Orientation,
    pub stagger_index: StaggerIndex,
    /// Row-major, `layer_size.x * layer_size.y` long.
    pub cells: Vec<Cell>,
}

impl TileLayerDesc {
    pub fn into_layer<S: Tileset>(self, tileset: S) -> TileLayer<S> {
        let mut layer = TileLayer::new(self.layer_size, self.orientation, tileset);
        layer.set_tile_size(self.tile_size);
        layer.set_stagger_index(self.stagger_index);

        let width = self.layer_size.x.max(1);
        for (idx, cell) in self.cells.into_iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let idx = idx as u32;
            layer.set_tile(uvec2(idx % width, idx / width), cell.tile, cell.flip);
        }
        layer
    }
}

fn orientation_from_json(map: &JsonMap) -> Orientation {
    match map.orientation.as_str() {
        "orthogonal" => Orientation::Orthogonal,
        "staggered" if map.staggeraxis.as_deref().unwrap_or("y") == "y" => Orientation::Staggered,
        "staggered" => {
            warn!("staggered maps along the x axis are not supported");
            Orientation::Unknown
        }
        other => {
            warn!("unsupported map orientation '{other}'");
            Orientation::Unknown
        }
    }
}

fn cell_from_gid(layer: &str, raw_gid: u32, first_gid: u32) -> Result<Cell, TileLayerError> {
    let gid = TileGid(raw_gid);
    let clean = gid.clean();
    if clean == 0 {
        return Ok(Cell::EMPTY);
    }
    if clean < first_gid {
        return Err(TileLayerError::InvalidTileGid {
            layer: layer.to_owned(),
            gid: clean,
            first_gid,
        });
    }
    Ok(Cell {
        tile: clean - first_gid,
        flip: gid.flip(),
    })
}

/// Decode the first tile layer (named `layer_name`, if given) of a Tiled JSON map.
///
/// Gids are made relative to `first_gid`, the first gid of the layer's tileset.
pub fn decode_tile_layer(
    json: &str,
    layer_name: Option<&str>,
    first_gid: u32,
) -> Result<TileLayerDesc, TileLayerError> {
    let map: JsonMap = serde_json::from_str(json)?;
    decode_map(map, layer_name, first_gid)
}

pub fn load_tile_layer_file<P: AsRef<Path>>(
    path: P,
    layer_name: Option<&str>,
    first_gid: u32,
) -> Result<TileLayerDesc, TileLayerError> {
    let p = path.as_ref();
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(TileLayerError::InvalidMap(format!(
            "Map file must be a JSON file: {}",
            p.display()
        )));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| TileLayerError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let map: JsonMap = serde_json::from_str(&txt).map_err(|source| TileLayerError::Json {
        path: p.to_path_buf(),
        source,
    })?;

    decode_map(map, layer_name, first_gid)
}

fn decode_map(
    map: JsonMap,
    layer_name: Option<&str>,
    first_gid: u32,
) -> Result<TileLayerDesc, TileLayerError> {
    let orientation = orientation_from_json(&map);
    let stagger_index = match map.staggerindex.as_deref() {
        Some("even") => StaggerIndex::Even,
        _ => StaggerIndex::Odd,
    };
    let tile_size = uvec2(map.tilewidth, map.tileheight);

    let layer = map
        .layers
        .into_iter()
        .filter(|l| l.kind.as_deref().unwrap_or("tilelayer") == "tilelayer")
        .find(|l| layer_name.map_or(true, |name| l.name == name))
        .ok_or(TileLayerError::NoLayer)?;

    let expected = layer.width as usize * layer.height as usize;
    if layer.data.len() != expected {
        return Err(TileLayerError::InvalidLayerSize {
            layer: layer.name,
            expected,
            actual: layer.data.len(),
        });
    }

    let cells = layer
        .data
        .iter()
        .map(|&gid| cell_from_gid(&layer.name, gid, first_gid))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TileLayerDesc {
        name: layer.name,
        visible: layer.visible,
        layer_size: uvec2(layer.width, layer.height),
        tile_size,
        orientation,
        stagger_index,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::flip::{Flip, FLIP_D, FLIP_H};
    use crate::spatial::grid::NO_TILE;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock went backwards")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("mq_tile_layer_{nanos}"));
        fs::create_dir_all(&dir).expect("failed to create temp dir");
        dir
    }

    fn map_json(orientation: &str, data: &str) -> String {
        format!(
            r#"{{
              "orientation": "{orientation}",
              "staggeraxis": "y",
              "staggerindex": "even",
              "tilewidth": 32,
              "tileheight": 16,
              "layers": [
                {{ "type": "objectgroup", "name": "spawns", "objects": [] }},
                {{ "type": "tilelayer", "name": "ground", "width": 2, "height": 2, "data": {data} }}
              ]
            }}"#
        )
    }

    #[test]
    fn decodes_gids_and_flip_bits() {
        let data = format!("[0, 1, {}, 3]", FLIP_H | FLIP_D | 2);
        let desc = decode_tile_layer(&map_json("staggered", &data), None, 1).expect("decode");

        assert_eq!(desc.name, "ground");
        assert_eq!(desc.layer_size, uvec2(2, 2));
        assert_eq!(desc.tile_size, uvec2(32, 16));
        assert_eq!(desc.orientation, Orientation::Staggered);
        assert_eq!(desc.stagger_index, StaggerIndex::Even);
        assert_eq!(desc.cells[0].tile, NO_TILE);
        assert_eq!(desc.cells[1], Cell { tile: 0, flip: Flip::empty() });
        assert_eq!(
            desc.cells[2],
            Cell { tile: 1, flip: Flip::HORIZONTAL | Flip::DIAGONAL }
        );
    }

    #[test]
    fn unsupported_orientation_is_unknown() {
        let desc = decode_tile_layer(&map_json("isometric", "[0,0,0,0]"), None, 1).expect("decode");
        assert_eq!(desc.orientation, Orientation::Unknown);
    }

    #[test]
    fn returns_typed_error_for_size_mismatch() {
        let err = decode_tile_layer(&map_json("orthogonal", "[1,2,3]"), None, 1)
            .err()
            .expect("expected decode error");
        assert!(matches!(
            err,
            TileLayerError::InvalidLayerSize { layer, expected: 4, actual: 3 } if layer == "ground"
        ));
    }

    #[test]
    fn returns_typed_error_for_gid_below_first_gid() {
        let err = decode_tile_layer(&map_json("orthogonal", "[0,0,0,3]"), None, 10)
            .err()
            .expect("expected decode error");
        assert!(matches!(err, TileLayerError::InvalidTileGid { gid: 3, first_gid: 10, .. }));
    }

    #[test]
    fn returns_no_layer_for_unknown_name() {
        let err = decode_tile_layer(&map_json("orthogonal", "[0,0,0,0]"), Some("sky"), 1)
            .err()
            .expect("expected decode error");
        assert!(matches!(err, TileLayerError::NoLayer));
    }

    #[test]
    fn returns_typed_error_for_malformed_json() {
        let err = decode_tile_layer("{ not json", None, 1)
            .err()
            .expect("expected decode error");
        assert!(matches!(err, TileLayerError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = temp_dir();
        let map_path = dir.join("map.json");
        fs::write(&map_path, map_json("orthogonal", "[1,1,0,1]")).expect("failed to write map");

        let desc = load_tile_layer_file(&map_path, Some("ground"), 1).expect("load");
        assert_eq!(desc.cells.iter().filter(|c| !c.is_empty()).count(), 3);
    }

    #[test]
    fn file_errors_carry_path() {
        let dir = temp_dir();
        let missing = dir.join("missing.json");
        let err = load_tile_layer_file(&missing, None, 1)
            .err()
            .expect("expected load error");
        assert!(matches!(err, TileLayerError::Io { path, .. } if path == missing));

        let bad = dir.join("bad.json");
        fs::write(&bad, "{ not json").expect("failed to write map");
        let err = load_tile_layer_file(&bad, None, 1)
            .err()
            .expect("expected load error");
        assert!(matches!(err, TileLayerError::Json { .. }));

        let err = load_tile_layer_file("level.tmx", None, 1)
            .err()
            .expect("expected load error");
        assert!(matches!(err, TileLayerError::InvalidMap(_)));
    }
}

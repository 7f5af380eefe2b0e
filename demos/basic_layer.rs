use macroquad::math::uvec2;
use macroquad::prelude::*;
use macroquad_tile_layer::{
    AtlasTileset, Flip, MacroquadTarget, Orientation, RenderStates, TileLayer,
};

const ATLAS_TILES: u32 = 4;
const TILE: u32 = 16;

fn window_conf() -> Conf {
    Conf {
        window_title: "Tile Layer".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// 4x4 atlas of flat-colored tiles with a dark corner mark, so flips are visible.
fn generated_atlas() -> Texture2D {
    let side = (ATLAS_TILES * TILE) as usize;
    let mut bytes = vec![0u8; side * side * 4];
    for y in 0..side {
        for x in 0..side {
            let tile = (y / TILE as usize) * ATLAS_TILES as usize + x / TILE as usize;
            let (lx, ly) = (x % TILE as usize, y % TILE as usize);
            let shade = if lx < 4 && ly < 4 { 40 } else { 255 };
            let i = (y * side + x) * 4;
            bytes[i] = ((tile * 53) % 256) as u8 & shade;
            bytes[i + 1] = ((tile * 97) % 256) as u8 & shade;
            bytes[i + 2] = ((tile * 151) % 256) as u8 & shade;
            bytes[i + 3] = 255;
        }
    }
    let texture = Texture2D::from_rgba8(side as u16, side as u16, &bytes);
    texture.set_filter(FilterMode::Nearest);
    texture
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut tileset = AtlasTileset::new(uvec2(TILE, TILE));
    tileset.set_texture(generated_atlas());

    let size = uvec2(512, 512);
    let mut layer = TileLayer::new(size, Orientation::Orthogonal, tileset);
    layer.set_tile_size(uvec2(TILE, TILE));
    for y in 0..size.y {
        for x in 0..size.x {
            let tile = (x / 3 + y / 5) % (ATLAS_TILES * ATLAS_TILES);
            let flip = Flip::from_bits_truncate(((x ^ y) % 8) as u8);
            layer.set_tile(uvec2(x, y), tile, flip);
        }
    }

    let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, 640.0, 360.0));

    loop {
        clear_background(BLACK);

        let t = get_time() as f32;
        camera.target = vec2(4096.0 + 1500.0 * (t * 0.1).cos(), 4096.0 + 1500.0 * (t * 0.13).sin());
        camera.rotation = 10.0 * (t * 0.2).sin();
        set_camera(&camera);

        let mut target = MacroquadTarget::from_camera(&camera);
        layer.draw(&mut target, &RenderStates::default());

        set_default_camera();
        draw_text(
            &format!(
                "FPS: {}  vertices: {}  rebuilds: {}",
                get_fps(),
                layer.vertices().len(),
                layer.geometry_revision()
            ),
            20.0,
            30.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}

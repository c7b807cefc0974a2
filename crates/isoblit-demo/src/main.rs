//! Host demo: drives the scene renderer against an in-memory storage
//! backend and a recording display, printing per-frame I/O statistics
//! so the incremental-redraw savings are visible.

use std::process;

use isoblit_bitmap::mem::synth_bitmap;
use isoblit_bitmap::MemStorage;
use isoblit_core::config::{TILE_HEIGHT, TILE_WIDTH};
use isoblit_core::geom::{world_to_screen, ScreenVec, WorldVec};
use isoblit_render::{NoInterrupts, RecordingDisplay, Renderer};
use isoblit_scene::{Scene, Sprite, TileKind, TilePos, Tilemap};

const GRASS: &str = "GRASS.BMP";
const WATER: &str = "WATER.BMP";
const STONE: &str = "STONE.BMP";
const PLAYER: &str = "PLAYER.BMP";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut frames = 8usize;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                frames = args[i].parse().expect("invalid --frames value");
            }
            "--help" | "-h" => {
                eprintln!("Usage: isoblit-demo [OPTIONS]");
                eprintln!("  --frames <n>   Frames to simulate (default: 8)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut renderer = Renderer::new(RecordingDisplay::new(), demo_storage(), NoInterrupts);

    let grass = renderer.register_bitmap(GRASS).expect("catalog slot");
    let water = renderer.register_bitmap(WATER).expect("catalog slot");
    let stone = renderer.register_bitmap(STONE).expect("catalog slot");
    let player = renderer.register_bitmap(PLAYER).expect("catalog slot");

    let mut map = Tilemap::new();
    map.bind_kind(TileKind::new(0).unwrap(), grass);
    map.bind_kind(TileKind::new(1).unwrap(), water);
    map.bind_kind(TileKind::new(2).unwrap(), stone);
    map.fill(|pos| border_or_grass(pos));
    map.set(TilePos::new(2, 3).unwrap(), TileKind::new(1).unwrap());

    renderer.set_active_scene(Scene::new(map));

    let path: Vec<WorldVec> = (0..5i16).map(|y| WorldVec::new(2, y)).collect();
    let sprite_id = renderer
        .add_sprite(Sprite::new(
            world_to_screen(path[0]),
            ScreenVec::new(16, 16),
            player,
        ))
        .expect("sprite slot");

    println!("frame | mode        | windows | pixels | opens | reads");
    println!("------+-------------+---------+--------+-------+------");

    for frame in 0..frames {
        if frame > 0 {
            let step = path[frame % path.len()];
            renderer.move_sprite(sprite_id, world_to_screen(step));
        }

        renderer.render_frame();
        renderer.draw_integer(4, 4, 2, false, frame as i32);

        let mode = if frame == 0 { "full" } else { "incremental" };
        println!(
            "{:>5} | {:<11} | {:>7} | {:>6} | {:>5} | {:>5}",
            frame,
            mode,
            renderer.display().windows().len(),
            renderer.display().pixel_writes(),
            renderer.storage().opens(),
            renderer.storage().reads(),
        );

        renderer.display_mut().reset();
        renderer.storage_mut().reset_counters();
    }

    log::info!("demo complete: {frames} frames");
}

fn border_or_grass(pos: TilePos) -> TileKind {
    use isoblit_core::config::{TILEMAP_HEIGHT, TILEMAP_WIDTH};
    let edge = pos.x() == 0
        || pos.y() == 0
        || pos.x() == TILEMAP_WIDTH - 1
        || pos.y() == TILEMAP_HEIGHT - 1;
    if edge {
        TileKind::new(2).unwrap()
    } else {
        TileKind::new(0).unwrap()
    }
}

fn demo_storage() -> MemStorage {
    let mut storage = MemStorage::new();
    let tw = TILE_WIDTH as u32;
    let th = TILE_HEIGHT as u32;
    storage.insert(GRASS, diamond_tile(tw, th, (30, 170, 60)));
    storage.insert(WATER, diamond_tile(tw, th, (40, 90, 210)));
    storage.insert(STONE, diamond_tile(tw, th, (130, 130, 140)));
    storage.insert(
        PLAYER,
        synth_bitmap(16, 16, |x, y| {
            // Round-ish blob with chroma-keyed corners.
            let dx = x as i32 * 2 - 15;
            let dy = y as i32 * 2 - 15;
            if dx * dx + dy * dy <= 15 * 15 {
                (230, 60, 50)
            } else {
                (0, 0, 0)
            }
        }),
    );
    storage
}

/// Diamond-masked tile bitmap; pixels outside the diamond carry the
/// transparency key.
fn diamond_tile(width: u32, height: u32, fill: (u8, u8, u8)) -> Vec<u8> {
    synth_bitmap(width, height, move |x, y| {
        let dx = (x as i32 * 2 + 1 - width as i32).unsigned_abs();
        let dy = (y as i32 * 2 + 1 - height as i32).unsigned_abs();
        if dx * height + dy * width <= width * height {
            fill
        } else {
            (0, 0, 0)
        }
    })
}

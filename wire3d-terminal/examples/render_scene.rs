/// Example: Render a single frame of a scene file as plain text
///
/// Usage: cargo run --example render_scene -- path/to/scene.json [width] [height] [seconds]
///        [commands...]
///
/// Trailing arguments are navigation commands (`moveForward`, `rotate-left`, ...)
/// applied to the camera before rendering.

use anyhow::{Context, Result};
use std::env;
use wire3d_core::{draw_scene, navigate, update_transforms, Navigation, Scene};
use wire3d_terminal::{AsciiRenderer, DEMO_SCENE};

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mut scene = match args.get(1) {
        Some(path) => Scene::load(path).with_context(|| format!("Failed to load scene {}", path))?,
        None => {
            eprintln!("Usage: {} <scene.json> [width] [height] [seconds] [commands...]", args[0]);
            eprintln!("\nNo scene file provided, using the demo scene...");
            Scene::from_json(DEMO_SCENE)?
        }
    };

    let width = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(100);
    let height = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(40);
    let seconds: f64 = args.get(4).map(|s| s.parse()).transpose()?.unwrap_or(0.0);

    for arg in args.iter().skip(5) {
        let command: Navigation = arg.parse().map_err(anyhow::Error::msg)?;
        navigate(&mut scene.view, command)?;
    }

    update_transforms(&mut scene, seconds);

    let mut canvas = AsciiRenderer::new(width, height);
    draw_scene(&scene, &mut canvas)?;
    print!("{}", canvas.to_text());

    Ok(())
}

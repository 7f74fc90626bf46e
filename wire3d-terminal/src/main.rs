/// wire3d Terminal Demo - Perspective wireframe viewer
///
/// Controls:
///   - Left/Right Arrows: Rotate the camera
///   - W/S: Move forward/backward
///   - A/D: Move left/right
///   - Space: Toggle animation
///   - R: Reload the scene file
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use wire3d_core::{navigate, Scene};
use wire3d_terminal::{cli::Cli, TerminalApp, DEMO_SCENE};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut scene = match &cli.scene {
        Some(path) => {
            Scene::load(path).with_context(|| format!("Failed to load scene {:?}", path))?
        }
        None => Scene::from_json(DEMO_SCENE).context("Built-in demo scene is invalid")?,
    };
    info!("Loaded scene with {} models", scene.models.len());

    for &command in &cli.commands {
        navigate(&mut scene.view, command).with_context(|| format!("Cannot apply {}", command))?;
    }

    let mut app = TerminalApp::new(scene, cli.scene.clone(), cli.options())?;
    app.run()?;

    Ok(())
}

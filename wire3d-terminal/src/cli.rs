/// Command-line configuration
use clap::Parser;
use std::path::PathBuf;
use wire3d_core::Navigation;

use crate::AppOptions;

#[derive(Parser, Debug, Clone)]
#[command(name = "wire3d-terminal")]
#[command(about = "Perspective wireframe renderer for the terminal", long_about = None)]
pub struct Cli {
    /// Scene description (JSON); the built-in demo scene is used when omitted
    pub scene: Option<PathBuf>,

    /// Start with model animation running
    #[arg(long, default_value = "false")]
    pub animate: bool,

    /// Target frame rate of the render loop
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Navigation step applied to the camera before the first frame (repeatable),
    /// e.g. `--command moveForward --command rotate-left`
    #[arg(long = "command", value_name = "COMMAND")]
    pub commands: Vec<Navigation>,
}

impl Cli {
    pub fn options(&self) -> AppOptions {
        AppOptions {
            animate: self.animate,
            fps: self.fps,
        }
    }
}

/// Terminal host for the wireframe renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{error, info, warn};
use std::io::{self, stdout, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use wire3d_core::{
    draw_scene, navigate, update_transforms, FrameClock, Navigation, Scene, SceneError,
};

pub mod cli;
pub mod renderer;

pub use renderer::AsciiRenderer;

/// Scene shown when no file is given: the house wireframe with a few spinning primitives
pub const DEMO_SCENE: &str = include_str!("../scenes/demo.json");

/// Rows reserved above the canvas for the status line
const STATUS_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppOptions {
    pub animate: bool,
    pub fps: u32,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            animate: false,
            fps: 30,
        }
    }
}

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(Navigation),
    Reload,
    ToggleAnimation,
    Quit,
}

/// Key bindings: arrows rotate, WASD moves
pub fn action_for(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Left => Action::Navigate(Navigation::RotateLeft),
        KeyCode::Right => Action::Navigate(Navigation::RotateRight),
        KeyCode::Char('a') => Action::Navigate(Navigation::MoveLeft),
        KeyCode::Char('d') => Action::Navigate(Navigation::MoveRight),
        KeyCode::Char('w') => Action::Navigate(Navigation::MoveForward),
        KeyCode::Char('s') => Action::Navigate(Navigation::MoveBackward),
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char(' ') => Action::ToggleAnimation,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Load `path` and swap it in for `scene`, restarting `clock`.
///
/// The file is parsed completely before anything is replaced, so on error
/// both `scene` and `clock` are left as they were.
pub fn reload_from(
    scene: &mut Scene,
    clock: &mut FrameClock,
    path: &Path,
) -> Result<(), SceneError> {
    let loaded = Scene::load(path)?;
    info!("Reloaded scene from {:?} ({} models)", path, loaded.models.len());
    *scene = loaded;
    clock.reset();
    Ok(())
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    scene_path: Option<PathBuf>,
    renderer: AsciiRenderer,
    clock: FrameClock,
    epoch: Instant,
    options: AppOptions,
    running: bool,
    dirty: bool,
    status: String,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, scene_path: Option<PathBuf>, options: AppOptions) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            scene,
            scene_path,
            renderer: AsciiRenderer::new(
                width as usize,
                height.saturating_sub(STATUS_ROWS) as usize,
            ),
            clock: FrameClock::new(),
            epoch: Instant::now(),
            options,
            running: true,
            dirty: true,
            status: String::new(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs_f64(1.0 / self.options.fps.max(1) as f64);

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            if self.options.animate {
                self.update();
            }

            // Render only when something changed
            if self.dirty {
                self.render()?;
                self.dirty = false;
                self.frame_count += 1;
            }

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if let Some(action) = action_for(code) {
                    self.apply(action);
                }
            }
            Event::Resize(width, height) => {
                self.renderer
                    .resize(width as usize, height.saturating_sub(STATUS_ROWS) as usize);
                self.dirty = true;
            }
            _ => {}
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleAnimation => {
                self.options.animate = !self.options.animate;
                self.status = if self.options.animate {
                    "animation on".to_string()
                } else {
                    "animation paused".to_string()
                };
                self.dirty = true;
            }
            Action::Navigate(command) => {
                if let Err(e) = navigate(&mut self.scene.view, command) {
                    warn!("Ignoring {}: {}", command, e);
                    self.status = format!("{} ignored: {}", command, e);
                }
                self.dirty = true;
            }
            Action::Reload => self.reload(),
        }
    }

    /// Replace the scene with a freshly loaded one; on failure the current scene stays
    fn reload(&mut self) {
        let Some(path) = self.scene_path.clone() else {
            self.status = "no scene file to reload".to_string();
            self.dirty = true;
            return;
        };

        match reload_from(&mut self.scene, &mut self.clock, &path) {
            Ok(()) => self.status = format!("reloaded {}", path.display()),
            Err(e) => {
                error!("Failed to reload {:?}: {}", path, e);
                self.status = format!("reload failed: {}", e);
            }
        }
        self.dirty = true;
    }

    fn update(&mut self) {
        let elapsed = self.clock.tick(self.epoch.elapsed());
        update_transforms(&mut self.scene, elapsed);
        self.dirty = true;
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        // Render scene
        if let Err(e) = draw_scene(&self.scene, &mut self.renderer) {
            self.status = format!("cannot render: {}", e);
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, STATUS_ROWS))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let view = &self.scene.view;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wire3d | FPS: {:.1} | eye ({:.1}, {:.1}, {:.1}) | Arrows=Rotate WASD=Move Space=Animate R=Reload Q=Quit | {}",
                self.fps, view.eye.x, view.eye.y, view.eye.z, self.status
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

mod renderer;

use std::{
    io::{Stdout, Write},
    path::Path,
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

pub use renderer::{CELL_HEIGHT, CELL_WIDTH, Palette, Renderer};

use crate::{
    generators::{Generator, MazeGenerator},
    maze::{CellFlag, CellId, Grid},
    solvers::{longest_path, mark_path},
};

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    pub rows: usize,
    pub columns: usize,
    pub generator: Generator,
    pub seed: Option<u64>,
}

#[derive(Debug)]
enum UserActionEvent {
    /// Toggle pause/resume
    TogglePause,
    /// Run a single step while paused
    Forward,
    /// Increase animation speed
    SpeedUp,
    /// Decrease animation speed
    SlowDown,
    /// Terminal resize
    Resize,
    /// Cancel rendering
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
}

/// Animation settings for the terminal visualizer.
pub struct App {
    /// Time between two generation steps
    frame_delay: Duration,
    /// Fastest allowed frame delay when speeding up
    min_frame_delay: Duration,
    /// Slowest allowed frame delay when slowing down
    max_frame_delay: Duration,
    /// How often to poll for input while paused
    input_poll_timeout: Duration,
    /// Highlight the longest path once the maze is done
    solve: bool,
    palette: Palette,
}

impl Default for App {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(30),
            min_frame_delay: Duration::from_millis(1),
            max_frame_delay: Duration::from_millis(1000),
            input_poll_timeout: Duration::from_millis(100),
            solve: true,
            palette: Palette::default(),
        }
    }
}

impl App {
    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay.clamp(self.min_frame_delay, self.max_frame_delay);
        self
    }

    pub fn with_solve(mut self, solve: bool) -> Self {
        self.solve = solve;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set a panic hook to restore terminal state on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to its previous state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Animates the generation of one maze, then highlights its longest path and waits
    /// for Esc. Expects the terminal to be set up with [`App::setup_terminal`].
    pub fn run(&self, stdout: &mut Stdout, config: MazeConfig) -> std::io::Result<RunStatus> {
        let mut grid = Grid::new(config.rows, config.columns)?;
        let mut renderer = Renderer::new(&mut *stdout, self.palette);

        if !App::check_size(&grid)? {
            return Ok(RunStatus::Cancelled);
        }
        renderer.render(&mut grid)?;

        tracing::info!(
            "Started animation of {} on a {}x{} grid",
            config.generator,
            config.rows,
            config.columns
        );
        let status = {
            let mut algorithm = config.generator.build(&mut grid, config.seed);
            self.animate(&mut renderer, &mut *algorithm)?
        };
        if status == RunStatus::Cancelled {
            tracing::info!("Animation was cancelled by user.");
            return Ok(status);
        }
        grid.clear_flag(CellFlag::Active);

        let (width, _) = terminal::size()?;
        let mut message = format!("{} done.", config.generator);
        if self.solve {
            let path = longest_path(&grid)?;
            mark_path(&mut grid, &path);
            message = format!("{} Longest path: {} cells.", message, path.len());
        }
        renderer.render(&mut grid)?;
        renderer.status(&grid, &format!("{} Press Esc to exit...", message), width)?;
        renderer.finish(&grid)?;

        App::wait_for_esc()?;
        Ok(RunStatus::Completed)
    }

    /// Step loop: one generation step per frame, with pause, single-step and speed
    /// control from the keyboard.
    fn animate<W: Write, G: MazeGenerator + ?Sized>(
        &self,
        renderer: &mut Renderer<W>,
        algorithm: &mut G,
    ) -> std::io::Result<RunStatus> {
        let mut frame_delay = self.frame_delay;
        let mut is_paused = false;
        let mut highlighted: Vec<CellId> = Vec::new();
        let mut steps = 0usize;
        let started = Instant::now();

        let mut more = !algorithm.is_complete();
        while more {
            let timeout = if is_paused {
                self.input_poll_timeout
            } else {
                frame_delay
            };
            let mut single_step = false;
            match App::poll_user_action(timeout)? {
                Some(UserActionEvent::Cancel) => return Ok(RunStatus::Cancelled),
                Some(UserActionEvent::TogglePause) => {
                    is_paused = !is_paused;
                    tracing::debug!("[app loop] paused: {}", is_paused);
                }
                Some(UserActionEvent::Forward) if is_paused => single_step = true,
                Some(UserActionEvent::Forward) => {}
                Some(UserActionEvent::SpeedUp) => {
                    frame_delay = (frame_delay / 2).max(self.min_frame_delay);
                }
                Some(UserActionEvent::SlowDown) => {
                    frame_delay = (frame_delay * 2).min(self.max_frame_delay);
                }
                Some(UserActionEvent::Resize) => {
                    if !App::check_size(algorithm.grid())? {
                        return Ok(RunStatus::Cancelled);
                    }
                    renderer.invalidate();
                }
                None => {}
            }
            if is_paused && !single_step {
                continue;
            }

            more = algorithm.step();
            steps += 1;

            let frontier = algorithm.frontier().to_vec();
            let grid = algorithm.grid_mut();
            App::highlight(grid, &mut highlighted, frontier);
            renderer.render(grid)?;
        }

        for &cell in &highlighted {
            algorithm.grid_mut().set_active(cell, false);
        }
        tracing::info!(
            "{} finished after {} steps in {:?}",
            algorithm.name(),
            steps,
            started.elapsed()
        );
        Ok(RunStatus::Completed)
    }

    /// Moves the active highlight from the previous frontier to the new one.
    fn highlight(grid: &mut Grid, highlighted: &mut Vec<CellId>, frontier: Vec<CellId>) {
        for &cell in highlighted.iter() {
            grid.set_active(cell, false);
        }
        for &cell in &frontier {
            grid.set_active(cell, true);
        }
        *highlighted = frontier;
    }

    /// Poll for one user action, waiting at most `timeout`.
    fn poll_user_action(timeout: Duration) -> std::io::Result<Option<UserActionEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let action = match event::read()? {
            event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                match key_event.code {
                    KeyCode::Esc => {
                        tracing::debug!("[app loop] Esc key pressed, cancelling");
                        Some(UserActionEvent::Cancel)
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => Some(UserActionEvent::TogglePause),
                    KeyCode::Right => Some(UserActionEvent::Forward),
                    KeyCode::Up => Some(UserActionEvent::SpeedUp),
                    KeyCode::Down => Some(UserActionEvent::SlowDown),
                    _ => None, // Ignore other keys
                }
            }
            event::Event::Resize(_, _) => Some(UserActionEvent::Resize),
            _ => None,
        };
        Ok(action)
    }

    /// Check if terminal size is sufficient for the given grid.
    /// If not, display a message and wait for user to press Esc, then return Ok(false)
    fn check_size(grid: &Grid) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let (width, height) = Renderer::<Stdout>::required_size(grid);
        if term_width >= width && term_height >= height {
            return Ok(true);
        }
        tracing::warn!(
            "Terminal {}x{} is too small for a {}x{} maze",
            term_width,
            term_height,
            grid.columns(),
            grid.rows()
        );
        let mut stdout = std::io::stdout();
        let msg = format!(
            "Terminal size ({}x{}) is too small for the maze ({}x{} needed). Please resize the terminal or pick a smaller maze.\r\n",
            term_width, term_height, width, height
        );
        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        stdout.flush()?;
        App::wait_for_esc()?;
        Ok(false)
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Print the controls before the animation starts.
    pub fn print_controls(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(
            stdout,
            style::PrintStyledContent(
                "Controls:\r\n"
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
            ),
            style::PrintStyledContent("  Enter/Space: Pause/Resume animation\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  →: Single step when paused\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  ↑/↓: Speed up/slow down animation\r\n".with(Color::Cyan)),
            style::PrintStyledContent("  Esc: Exit\r\n\r\n".with(Color::Cyan)),
            style::PrintStyledContent("Press any key to start...".with(Color::Green)),
        )?;
        stdout.flush()?;
        // Any key press starts the animation
        loop {
            if let event::Event::Key(key_event) = event::read()? {
                if key_event.kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        stdout.execute(terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Generates a maze without any terminal interaction and returns its text form,
    /// followed by the longest path when solving is enabled.
    pub fn print(&self, config: MazeConfig) -> crate::Result<String> {
        let mut grid = Grid::new(config.rows, config.columns)?;
        config.generator.build(&mut grid, config.seed).create_maze();
        let mut text = grid.to_string();
        if self.solve {
            let path = longest_path(&grid)?;
            if let (Some(&start), Some(&goal)) = (path.first(), path.last()) {
                text.push_str(&format!(
                    "Longest path: {} cells from ({}, {}) to ({}, {})\n",
                    path.len(),
                    grid[start].row(),
                    grid[start].column(),
                    grid[goal].row(),
                    grid[goal].column()
                ));
            }
        }
        Ok(text)
    }

    /// Profiling mode: run every generator without rendering and log the timings
    pub fn profile(
        &self,
        rows: usize,
        columns: usize,
        num_iterations: Option<usize>,
    ) -> crate::Result<Vec<(Generator, Duration)>> {
        let iterations = num_iterations.unwrap_or(1).max(1);
        let mut timings = Vec::with_capacity(Generator::ALL.len());
        for generator in Generator::ALL {
            let started = Instant::now();
            for iteration in 0..iterations {
                let mut grid = Grid::new(rows, columns)?;
                generator
                    .build(&mut grid, Some(iteration as u64))
                    .create_maze();
                if self.solve {
                    longest_path(&grid)?;
                }
            }
            let elapsed = started.elapsed();
            tracing::info!(
                "[profile] {} x{} on {}x{}: {:?}",
                generator,
                iterations,
                rows,
                columns,
                elapsed
            );
            timings.push((generator, elapsed));
        }
        Ok(timings)
    }
}

/// Install a `tracing` subscriber that writes to `path` through a non-blocking
/// appender. The terminal belongs to the renderer, so logs never go to stdout.
/// Keep the returned guard alive until exit to flush pending lines.
pub fn init_tracing(
    path: &Path,
    level: tracing::Level,
) -> tracing_appender::non_blocking::WorkerGuard {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("amaze.log"));
    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}

mod effects;
mod logging;
mod page;

use std::env;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{self, SetTitle},
};
use log::{info, warn};
use mote_config::{Config, ThemeStore};
use mote_core::Palette;
use mote_field::{
    FieldState, FrameClock, PointerTracker, Scheme, Surface, SurfaceView, device_size, hsl_to_rgb,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::Rect,
    style::Stylize,
    text::Line,
};

use crate::page::{Page, PageAction};

/// Set to anything but "", "0" or "false" to start with the animation off.
const REDUCED_MOTION_ENV: &str = "MOTE_REDUCED_MOTION";
/// Device pixels per logical pixel when the terminal does not report its
/// pixel size: one device column per 8 logical px.
const DEFAULT_RATIO: f32 = 1.0 / 8.0;
/// Rows moved per wheel notch.
const WHEEL_ROWS: f32 = 3.0;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let config_path = Config::path();
    let config = Config::load_or_default(config_path.as_deref());
    let reduced_motion = config.reduced_motion || env_flag(env::var(REDUCED_MOTION_ENV).ok());
    info!(
        "starting: {} particles, {} fps, reduced motion {reduced_motion}",
        config.particle_count, config.fps
    );

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(color_eyre::Report::from)
        .and_then(|()| App::new(config, config_path, reduced_motion).run(terminal));
    let _ = execute!(stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    result
}

/// Whether an environment flag value turns the flag on.
fn env_flag(value: Option<String>) -> bool {
    value.is_some_and(|v| !matches!(v.trim(), "" | "0" | "false"))
}

/// Device pixels per logical pixel for the current terminal.
fn device_ratio() -> f32 {
    match terminal::window_size() {
        Ok(size) if size.width > 0 && size.columns > 0 => {
            f32::from(size.columns) / f32::from(size.width)
        }
        _ => DEFAULT_RATIO,
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    reduced_motion: bool,
    themes: ThemeStore,
    /// Active palette; only [`ThemeStore::toggle_theme`] replaces it.
    palette: Palette,
    /// Created once the terminal area is non-empty.
    field: Option<FieldState>,
    pointer: PointerTracker,
    clock: FrameClock,
    page: Page,
    ratio: f32,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, config_path: Option<PathBuf>, reduced_motion: bool) -> Self {
        let mut themes = ThemeStore::new(config_path);
        let palette = themes.apply_theme(themes.applied(), config.particle_count);
        Self {
            running: false,
            config,
            reduced_motion,
            themes,
            palette,
            field: None,
            pointer: PointerTracker::new(),
            clock: FrameClock::new(),
            page: Page::new(),
            ratio: device_ratio(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.set_title();
        let budget = Duration::from_millis(self.config.frame_budget_ms());
        while self.running {
            let deadline = Instant::now() + budget;
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(deadline)?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let tick = self.clock.tick();
        self.page.tick(tick.now_ms, area.height);

        let (width, height) = device_size(area);
        match &mut self.field {
            Some(field) => {
                field.resize(width, height, self.ratio, &self.palette);
            }
            None => {
                let base = Scheme::for_theme(self.palette.theme).base.opaque();
                self.field = Surface::new(width, height, self.ratio, base)
                    .map(|surface| FieldState::new(surface, &self.palette, self.reduced_motion));
            }
        }

        if let Some(field) = &mut self.field {
            let pointer = self.pointer.active(tick.now_ms, self.config.pointer_timeout_ms);
            field.advance(&self.palette, pointer, tick);
            frame.render_widget(SurfaceView::new(field.surface()), area);
        }

        self.page.render(area, frame.buffer_mut(), &self.palette);

        // Render help text
        if area.height > 0 {
            let color = hsl_to_rgb(self.palette.bg_hue, 0.7, 0.6);
            let help = Line::from(vec![
                "q".bold().fg(color),
                " quit  ".dark_gray(),
                "t".bold().fg(color),
                " theme  ".dark_gray(),
                "tab".bold().fg(color),
                " focus  ".dark_gray(),
                "↑↓".bold().fg(color),
                " scroll".dark_gray(),
            ])
            .centered();
            let row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            frame.render_widget(help, row);
        }
    }

    /// Reads the crossterm events until the frame deadline and updates the
    /// state of [`App`].
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.on_pointer_leave(),
                Event::Resize(_, _) => self.ratio = device_ratio(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Tab) => self.page.focus_next(),
            (_, KeyCode::BackTab) => self.page.focus_prev(),
            (_, KeyCode::Enter) => {
                let action = self.page.activate(self.clock.now_ms());
                self.on_page_action(action);
            }
            (_, KeyCode::Up | KeyCode::Char('k')) => self.page.scroll_by(-1.0),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.page.scroll_by(1.0),
            (_, KeyCode::PageUp) => self.page.scroll_pages(-1.0),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.page.scroll_pages(1.0),
            (_, KeyCode::Home | KeyCode::Char('g')) => self.page.scroll_to_top(),
            (_, KeyCode::End | KeyCode::Char('G')) => self.page.scroll_to_bottom(),
            _ => {}
        }
    }

    /// Handles mouse events: pointer tracking, clicks and the wheel.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                // Center of the cell, in logical px.
                let x = (f32::from(col) + 0.5) / self.ratio;
                let y = (f32::from(row) * 2.0 + 1.0) / self.ratio;
                self.pointer.move_to(x, y, self.clock.now_ms());
                self.page.hover(col, row);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let action = self.page.click(col, row, self.clock.now_ms());
                self.on_page_action(action);
            }
            MouseEventKind::ScrollUp => self.page.scroll_by(-WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.page.scroll_by(WHEEL_ROWS),
            _ => {}
        }
    }

    fn on_pointer_leave(&mut self) {
        self.pointer.clear();
        self.page.leave();
    }

    fn on_page_action(&mut self, action: Option<PageAction>) {
        match action {
            Some(PageAction::ToggleTheme) => self.toggle_theme(),
            None => {}
        }
    }

    /// Flip between dark and light, persisting the choice.
    fn toggle_theme(&mut self) {
        if let Err(err) = self.themes.toggle_theme(&mut self.palette) {
            warn!("failed to save theme preference: {err:#}");
        }
        if let Some(field) = &mut self.field {
            field.set_palette(&self.palette);
        }
        self.set_title();
    }

    /// Show the active theme in the terminal title.
    fn set_title(&self) {
        let title = format!("mote · {}", self.palette.theme);
        if let Err(err) = execute!(stdout(), SetTitle(title)) {
            warn!("failed to set terminal title: {err}");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_field::Pointer;

    #[test]
    fn test_env_flag() {
        assert!(!env_flag(None));
        assert!(!env_flag(Some(String::new())));
        assert!(!env_flag(Some("0".into())));
        assert!(!env_flag(Some(" false ".into())));
        assert!(env_flag(Some("1".into())));
        assert!(env_flag(Some("yes".into())));
    }

    #[test]
    fn test_theme_toggle_keeps_count() {
        let config = Config {
            particle_count: 12,
            ..Config::default()
        };
        let mut app = App::new(config, None, false);
        let before = app.palette;
        app.on_key_event(KeyEvent::from(KeyCode::Char('t')));
        assert_eq!(app.palette.theme, before.theme.toggle());
        assert_eq!(app.palette.count, 12);
        app.on_key_event(KeyEvent::from(KeyCode::Char('t')));
        assert_eq!(app.palette, before);
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_mouse_moves_pointer_to_cell_center() {
        let mut app = App::new(Config::default(), None, false);
        app.ratio = 0.125;

        app.on_mouse_event(mouse(MouseEventKind::Moved, 3, 2));
        assert_eq!(app.pointer.position(), Some(Pointer { x: 28.0, y: 40.0 }));

        app.on_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0));
        assert_eq!(app.pointer.position(), Some(Pointer { x: 4.0, y: 8.0 }));

        app.on_pointer_leave();
        assert_eq!(app.pointer.position(), None);
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            KeyEvent::from(KeyCode::Char('q')),
            KeyEvent::from(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(Config::default(), None, false);
            app.running = true;
            app.on_key_event(key);
            assert!(!app.running);
        }
    }
}

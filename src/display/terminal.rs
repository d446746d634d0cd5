use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::widgets::Widget;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::clock;
use crate::color::PaletteKind;
use crate::config::Config;
use crate::engine::{Engine, FrameParams};
use crate::renderer::Canvas;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '\u{2580}';
const SPEED_STEP: f32 = 0.1;

pub fn run(config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Pixel size that exactly fills `area` minus the status line.
fn fit_surface(area: Rect) -> (usize, usize) {
    let cols = area.width.max(1) as usize;
    let rows = area.height.saturating_sub(1).max(1) as usize;
    (cols, rows * 2)
}

fn render_size(config: &Config, area: Rect) -> (usize, usize) {
    let (fit_w, fit_h) = fit_surface(area);
    let w = if config.engine.width > 0 { config.engine.width } else { fit_w };
    let h = if config.engine.height > 0 { config.engine.height } else { fit_h };
    (w, h)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: Config) -> Result<()> {
    let area = terminal.size()?;
    let (width, height) = render_size(&config, Rect::new(0, 0, area.width, area.height));
    let mut engine = Engine::new(config.engine_config(width, height))?;
    let mut params = config.frame_params();
    let mut rotate = config.display.rotate_effects;
    let rotation_interval = Duration::from_secs(config.display.rotation_interval_secs.max(1));
    let poll_interval = Duration::from_secs_f64(1.0 / config.display.target_fps.max(1) as f64);

    info!("Starting {} at {}x{}", params.effect.name(), width, height);

    let mut last_tick = Instant::now();
    let mut rotation_timer = Instant::now();

    loop {
        let now = Instant::now();
        let wall_delta = now.duration_since(last_tick);
        last_tick = now;

        if rotate && rotation_timer.elapsed() > rotation_interval {
            params.effect = params.effect.next();
            rotation_timer = Instant::now();
        }

        engine.tick(wall_delta, &params);

        terminal.draw(|frame| {
            let area = frame.area();
            let view_area = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1));
            frame.render_widget(SurfaceView::new(engine.surface()), view_area);
            render_status(frame, area, &engine, &params, rotate);
        })?;

        if event::poll(poll_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if !handle_key(key, &mut params, &mut rotate) {
                        break;
                    }
                }
                Event::Resize(cols, rows) => {
                    let (w, h) = render_size(&config, Rect::new(0, 0, cols, rows));
                    // Keep the old surface if the new size cannot be allocated.
                    if let Err(e) = engine.resize(w, h) {
                        warn!("Resize to {}x{} failed: {}", w, h, e);
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Apply a key press. Returns false when the host should quit.
fn handle_key(key: KeyEvent, params: &mut FrameParams, rotate: &mut bool) -> bool {
    match key {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Esc, ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return false,
        KeyEvent {
            code: KeyCode::Char('e') | KeyCode::Right,
            ..
        } => params.effect = params.effect.next(),
        KeyEvent {
            code: KeyCode::Char('E') | KeyCode::Left,
            ..
        } => params.effect = params.effect.prev(),
        KeyEvent {
            code: KeyCode::Char('p'),
            ..
        } => params.palette = PaletteKind::from_index(params.palette).next().index(),
        KeyEvent {
            code: KeyCode::Char('P'),
            ..
        } => params.palette = PaletteKind::from_index(params.palette).prev().index(),
        KeyEvent {
            code: KeyCode::Char('b'),
            ..
        } => params.buffer_mode = params.buffer_mode.toggled(),
        KeyEvent {
            code: KeyCode::Char('w'),
            ..
        } => params.post.wave = params.post.wave.next(),
        KeyEvent {
            code: KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up,
            ..
        } => params.speed = clock::clamp_speed(params.speed + SPEED_STEP),
        KeyEvent {
            code: KeyCode::Char('-') | KeyCode::Down,
            ..
        } => params.speed = clock::clamp_speed(params.speed - SPEED_STEP),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => *rotate = !*rotate,
        _ => {}
    }
    true
}

fn render_status(frame: &mut Frame, area: Rect, engine: &Engine, params: &FrameParams, rotate: bool) {
    let status = format!(
        " [e]ffect: {} | [p]alette: {} | [b]uffer: {} | [w]ave: {} | speed {:.1}x | {} fps{} | [q]uit ",
        params.effect.name(),
        PaletteKind::from_index(params.palette).name(),
        engine.buffer_mode().name(),
        params.post.wave.name(),
        params.speed,
        engine.timing().fps,
        if rotate { " | [r]otating" } else { "" },
    );

    for (i, ch) in status.chars().enumerate() {
        if i >= area.width as usize {
            break;
        }
        if let Some(cell) = frame.buffer_mut().cell_mut((area.x + i as u16, area.y)) {
            cell.set_char(ch);
            cell.set_fg(Color::DarkGray);
        }
    }
}

/// Draws a canvas with two vertical pixels per cell, nearest-neighbour
/// scaled to the target area.
pub struct SurfaceView<'a> {
    canvas: &'a Canvas,
}

impl<'a> SurfaceView<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }

    fn sample(&self, cell_x: u16, pixel_y: usize, area: Rect) -> Color {
        let px = cell_x as usize * self.canvas.width() / area.width.max(1) as usize;
        let py = pixel_y * self.canvas.height() / (area.height.max(1) as usize * 2);
        let c = self.canvas.get_pixel(px, py);
        Color::Rgb(c.r, c.g, c.b)
    }
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let top = self.sample(col, row as usize * 2, area);
                let bottom = self.sample(col, row as usize * 2 + 1, area);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(HALF_BLOCK);
                    cell.set_fg(top);
                    cell.set_bg(bottom);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::effects::EffectKind;

    #[test]
    fn fit_leaves_room_for_status() {
        assert_eq!(fit_surface(Rect::new(0, 0, 80, 25)), (80, 48));
        assert_eq!(fit_surface(Rect::new(0, 0, 0, 0)), (1, 2));
    }

    #[test]
    fn half_blocks_carry_two_pixels() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put_pixel(0, 0, Rgb::new(255, 0, 0));
        canvas.put_pixel(0, 1, Rgb::new(0, 0, 255));
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        SurfaceView::new(&canvas).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "\u{2580}");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn keys_adjust_params() {
        let mut params = FrameParams::default();
        let mut rotate = false;
        let press = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        assert!(handle_key(press('e'), &mut params, &mut rotate));
        assert_eq!(params.effect, EffectKind::CopperBars);
        handle_key(press('b'), &mut params, &mut rotate);
        assert_eq!(params.buffer_mode, crate::display::BufferMode::Triple);
        handle_key(press('r'), &mut params, &mut rotate);
        assert!(rotate);
        for _ in 0..50 {
            handle_key(press('+'), &mut params, &mut rotate);
        }
        assert_eq!(params.speed, clock::MAX_SPEED);
        assert!(!handle_key(press('q'), &mut params, &mut rotate));
    }
}

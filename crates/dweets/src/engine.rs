//! The render loop: pace frames, route input, draw and present.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dweets_core::{
    Animated, Canvas, Clock, Flow, FrameStats, Input, Key, KeyPress, KeyboardState, Modifiers,
    Rgba, Surface,
};
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};
use tracing::{debug, info};

/// Drives one animated demo until it asks to quit.
#[derive(Debug)]
pub struct Engine<A> {
    demo: A,
    view: (u32, u32),
    clock: Clock,
    keys: KeyboardState,
    surface: Surface,
    running: bool,
}

impl<A: Animated> Engine<A> {
    /// `view` is the demo's logical resolution; it is scaled to whatever the
    /// terminal offers.
    pub fn new(demo: A, view: (u32, u32), fps: u32, keys: KeyboardState) -> Self {
        Self {
            demo,
            view,
            clock: Clock::new(fps),
            keys,
            surface: Surface::new(0, 0),
            running: false,
        }
    }

    /// Run the loop and hand the demo back once it quits.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<A> {
        self.running = true;
        while self.running {
            let elapsed = self.clock.tick();
            self.handle_crossterm_events()?;
            if !self.running {
                break;
            }
            self.demo.update(elapsed, &self.keys);
            terminal.draw(|frame| self.render(frame))?;
            self.keys.end_frame();
        }
        Ok(self.demo)
    }

    /// Clear, draw the demo and present it with its info panel.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let size = (area.width as u32, area.height as u32 * 2);
        if self.surface.size() != size {
            debug!(width = size.0, height = size.1, "surface resized");
            self.surface.resize(size.0, size.1);
        }
        self.surface.fill(Rgba::BLACK);

        let stats = FrameStats {
            fps: self.clock.fps(),
        };
        let mut canvas = Canvas::new(&mut self.surface, self.view.0, self.view.1);
        self.demo.draw(&mut canvas, &stats);

        frame.render_widget(SurfaceView::new(&self.surface), area);
        render_info(frame, area, self.demo.info(&stats));
    }

    /// Drain every pending terminal event without blocking.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.on_key_event(key),
                Event::Resize(cols, rows) => info!(cols, rows, "terminal resized"),
                Event::FocusLost => self.keys.clear(),
                _ => {}
            }
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        if is_interrupt(&key) {
            self.demo.handle(&Input::Quit);
            self.running = false;
            return;
        }
        let Some(press) = key_press(&key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => {
                self.keys.press(press);
                if self.demo.handle(&Input::KeyDown(press)) == Flow::Quit {
                    self.running = false;
                }
            }
            KeyEventKind::Repeat => self.keys.press(press),
            KeyEventKind::Release => self.keys.release(press),
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Translate a crossterm key event, or `None` for keys no demo uses.
fn key_press(key: &KeyEvent) -> Option<KeyPress> {
    let mut modifiers = Modifiers::NONE;
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        modifiers = modifiers | Modifiers::SHIFT;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        modifiers = modifiers | Modifiers::CTRL;
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        modifiers = modifiers | Modifiers::ALT;
    }

    let key = match key.code {
        KeyCode::Char(c) => {
            // Without the keyboard protocol shift only shows up as case.
            if c.is_ascii_uppercase() {
                modifiers = modifiers | Modifiers::SHIFT;
            }
            Key::from_char(c)
        }
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers = modifiers | Modifiers::SHIFT;
            Key::Tab
        }
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        _ => return None,
    };
    Some(KeyPress::new(key, modifiers))
}

/// Lines shown in the top-right corner over the demo.
fn render_info(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    if lines.is_empty() {
        return;
    }
    let width = lines
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .min(area.width as usize) as u16;
    let height = lines.len().min(area.height as usize) as u16;
    let panel = Rect::new(area.right() - width, area.y, width, height);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Right), panel);
}

/// Presents a surface with two vertical pixels per cell.
#[derive(Debug)]
pub struct SurfaceView<'a> {
    surface: &'a Surface,
}

impl<'a> SurfaceView<'a> {
    pub fn new(surface: &'a Surface) -> Self {
        Self { surface }
    }
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let (x, y) = (col as i32, row as i32 * 2);
                let top = self.surface.get(x, y).unwrap_or(Rgba::BLACK);
                let bottom = self.surface.get(x, y + 1).unwrap_or(Rgba::BLACK);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char('▀').set_fg(top.into()).set_bg(bottom.into());
                }
            }
        }
    }
}

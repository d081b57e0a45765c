use crate::error::PromoResult;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::Rng;
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

/// Something that can present a finished list of codes to the user.
///
/// Displays only read the codes, they never ask for new ones.
pub trait CodeDisplay {
    fn show(&mut self, codes: &[String]) -> PromoResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    Redraw,
    Ignore,
}

pub fn classify(event: &Event) -> Input {
    match event {
        Event::Key(KeyEvent { kind, .. }) if *kind != KeyEventKind::Press => Input::Ignore,
        Event::Key(KeyEvent { code: KeyCode::Char('q'), .. }) => Input::Quit,
        Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Input::Quit
        }
        Event::Key(_) | Event::Resize(..) => Input::Redraw,
        _ => Input::Ignore,
    }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::Rgb { r: rng.random(), g: rng.random(), b: rng.random() }
}

/// Draws one code per line from the top-left corner, each in a freshly rolled color.
///
/// The whole screen is cleared first, so a redraw never leaves parts of the previous
/// frame behind, however many lines it wrapped or scrolled into.
pub fn render_frame<W, R>(out: &mut W, codes: &[String], rng: &mut R) -> io::Result<()>
where
    W: Write,
    R: Rng + ?Sized,
{
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    for code in codes {
        queue!(out, SetForegroundColor(random_color(rng)), Print(code), ResetColor, Print("\r\n"))?;
    }

    out.flush()
}

/// Raw mode on the alternate screen, undone on drop.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;

        Ok(guard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Interactive display: colored codes until `q` or `Ctrl+C`.
pub struct TerminalDisplay<R> {
    rng: R,
}

impl<R: Rng> TerminalDisplay<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CodeDisplay for TerminalDisplay<R> {
    fn show(&mut self, codes: &[String]) -> PromoResult<()> {
        {
            let mut out = io::stdout();
            let _guard = ScreenGuard::enter()?;

            render_frame(&mut out, codes, &mut self.rng)?;

            loop {
                match classify(&event::read()?) {
                    Input::Quit => break,
                    Input::Redraw => render_frame(&mut out, codes, &mut self.rng)?,
                    Input::Ignore => {}
                }
            }
        }

        debug!("terminal display closed");

        // the alternate screen is gone, leave the codes behind on the normal one
        PlainDisplay::new(io::stdout().lock()).show(codes)
    }
}

pub struct PlainDisplay<W> {
    out: W,
}

impl<W: Write> PlainDisplay<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CodeDisplay for PlainDisplay<W> {
    fn show(&mut self, codes: &[String]) -> PromoResult<()> {
        for code in codes {
            writeln!(self.out, "{code}")?;
        }

        self.out.flush().map_err(Into::into)
    }
}

#[derive(Serialize)]
struct CodeBatch<'a> {
    count: usize,
    codes: &'a [String],
}

pub struct JsonDisplay<W> {
    out: W,
}

impl<W: Write> JsonDisplay<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CodeDisplay for JsonDisplay<W> {
    fn show(&mut self, codes: &[String]) -> PromoResult<()> {
        let batch = CodeBatch { count: codes.len(), codes };

        serde_json::to_writer_pretty(&mut self.out, &batch).map_err(io::Error::from)?;
        writeln!(self.out)?;

        self.out.flush().map_err(Into::into)
    }
}

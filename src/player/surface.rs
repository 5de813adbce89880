use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

use super::{Pace, TerminalSurface};

/// The real terminal: alternate screen, hidden cursor, raw mode.
///
/// Setup happens in `open`; the terminal is restored on drop, so an error
/// anywhere in the loop still leaves the shell usable.
pub struct CrosstermSurface {
    stdout: Stdout,
}

impl CrosstermSurface {
    pub fn open() -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        Ok(CrosstermSurface { stdout })
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl TerminalSurface for CrosstermSurface {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(frame)?;
        out.flush()
    }

    /// Waits on input rather than sleeping, so quit keys are seen promptly.
    fn pace(&mut self, delay: Duration) -> io::Result<Pace> {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(Pace::Continue);
            }
            // Resize events need no handling: the next frame re-reads the size.
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(Pace::Stop);
                }
            }
        }
    }
}

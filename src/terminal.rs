use anyhow::Context;
use crossterm::{cursor, execute, terminal};
use std::io::{stdout, Write};

/// Raw mode + alternate screen for the lifetime of the value.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn new() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        // From here on Drop restores the terminal, even if setup below fails.
        let guard = Self { _private: () };
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide
        )
        .context("prepare alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let mut out = stdout();
        // A frame cut short can leave sync output on and autowrap off.
        let _ = out.write_all(b"\x1b[?2026l\x1b[?7h\x1b[0m");
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
    }
}

/// Current terminal size as (columns, rows), never below 1x1.
pub fn terminal_size() -> anyhow::Result<(u16, u16)> {
    let (cols, rows) = terminal::size().context("query terminal size")?;
    Ok((cols.max(1), rows.max(1)))
}

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::PrintStyledContent,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::{error::TuiError, renderer::RenderFrame};

/// Size reported by buffered terminals.
const BUFFERED_SIZE: (u16, u16) = (80, 24);

/// Raw mode plus the alternate screen, left again on drop.
#[derive(Debug)]
struct ScreenSession;

impl ScreenSession {
    fn enter(out: &mut Stdout) -> Result<Self, TuiError> {
        terminal::enable_raw_mode()?;
        let session = Self;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(session)
    }
}

impl Drop for ScreenSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug)]
enum Output {
    Screen {
        out: Stdout,
        _session: ScreenSession,
    },
    Buffer {
        text: Vec<u8>,
        size: (u16, u16),
    },
}

/// Where frames are presented: the real terminal or an in-memory buffer.
///
/// Frames are clipped to the reported size. The screen is redrawn row by row,
/// clearing each row's tail, so a frame never flashes blank between draws.
#[derive(Debug)]
pub struct Terminal {
    output: Output,
}

impl Terminal {
    /// Takes over `stdout`: raw mode, alternate screen, hidden cursor.
    ///
    /// # Errors
    ///
    /// Fails when raw mode or the alternate screen cannot be entered.
    pub fn stdout() -> Result<Self, TuiError> {
        let mut out = io::stdout();
        let session = ScreenSession::enter(&mut out)?;
        Ok(Self {
            output: Output::Screen {
                out,
                _session: session,
            },
        })
    }

    /// An 80×24 in-memory terminal.
    #[must_use]
    pub const fn buffered() -> Self {
        Self::buffered_with_size(BUFFERED_SIZE.0, BUFFERED_SIZE.1)
    }

    /// An in-memory terminal reporting `columns` × `rows`.
    #[must_use]
    pub const fn buffered_with_size(columns: u16, rows: u16) -> Self {
        Self {
            output: Output::Buffer {
                text: Vec::new(),
                size: (columns, rows),
            },
        }
    }

    /// Current size as `(columns, rows)`.
    ///
    /// # Errors
    ///
    /// Fails when the size of a real terminal cannot be queried.
    pub fn size(&self) -> Result<(u16, u16), TuiError> {
        match &self.output {
            Output::Screen { .. } => Ok(terminal::size()?),
            Output::Buffer { size, .. } => Ok(*size),
        }
    }

    /// Presents `frame`, replacing whatever was shown before.
    ///
    /// # Errors
    ///
    /// Fails when writing to the terminal fails.
    pub fn render(&mut self, frame: &RenderFrame) -> Result<(), TuiError> {
        let (columns, rows) = self.size()?;
        let visible = frame.window(0, usize::from(rows));

        match &mut self.output {
            Output::Screen { out, .. } => {
                for row in 0..rows {
                    queue!(out, MoveTo(0, row))?;
                    if let Some(line) = visible.lines().get(usize::from(row)) {
                        for segment in line.fit(usize::from(columns)).segments() {
                            queue!(out, PrintStyledContent(segment.as_styled_content()))?;
                        }
                    }
                    queue!(out, Clear(ClearType::UntilNewLine))?;
                }
                out.flush()?;
            }
            Output::Buffer { text, .. } => {
                let plain = visible
                    .lines()
                    .iter()
                    .map(|line| line.fit(usize::from(columns)).text().trim_end().to_owned())
                    .collect::<Vec<_>>()
                    .join("\n");
                *text = plain.into_bytes();
            }
        }
        Ok(())
    }

    /// Text of the last frame presented to a buffered terminal, trailing
    /// blanks trimmed from every row. `None` for the real terminal.
    #[must_use]
    pub fn snapshot(&self) -> Option<&[u8]> {
        match &self.output {
            Output::Buffer { text, .. } => Some(text),
            Output::Screen { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RenderLine, RenderSegment};

    fn frame(rows: &[&str]) -> RenderFrame {
        rows.iter()
            .map(|text| {
                let mut line = RenderLine::new();
                line.push(RenderSegment::plain(*text));
                line
            })
            .collect()
    }

    fn snapshot(terminal: &Terminal) -> &str {
        std::str::from_utf8(terminal.snapshot().expect("buffered terminal")).unwrap()
    }

    #[test]
    fn buffered_terminal_reports_its_size() {
        assert_eq!(Terminal::buffered().size().unwrap(), (80, 24));
        assert_eq!(Terminal::buffered_with_size(12, 3).size().unwrap(), (12, 3));
    }

    #[test]
    fn frames_are_clipped_to_the_terminal() {
        let mut terminal = Terminal::buffered_with_size(4, 2);
        terminal
            .render(&frame(&["abcdef", "gh", "hidden"]))
            .unwrap();
        assert_eq!(snapshot(&terminal), "abcd\ngh");
    }

    #[test]
    fn trailing_blanks_are_trimmed_and_frames_replace_each_other() {
        let mut terminal = Terminal::buffered_with_size(10, 5);
        terminal.render(&frame(&["one   ", "two"])).unwrap();
        assert_eq!(snapshot(&terminal), "one\ntwo");

        terminal.render(&frame(&["three"])).unwrap();
        assert_eq!(snapshot(&terminal), "three");
    }
}

//! TerminalRenderer: flushes a frame to a real terminal.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::view::{Frame, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
    needs_clear: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            needs_clear: true,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to clear the screen first.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.needs_clear = true;
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        if self.needs_clear {
            self.buf.queue(terminal::Clear(ClearType::All))?;
            self.needs_clear = false;
        }
        encode_into(frame, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a frame into `out`, each line overwriting what was there before.
pub fn encode_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    for (y, line) in frame.lines().iter().enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for span in line {
            apply_style_into(out, span.style)?;
            out.queue(Print(span.text.as_str()))?;
        }
        apply_style_into(out, Style::default())?;
        out.queue(terminal::Clear(ClearType::UntilNewLine))?;
    }
    out.queue(cursor::MoveTo(0, frame.lines().len() as u16))?;
    out.queue(terminal::Clear(ClearType::FromCursorDown))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    match style.fg {
        Some(color) => out.queue(SetForegroundColor(color))?,
        None => out.queue(ResetColor)?,
    };
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

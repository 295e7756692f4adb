//! TerminalRenderer: puts frames on a real terminal.
//!
//! Each frame is diffed row by row against the one on screen and only the
//! changed spans are rewritten. With nothing on screen yet, or after a size
//! change, every row is one span and the screen is cleared first.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Ink};
use crate::types::TileColor;

const BOARD_BG: Color = Color::Rgb {
    r: 30,
    g: 30,
    b: 40,
};

fn tile_color(color: TileColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb { r, g, b }
}

/// Foreground, background and optional attribute for an ink.
pub fn palette(ink: Ink) -> (Color, Color, Option<Attribute>) {
    match ink {
        Ink::Blank => (Color::Reset, Color::Reset, None),
        Ink::Empty => (
            Color::Rgb {
                r: 90,
                g: 90,
                b: 100,
            },
            BOARD_BG,
            Some(Attribute::Dim),
        ),
        Ink::Wall => (tile_color(TileColor::Grey), BOARD_BG, None),
        Ink::Tile(color) => (tile_color(color), BOARD_BG, Some(Attribute::Bold)),
        Ink::Flash => (Color::White, BOARD_BG, Some(Attribute::Bold)),
        Ink::Label => (Color::Reset, Color::Reset, Some(Attribute::Bold)),
        Ink::Value => (
            Color::Rgb {
                r: 200,
                g: 200,
                b: 200,
            },
            Color::Reset,
            None,
        ),
        Ink::Banner => (Color::White, Color::Black, Some(Attribute::Bold)),
    }
}

/// Raw-mode alternate screen, restored when dropped.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut renderer = Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        };
        renderer
            .buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?;
        renderer.flush_buf()?;
        Ok(renderer)
    }

    /// Repaint everything on the next frame (after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `frame`, then hand the previously shown buffer back through it
    /// so the caller redraws into recycled storage.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.shown.as_ref(), frame, &mut self.buf)?;
        self.flush_buf()?;

        let mut shown = self.shown.take().unwrap_or_else(|| FrameBuffer::new(0, 0));
        std::mem::swap(&mut shown, frame);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self
            .stdout
            .queue(ResetColor)
            .and_then(|out| out.queue(SetAttribute(Attribute::Reset)))
            .and_then(|out| out.queue(cursor::Show))
            .and_then(|out| out.queue(terminal::LeaveAlternateScreen))
            .and_then(|out| out.flush());
        let _ = terminal::disable_raw_mode();
    }
}

/// Encode the commands that turn `shown` into `next`.
///
/// `shown` is ignored when it is missing or a different size.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let shown = shown.filter(|s| s.same_size(next));
    if shown.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen: Option<Ink> = None;
    for y in 0..next.height() {
        let row = next.row(y);
        for span in changed_spans(shown.map(|s| s.row(y)), row) {
            out.queue(cursor::MoveTo(span.start, y))?;
            for glyph in &row[usize::from(span.start)..usize::from(span.end)] {
                if pen != Some(glyph.ink) {
                    queue_ink(out, glyph.ink)?;
                    pen = Some(glyph.ink);
                }
                out.queue(Print(glyph.ch))?;
            }
        }
    }

    if pen.is_some() {
        out.queue(SetAttribute(Attribute::Reset))?.queue(ResetColor)?;
    }
    Ok(())
}

fn queue_ink(out: &mut Vec<u8>, ink: Ink) -> io::Result<()> {
    let (fg, bg, attribute) = palette(ink);
    // SGR reset also drops colors, so it goes first.
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(fg))?
        .queue(SetBackgroundColor(bg))?;
    if let Some(attribute) = attribute {
        out.queue(SetAttribute(attribute))?;
    }
    Ok(())
}

/// Column spans where `row` differs from `old`; the whole row without `old`.
fn changed_spans(old: Option<&[Glyph]>, row: &[Glyph]) -> Vec<Range<u16>> {
    let Some(old) = old else {
        let width = row.len() as u16;
        return if width == 0 { Vec::new() } else { vec![0..width] };
    };

    let mut spans: Vec<Range<u16>> = Vec::new();
    for (x, (was, now)) in (0u16..).zip(old.iter().zip(row)) {
        if was == now {
            continue;
        }
        match spans.last_mut() {
            Some(span) if span.end == x => span.end = x + 1,
            _ => spans.push(x..x + 1),
        }
    }
    spans
}

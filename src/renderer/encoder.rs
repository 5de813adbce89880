//! Frame encoder — serializes finished buffers into one escape-coded block.

use std::fmt::{self, Write};

use crossterm::{Command, cursor, style};

use super::FrameBuffers;
use crate::types::Rgb;

/// Row terminator. Raw mode turns off output post-processing, so the
/// carriage return must be explicit.
pub const LINE_END: &str = "\r\n";

/// Encode `buffers` into `out`, replacing its contents.
///
/// The block homes the cursor, then writes each cell either as a truecolor
/// foreground change plus glyph or as a reset plus space, ending every row
/// with a reset and a line break. `out` keeps its allocation across frames.
pub fn encode(buffers: &FrameBuffers, out: &mut String) -> fmt::Result {
    out.clear();
    cursor::MoveTo(0, 0).write_ansi(out)?;
    for row in buffers.rows() {
        for glyph in row {
            if glyph.is_background() {
                style::ResetColor.write_ansi(out)?;
                out.push(' ');
            } else {
                let Rgb { r, g, b } = glyph.color;
                style::SetForegroundColor(style::Color::Rgb { r, g, b }).write_ansi(out)?;
                out.push(glyph.ch);
            }
        }
        style::ResetColor.write_ansi(out)?;
        out.write_str(LINE_END)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Glyph, TerminalSize};

    #[test]
    fn blank_frame_is_home_then_reset_spaces() {
        let buffers = FrameBuffers::new(TerminalSize::new(3, 2));
        let mut out = String::new();
        encode(&buffers, &mut out).unwrap();

        let row = "\x1b[0m \x1b[0m \x1b[0m \x1b[0m\r\n";
        assert_eq!(out, format!("\x1b[1;1H{row}{row}"));
    }

    #[test]
    fn drawn_cells_carry_truecolor() {
        let mut buffers = FrameBuffers::new(TerminalSize::new(2, 1));
        let glyph = Glyph {
            ch: '@',
            color: Rgb::new(245, 194, 231),
        };
        buffers.plot(1, 0, 0.5, glyph);
        let mut out = String::new();
        encode(&buffers, &mut out).unwrap();
        assert_eq!(out, "\x1b[1;1H\x1b[0m \x1b[38;2;245;194;231m@\x1b[0m\r\n");
    }

    #[test]
    fn reencoding_replaces_previous_contents() {
        let buffers = FrameBuffers::new(TerminalSize::new(1, 1));
        let mut out = String::from("stale");
        encode(&buffers, &mut out).unwrap();
        encode(&buffers, &mut out).unwrap();
        assert_eq!(out, "\x1b[1;1H\x1b[0m \x1b[0m\r\n");
    }
}

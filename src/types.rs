//! Shared boundary types for the surface renderer.
//!
//! This module defines the data passed between pipeline stages:
//! - Engine → Shader: `SurfaceSample` (height, light, depth of one sample)
//! - Engine → Renderer: `Projection` (screen cell + depth proxy)
//! - Renderer → Encoder: `Glyph`s stored per cell

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color and glyph primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build a color from float channels, clamping each into `[0, 255]`.
    /// Fractions are truncated.
    pub fn from_channels([r, g, b]: [f32; 3]) -> Self {
        Rgb {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    pub fn channels(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }
}

fn channel(v: f32) -> u8 {
    // NaN maps to 0 through the saturating cast.
    v.clamp(0.0, 255.0) as u8
}

/// A shaded character: what one screen cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub color: Rgb,
}

impl Glyph {
    pub const BACKGROUND: Glyph = Glyph {
        ch: ' ',
        color: Rgb::BLACK,
    };

    pub fn is_background(&self) -> bool {
        self.ch == ' '
    }
}

// ---------------------------------------------------------------------------
// Terminal geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
}

impl TerminalSize {
    pub const fn new(cols: u16, rows: u16) -> Self {
        TerminalSize { cols, rows }
    }

    /// Interpret a raw size query. Failed queries and zero dimensions fall
    /// back to `default`.
    pub fn from_query<E>(query: Result<(u16, u16), E>, default: TerminalSize) -> Self {
        match query {
            Ok((cols, rows)) if cols > 0 && rows > 0 => TerminalSize { cols, rows },
            _ => default,
        }
    }

    pub fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

impl Default for TerminalSize {
    fn default() -> Self {
        TerminalSize::new(80, 40)
    }
}

// ---------------------------------------------------------------------------
// Per-sample pipeline data (never persisted across frames)
// ---------------------------------------------------------------------------

/// Everything a shading policy may key on for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// Unscaled field height.
    pub height: f32,
    /// Light intensity, already remapped into the policy's ambient range.
    pub light: f32,
    /// Reciprocal camera distance; larger is nearer.
    pub depth: f32,
}

impl SurfaceSample {
    /// Camera-relative distance of the sample.
    pub fn distance(&self) -> f32 {
        self.depth.recip()
    }
}

/// Where a sample lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub col: u16,
    pub row: u16,
    pub depth: f32,
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Rotation angles of the surface, advanced once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    pub a: f32,
    pub b: f32,
}

impl CameraState {
    /// Advance both angles. Angles stay within one turn so precision does
    /// not degrade on long runs; the rendered image is unaffected.
    pub fn advance(&mut self, delta_a: f32, delta_b: f32) {
        self.a = (self.a + delta_a).rem_euclid(TAU);
        self.b = (self.b + delta_b).rem_euclid(TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_channels_clamps_and_truncates() {
        let c = Rgb::from_channels([-12.0, 127.9, 300.0]);
        assert_eq!(c, Rgb::new(0, 127, 255));
        assert_eq!(Rgb::from_channels([f32::NAN, 0.0, 0.0]).r, 0);
    }

    #[test]
    fn size_query_falls_back_on_zero_or_error() {
        let default = TerminalSize::default();
        assert_eq!(TerminalSize::from_query::<()>(Ok((0, 24)), default), default);
        assert_eq!(TerminalSize::from_query::<()>(Ok((80, 0)), default), default);
        assert_eq!(TerminalSize::from_query(Err("no tty"), default), default);
        assert_eq!(
            TerminalSize::from_query::<()>(Ok((120, 40)), default),
            TerminalSize::new(120, 40)
        );
    }

    #[test]
    fn camera_advance_wraps_within_one_turn() {
        let mut camera = CameraState {
            a: TAU - 0.01,
            b: 0.0,
        };
        camera.advance(0.02, 0.03);
        assert!((camera.a - 0.01).abs() < 1e-5);
        assert!((camera.b - 0.03).abs() < 1e-6);
    }
}

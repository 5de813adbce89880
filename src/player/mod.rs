//! Player — the render loop.
//!
//! Drives one frame after another to a `TerminalSurface`: check the size,
//! reset the buffers, rasterize, encode, write once, advance the camera,
//! wait. The player owns all state that lives across frames.

mod surface;

pub use surface::CrosstermSurface;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{Level, debug, log, trace};

use crate::config::RenderConfig;
use crate::renderer::{FrameBuffers, Renderer, encoder};
use crate::types::{CameraState, TerminalSize};

/// Whether the loop should go on after a frame delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Continue,
    Stop,
}

/// The outside world as the render loop sees it.
pub trait TerminalSurface {
    /// Current `(cols, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Emit one complete frame. Called exactly once per frame.
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;

    /// Block for `delay` between frames.
    fn pace(&mut self, delay: Duration) -> io::Result<Pace>;
}

/// Everything that survives from one frame to the next.
#[derive(Debug)]
pub struct RenderState {
    pub camera: CameraState,
    pub buffers: FrameBuffers,
    encoded: String,
    reallocations: u64,
}

impl RenderState {
    pub fn new() -> Self {
        RenderState {
            camera: CameraState::default(),
            buffers: FrameBuffers::new(TerminalSize::new(0, 0)),
            encoded: String::new(),
            reallocations: 0,
        }
    }

    /// Size the buffers for this frame and reset them to the background.
    /// Returns whether the buffers were reallocated.
    pub fn begin_frame(&mut self, size: TerminalSize) -> bool {
        let old = self.buffers.size();
        let reallocated = self.buffers.resize(size);
        if reallocated {
            self.reallocations += 1;
            self.encoded = String::with_capacity(size.area() * 24 + size.rows as usize * 8);
            debug!(
                "frame buffers resized {}x{} -> {}x{}",
                old.cols, old.rows, size.cols, size.rows
            );
        } else {
            self.buffers.clear();
        }
        reallocated
    }

    /// Number of buffer reallocations so far.
    pub fn reallocations(&self) -> u64 {
        self.reallocations
    }

    /// The most recently encoded frame.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Rasterize and encode one frame at `size` for the current camera.
    pub fn render(&mut self, config: &RenderConfig, size: TerminalSize) -> Result<&str> {
        self.begin_frame(size);
        Renderer::rasterize(config, &self.camera, &mut self.buffers);
        encoder::encode(&self.buffers, &mut self.encoded).context("Failed to encode frame")?;
        Ok(&self.encoded)
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Player<S> {
    surface: S,
    config: RenderConfig,
    state: RenderState,
    /// Set while size queries keep failing, so only the first failure warns.
    size_query_failing: bool,
}

impl<S: TerminalSurface> Player<S> {
    pub fn new(surface: S, config: RenderConfig) -> Self {
        Player {
            surface,
            config,
            state: RenderState::new(),
            size_query_failing: false,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Run frames until the surface asks to stop.
    pub fn play(&mut self) -> Result<()> {
        let delay = Duration::from_millis(self.config.frame_delay_ms);
        loop {
            self.frame()?;
            if self.surface.pace(delay).context("Failed to wait for next frame")? == Pace::Stop {
                return Ok(());
            }
        }
    }

    /// Render, emit and advance a single frame.
    pub fn frame(&mut self) -> Result<()> {
        let size = self.current_size();
        let encoded = self.state.render(&self.config, size)?;
        self.surface
            .write_frame(encoded.as_bytes())
            .context("Failed to write frame")?;
        trace!("frame written: {} bytes", encoded.len());

        let speed = self.config.rotation;
        self.state.camera.advance(speed.a, speed.b);
        Ok(())
    }

    fn current_size(&mut self) -> TerminalSize {
        let query = self.surface.size();
        match &query {
            Ok(_) => self.size_query_failing = false,
            Err(e) => {
                let level = size_failure_level(self.size_query_failing);
                log!(level, "terminal size query failed ({e}), using default");
                self.size_query_failing = true;
            }
        }
        TerminalSize::from_query(query, self.config.default_size)
    }
}

/// The first failure in a run is a warning; repeats are debug noise.
fn size_failure_level(already_failing: bool) -> Level {
    if already_failing {
        Level::Debug
    } else {
        Level::Warn
    }
}

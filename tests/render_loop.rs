//! Scenario tests for the render loop against a scripted terminal.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use surface_spin::config::RenderConfig;
use surface_spin::player::{Pace, Player, RenderState, TerminalSurface};
use surface_spin::types::TerminalSize;

/// Replays a queue of size answers and records every frame written.
struct ScriptedSurface {
    sizes: RefCell<VecDeque<io::Result<(u16, u16)>>>,
    frames_left: usize,
    writes: Vec<Vec<u8>>,
    delays: Vec<Duration>,
}

impl ScriptedSurface {
    fn new(sizes: Vec<io::Result<(u16, u16)>>, frames: usize) -> Self {
        ScriptedSurface {
            sizes: RefCell::new(sizes.into()),
            frames_left: frames,
            writes: Vec::new(),
            delays: Vec::new(),
        }
    }
}

impl TerminalSurface for ScriptedSurface {
    fn size(&self) -> io::Result<(u16, u16)> {
        let mut sizes = self.sizes.borrow_mut();
        if sizes.len() > 1 {
            sizes.pop_front().unwrap()
        } else {
            match sizes.front() {
                Some(Ok(size)) => Ok(*size),
                _ => Err(io::Error::other("no tty")),
            }
        }
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.writes.push(frame.to_vec());
        Ok(())
    }

    fn pace(&mut self, delay: Duration) -> io::Result<Pace> {
        self.delays.push(delay);
        self.frames_left -= 1;
        Ok(if self.frames_left == 0 { Pace::Stop } else { Pace::Continue })
    }
}

fn line_count(frame: &[u8]) -> usize {
    String::from_utf8_lossy(frame).matches("\r\n").count()
}

#[test]
fn one_write_per_frame_and_fixed_delay() {
    let surface = ScriptedSurface::new(vec![Ok((40, 20))], 3);
    let mut player = Player::new(surface, RenderConfig::default());
    player.play().unwrap();

    let surface = player.into_surface();
    assert_eq!(surface.writes.len(), 3);
    assert_eq!(surface.delays, vec![Duration::from_millis(16); 3]);
}

#[test]
fn camera_advances_every_frame() {
    let surface = ScriptedSurface::new(vec![Ok((40, 20))], 2);
    let mut player = Player::new(surface, RenderConfig::default());
    player.play().unwrap();

    let camera = player.state().camera;
    assert!((camera.a - 0.04).abs() < 1e-6);
    assert!((camera.b - 0.06).abs() < 1e-6);

    // Rotation changes the picture.
    let writes = &player.surface().writes;
    assert_ne!(writes[0], writes[1]);
}

#[test]
fn resize_reallocates_once_and_starts_blank() {
    let config = RenderConfig::default();
    let mut state = RenderState::new();

    state.render(&config, TerminalSize::new(80, 24)).unwrap();
    assert_eq!(state.reallocations(), 1);
    assert!(!state.buffers.is_blank());

    assert!(state.begin_frame(TerminalSize::new(120, 40)));
    assert_eq!(state.reallocations(), 2);
    assert_eq!(state.buffers.size(), TerminalSize::new(120, 40));
    assert!(state.buffers.is_blank(), "stale cells leaked across the resize");

    state.render(&config, TerminalSize::new(120, 40)).unwrap();
    assert_eq!(state.reallocations(), 2);
}

#[test]
fn same_size_frames_are_cleared_not_reallocated() {
    let config = RenderConfig::default();
    let mut state = RenderState::new();
    state.render(&config, TerminalSize::new(40, 20)).unwrap();

    assert!(!state.begin_frame(TerminalSize::new(40, 20)));
    assert!(state.buffers.is_blank());
    assert_eq!(state.reallocations(), 1);
}

#[test]
fn loop_follows_terminal_resizes() {
    let sizes = vec![Ok((80, 24)), Ok((120, 40)), Ok((120, 40))];
    let surface = ScriptedSurface::new(sizes, 3);
    let mut player = Player::new(surface, RenderConfig::default());
    player.play().unwrap();

    assert_eq!(player.state().reallocations(), 2);
    let writes = &player.surface().writes;
    assert_eq!(line_count(&writes[0]), 24);
    assert_eq!(line_count(&writes[1]), 40);
    assert_eq!(line_count(&writes[2]), 40);
}

#[test]
fn bad_size_queries_fall_back_to_default() {
    let sizes = vec![Ok((0, 0)), Err(io::Error::other("no tty"))];
    let surface = ScriptedSurface::new(sizes, 2);
    let mut player = Player::new(surface, RenderConfig::default());
    player.play().unwrap();

    assert_eq!(player.state().buffers.size(), TerminalSize::new(80, 40));
    assert_eq!(player.state().reallocations(), 1);
    for frame in &player.surface().writes {
        assert_eq!(line_count(frame), 40);
    }
}

#[test]
fn frame_block_is_self_contained() {
    let mut state = RenderState::new();
    let frame = state
        .render(&RenderConfig::default(), TerminalSize::new(40, 20))
        .unwrap()
        .to_owned();

    assert!(frame.starts_with("\x1b[1;1H"));
    assert!(frame.contains("\x1b[38;2;"), "no surface cells were drawn");
    for line in frame.split_terminator("\r\n") {
        assert!(line.ends_with("\x1b[0m"), "row does not end with a reset: {line:?}");
    }
}

//! Engine — the surface math.
//!
//! Evaluates the height field, estimates lighting, and projects samples
//! through the rotating camera. Everything here is pure: given the same
//! inputs it always produces the same output. The engine never deals with
//! terminals, buffers or escape codes.

pub mod field;
pub mod lighting;
pub mod projector;
pub mod sampling;

pub use field::Surface;
pub use lighting::Lighting;
pub use projector::{FrameProjector, Projector};
pub use sampling::{SampleGrid, StepPolicy};

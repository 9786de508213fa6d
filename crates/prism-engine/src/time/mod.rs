//! Time subsystem.
//!
//! Frame timing for the render loop, decoupled from the runtime so it can be
//! tested without a window:
//! - one `FrameClock` per render loop
//! - call `tick()` once per rendered frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};

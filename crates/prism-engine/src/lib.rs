//! Prism engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the triangle demos:
//! device acquisition, the window loop, frame timing and the frame pipeline.

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;

#[cfg(test)]
mod test_support;

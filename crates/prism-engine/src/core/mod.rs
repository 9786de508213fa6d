//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! applications: a one-time start hook after the device is ready, and a
//! per-frame callback with a consistent context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, StartCtx, WindowCtx};

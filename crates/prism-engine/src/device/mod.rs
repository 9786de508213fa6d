//! GPU device + surface management.
//!
//! This module is responsible for:
//! - negotiating the wgpu Adapter/Device/Queue (`acquire`)
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering

mod acquire;
mod gpu;
mod init;
mod surface;

pub use acquire::{acquire_device, AcquiredDevice, DeviceLostFlag};
pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;

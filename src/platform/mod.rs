//! Display and context platform.
//!
//! A [`Platform`] owns the native display connection and hands out the one
//! rendering context the controller uses. Backends:
//! - [`HeadlessPlatform`]: in-memory, for hosts without a display
//! - `VideoCore` (feature `videocore`): Raspberry Pi bcm_host + EGL + GLES2

mod headless;
#[cfg(feature = "videocore")]
mod videocore;

pub use headless::{HeadlessContext, HeadlessPlatform};
#[cfg(feature = "videocore")]
pub use videocore::{VideoCore, VideoCoreContext};

use crate::error::PlatformError;
use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

/// Drawable size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for a degenerate surface.
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Strings identifying the driver behind a context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererInfo {
    /// Vendor string.
    pub vendor: String,
    /// Renderer string.
    pub renderer: String,
    /// API version string.
    pub version: String,
    /// Shading language version string.
    pub shading_language: String,
}

/// Address of a resolved driver extension entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionFn(NonNull<c_void>);

impl ExtensionFn {
    /// Wrap a raw address; `None` when null.
    pub fn new(address: *mut c_void) -> Option<Self> {
        NonNull::new(address).map(Self)
    }

    /// Raw address, to be transmuted by the caller to the right signature.
    pub const fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// Native display and context capabilities.
///
/// Every method taking a context must be called from the thread that
/// acquired it.
pub trait Platform {
    /// Handle for one live context and its surface.
    type Context;

    /// Open the display and create a fullscreen context and surface.
    fn acquire_context(&mut self) -> Result<Self::Context, PlatformError>;

    /// Make `context` current on the calling thread.
    fn bind_current(&mut self, context: &Self::Context) -> Result<(), PlatformError>;

    /// Size of the surface bound to `context`.
    fn surface_size(&self, context: &Self::Context) -> SurfaceSize;

    /// Driver identification strings.
    fn renderer_info(&self, context: &Self::Context) -> RendererInfo;

    /// Look up a driver extension function by name.
    fn resolve_extension(&self, name: &str) -> Option<ExtensionFn>;

    /// Post the back buffer to the display.
    fn present(&mut self, context: &Self::Context) -> Result<(), PlatformError>;

    /// Destroy the surface and context and close the display.
    fn release_context(&mut self, context: Self::Context) -> Result<(), PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert!((SurfaceSize::new(1920, 1080).aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
        assert!((SurfaceSize::new(640, 0).aspect_ratio() - 1.0).abs() < f32::EPSILON);
        assert_eq!(SurfaceSize::new(800, 600).to_string(), "800x600");
    }

    #[test]
    fn test_extension_fn_rejects_null() {
        assert!(ExtensionFn::new(std::ptr::null_mut()).is_none());
    }
}

//! Windowing-library seam
//!
//! The negotiator drives window and context creation through [`WindowSystem`]
//! so the probing algorithm does not depend on a concrete windowing library.
//! `platform::glfw` provides the GLFW implementation; tests use scripted fakes.

use super::target::VersionCandidate;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Windowing library initialization failed
    #[error("windowing library initialization failed: {0}")]
    InitializationFailed(String),

    /// Window creation failed
    #[error("window creation failed: {0}")]
    CreationFailed(String),

    /// Context creation or attachment failed
    #[error("context creation failed: {0}")]
    ContextFailed(String),

    /// The windowing library was already terminated
    #[error("windowing library has been terminated")]
    Terminated,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

bitflags::bitflags! {
    /// Window mode flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowModeFlags: u32 {
        /// Fullscreen on the primary monitor
        const FULLSCREEN = 1 << 0;
        /// No decorations
        const BORDERLESS = 1 << 1;
        /// User-resizable
        const RESIZABLE = 1 << 2;
        /// Created invisible; shown explicitly later
        const HIDDEN = 1 << 3;
    }
}

/// Parameters for every window the negotiator creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowParams {
    /// Window title
    pub title: String,
    /// Screen position of the top-left corner
    pub x: i32,
    /// Screen position of the top-left corner
    pub y: i32,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Mode flags
    pub flags: WindowModeFlags,
}

impl WindowParams {
    /// Create windowed parameters at the given position
    pub fn new(title: impl Into<String>, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            x,
            y,
            width,
            height,
            flags: WindowModeFlags::empty(),
        }
    }

    /// Replace the mode flags
    pub fn with_flags(mut self, flags: WindowModeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Same parameters, forced hidden
    pub fn hidden(&self) -> Self {
        let mut params = self.clone();
        params.flags.insert(WindowModeFlags::HIDDEN);
        params
    }
}

impl Default for WindowParams {
    fn default() -> Self {
        Self::new("gl_context", 0, 0, 1280, 720)
    }
}

/// Native window handle handed to a display binding for surface creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeWindowHandle {
    /// Platform-specific window identifier (an X11 `Window`, for example)
    Raw(u64),
    /// No native window; the binding uses its default (framebuffer devices)
    Default,
}

/// Windowing library operations used during context negotiation
///
/// Version and profile requests are sticky state that applies to the next
/// created window, mirroring how windowing libraries expose GL hints. On
/// some platforms the profile is fixed when the window is created, so a
/// failed attempt destroys its window before the next request.
pub trait WindowSystem {
    /// Window handle
    type Window;
    /// API context handle
    type Context;

    /// Set the version/profile applied to the next created window
    fn set_context_request(&mut self, candidate: &VersionCandidate);

    /// Remove every version/profile constraint
    fn clear_context_request(&mut self);

    /// Create a window using the pending request
    fn create_window(&mut self, params: &WindowParams) -> WindowResult<Self::Window>;

    /// Create (or attach) an API context for a window
    fn create_context(&mut self, window: &mut Self::Window) -> WindowResult<Self::Context>;

    /// Destroy a window
    fn destroy_window(&mut self, window: Self::Window);

    /// Destroy an API context
    fn destroy_context(&mut self, context: Self::Context);

    /// Make a hidden window visible
    fn show_window(&mut self, window: &mut Self::Window);

    /// Present the window's back buffer
    fn swap_window(&mut self, window: &mut Self::Window);

    /// Native handle for display-binding surface creation
    fn native_window(&self, window: &Self::Window) -> NativeWindowHandle;

    /// Version reported by the live context, when the library can tell
    fn context_version(&self, window: &Self::Window) -> Option<(u32, u32)>;

    /// Whether the current context advertises an extension
    fn extension_supported(&self, name: &str) -> bool;

    /// Shut down process-wide windowing state
    fn terminate(&mut self);
}

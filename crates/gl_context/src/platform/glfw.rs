//! GLFW window system
//!
//! GLFW owns the GL context of each window it creates, so a context request
//! is expressed as window hints and a failed request shows up as a failed
//! window creation.

use crate::context::target::{Profile, VersionCandidate};
use crate::context::window::{
    NativeWindowHandle, WindowError, WindowModeFlags, WindowParams, WindowResult, WindowSystem,
};
use glfw::Context as _;

/// A GLFW window with its event queue
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Whether the user asked to close the window
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Drain pending window events
    pub fn flush_events(&self) -> glfw::FlushedMessages<(f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events)
    }

    /// Underlying GLFW window
    pub fn raw(&self) -> &glfw::PWindow {
        &self.window
    }
}

/// Marker for the context attached to a [`GlfwWindow`]
///
/// GLFW destroys the context together with its window; this only tracks
/// that the context was made current.
#[derive(Debug)]
pub struct GlfwContext {
    _private: (),
}

/// [`WindowSystem`] backed by GLFW
pub struct GlfwWindowSystem {
    glfw: Option<glfw::Glfw>,
}

fn log_glfw_error(error: glfw::Error, description: String) {
    log::warn!("GLFW error {error:?}: {description}");
}

impl GlfwWindowSystem {
    /// Initialize GLFW
    ///
    /// GLFW errors are logged rather than fatal: failed context requests are
    /// expected while probing versions.
    pub fn new() -> WindowResult<Self> {
        let glfw = glfw::init(log_glfw_error)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;
        log::debug!("GLFW {} initialized", glfw::get_version_string());
        Ok(Self { glfw: Some(glfw) })
    }

    /// Process pending window events
    pub fn poll_events(&mut self) {
        if let Some(glfw) = self.glfw.as_mut() {
            glfw.poll_events();
        }
    }

    fn glfw_mut(&mut self) -> WindowResult<&mut glfw::Glfw> {
        self.glfw.as_mut().ok_or(WindowError::Terminated)
    }
}

impl WindowSystem for GlfwWindowSystem {
    type Window = GlfwWindow;
    type Context = GlfwContext;

    fn set_context_request(&mut self, candidate: &VersionCandidate) {
        let Some(glfw) = self.glfw.as_mut() else {
            return;
        };
        glfw.default_window_hints();

        let client_api = match candidate.profile {
            Profile::Es => glfw::ClientApiHint::OpenGlEs,
            _ => glfw::ClientApiHint::OpenGl,
        };
        glfw.window_hint(glfw::WindowHint::ClientApi(client_api));

        if candidate.is_unconstrained() {
            return;
        }
        glfw.window_hint(glfw::WindowHint::ContextVersion(candidate.major, candidate.minor));

        // profiles only exist from 3.2 on
        let profiled = (candidate.major, candidate.minor) >= (3, 2);
        match candidate.profile {
            Profile::Core if profiled => {
                glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
                if cfg!(target_os = "macos") {
                    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
                }
            }
            Profile::Compatibility if profiled => {
                glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Compat));
            }
            _ => {}
        }
    }

    fn clear_context_request(&mut self) {
        if let Some(glfw) = self.glfw.as_mut() {
            glfw.default_window_hints();
        }
    }

    fn create_window(&mut self, params: &WindowParams) -> WindowResult<GlfwWindow> {
        let glfw = self.glfw_mut()?;
        let flags = params.flags;
        glfw.window_hint(glfw::WindowHint::Visible(!flags.contains(WindowModeFlags::HIDDEN)));
        glfw.window_hint(glfw::WindowHint::Resizable(flags.contains(WindowModeFlags::RESIZABLE)));
        glfw.window_hint(glfw::WindowHint::Decorated(!flags.contains(WindowModeFlags::BORDERLESS)));

        let created = if flags.contains(WindowModeFlags::FULLSCREEN) {
            glfw.with_primary_monitor(|glfw, monitor| {
                let mode = monitor.map_or(glfw::WindowMode::Windowed, |m| glfw::WindowMode::FullScreen(m));
                glfw.create_window(params.width, params.height, &params.title, mode)
            })
        } else {
            glfw.create_window(params.width, params.height, &params.title, glfw::WindowMode::Windowed)
        };

        let (mut window, events) = created.ok_or_else(|| {
            WindowError::CreationFailed(format!("{}x{} \"{}\"", params.width, params.height, params.title))
        })?;
        if !flags.contains(WindowModeFlags::FULLSCREEN) {
            window.set_pos(params.x, params.y);
        }
        window.set_close_polling(true);
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);

        Ok(GlfwWindow { window, events })
    }

    fn create_context(&mut self, window: &mut GlfwWindow) -> WindowResult<GlfwContext> {
        window.window.make_current();
        if window.window.is_current() {
            Ok(GlfwContext { _private: () })
        } else {
            Err(WindowError::ContextFailed("context could not be made current".to_string()))
        }
    }

    fn destroy_window(&mut self, window: GlfwWindow) {
        drop(window);
    }

    fn destroy_context(&mut self, _context: GlfwContext) {
        glfw::make_context_current(None);
    }

    fn show_window(&mut self, window: &mut GlfwWindow) {
        window.window.show();
    }

    fn swap_window(&mut self, window: &mut GlfwWindow) {
        window.window.swap_buffers();
    }

    fn native_window(&self, _window: &GlfwWindow) -> NativeWindowHandle {
        NativeWindowHandle::Default
    }

    fn context_version(&self, window: &GlfwWindow) -> Option<(u32, u32)> {
        let version = window.window.get_context_version();
        let major = u32::try_from(version.major).ok()?;
        let minor = u32::try_from(version.minor).ok()?;
        Some((major, minor))
    }

    fn extension_supported(&self, name: &str) -> bool {
        self.glfw
            .as_ref()
            .is_some_and(|glfw| glfw.extension_supported(name))
    }

    fn terminate(&mut self) {
        if self.glfw.take().is_some() {
            log::info!("GLFW terminated");
        }
    }
}

//! Explicit display/surface management (EGL-style platforms)
//!
//! On platforms where the windowing library does not own the GL surface, a
//! display binding opens the display, enumerates configs, and creates the
//! context and window surface for the config picked by
//! [`select_best_config`](super::config_select::select_best_config).

use super::config_select::{select_best_config, ApiVersionClass, ConfigAttrib, ScoreTable, ScoringProfile};
use super::error::{ContextError, ContextResult, DisplayError};
use super::window::NativeWindowHandle;

/// Display-server binding layer
///
/// Mirrors the EGL entry points used during initialization. Implementations
/// report failures as [`DisplayError`] carrying the binding's error code.
pub trait DisplayBinding {
    /// Opaque config handle
    type Config: Clone;
    /// Context handle
    type Context;
    /// Window surface handle
    type Surface;

    /// Open and initialize the display
    ///
    /// Framebuffer-device platforms use the default native display instead of
    /// a windowing-system connection.
    fn open(&mut self, framebuffer_device: bool) -> Result<(), DisplayError>;

    /// Every config the display offers
    fn configs(&self) -> Result<Vec<Self::Config>, DisplayError>;

    /// Read one config attribute; unreadable attributes read as 0
    fn config_attrib(&self, config: &Self::Config, attrib: ConfigAttrib) -> i32;

    /// Vendor string of the display implementation
    fn vendor(&self) -> Option<String>;

    /// Create a context on `config` with an `EGL_NONE`-terminated attribute list
    fn create_context(&mut self, config: &Self::Config, attributes: &[i32]) -> Result<Self::Context, DisplayError>;

    /// Create a window surface for a native window
    fn create_window_surface(
        &mut self,
        config: &Self::Config,
        native: NativeWindowHandle,
    ) -> Result<Self::Surface, DisplayError>;

    /// Bind context and surface to the calling thread
    fn make_current(&mut self, surface: &Self::Surface, context: &Self::Context) -> Result<(), DisplayError>;

    /// Unbind whatever is current
    fn release_current(&mut self);

    /// Present a surface
    fn swap_buffers(&mut self, surface: &Self::Surface) -> Result<(), DisplayError>;

    /// Destroy a surface
    fn destroy_surface(&mut self, surface: Self::Surface);

    /// Destroy a context
    fn destroy_context(&mut self, context: Self::Context);

    /// Terminate the display connection
    fn terminate(&mut self);
}

/// Display binding for targets that attach contexts directly
///
/// Uninhabited: a `GraphicsContext` built with it can never reach the
/// display path.
#[derive(Debug, Clone, Copy)]
pub enum NoDisplay {}

impl DisplayBinding for NoDisplay {
    type Config = NoDisplay;
    type Context = NoDisplay;
    type Surface = NoDisplay;

    fn open(&mut self, _framebuffer_device: bool) -> Result<(), DisplayError> {
        match *self {}
    }

    fn configs(&self) -> Result<Vec<NoDisplay>, DisplayError> {
        match *self {}
    }

    fn config_attrib(&self, _config: &NoDisplay, _attrib: ConfigAttrib) -> i32 {
        match *self {}
    }

    fn vendor(&self) -> Option<String> {
        match *self {}
    }

    fn create_context(&mut self, _config: &NoDisplay, _attributes: &[i32]) -> Result<NoDisplay, DisplayError> {
        match *self {}
    }

    fn create_window_surface(&mut self, _config: &NoDisplay, _native: NativeWindowHandle) -> Result<NoDisplay, DisplayError> {
        match *self {}
    }

    fn make_current(&mut self, _surface: &NoDisplay, _context: &NoDisplay) -> Result<(), DisplayError> {
        match *self {}
    }

    fn release_current(&mut self) {
        match *self {}
    }

    fn swap_buffers(&mut self, _surface: &NoDisplay) -> Result<(), DisplayError> {
        match *self {}
    }

    fn destroy_surface(&mut self, _surface: NoDisplay) {
        match *self {}
    }

    fn destroy_context(&mut self, _context: NoDisplay) {
        match *self {}
    }

    fn terminate(&mut self) {
        match *self {}
    }
}

/// Display connection, context and surface bound to one window
///
/// The binding itself stays with the caller and is passed to every call, so
/// it survives a failed bind and can be used again. Handles are released in
/// reverse acquisition order (surface, context, display) by
/// [`DisplayState::close`]; closing twice is harmless.
pub struct DisplayState<D: DisplayBinding> {
    open: bool,
    context: Option<D::Context>,
    surface: Option<D::Surface>,
    api_version: ApiVersionClass,
    scores: ScoreTable,
}

impl<D: DisplayBinding> DisplayState<D> {
    /// Open the display, select a config and bind a current context to `native`
    ///
    /// Everything acquired before a failure is released before returning.
    pub fn bind(
        binding: &mut D,
        framebuffer_device: bool,
        native: NativeWindowHandle,
        profile: &ScoringProfile,
    ) -> ContextResult<Self> {
        binding.open(framebuffer_device)?;
        let mut state = Self {
            open: true,
            context: None,
            surface: None,
            api_version: ApiVersionClass::Unspecified,
            scores: ScoreTable::default(),
        };

        match state.finish_bind(binding, framebuffer_device, native, profile) {
            Ok(()) => {
                log::info!(
                    "display surface bound (client version {})",
                    state.api_version.client_version()
                );
                Ok(state)
            }
            Err(err) => {
                state.close(binding);
                Err(err)
            }
        }
    }

    fn finish_bind(
        &mut self,
        binding: &mut D,
        framebuffer_device: bool,
        native: NativeWindowHandle,
        profile: &ScoringProfile,
    ) -> ContextResult<()> {
        let configs = binding.configs().map_err(|e| {
            log::error!("{e}");
            ContextError::ConfigEnumerationFailed
        })?;
        if configs.is_empty() {
            log::error!("display offers no configs");
            return Err(ContextError::ConfigEnumerationFailed);
        }

        let vendor = binding.vendor();
        let reader = &*binding;
        let selection = select_best_config(
            &configs,
            |config, attrib| reader.config_attrib(config, attrib),
            vendor.as_deref(),
            profile,
        )?;
        self.api_version = selection.api_version;
        self.scores = selection.scores;

        let attributes = selection.api_version.context_attributes();
        let context = self.context.insert(binding.create_context(&selection.config, &attributes)?);

        let native = if framebuffer_device {
            NativeWindowHandle::Default
        } else {
            native
        };
        let surface = binding.create_window_surface(&selection.config, native)?;
        let surface = self.surface.insert(surface);

        binding.make_current(surface, context)?;
        Ok(())
    }

    /// Client version the context was created with
    pub fn api_version(&self) -> ApiVersionClass {
        self.api_version
    }

    /// Score breakdown from config selection
    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    /// Whether the display connection is still open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Present the surface
    pub fn swap(&mut self, binding: &mut D) {
        if let Some(surface) = &self.surface {
            if let Err(e) = binding.swap_buffers(surface) {
                log::warn!("{e}");
            }
        }
    }

    /// Release surface, context and display connection
    pub fn close(&mut self, binding: &mut D) {
        if !self.open {
            return;
        }
        binding.release_current();
        if let Some(surface) = self.surface.take() {
            binding.destroy_surface(surface);
        }
        if let Some(context) = self.context.take() {
            binding.destroy_context(context);
        }
        binding.terminate();
        self.open = false;
        log::debug!("display connection closed");
    }
}

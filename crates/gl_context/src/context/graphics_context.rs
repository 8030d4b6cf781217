//! Graphics context lifecycle
//!
//! [`GraphicsContext`] owns every handle acquired during initialization: the
//! window, the API context, and on display-path targets the display
//! connection and window surface. It replaces process-wide handles with one
//! owned value. Teardown runs in reverse acquisition order and is idempotent.
//!
//! The type is deliberately `!Send`: GL contexts are thread-affine, so it
//! must be initialized, presented and torn down on the render thread.

use super::backend::{DrawContext, NativeObject, RenderBackendFactory};
use super::config_select::{ApiVersionClass, ScoringProfile};
use super::display::{DisplayBinding, DisplayState, NoDisplay};
use super::error::{ContextError, ContextResult, DisplayError};
use super::features::{validate_context, ContextInfo, GpuFeatures};
use super::negotiate::{negotiate, Negotiated};
use super::target::{RenderTarget, SurfacePath, VersionCandidate};
use super::window::{WindowParams, WindowSystem};
use std::cell::RefCell;
use std::rc::Rc;

/// Minimum desktop GL version accepted after negotiation
pub const DEFAULT_MIN_DESKTOP_VERSION: (u32, u32) = (2, 0);

/// Live rendering state bound to one window
pub struct RenderingContext<W: WindowSystem, D: DisplayBinding> {
    window: W::Window,
    context: W::Context,
    display: Option<DisplayState<D>>,
    version: VersionCandidate,
    core_context: bool,
}

impl<W: WindowSystem, D: DisplayBinding> RenderingContext<W, D> {
    /// The window
    pub fn window(&self) -> &W::Window {
        &self.window
    }

    /// The negotiated request
    pub fn version(&self) -> VersionCandidate {
        self.version
    }

    /// Whether this is a desktop core-profile context
    pub fn is_core_context(&self) -> bool {
        self.core_context
    }

    /// Display-path state, if the target uses one
    pub fn display(&self) -> Option<&DisplayState<D>> {
        self.display.as_ref()
    }
}

/// State reachable from both the owner and the installed swap function
struct Shared<W: WindowSystem, D: DisplayBinding> {
    window_system: W,
    display_binding: Option<D>,
    rendering: Option<RenderingContext<W, D>>,
}

impl<W: WindowSystem, D: DisplayBinding> Shared<W, D> {
    fn present(&mut self) {
        let Some(rendering) = self.rendering.as_mut() else {
            return;
        };
        match (rendering.display.as_mut(), self.display_binding.as_mut()) {
            (Some(display), Some(binding)) => display.swap(binding),
            _ => self.window_system.swap_window(&mut rendering.window),
        }
    }

    /// Surface, context, display connection, then the window
    fn release(&mut self) {
        let Some(rendering) = self.rendering.take() else {
            return;
        };
        let RenderingContext { window, context, display, .. } = rendering;
        if let (Some(mut display), Some(binding)) = (display, self.display_binding.as_mut()) {
            display.close(binding);
        }
        self.window_system.destroy_context(context);
        self.window_system.destroy_window(window);
        log::info!("graphics context released");
    }
}

/// Owner of the negotiated GL context
pub struct GraphicsContext<W: WindowSystem, D: DisplayBinding = NoDisplay> {
    shared: Rc<RefCell<Shared<W, D>>>,
    target: RenderTarget,
    candidates: Vec<VersionCandidate>,
    min_desktop_version: (u32, u32),
    draw: Option<Box<dyn DrawContext>>,
}

impl<W: WindowSystem> GraphicsContext<W, NoDisplay> {
    /// Context whose window system attaches contexts directly
    ///
    /// Initialization fails with [`DisplayError::Unavailable`] if `target`
    /// asks for the display path.
    pub fn new(window_system: W, target: RenderTarget) -> Self {
        Self::build(window_system, None, target)
    }
}

impl<W: WindowSystem, D: DisplayBinding> GraphicsContext<W, D> {
    /// Context that finalizes through an explicit display binding
    pub fn with_display(window_system: W, display: D, target: RenderTarget) -> Self {
        Self::build(window_system, Some(display), target)
    }

    fn build(window_system: W, display_binding: Option<D>, target: RenderTarget) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                window_system,
                display_binding,
                rendering: None,
            })),
            candidates: target.version_candidates(),
            target,
            min_desktop_version: DEFAULT_MIN_DESKTOP_VERSION,
            draw: None,
        }
    }

    /// Replace the version candidates (most preferred first)
    pub fn with_candidates(mut self, candidates: Vec<VersionCandidate>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Replace the minimum desktop GL version
    pub fn with_min_desktop_version(mut self, version: (u32, u32)) -> Self {
        self.min_desktop_version = version;
        self
    }

    /// Render target in use
    pub fn target(&self) -> RenderTarget {
        self.target
    }

    /// Whether a context is live
    pub fn is_initialized(&self) -> bool {
        self.shared.borrow().rendering.is_some()
    }

    /// Negotiated request of the live context
    pub fn negotiated_version(&self) -> Option<VersionCandidate> {
        self.shared.borrow().rendering.as_ref().map(|r| r.version)
    }

    /// Whether the live context is a desktop core-profile context
    pub fn is_core_context(&self) -> bool {
        self.shared
            .borrow()
            .rendering
            .as_ref()
            .is_some_and(|r| r.core_context)
    }

    /// Run `f` against the live rendering context
    pub fn with_rendering<R>(&self, f: impl FnOnce(&RenderingContext<W, D>) -> R) -> Option<R> {
        self.shared.borrow().rendering.as_ref().map(f)
    }

    /// Run `f` against the window system (event polling, for example)
    pub fn with_window_system<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.shared.borrow_mut().window_system)
    }

    /// The draw context created by the backend factory
    pub fn draw_context(&mut self) -> Option<&mut (dyn DrawContext + 'static)> {
        self.draw.as_deref_mut()
    }

    /// Present one frame through the backend's swap function
    pub fn present(&mut self) {
        if let Some(draw) = self.draw.as_mut() {
            draw.present();
        }
    }

    /// Placeholder for main-thread shutdown; real teardown happens in
    /// [`GraphicsContext::shutdown_from_render_thread`]
    pub fn shutdown(&mut self) {
        log::debug!("shutdown requested; resources released from the render thread");
    }

    /// Release the draw context and every platform handle
    ///
    /// Safe to call repeatedly, and when initialization never succeeded.
    pub fn shutdown_from_render_thread(&mut self) {
        self.draw = None;
        self.shared.borrow_mut().release();
    }
}

impl<W, D> GraphicsContext<W, D>
where
    W: WindowSystem + 'static,
    D: DisplayBinding + 'static,
{
    /// Negotiate, finalize and validate a context for a new window
    ///
    /// On failure everything acquired so far is released; when even the
    /// unconstrained fallback failed the window system is terminated too.
    pub fn init(
        &mut self,
        params: &WindowParams,
        features: &mut dyn GpuFeatures,
        backends: &mut dyn RenderBackendFactory,
    ) -> ContextResult<()> {
        if self.is_initialized() {
            return Err(ContextError::AlreadyInitialized);
        }

        let result = self.try_init(params, features, backends);
        if let Err(err) = &result {
            log::error!("graphics context initialization failed: {err}");
            self.shutdown_from_render_thread();
            if matches!(err, ContextError::TotalNegotiationFailure { .. }) {
                self.shared.borrow_mut().window_system.terminate();
            }
        }
        result
    }

    /// [`GraphicsContext::init`] with a status-code result
    ///
    /// Returns 0 on success. On failure `error_message` receives the
    /// diagnostic and the nonzero status from [`ContextError::status_code`]
    /// is returned.
    pub fn init_status(
        &mut self,
        params: &WindowParams,
        features: &mut dyn GpuFeatures,
        backends: &mut dyn RenderBackendFactory,
        error_message: &mut String,
    ) -> i32 {
        match self.init(params, features, backends) {
            Ok(()) => 0,
            Err(err) => {
                *error_message = err.to_string();
                err.status_code()
            }
        }
    }

    fn try_init(
        &mut self,
        params: &WindowParams,
        features: &mut dyn GpuFeatures,
        backends: &mut dyn RenderBackendFactory,
    ) -> ContextResult<()> {
        let mut guard = self.shared.borrow_mut();
        let shared = &mut *guard;

        let Negotiated { mut window, context, version, failures } =
            negotiate(&mut shared.window_system, &self.candidates, params)?;
        if !failures.is_empty() {
            log::info!("{} candidate(s) rejected before {version}", failures.len());
        }

        shared.window_system.show_window(&mut window);
        let rendering = shared.rendering.insert(RenderingContext {
            window,
            context,
            display: None,
            version,
            core_context: version.is_core(),
        });

        let mut client_version = ApiVersionClass::Unspecified;
        if let SurfacePath::Display { framebuffer_device } = self.target.surface {
            let binding = shared
                .display_binding
                .as_mut()
                .ok_or(DisplayError::Unavailable)?;
            let native = shared.window_system.native_window(&rendering.window);
            let profile = ScoringProfile::for_target(&self.target);
            let display = DisplayState::bind(binding, framebuffer_device, native, &profile)?;
            client_version = display.api_version();
            rendering.display = Some(display);
        }

        let info = ContextInfo {
            requested: version,
            reported: shared.window_system.context_version(&rendering.window),
            api: self.target.api,
            core_context: rendering.core_context,
            client_version,
        };
        let window_system = &shared.window_system;
        validate_context(
            features,
            &info,
            &|name| window_system.extension_supported(name),
            self.min_desktop_version,
        )?;

        let mut draw = backends
            .create(&info)
            .map_err(ContextError::BackendCreationFailed)?;
        if draw.native_object(NativeObject::RenderManager).is_none() {
            log::debug!("render backend exposes no render manager");
        }
        if !draw.create_presets() {
            return Err(ContextError::ExtensionCheckFailed("presets".to_string()));
        }

        let weak = Rc::downgrade(&self.shared);
        draw.set_swap_function(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                if let Ok(mut shared) = shared.try_borrow_mut() {
                    shared.present();
                }
            }
        }));

        drop(guard);
        self.draw = Some(draw);
        log::info!("graphics context ready ({version})");
        Ok(())
    }
}

impl<W: WindowSystem, D: DisplayBinding> Drop for GraphicsContext<W, D> {
    fn drop(&mut self) {
        self.shutdown_from_render_thread();
    }
}

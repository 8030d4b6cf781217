//! Scripted collaborators for unit tests
//!
//! Every fake records its calls into a shared log so a test can inspect the
//! exact sequence after the fake has been moved into a `GraphicsContext`.

use super::backend::{DrawContext, NativeObject, RenderBackendFactory, SwapFn};
use super::config_select::{ConfigAttrib, ConfigAttribs};
use super::display::DisplayBinding;
use super::error::{DisplayError, EglErrorCode};
use super::features::{ContextInfo, GpuFeatures};
use super::target::VersionCandidate;
use super::window::{NativeWindowHandle, WindowError, WindowModeFlags, WindowParams, WindowResult, WindowSystem};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Window system call record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsCall {
    Request(VersionCandidate),
    ClearRequest,
    CreateWindow { request: Option<VersionCandidate>, hidden: bool },
    CreateContext(u32),
    DestroyWindow(u32),
    DestroyContext(u32),
    Show(u32),
    Swap(u32),
    Terminate,
}

#[derive(Debug)]
pub struct FakeWindow {
    pub id: u32,
    pub request: Option<VersionCandidate>,
}

#[derive(Debug)]
pub struct FakeContext {
    pub window_id: u32,
}

/// Window system whose failures are scripted per request
///
/// `None` in the failure lists stands for the unconstrained request.
#[derive(Default)]
pub struct ScriptedWindowSystem {
    pub log: Rc<RefCell<Vec<WsCall>>>,
    pending: Option<VersionCandidate>,
    next_id: u32,
    window_failures: Vec<Option<VersionCandidate>>,
    context_failures: Vec<Option<VersionCandidate>>,
    reported_version: Option<(u32, u32)>,
    extensions: Vec<String>,
}

impl ScriptedWindowSystem {
    pub fn new() -> Self {
        Self {
            reported_version: Some((4, 6)),
            ..Self::default()
        }
    }

    pub fn fail_window(mut self, request: Option<VersionCandidate>) -> Self {
        self.window_failures.push(request);
        self
    }

    pub fn fail_context(mut self, request: Option<VersionCandidate>) -> Self {
        self.context_failures.push(request);
        self
    }

    pub fn fail_all_contexts(mut self, candidates: &[VersionCandidate]) -> Self {
        self.context_failures.extend(candidates.iter().copied().map(Some));
        self.context_failures.push(None);
        self
    }

    pub fn reporting_version(mut self, version: Option<(u32, u32)>) -> Self {
        self.reported_version = version;
        self
    }

    pub fn with_extensions(mut self, names: &[&str]) -> Self {
        self.extensions = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<WsCall> {
        self.log.borrow().clone()
    }

    fn record(&self, call: WsCall) {
        self.log.borrow_mut().push(call);
    }
}

impl WindowSystem for ScriptedWindowSystem {
    type Window = FakeWindow;
    type Context = FakeContext;

    fn set_context_request(&mut self, candidate: &VersionCandidate) {
        self.pending = Some(*candidate);
        self.record(WsCall::Request(*candidate));
    }

    fn clear_context_request(&mut self) {
        self.pending = None;
        self.record(WsCall::ClearRequest);
    }

    fn create_window(&mut self, params: &WindowParams) -> WindowResult<FakeWindow> {
        self.record(WsCall::CreateWindow {
            request: self.pending,
            hidden: params.flags.contains(WindowModeFlags::HIDDEN),
        });
        if self.window_failures.contains(&self.pending) {
            return Err(WindowError::CreationFailed("scripted window failure".to_string()));
        }
        self.next_id += 1;
        Ok(FakeWindow { id: self.next_id, request: self.pending })
    }

    fn create_context(&mut self, window: &mut FakeWindow) -> WindowResult<FakeContext> {
        self.record(WsCall::CreateContext(window.id));
        if self.context_failures.contains(&window.request) {
            return Err(WindowError::ContextFailed("scripted context failure".to_string()));
        }
        Ok(FakeContext { window_id: window.id })
    }

    fn destroy_window(&mut self, window: FakeWindow) {
        self.record(WsCall::DestroyWindow(window.id));
    }

    fn destroy_context(&mut self, context: FakeContext) {
        self.record(WsCall::DestroyContext(context.window_id));
    }

    fn show_window(&mut self, window: &mut FakeWindow) {
        self.record(WsCall::Show(window.id));
    }

    fn swap_window(&mut self, window: &mut FakeWindow) {
        self.record(WsCall::Swap(window.id));
    }

    fn native_window(&self, window: &FakeWindow) -> NativeWindowHandle {
        NativeWindowHandle::Raw(u64::from(window.id))
    }

    fn context_version(&self, _window: &FakeWindow) -> Option<(u32, u32)> {
        self.reported_version
    }

    fn extension_supported(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e == name)
    }

    fn terminate(&mut self) {
        self.record(WsCall::Terminate);
    }
}

/// Display binding call record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Open { framebuffer_device: bool },
    CreateContext { config: usize, attributes: Vec<i32> },
    CreateSurface { config: usize, native: NativeWindowHandle },
    MakeCurrent,
    ReleaseCurrent,
    Swap,
    DestroySurface,
    DestroyContext,
    Terminate,
}

/// Display binding serving a fixed config list
///
/// Configs are stored as raw attribute tables keyed by EGL enum, the way a
/// driver answers `eglGetConfigAttrib`.
#[derive(Default)]
pub struct FakeDisplay {
    pub log: Rc<RefCell<Vec<DisplayCall>>>,
    configs: Vec<HashMap<i32, i32>>,
    vendor: Option<String>,
    pub fail_open: bool,
    pub fail_surface: bool,
    pub fail_make_current: bool,
}

impl FakeDisplay {
    pub fn new(configs: Vec<ConfigAttribs>) -> Self {
        let configs = configs
            .iter()
            .map(|config| {
                ConfigAttrib::ALL
                    .iter()
                    .map(|&attrib| (attrib.egl_code(), config.attrib(attrib)))
                    .collect()
            })
            .collect();
        Self { configs, ..Self::default() }
    }

    pub fn with_vendor(mut self, vendor: &str) -> Self {
        self.vendor = Some(vendor.to_string());
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn failing_surface(mut self) -> Self {
        self.fail_surface = true;
        self
    }

    pub fn failing_make_current(mut self) -> Self {
        self.fail_make_current = true;
        self
    }

    pub fn calls(&self) -> Vec<DisplayCall> {
        self.log.borrow().clone()
    }

    fn record(&self, call: DisplayCall) {
        self.log.borrow_mut().push(call);
    }
}

impl DisplayBinding for FakeDisplay {
    type Config = usize;
    type Context = usize;
    type Surface = usize;

    fn open(&mut self, framebuffer_device: bool) -> Result<(), DisplayError> {
        self.record(DisplayCall::Open { framebuffer_device });
        if self.fail_open {
            return Err(DisplayError::OpenFailed(EglErrorCode::BadDisplay));
        }
        Ok(())
    }

    fn configs(&self) -> Result<Vec<usize>, DisplayError> {
        Ok((0..self.configs.len()).collect())
    }

    fn config_attrib(&self, config: &usize, attrib: ConfigAttrib) -> i32 {
        self.configs
            .get(*config)
            .and_then(|table| table.get(&attrib.egl_code()))
            .copied()
            .unwrap_or(0)
    }

    fn vendor(&self) -> Option<String> {
        self.vendor.clone()
    }

    fn create_context(&mut self, config: &usize, attributes: &[i32]) -> Result<usize, DisplayError> {
        self.record(DisplayCall::CreateContext { config: *config, attributes: attributes.to_vec() });
        Ok(*config)
    }

    fn create_window_surface(&mut self, config: &usize, native: NativeWindowHandle) -> Result<usize, DisplayError> {
        self.record(DisplayCall::CreateSurface { config: *config, native });
        if self.fail_surface {
            return Err(DisplayError::SurfaceCreationFailed(EglErrorCode::BadNativeWindow));
        }
        Ok(*config)
    }

    fn make_current(&mut self, _surface: &usize, _context: &usize) -> Result<(), DisplayError> {
        self.record(DisplayCall::MakeCurrent);
        if self.fail_make_current {
            return Err(DisplayError::MakeCurrentFailed(EglErrorCode::BadMatch));
        }
        Ok(())
    }

    fn release_current(&mut self) {
        self.record(DisplayCall::ReleaseCurrent);
    }

    fn swap_buffers(&mut self, _surface: &usize) -> Result<(), DisplayError> {
        self.record(DisplayCall::Swap);
        Ok(())
    }

    fn destroy_surface(&mut self, _surface: usize) {
        self.record(DisplayCall::DestroySurface);
    }

    fn destroy_context(&mut self, _context: usize) {
        self.record(DisplayCall::DestroyContext);
    }

    fn terminate(&mut self) {
        self.record(DisplayCall::Terminate);
    }
}

/// Extension checker that fails on demand
#[derive(Default)]
pub struct FakeFeatures {
    pub fail: bool,
    pub seen: Option<ContextInfo>,
}

impl GpuFeatures for FakeFeatures {
    fn check_extensions(&mut self, info: &ContextInfo, _supported: &dyn Fn(&str) -> bool) -> Result<(), String> {
        self.seen = Some(*info);
        if self.fail {
            Err("scripted extension failure".to_string())
        } else {
            Ok(())
        }
    }
}

/// Draw context that records presents and keeps the installed swap function
pub struct RecordingDraw {
    swap: Option<SwapFn>,
    presets: bool,
    pub dropped: Rc<RefCell<bool>>,
}

impl DrawContext for RecordingDraw {
    fn set_swap_function(&mut self, swap: SwapFn) {
        self.swap = Some(swap);
    }

    fn native_object(&self, kind: NativeObject) -> Option<&dyn Any> {
        match kind {
            NativeObject::RenderManager => Some(&self.presets),
        }
    }

    fn create_presets(&mut self) -> bool {
        self.presets
    }

    fn present(&mut self) {
        if let Some(swap) = self.swap.as_mut() {
            swap();
        }
    }
}

impl Drop for RecordingDraw {
    fn drop(&mut self) {
        *self.dropped.borrow_mut() = true;
    }
}

/// Factory producing [`RecordingDraw`] contexts
#[derive(Default)]
pub struct RecordingBackend {
    pub fail_create: bool,
    pub fail_presets: bool,
    pub created: Vec<ContextInfo>,
    pub dropped: Rc<RefCell<bool>>,
}

impl RenderBackendFactory for RecordingBackend {
    fn create(&mut self, info: &ContextInfo) -> Result<Box<dyn DrawContext>, String> {
        if self.fail_create {
            return Err("scripted backend failure".to_string());
        }
        self.created.push(*info);
        Ok(Box::new(RecordingDraw {
            swap: None,
            presets: !self.fail_presets,
            dropped: Rc::clone(&self.dropped),
        }))
    }
}

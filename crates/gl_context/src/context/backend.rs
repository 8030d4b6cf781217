//! Render backend factory seam
//!
//! The negotiated context is wrapped into a backend-agnostic draw context by
//! an external factory. The only things this crate needs from the result are
//! the swap hook and the native render-manager accessor.

use super::features::ContextInfo;
use std::any::Any;

/// Frame presentation callback installed into the backend
pub type SwapFn = Box<dyn FnMut()>;

/// Backend-specific objects reachable through a draw context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeObject {
    /// The GL render manager driving command submission
    RenderManager,
}

/// Backend-agnostic drawing interface over a live context
pub trait DrawContext {
    /// Route frame presentation through `swap`
    fn set_swap_function(&mut self, swap: SwapFn);

    /// Type-erased access to a backend object
    fn native_object(&self, kind: NativeObject) -> Option<&dyn Any>;

    /// Create the standard pipeline presets; false on failure
    fn create_presets(&mut self) -> bool;

    /// Present the current frame through the installed swap function
    fn present(&mut self);
}

/// Creates draw contexts for negotiated GL contexts
pub trait RenderBackendFactory {
    /// Wrap the current context
    fn create(&mut self, info: &ContextInfo) -> Result<Box<dyn DrawContext>, String>;
}

/// Minimal draw context that only presents frames
///
/// Useful for tools that want a live context and nothing else.
#[derive(Default)]
pub struct PresentOnly {
    swap: Option<SwapFn>,
    frames: u64,
}

impl PresentOnly {
    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl DrawContext for PresentOnly {
    fn set_swap_function(&mut self, swap: SwapFn) {
        self.swap = Some(swap);
    }

    fn native_object(&self, _kind: NativeObject) -> Option<&dyn Any> {
        None
    }

    fn create_presets(&mut self) -> bool {
        true
    }

    fn present(&mut self) {
        if let Some(swap) = self.swap.as_mut() {
            swap();
            self.frames += 1;
        }
    }
}

/// Factory for [`PresentOnly`]
#[derive(Debug, Default, Clone, Copy)]
pub struct PresentOnlyFactory;

impl RenderBackendFactory for PresentOnlyFactory {
    fn create(&mut self, info: &ContextInfo) -> Result<Box<dyn DrawContext>, String> {
        log::debug!("present-only backend over {}", info.requested);
        Ok(Box::new(PresentOnly::default()))
    }
}

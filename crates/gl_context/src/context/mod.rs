//! GL context creation
//!
//! Config scoring, version negotiation, display binding and the owned
//! [`GraphicsContext`] that ties them together.

pub mod backend;
pub mod config_select;
pub mod display;
pub mod error;
pub mod features;
pub mod graphics_context;
pub mod negotiate;
pub mod target;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{DrawContext, NativeObject, PresentOnly, PresentOnlyFactory, RenderBackendFactory, SwapFn};
pub use config_select::{
    capped, score_config, select_best_config, ApiVersionClass, ConfigAttrib, ConfigAttribs, ConfigSelection,
    ScoreRecord, ScoreTable, ScoringProfile,
};
pub use display::{DisplayBinding, DisplayState, NoDisplay};
pub use error::{ContextError, ContextResult, DisplayError, EglErrorCode};
pub use features::{validate_context, ContextInfo, GpuFeatures, RequiredExtensions};
pub use graphics_context::{GraphicsContext, RenderingContext, DEFAULT_MIN_DESKTOP_VERSION};
pub use negotiate::{negotiate, Negotiated};
pub use target::{ApiFamily, Profile, RenderTarget, SurfacePath, VersionCandidate};
pub use window::{NativeWindowHandle, WindowError, WindowModeFlags, WindowParams, WindowResult, WindowSystem};

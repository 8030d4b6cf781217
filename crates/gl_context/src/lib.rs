//! # gl_context
//!
//! OpenGL / OpenGL ES context creation for a windowed renderer.
//!
//! ## Features
//!
//! - **Version negotiation**: ordered (major, minor) candidates with one
//!   unconstrained fallback
//! - **Config selection**: weighted scoring of EGL-style configs on platforms
//!   with explicit display/surface management
//! - **Owned lifecycle**: a single [`GraphicsContext`](context::GraphicsContext)
//!   owns every handle; teardown is idempotent
//! - **GLFW backend**: [`GlfwWindowSystem`](platform::GlfwWindowSystem)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_context::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     gl_context::foundation::logging::init();
//!
//!     let window_system = GlfwWindowSystem::new()?;
//!     let mut gfx = GraphicsContext::new(window_system, RenderTarget::build_default());
//!     gfx.init(
//!         &WindowParams::default(),
//!         &mut RequiredExtensions::default(),
//!         &mut PresentOnlyFactory,
//!     )?;
//!     gfx.present();
//!     gfx.shutdown_from_render_thread();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod context;
pub mod foundation;
pub mod platform;

/// Common imports for context users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ContextConfig, WindowConfig},
        context::{
            ApiFamily, ContextError, ContextResult, DrawContext, GpuFeatures, GraphicsContext, PresentOnlyFactory,
            Profile, RenderBackendFactory, RenderTarget, RequiredExtensions, SurfacePath, VersionCandidate,
            WindowModeFlags, WindowParams, WindowSystem,
        },
        foundation::logging::LoggingConfig,
        platform::GlfwWindowSystem,
    };
}

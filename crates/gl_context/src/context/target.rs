//! Render targets and API version candidates
//!
//! A [`RenderTarget`] describes which GL family is wanted and how the context
//! reaches the screen. Cargo features pick the default target, but it is a
//! plain value so configuration can override it at startup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GL API family a build renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiFamily {
    /// OpenGL ES (embedded systems)
    Gles,
    /// Desktop OpenGL
    DesktopGl,
}

/// How the negotiated context is bound to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfacePath {
    /// The windowing library owns the context and presents it directly
    Native,
    /// An explicit display binding (EGL-style) owns config, context and surface
    Display {
        /// Framebuffer-device platform: default native display, no window surfaces
        framebuffer_device: bool,
    },
}

/// Context profile requested alongside a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    /// OpenGL ES
    Es,
    /// Desktop core profile
    Core,
    /// Desktop compatibility profile
    Compatibility,
    /// No constraint; the platform picks
    Any,
}

/// A (major, minor) API version plus the profile it implies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionCandidate {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Profile requested with the version
    pub profile: Profile,
}

impl VersionCandidate {
    /// Create a candidate
    pub const fn new(major: u32, minor: u32, profile: Profile) -> Self {
        Self { major, minor, profile }
    }

    /// The "let the platform decide" request used after every candidate failed
    pub const fn unconstrained() -> Self {
        Self::new(0, 0, Profile::Any)
    }

    /// Whether this is the unconstrained request
    pub fn is_unconstrained(&self) -> bool {
        self.profile == Profile::Any
    }

    /// Whether a context created from this request counts as a core context
    pub fn is_core(&self) -> bool {
        self.profile == Profile::Core
    }
}

impl fmt::Display for VersionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.profile {
            Profile::Es => write!(f, "GLES {}.{}", self.major, self.minor),
            Profile::Core => write!(f, "GL {}.{} core", self.major, self.minor),
            Profile::Compatibility => write!(f, "GL {}.{} compat", self.major, self.minor),
            Profile::Any => write!(f, "unconstrained"),
        }
    }
}

const GLES_VERSIONS: [(u32, u32); 4] = [(3, 2), (3, 1), (3, 0), (2, 0)];

const DESKTOP_VERSIONS: [(u32, u32); 11] = [
    (4, 6), (4, 5), (4, 4), (4, 3), (4, 2), (4, 1), (4, 0),
    (3, 3), (3, 2), (3, 1), (3, 0),
];

/// Which GL family and surface path this process renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTarget {
    /// API family
    pub api: ApiFamily,
    /// Surface binding path
    pub surface: SurfacePath,
}

impl RenderTarget {
    /// Desktop GL attached directly to the window
    pub const fn desktop() -> Self {
        Self { api: ApiFamily::DesktopGl, surface: SurfacePath::Native }
    }

    /// GLES attached directly to the window
    pub const fn gles() -> Self {
        Self { api: ApiFamily::Gles, surface: SurfacePath::Native }
    }

    /// Same API, routed through an explicit display binding
    pub const fn with_display(self, framebuffer_device: bool) -> Self {
        Self { api: self.api, surface: SurfacePath::Display { framebuffer_device } }
    }

    /// Target selected by the cargo features this crate was built with
    pub fn build_default() -> Self {
        let base = if cfg!(feature = "gles") { Self::gles() } else { Self::desktop() };
        if cfg!(feature = "fbdev") {
            base.with_display(true)
        } else if cfg!(feature = "egl") {
            base.with_display(false)
        } else {
            base
        }
    }

    /// Version candidates for this target, most preferred first
    ///
    /// ES and desktop lists are disjoint.
    pub fn version_candidates(&self) -> Vec<VersionCandidate> {
        match self.api {
            ApiFamily::Gles => GLES_VERSIONS
                .iter()
                .map(|&(major, minor)| VersionCandidate::new(major, minor, Profile::Es))
                .collect(),
            ApiFamily::DesktopGl => DESKTOP_VERSIONS
                .iter()
                .map(|&(major, minor)| VersionCandidate::new(major, minor, Profile::Core))
                .collect(),
        }
    }

    /// Whether window-surface capability participates in config scoring
    pub fn scores_window_surfaces(&self) -> bool {
        !matches!(self.surface, SurfacePath::Display { framebuffer_device: true })
    }

    /// Whether config selection and surface binding go through a display binding
    pub fn uses_display(&self) -> bool {
        matches!(self.surface, SurfacePath::Display { .. })
    }
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self::build_default()
    }
}

//! Error taxonomy for context initialization

use super::target::VersionCandidate;
use std::fmt;
use thiserror::Error;

/// Error code reported by an EGL-style display binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EglErrorCode {
    /// `EGL_SUCCESS`, or no error recorded
    Success,
    /// `EGL_NOT_INITIALIZED`
    NotInitialized,
    /// `EGL_BAD_ACCESS`
    BadAccess,
    /// `EGL_BAD_ALLOC`
    BadAlloc,
    /// `EGL_BAD_ATTRIBUTE`
    BadAttribute,
    /// `EGL_BAD_CONFIG`
    BadConfig,
    /// `EGL_BAD_CONTEXT`
    BadContext,
    /// `EGL_BAD_CURRENT_SURFACE`
    BadCurrentSurface,
    /// `EGL_BAD_DISPLAY`
    BadDisplay,
    /// `EGL_BAD_MATCH`
    BadMatch,
    /// `EGL_BAD_NATIVE_PIXMAP`
    BadNativePixmap,
    /// `EGL_BAD_NATIVE_WINDOW`
    BadNativeWindow,
    /// `EGL_BAD_PARAMETER`
    BadParameter,
    /// `EGL_BAD_SURFACE`
    BadSurface,
    /// `EGL_CONTEXT_LOST`
    ContextLost,
    /// Anything else
    Unknown(i32),
}

impl EglErrorCode {
    /// Map a raw `eglGetError` value
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 | 0x3000 => Self::Success,
            0x3001 => Self::NotInitialized,
            0x3002 => Self::BadAccess,
            0x3003 => Self::BadAlloc,
            0x3004 => Self::BadAttribute,
            0x3005 => Self::BadConfig,
            0x3006 => Self::BadContext,
            0x3007 => Self::BadCurrentSurface,
            0x3008 => Self::BadDisplay,
            0x3009 => Self::BadMatch,
            0x300A => Self::BadNativePixmap,
            0x300B => Self::BadNativeWindow,
            0x300C => Self::BadParameter,
            0x300D => Self::BadSurface,
            0x300E => Self::ContextLost,
            other => Self::Unknown(other),
        }
    }

    /// Symbolic EGL name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success => "EGL_SUCCESS",
            Self::NotInitialized => "EGL_NOT_INITIALIZED",
            Self::BadAccess => "EGL_BAD_ACCESS",
            Self::BadAlloc => "EGL_BAD_ALLOC",
            Self::BadAttribute => "EGL_BAD_ATTRIBUTE",
            Self::BadConfig => "EGL_BAD_CONFIG",
            Self::BadContext => "EGL_BAD_CONTEXT",
            Self::BadCurrentSurface => "EGL_BAD_CURRENT_SURFACE",
            Self::BadDisplay => "EGL_BAD_DISPLAY",
            Self::BadMatch => "EGL_BAD_MATCH",
            Self::BadNativePixmap => "EGL_BAD_NATIVE_PIXMAP",
            Self::BadNativeWindow => "EGL_BAD_NATIVE_WINDOW",
            Self::BadParameter => "EGL_BAD_PARAMETER",
            Self::BadSurface => "EGL_BAD_SURFACE",
            Self::ContextLost => "EGL_CONTEXT_LOST",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for EglErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown (0x{code:X})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Display binding failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// No display binding was supplied for a target that needs one
    #[error("no display binding available for this render target")]
    Unavailable,

    /// The native display could not be opened
    #[error("unable to open display: {0}")]
    OpenFailed(EglErrorCode),

    /// The display could not be initialized
    #[error("unable to initialize display: {0}")]
    InitializeFailed(EglErrorCode),

    /// Querying the config list failed
    #[error("unable to enumerate configs: {0}")]
    ConfigQueryFailed(EglErrorCode),

    /// Context creation on the selected config failed
    #[error("unable to create context: {0}")]
    ContextCreationFailed(EglErrorCode),

    /// Window surface creation failed
    #[error("unable to create window surface: {0}")]
    SurfaceCreationFailed(EglErrorCode),

    /// The context could not be made current on the surface
    #[error("unable to make context current: {0}")]
    MakeCurrentFailed(EglErrorCode),

    /// Buffer swap failed
    #[error("swap buffers failed: {0}")]
    SwapFailed(EglErrorCode),
}

/// Context initialization errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    /// The display reported zero configs, or the query itself failed
    #[error("display reported no rendering configs")]
    ConfigEnumerationFailed,

    /// No config scored above zero
    #[error("unable to find a usable config")]
    NoUsableConfig,

    /// Window creation failed for one candidate (recoverable)
    #[error("window creation failed for {version}: {reason}")]
    WindowCreationFailed {
        /// Candidate being attempted
        version: VersionCandidate,
        /// Platform message
        reason: String,
    },

    /// Context creation failed for one candidate (recoverable)
    #[error("context creation failed for {version}: {reason}")]
    ContextCreationFailed {
        /// Candidate being attempted
        version: VersionCandidate,
        /// Platform message
        reason: String,
    },

    /// Every candidate and the unconstrained fallback failed
    #[error("no GL context available after {attempts} attempts: {last_error}")]
    TotalNegotiationFailure {
        /// Number of creation attempts including the fallback
        attempts: usize,
        /// Message from the final attempt
        last_error: String,
    },

    /// Post-init extension probing failed
    #[error("extension check failed: {0}")]
    ExtensionCheckFailed(String),

    /// The negotiated context is older than required
    #[error("this program requires OpenGL {}.{} (context reports {}.{})", required.0, required.1, found.0, found.1)]
    InsufficientApiVersion {
        /// Minimum (major, minor)
        required: (u32, u32),
        /// Reported (major, minor)
        found: (u32, u32),
    },

    /// The render backend factory could not wrap the context
    #[error("render backend creation failed: {0}")]
    BackendCreationFailed(String),

    /// Display binding failure while finalizing the surface
    #[error("display error: {0}")]
    Display(#[from] DisplayError),

    /// `init` was called while a context is live
    #[error("graphics context is already initialized")]
    AlreadyInitialized,
}

impl ContextError {
    /// Nonzero status code handed to callers of the status-style entry point
    ///
    /// Total negotiation failure reports 2; every other fatal error reports 1.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::TotalNegotiationFailure { .. } => 2,
            _ => 1,
        }
    }

    /// Whether the negotiator may move on to the next candidate
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::WindowCreationFailed { .. } | Self::ContextCreationFailed { .. }
        )
    }
}

/// Result type for context operations
pub type ContextResult<T> = Result<T, ContextError>;

//! Post-initialization feature checks

use super::config_select::ApiVersionClass;
use super::error::{ContextError, ContextResult};
use super::target::{ApiFamily, VersionCandidate};

/// What was negotiated, as seen by feature detection and backend creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextInfo {
    /// The request that produced the context
    pub requested: VersionCandidate,
    /// Version the live context reports, when known
    pub reported: Option<(u32, u32)>,
    /// API family of the render target
    pub api: ApiFamily,
    /// Whether the context is a desktop core-profile context
    pub core_context: bool,
    /// Client version chosen by config selection on the display path
    pub client_version: ApiVersionClass,
}

impl ContextInfo {
    /// Reported version, or the requested one when the platform cannot tell
    pub fn effective_version(&self) -> (u32, u32) {
        self.reported
            .unwrap_or((self.requested.major, self.requested.minor))
    }
}

/// GPU feature detection collaborator
pub trait GpuFeatures {
    /// Probe extensions once the context is current
    ///
    /// `supported` answers extension queries against the live context. Core
    /// contexts may hide extensions from the usual string, so implementations
    /// should not treat a missing compatibility-only extension as fatal there.
    fn check_extensions(
        &mut self,
        info: &ContextInfo,
        supported: &dyn Fn(&str) -> bool,
    ) -> Result<(), String>;
}

/// Feature checker that requires a fixed list of extensions
#[derive(Debug, Clone, Default)]
pub struct RequiredExtensions {
    names: Vec<String>,
}

impl RequiredExtensions {
    /// Require every extension in `names`
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl GpuFeatures for RequiredExtensions {
    fn check_extensions(
        &mut self,
        info: &ContextInfo,
        supported: &dyn Fn(&str) -> bool,
    ) -> Result<(), String> {
        if info.core_context {
            log::debug!("core context: extension lookups may be elided by the driver");
        }

        let missing: Vec<&str> = self
            .names
            .iter()
            .map(String::as_str)
            .filter(|name| !supported(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("missing extensions: {}", missing.join(", ")))
        }
    }
}

/// Validate a freshly negotiated context
///
/// Desktop contexts must meet `min_desktop`; GLES targets skip the version
/// gate. Extension probing runs for every target.
pub fn validate_context(
    features: &mut dyn GpuFeatures,
    info: &ContextInfo,
    supported: &dyn Fn(&str) -> bool,
    min_desktop: (u32, u32),
) -> ContextResult<()> {
    if info.api == ApiFamily::DesktopGl {
        let found = info.effective_version();
        if found < min_desktop {
            log::error!(
                "this program requires OpenGL {}.{}, context reports {}.{}",
                min_desktop.0,
                min_desktop.1,
                found.0,
                found.1
            );
            return Err(ContextError::InsufficientApiVersion {
                required: min_desktop,
                found,
            });
        }
        log::info!(
            "OpenGL {}.{} or higher ({}.{})",
            min_desktop.0,
            min_desktop.1,
            found.0,
            found.1
        );
    }

    features
        .check_extensions(info, supported)
        .map_err(ContextError::ExtensionCheckFailed)
}

//! Configuration system

pub use serde::{Deserialize, Serialize};

use crate::context::{RenderTarget, VersionCandidate, WindowModeFlags, WindowParams, DEFAULT_MIN_DESKTOP_VERSION};
use crate::foundation::logging::LoggingConfig;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, picking the format from `path`'s extension
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Window creation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width
    pub width: u32,
    /// Client area height
    pub height: u32,
    /// Horizontal position of the top-left corner
    pub x: i32,
    /// Vertical position of the top-left corner
    pub y: i32,
    /// Fullscreen on the primary monitor
    pub fullscreen: bool,
    /// User-resizable
    pub resizable: bool,
    /// No decorations
    pub borderless: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "gl_probe".to_string(),
            width: 1280,
            height: 720,
            x: 100,
            y: 100,
            fullscreen: false,
            resizable: false,
            borderless: false,
        }
    }
}

impl WindowConfig {
    /// Mode flags implied by the boolean settings
    pub fn flags(&self) -> WindowModeFlags {
        let mut flags = WindowModeFlags::empty();
        flags.set(WindowModeFlags::FULLSCREEN, self.fullscreen);
        flags.set(WindowModeFlags::RESIZABLE, self.resizable);
        flags.set(WindowModeFlags::BORDERLESS, self.borderless);
        flags
    }

    /// Parameters for the negotiator
    pub fn to_params(&self) -> WindowParams {
        WindowParams::new(self.title.clone(), self.x, self.y, self.width, self.height).with_flags(self.flags())
    }
}

/// Top-level configuration for context creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Render target override; the build's default when absent
    pub target: Option<RenderTarget>,
    /// Version candidates override, most preferred first
    pub versions: Option<Vec<VersionCandidate>>,
    /// Minimum desktop GL version accepted after negotiation
    pub min_desktop_version: (u32, u32),
    /// Extensions the context must support
    pub required_extensions: Vec<String>,
    /// Logger settings
    pub logging: LoggingConfig,
    /// Frames the probe presents before shutting down
    pub probe_frames: u32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            target: None,
            versions: None,
            min_desktop_version: DEFAULT_MIN_DESKTOP_VERSION,
            required_extensions: Vec::new(),
            logging: LoggingConfig::default(),
            probe_frames: 3,
        }
    }
}

impl Config for ContextConfig {}

impl ContextConfig {
    /// Configured target, or the one selected by cargo features
    pub fn resolve_target(&self) -> RenderTarget {
        self.target.unwrap_or_else(RenderTarget::build_default)
    }

    /// Configured candidates, or the target's default list
    pub fn candidates(&self) -> Vec<VersionCandidate> {
        self.versions
            .clone()
            .unwrap_or_else(|| self.resolve_target().version_candidates())
    }
}

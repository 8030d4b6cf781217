//! Rendering config scoring and selection
//!
//! Display bindings advertise many configs that differ in color depth,
//! multisampling, renderable APIs and vendor quirks. Every config gets a
//! weighted score and the first config with the strictly highest score wins.
//! The weights are tuned against real drivers and must stay as they are; in
//! particular channels wider than 8 bits score 1, not 0.

use super::error::{ContextError, ContextResult};
use super::target::{ApiFamily, RenderTarget};
use std::fmt;

/// Vendor string whose drivers composite alpha backbuffers badly (Mali)
pub const ALPHA_AVOIDING_VENDOR: &str = "ARM";

const EGL_NONE: i32 = 0x3038;
const EGL_SLOW_CONFIG: i32 = 0x3050;
const EGL_NON_CONFORMANT_CONFIG: i32 = 0x3051;
const EGL_TRANSPARENT_RGB: i32 = 0x3052;
const EGL_CONTEXT_CLIENT_VERSION: i32 = 0x3098;

/// Attribute keys readable from a config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigAttrib {
    /// Red channel bits
    RedSize,
    /// Green channel bits
    GreenSize,
    /// Blue channel bits
    BlueSize,
    /// Alpha channel bits
    AlphaSize,
    /// Depth buffer bits
    DepthSize,
    /// Stencil buffer bits
    StencilSize,
    /// Frame buffer level (overlay/underlay)
    Level,
    /// Samples per pixel
    Samples,
    /// Number of multisample buffers
    SampleBuffers,
    /// Transparency mode
    TransparentType,
    /// Conformance caveat
    ConfigCaveat,
    /// Supported surface kinds
    SurfaceType,
    /// Client APIs the config can render
    RenderableType,
}

impl ConfigAttrib {
    /// Every attribute the scorer reads
    pub const ALL: [ConfigAttrib; 13] = [
        Self::RedSize,
        Self::GreenSize,
        Self::BlueSize,
        Self::AlphaSize,
        Self::DepthSize,
        Self::StencilSize,
        Self::Level,
        Self::Samples,
        Self::SampleBuffers,
        Self::TransparentType,
        Self::ConfigCaveat,
        Self::SurfaceType,
        Self::RenderableType,
    ];

    /// EGL attribute enum value
    pub fn egl_code(self) -> i32 {
        match self {
            Self::AlphaSize => 0x3021,
            Self::BlueSize => 0x3022,
            Self::GreenSize => 0x3023,
            Self::RedSize => 0x3024,
            Self::DepthSize => 0x3025,
            Self::StencilSize => 0x3026,
            Self::ConfigCaveat => 0x3027,
            Self::Level => 0x3029,
            Self::Samples => 0x3031,
            Self::SampleBuffers => 0x3032,
            Self::SurfaceType => 0x3033,
            Self::TransparentType => 0x3034,
            Self::RenderableType => 0x3040,
        }
    }
}

bitflags::bitflags! {
    /// `EGL_SURFACE_TYPE` bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SurfaceType: i32 {
        /// Pbuffer surfaces
        const PBUFFER = 0x0001;
        /// Pixmap surfaces
        const PIXMAP = 0x0002;
        /// Window surfaces
        const WINDOW = 0x0004;
    }
}

bitflags::bitflags! {
    /// `EGL_RENDERABLE_TYPE` bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderableType: i32 {
        /// OpenGL ES 1.x
        const OPENGL_ES = 0x0001;
        /// OpenVG
        const OPENVG = 0x0002;
        /// OpenGL ES 2.x
        const OPENGL_ES2 = 0x0004;
        /// Desktop OpenGL
        const OPENGL = 0x0008;
        /// OpenGL ES 3.x (`EGL_OPENGL_ES3_BIT_KHR`)
        const OPENGL_ES3 = 0x0040;
    }
}

/// `EGL_CONFIG_CAVEAT` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCaveat {
    /// No caveat
    None,
    /// Slow (typically software) config
    Slow,
    /// Fails conformance tests
    NonConformant,
    /// Unrecognized value
    Other(i32),
}

impl ConfigCaveat {
    /// Decode a raw attribute value
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            EGL_NONE => Self::None,
            EGL_SLOW_CONFIG => Self::Slow,
            EGL_NON_CONFORMANT_CONFIG => Self::NonConformant,
            other => Self::Other(other),
        }
    }

    /// Raw attribute value
    pub fn to_raw(self) -> i32 {
        match self {
            Self::None => EGL_NONE,
            Self::Slow => EGL_SLOW_CONFIG,
            Self::NonConformant => EGL_NON_CONFORMANT_CONFIG,
            Self::Other(raw) => raw,
        }
    }
}

/// `EGL_TRANSPARENT_TYPE` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransparentType {
    /// Opaque
    None,
    /// Transparent RGB key
    Rgb,
    /// Unrecognized value
    Other(i32),
}

impl TransparentType {
    /// Decode a raw attribute value
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            EGL_NONE => Self::None,
            EGL_TRANSPARENT_RGB => Self::Rgb,
            other => Self::Other(other),
        }
    }

    /// Raw attribute value
    pub fn to_raw(self) -> i32 {
        match self {
            Self::None => EGL_NONE,
            Self::Rgb => EGL_TRANSPARENT_RGB,
            Self::Other(raw) => raw,
        }
    }
}

/// Attribute values of one config, read once before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigAttribs {
    /// Red channel bits
    pub red: i32,
    /// Green channel bits
    pub green: i32,
    /// Blue channel bits
    pub blue: i32,
    /// Alpha channel bits
    pub alpha: i32,
    /// Depth buffer bits
    pub depth: i32,
    /// Stencil buffer bits
    pub stencil: i32,
    /// Frame buffer level
    pub level: i32,
    /// Samples per pixel
    pub samples: i32,
    /// Multisample buffer count
    pub sample_buffers: i32,
    /// Transparency mode
    pub transparent: TransparentType,
    /// Conformance caveat
    pub caveat: ConfigCaveat,
    /// Supported surface kinds
    pub surface_type: SurfaceType,
    /// Renderable client APIs
    pub renderable: RenderableType,
}

impl ConfigAttribs {
    /// Read every scored attribute through `read`
    pub fn read(mut read: impl FnMut(ConfigAttrib) -> i32) -> Self {
        Self {
            red: read(ConfigAttrib::RedSize),
            green: read(ConfigAttrib::GreenSize),
            blue: read(ConfigAttrib::BlueSize),
            alpha: read(ConfigAttrib::AlphaSize),
            depth: read(ConfigAttrib::DepthSize),
            stencil: read(ConfigAttrib::StencilSize),
            level: read(ConfigAttrib::Level),
            samples: read(ConfigAttrib::Samples),
            sample_buffers: read(ConfigAttrib::SampleBuffers),
            transparent: TransparentType::from_raw(read(ConfigAttrib::TransparentType)),
            caveat: ConfigCaveat::from_raw(read(ConfigAttrib::ConfigCaveat)),
            surface_type: SurfaceType::from_bits_truncate(read(ConfigAttrib::SurfaceType)),
            renderable: RenderableType::from_bits_truncate(read(ConfigAttrib::RenderableType)),
        }
    }

    /// Raw value of one attribute, the inverse of [`ConfigAttribs::read`]
    pub fn attrib(&self, attrib: ConfigAttrib) -> i32 {
        match attrib {
            ConfigAttrib::RedSize => self.red,
            ConfigAttrib::GreenSize => self.green,
            ConfigAttrib::BlueSize => self.blue,
            ConfigAttrib::AlphaSize => self.alpha,
            ConfigAttrib::DepthSize => self.depth,
            ConfigAttrib::StencilSize => self.stencil,
            ConfigAttrib::Level => self.level,
            ConfigAttrib::Samples => self.samples,
            ConfigAttrib::SampleBuffers => self.sample_buffers,
            ConfigAttrib::TransparentType => self.transparent.to_raw(),
            ConfigAttrib::ConfigCaveat => self.caveat.to_raw(),
            ConfigAttrib::SurfaceType => self.surface_type.bits(),
            ConfigAttrib::RenderableType => self.renderable.bits(),
        }
    }
}

impl Default for ConfigAttribs {
    fn default() -> Self {
        Self {
            red: 0,
            green: 0,
            blue: 0,
            alpha: 0,
            depth: 0,
            stencil: 0,
            level: 0,
            samples: 0,
            sample_buffers: 0,
            transparent: TransparentType::None,
            caveat: ConfigCaveat::None,
            surface_type: SurfaceType::empty(),
            renderable: RenderableType::empty(),
        }
    }
}

/// Build-dependent inputs to scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringProfile {
    /// Which renderable path is weighted
    pub api: ApiFamily,
    /// Whether window-surface capability is scored at all
    pub window_surfaces: bool,
}

impl ScoringProfile {
    /// Scoring inputs implied by a render target
    pub fn for_target(target: &RenderTarget) -> Self {
        Self {
            api: target.api,
            window_surfaces: target.scores_window_surfaces(),
        }
    }
}

/// Client API version class derived from a config's renderable bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApiVersionClass {
    /// Not ES-renderable; the caller picks the version
    Unspecified,
    /// OpenGL ES 2
    Es2,
    /// OpenGL ES 3
    Es3,
}

impl ApiVersionClass {
    /// Classify renderable bits: ES3 beats ES2, anything else is unspecified
    pub fn from_renderable(renderable: RenderableType) -> Self {
        if renderable.contains(RenderableType::OPENGL_ES3) {
            Self::Es3
        } else if renderable.contains(RenderableType::OPENGL_ES2) {
            Self::Es2
        } else {
            Self::Unspecified
        }
    }

    /// Numeric client version (0, 2 or 3)
    pub fn client_version(self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::Es2 => 2,
            Self::Es3 => 3,
        }
    }

    /// `EGL_NONE`-terminated context attribute list
    ///
    /// The client version attribute is only sent when the class is known.
    pub fn context_attributes(self) -> Vec<i32> {
        match self {
            Self::Unspecified => vec![EGL_NONE],
            known => vec![EGL_CONTEXT_CLIENT_VERSION, known.client_version(), EGL_NONE],
        }
    }
}

/// Per-config score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
    /// 1-based position in the enumerated list
    pub config_number: usize,
    /// Capped RGB sum
    pub color: i32,
    /// Capped alpha, inverted for alpha-avoiding vendors
    pub alpha: i32,
    /// Raw depth bits
    pub depth: i32,
    /// Raw stencil bits
    pub stencil: i32,
    /// Main-plane bonus
    pub level: i32,
    /// No-multisampling bonus
    pub samples: i32,
    /// No-sample-buffer bonus
    pub sample_buffers: i32,
    /// Opaque bonus
    pub transparent: i32,
    /// Conformance bonus
    pub caveat: i32,
    /// Window-surface bonus
    pub surface: i32,
    /// ES renderable score
    pub renderable_es: i32,
    /// Desktop renderable score
    pub renderable_desktop: i32,
    /// Weighted total
    pub total: i32,
}

/// `v` when `v <= max`, otherwise 1
///
/// Over-wide channels (HDR modes) are penalized to 1 rather than 0. Existing
/// config choices depend on the 1.
pub fn capped(v: i32, max: i32) -> i32 {
    if v > max {
        1
    } else {
        v
    }
}

/// Score one config
pub fn score_config(
    config_number: usize,
    attribs: &ConfigAttribs,
    profile: &ScoringProfile,
    avoid_alpha: bool,
) -> ScoreRecord {
    let color = capped(attribs.red, 8)
        .saturating_add(capped(attribs.blue, 8))
        .saturating_add(capped(attribs.green, 8));
    let mut alpha = capped(attribs.alpha, 8);
    let depth = attribs.depth;
    let stencil = attribs.stencil;
    let level = if attribs.level == 0 { 100 } else { 0 };
    let samples = if attribs.samples == 0 { 100 } else { 0 };
    let sample_buffers = if attribs.sample_buffers == 0 { 100 } else { 0 };
    let transparent = if attribs.transparent == TransparentType::None { 50 } else { 0 };
    let caveat = match attribs.caveat {
        ConfigCaveat::None => 100,
        ConfigCaveat::NonConformant => 50,
        _ => 0,
    };
    let surface = if profile.window_surfaces && attribs.surface_type.contains(SurfaceType::WINDOW) {
        100
    } else {
        0
    };

    let es3 = attribs.renderable.contains(RenderableType::OPENGL_ES3);
    let es2 = attribs.renderable.contains(RenderableType::OPENGL_ES2);
    let gl = attribs.renderable.contains(RenderableType::OPENGL);
    let (renderable_es, renderable_desktop) = match profile.api {
        ApiFamily::Gles => (if es3 { 100 } else if es2 { 80 } else { 0 }, 0),
        ApiFamily::DesktopGl => (0, if gl { 100 } else if es3 { 80 } else { 0 }),
    };

    if avoid_alpha && renderable_es > 0 {
        alpha = 8i32.saturating_sub(alpha);
    }

    // attribute values come straight from the driver; saturate instead of overflowing
    let mut total = [
        color.saturating_mul(10),
        alpha.saturating_mul(2),
        depth.saturating_mul(5),
        stencil,
        level,
        samples,
        sample_buffers,
        transparent,
        caveat,
        renderable_es,
        renderable_desktop,
    ]
    .into_iter()
    .fold(0, i32::saturating_add);
    if profile.window_surfaces {
        total = total.saturating_add(surface);
    }

    ScoreRecord {
        config_number,
        color,
        alpha,
        depth,
        stencil,
        level,
        samples,
        sample_buffers,
        transparent,
        caveat,
        surface,
        renderable_es,
        renderable_desktop,
        total,
    }
}

/// Score breakdown for every config of one selection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    /// One record per config, in enumeration order
    pub records: Vec<ScoreRecord>,
    /// 1-based number of the chosen config, 0 when none was chosen
    pub chosen: usize,
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: [(&str, fn(&ScoreRecord) -> i64); 14] = [
            ("Config:", |r| r.config_number as i64),
            ("Colour:", |r| i64::from(r.color)),
            ("Alpha:", |r| i64::from(r.alpha)),
            ("Depth:", |r| i64::from(r.depth)),
            ("Stencl:", |r| i64::from(r.stencil)),
            ("Level:", |r| i64::from(r.level)),
            ("Sample:", |r| i64::from(r.samples)),
            ("Buffer:", |r| i64::from(r.sample_buffers)),
            ("Trans:", |r| i64::from(r.transparent)),
            ("Caveat:", |r| i64::from(r.caveat)),
            ("Surf:", |r| i64::from(r.surface)),
            ("GLES:", |r| i64::from(r.renderable_es)),
            ("GL:", |r| i64::from(r.renderable_desktop)),
            ("TOTAL:", |r| i64::from(r.total)),
        ];
        writeln!(f, "Config scores:")?;
        for (heading, value) in rows {
            write!(f, "{heading}\t")?;
            for record in &self.records {
                write!(f, "{}\t", value(record))?;
            }
            writeln!(f)?;
        }
        write!(f, "Heuristics chose config #{}", self.chosen)
    }
}

/// Outcome of a selection run
#[derive(Debug, Clone)]
pub struct ConfigSelection<C> {
    /// The winning config handle
    pub config: C,
    /// Index of the winner in the input list
    pub index: usize,
    /// Client API version class of the winner
    pub api_version: ApiVersionClass,
    /// Full score breakdown
    pub scores: ScoreTable,
}

/// Pick the best config
///
/// `read` is the attribute accessor of the display binding. The first config
/// whose total is strictly greater than every earlier one (and above zero)
/// wins, so ties keep the earliest config. An empty list has no usable
/// config; callers that enumerate configs report an empty enumeration
/// themselves.
pub fn select_best_config<C, F>(
    configs: &[C],
    mut read: F,
    vendor: Option<&str>,
    profile: &ScoringProfile,
) -> ContextResult<ConfigSelection<C>>
where
    C: Clone,
    F: FnMut(&C, ConfigAttrib) -> i32,
{
    let avoid_alpha = vendor == Some(ALPHA_AVOIDING_VENDOR);
    if avoid_alpha {
        log::debug!("vendor {ALPHA_AVOIDING_VENDOR}: preferring configs without alpha");
    }

    let mut table = ScoreTable {
        records: Vec::with_capacity(configs.len()),
        chosen: 0,
    };
    let mut best: Option<(usize, ApiVersionClass)> = None;
    let mut best_score = 0;

    for (index, config) in configs.iter().enumerate() {
        let attribs = ConfigAttribs::read(|attrib| read(config, attrib));
        let record = score_config(index + 1, &attribs, profile, avoid_alpha);

        if record.total > best_score {
            best_score = record.total;
            best = Some((index, ApiVersionClass::from_renderable(attribs.renderable)));
            table.chosen = index + 1;
        }
        table.records.push(record);
    }

    log::debug!("{table}");

    let (index, api_version) = best.ok_or(ContextError::NoUsableConfig)?;
    log::info!(
        "selected config #{} of {} (score {best_score}, client version {})",
        index + 1,
        configs.len(),
        api_version.client_version()
    );

    Ok(ConfigSelection {
        config: configs[index].clone(),
        index,
        api_version,
        scores: table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::target::RenderTarget;

    fn desktop() -> ScoringProfile {
        ScoringProfile::for_target(&RenderTarget::desktop())
    }

    fn gles() -> ScoringProfile {
        ScoringProfile::for_target(&RenderTarget::gles())
    }

    fn rgba8() -> ConfigAttribs {
        ConfigAttribs {
            red: 8,
            green: 8,
            blue: 8,
            alpha: 8,
            depth: 24,
            stencil: 8,
            surface_type: SurfaceType::WINDOW,
            ..ConfigAttribs::default()
        }
    }

    fn select(configs: &[ConfigAttribs], vendor: Option<&str>, profile: &ScoringProfile) -> ConfigSelection<ConfigAttribs> {
        select_best_config(configs, |c, a| c.attrib(a), vendor, profile).unwrap()
    }

    #[test]
    fn test_capped_boundaries() {
        assert_eq!(capped(0, 8), 0);
        assert_eq!(capped(5, 8), 5);
        assert_eq!(capped(8, 8), 8);
        assert_eq!(capped(9, 8), 1);
        assert_eq!(capped(10, 8), 1);
    }

    #[test]
    fn test_read_decodes_raw_attributes() {
        let source = ConfigAttribs {
            caveat: ConfigCaveat::Slow,
            transparent: TransparentType::Rgb,
            renderable: RenderableType::OPENGL | RenderableType::OPENGL_ES2,
            ..rgba8()
        };
        let decoded = ConfigAttribs::read(|a| source.attrib(a));
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_full_score_desktop() {
        let attribs = ConfigAttribs {
            renderable: RenderableType::OPENGL,
            ..rgba8()
        };
        let record = score_config(1, &attribs, &desktop(), false);
        assert_eq!(record.color, 24);
        assert_eq!(record.alpha, 8);
        assert_eq!(record.renderable_desktop, 100);
        assert_eq!(record.renderable_es, 0);
        assert_eq!(record.surface, 100);
        // 240 + 16 + 120 + 8 + 100 + 100 + 100 + 50 + 100 + 100 + 100
        assert_eq!(record.total, 1034);
    }

    #[test]
    fn test_hdr_channels_score_one() {
        let attribs = ConfigAttribs {
            red: 10,
            green: 10,
            blue: 10,
            alpha: 2,
            ..ConfigAttribs::default()
        };
        let record = score_config(1, &attribs, &desktop(), false);
        assert_eq!(record.color, 3);
        assert_eq!(record.alpha, 2);
    }

    #[test]
    fn test_caveat_and_transparency_scores() {
        let base = rgba8();
        let slow = score_config(1, &ConfigAttribs { caveat: ConfigCaveat::Slow, ..base }, &desktop(), false);
        let non_conformant = score_config(1, &ConfigAttribs { caveat: ConfigCaveat::NonConformant, ..base }, &desktop(), false);
        let keyed = score_config(1, &ConfigAttribs { transparent: TransparentType::Rgb, ..base }, &desktop(), false);
        assert_eq!(slow.caveat, 0);
        assert_eq!(non_conformant.caveat, 50);
        assert_eq!(keyed.transparent, 0);
    }

    #[test]
    fn test_gles_renderable_weights() {
        let es3 = ConfigAttribs { renderable: RenderableType::OPENGL_ES3 | RenderableType::OPENGL_ES2, ..rgba8() };
        let es2 = ConfigAttribs { renderable: RenderableType::OPENGL_ES2, ..rgba8() };
        let gl = ConfigAttribs { renderable: RenderableType::OPENGL, ..rgba8() };
        assert_eq!(score_config(1, &es3, &gles(), false).renderable_es, 100);
        assert_eq!(score_config(1, &es2, &gles(), false).renderable_es, 80);
        assert_eq!(score_config(1, &gl, &gles(), false).renderable_es, 0);
        assert_eq!(score_config(1, &gl, &gles(), false).renderable_desktop, 0);
    }

    #[test]
    fn test_desktop_renderable_weights() {
        let es3 = ConfigAttribs { renderable: RenderableType::OPENGL_ES3, ..rgba8() };
        let es2 = ConfigAttribs { renderable: RenderableType::OPENGL_ES2, ..rgba8() };
        assert_eq!(score_config(1, &es3, &desktop(), false).renderable_desktop, 80);
        assert_eq!(score_config(1, &es2, &desktop(), false).renderable_desktop, 0);
        assert_eq!(score_config(1, &es3, &desktop(), false).renderable_es, 0);
    }

    #[test]
    fn test_alpha_inversion_for_arm_es_configs() {
        let attribs = ConfigAttribs { renderable: RenderableType::OPENGL_ES3, ..rgba8() };
        let record = score_config(1, &attribs, &gles(), true);
        assert_eq!(record.alpha, 0);

        let no_alpha = ConfigAttribs { alpha: 0, ..attribs };
        assert_eq!(score_config(1, &no_alpha, &gles(), true).alpha, 8);
    }

    #[test]
    fn test_alpha_inversion_needs_es_renderable_score() {
        // Desktop builds zero the ES score, so the vendor quirk never applies
        let attribs = ConfigAttribs { renderable: RenderableType::OPENGL_ES3, ..rgba8() };
        assert_eq!(score_config(1, &attribs, &desktop(), true).alpha, 8);

        let not_es = ConfigAttribs { renderable: RenderableType::OPENGL, ..rgba8() };
        assert_eq!(score_config(1, &not_es, &gles(), true).alpha, 8);
    }

    #[test]
    fn test_alpha_inversion_needs_exact_vendor() {
        let configs = [ConfigAttribs { renderable: RenderableType::OPENGL_ES3, ..rgba8() }];
        let arm = select(&configs, Some("ARM"), &gles());
        let arm_lower = select(&configs, Some("arm"), &gles());
        let none = select(&configs, None, &gles());
        assert_eq!(arm.scores.records[0].alpha, 0);
        assert_eq!(arm_lower.scores.records[0].alpha, 8);
        assert_eq!(none.scores.records[0].alpha, 8);
    }

    #[test]
    fn test_framebuffer_device_omits_surface_term() {
        let target = RenderTarget::gles().with_display(true);
        let profile = ScoringProfile::for_target(&target);
        let attribs = ConfigAttribs { renderable: RenderableType::OPENGL_ES3, ..rgba8() };
        let with = score_config(1, &attribs, &gles(), false);
        let without = score_config(1, &attribs, &profile, false);
        assert_eq!(without.surface, 0);
        assert_eq!(with.total - without.total, 100);
    }

    #[test]
    fn test_end_to_end_depth_outweighs_multisampling() {
        let first = ConfigAttribs {
            depth: 24,
            stencil: 8,
            samples: 0,
            surface_type: SurfaceType::WINDOW,
            renderable: RenderableType::OPENGL,
            ..ConfigAttribs::default()
        };
        let second = ConfigAttribs {
            depth: 16,
            stencil: 0,
            samples: 4,
            surface_type: SurfaceType::WINDOW,
            renderable: RenderableType::OPENGL,
            ..ConfigAttribs::default()
        };
        let selection = select(&[first, second], None, &desktop());
        assert_eq!(selection.index, 0);
        assert_eq!(selection.config, first);
        assert_eq!(selection.api_version, ApiVersionClass::Unspecified);
        assert_eq!(selection.scores.chosen, 1);
    }

    #[test]
    fn test_ties_keep_first_config() {
        let a = ConfigAttribs { renderable: RenderableType::OPENGL, ..rgba8() };
        let b = a;
        let selection = select(&[a, b], None, &desktop());
        assert_eq!(selection.index, 0);
    }

    #[test]
    fn test_winner_has_maximal_score() {
        let configs = [
            ConfigAttribs { renderable: RenderableType::OPENGL_ES2, samples: 4, ..rgba8() },
            ConfigAttribs { renderable: RenderableType::OPENGL_ES3, ..rgba8() },
            ConfigAttribs { renderable: RenderableType::OPENGL_ES3, depth: 16, ..rgba8() },
            ConfigAttribs { red: 10, green: 10, blue: 10, ..rgba8() },
        ];
        let selection = select(&configs, Some("ARM"), &gles());
        let winner = selection.scores.records[selection.index].total;
        assert!(selection.scores.records.iter().all(|r| r.total <= winner));
        assert!(configs.contains(&selection.config));
        assert_eq!(selection.api_version, ApiVersionClass::Es3);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let attribs = ConfigAttribs { renderable: RenderableType::OPENGL_ES2, ..rgba8() };
        let first = score_config(3, &attribs, &gles(), true);
        let second = score_config(3, &attribs, &gles(), true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_list_has_no_usable_config() {
        let configs: [ConfigAttribs; 0] = [];
        let result = select_best_config(&configs, |c, a| c.attrib(a), None, &desktop());
        assert!(matches!(result, Err(ContextError::NoUsableConfig)));
    }

    #[test]
    fn test_huge_driver_values_saturate() {
        let deep = ConfigAttribs { depth: i32::MAX / 4, ..rgba8() };
        let record = score_config(1, &deep, &desktop(), false);
        assert_eq!(record.total, i32::MAX);

        let selection = select(&[rgba8(), deep], None, &desktop());
        assert_eq!(selection.index, 1);
    }

    #[test]
    fn test_negative_driver_values_do_not_overflow() {
        let broken = ConfigAttribs {
            red: i32::MIN,
            green: i32::MIN,
            alpha: i32::MIN,
            depth: i32::MIN,
            stencil: i32::MIN,
            ..ConfigAttribs::default()
        };
        let record = score_config(1, &broken, &gles(), true);
        assert!(record.total < 0);

        let selection = select(&[broken, rgba8()], None, &gles());
        assert_eq!(selection.index, 1);
    }

    #[test]
    fn test_egl_codes_are_distinct() {
        let mut codes: Vec<i32> = ConfigAttrib::ALL.iter().map(|a| a.egl_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ConfigAttrib::ALL.len());
        assert_eq!(ConfigAttrib::DepthSize.egl_code(), 0x3025);
    }

    #[test]
    fn test_all_zero_scores_are_unusable() {
        let configs = [ConfigAttribs {
            level: 1,
            samples: 4,
            sample_buffers: 1,
            transparent: TransparentType::Rgb,
            caveat: ConfigCaveat::Slow,
            ..ConfigAttribs::default()
        }];
        let result = select_best_config(&configs, |c, a| c.attrib(a), None, &desktop());
        assert!(matches!(result, Err(ContextError::NoUsableConfig)));
    }

    #[test]
    fn test_api_version_class() {
        assert_eq!(ApiVersionClass::from_renderable(RenderableType::OPENGL_ES3 | RenderableType::OPENGL_ES2), ApiVersionClass::Es3);
        assert_eq!(ApiVersionClass::from_renderable(RenderableType::OPENGL_ES2), ApiVersionClass::Es2);
        assert_eq!(ApiVersionClass::from_renderable(RenderableType::OPENGL), ApiVersionClass::Unspecified);
        assert_eq!(ApiVersionClass::Es3.context_attributes(), vec![0x3098, 3, EGL_NONE]);
        assert_eq!(ApiVersionClass::Unspecified.context_attributes(), vec![EGL_NONE]);
    }

    #[test]
    fn test_score_table_display() {
        let configs = [rgba8(), ConfigAttribs { samples: 4, ..rgba8() }];
        let selection = select(&configs, None, &desktop());
        let text = selection.scores.to_string();
        assert!(text.starts_with("Config scores:"));
        assert!(text.contains("Config:\t1\t2\t"));
        assert!(text.ends_with("Heuristics chose config #1"));
    }
}

#![forbid(unsafe_code)]

//! Interaction tuning as data.
//!
//! Captures every tunable of the interaction layer as one
//! [`InteractionConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # showroom.toml
//! [header]
//! collapse_threshold = 200.0
//!
//! [carousel]
//! auto_advance_ms = 8000
//! ```
//!
//! ```rust,ignore
//! let config = InteractionConfig::from_toml_file("showroom.toml")?;
//! let config = InteractionConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the value the site ships with, so
//! `InteractionConfig::default()` reproduces the stock behavior. Loaders
//! validate before returning; partial files fill the rest from defaults.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use showroom_core::animation::SpringConfig;
use showroom_core::pointer::PointerConfig;
use showroom_core::scroll::ScrollConfig;
use web_time::Duration;

use crate::effects::{MagneticConfig, TiltConfig};
use crate::header::HeaderConfig;

// ---------------------------------------------------------------------------
// Top-level InteractionConfig
// ---------------------------------------------------------------------------

/// Every tunable of the interaction layer.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct InteractionConfig {
    pub scroll: ScrollPolicy,
    pub header: HeaderPolicy,
    pub carousel: CarouselPolicy,
    pub magnetic: MagneticPolicy,
    pub nav_link: NavLinkPolicy,
    pub tilt: TiltPolicy,
    pub cursor: CursorPolicy,
    pub form: FormPolicy,
}

impl InteractionConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::TomlSer)
    }

    /// Return `self` if valid, otherwise the validation messages.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.scroll.quiet_ms == 0 {
            errors.push("scroll.quiet_ms must be > 0".into());
        }
        if !(0.0..1.0).contains(&self.scroll.progress_threshold) {
            errors.push(format!(
                "scroll.progress_threshold must be in [0, 1), got {}",
                self.scroll.progress_threshold
            ));
        }

        if !(self.header.collapse_threshold >= 0.0) {
            errors.push(format!(
                "header.collapse_threshold must be >= 0, got {}",
                self.header.collapse_threshold
            ));
        }
        if !(self.header.scrolled_threshold >= 0.0) {
            errors.push(format!(
                "header.scrolled_threshold must be >= 0, got {}",
                self.header.scrolled_threshold
            ));
        }
        let [lo, hi] = self.header.chrome_range;
        if !(hi > lo) {
            errors.push(format!("header.chrome_range must be increasing, got [{lo}, {hi}]"));
        }
        if self.header.blur.iter().any(|b| !(*b >= 0.0)) {
            errors.push("header.blur values must be >= 0".into());
        }
        if self.header.opacity.iter().any(|o| !(0.0..=1.0).contains(o)) {
            errors.push("header.opacity values must be in [0, 1]".into());
        }

        if self.carousel.auto_advance_ms == 0 {
            errors.push("carousel.auto_advance_ms must be > 0".into());
        }

        if !(self.magnetic.radius > 0.0) {
            errors.push(format!("magnetic.radius must be > 0, got {}", self.magnetic.radius));
        }
        check_strength(&mut errors, "magnetic.strength", self.magnetic.strength);
        check_strength(&mut errors, "nav_link.strength", self.nav_link.strength);

        if !(0.0..=90.0).contains(&self.tilt.max_tilt) {
            errors.push(format!("tilt.max_tilt must be in [0, 90], got {}", self.tilt.max_tilt));
        }
        if !(self.tilt.perspective > 0.0) {
            errors.push(format!("tilt.perspective must be > 0, got {}", self.tilt.perspective));
        }
        if !(self.tilt.hover_scale > 0.0) {
            errors.push(format!("tilt.hover_scale must be > 0, got {}", self.tilt.hover_scale));
        }

        for (name, spring) in [
            ("header.entrance_spring", self.header.entrance_spring),
            ("magnetic.spring", self.magnetic.spring),
            ("nav_link.spring", self.nav_link.spring),
            ("tilt.spring", self.tilt.spring),
            ("cursor.spring", self.cursor.spring),
        ] {
            if !(spring.stiffness > 0.0) {
                errors.push(format!("{name}.stiffness must be > 0, got {}", spring.stiffness));
            }
            if !(spring.damping >= 0.0) {
                errors.push(format!("{name}.damping must be >= 0, got {}", spring.damping));
            }
        }

        errors
    }
}

fn check_strength(errors: &mut Vec<String>, name: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(format!("{name} must be in [0, 1], got {value}"));
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Scroll tracker parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScrollPolicy {
    /// Minimum milliseconds between accepted samples.
    pub throttle_ms: u64,
    /// Silence in milliseconds before scrolling counts as finished.
    pub quiet_ms: u64,
    pub progress_threshold: f64,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            throttle_ms: 16,
            quiet_ms: 150,
            progress_threshold: 0.0,
        }
    }
}

impl ScrollPolicy {
    #[must_use]
    pub fn to_scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            throttle: Duration::from_millis(self.throttle_ms),
            quiet: Duration::from_millis(self.quiet_ms),
            progress_threshold: self.progress_threshold,
        }
    }
}

/// Header parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HeaderPolicy {
    pub collapse_threshold: f64,
    pub scrolled_threshold: f64,
    pub chrome_range: [f64; 2],
    pub blur: [f64; 2],
    pub opacity: [f64; 2],
    pub entrance_offset: f64,
    pub entrance_spring: SpringConfig,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        let d = HeaderConfig::default();
        Self {
            collapse_threshold: d.collapse_threshold,
            scrolled_threshold: d.scrolled_threshold,
            chrome_range: [d.chrome_range.0, d.chrome_range.1],
            blur: [d.blur.0, d.blur.1],
            opacity: [d.opacity.0, d.opacity.1],
            entrance_offset: d.entrance_offset,
            entrance_spring: d.entrance_spring,
        }
    }
}

impl HeaderPolicy {
    #[must_use]
    pub fn to_header_config(&self) -> HeaderConfig {
        HeaderConfig {
            collapse_threshold: self.collapse_threshold,
            scrolled_threshold: self.scrolled_threshold,
            chrome_range: (self.chrome_range[0], self.chrome_range[1]),
            blur: (self.blur[0], self.blur[1]),
            opacity: (self.opacity[0], self.opacity[1]),
            entrance_offset: self.entrance_offset,
            entrance_spring: self.entrance_spring,
        }
    }
}

/// Testimonial carousel parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CarouselPolicy {
    pub auto_advance_ms: u64,
}

impl Default for CarouselPolicy {
    fn default() -> Self {
        Self {
            auto_advance_ms: 6000,
        }
    }
}

impl CarouselPolicy {
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }
}

/// Magnetic button parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MagneticPolicy {
    pub strength: f64,
    pub radius: f64,
    pub spring: SpringConfig,
}

impl Default for MagneticPolicy {
    fn default() -> Self {
        let d = MagneticConfig::default();
        Self {
            strength: d.pointer.strength,
            radius: d.pointer.radius,
            spring: d.spring,
        }
    }
}

impl MagneticPolicy {
    #[must_use]
    pub fn to_magnetic_config(&self) -> MagneticConfig {
        MagneticConfig {
            pointer: PointerConfig {
                radius: self.radius,
                strength: self.strength,
            },
            spring: self.spring,
        }
    }
}

/// Magnetic navigation-link parameters (no radius cutoff).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NavLinkPolicy {
    pub strength: f64,
    pub spring: SpringConfig,
}

impl Default for NavLinkPolicy {
    fn default() -> Self {
        Self {
            strength: 0.2,
            spring: SpringConfig::magnetic(),
        }
    }
}

impl NavLinkPolicy {
    #[must_use]
    pub fn to_magnetic_config(&self) -> MagneticConfig {
        MagneticConfig {
            spring: self.spring,
            ..MagneticConfig::nav_link(self.strength)
        }
    }
}

/// Tilt card parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TiltPolicy {
    pub max_tilt: f64,
    pub perspective: f64,
    pub hover_scale: f64,
    pub spring: SpringConfig,
}

impl Default for TiltPolicy {
    fn default() -> Self {
        let d = TiltConfig::default();
        Self {
            max_tilt: d.max_tilt,
            perspective: d.perspective,
            hover_scale: d.hover_scale,
            spring: d.spring,
        }
    }
}

impl TiltPolicy {
    #[must_use]
    pub fn to_tilt_config(&self) -> TiltConfig {
        TiltConfig {
            max_tilt: self.max_tilt,
            perspective: self.perspective,
            hover_scale: self.hover_scale,
            spring: self.spring,
        }
    }
}

/// Cursor follower parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CursorPolicy {
    pub spring: SpringConfig,
}

impl Default for CursorPolicy {
    fn default() -> Self {
        Self {
            spring: SpringConfig::cursor(),
        }
    }
}

/// Contact form parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct FormPolicy {
    pub latency_ms: u64,
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self { latency_ms: 1500 }
    }
}

impl FormPolicy {
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from loading or validating an [`InteractionConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => write!(f, "TOML serialization error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

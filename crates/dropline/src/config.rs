#![forbid(unsafe_code)]

//! Runtime configuration.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `DROPLINE_DIAGNOSTICS` | `true` enables the JSONL diagnostic log |
//! | `DROPLINE_COPY_MODIFIER` | modifier list such as `ctrl` or `alt+shift` |
//! | `DROPLINE_MARKER_COLOR` | `#RRGGBB` or `#RRGGBBAA` |
//!
//! Unparseable values fall back to the defaults.

use dropline_core::color::PackedRgba;
use dropline_core::modifiers::Modifiers;

use crate::marker::MarkerStyle;

/// Environment variable enabling diagnostics.
pub const ENV_DIAGNOSTICS: &str = "DROPLINE_DIAGNOSTICS";
/// Environment variable overriding the copy modifier.
pub const ENV_COPY_MODIFIER: &str = "DROPLINE_COPY_MODIFIER";
/// Environment variable overriding the marker color.
pub const ENV_MARKER_COLOR: &str = "DROPLINE_MARKER_COLOR";

/// Configuration for [`PanelDragging`](crate::dragging::PanelDragging).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragDropConfig {
    /// Modifier that turns a drag into a copy request (default: platform copy
    /// gesture). Component copies are always rejected.
    pub copy_modifier: Modifiers,
    pub marker: MarkerStyle,
    /// Record drag events to the diagnostic log (default: false).
    pub diagnostics: bool,
}

impl Default for DragDropConfig {
    fn default() -> Self {
        Self {
            copy_modifier: Modifiers::platform_copy(),
            marker: MarkerStyle::default(),
            diagnostics: false,
        }
    }
}

impl DragDropConfig {
    /// Defaults overridden by `DROPLINE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(v) = lookup(ENV_DIAGNOSTICS) {
            config.diagnostics = v.trim().eq_ignore_ascii_case("true");
        }
        if let Some(m) = lookup(ENV_COPY_MODIFIER).and_then(|v| Modifiers::parse(&v)) {
            config.copy_modifier = m;
        }
        if let Some(c) = lookup(ENV_MARKER_COLOR).and_then(|v| PackedRgba::parse_hex(&v)) {
            config.marker.color = c;
        }
        config
    }

    /// Set the copy modifier.
    #[must_use]
    pub fn with_copy_modifier(mut self, modifiers: Modifiers) -> Self {
        self.copy_modifier = modifiers;
        self
    }

    /// Set the marker style.
    #[must_use]
    pub fn with_marker(mut self, marker: MarkerStyle) -> Self {
        self.marker = marker;
        self
    }

    /// Enable the diagnostic log.
    #[must_use]
    pub fn with_diagnostics(mut self) -> Self {
        self.diagnostics = true;
        self
    }

    /// Whether `held` requests a copy.
    #[must_use]
    pub fn requests_copy(&self, held: Modifiers) -> bool {
        !self.copy_modifier.is_empty() && held.contains(self.copy_modifier)
    }
}

#![forbid(unsafe_code)]

//! Insertion marker rendering.
//!
//! A thin horizontal bar at the resolved target's edge. Purely presentational:
//! it reads the resolver's last output and carries nothing forward.

use dropline_core::color::PackedRgba;
use dropline_core::geometry::{Position, Rect};

use crate::resolver::{ResolvedTarget, Side};

/// Visual configuration for the insertion marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    /// Bar height in cells (default: 1). Zero disables the marker.
    pub thickness: u16,
    /// Extra rows the bar moves down for [`Side::Below`] (default: 1).
    pub below_offset: u16,
    pub color: PackedRgba,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            thickness: 1,
            below_offset: 1,
            color: PackedRgba::MARKER_BLUE,
        }
    }
}

impl MarkerStyle {
    /// Set bar thickness.
    #[must_use]
    pub fn with_thickness(mut self, thickness: u16) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the downward offset used for below-targets.
    #[must_use]
    pub fn with_below_offset(mut self, rows: u16) -> Self {
        self.below_offset = rows;
        self
    }

    /// Set bar color.
    #[must_use]
    pub fn with_color(mut self, color: PackedRgba) -> Self {
        self.color = color;
        self
    }
}

/// Anything the marker can be painted onto.
pub trait MarkerSurface {
    /// Fill `area` with `color`.
    fn fill(&mut self, area: Rect, color: PackedRgba);
}

/// The bar's area for `target` drawn in a zone spanning `zone`.
#[must_use]
pub fn marker_rect(target: ResolvedTarget, zone: Rect, marker_y: u16, style: &MarkerStyle) -> Rect {
    let bar = Rect::new(zone.x, marker_y, zone.width, style.thickness);
    match target.side {
        Side::Above => bar,
        Side::Below => bar.offset_y(style.below_offset),
    }
}

/// Paint the marker if there is a target and the pointer is in `zone`.
///
/// Returns the painted area.
pub fn render_marker<S: MarkerSurface + ?Sized>(
    surface: &mut S,
    target: Option<ResolvedTarget>,
    pointer: Position,
    zone: Rect,
    marker_y: u16,
    style: &MarkerStyle,
) -> Option<Rect> {
    let target = target?;
    if !zone.contains_pos(pointer) {
        return None;
    }
    let bar = marker_rect(target, zone, marker_y, style);
    if bar.is_empty() {
        return None;
    }
    surface.fill(bar, style.color);
    Some(bar)
}

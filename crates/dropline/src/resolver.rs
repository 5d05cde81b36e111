#![forbid(unsafe_code)]

//! Target resolution: pointer + drop zone + panel list → insertion point.
//!
//! # Algorithm
//!
//! 1. Pointer outside the zone: no target.
//! 2. Trailing (bottom) zone: below the most recently hovered panel.
//! 3. Panel zone: the upper half means "above the next panel", the lower
//!    half means "below this panel".
//!    - Above: step to the next panel, then skip culled panels. Running off
//!      the end of the list yields no target.
//!    - Above a panel with a large header: retarget to below the previous
//!      non-culled panel. Running off the start yields no target.
//!
//! Resolution is a pure function of its inputs, so re-running it with the
//! same pointer, geometry, and panel list yields the same target.

use std::fmt;

use dropline_core::geometry::{Position, Rect};

use crate::panel::PanelList;

/// Which edge of the target panel the insertion marker sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Above,
    Below,
}

impl Side {
    /// Returns true for [`Side::Above`].
    #[inline]
    #[must_use]
    pub const fn is_above(self) -> bool {
        matches!(self, Self::Above)
    }

    /// Stable lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
        }
    }
}

/// A resolved insertion point: before or after panel `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedTarget {
    pub index: usize,
    pub side: Side,
}

impl ResolvedTarget {
    /// Insert above panel `index`.
    #[must_use]
    pub const fn above(index: usize) -> Self {
        Self {
            index,
            side: Side::Above,
        }
    }

    /// Insert below panel `index`.
    #[must_use]
    pub const fn below(index: usize) -> Self {
        Self {
            index,
            side: Side::Below,
        }
    }

    /// Position in the panel sequence an inserted panel would take.
    #[must_use]
    pub const fn insertion_index(&self) -> usize {
        match self.side {
            Side::Above => self.index,
            Side::Below => self.index + 1,
        }
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} panel {}", self.side.as_str(), self.index)
    }
}

/// The most recent per-panel hover, used to resolve trailing-area drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LastHoverSnapshot {
    /// Index of the last hovered panel zone (`None` before the first hover).
    pub panel_index: Option<usize>,
    /// Marker row recorded with that hover.
    pub marker_y: u16,
}

impl LastHoverSnapshot {
    /// Record a panel hover.
    pub fn record(&mut self, panel_index: usize, marker_y: u16) {
        self.panel_index = Some(panel_index);
        self.marker_y = marker_y;
    }

    /// Forget the previous gesture's hover.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Where the pointer is, relative to which drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverQuery {
    /// Panel the zone belongs to; ignored for the bottom zone.
    pub hovered_index: usize,
    pub pointer: Position,
    /// Hit-test area of the zone.
    pub target_rect: Rect,
    /// Row where the insertion marker is drawn for this zone.
    pub marker_y: u16,
    /// The zone is the trailing empty area below all panels.
    pub is_bottom_target: bool,
}

impl HoverQuery {
    /// Query for the drop zone of panel `hovered_index`.
    #[must_use]
    pub const fn panel(
        hovered_index: usize,
        pointer: Position,
        target_rect: Rect,
        marker_y: u16,
    ) -> Self {
        Self {
            hovered_index,
            pointer,
            target_rect,
            marker_y,
            is_bottom_target: false,
        }
    }

    /// Query for the trailing area, resolved against `last`.
    #[must_use]
    pub fn bottom(pointer: Position, target_rect: Rect, last: &LastHoverSnapshot) -> Self {
        Self {
            hovered_index: last.panel_index.unwrap_or(0),
            pointer,
            target_rect,
            marker_y: last.marker_y,
            is_bottom_target: true,
        }
    }
}

/// Why resolution produced no target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveMiss {
    /// Pointer is outside the zone's hit-test area.
    OutsidePointer,
    /// Bottom zone hovered before any panel zone was.
    NoPriorHover,
    /// Hovered index is not a panel in the list.
    UnknownPanel,
    /// Skipping culled panels ran past the last panel.
    PastEnd,
    /// Large-header retargeting ran past the first panel.
    BeforeStart,
}

impl ResolveMiss {
    /// Stable lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutsidePointer => "outside_pointer",
            Self::NoPriorHover => "no_prior_hover",
            Self::UnknownPanel => "unknown_panel",
            Self::PastEnd => "past_end",
            Self::BeforeStart => "before_start",
        }
    }
}

/// Resolve the insertion point for a hover.
///
/// `last_hover` is consulted only for the bottom zone.
pub fn resolve<P: PanelList + ?Sized>(
    query: &HoverQuery,
    last_hover: &LastHoverSnapshot,
    panels: &P,
) -> Result<ResolvedTarget, ResolveMiss> {
    if !query.target_rect.contains_pos(query.pointer) {
        return Err(ResolveMiss::OutsidePointer);
    }
    let count = panels.panel_count();

    if query.is_bottom_target {
        let index = last_hover.panel_index.ok_or(ResolveMiss::NoPriorHover)?;
        if index >= count {
            return Err(ResolveMiss::UnknownPanel);
        }
        return Ok(ResolvedTarget::below(index));
    }

    if query.hovered_index >= count {
        return Err(ResolveMiss::UnknownPanel);
    }
    if !query.target_rect.in_upper_half(query.pointer.y) {
        return Ok(ResolvedTarget::below(query.hovered_index));
    }

    let index = (query.hovered_index + 1..count)
        .find(|&i| !panels.should_cull_panel(i))
        .ok_or(ResolveMiss::PastEnd)?;

    if !panels.has_large_header(index) {
        return Ok(ResolvedTarget::above(index));
    }

    (0..index)
        .rev()
        .find(|&i| !panels.should_cull_panel(i))
        .map(ResolvedTarget::below)
        .ok_or(ResolveMiss::BeforeStart)
}

#![forbid(unsafe_code)]

//! The panel list as seen by the resolver.
//!
//! The host inspector owns the panels; the resolver only borrows a
//! [`PanelList`] for the duration of one notification.

use bitflags::bitflags;

use crate::payload::ComponentRef;

/// Read-only view of the host's stacked panels.
pub trait PanelList {
    /// Number of panels, culled ones included.
    fn panel_count(&self) -> usize;

    /// Whether the panel renders nothing insertable and must be skipped.
    fn should_cull_panel(&self, index: usize) -> bool;

    /// Whether the panel's header is too tall for an "above" marker.
    ///
    /// Inserting above such a panel is redirected to "below the previous
    /// panel".
    fn has_large_header(&self, index: usize) -> bool;

    /// The components backing the panel, one per inspected owner.
    fn panel_targets(&self, index: usize) -> Vec<ComponentRef>;
}

bitflags! {
    /// Per-panel rendering facts the resolver cares about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PanelFlags: u8 {
        /// Panel renders nothing insertable.
        const CULLED       = 0b01;
        /// Panel header is taller than the insertion marker allows.
        const LARGE_HEADER = 0b10;
    }
}

/// One panel in a [`PanelStack`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelEntry {
    pub targets: Vec<ComponentRef>,
    pub flags: PanelFlags,
}

impl PanelEntry {
    /// A regular panel editing the given components.
    #[must_use]
    pub fn new(targets: Vec<ComponentRef>) -> Self {
        Self {
            targets,
            flags: PanelFlags::empty(),
        }
    }

    /// Set the panel's flags.
    #[must_use]
    pub fn with_flags(mut self, flags: PanelFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the panel as culled.
    #[must_use]
    pub fn culled(mut self) -> Self {
        self.flags |= PanelFlags::CULLED;
        self
    }

    /// Mark the panel as having a large header.
    #[must_use]
    pub fn large_header(mut self) -> Self {
        self.flags |= PanelFlags::LARGE_HEADER;
        self
    }
}

/// A plain vector-backed [`PanelList`].
#[derive(Debug, Clone, Default)]
pub struct PanelStack {
    panels: Vec<PanelEntry>,
}

impl PanelStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a panel.
    pub fn push(&mut self, entry: PanelEntry) {
        self.panels.push(entry);
    }

    /// Append a panel (builder form).
    #[must_use]
    pub fn with_panel(mut self, entry: PanelEntry) -> Self {
        self.push(entry);
        self
    }

    /// Borrow a panel.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PanelEntry> {
        self.panels.get(index)
    }

    /// Mutably borrow a panel.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut PanelEntry> {
        self.panels.get_mut(index)
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns true if there are no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    fn flags(&self, index: usize) -> PanelFlags {
        self.panels
            .get(index)
            .map_or(PanelFlags::empty(), |p| p.flags)
    }
}

impl FromIterator<PanelEntry> for PanelStack {
    fn from_iter<I: IntoIterator<Item = PanelEntry>>(iter: I) -> Self {
        Self {
            panels: iter.into_iter().collect(),
        }
    }
}

impl PanelList for PanelStack {
    fn panel_count(&self) -> usize {
        self.panels.len()
    }

    fn should_cull_panel(&self, index: usize) -> bool {
        self.flags(index).contains(PanelFlags::CULLED)
    }

    fn has_large_header(&self, index: usize) -> bool {
        self.flags(index).contains(PanelFlags::LARGE_HEADER)
    }

    fn panel_targets(&self, index: usize) -> Vec<ComponentRef> {
        self.panels
            .get(index)
            .map(|p| p.targets.clone())
            .unwrap_or_default()
    }
}

#![forbid(unsafe_code)]

//! Drag sessions and payload classification.
//!
//! A [`DragSession`] lives for exactly one drag gesture. It is created by the
//! host when the gesture starts and dropped when it ends, and it owns the one
//! slot this crate writes into: the cached [`DraggingMode`].
//!
//! # Invariants
//!
//! 1. The classification slot is written at most once per session.
//! 2. Once written, [`DragSession::dragging_mode`] returns the cached mode
//!    even if a later call passes a different payload.
//!
//! The session is passed by `&mut` into every call, so the check-then-write
//! on the slot is confined to a single caller.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::payload::{DraggedObject, Payload};

/// Global monotonic session counter.
static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Allocate a fresh, process-unique session id.
    #[must_use]
    pub fn next() -> Self {
        Self(SESSION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a drag payload can do when dropped on the panel list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraggingMode {
    /// Empty, mixed, or otherwise unsupported payload.
    NotApplicable,
    /// Existing components to reorder.
    ComponentSet,
    /// Scripts to instantiate as new components.
    ScriptSet,
}

impl DraggingMode {
    /// Stable lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::ComponentSet => "component_set",
            Self::ScriptSet => "script_set",
        }
    }

    /// Returns true if a drop with this mode can do anything.
    #[must_use]
    pub const fn is_applicable(self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

/// Classify a payload without caching.
///
/// - empty → `NotApplicable`
/// - only non-root components → `ComponentSet`
/// - only scripts → `ScriptSet`
/// - anything else → `NotApplicable`
#[must_use]
pub fn classify(payload: &Payload) -> DraggingMode {
    let objects = payload.objects();
    if objects.is_empty() {
        return DraggingMode::NotApplicable;
    }
    let all_components = objects
        .iter()
        .all(|o| matches!(o, DraggedObject::Component { is_root: false, .. }));
    if all_components {
        return DraggingMode::ComponentSet;
    }
    if objects.iter().all(|o| matches!(o, DraggedObject::Script(_))) {
        return DraggingMode::ScriptSet;
    }
    DraggingMode::NotApplicable
}

/// State scoped to one drag gesture.
#[derive(Debug)]
pub struct DragSession {
    id: SessionId,
    mode: Option<DraggingMode>,
}

impl DragSession {
    /// Start a new gesture with a fresh id and an empty classification slot.
    #[must_use]
    pub fn begin() -> Self {
        Self::with_id(SessionId::next())
    }

    /// Start a gesture with a host-chosen id.
    #[must_use]
    pub fn with_id(id: SessionId) -> Self {
        Self { id, mode: None }
    }

    /// This gesture's id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The cached classification, if one has been computed.
    #[inline]
    #[must_use]
    pub fn cached_mode(&self) -> Option<DraggingMode> {
        self.mode
    }

    /// Classify `payload` on first call; return the cached mode afterwards.
    ///
    /// Returns `(mode, freshly_classified)`.
    pub fn dragging_mode(&mut self, payload: &Payload) -> (DraggingMode, bool) {
        match self.mode {
            Some(mode) => (mode, false),
            None => {
                let mode = classify(payload);
                self.mode = Some(mode);
                (mode, true)
            }
        }
    }
}

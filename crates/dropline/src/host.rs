#![forbid(unsafe_code)]

//! Outbound collaborator interfaces.
//!
//! The resolver never mutates the item graph itself. It asks an [`ItemOps`]
//! implementation to move or create items, and tells the host's drag
//! subsystem what to show through a [`DragSink`].

use crate::payload::{ComponentRef, OwnerId, ScriptRef};

/// Pointer affordance shown while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragFeedback {
    /// Drop not possible here.
    #[default]
    None,
    /// Drop will create new items from references.
    Link,
    /// Drop will copy.
    Copy,
    /// Drop will move.
    Move,
}

impl DragFeedback {
    /// Stable lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Link => "link",
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }
}

/// Item-manipulation primitives provided by the host.
///
/// Every `validate_only = true` call must leave the item graph untouched.
pub trait ItemOps {
    /// Move `source` next to `target` (above or below it).
    ///
    /// Returns false if the move is not allowed.
    fn move_single(
        &mut self,
        source: ComponentRef,
        target: ComponentRef,
        above: bool,
        validate_only: bool,
    ) -> bool;

    /// Move every source next to every target's position on that target's
    /// owner. Precondition rules belong to the implementation.
    fn move_batch(
        &mut self,
        sources: &[ComponentRef],
        targets: &[ComponentRef],
        above: bool,
        validate_only: bool,
    ) -> bool;

    /// Create a component of `script`'s type on `owner`.
    ///
    /// Returns `None` if the owner cannot take it (for example an exclusive
    /// component of the same group already exists).
    fn create_item_from_script(&mut self, owner: OwnerId, script: &ScriptRef)
    -> Option<ComponentRef>;

    /// Reposition a freshly created `item` next to `target`.
    fn move_relative_to(&mut self, item: ComponentRef, target: ComponentRef, above: bool);

    /// Check whether `script` may be added to `owner`, surfacing the host's
    /// warning to the user when it may not.
    fn warn_can_add(&mut self, owner: OwnerId, script: &ScriptRef) -> bool;
}

/// The host's drag subsystem, as far as this crate drives it.
pub trait DragSink {
    /// Set the pointer affordance.
    fn set_feedback(&mut self, feedback: DragFeedback);

    /// Accept the payload and end the drag session.
    fn accept_drag(&mut self);

    /// Mark the current notification as handled.
    fn consume_event(&mut self);

    /// Ask the host to abandon the current draw pass.
    ///
    /// Called after a drop changed the panel list's shape; hosts without an
    /// unwinding mechanism can ignore it.
    fn request_unwind(&mut self) {}
}

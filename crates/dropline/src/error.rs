#![forbid(unsafe_code)]

//! Rejection taxonomy.
//!
//! Nothing here is fatal. During drag-over a rejection becomes
//! [`DragFeedback::None`](crate::host::DragFeedback::None) plus a cleared
//! target; at drop it is collected into the [`DropReport`](crate::executor::DropReport).

use std::fmt;

use crate::payload::{OwnerId, ScriptRef};

/// Why a component move was refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IncompatibleReason {
    /// Single-pair move between components of different owners.
    CrossOwner { source: OwnerId, target: OwnerId },
    /// Copy was requested; only moves are supported.
    CopyUnsupported,
    /// The item-manipulation collaborator refused the move.
    Refused,
    /// No source or no target components.
    EmptySelection,
}

impl fmt::Display for IncompatibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CrossOwner { source, target } => {
                write!(f, "source {source} and target {target} differ")
            }
            Self::CopyUnsupported => write!(f, "copying components is not supported"),
            Self::Refused => write!(f, "move refused"),
            Self::EmptySelection => write!(f, "nothing to move"),
        }
    }
}

/// A drag or drop that cannot proceed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragRejection {
    /// Empty or mixed drag contents.
    InvalidPayload,
    /// The resolved target cannot take the dragged components.
    IncompatibleTarget(IncompatibleReason),
    /// An owner rejects a dragged script type.
    UnaddableScript { owner: OwnerId, script: ScriptRef },
    /// A drop was released outside every drop zone.
    ///
    /// Moves outside a zone are not rejections; they surface as
    /// [`ResolveMiss::OutsidePointer`](crate::resolver::ResolveMiss::OutsidePointer).
    GeometryMiss,
}

impl DragRejection {
    /// Stable lowercase name for diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPayload => "invalid_payload",
            Self::IncompatibleTarget(_) => "incompatible_target",
            Self::UnaddableScript { .. } => "unaddable_script",
            Self::GeometryMiss => "geometry_miss",
        }
    }

    pub(crate) fn incompatible(reason: IncompatibleReason) -> Self {
        Self::IncompatibleTarget(reason)
    }
}

impl fmt::Display for DragRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPayload => write!(f, "drag payload cannot be dropped on panels"),
            Self::IncompatibleTarget(reason) => write!(f, "incompatible target: {reason}"),
            Self::UnaddableScript { owner, script } => {
                write!(f, "script {script} cannot be added to {owner}")
            }
            Self::GeometryMiss => write!(f, "drop released outside every drop zone"),
        }
    }
}

impl std::error::Error for DragRejection {}

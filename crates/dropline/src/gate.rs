#![forbid(unsafe_code)]

//! Validity gate: may the pending drop happen at the resolved target?
//!
//! The same checks run on every drag-over (to pick the affordance) and once
//! at drop. [`GateMode`] carries the difference: `Validate` only asks the
//! collaborator, `Commit` asks it to perform the move.

use crate::error::{DragRejection, IncompatibleReason};
use crate::host::{DragFeedback, ItemOps};
use crate::payload::{ComponentRef, OwnerId, ScriptRef};
use crate::resolver::Side;
use crate::session::DraggingMode;

/// Whether collaborator calls are dry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// Ask only; the item graph is untouched.
    Validate,
    /// Perform the move.
    Commit,
}

impl GateMode {
    #[inline]
    const fn validate_only(self) -> bool {
        matches!(self, Self::Validate)
    }
}

/// Check (or perform) a component move onto `targets`.
///
/// Copy is rejected outright. A single source onto a single target must stay
/// on the same owner; anything larger is decided by the batch primitive.
pub fn check_components<O: ItemOps + ?Sized>(
    ops: &mut O,
    sources: &[ComponentRef],
    targets: &[ComponentRef],
    side: Side,
    copy_requested: bool,
    mode: GateMode,
) -> Result<(), DragRejection> {
    if copy_requested {
        return Err(DragRejection::incompatible(
            IncompatibleReason::CopyUnsupported,
        ));
    }
    if sources.is_empty() || targets.is_empty() {
        return Err(DragRejection::incompatible(
            IncompatibleReason::EmptySelection,
        ));
    }

    let above = side.is_above();
    let allowed = match (sources, targets) {
        ([source], [target]) => {
            if source.owner != target.owner {
                return Err(DragRejection::incompatible(
                    IncompatibleReason::CrossOwner {
                        source: source.owner,
                        target: target.owner,
                    },
                ));
            }
            ops.move_single(*source, *target, above, mode.validate_only())
        }
        _ => ops.move_batch(sources, targets, above, mode.validate_only()),
    };

    if allowed {
        Ok(())
    } else {
        Err(DragRejection::incompatible(IncompatibleReason::Refused))
    }
}

/// Ask `owner` to accept every script, collecting one rejection per refusal.
///
/// Every script is checked so the host can warn about each offending pair.
pub fn check_scripts<'a, O, I>(ops: &mut O, owner: OwnerId, scripts: I) -> Vec<DragRejection>
where
    O: ItemOps + ?Sized,
    I: IntoIterator<Item = &'a ScriptRef>,
{
    scripts
        .into_iter()
        .filter(|script| !ops.warn_can_add(owner, script))
        .map(|script| DragRejection::UnaddableScript {
            owner,
            script: script.clone(),
        })
        .collect()
}

/// Affordance for a drag-over at a resolved target.
///
/// Scripts always report [`DragFeedback::Link`]; their real validation waits
/// for the drop.
pub fn drag_over_feedback<O: ItemOps + ?Sized>(
    ops: &mut O,
    mode: DraggingMode,
    sources: &[ComponentRef],
    targets: &[ComponentRef],
    side: Side,
    copy_requested: bool,
) -> Result<DragFeedback, DragRejection> {
    match mode {
        DraggingMode::NotApplicable => Err(DragRejection::InvalidPayload),
        DraggingMode::ScriptSet => Ok(DragFeedback::Link),
        DraggingMode::ComponentSet => {
            check_components(ops, sources, targets, side, copy_requested, GateMode::Validate)
                .map(|()| DragFeedback::Move)
        }
    }
}

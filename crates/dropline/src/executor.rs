#![forbid(unsafe_code)]

//! Drop execution.
//!
//! Runs once per drop, after the target components have been re-derived from
//! the resolved panel.
//!
//! # Failure Modes
//!
//! | Failure | Scope | Effect |
//! |---------|-------|--------|
//! | Single-pair move fails validation | whole drop | nothing mutated |
//! | Batch move refused | whole drop | nothing mutated |
//! | `warn_can_add` refuses a script | one target owner | that owner is skipped |
//! | Script creation returns `None` | one (owner, script) pair | that pair is skipped |

use crate::error::DragRejection;
use crate::gate::{GateMode, check_components, check_scripts};
use crate::host::ItemOps;
use crate::payload::{ComponentRef, Payload};
use crate::resolver::ResolvedTarget;
use crate::session::DraggingMode;

/// What a drop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropReport {
    pub target: ResolvedTarget,
    pub mode: DraggingMode,
    /// Existing components that were moved.
    pub moved: Vec<ComponentRef>,
    /// Components created from dropped scripts.
    pub created: Vec<ComponentRef>,
    /// Everything that was skipped, in encounter order.
    pub rejections: Vec<DragRejection>,
}

impl DropReport {
    fn new(target: ResolvedTarget, mode: DraggingMode) -> Self {
        Self {
            target,
            mode,
            moved: Vec::new(),
            created: Vec::new(),
            rejections: Vec::new(),
        }
    }

    /// Returns true if the item graph changed.
    #[must_use]
    pub fn changed_items(&self) -> bool {
        !self.moved.is_empty() || !self.created.is_empty()
    }

    /// Returns true if the drop changed something and skipped nothing.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.changed_items() && self.rejections.is_empty()
    }
}

/// Perform the drop of `payload` next to `targets` at `target.side`.
pub fn execute_drop<O: ItemOps + ?Sized>(
    ops: &mut O,
    mode: DraggingMode,
    payload: &Payload,
    targets: &[ComponentRef],
    target: ResolvedTarget,
    copy_requested: bool,
) -> DropReport {
    let mut report = DropReport::new(target, mode);
    match mode {
        DraggingMode::NotApplicable => report.rejections.push(DragRejection::InvalidPayload),
        DraggingMode::ScriptSet => add_scripts(ops, payload, targets, target, &mut report),
        DraggingMode::ComponentSet => {
            move_components(ops, payload, targets, target, copy_requested, &mut report)
        }
    }
    report
}

fn add_scripts<O: ItemOps + ?Sized>(
    ops: &mut O,
    payload: &Payload,
    targets: &[ComponentRef],
    target: ResolvedTarget,
    report: &mut DropReport,
) {
    let above = target.side.is_above();
    for anchor in targets {
        let refused = check_scripts(ops, anchor.owner, payload.scripts());
        if !refused.is_empty() {
            dropline_core::debug!(
                owner = anchor.owner.0,
                refused = refused.len(),
                "skipping owner that refuses dropped scripts"
            );
            report.rejections.extend(refused);
            continue;
        }
        for script in payload.scripts() {
            match ops.create_item_from_script(anchor.owner, script) {
                Some(item) => {
                    ops.move_relative_to(item, *anchor, above);
                    report.created.push(item);
                }
                None => {
                    dropline_core::debug!(
                        owner = anchor.owner.0,
                        script = %script,
                        "script component creation failed"
                    );
                    report.rejections.push(DragRejection::UnaddableScript {
                        owner: anchor.owner,
                        script: script.clone(),
                    });
                }
            }
        }
    }
}

fn move_components<O: ItemOps + ?Sized>(
    ops: &mut O,
    payload: &Payload,
    targets: &[ComponentRef],
    target: ResolvedTarget,
    copy_requested: bool,
    report: &mut DropReport,
) {
    let sources: Vec<ComponentRef> = payload.components().collect();
    if sources.is_empty() || targets.is_empty() {
        return;
    }
    let outcome = check_components(
        ops,
        &sources,
        targets,
        target.side,
        copy_requested,
        GateMode::Validate,
    )
    .and_then(|()| {
        check_components(
            ops,
            &sources,
            targets,
            target.side,
            copy_requested,
            GateMode::Commit,
        )
    });
    match outcome {
        Ok(()) => report.moved = sources,
        Err(rejection) => report.rejections.push(rejection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IncompatibleReason;
    use crate::payload::{DraggedObject, ItemId, OwnerId, ScriptRef};

    /// Creates items with sequential ids; refuses configured (owner, script) pairs.
    struct OpsFixture {
        next_id: u64,
        refuse_create: Vec<(u64, &'static str)>,
        refuse_warn: Vec<u64>,
        allow_moves: bool,
        log: Vec<String>,
    }

    impl OpsFixture {
        fn new() -> Self {
            Self {
                next_id: 100,
                refuse_create: Vec::new(),
                refuse_warn: Vec::new(),
                allow_moves: true,
                log: Vec::new(),
            }
        }
    }

    impl ItemOps for OpsFixture {
        fn move_single(
            &mut self,
            source: ComponentRef,
            target: ComponentRef,
            above: bool,
            validate_only: bool,
        ) -> bool {
            self.log.push(format!(
                "single {} {} {above} {validate_only}",
                source.id.0, target.id.0
            ));
            self.allow_moves
        }

        fn move_batch(
            &mut self,
            sources: &[ComponentRef],
            _targets: &[ComponentRef],
            _above: bool,
            validate_only: bool,
        ) -> bool {
            self.log
                .push(format!("batch {} {validate_only}", sources.len()));
            self.allow_moves
        }

        fn create_item_from_script(
            &mut self,
            owner: OwnerId,
            script: &ScriptRef,
        ) -> Option<ComponentRef> {
            if self
                .refuse_create
                .iter()
                .any(|(o, s)| *o == owner.0 && *s == script.type_name)
            {
                return None;
            }
            self.next_id += 1;
            self.log.push(format!("create {} {}", owner.0, script));
            Some(ComponentRef::new(ItemId(self.next_id), owner))
        }

        fn move_relative_to(&mut self, item: ComponentRef, target: ComponentRef, above: bool) {
            self.log
                .push(format!("place {} {} {above}", item.id.0, target.id.0));
        }

        fn warn_can_add(&mut self, owner: OwnerId, _script: &ScriptRef) -> bool {
            !self.refuse_warn.contains(&owner.0)
        }
    }

    fn comp(id: u64, owner: u64) -> ComponentRef {
        ComponentRef::new(ItemId(id), OwnerId(owner))
    }

    fn scripts(names: &[&str]) -> Payload {
        Payload::from_objects(names.iter().map(|n| DraggedObject::script(*n)).collect())
    }

    #[test]
    fn single_move_validates_then_commits() {
        let mut ops = OpsFixture::new();
        let payload = Payload::from_objects(vec![DraggedObject::component(comp(1, 7))]);
        let report = execute_drop(
            &mut ops,
            DraggingMode::ComponentSet,
            &payload,
            &[comp(2, 7)],
            ResolvedTarget::above(2),
            false,
        );
        assert!(report.is_complete());
        assert_eq!(report.moved, vec![comp(1, 7)]);
        assert_eq!(
            ops.log,
            vec!["single 1 2 true true".to_string(), "single 1 2 true false".to_string()]
        );
    }

    #[test]
    fn failed_validation_never_commits() {
        let mut ops = OpsFixture::new();
        ops.allow_moves = false;
        let payload = Payload::from_objects(vec![DraggedObject::component(comp(1, 7))]);
        let report = execute_drop(
            &mut ops,
            DraggingMode::ComponentSet,
            &payload,
            &[comp(2, 7)],
            ResolvedTarget::below(0),
            false,
        );
        assert!(!report.changed_items());
        assert_eq!(ops.log, vec!["single 1 2 false true".to_string()]);
        assert_eq!(
            report.rejections,
            vec![DragRejection::IncompatibleTarget(IncompatibleReason::Refused)]
        );
    }

    #[test]
    fn empty_targets_is_silent_noop() {
        let mut ops = OpsFixture::new();
        let payload = Payload::from_objects(vec![DraggedObject::component(comp(1, 7))]);
        let report = execute_drop(
            &mut ops,
            DraggingMode::ComponentSet,
            &payload,
            &[],
            ResolvedTarget::below(0),
            false,
        );
        assert!(!report.changed_items());
        assert!(report.rejections.is_empty());
        assert!(ops.log.is_empty());
    }

    #[test]
    fn scripts_created_per_target_owner() {
        let mut ops = OpsFixture::new();
        let report = execute_drop(
            &mut ops,
            DraggingMode::ScriptSet,
            &scripts(&["Mover"]),
            &[comp(2, 7), comp(3, 8)],
            ResolvedTarget::below(1),
            false,
        );
        assert_eq!(report.created.len(), 2);
        assert_eq!(report.created[0].owner, OwnerId(7));
        assert_eq!(report.created[1].owner, OwnerId(8));
        assert!(ops.log.contains(&"place 101 2 false".to_string()));
        assert!(ops.log.contains(&"place 102 3 false".to_string()));
    }

    #[test]
    fn refused_owner_does_not_block_other_owners() {
        let mut ops = OpsFixture::new();
        ops.refuse_warn.push(7);
        let report = execute_drop(
            &mut ops,
            DraggingMode::ScriptSet,
            &scripts(&["Mover", "Health"]),
            &[comp(2, 7), comp(3, 8)],
            ResolvedTarget::above(1),
            false,
        );
        assert_eq!(report.created.len(), 2);
        assert!(report.created.iter().all(|c| c.owner == OwnerId(8)));
        assert_eq!(report.rejections.len(), 2);
    }

    #[test]
    fn failed_creation_skips_only_that_script() {
        let mut ops = OpsFixture::new();
        ops.refuse_create.push((7, "Rigidbody"));
        let report = execute_drop(
            &mut ops,
            DraggingMode::ScriptSet,
            &scripts(&["Rigidbody", "Mover"]),
            &[comp(2, 7)],
            ResolvedTarget::above(1),
            false,
        );
        assert_eq!(report.created.len(), 1);
        assert_eq!(
            report.rejections,
            vec![DragRejection::UnaddableScript {
                owner: OwnerId(7),
                script: ScriptRef::new("Rigidbody"),
            }]
        );
    }

    #[test]
    fn not_applicable_reports_invalid_payload() {
        let mut ops = OpsFixture::new();
        let report = execute_drop(
            &mut ops,
            DraggingMode::NotApplicable,
            &Payload::Empty,
            &[comp(2, 7)],
            ResolvedTarget::above(0),
            false,
        );
        assert_eq!(report.rejections, vec![DragRejection::InvalidPayload]);
        assert!(ops.log.is_empty());
    }
}

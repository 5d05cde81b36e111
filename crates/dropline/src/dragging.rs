#![forbid(unsafe_code)]

//! Per-inspector drag controller.
//!
//! [`PanelDragging`] consumes the host's drag notifications for each drop
//! zone and drives classifier → resolver → gate on every move, the executor
//! on drop, and the marker on repaint.
//!
//! # Gesture lifecycle
//!
//! ```text
//! Idle ──payload seen──▶ Classified ──pointer moves──▶ Resolving ⟲
//!                                                        │
//!                                   drop ──▶ Executing ──┴──▶ Idle
//! any state ──DragExited──▶ Idle (target discarded, nothing executed)
//! ```
//!
//! # Dispatch contract
//!
//! For one notification the host calls [`PanelDragging::handle`] once per
//! visible zone, panels top to bottom and the trailing zone last, and stops
//! as soon as a response [`is_consumed`](DragResponse::is_consumed).
//! [`PanelDragging::dispatch`] does exactly that. Each panel-zone call records
//! the [`LastHoverSnapshot`] that the trailing zone resolves against, so
//! notifications within a gesture must arrive in order.
//! A move or drop that no zone contains clears the live target; a drop there
//! ends the gesture unexecuted.

use dropline_core::geometry::{Position, Rect};
use dropline_core::modifiers::Modifiers;

use crate::config::DragDropConfig;
use crate::diagnostics::{DiagnosticEntry, DiagnosticEventKind, DiagnosticLog};
use crate::error::DragRejection;
use crate::executor::{DropReport, execute_drop};
use crate::gate::drag_over_feedback;
use crate::host::{DragFeedback, DragSink, ItemOps};
use crate::marker::{MarkerSurface, render_marker};
use crate::panel::PanelList;
use crate::payload::{ComponentRef, Payload};
use crate::resolver::{HoverQuery, LastHoverSnapshot, ResolveMiss, ResolvedTarget, resolve};
use crate::session::{DragSession, DraggingMode, SessionId};

/// Everything the controller needs from the host inspector.
pub trait DragHost: PanelList + ItemOps + DragSink + MarkerSurface {}

impl<T: PanelList + ItemOps + DragSink + MarkerSurface + ?Sized> DragHost for T {}

/// A notification from the host's drag subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The pointer moved while dragging.
    DragUpdated {
        pointer: Position,
        modifiers: Modifiers,
    },
    /// The payload was released.
    DragPerform {
        pointer: Position,
        modifiers: Modifiers,
    },
    /// The drag left the panel list or was cancelled.
    DragExited,
    /// The panel list is being redrawn.
    Repaint { pointer: Position },
}

impl Notification {
    /// Drag update with no modifiers held.
    #[must_use]
    pub const fn moved(pointer: Position) -> Self {
        Self::DragUpdated {
            pointer,
            modifiers: Modifiers::NONE,
        }
    }

    /// Drop with no modifiers held.
    #[must_use]
    pub const fn dropped(pointer: Position) -> Self {
        Self::DragPerform {
            pointer,
            modifiers: Modifiers::NONE,
        }
    }

    /// Stable lowercase name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DragUpdated { .. } => "drag_updated",
            Self::DragPerform { .. } => "drag_perform",
            Self::DragExited => "drag_exited",
            Self::Repaint { .. } => "repaint",
        }
    }
}

/// A hit-test area reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    /// The zone belonging to panel `index`.
    ///
    /// Its upper half inserts above the next panel, its lower half below this
    /// one; `marker_y` is the seam row where the marker is drawn.
    Panel {
        index: usize,
        rect: Rect,
        marker_y: u16,
    },
    /// The empty area below the last panel.
    Bottom { rect: Rect },
}

impl DropZone {
    /// Hit-test area.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        match self {
            Self::Panel { rect, .. } | Self::Bottom { rect } => *rect,
        }
    }
}

/// Where a gesture is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Classified,
    Resolving,
    Executing,
}

/// Outcome of one [`PanelDragging::handle`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragResponse {
    /// Nothing to do for this zone.
    Ignored,
    /// The pointer is in the zone but resolves to no target.
    Missed(ResolveMiss),
    /// Live target and the affordance shown for it.
    Hover {
        target: ResolvedTarget,
        feedback: DragFeedback,
    },
    /// The pending operation is not allowed.
    Rejected(DragRejection),
    /// A drop executed.
    Dropped(DropReport),
    /// The insertion marker was painted.
    Painted(Rect),
    /// The gesture ended without a drop.
    Exited,
}

impl DragResponse {
    /// Whether the host should stop offering this notification to later zones.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        match self {
            Self::Hover { .. } | Self::Dropped(_) | Self::Exited => true,
            Self::Rejected(rejection) => !matches!(
                rejection,
                DragRejection::InvalidPayload | DragRejection::GeometryMiss
            ),
            Self::Ignored | Self::Missed(_) | Self::Painted(_) => false,
        }
    }
}

/// Last drag-over verdict, kept to log transitions instead of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Target(ResolvedTarget, DragFeedback),
    Rejected(&'static str),
}

/// Drag-and-drop controller for one stacked panel list.
#[derive(Debug, Clone, Default)]
pub struct PanelDragging {
    config: DragDropConfig,
    session: Option<SessionId>,
    target: Option<ResolvedTarget>,
    last_hover: LastHoverSnapshot,
    phase: DragPhase,
    verdict: Option<Verdict>,
    diagnostic_log: Option<DiagnosticLog>,
}

impl PanelDragging {
    /// Create a controller. Diagnostics follow `config.diagnostics`.
    #[must_use]
    pub fn new(config: DragDropConfig) -> Self {
        let diagnostic_log = config
            .diagnostics
            .then(|| DiagnosticLog::new().with_stderr());
        Self {
            config,
            diagnostic_log,
            ..Self::default()
        }
    }

    /// Create a controller configured from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(DragDropConfig::from_env())
    }

    /// Enable an in-memory diagnostic log (no stderr mirroring).
    #[must_use]
    pub fn with_diagnostics(mut self) -> Self {
        self.diagnostic_log = Some(DiagnosticLog::new());
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DragDropConfig {
        &self.config
    }

    /// The live insertion point, if any.
    #[must_use]
    pub fn target(&self) -> Option<ResolvedTarget> {
        self.target
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Most recent panel-zone hover.
    #[must_use]
    pub fn last_hover(&self) -> LastHoverSnapshot {
        self.last_hover
    }

    /// Diagnostic log, if enabled.
    #[must_use]
    pub fn diagnostic_log(&self) -> Option<&DiagnosticLog> {
        self.diagnostic_log.as_ref()
    }

    /// Offer `notification` to each zone in order until one consumes it.
    ///
    /// Repaint is offered to every zone; the first painted marker is returned.
    /// A move or drop that no zone takes is settled by
    /// [`missed_every_zone`](Self::missed_every_zone).
    pub fn dispatch<H: DragHost + ?Sized>(
        &mut self,
        zones: &[DropZone],
        notification: Notification,
        session: &mut DragSession,
        payload: &Payload,
        host: &mut H,
    ) -> DragResponse {
        if notification == Notification::DragExited {
            let zone = DropZone::Bottom {
                rect: Rect::default(),
            };
            return self.handle(zone, notification, session, payload, host);
        }
        let mut result = DragResponse::Ignored;
        for zone in zones {
            let response = self.handle(*zone, notification, session, payload, host);
            if response.is_consumed() {
                return response;
            }
            if matches!(notification, Notification::Repaint { .. }) {
                if matches!(result, DragResponse::Ignored) {
                    result = response;
                }
            } else if !matches!(
                response,
                DragResponse::Ignored | DragResponse::Missed(ResolveMiss::OutsidePointer)
            ) {
                result = response;
            }
        }
        if matches!(result, DragResponse::Ignored) {
            return self.missed_every_zone(notification);
        }
        result
    }

    /// Settle a move or drop that landed outside every zone.
    ///
    /// A move clears the live target; a drop clears it and ends the gesture
    /// with [`DragRejection::GeometryMiss`]. Hosts driving [`handle`](Self::handle)
    /// themselves call this once all zones returned unconsumed responses
    /// without any zone containing the pointer.
    pub fn missed_every_zone(&mut self, notification: Notification) -> DragResponse {
        match notification {
            Notification::DragUpdated { .. } => {
                self.clear_target(ResolveMiss::OutsidePointer.as_str());
                self.verdict = None;
                DragResponse::Missed(ResolveMiss::OutsidePointer)
            }
            Notification::DragPerform { .. } if self.target.is_some() => {
                dropline_core::debug!("drop outside every zone");
                self.clear_target(DragRejection::GeometryMiss.as_str());
                self.phase = DragPhase::Idle;
                DragResponse::Rejected(DragRejection::GeometryMiss)
            }
            _ => DragResponse::Ignored,
        }
    }

    /// Handle one notification for one zone.
    pub fn handle<H: DragHost + ?Sized>(
        &mut self,
        zone: DropZone,
        notification: Notification,
        session: &mut DragSession,
        payload: &Payload,
        host: &mut H,
    ) -> DragResponse {
        let _span = dropline_core::debug_span!(
            "panel_drag",
            notification = notification.as_str(),
            session = session.id().0
        )
        .entered();

        self.sync_session(session.id());
        if let DropZone::Panel {
            index, marker_y, ..
        } = zone
            && notification != Notification::DragExited
        {
            self.last_hover.record(index, marker_y);
        }

        match notification {
            Notification::DragUpdated { pointer, modifiers } => {
                self.drag_updated(zone, pointer, modifiers, session, payload, host)
            }
            Notification::DragPerform { pointer, modifiers } => {
                self.drag_perform(zone, pointer, modifiers, session, payload, host)
            }
            Notification::DragExited => self.drag_exited(),
            Notification::Repaint { pointer } => self.repaint(zone, pointer, host),
        }
    }

    fn sync_session(&mut self, id: SessionId) {
        if self.session != Some(id) {
            dropline_core::trace!(session = id.0, "new drag session");
            self.session = Some(id);
            self.target = None;
            self.verdict = None;
            self.last_hover.clear();
            self.phase = DragPhase::Idle;
        }
    }

    fn query(&self, zone: DropZone, pointer: Position) -> HoverQuery {
        match zone {
            DropZone::Panel {
                index,
                rect,
                marker_y,
            } => HoverQuery::panel(index, pointer, rect, marker_y),
            DropZone::Bottom { rect } => HoverQuery::bottom(pointer, rect, &self.last_hover),
        }
    }

    fn classify(&mut self, session: &mut DragSession, payload: &Payload) -> DraggingMode {
        let (mode, fresh) = session.dragging_mode(payload);
        if fresh {
            dropline_core::debug!(
                mode = mode.as_str(),
                objects = payload.len(),
                "classified drag payload"
            );
            self.record(
                DiagnosticEntry::new(DiagnosticEventKind::Classified)
                    .with_session(session.id())
                    .with_mode(mode),
            );
        }
        if self.phase == DragPhase::Idle {
            self.phase = DragPhase::Classified;
        }
        mode
    }

    fn drag_updated<H: DragHost + ?Sized>(
        &mut self,
        zone: DropZone,
        pointer: Position,
        modifiers: Modifiers,
        session: &mut DragSession,
        payload: &Payload,
        host: &mut H,
    ) -> DragResponse {
        let query = self.query(zone, pointer);
        if !query.target_rect.contains_pos(pointer) {
            // Zones are offered in order; the one under the pointer resolves.
            return DragResponse::Missed(ResolveMiss::OutsidePointer);
        }

        let mode = self.classify(session, payload);
        if !mode.is_applicable() {
            self.target = None;
            host.set_feedback(DragFeedback::None);
            return self.rejected(DragRejection::InvalidPayload);
        }

        self.phase = DragPhase::Resolving;
        let target = match resolve(&query, &self.last_hover, &*host) {
            Ok(target) => target,
            Err(miss) => {
                self.clear_target(miss.as_str());
                return DragResponse::Missed(miss);
            }
        };
        dropline_core::trace!(resolved = %target, "resolved drop target");

        let sources: Vec<ComponentRef> = payload.components().collect();
        let targets = host.panel_targets(target.index);
        let copy = self.config.requests_copy(modifiers);
        match drag_over_feedback(host, mode, &sources, &targets, target.side, copy) {
            Ok(feedback) => {
                self.target = Some(target);
                host.set_feedback(feedback);
                host.consume_event();
                self.note_verdict(Verdict::Target(target, feedback));
                DragResponse::Hover { target, feedback }
            }
            Err(rejection) => {
                self.target = None;
                host.set_feedback(DragFeedback::None);
                host.consume_event();
                self.rejected(rejection)
            }
        }
    }

    fn drag_perform<H: DragHost + ?Sized>(
        &mut self,
        zone: DropZone,
        pointer: Position,
        modifiers: Modifiers,
        session: &mut DragSession,
        payload: &Payload,
        host: &mut H,
    ) -> DragResponse {
        if self.target.is_none() {
            return DragResponse::Ignored;
        }
        let query = self.query(zone, pointer);
        if !query.target_rect.contains_pos(pointer) {
            return DragResponse::Ignored;
        }

        let mode = self.classify(session, payload);
        if !mode.is_applicable() {
            self.target = None;
            self.phase = DragPhase::Idle;
            return self.rejected(DragRejection::InvalidPayload);
        }
        let target = match resolve(&query, &self.last_hover, &*host) {
            Ok(target) => target,
            Err(miss) => {
                self.clear_target(miss.as_str());
                self.phase = DragPhase::Idle;
                return DragResponse::Missed(miss);
            }
        };

        self.phase = DragPhase::Executing;
        let targets = host.panel_targets(target.index);
        let copy = self.config.requests_copy(modifiers);
        let report = execute_drop(host, mode, payload, &targets, target, copy);
        dropline_core::debug!(
            resolved = %target,
            moved = report.moved.len(),
            created = report.created.len(),
            rejected = report.rejections.len(),
            "executed drop"
        );

        self.target = None;
        self.verdict = None;
        host.accept_drag();
        host.consume_event();
        if report.changed_items() {
            host.request_unwind();
        }
        self.record(
            DiagnosticEntry::new(DiagnosticEventKind::Dropped)
                .with_session(session.id())
                .with_mode(mode)
                .with_target(target)
                .with_counts(
                    report.moved.len(),
                    report.created.len(),
                    report.rejections.len(),
                ),
        );
        self.phase = DragPhase::Idle;
        DragResponse::Dropped(report)
    }

    fn drag_exited(&mut self) -> DragResponse {
        dropline_core::debug!(had_target = self.target.is_some(), "drag exited");
        self.target = None;
        self.verdict = None;
        self.phase = DragPhase::Idle;
        let entry = DiagnosticEntry::new(DiagnosticEventKind::Exited);
        let entry = match self.session {
            Some(id) => entry.with_session(id),
            None => entry,
        };
        self.record(entry);
        DragResponse::Exited
    }

    fn repaint<H: DragHost + ?Sized>(
        &mut self,
        zone: DropZone,
        pointer: Position,
        host: &mut H,
    ) -> DragResponse {
        let marker_y = match zone {
            DropZone::Panel { marker_y, .. } => marker_y,
            DropZone::Bottom { .. } => self.last_hover.marker_y,
        };
        match render_marker(
            host,
            self.target,
            pointer,
            zone.rect(),
            marker_y,
            &self.config.marker,
        ) {
            Some(bar) => DragResponse::Painted(bar),
            None => DragResponse::Ignored,
        }
    }

    fn clear_target(&mut self, reason: &'static str) {
        if let Some(previous) = self.target.take() {
            dropline_core::trace!(previous = %previous, reason, "cleared drop target");
            self.record(
                DiagnosticEntry::new(DiagnosticEventKind::TargetCleared)
                    .with_target(previous)
                    .with_reason(reason),
            );
            self.verdict = None;
        }
    }

    fn rejected(&mut self, rejection: DragRejection) -> DragResponse {
        self.note_verdict(Verdict::Rejected(rejection.as_str()));
        DragResponse::Rejected(rejection)
    }

    fn note_verdict(&mut self, verdict: Verdict) {
        if self.verdict == Some(verdict) {
            return;
        }
        self.verdict = Some(verdict);
        let entry = match verdict {
            Verdict::Target(target, feedback) => {
                DiagnosticEntry::new(DiagnosticEventKind::TargetResolved)
                    .with_target(target)
                    .with_feedback(feedback)
            }
            Verdict::Rejected(reason) => {
                dropline_core::debug!(reason, "drag rejected");
                DiagnosticEntry::new(DiagnosticEventKind::Rejected).with_reason(reason)
            }
        };
        let entry = match self.session {
            Some(id) => entry.with_session(id),
            None => entry,
        };
        self.record(entry);
    }

    fn record(&mut self, entry: DiagnosticEntry) {
        if let Some(ref mut log) = self.diagnostic_log {
            log.record(entry);
        }
    }
}

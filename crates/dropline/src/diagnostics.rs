#![forbid(unsafe_code)]

//! JSONL diagnostics for drag gestures.
//!
//! Enabled with `DROPLINE_DIAGNOSTICS=true` or
//! [`PanelDragging::with_diagnostics`](crate::dragging::PanelDragging::with_diagnostics).
//! Entries are numbered per log so runs replay deterministically.

use std::io::Write;

use crate::host::DragFeedback;
use crate::resolver::ResolvedTarget;
use crate::session::{DraggingMode, SessionId};

/// Diagnostic event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticEventKind {
    /// A session's payload was classified.
    Classified,
    /// A drag-over produced a target.
    TargetResolved,
    /// A previously resolved target was dropped without executing.
    TargetCleared,
    /// A drag-over or drop was rejected.
    Rejected,
    /// A drop executed.
    Dropped,
    /// The drag left the panel list.
    Exited,
}

impl DiagnosticEventKind {
    /// Get the JSONL event type string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classified => "classified",
            Self::TargetResolved => "target_resolved",
            Self::TargetCleared => "target_cleared",
            Self::Rejected => "rejected",
            Self::Dropped => "dropped",
            Self::Exited => "exited",
        }
    }
}

/// One diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    /// Sequence number within the log (assigned on record).
    pub seq: u64,
    pub kind: DiagnosticEventKind,
    pub session: Option<SessionId>,
    pub mode: Option<DraggingMode>,
    pub target: Option<ResolvedTarget>,
    pub feedback: Option<DragFeedback>,
    /// Short machine-readable reason (rejections, misses).
    pub reason: Option<&'static str>,
    /// Counts for drops: (moved, created, rejected).
    pub counts: Option<(usize, usize, usize)>,
    /// FNV-1a over the other fields.
    pub checksum: u64,
}

impl DiagnosticEntry {
    /// Create an entry of `kind` with no details.
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            seq: 0,
            kind,
            session: None,
            mode: None,
            target: None,
            feedback: None,
            reason: None,
            counts: None,
            checksum: 0,
        }
    }

    #[must_use]
    pub fn with_session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: DraggingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ResolvedTarget) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: DragFeedback) -> Self {
        self.feedback = Some(feedback);
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: &'static str) -> Self {
        self.reason = Some(reason);
        self
    }

    #[must_use]
    pub fn with_counts(mut self, moved: usize, created: usize, rejected: usize) -> Self {
        self.counts = Some((moved, created, rejected));
        self
    }

    fn compute_checksum(&self) -> u64 {
        let mut hash: u64 = 0xcbf29ce484222325;
        let payload = format!(
            "{}{:?}{:?}{:?}{:?}{:?}{:?}",
            self.kind.as_str(),
            self.session.map(|s| s.0),
            self.mode.map(DraggingMode::as_str),
            self.target.map(|t| (t.index, t.side.as_str())),
            self.feedback.map(DragFeedback::as_str),
            self.reason,
            self.counts,
        );
        for &b in payload.as_bytes() {
            hash ^= b as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        hash
    }

    /// Format as a single JSON line.
    pub fn to_jsonl(&self) -> String {
        let mut parts = vec![
            format!("\"seq\":{}", self.seq),
            format!("\"kind\":\"{}\"", self.kind.as_str()),
        ];
        if let Some(session) = self.session {
            parts.push(format!("\"session\":{}", session.0));
        }
        if let Some(mode) = self.mode {
            parts.push(format!("\"mode\":\"{}\"", mode.as_str()));
        }
        if let Some(target) = self.target {
            parts.push(format!("\"target_index\":{}", target.index));
            parts.push(format!("\"side\":\"{}\"", target.side.as_str()));
        }
        if let Some(feedback) = self.feedback {
            parts.push(format!("\"feedback\":\"{}\"", feedback.as_str()));
        }
        if let Some(reason) = self.reason {
            parts.push(format!("\"reason\":\"{reason}\""));
        }
        if let Some((moved, created, rejected)) = self.counts {
            parts.push(format!("\"moved\":{moved}"));
            parts.push(format!("\"created\":{created}"));
            parts.push(format!("\"rejected\":{rejected}"));
        }
        parts.push(format!("\"checksum\":\"{:016x}\"", self.checksum));
        format!("{{{}}}", parts.join(","))
    }
}

/// Bounded in-memory diagnostic log.
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    entries: Vec<DiagnosticEntry>,
    max_entries: usize,
    write_stderr: bool,
    next_seq: u64,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticLog {
    /// Create a log keeping the latest 5000 entries.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 5000,
            write_stderr: false,
            next_seq: 0,
        }
    }

    /// Mirror every entry to stderr.
    #[must_use]
    pub fn with_stderr(mut self) -> Self {
        self.write_stderr = true;
        self
    }

    /// Set maximum entries to keep (0 = unbounded).
    #[must_use]
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Number, checksum, and store an entry.
    pub fn record(&mut self, mut entry: DiagnosticEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;
        entry.checksum = entry.compute_checksum();
        if self.write_stderr {
            let _ = writeln!(std::io::stderr(), "{}", entry.to_jsonl());
        }
        if self.max_entries > 0 && self.entries.len() >= self.max_entries {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    /// All retained entries.
    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    /// Entries of one kind.
    pub fn entries_of_kind(&self, kind: DiagnosticEventKind) -> Vec<&DiagnosticEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// Drop all entries (sequence numbers keep counting).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries as newline-separated JSONL.
    pub fn to_jsonl(&self) -> String {
        self.entries
            .iter()
            .map(DiagnosticEntry::to_jsonl)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_numbers_and_checksums() {
        let mut log = DiagnosticLog::new();
        log.record(DiagnosticEntry::new(DiagnosticEventKind::Classified));
        log.record(
            DiagnosticEntry::new(DiagnosticEventKind::TargetResolved)
                .with_target(ResolvedTarget::above(2))
                .with_feedback(DragFeedback::Move),
        );
        let entries = log.entries();
        assert_eq!(entries[0].seq, 0);
        assert_eq!(entries[1].seq, 1);
        assert_ne!(entries[1].checksum, 0);
        assert_ne!(entries[0].checksum, entries[1].checksum);
    }

    #[test]
    fn jsonl_contains_fields() {
        let mut log = DiagnosticLog::new();
        log.record(
            DiagnosticEntry::new(DiagnosticEventKind::Dropped)
                .with_session(SessionId(9))
                .with_mode(DraggingMode::ScriptSet)
                .with_target(ResolvedTarget::below(1))
                .with_counts(0, 2, 1),
        );
        let line = log.to_jsonl();
        assert!(line.starts_with("{\"seq\":0,\"kind\":\"dropped\""));
        assert!(line.contains("\"session\":9"));
        assert!(line.contains("\"mode\":\"script_set\""));
        assert!(line.contains("\"target_index\":1,\"side\":\"below\""));
        assert!(line.contains("\"created\":2"));
        assert!(line.ends_with("\"}"));
    }

    #[test]
    fn max_entries_evicts_oldest() {
        let mut log = DiagnosticLog::new().with_max_entries(2);
        for _ in 0..3 {
            log.record(DiagnosticEntry::new(DiagnosticEventKind::Exited));
        }
        let seqs: Vec<u64> = log.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn filter_by_kind() {
        let mut log = DiagnosticLog::new();
        log.record(DiagnosticEntry::new(DiagnosticEventKind::Rejected).with_reason("past_end"));
        log.record(DiagnosticEntry::new(DiagnosticEventKind::Exited));
        let rejected = log.entries_of_kind(DiagnosticEventKind::Rejected);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].reason, Some("past_end"));
    }
}

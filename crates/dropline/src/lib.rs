#![forbid(unsafe_code)]

//! Drag-and-drop for a vertically stacked list of inspector panels.
//!
//! Dragging components over the list reorders them; dragging scripts creates
//! new components next to the resolved panel. The host owns the panels, the
//! item graph, and the drag subsystem; this crate turns pointer notifications
//! into a single insertion point, a validity verdict, a marker, and, on drop,
//! calls into the host's item-manipulation primitives.
//!
//! ```ignore
//! use dropline::{DragDropConfig, DragSession, DropZone, Notification, PanelDragging};
//!
//! let mut dragging = PanelDragging::new(DragDropConfig::from_env());
//! let mut session = DragSession::begin();
//! let response = dragging.dispatch(
//!     &zones,
//!     Notification::moved(pointer),
//!     &mut session,
//!     &payload,
//!     &mut host,
//! );
//! ```

pub mod config;
pub mod diagnostics;
pub mod dragging;
pub mod error;
pub mod executor;
pub mod gate;
pub mod host;
pub mod marker;
pub mod panel;
pub mod payload;
pub mod resolver;
pub mod session;

pub use config::DragDropConfig;
pub use dragging::{DragHost, DragPhase, DragResponse, DropZone, Notification, PanelDragging};
pub use error::{DragRejection, IncompatibleReason};
pub use executor::DropReport;
pub use host::{DragFeedback, DragSink, ItemOps};
pub use marker::{MarkerStyle, MarkerSurface};
pub use panel::{PanelEntry, PanelFlags, PanelList, PanelStack};
pub use payload::{ComponentRef, DraggedObject, ItemId, OwnerId, Payload, ScriptRef};
pub use resolver::{ResolvedTarget, Side};
pub use session::{DragSession, DraggingMode, SessionId};

pub use dropline_core::geometry::{Position, Rect};
pub use dropline_core::modifiers::Modifiers;

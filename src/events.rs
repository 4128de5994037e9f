//! Typed notifications and history records.
//!
//! The engine never mutates undo state or talks to the host directly; it
//! produces [`ChangeRecord`] batches and emits a closed set of [`GridEvent`]
//! payloads through injected sinks. Events fire synchronously, in call
//! order, on the host's single event loop.

use crate::grid::CellPosition;
use crate::column::EditorKind;
use crate::value::CellValue;

/// One before/after value change for a single cell. Immutable once
/// produced; a batch of these is the unit handed to history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub x: usize,
    pub y: usize,
    pub old_value: CellValue,
    pub new_value: CellValue,
}

/// Action tag on a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    SetValue,
}

/// One undoable unit: a record batch plus the highlighted selection at the
/// time the change was made. Owned by the host's history collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub action: HistoryAction,
    pub records: Vec<ChangeRecord>,
    pub selection: Vec<CellPosition>,
}

/// Event payloads emitted by the edit session controller.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// An edit was requested on `(x, y)`. Fires even for read-only cells.
    EditionStart { x: usize, y: usize },
    /// An editor (built-in or custom) was constructed for `(x, y)`.
    CreateEditor { x: usize, y: usize, kind: EditorKind },
    /// The session on `(x, y)` ended. `value` is the extracted value when
    /// `saved` is true and extraction produced one.
    EditionEnd {
        x: usize,
        y: usize,
        value: Option<CellValue>,
        saved: bool,
    },
    /// One or more cell values were written.
    AfterChanges { records: Vec<ChangeRecord> },
}

/// Injected observer for [`GridEvent`] notifications.
pub trait EventSink {
    fn emit(&mut self, event: GridEvent);
}

impl EventSink for Vec<GridEvent> {
    fn emit(&mut self, event: GridEvent) {
        self.push(event);
    }
}

/// Injected sink for undo history entries.
pub trait HistorySink {
    fn record(&mut self, entry: HistoryEntry);
}

impl HistorySink for Vec<HistoryEntry> {
    fn record(&mut self, entry: HistoryEntry) {
        self.push(entry);
    }
}

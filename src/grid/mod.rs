//! Grid model: cells, the value store, and the collaborator bundle.
//!
//! The grid instance owns the edit session (`Option<EditSession>`), never a
//! process-wide global, so several grids on one page cannot cross-contaminate
//! edit state. The session controller lives in [`session`], the bulk
//! checkbox/radio toggle in [`toggle`].

mod session;
mod toggle;

pub use session::{ActiveEditor, EditSession, PointerTarget};

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::events::{ChangeRecord, EventSink, GridEvent, HistoryAction, HistoryEntry, HistorySink};
use crate::geometry::{Rect, Size};
use crate::options::GridOptions;
use crate::picker::PickerFactory;
use crate::surface::TextEditSurface;
use crate::value::CellValue;

/// Identity of a grid instance; stamps surface attachments so a shared
/// surface can tell which grid owns the cell borrowing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(u64);

static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(1);

impl GridId {
    fn next() -> Self {
        GridId(NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn for_tests(id: u64) -> Self {
        GridId(id)
    }
}

/// Zero-based cell coordinates: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellPosition {
    pub x: usize,
    pub y: usize,
}

impl CellPosition {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// The visual cell node the host renders. `content` stands in for the
/// cell's rendered markup; the session controller snapshots and restores it
/// around an edit.
#[derive(Debug, Clone, Default)]
pub struct CellNode {
    pub content: String,
    pub readonly: bool,
    /// The editor-active visual marker; set exactly while a session holds
    /// this cell.
    pub editing: bool,
    /// Overflow rendering suppressed while a neighbor is edited (cosmetic).
    pub overflow_hidden: bool,
    pub bounds: Rect,
}

/// Stored cell values, indexed `(x, y)`. Reads outside the matrix yield the
/// empty value.
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn get(&self, x: usize, y: usize) -> CellValue {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .cloned()
            .unwrap_or_default()
    }

    /// Write a value, growing the matrix as needed.
    pub fn set(&mut self, x: usize, y: usize, value: CellValue) {
        while self.rows.len() <= y {
            self.rows.push(Vec::new());
        }
        let row = &mut self.rows[y];
        while row.len() <= x {
            row.push(CellValue::default());
        }
        row[x] = value;
    }
}

/// The collaborators an edit operation needs, injected per call: the shared
/// text surface, the event observer, the history sink and the picker
/// constructors.
pub struct EditContext<'a> {
    pub surface: &'a mut TextEditSurface,
    pub events: &'a mut dyn EventSink,
    pub history: &'a mut dyn HistorySink,
    pub pickers: &'a mut dyn PickerFactory,
}

const DEFAULT_COLUMN_WIDTH: f32 = 100.0;
const DEFAULT_ROW_HEIGHT: f32 = 24.0;

/// One grid instance.
#[derive(Debug)]
pub struct Grid {
    pub id: GridId,
    pub columns: Vec<Column>,
    pub data: SheetData,
    pub cells: Vec<Vec<CellNode>>,
    /// The highlighted-selection set, ordered as the host resolves it.
    pub highlighted: Vec<CellPosition>,
    /// The live edit session, at most one per grid.
    pub edition: Option<EditSession>,
    pub viewport: Size,
}

impl Grid {
    pub fn new(options: GridOptions) -> Self {
        let data = SheetData::from_rows(options.data);
        let column_count = options.columns.len().max(data.column_count());

        let mut cells = Vec::with_capacity(data.row_count());
        for y in 0..data.row_count() {
            let mut row = Vec::with_capacity(column_count);
            for x in 0..column_count {
                row.push(CellNode {
                    content: data.get(x, y).display(),
                    bounds: Rect::new(
                        x as f32 * DEFAULT_COLUMN_WIDTH,
                        y as f32 * DEFAULT_ROW_HEIGHT,
                        DEFAULT_COLUMN_WIDTH,
                        DEFAULT_ROW_HEIGHT,
                    ),
                    ..CellNode::default()
                });
            }
            cells.push(row);
        }

        Self {
            id: GridId::next(),
            columns: options.columns,
            data,
            cells,
            highlighted: Vec::new(),
            edition: None,
            viewport: Size::new(800.0, 600.0),
        }
    }

    pub fn column(&self, x: usize) -> Option<&Column> {
        self.columns.get(x)
    }

    pub fn cell(&self, pos: CellPosition) -> Option<&CellNode> {
        self.cells.get(pos.y).and_then(|row| row.get(pos.x))
    }

    pub fn cell_mut(&mut self, pos: CellPosition) -> Option<&mut CellNode> {
        self.cells.get_mut(pos.y).and_then(|row| row.get_mut(pos.x))
    }

    /// Current stored value for a cell (the `data[y][x]` read path).
    pub fn value(&self, pos: CellPosition) -> CellValue {
        self.data.get(pos.x, pos.y)
    }

    pub fn is_editing(&self) -> bool {
        self.edition.is_some()
    }

    pub fn set_readonly(&mut self, pos: CellPosition, readonly: bool) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.readonly = readonly;
        }
    }

    pub fn set_cell_bounds(&mut self, pos: CellPosition, bounds: Rect) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.bounds = bounds;
        }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    fn render_cell(&mut self, pos: CellPosition) {
        let content = self.value(pos).display();
        if let Some(cell) = self.cell_mut(pos) {
            cell.content = content;
        }
    }

    /// Low-level write: update storage, re-render the cell, and hand back
    /// the change record. No history entry and no notification.
    pub(crate) fn update_cell(&mut self, pos: CellPosition, value: CellValue) -> ChangeRecord {
        let old_value = self.value(pos);
        self.data.set(pos.x, pos.y, value.clone());
        self.render_cell(pos);
        ChangeRecord {
            x: pos.x,
            y: pos.y,
            old_value,
            new_value: value,
        }
    }

    /// The value-set primitive: writes storage, re-renders, appends one
    /// history entry and fires an after-changes notification. Single-cell
    /// commits and the instant checkbox/radio toggle route through here.
    pub fn set_value(&mut self, pos: CellPosition, value: CellValue, ctx: &mut EditContext<'_>) {
        let record = self.update_cell(pos, value);
        ctx.history.record(HistoryEntry {
            action: HistoryAction::SetValue,
            records: vec![record.clone()],
            selection: self.highlighted.clone(),
        });
        ctx.events.emit(GridEvent::AfterChanges {
            records: vec![record],
        });
    }
}

//! gridedit - headless cell-editing engine for spreadsheet grids
//!
//! This crate implements the state machine that moves a single grid cell
//! between "displayed" and "being edited": opening the right editor variant
//! for a column, normalizing and committing the typed or picked value, and
//! notifying the host's history and event collaborators.
//!
//! The engine is headless: rendering, layout and the actual picker widgets
//! (dropdown, calendar, color, rich text, image) live in the host. The host
//! injects its collaborators through [`grid::EditContext`] and implements the
//! [`picker::PickerFactory`] seam; the engine drives everything else.

pub mod column;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod mask;
pub mod options;
pub mod picker;
pub mod surface;
pub mod value;

// Re-export commonly used types
pub use column::{Column, ColumnType, CustomEditor, EditorKind};
pub use events::{ChangeRecord, EventSink, GridEvent, HistoryAction, HistoryEntry, HistorySink};
pub use geometry::{Point, Rect, Size};
pub use grid::{
    CellNode, CellPosition, EditContext, EditSession, Grid, GridId, PointerTarget, SheetData,
};
pub use options::GridOptions;
pub use picker::{
    DropdownOptions, ImageOptions, InputPickerOptions, Picker, PickerFactory, RichTextOptions,
};
pub use surface::{EditAction, Key, KeyCode, TextEditSurface};
pub use value::CellValue;

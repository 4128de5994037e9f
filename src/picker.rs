//! Contract required of the host's picker libraries.
//!
//! Dropdown, calendar, color, rich-text and image editors are third-party
//! widgets owned by the host. The engine only requires the pair the original
//! libraries expose: an open-with-initial-value constructor (the factory
//! methods below) and a close primitive that returns or discards the final
//! value. The host must route the picker's own close action back into
//! [`crate::Grid::close_editor`] with `save = true`, exactly as it routes an
//! explicit user action.

use serde_json::Value as Json;

use crate::column::EditorKind;
use crate::geometry::{Point, Rect, Size};
use crate::value::CellValue;

/// A live transient picker, owned by the edit session that spawned it.
pub trait Picker {
    /// Close the picker. With `commit` it returns the final value; without,
    /// it discards state and releases whatever resources it holds.
    fn close(&mut self, commit: bool) -> Option<CellValue>;
}

/// Options for a dropdown picker. `items` is already filtered and defensively
/// cloned; the column's original source is never handed out.
#[derive(Debug, Clone)]
pub struct DropdownOptions {
    pub items: Vec<String>,
    /// Current picks; a single-select dropdown gets at most one entry.
    pub value: Vec<String>,
    pub multiple: bool,
    pub autocomplete: bool,
    /// In-cell bounds the picker's anchor element occupies.
    pub bounds: Rect,
    /// Column pass-through options, untouched.
    pub extra: Json,
}

/// Options for the input-backed calendar and color pickers.
#[derive(Debug, Clone)]
pub struct InputPickerOptions {
    pub value: CellValue,
    /// Calendar display format; `None` for color pickers.
    pub format: Option<String>,
    /// Viewport position after the flip rules were applied.
    pub placement: Point,
    pub bounds: Rect,
    pub extra: Json,
}

/// Options for the rich-text surface.
#[derive(Debug, Clone)]
pub struct RichTextOptions {
    pub value: CellValue,
    pub placement: Point,
    pub bounds: Rect,
}

/// Options for the image editor.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    /// Existing image source carried over from the cell, if any.
    pub src: Option<String>,
    pub placement: Point,
    pub bounds: Rect,
    pub extra: Json,
}

/// Popup footprint assumed when no picker exists yet to measure.
pub const DEFAULT_POPUP_SIZE: Size = Size {
    width: 300.0,
    height: 240.0,
};

/// Constructors for the transient pickers, injected by the host.
///
/// Every constructor opens the picker immediately, pre-populated with the
/// given value.
pub trait PickerFactory {
    fn dropdown(&mut self, options: DropdownOptions) -> Box<dyn Picker>;
    fn calendar(&mut self, options: InputPickerOptions) -> Box<dyn Picker>;
    fn color(&mut self, options: InputPickerOptions) -> Box<dyn Picker>;
    fn rich_text(&mut self, options: RichTextOptions) -> Box<dyn Picker>;
    fn image(&mut self, options: ImageOptions) -> Box<dyn Picker>;

    /// Footprint used for viewport-flip placement, resolved before the
    /// picker is constructed.
    fn popup_size(&self, kind: EditorKind) -> Size {
        let _ = kind;
        DEFAULT_POPUP_SIZE
    }
}

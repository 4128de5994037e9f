//! Column configuration and editor-variant resolution.
//!
//! Each column declares how its cells are edited: a string-keyed type for
//! the built-in variants, or a caller-supplied [`CustomEditor`] object that
//! takes precedence over the type. Missing or unrecognized configuration
//! falls back to the default text variant rather than erroring.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;

use crate::grid::CellNode;
use crate::value::CellValue;

/// Declared column type. Unknown type strings deserialize as [`ColumnType::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Numeric,
    Checkbox,
    Radio,
    Hidden,
    Dropdown,
    Calendar,
    Color,
    Html,
    Image,
}

impl ColumnType {
    /// Resolve a type name; anything unrecognized is the text variant.
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => ColumnType::Text,
            "numeric" => ColumnType::Numeric,
            "checkbox" => ColumnType::Checkbox,
            "radio" => ColumnType::Radio,
            "hidden" => ColumnType::Hidden,
            "dropdown" => ColumnType::Dropdown,
            "calendar" => ColumnType::Calendar,
            "color" => ColumnType::Color,
            "html" => ColumnType::Html,
            "image" => ColumnType::Image,
            _ => ColumnType::Text,
        }
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ColumnType::from_name(&name))
    }
}

/// The behavior family an edit session dispatches on. Exactly one applies
/// per column; `Custom` wraps a caller-supplied capability object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Text,
    Checkbox,
    Radio,
    Hidden,
    Dropdown,
    Calendar,
    Color,
    Html,
    Image,
    Custom,
}

/// Caller-supplied editor implementing the open/close capability pair.
///
/// A custom editor fully owns its cell manipulation and its value
/// extraction; the session controller only snapshots/restores the cell
/// content around it and emits the usual notifications.
pub trait CustomEditor {
    /// Build the editor inside `cell`. The full column config is passed for
    /// introspection.
    fn open_editor(&self, cell: &mut CellNode, value: &CellValue, x: usize, y: usize, column: &Column);

    /// Tear the editor down. Returns the extracted value when `save` is
    /// true, `None` on cancel.
    fn close_editor(
        &self,
        cell: &mut CellNode,
        save: bool,
        x: usize,
        y: usize,
        column: &Column,
    ) -> Option<CellValue>;
}

/// Filter applied to a dropdown's option source before the picker opens.
/// Receives the cell, its coordinates and the raw source.
pub type DropdownFilter = Rc<dyn Fn(&CellNode, usize, usize, &[String]) -> Vec<String>>;

/// Per-column configuration.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Column {
    #[serde(rename = "type")]
    pub kind: ColumnType,
    pub title: Option<String>,
    /// Option source for dropdown columns.
    pub source: Vec<String>,
    /// Dropdown allows multiple picks, stored joined on `;`.
    pub multiple: bool,
    pub autocomplete: bool,
    /// Numeric mask, e.g. `#,##0.00`.
    pub mask: Option<String>,
    /// Calendar display format; defaults to `YYYY-MM-DD` when absent.
    pub format: Option<String>,
    /// Numeric columns keep empty input instead of coercing it to `0`.
    #[serde(rename = "allowEmpty")]
    pub allow_empty: bool,
    /// Pass-through options handed to the picker library untouched.
    pub options: Json,
    #[serde(skip)]
    pub editor: Option<Rc<dyn CustomEditor>>,
    #[serde(skip)]
    pub filter: Option<DropdownFilter>,
}

impl Column {
    pub fn new(kind: ColumnType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("multiple", &self.multiple)
            .field("mask", &self.mask)
            .field("custom_editor", &self.editor.is_some())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// Resolve the editor variant for a column. A custom editor object takes
/// precedence over the string-keyed type; a missing column is the default
/// text variant.
pub fn resolve_variant(column: Option<&Column>) -> EditorKind {
    let Some(column) = column else {
        return EditorKind::Text;
    };
    if column.editor.is_some() {
        return EditorKind::Custom;
    }
    match column.kind {
        // Numeric is the text variant with numeric extraction at close.
        ColumnType::Text | ColumnType::Numeric => EditorKind::Text,
        ColumnType::Checkbox => EditorKind::Checkbox,
        ColumnType::Radio => EditorKind::Radio,
        ColumnType::Hidden => EditorKind::Hidden,
        ColumnType::Dropdown => EditorKind::Dropdown,
        ColumnType::Calendar => EditorKind::Calendar,
        ColumnType::Color => EditorKind::Color,
        ColumnType::Html => EditorKind::Html,
        ColumnType::Image => EditorKind::Image,
    }
}

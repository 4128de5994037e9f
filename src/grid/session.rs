//! Edit session controller: the open → active → close state machine.
//!
//! At most one session exists per grid at any instant. Opening while a
//! session is active is refused — callers serialize close-then-open, the
//! controller never closes implicitly. Every failure path degrades to
//! "edit did not commit": nothing in here can take the grid down.

use std::fmt;

use crate::column::{resolve_variant, Column, EditorKind};
use crate::events::GridEvent;
use crate::geometry::{editor_bounds, place_popup, place_popup_vertical, Rect};
use crate::grid::{CellPosition, EditContext, Grid};
use crate::mask::normalize;
use crate::picker::{
    DropdownOptions, ImageOptions, InputPickerOptions, Picker, RichTextOptions,
};
use crate::surface::{EditAction, Key};
use crate::value::CellValue;

/// The live editor behind a session.
pub enum ActiveEditor {
    /// No editor (hidden variant).
    None,
    /// The shared text surface is attached to the session's cell.
    Surface,
    /// A transient picker owned by this session.
    Picker(Box<dyn Picker>),
    /// A caller-supplied editor that owns its own cell manipulation.
    Custom,
}

impl fmt::Debug for ActiveEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveEditor::None => write!(f, "None"),
            ActiveEditor::Surface => write!(f, "Surface"),
            ActiveEditor::Picker(_) => write!(f, "Picker(..)"),
            ActiveEditor::Custom => write!(f, "Custom"),
        }
    }
}

/// One live edit session. Created on open, destroyed on close, never
/// persisted. While it exists the referenced cell carries the
/// editor-active marker.
#[derive(Debug)]
pub struct EditSession {
    pub pos: CellPosition,
    /// Snapshot of the cell's rendered content, restored verbatim on
    /// cancel and on same-value commits.
    pub original_content: String,
    pub kind: EditorKind,
    pub editor: ActiveEditor,
}

/// Host-side hit-test result for a pointer event, used by the
/// outside-click policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The pointer landed on or inside the text surface.
    Surface,
    /// Anywhere else.
    Outside,
}

/// The picker's in-cell anchor element is two pixels shorter than the cell.
fn picker_anchor(cell: Rect) -> Rect {
    Rect::new(cell.x, cell.y, cell.width, (cell.height - 2.0).max(0.0))
}

/// Current picks seeded into a dropdown: stored multi values split on `;`
/// unless they are already a list.
fn dropdown_value(column: &Column, stored: &CellValue) -> Vec<String> {
    if column.multiple {
        match stored {
            CellValue::List(items) => items.clone(),
            other => {
                let display = other.display();
                if display.is_empty() {
                    Vec::new()
                } else {
                    display.split(';').map(str::to_string).collect()
                }
            }
        }
    } else {
        let display = stored.display();
        if display.is_empty() {
            Vec::new()
        } else {
            vec![display]
        }
    }
}

impl Grid {
    /// Open an editor on `cell`. `empty` starts the text editor blank
    /// instead of seeded with the current value (typing over a cell).
    ///
    /// Read-only cells get the start notification and nothing else. If a
    /// session is already active the call is refused; callers must close
    /// it first.
    pub fn open_editor(&mut self, pos: CellPosition, empty: bool, ctx: &mut EditContext<'_>) {
        let CellPosition { x, y } = pos;

        ctx.events.emit(GridEvent::EditionStart { x, y });

        // Suppress the previous column's overflow while this cell is edited.
        if x > 0 {
            if let Some(neighbor) = self.cell_mut(CellPosition::new(x - 1, y)) {
                neighbor.overflow_hidden = true;
            }
        }

        let Some(cell) = self.cell(pos) else {
            tracing::warn!(x, y, "open_editor on a cell outside the grid");
            return;
        };
        if cell.readonly {
            return;
        }
        if self.edition.is_some() {
            tracing::warn!(x, y, "open_editor while a session is active; close it first");
            return;
        }

        let original_content = cell.content.clone();
        let cell_bounds = cell.bounds;
        let column = self.columns.get(x).cloned();
        let kind = resolve_variant(column.as_ref());

        match kind {
            EditorKind::Custom => {
                let Some(column) = column else { return };
                let Some(editor) = column.editor.clone() else { return };
                let value = self.value(pos);
                if let Some(cell) = self.cell_mut(pos) {
                    cell.editing = true;
                    editor.open_editor(cell, &value, x, y, &column);
                }
                self.edition = Some(EditSession {
                    pos,
                    original_content,
                    kind,
                    editor: ActiveEditor::Custom,
                });
                ctx.events.emit(GridEvent::CreateEditor { x, y, kind });
            }
            EditorKind::Hidden => {
                // No editor is created, so no create-editor notification.
                if let Some(cell) = self.cell_mut(pos) {
                    cell.editing = true;
                }
                self.edition = Some(EditSession {
                    pos,
                    original_content,
                    kind,
                    editor: ActiveEditor::None,
                });
            }
            EditorKind::Checkbox | EditorKind::Radio => {
                // Instant toggle through the commit path; the session ends
                // synchronously and never persists.
                let flipped = !self.value(pos).truthy();
                self.set_value(pos, CellValue::Bool(flipped), ctx);
            }
            EditorKind::Dropdown => {
                let column = column.unwrap_or_default();
                let stored = self.value(pos);
                let value = dropdown_value(&column, &stored);
                // The source is cloned defensively either way; a filter gets
                // the cell and coordinates alongside the raw source.
                let items = match (&column.filter, self.cell(pos)) {
                    (Some(filter), Some(cell)) => filter(cell, x, y, &column.source),
                    _ => column.source.clone(),
                };
                if let Some(cell) = self.cell_mut(pos) {
                    cell.editing = true;
                    cell.content.clear();
                }
                let picker = ctx.pickers.dropdown(DropdownOptions {
                    items,
                    value,
                    multiple: column.multiple,
                    autocomplete: column.autocomplete,
                    bounds: picker_anchor(cell_bounds),
                    extra: column.options.clone(),
                });
                self.edition = Some(EditSession {
                    pos,
                    original_content,
                    kind,
                    editor: ActiveEditor::Picker(picker),
                });
                ctx.events.emit(GridEvent::CreateEditor { x, y, kind });
            }
            EditorKind::Calendar | EditorKind::Color => {
                let column = column.unwrap_or_default();
                let stored = self.value(pos);
                let placement =
                    place_popup(cell_bounds, ctx.pickers.popup_size(kind), self.viewport);
                let format = match kind {
                    EditorKind::Calendar => Some(
                        column
                            .format
                            .clone()
                            .unwrap_or_else(|| "YYYY-MM-DD".to_string()),
                    ),
                    _ => None,
                };
                if let Some(cell) = self.cell_mut(pos) {
                    cell.editing = true;
                    cell.content.clear();
                }
                let options = InputPickerOptions {
                    value: stored,
                    format,
                    placement,
                    bounds: picker_anchor(cell_bounds),
                    extra: column.options.clone(),
                };
                let picker = match kind {
                    EditorKind::Calendar => ctx.pickers.calendar(options),
                    _ => ctx.pickers.color(options),
                };
                self.edition = Some(EditSession {
                    pos,
                    original_content,
                    kind,
                    editor: ActiveEditor::Picker(picker),
                });
                ctx.events.emit(GridEvent::CreateEditor { x, y, kind });
            }
            EditorKind::Html => {
                let stored = self.value(pos);
                let placement =
                    place_popup(cell_bounds, ctx.pickers.popup_size(kind), self.viewport);
                if let Some(cell) = self.cell_mut(pos) {
                    cell.editing = true;
                    cell.content.clear();
                }
                let picker = ctx.pickers.rich_text(RichTextOptions {
                    value: stored,
                    placement,
                    bounds: picker_anchor(cell_bounds),
                });
                self.edition = Some(EditSession {
                    pos,
                    original_content,
                    kind,
                    editor: ActiveEditor::Picker(picker),
                });
                ctx.events.emit(GridEvent::CreateEditor { x, y, kind });
            }
            EditorKind::Image => {
                let column = column.unwrap_or_default();
                // Any existing image rides into the editor.
                let src = match self.value(pos) {
                    CellValue::Text(t) if !t.is_empty() => Some(t),
                    _ => None,
                };
                let placement =
                    place_popup_vertical(cell_bounds, ctx.pickers.popup_size(kind), self.viewport);
                if let Some(cell) = self.cell_mut(pos) {
                    cell.editing = true;
                    cell.content.clear();
                }
                let picker = ctx.pickers.image(ImageOptions {
                    src,
                    placement,
                    bounds: picker_anchor(cell_bounds),
                    extra: column.options.clone(),
                });
                self.edition = Some(EditSession {
                    pos,
                    original_content,
                    kind,
                    editor: ActiveEditor::Picker(picker),
                });
                ctx.events.emit(GridEvent::CreateEditor { x, y, kind });
            }
            EditorKind::Text => {
                let seed = if empty {
                    String::new()
                } else {
                    self.value(pos).display()
                };
                // Surface goes exactly over the cell, stamped with this
                // grid and cell; focus and caret-to-end happen on attach.
                ctx.surface
                    .attach(self.id, pos, editor_bounds(cell_bounds), &seed);
                if let Some(cell) = self.cell_mut(pos) {
                    cell.editing = true;
                }
                self.edition = Some(EditSession {
                    pos,
                    original_content,
                    kind,
                    editor: ActiveEditor::Surface,
                });
                ctx.events.emit(GridEvent::CreateEditor { x, y, kind });
            }
        }
    }

    /// Close the active session. With `save` the editor's value is
    /// extracted, normalized and written (unless it round-trips to the
    /// stored value); without, the cell's pre-edit content is restored
    /// unconditionally.
    ///
    /// Closing with no active session is a silent no-op.
    pub fn close_editor(
        &mut self,
        pos: CellPosition,
        save: bool,
        ctx: &mut EditContext<'_>,
    ) -> Option<CellValue> {
        let Some(mut session) = self.edition.take() else {
            tracing::debug!(
                x = pos.x,
                y = pos.y,
                "close_editor without an active session is a no-op"
            );
            return None;
        };
        if session.pos != pos {
            tracing::warn!(
                requested_x = pos.x,
                requested_y = pos.y,
                session_x = session.pos.x,
                session_y = session.pos.y,
                "close_editor cell differs from the active session; closing the session's cell"
            );
        }
        let pos = session.pos;
        let CellPosition { x, y } = pos;
        let column = self.columns.get(x).cloned();

        let mut value: Option<CellValue> = None;

        if save {
            value = match (session.kind, &mut session.editor) {
                (EditorKind::Custom, _) => {
                    // Custom editors fully own extraction.
                    let column = column.clone().unwrap_or_default();
                    match column.editor.clone() {
                        Some(editor) => self
                            .cell_mut(pos)
                            .and_then(|cell| editor.close_editor(cell, true, x, y, &column)),
                        None => None,
                    }
                }
                (EditorKind::Checkbox | EditorKind::Radio | EditorKind::Hidden, _) => None,
                (EditorKind::Dropdown, ActiveEditor::Picker(picker)) => {
                    // Multi-select picks are stored joined on `;`.
                    match picker.close(true) {
                        Some(CellValue::List(items)) => Some(CellValue::Text(items.join(";"))),
                        other => other,
                    }
                }
                (
                    EditorKind::Calendar | EditorKind::Color | EditorKind::Html,
                    ActiveEditor::Picker(picker),
                ) => picker.close(true),
                (EditorKind::Image, ActiveEditor::Picker(picker)) => {
                    // The resulting image source, or empty if none remains.
                    Some(
                        picker
                            .close(true)
                            .unwrap_or_else(|| CellValue::Text(String::new())),
                    )
                }
                (EditorKind::Text, _) => {
                    let raw = if ctx.surface.is_attached_to(self.id, pos) {
                        let text = ctx.surface.text().to_string();
                        ctx.surface.detach();
                        text
                    } else {
                        tracing::debug!(x, y, "text surface not attached to this cell");
                        String::new()
                    };
                    Some(normalize(column.as_ref(), &raw))
                }
                (kind, _) => {
                    tracing::warn!(?kind, "session editor does not match its variant");
                    None
                }
            };

            match &value {
                Some(extracted) if self.value(pos).loosely_eq(extracted) => {
                    // Same value round-trip: restore the snapshot, record
                    // nothing.
                    if let Some(cell) = self.cell_mut(pos) {
                        cell.content = session.original_content.clone();
                    }
                }
                Some(extracted) => {
                    let extracted = extracted.clone();
                    self.set_value(pos, extracted, ctx);
                }
                None => {
                    if let Some(cell) = self.cell_mut(pos) {
                        cell.content = session.original_content.clone();
                    }
                }
            }
        } else {
            // Cancel: let the editor release its resources first, then
            // restore the snapshot unconditionally.
            match (session.kind, &mut session.editor) {
                (EditorKind::Custom, _) => {
                    if let Some(column) = column.clone() {
                        if let Some(editor) = column.editor.clone() {
                            if let Some(cell) = self.cell_mut(pos) {
                                editor.close_editor(cell, false, x, y, &column);
                            }
                        }
                    }
                }
                (_, ActiveEditor::Picker(picker)) => {
                    picker.close(false);
                }
                (EditorKind::Text, _) => {
                    if ctx.surface.is_attached_to(self.id, pos) {
                        ctx.surface.detach();
                    }
                }
                _ => {}
            }
            if let Some(cell) = self.cell_mut(pos) {
                cell.content = session.original_content.clone();
            }
        }

        ctx.events.emit(GridEvent::EditionEnd {
            x,
            y,
            value: value.clone(),
            saved: save,
        });
        if let Some(cell) = self.cell_mut(pos) {
            cell.editing = false;
        }
        value
    }

    /// Outside-click policy: a pointer event anywhere but the text surface
    /// commits the active session. This is the only implicit-commit
    /// trigger; there is no implicit cancel.
    pub fn pointer_down(&mut self, target: PointerTarget, ctx: &mut EditContext<'_>) {
        if target == PointerTarget::Surface {
            return;
        }
        if let Some(session) = &self.edition {
            let pos = session.pos;
            self.close_editor(pos, true, ctx);
        }
    }

    /// Route an intercepted surface key through the cell stamped on the
    /// surface. Returns true when the key was consumed (the host must then
    /// suppress the default behavior).
    pub fn surface_key(&mut self, key: Key, ctx: &mut EditContext<'_>) -> bool {
        let Some(attachment) = ctx.surface.attachment() else {
            return false;
        };
        if attachment.owner != self.id {
            return false;
        }
        match ctx.surface.key(key) {
            Some(EditAction::Commit) => {
                self.close_editor(attachment.cell, true, ctx);
                true
            }
            Some(EditAction::Cancel) => {
                self.close_editor(attachment.cell, false, ctx);
                true
            }
            None => false,
        }
    }
}

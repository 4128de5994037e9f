//! The reusable text-edit surface.
//!
//! One composed-input-capable surface exists per document and is repositioned
//! over whichever cell is being text-edited; re-creating it per cell would be
//! expensive and would break composed-input continuity, so it is only ever
//! parked and reattached. Ownership is explicit: [`TextEditSurface::attach`]
//! evicts the previous attachment, [`TextEditSurface::detach`] parks the
//! surface input-inert. Only the most recent attachment may read or write
//! the surface, so callers must read any needed value out before triggering
//! a reattachment.

use crate::geometry::Rect;
use crate::grid::{CellPosition, GridId};

/// Cell currently borrowing the surface, and the grid instance that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub owner: GridId,
    pub cell: CellPosition,
}

/// Key event delivered to the surface by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub code: KeyCode,
    pub shift: bool,
}

impl Key {
    pub fn plain(code: KeyCode) -> Self {
        Self { code, shift: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Enter,
    Escape,
    Tab,
    Other,
}

/// What an intercepted key asks the session controller to do. The host must
/// suppress the default input behavior whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Commit,
    Cancel,
}

/// Composed-input-aware editable surface.
#[derive(Debug, Default)]
pub struct TextEditSurface {
    attachment: Option<Attachment>,
    bounds: Option<Rect>,
    content: String,
    /// Caret position in chars; moved to the end on attach.
    caret: usize,
    /// True between composition-start and composition-end.
    composing: bool,
    /// Content buffered while composing, applied atomically at
    /// composition-end.
    pending: Option<String>,
}

impl TextEditSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position the surface over a cell and seed it with `text`. Evicts any
    /// previous attachment: the prior cell loses its read access.
    pub fn attach(&mut self, owner: GridId, cell: CellPosition, bounds: Rect, text: &str) {
        if let Some(previous) = self.attachment {
            tracing::debug!(
                prev_x = previous.cell.x,
                prev_y = previous.cell.y,
                "text surface reattached, evicting previous attachment"
            );
        }
        self.attachment = Some(Attachment { owner, cell });
        self.bounds = Some(bounds);
        self.content = text.to_string();
        self.caret = self.content.chars().count();
        self.composing = false;
        self.pending = None;
    }

    /// Park the surface: hidden, input-inert, no attached cell. The surface
    /// itself is never destroyed.
    pub fn detach(&mut self) {
        self.attachment = None;
        self.bounds = None;
        self.content.clear();
        self.caret = 0;
        self.composing = false;
        self.pending = None;
    }

    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    pub fn is_attached_to(&self, owner: GridId, cell: CellPosition) -> bool {
        self.attachment == Some(Attachment { owner, cell })
    }

    /// True when no cell borrows the surface; a parked surface ignores all
    /// input.
    pub fn is_parked(&self) -> bool {
        self.attachment.is_none()
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    /// Content-change notification from the host; `text` is the surface's
    /// full new content. While a composition is active the change is
    /// buffered instead of applied.
    pub fn input(&mut self, text: &str) {
        if self.is_parked() {
            tracing::warn!("input on parked text surface ignored");
            return;
        }
        if self.composing {
            self.pending = Some(text.to_string());
            return;
        }
        self.content = text.to_string();
        self.caret = self.content.chars().count();
    }

    pub fn composition_start(&mut self) {
        if self.is_parked() {
            return;
        }
        self.composing = true;
    }

    /// End of composition: buffered text is committed atomically.
    pub fn composition_end(&mut self) {
        self.composing = false;
        if let Some(text) = self.pending.take() {
            self.content = text;
            self.caret = self.content.chars().count();
        }
    }

    /// Key interception. Enter (without shift) and Tab commit, Escape
    /// cancels; everything else is left to the surface's default editing
    /// behavior. Returns `None` while parked.
    pub fn key(&mut self, key: Key) -> Option<EditAction> {
        if self.is_parked() {
            return None;
        }
        match key.code {
            KeyCode::Enter if !key.shift => Some(EditAction::Commit),
            KeyCode::Tab => Some(EditAction::Commit),
            KeyCode::Escape => Some(EditAction::Cancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached_surface(text: &str) -> TextEditSurface {
        let mut surface = TextEditSurface::new();
        surface.attach(
            GridId::for_tests(1),
            CellPosition::new(0, 0),
            Rect::new(0.0, 0.0, 100.0, 24.0),
            text,
        );
        surface
    }

    #[test]
    fn test_attach_seeds_text_and_caret() {
        let surface = attached_surface("héllo");
        assert_eq!(surface.text(), "héllo");
        assert_eq!(surface.caret(), 5);
        assert!(!surface.is_parked());
    }

    #[test]
    fn test_detach_parks_and_clears() {
        let mut surface = attached_surface("abc");
        surface.detach();
        assert!(surface.is_parked());
        assert_eq!(surface.text(), "");
        assert!(surface.bounds().is_none());
    }

    #[test]
    fn test_reattach_evicts_previous_cell() {
        let mut surface = attached_surface("first");
        surface.attach(
            GridId::for_tests(1),
            CellPosition::new(3, 2),
            Rect::new(10.0, 10.0, 100.0, 24.0),
            "second",
        );
        assert!(surface.is_attached_to(GridId::for_tests(1), CellPosition::new(3, 2)));
        assert!(!surface.is_attached_to(GridId::for_tests(1), CellPosition::new(0, 0)));
        assert_eq!(surface.text(), "second");
    }

    #[test]
    fn test_composition_buffers_until_end() {
        let mut surface = attached_surface("");
        surface.composition_start();
        surface.input("ㅎ");
        assert_eq!(surface.text(), "", "partial composition must not apply");
        surface.input("하");
        assert_eq!(surface.text(), "");
        surface.composition_end();
        assert_eq!(surface.text(), "하");
        assert_eq!(surface.caret(), 1);
    }

    #[test]
    fn test_composition_end_without_pending() {
        let mut surface = attached_surface("keep");
        surface.composition_start();
        surface.composition_end();
        assert_eq!(surface.text(), "keep");
    }

    #[test]
    fn test_input_applies_directly_outside_composition() {
        let mut surface = attached_surface("a");
        surface.input("ab");
        assert_eq!(surface.text(), "ab");
        assert_eq!(surface.caret(), 2);
    }

    #[test]
    fn test_parked_surface_is_input_inert() {
        let mut surface = TextEditSurface::new();
        surface.input("ignored");
        assert_eq!(surface.text(), "");
        assert_eq!(surface.key(Key::plain(KeyCode::Enter)), None);
    }

    #[test]
    fn test_key_interception() {
        let mut surface = attached_surface("x");
        assert_eq!(
            surface.key(Key::plain(KeyCode::Enter)),
            Some(EditAction::Commit)
        );
        assert_eq!(
            surface.key(Key {
                code: KeyCode::Enter,
                shift: true
            }),
            None,
            "shift+enter keeps the default newline behavior"
        );
        assert_eq!(
            surface.key(Key::plain(KeyCode::Tab)),
            Some(EditAction::Commit)
        );
        assert_eq!(
            surface.key(Key::plain(KeyCode::Escape)),
            Some(EditAction::Cancel)
        );
        assert_eq!(surface.key(Key::plain(KeyCode::Other)), None);
    }
}

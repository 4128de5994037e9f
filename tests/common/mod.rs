//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use gridedit::{
    CellPosition, CellValue, DropdownOptions, EditContext, Grid, GridOptions, ImageOptions,
    InputPickerOptions, Key, KeyCode, Picker, PickerFactory, RichTextOptions, Size,
    TextEditSurface,
};
use gridedit::events::{GridEvent, HistoryEntry};

/// Build a grid from an options JSON document.
pub fn grid(json: &str) -> Grid {
    Grid::new(GridOptions::from_json(json).expect("valid grid options"))
}

/// Everything a picker factory was asked to open, by variant.
#[derive(Debug, Clone)]
pub enum OpenedPicker {
    Dropdown(DropdownOptions),
    Calendar(InputPickerOptions),
    Color(InputPickerOptions),
    RichText(RichTextOptions),
    Image(ImageOptions),
}

/// Close calls observed by stub pickers: the `commit` flag of each call.
pub type CloseLog = Rc<RefCell<Vec<bool>>>;

struct StubPicker {
    result: Option<CellValue>,
    closed: CloseLog,
}

impl Picker for StubPicker {
    fn close(&mut self, commit: bool) -> Option<CellValue> {
        self.closed.borrow_mut().push(commit);
        if commit {
            self.result.take()
        } else {
            None
        }
    }
}

/// Recording picker factory. Every constructor logs its options and hands
/// back a stub that returns `next_result` on a committed close.
#[derive(Default)]
pub struct StubPickers {
    pub opened: Vec<OpenedPicker>,
    /// Value the next-created picker yields when closed with commit.
    pub next_result: Option<CellValue>,
    pub closed: CloseLog,
    /// Popup footprint reported for flip placement.
    pub popup: Option<Size>,
}

impl StubPickers {
    fn stub(&mut self) -> Box<dyn Picker> {
        Box::new(StubPicker {
            result: self.next_result.take(),
            closed: Rc::clone(&self.closed),
        })
    }
}

impl PickerFactory for StubPickers {
    fn dropdown(&mut self, options: DropdownOptions) -> Box<dyn Picker> {
        self.opened.push(OpenedPicker::Dropdown(options));
        self.stub()
    }

    fn calendar(&mut self, options: InputPickerOptions) -> Box<dyn Picker> {
        self.opened.push(OpenedPicker::Calendar(options));
        self.stub()
    }

    fn color(&mut self, options: InputPickerOptions) -> Box<dyn Picker> {
        self.opened.push(OpenedPicker::Color(options));
        self.stub()
    }

    fn rich_text(&mut self, options: RichTextOptions) -> Box<dyn Picker> {
        self.opened.push(OpenedPicker::RichText(options));
        self.stub()
    }

    fn image(&mut self, options: ImageOptions) -> Box<dyn Picker> {
        self.opened.push(OpenedPicker::Image(options));
        self.stub()
    }

    fn popup_size(&self, _kind: gridedit::EditorKind) -> Size {
        self.popup.unwrap_or(Size {
            width: 300.0,
            height: 240.0,
        })
    }
}

/// The injected collaborators, bundled so tests can inspect them after the
/// borrow handed to the grid ends.
#[derive(Default)]
pub struct TestHost {
    pub surface: TextEditSurface,
    pub events: Vec<GridEvent>,
    pub history: Vec<HistoryEntry>,
    pub pickers: StubPickers,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctx(&mut self) -> EditContext<'_> {
        EditContext {
            surface: &mut self.surface,
            events: &mut self.events,
            history: &mut self.history,
            pickers: &mut self.pickers,
        }
    }
}

pub fn pos(x: usize, y: usize) -> CellPosition {
    CellPosition::new(x, y)
}

/// Open a text editor on a cell, replace its content, and commit with Enter.
pub fn commit_text(grid: &mut Grid, host: &mut TestHost, at: CellPosition, text: &str) {
    grid.open_editor(at, false, &mut host.ctx());
    host.surface.input(text);
    grid.surface_key(Key::plain(KeyCode::Enter), &mut host.ctx());
}

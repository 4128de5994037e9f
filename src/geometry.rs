//! Pixel geometry for editor surfaces and transient pickers.
//!
//! The engine does not lay anything out itself, but it decides where a
//! transient picker opens: pickers must stay fully inside the viewport, so a
//! popup that would overflow below or to the right of its cell is flipped to
//! open upward/leftward instead.

/// Gap kept between a flipped popup and the viewport edge it was about to
/// overflow.
pub const POPUP_GAP: f32 = 2.0;

/// Pixels shaved off the text surface so it does not overlap cell borders.
pub const EDITOR_INSET: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Bounds for the text surface placed over a cell, inset a few pixels on
/// width and height.
pub fn editor_bounds(cell: Rect) -> Rect {
    Rect::new(
        cell.x,
        cell.y,
        (cell.width - EDITOR_INSET).max(0.0),
        (cell.height - EDITOR_INSET).max(0.0),
    )
}

/// Place a popup anchored to `cell`, flipping upward and/or leftward when it
/// would overflow the viewport below or to the right.
pub fn place_popup(cell: Rect, popup: Size, viewport: Size) -> Point {
    let y = if viewport.height < cell.bottom() + popup.height {
        cell.bottom() - (popup.height + POPUP_GAP)
    } else {
        cell.y
    };
    let x = if viewport.width < cell.x + popup.width {
        cell.right() - (popup.width + POPUP_GAP)
    } else {
        cell.x
    };
    Point { x, y }
}

/// Place a popup that only flips vertically (image editor): on bottom
/// overflow it opens upward from the cell top; horizontally it is always
/// left-aligned to the cell.
pub fn place_popup_vertical(cell: Rect, popup: Size, viewport: Size) -> Point {
    let y = if viewport.height < cell.bottom() + popup.height {
        cell.y - (popup.height + POPUP_GAP)
    } else {
        cell.y
    };
    Point { x: cell.x, y }
}
